//! Ink colors and the named pen palette.

use crate::error::{InkError, InkResult};
use peniko::Color;
use serde::{Deserialize, Serialize};

/// Serializable color representation (RGBA8, unmultiplied).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InkColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl InkColor {
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    pub const RED: Self = Self::new(255, 0, 0, 255);
    pub const GREEN: Self = Self::new(0, 255, 0, 255);
    pub const BLUE: Self = Self::new(0, 0, 255, 255);
    pub const YELLOW: Self = Self::new(255, 255, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Build from the `[r, g, b, a]` array used by color editor widgets.
    pub const fn from_array(rgba: [u8; 4]) -> Self {
        Self::new(rgba[0], rgba[1], rgba[2], rgba[3])
    }

    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for InkColor {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<Color> for InkColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<InkColor> for Color {
    fn from(color: InkColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

impl From<[u8; 4]> for InkColor {
    fn from(rgba: [u8; 4]) -> Self {
        Self::from_array(rgba)
    }
}

/// A named set of pen colors selectable by key.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    entries: Vec<(String, InkColor)>,
}

impl Default for Palette {
    fn default() -> Self {
        Self::from_entries([
            ("white", InkColor::WHITE),
            ("black", InkColor::BLACK),
            ("red", InkColor::RED),
            ("green", InkColor::GREEN),
            ("blue", InkColor::BLUE),
            ("yellow", InkColor::YELLOW),
        ])
    }
}

impl Palette {
    /// Create a palette from `(name, color)` pairs.
    /// If a name appears twice, lookup returns the first.
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = (&'a str, InkColor)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(name, color)| (name.to_string(), color))
                .collect(),
        }
    }

    /// Look up a color by name (case-insensitive).
    pub fn lookup(&self, name: &str) -> InkResult<InkColor> {
        self.entries
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, color)| *color)
            .ok_or_else(|| InkError::UnknownColor(name.to_string()))
    }

    /// Iterate entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, InkColor)> {
        self.entries.iter().map(|(name, color)| (name.as_str(), *color))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peniko_conversion() {
        let ink = InkColor::new(12, 34, 56, 200);
        let color: Color = ink.into();
        assert_eq!(InkColor::from(color), ink);
    }

    #[test]
    fn test_array_conversion() {
        let ink = InkColor::from([1, 2, 3, 4]);
        assert_eq!(ink, InkColor::new(1, 2, 3, 4));
        assert_eq!(ink.to_array(), [1, 2, 3, 4]);
    }

    #[test]
    fn test_default_palette_lookup() {
        let palette = Palette::default();
        assert_eq!(palette.len(), 6);
        assert_eq!(palette.lookup("red"), Ok(InkColor::RED));
        assert_eq!(palette.lookup("Yellow"), Ok(InkColor::YELLOW));
    }

    #[test]
    fn test_unknown_palette_key() {
        let palette = Palette::default();
        assert_eq!(
            palette.lookup("magenta"),
            Err(InkError::UnknownColor("magenta".to_string()))
        );
    }
}
