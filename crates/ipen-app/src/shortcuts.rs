//! Keyboard shortcut registry and key mapping.

use crate::ui::UiAction;
use winit::keyboard::{Key, ModifiersState, NamedKey};

/// What a shortcut does when its key is pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    Quit,
    Reset,
    Undo,
    Redo,
    /// Select the named palette color.
    Palette(&'static str),
    /// Mouse gesture, listed for reference only.
    Pointer,
}

impl ShortcutAction {
    fn to_ui_action(self) -> Option<UiAction> {
        match self {
            Self::Quit => Some(UiAction::Quit),
            Self::Reset => Some(UiAction::Reset),
            Self::Undo => Some(UiAction::Undo),
            Self::Redo => Some(UiAction::Redo),
            Self::Palette(name) => Some(UiAction::SelectPalette(name.to_string())),
            Self::Pointer => None,
        }
    }
}

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub ctrl: bool,
    pub shift: bool,
    pub description: &'static str,
    pub action: ShortcutAction,
}

impl Shortcut {
    pub const fn new(
        key: &'static str,
        ctrl: bool,
        shift: bool,
        description: &'static str,
        action: ShortcutAction,
    ) -> Self {
        Self {
            key,
            ctrl,
            shift,
            description,
            action,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+Z").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.shift {
            parts.push("Shift");
        }
        parts.push(self.key);
        parts.join("+")
    }

    /// Whether a key press with these modifiers triggers this shortcut.
    ///
    /// Character keys compare case-insensitively. Shift is only significant
    /// for Ctrl combinations; plain letter keys fire with or without it.
    pub fn matches(&self, key: &Key, modifiers: ModifiersState) -> bool {
        let ctrl = modifiers.control_key();
        if self.action == ShortcutAction::Pointer || self.ctrl != ctrl {
            return false;
        }
        if ctrl && self.shift != modifiers.shift_key() {
            return false;
        }
        match key {
            Key::Named(NamedKey::Escape) => self.key == "Escape",
            Key::Character(c) => self.key.eq_ignore_ascii_case(c.as_str()),
            _ => false,
        }
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// All registered shortcuts, in display order.
    pub const ALL: &'static [Shortcut] = &[
        Shortcut::new("Escape", false, false, "Quit", ShortcutAction::Quit),
        Shortcut::new("R", true, false, "Clear all strokes", ShortcutAction::Reset),
        Shortcut::new("Z", true, false, "Undo", ShortcutAction::Undo),
        Shortcut::new("Z", true, true, "Redo", ShortcutAction::Redo),
        Shortcut::new("Y", true, false, "Redo", ShortcutAction::Redo),
        Shortcut::new("W", false, false, "White pen", ShortcutAction::Palette("white")),
        Shortcut::new("Q", false, false, "Black pen", ShortcutAction::Palette("black")),
        Shortcut::new("R", false, false, "Red pen", ShortcutAction::Palette("red")),
        Shortcut::new("G", false, false, "Green pen", ShortcutAction::Palette("green")),
        Shortcut::new("B", false, false, "Blue pen", ShortcutAction::Palette("blue")),
        Shortcut::new("A", false, false, "Yellow pen", ShortcutAction::Palette("yellow")),
        Shortcut::new("Left Drag", false, false, "Draw", ShortcutAction::Pointer),
        Shortcut::new(
            "Right Drag",
            false,
            false,
            "Erase strokes under the cursor",
            ShortcutAction::Pointer,
        ),
    ];

    /// Get all registered shortcuts.
    pub fn all() -> &'static [Shortcut] {
        Self::ALL
    }

    /// Find the shortcut a key press triggers.
    pub fn find(key: &Key, modifiers: ModifiersState) -> Option<&'static Shortcut> {
        Self::ALL.iter().find(|s| s.matches(key, modifiers))
    }

    /// Print all shortcuts to console.
    pub fn print_all() {
        println!("\n=== Keyboard Shortcuts ===");
        for shortcut in Self::all() {
            println!("  {:20} {}", shortcut.format(), shortcut.description);
        }
        println!();
    }
}

/// Map a pressed key to the action it triggers.
pub fn action_for_key(key: &Key, modifiers: ModifiersState) -> Option<UiAction> {
    ShortcutRegistry::find(key, modifiers).and_then(|s| s.action.to_ui_action())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn char_key(c: &str) -> Key {
        Key::Character(c.into())
    }

    #[test]
    fn test_format() {
        let redo = Shortcut::new("Z", true, true, "Redo", ShortcutAction::Redo);
        let white = Shortcut::new("W", false, false, "White pen", ShortcutAction::Palette("white"));
        assert_eq!(redo.format(), "Ctrl+Shift+Z");
        assert_eq!(white.format(), "W");
    }

    #[test]
    fn test_history_shortcuts() {
        let ctrl = ModifiersState::CONTROL;
        let ctrl_shift = ModifiersState::CONTROL | ModifiersState::SHIFT;

        assert_eq!(action_for_key(&char_key("z"), ctrl), Some(UiAction::Undo));
        assert_eq!(action_for_key(&char_key("Z"), ctrl_shift), Some(UiAction::Redo));
        assert_eq!(action_for_key(&char_key("y"), ctrl), Some(UiAction::Redo));
        assert_eq!(action_for_key(&char_key("r"), ctrl), Some(UiAction::Reset));
        assert_eq!(action_for_key(&char_key("y"), ctrl_shift), None);
    }

    #[test]
    fn test_palette_shortcuts() {
        let none = ModifiersState::empty();
        assert_eq!(
            action_for_key(&char_key("r"), none),
            Some(UiAction::SelectPalette("red".to_string()))
        );
        assert_eq!(
            action_for_key(&char_key("a"), none),
            Some(UiAction::SelectPalette("yellow".to_string()))
        );
        assert_eq!(action_for_key(&char_key("x"), none), None);
        assert_eq!(action_for_key(&char_key("w"), ModifiersState::CONTROL), None);
        assert_eq!(
            action_for_key(&char_key("B"), ModifiersState::SHIFT),
            Some(UiAction::SelectPalette("blue".to_string()))
        );
    }

    #[test]
    fn test_escape_quits() {
        assert_eq!(
            action_for_key(&Key::Named(NamedKey::Escape), ModifiersState::empty()),
            Some(UiAction::Quit)
        );
        assert_eq!(
            action_for_key(&Key::Named(NamedKey::Enter), ModifiersState::empty()),
            None
        );
    }

    #[test]
    fn test_every_key_shortcut_triggers_its_own_action() {
        for shortcut in ShortcutRegistry::all() {
            if shortcut.action == ShortcutAction::Pointer {
                continue;
            }
            let key = match shortcut.key {
                "Escape" => Key::Named(NamedKey::Escape),
                k => char_key(&k.to_lowercase()),
            };
            let mut modifiers = ModifiersState::empty();
            if shortcut.ctrl {
                modifiers |= ModifiersState::CONTROL;
            }
            if shortcut.shift {
                modifiers |= ModifiersState::SHIFT;
            }
            assert_eq!(
                action_for_key(&key, modifiers),
                shortcut.action.to_ui_action(),
                "{} is shadowed or unmapped",
                shortcut.format()
            );
        }
    }

    #[test]
    fn test_pointer_entries_never_match_keys() {
        assert!(ShortcutRegistry::find(&char_key("left drag"), ModifiersState::empty()).is_none());
        assert!(
            ShortcutRegistry::all()
                .iter()
                .any(|s| s.action == ShortcutAction::Pointer)
        );
    }
}
