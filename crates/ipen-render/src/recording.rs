//! Renderer that records draw calls instead of producing pixels.

use crate::renderer::Renderer;
use ipen_core::stroke::{PaintStyle, Stroke, StrokeId};
use kurbo::{Affine, Point};
use peniko::Color;

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Stroke {
        id: StrokeId,
        points: Vec<Point>,
        paint: PaintStyle,
        transform: Affine,
    },
}

/// Headless renderer keeping every frame's commands.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    frames: Vec<Vec<DrawCommand>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// All frames in the order they were built.
    pub fn frames(&self) -> &[Vec<DrawCommand>] {
        &self.frames
    }

    pub fn last_frame(&self) -> Option<&[DrawCommand]> {
        self.frames.last().map(Vec::as_slice)
    }

    /// Strokes drawn in the last frame, in draw order.
    pub fn drawn_strokes(&self) -> impl Iterator<Item = (StrokeId, PaintStyle)> + '_ {
        self.last_frame()
            .unwrap_or_default()
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Stroke { id, paint, .. } => Some((*id, *paint)),
                DrawCommand::Clear(_) => None,
            })
    }
}

impl Renderer for RecordingRenderer {
    fn clear(&mut self, color: Color) {
        self.frames.push(vec![DrawCommand::Clear(color)]);
    }

    fn draw_stroke(&mut self, stroke: &Stroke, transform: Affine) {
        let command = DrawCommand::Stroke {
            id: stroke.id(),
            points: stroke.points().to_vec(),
            paint: *stroke.paint(),
            transform,
        };
        match self.frames.last_mut() {
            Some(frame) => frame.push(command),
            None => self.frames.push(vec![command]),
        }
    }
}
