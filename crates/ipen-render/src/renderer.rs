//! Renderer trait abstraction.

use ipen_core::document::InkDocument;
use ipen_core::stroke::Stroke;
use kurbo::{Affine, Size};
use peniko::Color;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Initialization failed: {0}")]
    InitFailed(String),
    #[error("Render failed: {0}")]
    RenderFailed(String),
    #[error("Surface error: {0}")]
    Surface(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The document to render.
    pub document: &'a InkDocument,
    /// Viewport size in physical pixels.
    pub viewport_size: Size,
    /// Background color. Transparent so the desktop shows through.
    pub background_color: Color,
    /// Surface-to-viewport transform applied to every stroke.
    pub transform: Affine,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(document: &'a InkDocument, viewport_size: Size) -> Self {
        Self {
            document,
            viewport_size,
            background_color: Color::TRANSPARENT,
            transform: Affine::IDENTITY,
        }
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Set the transform applied to strokes.
    pub fn with_transform(mut self, transform: Affine) -> Self {
        self.transform = transform;
        self
    }

    /// Scale strokes for HiDPI output.
    pub fn with_scale_factor(self, scale_factor: f64) -> Self {
        self.with_transform(Affine::scale(scale_factor))
    }
}

/// Trait for rendering backends.
///
/// Backends only need to know how to clear and how to draw one stroke;
/// frame assembly is shared.
pub trait Renderer: Send + Sync {
    /// Start a new frame, discarding what was drawn before.
    fn clear(&mut self, color: Color);

    /// Draw one stroke with its own paint.
    fn draw_stroke(&mut self, stroke: &Stroke, transform: Affine);

    /// Build the frame: committed strokes in creation order, then the open
    /// stroke on top.
    fn build_scene(&mut self, ctx: &RenderContext) {
        self.clear(ctx.background_color);
        for stroke in ctx.document.visible_strokes() {
            self.draw_stroke(stroke, ctx.transform);
        }
    }
}
