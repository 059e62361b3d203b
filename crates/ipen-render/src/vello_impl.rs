//! Vello-based renderer implementation.

use crate::renderer::Renderer;
use ipen_core::stroke::Stroke;
use kurbo::{Affine, Cap, Circle, Join};
use peniko::{Color, Fill};
use vello::Scene;

/// Vello-based renderer for GPU-accelerated 2D graphics.
pub struct VelloRenderer {
    /// The Vello scene being built.
    scene: Scene,
    /// Base color for the render pass, set by the last clear.
    base_color: Color,
    /// Strokes drawn since the last clear.
    stroke_count: usize,
}

impl Default for VelloRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl VelloRenderer {
    /// Create a new Vello renderer.
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            base_color: Color::TRANSPARENT,
            stroke_count: 0,
        }
    }

    /// Get the built scene for rendering.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Take ownership of the scene (resets internal scene).
    pub fn take_scene(&mut self) -> Scene {
        std::mem::take(&mut self.scene)
    }

    /// Color the render target is cleared to before the scene is drawn.
    pub fn base_color(&self) -> Color {
        self.base_color
    }

    pub fn stroke_count(&self) -> usize {
        self.stroke_count
    }
}

impl Renderer for VelloRenderer {
    fn clear(&mut self, color: Color) {
        self.scene.reset();
        self.base_color = color;
        self.stroke_count = 0;
    }

    fn draw_stroke(&mut self, stroke: &Stroke, transform: Affine) {
        let paint = stroke.paint();
        let color = paint.peniko_color();

        if stroke.is_dot() {
            // A one-point path has no length and strokes to nothing.
            if let Some(center) = stroke.points().first() {
                let dot = Circle::new(*center, paint.stroke_width / 2.0);
                self.scene.fill(Fill::NonZero, transform, color, None, &dot);
            }
        } else {
            let style = kurbo::Stroke::new(paint.stroke_width)
                .with_caps(Cap::Round)
                .with_join(Join::Round);
            self.scene
                .stroke(&style, transform, color, None, &stroke.to_path());
        }
        self.stroke_count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::RenderContext;
    use ipen_core::document::InkDocument;
    use kurbo::{Point, Size};

    #[test]
    fn test_renderer_creation() {
        let renderer = VelloRenderer::new();
        assert!(renderer.scene().encoding().is_empty());
        assert_eq!(renderer.base_color(), Color::TRANSPARENT);
    }

    #[test]
    fn test_build_empty_scene() {
        let mut renderer = VelloRenderer::new();
        let doc = InkDocument::new(Size::new(800.0, 600.0));
        let ctx = RenderContext::new(&doc, Size::new(800.0, 600.0));

        renderer.build_scene(&ctx);
        assert!(renderer.scene().encoding().is_empty());
        assert_eq!(renderer.stroke_count(), 0);
    }

    #[test]
    fn test_build_scene_with_strokes() {
        let mut renderer = VelloRenderer::new();
        let mut doc = InkDocument::new(Size::new(800.0, 600.0));

        let paint = doc.paint_for_new_stroke();
        doc.begin_stroke(Point::new(100.0, 100.0), paint).unwrap();
        doc.continue_stroke(Point::new(200.0, 150.0));
        doc.end_stroke();
        doc.begin_stroke(Point::new(300.0, 300.0), paint).unwrap();

        let ctx = RenderContext::new(&doc, Size::new(800.0, 600.0));
        renderer.build_scene(&ctx);
        assert!(!renderer.scene().encoding().is_empty());
        assert_eq!(renderer.stroke_count(), 2);

        let scene = renderer.take_scene();
        assert!(!scene.encoding().is_empty());
        assert!(renderer.scene().encoding().is_empty());
    }

    #[test]
    fn test_rebuild_resets_scene() {
        let mut renderer = VelloRenderer::new();
        let mut doc = InkDocument::new(Size::new(800.0, 600.0));
        let paint = doc.paint_for_new_stroke();
        doc.begin_stroke(Point::new(10.0, 10.0), paint).unwrap();
        doc.continue_stroke(Point::new(20.0, 20.0));
        doc.end_stroke();

        renderer.build_scene(&RenderContext::new(&doc, Size::new(800.0, 600.0)));
        doc.clear();
        renderer.build_scene(&RenderContext::new(&doc, Size::new(800.0, 600.0)));

        assert!(renderer.scene().encoding().is_empty());
        assert_eq!(renderer.stroke_count(), 0);
    }
}
