//! Event handling for pen and eraser interactions.

use ipen_core::canvas::Canvas;
use ipen_core::error::InkError;
use ipen_core::input::{InputState, MouseButton};
use kurbo::Point;

/// Handles pointer events and translates them to canvas operations.
///
/// Left button draws, right button held erases under the cursor.
#[derive(Debug, Default)]
pub struct EventHandler {
    drawing: bool,
}

impl EventHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a stroke gesture is in progress.
    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// Handle a mouse button press.
    pub fn handle_press(&mut self, canvas: &mut Canvas, point: Point, button: MouseButton) {
        if button != MouseButton::Left {
            return;
        }
        match canvas.begin_stroke(point) {
            Ok(_) => self.drawing = true,
            Err(InkError::StrokeInProgress) => {
                log::warn!("Pen down while a stroke is open, continuing it");
                self.drawing = true;
            }
            Err(e) => log::warn!("Could not begin stroke: {}", e),
        }
    }

    /// Handle a mouse button release.
    pub fn handle_release(&mut self, canvas: &mut Canvas, button: MouseButton) {
        if button != MouseButton::Left || !self.drawing {
            return;
        }
        canvas.end_stroke();
        self.drawing = false;
    }

    /// Handle cursor motion.
    ///
    /// While the right button is held the cursor only erases; an open stroke
    /// is left as it is until the eraser is released.
    pub fn handle_move(&mut self, canvas: &mut Canvas, point: Point, input: &InputState) {
        if input.is_button_pressed(MouseButton::Right) {
            canvas.erase_near(point);
            return;
        }
        if self.drawing && !canvas.continue_stroke(point) {
            // Closed elsewhere, e.g. by a reset.
            self.drawing = false;
        }
    }

    /// Finish any open stroke, e.g. when the window loses focus.
    pub fn cancel(&mut self, canvas: &mut Canvas) {
        if self.drawing {
            canvas.end_stroke();
            self.drawing = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ipen_core::input::PointerEvent;
    use kurbo::Size;

    fn canvas() -> Canvas {
        Canvas::new(Size::new(800.0, 600.0))
    }

    #[test]
    fn test_left_drag_draws_stroke() {
        let mut canvas = canvas();
        let mut handler = EventHandler::new();
        let input = InputState::new();

        handler.handle_press(&mut canvas, Point::new(10.0, 10.0), MouseButton::Left);
        assert!(handler.is_drawing());
        handler.handle_move(&mut canvas, Point::new(20.0, 20.0), &input);
        handler.handle_move(&mut canvas, Point::new(30.0, 30.0), &input);
        handler.handle_release(&mut canvas, MouseButton::Left);

        assert!(!handler.is_drawing());
        assert_eq!(canvas.document().len(), 1);
        assert_eq!(canvas.document().strokes()[0].len(), 3);
    }

    #[test]
    fn test_click_makes_dot() {
        let mut canvas = canvas();
        let mut handler = EventHandler::new();

        handler.handle_press(&mut canvas, Point::new(10.0, 10.0), MouseButton::Left);
        handler.handle_release(&mut canvas, MouseButton::Left);

        assert_eq!(canvas.document().len(), 1);
        assert!(canvas.document().strokes()[0].is_dot());
    }

    #[test]
    fn test_move_without_press_does_nothing() {
        let mut canvas = canvas();
        let mut handler = EventHandler::new();
        handler.handle_move(&mut canvas, Point::new(20.0, 20.0), &InputState::new());
        assert!(canvas.document().is_empty());
        assert!(canvas.document().open_stroke().is_none());
    }

    #[test]
    fn test_right_drag_erases() {
        let mut canvas = canvas();
        let mut handler = EventHandler::new();
        let mut input = InputState::new();

        handler.handle_press(&mut canvas, Point::new(0.0, 100.0), MouseButton::Left);
        handler.handle_move(&mut canvas, Point::new(200.0, 100.0), &input);
        handler.handle_release(&mut canvas, MouseButton::Left);
        assert_eq!(canvas.document().len(), 1);

        let down = PointerEvent::Down {
            position: Point::new(100.0, 50.0),
            button: MouseButton::Right,
        };
        input.handle_pointer_event(down);
        handler.handle_press(&mut canvas, Point::new(100.0, 50.0), MouseButton::Right);
        handler.handle_move(&mut canvas, Point::new(100.0, 80.0), &input);
        assert_eq!(canvas.document().len(), 1);

        handler.handle_move(&mut canvas, Point::new(100.0, 101.0), &input);
        assert!(canvas.document().is_empty());
    }

    #[test]
    fn test_eraser_does_not_extend_open_stroke() {
        let mut canvas = canvas();
        let mut handler = EventHandler::new();
        let mut input = InputState::new();

        handler.handle_press(&mut canvas, Point::new(0.0, 100.0), MouseButton::Left);
        handler.handle_move(&mut canvas, Point::new(200.0, 100.0), &input);
        handler.handle_release(&mut canvas, MouseButton::Left);

        handler.handle_press(&mut canvas, Point::new(100.0, 300.0), MouseButton::Left);
        input.handle_pointer_event(PointerEvent::Down {
            position: Point::new(100.0, 300.0),
            button: MouseButton::Right,
        });
        handler.handle_move(&mut canvas, Point::new(100.0, 100.0), &input);

        assert!(canvas.document().is_empty());
        assert_eq!(canvas.document().open_stroke().map(|s| s.len()), Some(1));

        input.handle_pointer_event(PointerEvent::Up {
            position: Point::new(100.0, 100.0),
            button: MouseButton::Right,
        });
        handler.handle_move(&mut canvas, Point::new(120.0, 100.0), &input);
        assert_eq!(canvas.document().open_stroke().map(|s| s.len()), Some(2));
    }

    #[test]
    fn test_cancel_commits_open_stroke() {
        let mut canvas = canvas();
        let mut handler = EventHandler::new();
        let input = InputState::new();

        handler.handle_press(&mut canvas, Point::new(10.0, 10.0), MouseButton::Left);
        handler.handle_move(&mut canvas, Point::new(50.0, 10.0), &input);
        handler.cancel(&mut canvas);

        assert!(!handler.is_drawing());
        assert!(!canvas.document().is_drawing());
        assert_eq!(canvas.document().len(), 1);
    }

    #[test]
    fn test_reset_mid_stroke() {
        let mut canvas = canvas();
        let mut handler = EventHandler::new();
        let input = InputState::new();

        handler.handle_press(&mut canvas, Point::new(10.0, 10.0), MouseButton::Left);
        canvas.reset();
        handler.handle_move(&mut canvas, Point::new(50.0, 10.0), &input);

        assert!(!handler.is_drawing());
        assert!(canvas.document().is_empty());
    }
}
