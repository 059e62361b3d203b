//! Ipen Core Library
//!
//! Platform-agnostic ink model for the Ipen screen annotation overlay:
//! strokes, paint, erasing and undo/redo.

pub mod canvas;
pub mod color;
pub mod document;
pub mod error;
pub mod geometry;
pub mod history;
pub mod input;
pub mod stroke;

pub use canvas::Canvas;
pub use color::{InkColor, Palette};
pub use document::InkDocument;
pub use error::{InkError, InkResult};
pub use history::History;
pub use input::{InputState, Modifiers, MouseButton, PointerEvent};
pub use stroke::{DEFAULT_STROKE_WIDTH, HIT_MARGIN, PaintStyle, Stroke, StrokeId};
