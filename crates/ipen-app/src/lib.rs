//! Ipen Application
//!
//! The overlay shell providing windowing, input handling,
//! and integration of all components.

mod app;
mod event_handler;
mod shortcuts;
mod ui;

pub use app::{App, AppConfig, AppError};
pub use event_handler::EventHandler;
pub use shortcuts::{Shortcut, ShortcutAction, ShortcutRegistry, action_for_key};
pub use ui::{FrameStats, UiAction, UiState, render_ui};
