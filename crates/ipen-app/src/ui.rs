//! UI components using egui.

use egui::{Color32, Context, CornerRadius, Frame, Margin, Stroke, Vec2};
use ipen_core::canvas::Canvas;
use ipen_core::color::InkColor;
use std::time::Duration;

const PANEL_BG: Color32 = Color32::from_rgba_premultiplied(32, 32, 36, 230);
const BORDER: Color32 = Color32::from_rgb(70, 70, 78);
const SWATCH_SIZE: f32 = 18.0;

/// Smoothing factor for the frame-time average.
const FRAME_TIME_SMOOTHING: f64 = 0.1;

/// Actions that can be triggered from UI.
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    /// Change the pen color.
    SetColor(InkColor),
    /// Change the pen color to a named palette entry.
    SelectPalette(String),
    Undo,
    Redo,
    /// Clear all strokes.
    Reset,
    Quit,
}

/// Rolling frame timing for the FPS readout.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameStats {
    avg_frame_secs: Option<f64>,
}

impl FrameStats {
    /// Fold one frame duration into the running average.
    pub fn record(&mut self, dt: Duration) {
        let secs = dt.as_secs_f64();
        if secs <= 0.0 {
            return;
        }
        self.avg_frame_secs = Some(match self.avg_frame_secs {
            Some(avg) => avg + (secs - avg) * FRAME_TIME_SMOOTHING,
            None => secs,
        });
    }

    pub fn frame_time_ms(&self) -> f64 {
        self.avg_frame_secs.map_or(0.0, |s| s * 1000.0)
    }

    pub fn fps(&self) -> f64 {
        self.avg_frame_secs.map_or(0.0, |s| 1.0 / s)
    }
}

/// UI state that persists across frames.
#[derive(Debug, Clone)]
pub struct UiState {
    /// Pen color as edited by the color picker (unmultiplied RGBA).
    pub pen_color: [u8; 4],
    /// Whether the toolbar window is shown.
    pub show_toolbar: bool,
    pub frame_stats: FrameStats,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            pen_color: InkColor::default().to_array(),
            show_toolbar: true,
            frame_stats: FrameStats::default(),
        }
    }
}

impl UiState {
    /// Mirror the canvas pen color after it was changed outside the picker.
    pub fn sync_color(&mut self, color: InkColor) {
        self.pen_color = color.to_array();
    }
}

fn panel_frame() -> Frame {
    Frame::new()
        .fill(PANEL_BG)
        .corner_radius(CornerRadius::same(8))
        .stroke(Stroke::new(1.0, BORDER))
        .inner_margin(Margin::same(8))
}

fn to_color32(color: InkColor) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
}

/// Render the UI and return any action triggered.
pub fn render_ui(ctx: &Context, ui_state: &mut UiState, canvas: &Canvas) -> Option<UiAction> {
    if !ui_state.show_toolbar {
        return None;
    }

    let mut action = None;

    egui::Window::new("Toolbar")
        .frame(panel_frame())
        .resizable(false)
        .default_pos([16.0, 16.0])
        .show(ctx, |ui| {
            ui.spacing_mut().item_spacing = Vec2::new(6.0, 6.0);

            ui.horizontal(|ui| {
                ui.label("Pen color");
                if ui
                    .color_edit_button_srgba_unmultiplied(&mut ui_state.pen_color)
                    .changed()
                {
                    action = Some(UiAction::SetColor(InkColor::from_array(ui_state.pen_color)));
                }
            });

            ui.horizontal(|ui| {
                for (name, color) in canvas.palette().iter() {
                    let swatch = egui::Button::new("")
                        .fill(to_color32(color))
                        .min_size(Vec2::splat(SWATCH_SIZE));
                    if ui.add(swatch).on_hover_text(name).clicked() {
                        action = Some(UiAction::SelectPalette(name.to_string()));
                    }
                }
            });

            ui.separator();

            ui.horizontal(|ui| {
                if ui
                    .add_enabled(canvas.can_undo(), egui::Button::new("Undo"))
                    .clicked()
                {
                    action = Some(UiAction::Undo);
                }
                if ui
                    .add_enabled(canvas.can_redo(), egui::Button::new("Redo"))
                    .clicked()
                {
                    action = Some(UiAction::Redo);
                }
                if ui.button("Reset").clicked() {
                    action = Some(UiAction::Reset);
                }
            });

            ui.separator();

            let stats = ui_state.frame_stats;
            ui.label(format!(
                "{:.3} ms/frame ({:.1} FPS)",
                stats.frame_time_ms(),
                stats.fps()
            ));
            ui.label(format!("{} strokes", canvas.document().len()));
        });

    action
}
