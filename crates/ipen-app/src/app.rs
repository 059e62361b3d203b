//! Core application state and lifecycle.

use ipen_core::canvas::Canvas;
use ipen_core::color::{InkColor, Palette};
use ipen_core::input::{InputState, MouseButton, PointerEvent};
use ipen_core::stroke::DEFAULT_STROKE_WIDTH;
use ipen_render::{RenderContext, Renderer, RendererError, VelloRenderer};
use kurbo::{Point, Size};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use vello::util::{DeviceHandle, RenderSurface};
use vello::wgpu::{CompositeAlphaMode, PresentMode};
use vello::{AaConfig, RenderParams, RendererOptions};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::ModifiersState;
use winit::window::{Icon, Window, WindowId, WindowLevel};

use crate::event_handler::EventHandler;
use crate::shortcuts::action_for_key;
use crate::ui::{UiAction, UiState, render_ui};

/// Fatal application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("Window creation failed: {0}")]
    Window(#[from] winit::error::OsError),
    #[error(transparent)]
    Renderer(#[from] RendererError),
    #[error("Failed to load window icon: {0}")]
    Icon(#[from] image::ImageError),
    #[error("Invalid window icon: {0}")]
    BadIcon(#[from] winit::window::BadIcon),
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    /// Surface size used if the maximized window reports no size yet.
    pub width: u32,
    pub height: u32,
    pub pen_color: InkColor,
    pub stroke_width: f64,
    pub palette: Palette,
    /// PNG used as the window icon. A missing file is not an error.
    pub icon_path: Option<PathBuf>,
    pub show_toolbar: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Ipen".to_string(),
            width: 1280,
            height: 800,
            pen_color: InkColor::WHITE,
            stroke_width: DEFAULT_STROKE_WIDTH,
            palette: Palette::default(),
            icon_path: Some(PathBuf::from("resources/ipen.png")),
            show_toolbar: true,
        }
    }
}

/// Runtime state for the application.
struct AppState {
    // Windowing
    window: Arc<Window>,
    surface: RenderSurface<'static>,
    minimized: bool,
    occluded: bool,

    // Rendering
    vello_renderer: vello::Renderer,
    stroke_renderer: VelloRenderer,
    /// Texture blitter for RGBA->surface format conversion
    texture_blitter: vello::wgpu::util::TextureBlitter,

    // egui
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
    ui_state: UiState,
    last_frame: Instant,

    // State
    canvas: Canvas,
    input: InputState,
    modifiers: ModifiersState,
    event_handler: EventHandler,
}

/// Main application struct.
pub struct App {
    config: AppConfig,
    state: Option<AppState>,
    render_cx: Option<vello::util::RenderContext>,
    /// Set when initialization failed and the event loop was asked to exit.
    error: Option<AppError>,
}

impl App {
    /// Create a new application with default configuration.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a new application with custom configuration.
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            config,
            state: None,
            render_cx: None,
            error: None,
        }
    }

    /// Run the application until the window closes.
    pub fn run(config: AppConfig) -> Result<(), AppError> {
        let event_loop = EventLoop::new()?;
        let mut app = App::with_config(config);
        event_loop.run_app(&mut app)?;

        match app.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Create the overlay window, GPU surface and UI.
    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        let mut window_attrs = Window::default_attributes()
            .with_title(self.config.title.as_str())
            .with_transparent(true)
            .with_decorations(false)
            .with_resizable(false)
            .with_maximized(true)
            .with_window_level(WindowLevel::AlwaysOnTop);

        if let Some(path) = &self.config.icon_path {
            match load_icon(path) {
                Ok(icon) => window_attrs = window_attrs.with_window_icon(Some(icon)),
                Err(e) => log::warn!("Window icon {} not loaded: {}", path.display(), e),
            }
        }

        let window = Arc::new(event_loop.create_window(window_attrs)?);

        let size = window.inner_size();
        let (width, height) = if size.width == 0 || size.height == 0 {
            (self.config.width, self.config.height)
        } else {
            (size.width, size.height)
        };
        log::info!("Surface size: {}x{}", width, height);

        let render_cx = self
            .render_cx
            .get_or_insert_with(vello::util::RenderContext::new);
        let mut surface = pollster::block_on(render_cx.create_surface(
            window.clone(),
            width,
            height,
            PresentMode::AutoVsync,
        ))
        .map_err(|e| RendererError::Surface(e.to_string()))?;

        let device_handle = &render_cx.devices[surface.dev_id];
        configure_alpha_mode(&mut surface, device_handle);
        let device = &device_handle.device;

        let vello_renderer = vello::Renderer::new(device, RendererOptions::default())
            .map_err(|e| RendererError::InitFailed(e.to_string()))?;

        // Vello renders to Rgba8Unorm; the surface may be Bgra8Unorm.
        let texture_blitter =
            vello::wgpu::util::TextureBlitter::new(device, surface.config.format);

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(
            device,
            surface.config.format,
            egui_wgpu::RendererOptions::default(),
        );

        let mut canvas = Canvas::new(Size::new(
            surface.config.width as f64,
            surface.config.height as f64,
        ))
        .with_palette(self.config.palette.clone());
        canvas.set_color(self.config.pen_color);
        if let Err(e) = canvas.set_stroke_width(self.config.stroke_width) {
            log::warn!("Keeping default stroke width: {}", e);
        }

        let mut ui_state = UiState {
            show_toolbar: self.config.show_toolbar,
            ..UiState::default()
        };
        ui_state.sync_color(canvas.current_color());

        log::info!(
            "Ipen initialized - {}x{}",
            surface.config.width,
            surface.config.height
        );

        window.request_redraw();

        self.state = Some(AppState {
            window,
            surface,
            minimized: false,
            occluded: false,
            vello_renderer,
            stroke_renderer: VelloRenderer::new(),
            texture_blitter,
            egui_ctx,
            egui_state,
            egui_renderer,
            ui_state,
            last_frame: Instant::now(),
            canvas,
            input: InputState::new(),
            modifiers: ModifiersState::empty(),
            event_handler: EventHandler::new(),
        });

        Ok(())
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Load a PNG as a window icon.
fn load_icon(path: &Path) -> Result<Icon, AppError> {
    let rgba = image::open(path)?.into_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(Icon::from_rgba(rgba.into_raw(), width, height)?)
}

/// Switch the surface to a compositing alpha mode so the desktop shows
/// through unpainted pixels.
fn configure_alpha_mode(surface: &mut RenderSurface<'_>, device_handle: &DeviceHandle) {
    let caps = surface.surface.get_capabilities(device_handle.adapter());
    let mode = [
        CompositeAlphaMode::PreMultiplied,
        CompositeAlphaMode::PostMultiplied,
    ]
    .into_iter()
    .find(|mode| caps.alpha_modes.contains(mode));

    match mode {
        Some(mode) => {
            surface.config.alpha_mode = mode;
            surface
                .surface
                .configure(&device_handle.device, &surface.config);
            log::info!("Surface alpha mode: {:?}", mode);
        }
        None => log::warn!(
            "No transparent alpha mode available ({:?}), overlay will be opaque",
            caps.alpha_modes
        ),
    }
}

impl AppState {
    /// Apply a UI or keyboard action. Returns false if the app should quit.
    fn apply_action(&mut self, action: UiAction) -> bool {
        match action {
            UiAction::SetColor(color) => self.canvas.set_color(color),
            UiAction::SelectPalette(name) => match self.canvas.set_palette_color(&name) {
                Ok(color) => self.ui_state.sync_color(color),
                Err(e) => log::warn!("{}", e),
            },
            UiAction::Undo => {
                if let Err(e) = self.canvas.undo() {
                    log::warn!("Undo ignored: {}", e);
                }
            }
            UiAction::Redo => {
                if let Err(e) = self.canvas.redo() {
                    log::warn!("Redo ignored: {}", e);
                }
            }
            UiAction::Reset => {
                self.event_handler.cancel(&mut self.canvas);
                self.canvas.reset();
            }
            UiAction::Quit => return false,
        }
        self.window.request_redraw();
        true
    }

    /// Build and present one frame. Returns the action the toolbar produced.
    fn redraw(&mut self, render_cx: &vello::util::RenderContext) -> Option<UiAction> {
        let now = Instant::now();
        self.ui_state.frame_stats.record(now - self.last_frame);
        self.last_frame = now;

        let egui_input = self.egui_state.take_egui_input(&self.window);
        let mut action = None;
        let egui_output = self.egui_ctx.run(egui_input, |ctx| {
            action = render_ui(ctx, &mut self.ui_state, &self.canvas);
        });
        self.egui_state
            .handle_platform_output(&self.window, egui_output.platform_output);
        let egui_primitives = self
            .egui_ctx
            .tessellate(egui_output.shapes, egui_output.pixels_per_point);

        let width = self.surface.config.width;
        let height = self.surface.config.height;

        let render_ctx =
            RenderContext::new(self.canvas.document(), Size::new(width as f64, height as f64));
        self.stroke_renderer.build_scene(&render_ctx);
        let scene = self.stroke_renderer.take_scene();

        let device_handle = &render_cx.devices[self.surface.dev_id];
        let device = &device_handle.device;
        let queue = &device_handle.queue;

        let surface_texture = match self.surface.surface.get_current_texture() {
            Ok(t) => t,
            Err(e) => {
                log::warn!("Failed to get surface texture: {:?}", e);
                return action;
            }
        };

        let params = RenderParams {
            base_color: self.stroke_renderer.base_color(),
            width,
            height,
            antialiasing_method: AaConfig::Area,
        };

        // Vello's compute shaders need a StorageBinding target, which only
        // Rgba8Unorm guarantees.
        let render_texture = device.create_texture(&vello::wgpu::TextureDescriptor {
            label: Some("vello render texture"),
            size: vello::wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: vello::wgpu::TextureDimension::D2,
            format: vello::wgpu::TextureFormat::Rgba8Unorm,
            usage: vello::wgpu::TextureUsages::STORAGE_BINDING
                | vello::wgpu::TextureUsages::COPY_SRC
                | vello::wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let render_texture_view =
            render_texture.create_view(&vello::wgpu::TextureViewDescriptor::default());

        if let Err(e) = self.vello_renderer.render_to_texture(
            device,
            queue,
            &scene,
            &render_texture_view,
            &params,
        ) {
            log::error!("{}", RendererError::RenderFailed(e.to_string()));
            return action;
        }

        let surface_view = surface_texture
            .texture
            .create_view(&vello::wgpu::TextureViewDescriptor::default());

        {
            let mut blit_encoder =
                device.create_command_encoder(&vello::wgpu::CommandEncoderDescriptor {
                    label: Some("blit encoder"),
                });
            self.texture_blitter.copy(
                device,
                &mut blit_encoder,
                &render_texture_view,
                &surface_view,
            );
            queue.submit(std::iter::once(blit_encoder.finish()));
        }

        for (id, image_delta) in &egui_output.textures_delta.set {
            self.egui_renderer
                .update_texture(device, queue, *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [width, height],
            pixels_per_point: egui_output.pixels_per_point,
        };

        {
            let mut egui_encoder =
                device.create_command_encoder(&vello::wgpu::CommandEncoderDescriptor {
                    label: Some("egui encoder"),
                });
            self.egui_renderer.update_buffers(
                device,
                queue,
                &mut egui_encoder,
                &egui_primitives,
                &screen_descriptor,
            );

            let render_pass = egui_encoder.begin_render_pass(&vello::wgpu::RenderPassDescriptor {
                label: Some("egui render pass"),
                color_attachments: &[Some(vello::wgpu::RenderPassColorAttachment {
                    view: &surface_view,
                    resolve_target: None,
                    ops: vello::wgpu::Operations {
                        load: vello::wgpu::LoadOp::Load,
                        store: vello::wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            // egui-wgpu requires a 'static render pass
            let mut render_pass = render_pass.forget_lifetime();
            self.egui_renderer
                .render(&mut render_pass, &egui_primitives, &screen_descriptor);
            drop(render_pass);

            queue.submit(std::iter::once(egui_encoder.finish()));
        }

        for id in &egui_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
        surface_texture.present();

        action
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        log::info!("Creating overlay window...");
        if let Err(e) = self.init(event_loop) {
            log::error!("Initialization failed: {}", e);
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = &mut self.state else {
            return;
        };

        // Let egui process the event first
        let egui_response = state.egui_state.on_window_event(&state.window, &event);
        let egui_wants_pointer = egui_response.consumed
            || state.egui_ctx.is_pointer_over_area()
            || state.egui_ctx.wants_pointer_input();
        let egui_wants_keyboard = state.egui_ctx.wants_keyboard_input();

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if size.width == 0 || size.height == 0 {
                    state.minimized = true;
                    return;
                }
                state.minimized = false;

                state
                    .canvas
                    .set_surface_size(Size::new(size.width as f64, size.height as f64));

                if let Some(render_cx) = self.render_cx.as_mut() {
                    render_cx.resize_surface(&mut state.surface, size.width, size.height);
                }

                state.window.request_redraw();
            }

            WindowEvent::Occluded(occluded) => {
                state.occluded = occluded;
                if !occluded {
                    state.window.request_redraw();
                }
            }

            WindowEvent::Focused(false) => {
                state.event_handler.cancel(&mut state.canvas);
                state.input.release_all();
            }

            WindowEvent::ModifiersChanged(modifiers) => {
                state.modifiers = modifiers.state();
                state.input.set_modifiers(modifiers.state().into());
            }

            WindowEvent::CursorMoved { position, .. } => {
                let point = Point::new(position.x, position.y);
                state
                    .input
                    .handle_pointer_event(PointerEvent::Move { position: point });

                // A stroke that started on the canvas keeps going over the toolbar.
                if egui_wants_pointer && !state.event_handler.is_drawing() {
                    return;
                }

                state
                    .event_handler
                    .handle_move(&mut state.canvas, point, &state.input);
                state.window.request_redraw();
            }

            WindowEvent::MouseInput {
                state: btn_state,
                button,
                ..
            } => {
                let button = MouseButton::from(button);
                let position = state.input.pointer_position;

                match btn_state {
                    ElementState::Pressed => {
                        if egui_wants_pointer {
                            return;
                        }
                        state
                            .input
                            .handle_pointer_event(PointerEvent::Down { position, button });
                        state
                            .event_handler
                            .handle_press(&mut state.canvas, position, button);
                    }
                    ElementState::Released => {
                        state
                            .input
                            .handle_pointer_event(PointerEvent::Up { position, button });
                        state.event_handler.handle_release(&mut state.canvas, button);
                    }
                }
                state.window.request_redraw();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if egui_wants_keyboard || event.state != ElementState::Pressed {
                    return;
                }
                if let Some(action) = action_for_key(&event.logical_key, state.modifiers) {
                    log::debug!("Shortcut action: {:?}", action);
                    if !state.apply_action(action) {
                        event_loop.exit();
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                if state.minimized || state.occluded {
                    return;
                }
                let Some(render_cx) = self.render_cx.as_ref() else {
                    return;
                };

                if let Some(action) = state.redraw(render_cx) {
                    if !state.apply_action(action) {
                        event_loop.exit();
                        return;
                    }
                }
                state.window.request_redraw();
            }

            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.title, "Ipen");
        assert_eq!(config.pen_color, InkColor::WHITE);
        assert!((config.stroke_width - 2.0).abs() < f64::EPSILON);
        assert_eq!(config.palette.len(), 6);
        assert!(config.show_toolbar);
    }

    #[test]
    fn test_missing_icon_is_error() {
        let result = load_icon(Path::new("does/not/exist.png"));
        assert!(matches!(result, Err(AppError::Icon(_))));
    }

    #[test]
    fn test_renderer_error_wraps() {
        let err: AppError = RendererError::Surface("lost".to_string()).into();
        assert_eq!(err.to_string(), "Surface error: lost");
    }
}
