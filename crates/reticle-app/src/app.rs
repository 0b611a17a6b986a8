//! Core application state and lifecycle.

use kurbo::Size;
use reticle_core::cursor::CursorAnimator;
use reticle_core::input::{InputState, MouseButton};
use reticle_core::page::{PageLayout, PageState};
use reticle_core::settings::CursorSettings;
use reticle_core::targets::{TargetId, TargetKind, TargetRegistry};
use reticle_render::{RenderContext, Renderer, Theme, VelloRenderer};
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;
use vello::util::RenderSurface;
use vello::wgpu::PresentMode;
use vello::{AaConfig, RenderParams, RendererOptions};
use winit::application::ApplicationHandler;
#[cfg(not(target_arch = "wasm32"))]
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowId};

#[cfg(target_arch = "wasm32")]
use web_time::Instant;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

#[cfg(target_arch = "wasm32")]
use winit::platform::web::WindowAttributesExtWebSys;

use crate::event_handler::EventHandler;
use crate::overlay;
use crate::shortcuts::ShortcutRegistry;
use crate::ui::{render_ui, UiAction, UiState};

/// Errors loading the optional JSON config override.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Application configuration.
///
/// On native an optional JSON file named by the `RETICLE_CONFIG` env var
/// overrides the defaults; unknown fields fall back per-field.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Reticle".to_string(),
            width: 1280,
            height: 800,
        }
    }
}

impl AppConfig {
    /// Parse a config from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn from_path(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Load the config, honoring the `RETICLE_CONFIG` env var.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var("RETICLE_CONFIG") else {
            return Self::default();
        };
        match Self::from_path(&path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path);
                config
            }
            Err(e) => {
                log::warn!("Ignoring config {}: {}", path, e);
                Self::default()
            }
        }
    }
}

/// Runtime state for the application.
struct AppState {
    // Windowing
    window: Arc<Window>,
    surface: RenderSurface<'static>,

    // Rendering
    vello_renderer: vello::Renderer,
    page_renderer: VelloRenderer,
    /// Texture blitter for RGBA->surface format conversion (needed for WebGPU/WASM)
    texture_blitter: vello::wgpu::util::TextureBlitter,
    theme: Theme,

    // egui
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
    ui_state: UiState,

    // State
    settings: CursorSettings,
    page: PageState,
    targets: TargetRegistry,
    /// Target ids of the page's demo elements, in layout order.
    page_target_ids: Vec<TargetId>,
    /// Cached from the last layout, for scroll clamping.
    content_height: f64,
    animator: CursorAnimator,
    input: InputState,

    // Event handling
    event_handler: EventHandler,

    // Frame timing
    started: Instant,
    last_frame: Instant,
}

/// Main application struct.
pub struct App {
    config: AppConfig,
    state: Option<AppState>,
    render_cx: Option<vello::util::RenderContext>,
    /// Window waiting for async surface creation (WASM only)
    pending_window: Option<Arc<Window>>,
    /// Flag to indicate async init is in progress
    #[cfg(target_arch = "wasm32")]
    init_in_progress: std::cell::Cell<bool>,
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
            pending_window: None,
            #[cfg(target_arch = "wasm32")]
            init_in_progress: std::cell::Cell::new(false),
        }
    }

    /// Run the application.
    pub async fn run() {
        let event_loop = EventLoop::new().expect("Failed to create event loop");

        #[cfg(not(target_arch = "wasm32"))]
        let app = App::with_config(AppConfig::load());
        #[cfg(target_arch = "wasm32")]
        let app = App::new();

        #[cfg(target_arch = "wasm32")]
        {
            use winit::platform::web::EventLoopExtWebSys;
            event_loop.spawn_app(app);
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let mut app = app;
            event_loop.run_app(&mut app).expect("Event loop error");
        }
    }

    /// Finish initialization after the surface is created.
    fn finish_init(&mut self, window: Arc<Window>, surface: RenderSurface<'static>) {
        let render_cx = self.render_cx.as_ref().expect("RenderContext not initialized");
        let device = &render_cx.devices[surface.dev_id].device;

        let vello_renderer = vello::Renderer::new(device, RendererOptions::default())
            .expect("Failed to create Vello renderer");

        // Create texture blitter for RGBA->surface format conversion
        // This is needed because Vello renders to Rgba8Unorm (for compute shader compatibility)
        // but the surface format on WebGPU is typically Bgra8Unorm
        let texture_blitter =
            vello::wgpu::util::TextureBlitter::new(device, surface.config.format);

        // Initialize egui
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

        log::info!("Reticle initialized - {}x{}", surface.config.width, surface.config.height);
        ShortcutRegistry::print_all();

        let now = Instant::now();
        self.state = Some(AppState {
            window: window.clone(),
            surface,
            vello_renderer,
            page_renderer: VelloRenderer::new(),
            texture_blitter,
            theme: Theme::default(),
            egui_ctx,
            egui_state,
            egui_renderer,
            ui_state: UiState::default(),
            settings: CursorSettings::default(),
            page: PageState::default(),
            targets: TargetRegistry::new(),
            page_target_ids: Vec::new(),
            content_height: 0.0,
            animator: CursorAnimator::new(),
            input: InputState::new(),
            event_handler: EventHandler::new(),
            started: now,
            last_frame: now,
        });

        self.pending_window = None;

        // Request initial redraw
        window.request_redraw();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        log::info!("Application resumed, creating window...");

        #[cfg(not(target_arch = "wasm32"))]
        let window_attrs = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));

        #[cfg(target_arch = "wasm32")]
        let window_attrs = {
            use wasm_bindgen::JsCast;

            let web_window = web_sys::window().expect("No window");
            let document = web_window.document().expect("No document");

            let viewport_width = web_window
                .inner_width()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(self.config.width as f64);
            let viewport_height = web_window
                .inner_height()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(self.config.height as f64);

            // Create (or adopt) the canvas
            let canvas = document
                .get_element_by_id("reticle-canvas")
                .and_then(|e| e.dyn_into::<web_sys::HtmlCanvasElement>().ok())
                .or_else(|| {
                    let body = document.body()?;
                    let canvas = document.create_element("canvas").ok()?;
                    canvas.set_id("reticle-canvas");
                    body.append_child(&canvas).ok()?;
                    canvas.dyn_into::<web_sys::HtmlCanvasElement>().ok()
                })
                .expect("Failed to create canvas");

            // Size the canvas to the viewport with device-pixel-ratio awareness
            let dpr = web_window.device_pixel_ratio();
            canvas.set_width((viewport_width * dpr) as u32);
            canvas.set_height((viewport_height * dpr) as u32);
            let style = canvas.style();
            let _ = style.set_property("width", "100%");
            let _ = style.set_property("height", "100%");
            let _ = style.set_property("display", "block");
            let _ = style.set_property("position", "fixed");
            let _ = style.set_property("top", "0");
            let _ = style.set_property("left", "0");

            log::info!(
                "Canvas created: {}x{} (dpr: {})",
                viewport_width,
                viewport_height,
                dpr
            );

            Window::default_attributes()
                .with_title(&self.config.title)
                .with_canvas(Some(canvas))
        };

        let window = Arc::new(
            event_loop
                .create_window(window_attrs)
                .expect("Failed to create window"),
        );

        log::info!("Window created, initializing renderer...");

        let size = window.inner_size();
        let (width, height) = if size.width == 0 || size.height == 0 {
            (self.config.width, self.config.height)
        } else {
            (size.width, size.height)
        };

        // On native, block on async surface creation
        #[cfg(not(target_arch = "wasm32"))]
        {
            let render_cx = self
                .render_cx
                .get_or_insert_with(vello::util::RenderContext::new);

            let surface = pollster::block_on(render_cx.create_surface(
                window.clone(),
                width,
                height,
                PresentMode::AutoVsync,
            ))
            .expect("Failed to create surface");

            // Transmute lifetime to 'static - safe because App owns everything
            let surface: RenderSurface<'static> = unsafe { std::mem::transmute(surface) };
            self.finish_init(window, surface);
        }

        // On WASM, store window for later async initialization
        #[cfg(target_arch = "wasm32")]
        {
            let _ = (width, height);
            self.pending_window = Some(window);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // On WASM, handle async initialization
        #[cfg(target_arch = "wasm32")]
        if self.state.is_none() {
            if let Some(window) = self.pending_window.clone() {
                if !self.init_in_progress.get() {
                    self.init_in_progress.set(true);

                    let web_window = web_sys::window().expect("No window");
                    let dpr = web_window.device_pixel_ratio();
                    let viewport_width = web_window
                        .inner_width()
                        .ok()
                        .and_then(|v| v.as_f64())
                        .unwrap_or(self.config.width as f64);
                    let viewport_height = web_window
                        .inner_height()
                        .ok()
                        .and_then(|v| v.as_f64())
                        .unwrap_or(self.config.height as f64);

                    let width = (viewport_width * dpr) as u32;
                    let height = (viewport_height * dpr) as u32;

                    // Get raw pointer to self for async callback
                    let self_ptr = self as *mut Self;
                    let window_clone = window.clone();

                    wasm_bindgen_futures::spawn_local(async move {
                        log::info!("Creating surface asynchronously...");

                        let mut render_cx = vello::util::RenderContext::new();

                        match render_cx
                            .create_surface(window_clone.clone(), width, height, PresentMode::AutoVsync)
                            .await
                        {
                            Ok(surface) => {
                                log::info!("Surface created successfully");

                                // Transmute lifetime to 'static
                                let surface: RenderSurface<'static> =
                                    unsafe { std::mem::transmute(surface) };

                                // SAFETY: We're on the same thread (WASM is single-threaded)
                                // and the App is kept alive by the event loop
                                let app = unsafe { &mut *self_ptr };
                                app.render_cx = Some(render_cx);
                                app.finish_init(window_clone, surface);
                            }
                            Err(e) => {
                                log::error!("Failed to create surface: {:?}", e);
                                let app = unsafe { &mut *self_ptr };
                                app.init_in_progress.set(false);
                            }
                        }
                    });
                }

                // Request redraw to keep the event loop running
                window.request_redraw();
            }
            return;
        }

        let Some(state) = &mut self.state else {
            return;
        };

        // Let egui process the event first
        let egui_response = state.egui_state.on_window_event(&state.window, &event);
        let egui_wants_pointer = egui_response.consumed
            || state.egui_ctx.is_pointer_over_area()
            || state.egui_ctx.wants_pointer_input();

        // Feed the core input state. Pointer and key state always flow (the
        // cursor overlay tracks the pointer over the panel too); wheel events
        // are gated inside the handler.
        state.event_handler.handle_window_event(
            &event,
            &mut state.input,
            state.window.scale_factor(),
            egui_wants_pointer,
        );

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if size.width == 0 || size.height == 0 {
                    return;
                }

                if let Some(render_cx) = self.render_cx.as_mut() {
                    render_cx.resize_surface(&mut state.surface, size.width, size.height);
                }

                state.window.request_redraw();
            }

            WindowEvent::CursorEntered { .. } => {
                state.animator.set_pointer_inside(true);
            }

            WindowEvent::CursorLeft { .. } => {
                state.animator.set_pointer_inside(false);
            }

            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt = now.duration_since(state.last_frame).as_secs_f64();
                state.last_frame = now;
                let time = now.duration_since(state.started).as_secs_f64();

                let scale_factor = state.window.scale_factor();
                let viewport = Size::new(
                    state.surface.config.width as f64 / scale_factor,
                    state.surface.config.height as f64 / scale_factor,
                );

                // Apply accumulated wheel scroll (wheel up = positive delta).
                let scroll = state.input.scroll_delta.y;
                if scroll != 0.0 {
                    state.page.scroll_by(-scroll, viewport.height, state.content_height);
                }

                let layout = PageLayout::compute(viewport, state.page.scroll);
                state.content_height = layout.content_height;

                // Rebuild the target registry: page elements plus the panel
                // control rects collected by the previous egui pass.
                state.targets.begin_frame();
                state.page_target_ids.clear();
                for item in &layout.items {
                    let id = state.targets.register(item.rect, item.element.kind);
                    state.page_target_ids.push(id);
                }
                for rect in &state.ui_state.control_rects {
                    state.targets.register(
                        kurbo::Rect::new(
                            rect.min.x as f64,
                            rect.min.y as f64,
                            rect.max.x as f64,
                            rect.max.y as f64,
                        ),
                        TargetKind::Control,
                    );
                }

                let pointer = state.input.pointer_position;
                let hover = state.event_handler.resolve_hover(&state.targets, pointer);

                // Demo input-field focus follows page clicks.
                if state.input.is_button_just_pressed(MouseButton::Left) && !egui_wants_pointer {
                    let on_input = hover.map(|t| t.kind == TargetKind::InputField).unwrap_or(false);
                    state.page.input_focused = on_input;
                    if let Some(target) = &hover {
                        log::debug!("clicked {}", target.kind.name());
                    }
                }

                state.event_handler.apply_shortcuts(
                    &state.input,
                    &mut state.settings,
                    &mut state.ui_state,
                );

                state.animator.update(
                    dt,
                    pointer,
                    state.input.is_button_pressed(MouseButton::Left),
                    hover.as_ref(),
                    &state.settings,
                );
                let cursor_frame = state.animator.frame(&state.settings);

                // Run egui and apply any actions.
                let egui_input = state.egui_state.take_egui_input(&state.window);
                let egui_output = state.egui_ctx.run(egui_input, |ctx| {
                    if let Some(action) = render_ui(ctx, &mut state.ui_state, &state.settings) {
                        match action {
                            UiAction::UpdateSetting(update) => state.settings.apply(update),
                            UiAction::ShowShortcuts => {
                                state.ui_state.shortcuts_modal_open =
                                    !state.ui_state.shortcuts_modal_open;
                            }
                        }
                    }
                    overlay::paint_cursor(ctx, &cursor_frame, &state.settings);
                });

                state
                    .egui_state
                    .handle_platform_output(&state.window, egui_output.platform_output);
                // egui re-shows the pointer for its own cursor icons, so the
                // setting must be re-asserted after its platform output.
                state.window.set_cursor_visible(!state.settings.hide_default_cursor);

                let egui_primitives = state
                    .egui_ctx
                    .tessellate(egui_output.shapes, egui_output.pixels_per_point);

                // Build the page scene.
                let hovered_item = state
                    .event_handler
                    .hovered
                    .and_then(|id| state.page_target_ids.iter().position(|&tid| tid == id));
                let physical = Size::new(
                    state.surface.config.width as f64,
                    state.surface.config.height as f64,
                );
                let render_ctx = RenderContext::new(&layout, &state.settings, physical)
                    .with_scale_factor(scale_factor)
                    .with_theme(state.theme)
                    .with_hovered_item(hovered_item)
                    .with_input_focus(state.page.input_focused)
                    .with_time(time);
                state.page_renderer.build_scene(&render_ctx);
                let scene = state.page_renderer.take_scene();

                // Render
                let Some(render_cx) = self.render_cx.as_ref() else {
                    return;
                };

                let device_handle = &render_cx.devices[state.surface.dev_id];
                let device = &device_handle.device;
                let queue = &device_handle.queue;

                let surface_texture = match state.surface.surface.get_current_texture() {
                    Ok(t) => t,
                    Err(e) => {
                        log::warn!("Failed to get surface texture: {:?}", e);
                        return;
                    }
                };

                let width = state.surface.config.width;
                let height = state.surface.config.height;

                let params = RenderParams {
                    base_color: state.theme.background,
                    width,
                    height,
                    antialiasing_method: AaConfig::Area,
                };

                // Create an intermediate texture with StorageBinding usage for Vello.
                // IMPORTANT: Must use Rgba8Unorm format because:
                // 1. Vello's compute shaders require StorageBinding usage
                // 2. WebGPU only supports StorageBinding for Rgba8Unorm (not Bgra8Unorm)
                // 3. We copy to the surface texture afterward (which may be Bgra8Unorm)
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

                // Render Vello to the intermediate texture
                if let Err(e) = state.vello_renderer.render_to_texture(
                    device,
                    queue,
                    &scene,
                    &render_texture_view,
                    &params,
                ) {
                    log::error!("Failed to render: {:?}", e);
                    return;
                }

                let surface_view = surface_texture
                    .texture
                    .create_view(&vello::wgpu::TextureViewDescriptor::default());

                // Blit the RGBA intermediate texture to the surface texture (which may be BGRA)
                {
                    let mut blit_encoder =
                        device.create_command_encoder(&vello::wgpu::CommandEncoderDescriptor {
                            label: Some("blit encoder"),
                        });

                    state.texture_blitter.copy(
                        device,
                        &mut blit_encoder,
                        &render_texture_view,
                        &surface_view,
                    );

                    queue.submit(std::iter::once(blit_encoder.finish()));
                }

                // Update egui textures
                for (id, image_delta) in &egui_output.textures_delta.set {
                    state.egui_renderer.update_texture(device, queue, *id, image_delta);
                }

                // Render egui on top
                let screen_descriptor = egui_wgpu::ScreenDescriptor {
                    size_in_pixels: [width, height],
                    pixels_per_point: egui_output.pixels_per_point,
                };

                {
                    let mut egui_encoder =
                        device.create_command_encoder(&vello::wgpu::CommandEncoderDescriptor {
                            label: Some("egui encoder"),
                        });

                    state.egui_renderer.update_buffers(
                        device,
                        queue,
                        &mut egui_encoder,
                        &egui_primitives,
                        &screen_descriptor,
                    );

                    let render_pass =
                        egui_encoder.begin_render_pass(&vello::wgpu::RenderPassDescriptor {
                            label: Some("egui render pass"),
                            color_attachments: &[Some(vello::wgpu::RenderPassColorAttachment {
                                view: &surface_view,
                                resolve_target: None,
                                ops: vello::wgpu::Operations {
                                    load: vello::wgpu::LoadOp::Load, // Keep Vello content
                                    store: vello::wgpu::StoreOp::Store,
                                },
                                depth_slice: None,
                            })],
                            depth_stencil_attachment: None,
                            timestamp_writes: None,
                            occlusion_query_set: None,
                        });

                    // Use forget_lifetime to satisfy egui-wgpu's 'static requirement
                    let mut render_pass = render_pass.forget_lifetime();
                    state
                        .egui_renderer
                        .render(&mut render_pass, &egui_primitives, &screen_descriptor);
                    drop(render_pass);

                    queue.submit(std::iter::once(egui_encoder.finish()));
                }

                // Free egui textures
                for id in &egui_output.textures_delta.free {
                    state.egui_renderer.free_texture(id);
                }

                surface_texture.present();

                // The cursor animates continuously; clear per-frame input and
                // schedule the next frame.
                state.input.begin_frame();
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
    fn test_config_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.title, "Reticle");
        assert_eq!(config.width, 1280);
        assert_eq!(config.height, 800);
    }

    #[test]
    fn test_config_partial_override() {
        let config = AppConfig::from_json(r#"{ "width": 1920 }"#).unwrap();
        assert_eq!(config.width, 1920);
        assert_eq!(config.height, 800);
        assert_eq!(config.title, "Reticle");
    }

    #[test]
    fn test_config_parse_error() {
        let err = AppConfig::from_json("not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
