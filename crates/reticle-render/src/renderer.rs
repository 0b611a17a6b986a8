//! Renderer trait abstraction.

use kurbo::Size;
use peniko::Color;
use reticle_core::page::PageLayout;
use reticle_core::settings::CursorSettings;
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
#[allow(dead_code)]
pub type RenderResult<T> = Result<T, RendererError>;

/// Page color theme (dark, Tailwind-ish values).
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Color,
    pub surface: Color,
    pub surface_hover: Color,
    pub border: Color,
    pub text: Color,
    pub text_muted: Color,
    /// Primary button / link accent.
    pub accent: Color,
    pub accent_hover: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::from_rgba8(11, 13, 18, 255),
            surface: Color::from_rgba8(22, 25, 34, 255),
            surface_hover: Color::from_rgba8(31, 35, 48, 255),
            border: Color::from_rgba8(42, 47, 62, 255),
            text: Color::from_rgba8(229, 231, 235, 255),
            text_muted: Color::from_rgba8(156, 163, 175, 255),
            accent: Color::from_rgba8(99, 102, 241, 255),
            accent_hover: Color::from_rgba8(129, 140, 248, 255),
        }
    }
}

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The laid-out page to render.
    pub layout: &'a PageLayout,
    /// Current cursor settings, passed through verbatim.
    pub settings: &'a CursorSettings,
    /// Viewport size in physical pixels.
    pub viewport_size: Size,
    /// Device pixel ratio (for HiDPI).
    pub scale_factor: f64,
    /// Color theme.
    pub theme: Theme,
    /// Index into `layout.items` of the hovered demo element, if any.
    pub hovered_item: Option<usize>,
    /// Whether the demo input field shows its caret.
    pub input_focused: bool,
    /// Seconds since startup, drives the caret blink.
    pub time: f64,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(layout: &'a PageLayout, settings: &'a CursorSettings, viewport_size: Size) -> Self {
        Self {
            layout,
            settings,
            viewport_size,
            scale_factor: 1.0,
            theme: Theme::default(),
            hovered_item: None,
            input_focused: false,
            time: 0.0,
        }
    }

    /// Set the scale factor for HiDPI.
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    /// Set the color theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Set the hovered demo element.
    pub fn with_hovered_item(mut self, hovered: Option<usize>) -> Self {
        self.hovered_item = hovered;
        self
    }

    /// Set whether the input field is focused.
    pub fn with_input_focus(mut self, focused: bool) -> Self {
        self.input_focused = focused;
        self
    }

    /// Set the animation clock.
    pub fn with_time(mut self, time: f64) -> Self {
        self.time = time;
        self
    }
}

/// A renderer that turns a frame context into a drawable scene.
pub trait Renderer {
    fn build_scene(&mut self, ctx: &RenderContext);
}
