//! Reusable egui widget components for the Reticle settings panel.
//!
//! - **Buttons**: segmented option buttons, toggle switches
//! - **Colors**: color swatches for the cursor palette
//! - **Layout**: panel frames, section labels, separators

pub mod buttons;
pub mod colors;
pub mod layout;

pub use buttons::{SegmentButton, Switch};
pub use colors::ColorSwatch;
pub use layout::{panel_frame, section_label, separator};

/// Standard sizing constants used across widgets.
pub mod sizing {
    /// Color swatch diameter
    pub const SWATCH: f32 = 24.0;
    /// Segmented button height
    pub const SEGMENT_HEIGHT: f32 = 26.0;
    /// Standard corner radius
    pub const CORNER_RADIUS: u8 = 6;
    /// Panel corner radius
    pub const PANEL_RADIUS: u8 = 10;
}

/// Standard colors used across widgets (dark theme).
pub mod theme {
    use egui::Color32;

    /// Text color
    pub const TEXT: Color32 = Color32::from_rgb(229, 231, 235);
    /// Muted text color
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(156, 163, 175);
    /// Border color
    pub const BORDER: Color32 = Color32::from_rgb(55, 61, 79);
    /// Selection/active color (indigo)
    pub const ACCENT: Color32 = Color32::from_rgb(99, 102, 241);
    /// Hover background
    pub const HOVER_BG: Color32 = Color32::from_rgb(38, 42, 56);
    /// Inactive control background
    pub const CONTROL_BG: Color32 = Color32::from_rgb(31, 35, 48);
    /// Panel background
    pub const PANEL_BG: Color32 = Color32::from_rgba_premultiplied(22, 25, 34, 248);
}
