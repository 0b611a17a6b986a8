//! Cursor settings: the flat configuration record read by the cursor
//! renderer every frame.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum spin duration exposed by the slider, in seconds.
pub const SPIN_DURATION_MIN: f64 = 0.5;
/// Maximum spin duration exposed by the slider, in seconds.
pub const SPIN_DURATION_MAX: f64 = 5.0;
/// Slider step for the spin duration.
pub const SPIN_DURATION_STEP: f64 = 0.5;

/// Error parsing a `#rrggbb` color string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("expected '#rrggbb', got '{0}'")]
    Format(String),
    #[error("invalid hex digits in '{0}'")]
    Digits(String),
}

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CursorColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl CursorColor {
    /// Create a color from RGB components.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a CSS-style `#rrggbb` string.
    pub fn from_hex(s: &str) -> Result<Self, ColorParseError> {
        let s = s.trim();
        if !s.starts_with('#') || s.len() != 7 {
            return Err(ColorParseError::Format(s.to_string()));
        }
        let digits = |range| {
            u8::from_str_radix(&s[range], 16).map_err(|_| ColorParseError::Digits(s.to_string()))
        };
        Ok(Self {
            r: digits(1..3)?,
            g: digits(3..5)?,
            b: digits(5..7)?,
        })
    }

    /// Format as a lowercase `#rrggbb` string.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Convert to a peniko color for scene rendering.
    pub fn to_peniko(self) -> peniko::Color {
        peniko::Color::from_rgba8(self.r, self.g, self.b, 255)
    }

    /// Same color with an explicit alpha, for glow/ring effects.
    pub fn to_peniko_with_alpha(self, alpha: u8) -> peniko::Color {
        peniko::Color::from_rgba8(self.r, self.g, self.b, alpha)
    }
}

/// A named palette entry shown in the settings panel.
#[derive(Debug, Clone, Copy)]
pub struct ColorOption {
    pub name: &'static str,
    pub color: CursorColor,
}

/// The fixed cursor color palette (Tailwind 500-level values).
pub const CURSOR_COLORS: &[ColorOption] = &[
    ColorOption { name: "Indigo", color: CursorColor::new(0x63, 0x66, 0xf1) },
    ColorOption { name: "Emerald", color: CursorColor::new(0x10, 0xb9, 0x81) },
    ColorOption { name: "Rose", color: CursorColor::new(0xf4, 0x3f, 0x5e) },
    ColorOption { name: "Amber", color: CursorColor::new(0xf5, 0x9e, 0x0b) },
    ColorOption { name: "Violet", color: CursorColor::new(0x8b, 0x5c, 0xf6) },
];

/// Cursor size classes. The set is closed, so out-of-domain pixel sizes
/// are unrepresentable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CursorSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl CursorSize {
    /// All size classes, in display order.
    pub const ALL: [CursorSize; 3] = [CursorSize::Small, CursorSize::Medium, CursorSize::Large];

    /// Pixel size of the cursor formation.
    pub const fn px(self) -> f64 {
        match self {
            CursorSize::Small => 16.0,
            CursorSize::Medium => 20.0,
            CursorSize::Large => 24.0,
        }
    }

    /// Display label for the settings panel.
    pub const fn label(self) -> &'static str {
        match self {
            CursorSize::Small => "Small",
            CursorSize::Medium => "Medium",
            CursorSize::Large => "Large",
        }
    }
}

/// The cursor configuration record. Created once at startup, mutated only
/// through [`CursorSettings::apply`], and handed to the renderer each frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CursorSettings {
    /// Seconds per full revolution of the idle spin.
    pub spin_duration: f64,
    /// Suppress the platform pointer glyph.
    pub hide_default_cursor: bool,
    /// Shift the locked bracket frame with the pointer for a depth effect.
    pub parallax_on: bool,
    /// Fill/stroke color of the cursor graphic.
    pub cursor_color: CursorColor,
    /// Scale class of the cursor graphic.
    pub cursor_size: CursorSize,
}

impl Default for CursorSettings {
    fn default() -> Self {
        Self {
            spin_duration: 2.0,
            hide_default_cursor: true,
            parallax_on: true,
            cursor_color: CURSOR_COLORS[0].color, // Indigo
            cursor_size: CursorSize::Medium,
        }
    }
}

/// A single-field settings change. One variant per field keeps the record's
/// invariant (all fields always valid) enforced at the only mutation point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettingUpdate {
    SpinDuration(f64),
    HideDefaultCursor(bool),
    ParallaxOn(bool),
    CursorColor(CursorColor),
    CursorSize(CursorSize),
}

impl CursorSettings {
    /// Apply one update, replacing exactly the named field.
    ///
    /// The slider already constrains `spin_duration`, but programmatic
    /// callers are clamped into the same range.
    pub fn apply(&mut self, update: SettingUpdate) {
        match update {
            SettingUpdate::SpinDuration(secs) => {
                self.spin_duration = secs.clamp(SPIN_DURATION_MIN, SPIN_DURATION_MAX);
            }
            SettingUpdate::HideDefaultCursor(hide) => self.hide_default_cursor = hide,
            SettingUpdate::ParallaxOn(on) => self.parallax_on = on,
            SettingUpdate::CursorColor(color) => self.cursor_color = color,
            SettingUpdate::CursorSize(size) => self.cursor_size = size,
        }
        log::debug!("settings updated: {:?}", update);
    }

    /// Look up a palette entry by name, if it exists.
    pub fn palette_entry(name: &str) -> Option<&'static ColorOption> {
        CURSOR_COLORS.iter().find(|c| c.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = CursorSettings::default();
        assert_eq!(settings.spin_duration, 2.0);
        assert!(settings.hide_default_cursor);
        assert!(settings.parallax_on);
        assert_eq!(settings.cursor_color.to_hex(), "#6366f1");
        assert_eq!(settings.cursor_size, CursorSize::Medium);
        assert_eq!(settings.cursor_size.px(), 20.0);
    }

    #[test]
    fn test_apply_changes_only_named_field() {
        let base = CursorSettings::default();

        let mut s = base;
        s.apply(SettingUpdate::SpinDuration(3.5));
        assert_eq!(s.spin_duration, 3.5);
        assert_eq!(s.hide_default_cursor, base.hide_default_cursor);
        assert_eq!(s.parallax_on, base.parallax_on);
        assert_eq!(s.cursor_color, base.cursor_color);
        assert_eq!(s.cursor_size, base.cursor_size);

        let mut s = base;
        s.apply(SettingUpdate::HideDefaultCursor(false));
        assert!(!s.hide_default_cursor);
        assert_eq!(s.spin_duration, base.spin_duration);
        assert_eq!(s.parallax_on, base.parallax_on);
        assert_eq!(s.cursor_color, base.cursor_color);
        assert_eq!(s.cursor_size, base.cursor_size);

        let mut s = base;
        s.apply(SettingUpdate::ParallaxOn(false));
        assert!(!s.parallax_on);
        assert_eq!(s.hide_default_cursor, base.hide_default_cursor);

        let mut s = base;
        let emerald = CursorSettings::palette_entry("Emerald").unwrap().color;
        s.apply(SettingUpdate::CursorColor(emerald));
        assert_eq!(s.cursor_color.to_hex(), "#10b981");
        assert_eq!(s.cursor_size, base.cursor_size);

        let mut s = base;
        s.apply(SettingUpdate::CursorSize(CursorSize::Large));
        assert_eq!(s.cursor_size.px(), 24.0);
        assert_eq!(s.cursor_color, base.cursor_color);
    }

    #[test]
    fn test_size_classes() {
        assert_eq!(CursorSize::Small.px(), 16.0);
        assert_eq!(CursorSize::Medium.px(), 20.0);
        assert_eq!(CursorSize::Large.px(), 24.0);
        assert_eq!(CursorSize::Large.label(), "Large");
    }

    #[test]
    fn test_spin_duration_clamped() {
        let mut s = CursorSettings::default();
        s.apply(SettingUpdate::SpinDuration(0.5));
        assert_eq!(s.spin_duration, 0.5);
        s.apply(SettingUpdate::SpinDuration(5.0));
        assert_eq!(s.spin_duration, 5.0);
        s.apply(SettingUpdate::SpinDuration(100.0));
        assert_eq!(s.spin_duration, SPIN_DURATION_MAX);
        s.apply(SettingUpdate::SpinDuration(-1.0));
        assert_eq!(s.spin_duration, SPIN_DURATION_MIN);
    }

    #[test]
    fn test_palette_hex_round_trip() {
        for option in CURSOR_COLORS {
            let parsed = CursorColor::from_hex(&option.color.to_hex()).unwrap();
            assert_eq!(parsed, option.color, "{}", option.name);
        }
        assert_eq!(
            CursorSettings::palette_entry("Emerald").unwrap().color.to_hex(),
            "#10b981"
        );
    }

    #[test]
    fn test_hex_parse_errors() {
        assert!(matches!(
            CursorColor::from_hex("6366f1"),
            Err(ColorParseError::Format(_))
        ));
        assert!(matches!(
            CursorColor::from_hex("#63661"),
            Err(ColorParseError::Format(_))
        ));
        assert!(matches!(
            CursorColor::from_hex("#zzzzzz"),
            Err(ColorParseError::Digits(_))
        ));
    }
}
