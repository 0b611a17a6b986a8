//! Reticle Core Library
//!
//! Platform-agnostic state and logic for the Reticle cursor demo:
//! the settings record, the demo page model, target hit testing, and
//! the cursor animation.

pub mod cursor;
pub mod input;
pub mod page;
pub mod settings;
pub mod targets;

pub use cursor::{Bracket, CursorAnimator, CursorFrame};
pub use input::InputState;
pub use page::{PageLayout, PageState};
pub use settings::{CursorColor, CursorSettings, CursorSize, SettingUpdate};
pub use targets::{Target, TargetId, TargetKind, TargetRegistry};
