//! Event handling: translates winit window events into core input state,
//! resolves the hovered target, and applies keyboard shortcuts.

use kurbo::{Point, Vec2};
use reticle_core::input::{InputState, KeyEvent, Modifiers, MouseButton, PointerEvent};
use reticle_core::page::SCROLL_STEP;
use reticle_core::settings::{
    CursorSettings, CursorSize, SettingUpdate, CURSOR_COLORS, SPIN_DURATION_STEP,
};
use reticle_core::targets::{Target, TargetId, TargetRegistry};
use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::keyboard::{Key, NamedKey};

use crate::ui::UiState;

/// Translates window events and resolves hover state for the cursor.
pub struct EventHandler {
    /// Target hovered at the last resolve.
    pub hovered: Option<TargetId>,
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler {
    pub fn new() -> Self {
        Self { hovered: None }
    }

    /// Feed a window event into the core input state.
    ///
    /// Positions are converted to logical points. Wheel events are skipped
    /// while egui owns the pointer so panel scrolling does not also scroll
    /// the page.
    pub fn handle_window_event(
        &mut self,
        event: &WindowEvent,
        input: &mut InputState,
        scale_factor: f64,
        egui_wants_pointer: bool,
    ) {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                input.handle_pointer_event(PointerEvent::Move {
                    position: Point::new(position.x / scale_factor, position.y / scale_factor),
                });
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let Some(button) = map_button(*button) else {
                    return;
                };
                let position = input.pointer_position;
                let event = match state {
                    ElementState::Pressed => PointerEvent::Down { position, button },
                    ElementState::Released => PointerEvent::Up { position, button },
                };
                input.handle_pointer_event(event);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                if egui_wants_pointer {
                    return;
                }
                let delta = match delta {
                    MouseScrollDelta::LineDelta(x, y) => {
                        Vec2::new(*x as f64 * SCROLL_STEP, *y as f64 * SCROLL_STEP)
                    }
                    MouseScrollDelta::PixelDelta(pos) => {
                        Vec2::new(pos.x / scale_factor, pos.y / scale_factor)
                    }
                };
                input.handle_pointer_event(PointerEvent::Scroll {
                    position: input.pointer_position,
                    delta,
                });
            }
            WindowEvent::ModifiersChanged(mods) => {
                let state = mods.state();
                input.set_modifiers(Modifiers {
                    shift: state.shift_key(),
                    ctrl: state.control_key(),
                    alt: state.alt_key(),
                    meta: state.super_key(),
                });
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.repeat {
                    return;
                }
                let Some(key) = key_name(&event.logical_key) else {
                    return;
                };
                let key_event = match event.state {
                    ElementState::Pressed => KeyEvent::Pressed(key),
                    ElementState::Released => KeyEvent::Released(key),
                };
                input.handle_key_event(key_event);
            }
            _ => {}
        }
    }

    /// Resolve the target under the pointer, logging hover transitions.
    pub fn resolve_hover(&mut self, registry: &TargetRegistry, pointer: Point) -> Option<Target> {
        let hit = registry.hit_test(pointer).copied();
        let hit_id = hit.map(|t| t.id);
        if hit_id != self.hovered {
            if let Some(target) = &hit {
                log::trace!("hover: {}", target.kind.name());
            }
            self.hovered = hit_id;
        }
        hit
    }

    /// Apply any keyboard shortcut pressed this frame.
    pub fn apply_shortcuts(
        &mut self,
        input: &InputState,
        settings: &mut CursorSettings,
        ui_state: &mut UiState,
    ) {
        if input.is_key_just_pressed("h") {
            settings.apply(SettingUpdate::HideDefaultCursor(!settings.hide_default_cursor));
        }
        if input.is_key_just_pressed("p") {
            settings.apply(SettingUpdate::ParallaxOn(!settings.parallax_on));
        }
        for (key, size) in [
            ("1", CursorSize::Small),
            ("2", CursorSize::Medium),
            ("3", CursorSize::Large),
        ] {
            if input.is_key_just_pressed(key) {
                settings.apply(SettingUpdate::CursorSize(size));
            }
        }
        if input.is_key_just_pressed("c") {
            let next = CURSOR_COLORS
                .iter()
                .position(|option| option.color == settings.cursor_color)
                .map(|i| (i + 1) % CURSOR_COLORS.len())
                .unwrap_or(0);
            settings.apply(SettingUpdate::CursorColor(CURSOR_COLORS[next].color));
        }
        if input.is_key_just_pressed("[") {
            settings.apply(SettingUpdate::SpinDuration(
                settings.spin_duration - SPIN_DURATION_STEP,
            ));
        }
        if input.is_key_just_pressed("]") {
            settings.apply(SettingUpdate::SpinDuration(
                settings.spin_duration + SPIN_DURATION_STEP,
            ));
        }
        if input.is_key_just_pressed("?") {
            ui_state.shortcuts_modal_open = !ui_state.shortcuts_modal_open;
        }
        if input.is_key_just_pressed("Escape") {
            ui_state.shortcuts_modal_open = false;
        }
    }
}

/// Map a winit mouse button to the core button enum.
fn map_button(button: winit::event::MouseButton) -> Option<MouseButton> {
    match button {
        winit::event::MouseButton::Left => Some(MouseButton::Left),
        winit::event::MouseButton::Right => Some(MouseButton::Right),
        winit::event::MouseButton::Middle => Some(MouseButton::Middle),
        _ => None,
    }
}

/// Name a logical key for the input state's string-keyed tracking.
fn key_name(key: &Key) -> Option<String> {
    match key {
        Key::Character(c) => Some(c.to_lowercase()),
        Key::Named(NamedKey::Escape) => Some("Escape".to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Rect;
    use reticle_core::targets::TargetKind;

    fn press(input: &mut InputState, key: &str) {
        input.handle_key_event(KeyEvent::Pressed(key.to_string()));
    }

    #[test]
    fn test_shortcut_toggles() {
        let mut handler = EventHandler::new();
        let mut input = InputState::new();
        let mut settings = CursorSettings::default();
        let mut ui_state = UiState::default();

        press(&mut input, "h");
        press(&mut input, "p");
        handler.apply_shortcuts(&input, &mut settings, &mut ui_state);
        assert!(!settings.hide_default_cursor);
        assert!(!settings.parallax_on);

        // Held keys do not re-trigger on later frames.
        input.begin_frame();
        handler.apply_shortcuts(&input, &mut settings, &mut ui_state);
        assert!(!settings.hide_default_cursor);
    }

    #[test]
    fn test_shortcut_sizes_and_spin() {
        let mut handler = EventHandler::new();
        let mut input = InputState::new();
        let mut settings = CursorSettings::default();
        let mut ui_state = UiState::default();

        press(&mut input, "3");
        press(&mut input, "]");
        handler.apply_shortcuts(&input, &mut settings, &mut ui_state);
        assert_eq!(settings.cursor_size, CursorSize::Large);
        assert_eq!(settings.spin_duration, 2.5);
    }

    #[test]
    fn test_shortcut_color_cycles_through_palette() {
        let mut handler = EventHandler::new();
        let mut settings = CursorSettings::default();
        let mut ui_state = UiState::default();

        for expected in CURSOR_COLORS.iter().cycle().skip(1).take(CURSOR_COLORS.len()) {
            let mut input = InputState::new();
            press(&mut input, "c");
            handler.apply_shortcuts(&input, &mut settings, &mut ui_state);
            assert_eq!(settings.cursor_color, expected.color);
        }
        // Full cycle returns to the default Indigo.
        assert_eq!(settings.cursor_color, CursorSettings::default().cursor_color);
    }

    #[test]
    fn test_modal_shortcuts() {
        let mut handler = EventHandler::new();
        let mut settings = CursorSettings::default();
        let mut ui_state = UiState::default();

        let mut input = InputState::new();
        press(&mut input, "?");
        handler.apply_shortcuts(&input, &mut settings, &mut ui_state);
        assert!(ui_state.shortcuts_modal_open);

        let mut input = InputState::new();
        press(&mut input, "Escape");
        handler.apply_shortcuts(&input, &mut settings, &mut ui_state);
        assert!(!ui_state.shortcuts_modal_open);
    }

    #[test]
    fn test_resolve_hover_tracks_transitions() {
        let mut handler = EventHandler::new();
        let mut registry = TargetRegistry::new();
        let id = registry.register(Rect::new(0.0, 0.0, 100.0, 100.0), TargetKind::Card);

        let hit = handler.resolve_hover(&registry, Point::new(50.0, 50.0));
        assert_eq!(hit.map(|t| t.id), Some(id));
        assert_eq!(handler.hovered, Some(id));

        let hit = handler.resolve_hover(&registry, Point::new(500.0, 500.0));
        assert!(hit.is_none());
        assert_eq!(handler.hovered, None);
    }
}
