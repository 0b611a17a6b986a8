//! UI components using egui.

use egui::{Align2, Color32, Context, Rect, RichText, Vec2};
use reticle_core::page::PANEL_WIDTH;
use reticle_core::settings::{
    CursorSettings, CursorSize, SettingUpdate, CURSOR_COLORS, SPIN_DURATION_MAX,
    SPIN_DURATION_MIN, SPIN_DURATION_STEP,
};

// Re-export from widgets crate for consistent styling
use reticle_widgets::{
    panel_frame as widgets_panel_frame, section_label as widgets_section_label, theme,
    ColorSwatch, SegmentButton, Switch,
};

use crate::shortcuts::ShortcutRegistry;

/// UI state and per-frame control geometry.
pub struct UiState {
    /// Whether the keyboard shortcuts modal is open.
    pub shortcuts_modal_open: bool,
    /// Rects of the panel's interactive controls (logical points), collected
    /// each frame so the app can register them as cursor targets.
    pub control_rects: Vec<Rect>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            shortcuts_modal_open: false,
            control_rects: Vec::new(),
        }
    }
}

/// Actions that can be triggered by the UI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UiAction {
    /// Apply a single-field settings change.
    UpdateSetting(SettingUpdate),
    /// Toggle the keyboard shortcuts modal.
    ShowShortcuts,
}

/// Render all UI and return any triggered action.
pub fn render_ui(ctx: &Context, ui_state: &mut UiState, settings: &CursorSettings) -> Option<UiAction> {
    ui_state.control_rects.clear();

    let panel_action = render_settings_panel(ctx, ui_state, settings);
    let modal_action = render_shortcuts_modal(ctx, ui_state);

    panel_action.or(modal_action)
}

/// Render the floating settings panel and return any triggered action.
fn render_settings_panel(
    ctx: &Context,
    ui_state: &mut UiState,
    settings: &CursorSettings,
) -> Option<UiAction> {
    let mut action = None;

    egui::Area::new(egui::Id::new("settings_panel"))
        .anchor(Align2::RIGHT_TOP, Vec2::new(-24.0, 72.0))
        .show(ctx, |ui| {
            widgets_panel_frame().show(ui, |ui| {
                ui.set_width(PANEL_WIDTH as f32 - 48.0);
                ui.spacing_mut().item_spacing = Vec2::new(6.0, 6.0);

                ui.label(RichText::new("Cursor Settings").size(15.0).strong().color(theme::TEXT));
                ui.add_space(4.0);
                reticle_widgets::separator(ui);

                // Spin duration
                widgets_section_label(ui, &format!("Spin Duration: {:.1}s", settings.spin_duration));
                let mut spin = settings.spin_duration;
                let slider = ui.add(
                    egui::Slider::new(&mut spin, SPIN_DURATION_MIN..=SPIN_DURATION_MAX)
                        .step_by(SPIN_DURATION_STEP)
                        .show_value(false),
                );
                ui_state.control_rects.push(slider.rect);
                if slider.changed() {
                    action = Some(UiAction::UpdateSetting(SettingUpdate::SpinDuration(spin)));
                }
                ui.add_space(6.0);

                // Cursor size
                widgets_section_label(ui, "Cursor Size");
                ui.horizontal(|ui| {
                    for size in CursorSize::ALL {
                        let (response, clicked) =
                            SegmentButton::new(size.label(), settings.cursor_size == size)
                                .min_width(66.0)
                                .show(ui);
                        ui_state.control_rects.push(response.rect);
                        if clicked {
                            action = Some(UiAction::UpdateSetting(SettingUpdate::CursorSize(size)));
                        }
                    }
                });
                ui.add_space(6.0);

                // Cursor color
                widgets_section_label(ui, "Cursor Color");
                ui.horizontal(|ui| {
                    for option in CURSOR_COLORS {
                        let color = Color32::from_rgb(
                            option.color.r,
                            option.color.g,
                            option.color.b,
                        );
                        let selected = settings.cursor_color == option.color;
                        let (response, clicked) =
                            ColorSwatch::new(color, option.name, selected).show(ui);
                        ui_state.control_rects.push(response.rect);
                        if clicked {
                            action = Some(UiAction::UpdateSetting(SettingUpdate::CursorColor(
                                option.color,
                            )));
                        }
                    }
                });
                ui.add_space(8.0);
                reticle_widgets::separator(ui);

                // Toggles
                let (response, toggled) =
                    Switch::new("Hide Default Cursor", settings.hide_default_cursor).show(ui);
                ui_state.control_rects.push(response.rect);
                if let Some(hide) = toggled {
                    action = Some(UiAction::UpdateSetting(SettingUpdate::HideDefaultCursor(hide)));
                }

                let (response, toggled) =
                    Switch::new("Parallax Effect", settings.parallax_on).show(ui);
                ui_state.control_rects.push(response.rect);
                if let Some(on) = toggled {
                    action = Some(UiAction::UpdateSetting(SettingUpdate::ParallaxOn(on)));
                }

                ui.add_space(8.0);
                reticle_widgets::separator(ui);

                let shortcuts = ui.add(
                    egui::Button::new(
                        RichText::new("Keyboard shortcuts (?)").size(11.0).color(theme::TEXT_MUTED),
                    )
                    .frame(false),
                );
                ui_state.control_rects.push(shortcuts.rect);
                if shortcuts.clicked() {
                    action = Some(UiAction::ShowShortcuts);
                }
            });
        });

    action
}

/// Render the keyboard shortcuts modal, if open.
fn render_shortcuts_modal(ctx: &Context, ui_state: &mut UiState) -> Option<UiAction> {
    if !ui_state.shortcuts_modal_open {
        return None;
    }
    let mut action = None;

    egui::Area::new(egui::Id::new("shortcuts_modal"))
        .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            widgets_panel_frame().show(ui, |ui| {
                ui.set_width(260.0);
                ui.spacing_mut().item_spacing = Vec2::new(6.0, 4.0);

                ui.label(RichText::new("Keyboard Shortcuts").size(14.0).strong().color(theme::TEXT));
                ui.add_space(6.0);

                for shortcut in ShortcutRegistry::all() {
                    ui.horizontal(|ui| {
                        ui.label(
                            RichText::new(shortcut.key)
                                .monospace()
                                .size(12.0)
                                .color(theme::ACCENT),
                        );
                        ui.label(
                            RichText::new(shortcut.description)
                                .size(12.0)
                                .color(theme::TEXT_MUTED),
                        );
                    });
                }

                ui.add_space(8.0);
                if ui
                    .add(egui::Button::new(RichText::new("Close").size(12.0)))
                    .clicked()
                {
                    action = Some(UiAction::ShowShortcuts);
                }
            });
        });

    action
}
