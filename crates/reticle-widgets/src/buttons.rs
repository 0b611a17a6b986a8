//! Button components: segmented option buttons and toggle switches.

use egui::{
    vec2, Align2, Color32, CornerRadius, CursorIcon, Rect, Response, Sense, Stroke, StrokeKind, Ui,
};

use crate::{sizing, theme};

/// A segmented option button with a text label.
/// Solid accent background when selected.
pub struct SegmentButton<'a> {
    label: &'a str,
    selected: bool,
    min_width: Option<f32>,
    height: f32,
    font_size: f32,
}

impl<'a> SegmentButton<'a> {
    /// Create a new segment button.
    pub fn new(label: &'a str, selected: bool) -> Self {
        Self {
            label,
            selected,
            min_width: None,
            height: sizing::SEGMENT_HEIGHT,
            font_size: 12.0,
        }
    }

    /// Set minimum width.
    pub fn min_width(mut self, width: f32) -> Self {
        self.min_width = Some(width);
        self
    }

    /// Show the button, returning the response and whether it was clicked.
    pub fn show(self, ui: &mut Ui) -> (Response, bool) {
        // Size the button to its text plus padding.
        let font_id = egui::FontId::proportional(self.font_size);
        let galley = ui.painter().layout_no_wrap(
            self.label.to_string(),
            font_id.clone(),
            Color32::PLACEHOLDER, // Color doesn't matter for sizing
        );
        let text_width = galley.size().x;
        let width = self
            .min_width
            .unwrap_or(text_width + 18.0)
            .max(text_width + 18.0);

        let (rect, response) = ui.allocate_exact_size(vec2(width, self.height), Sense::click());

        if ui.is_rect_visible(rect) {
            let bg_color = if self.selected {
                theme::ACCENT
            } else if response.hovered() {
                theme::HOVER_BG
            } else {
                theme::CONTROL_BG
            };
            let text_color = if self.selected {
                Color32::WHITE
            } else {
                theme::TEXT_MUTED
            };

            ui.painter()
                .rect_filled(rect, CornerRadius::same(sizing::CORNER_RADIUS), bg_color);
            ui.painter().text(
                rect.center(),
                Align2::CENTER_CENTER,
                self.label,
                font_id,
                text_color,
            );
        }

        let clicked = response.clicked();
        let response = response.on_hover_cursor(CursorIcon::PointingHand);
        (response, clicked)
    }
}

/// A pill-style on/off switch with an animated knob.
pub struct Switch<'a> {
    label: &'a str,
    on: bool,
}

impl<'a> Switch<'a> {
    /// Create a new switch.
    pub fn new(label: &'a str, on: bool) -> Self {
        Self { label, on }
    }

    /// Show the switch, returning the response and the new state if toggled.
    pub fn show(self, ui: &mut Ui) -> (Response, Option<bool>) {
        let track_size = vec2(36.0, 20.0);
        let gap = 8.0;

        let font_id = egui::FontId::proportional(12.0);
        let galley =
            ui.painter()
                .layout_no_wrap(self.label.to_string(), font_id.clone(), Color32::PLACEHOLDER);
        let total = vec2(track_size.x + gap + galley.size().x, track_size.y.max(18.0));

        let (rect, response) = ui.allocate_exact_size(total, Sense::click());

        if ui.is_rect_visible(rect) {
            let track = Rect::from_min_size(rect.min, track_size);
            // Animate the knob between the track ends.
            let t = ui
                .ctx()
                .animate_bool(response.id.with(self.label), self.on);

            let track_color = Color32::from_rgb(
                (theme::CONTROL_BG.r() as f32 + (theme::ACCENT.r() as f32 - theme::CONTROL_BG.r() as f32) * t) as u8,
                (theme::CONTROL_BG.g() as f32 + (theme::ACCENT.g() as f32 - theme::CONTROL_BG.g() as f32) * t) as u8,
                (theme::CONTROL_BG.b() as f32 + (theme::ACCENT.b() as f32 - theme::CONTROL_BG.b() as f32) * t) as u8,
            );
            let radius = track_size.y / 2.0;
            ui.painter()
                .rect_filled(track, CornerRadius::same(radius as u8), track_color);
            if response.hovered() {
                ui.painter().rect_stroke(
                    track,
                    CornerRadius::same(radius as u8),
                    Stroke::new(1.0, theme::BORDER),
                    StrokeKind::Outside,
                );
            }

            let knob_r = radius - 3.0;
            let knob_x = track.left() + radius + t * (track_size.x - 2.0 * radius);
            ui.painter()
                .circle_filled(egui::pos2(knob_x, track.center().y), knob_r, Color32::WHITE);

            ui.painter().text(
                egui::pos2(track.right() + gap, rect.center().y),
                Align2::LEFT_CENTER,
                self.label,
                font_id,
                theme::TEXT,
            );
        }

        let toggled = response.clicked().then_some(!self.on);
        let response = response.on_hover_cursor(CursorIcon::PointingHand);
        (response, toggled)
    }
}
