//! Color swatch component for the cursor palette.

use egui::{vec2, Color32, CursorIcon, Response, Sense, Stroke, Ui};

use crate::{sizing, theme};

/// A round color swatch with a selection ring.
pub struct ColorSwatch<'a> {
    color: Color32,
    tooltip: &'a str,
    selected: bool,
    diameter: f32,
}

impl<'a> ColorSwatch<'a> {
    /// Create a new swatch.
    pub fn new(color: Color32, tooltip: &'a str, selected: bool) -> Self {
        Self {
            color,
            tooltip,
            selected,
            diameter: sizing::SWATCH,
        }
    }

    /// Set the swatch diameter.
    pub fn diameter(mut self, diameter: f32) -> Self {
        self.diameter = diameter;
        self
    }

    /// Show the swatch, returning the response and whether it was clicked.
    pub fn show(self, ui: &mut Ui) -> (Response, bool) {
        let (rect, response) =
            ui.allocate_exact_size(vec2(self.diameter, self.diameter), Sense::click());

        if ui.is_rect_visible(rect) {
            let center = rect.center();
            let radius = self.diameter / 2.0 - 2.0;
            ui.painter().circle_filled(center, radius, self.color);

            if self.selected {
                ui.painter()
                    .circle_stroke(center, radius + 2.0, Stroke::new(2.0, Color32::WHITE));
            } else if response.hovered() {
                ui.painter()
                    .circle_stroke(center, radius + 2.0, Stroke::new(1.5, theme::TEXT_MUTED));
            }
        }

        let clicked = response.clicked();
        let response = response
            .on_hover_text(self.tooltip)
            .on_hover_cursor(CursorIcon::PointingHand);
        (response, clicked)
    }
}
