//! Cursor overlay painting.
//!
//! The animated reticle is painted on egui's top-most layer so it rides
//! above both the vello page and the settings panel.

use egui::{Color32, Context, Id, LayerId, Order, Pos2, Stroke};
use reticle_core::cursor::CursorFrame;
use reticle_core::settings::CursorSettings;

fn to_pos2(p: kurbo::Point) -> Pos2 {
    Pos2::new(p.x as f32, p.y as f32)
}

/// Paint one frame of the cursor overlay.
pub fn paint_cursor(ctx: &Context, frame: &CursorFrame, settings: &CursorSettings) {
    if !frame.visible {
        return;
    }

    let color = Color32::from_rgb(
        settings.cursor_color.r,
        settings.cursor_color.g,
        settings.cursor_color.b,
    );
    let stroke = Stroke::new(frame.stroke_width as f32, color);
    let painter = ctx.layer_painter(LayerId::new(Order::Tooltip, Id::new("cursor_overlay")));

    for bracket in &frame.brackets {
        let [arm_a, corner, arm_b] = bracket.points.map(to_pos2);
        painter.line_segment([arm_a, corner], stroke);
        painter.line_segment([corner, arm_b], stroke);
    }
    painter.circle_filled(
        to_pos2(frame.dot.center),
        frame.dot.radius as f32,
        color,
    );
}
