//! Vello-based renderer implementation.

use crate::renderer::{RenderContext, Renderer, Theme};
use kurbo::{Affine, Arc, BezPath, Circle, Line, Point, Rect, RoundedRect, Size, Stroke, Vec2};
use parley::layout::PositionedLayoutItem;
use parley::{FontContext, LayoutContext, StyleProperty};
use peniko::{Brush, Color, Fill};
use reticle_core::page::{FeatureIcon, LaidOutElement, LaidOutFeature, FOOTER_LINES};
use reticle_core::targets::TargetKind;
use vello::Scene;

/// Where a text block is placed relative to its measured bounds.
#[derive(Debug, Clone, Copy)]
enum TextAnchor {
    TopLeft(Point),
    LeftCenter(Point),
    Center(Point),
}

/// Vello-based renderer for the demo page.
///
/// Text is laid out with parley against the system font collection
/// (generic `sans-serif`), so the repo ships no font assets.
pub struct VelloRenderer {
    /// The Vello scene being built.
    scene: Scene,
    /// Font context for text rendering (cached to avoid re-resolving fonts).
    font_cx: FontContext,
    /// Layout context for text rendering.
    layout_cx: LayoutContext<Brush>,
}

impl Default for VelloRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl VelloRenderer {
    /// Create a new Vello renderer.
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            font_cx: FontContext::new(),
            layout_cx: LayoutContext::new(),
        }
    }

    /// Get the built scene for rendering.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Take ownership of the scene (resets internal scene).
    pub fn take_scene(&mut self) -> Scene {
        std::mem::take(&mut self.scene)
    }

    /// Lay out and draw a text block, returning its measured size.
    ///
    /// `max_width` enables line wrapping; without it the text stays on one
    /// line and the anchor uses the measured width.
    fn draw_text(
        &mut self,
        text: &str,
        anchor: TextAnchor,
        font_size: f32,
        weight: parley::FontWeight,
        color: Color,
        max_width: Option<f64>,
        transform: Affine,
    ) -> Size {
        if text.is_empty() {
            return Size::ZERO;
        }

        let brush = Brush::Solid(color);
        let mut builder = self.layout_cx.ranged_builder(&mut self.font_cx, text, 1.0, false);
        builder.push_default(StyleProperty::FontSize(font_size));
        builder.push_default(StyleProperty::Brush(brush.clone()));
        builder.push_default(StyleProperty::FontWeight(weight));
        builder.push_default(StyleProperty::FontStack(parley::FontStack::Single(
            parley::FontFamily::Generic(parley::GenericFamily::SansSerif),
        )));
        let mut layout = builder.build(text);

        layout.break_all_lines(max_width.map(|w| w as f32));
        layout.align(
            max_width.map(|w| w as f32),
            parley::Alignment::Start,
            parley::AlignmentOptions::default(),
        );

        let measured = Size::new(layout.width() as f64, layout.height() as f64);
        let origin = match anchor {
            TextAnchor::TopLeft(p) => p,
            TextAnchor::LeftCenter(p) => Point::new(p.x, p.y - measured.height / 2.0),
            TextAnchor::Center(p) => {
                Point::new(p.x - measured.width / 2.0, p.y - measured.height / 2.0)
            }
        };
        let text_transform = transform * Affine::translate((origin.x, origin.y));

        // Adapted from Parley's vello example.
        for line in layout.lines() {
            for item in line.items() {
                let PositionedLayoutItem::GlyphRun(glyph_run) = item else {
                    continue;
                };
                let mut x = glyph_run.offset();
                let y = glyph_run.baseline();
                let run = glyph_run.run();
                let font = run.font();
                let run_font_size = run.font_size();
                let synthesis = run.synthesis();
                let glyph_xform = synthesis
                    .skew()
                    .map(|angle| Affine::skew(angle.to_radians().tan() as f64, 0.0));

                let glyphs: Vec<vello::Glyph> = glyph_run
                    .glyphs()
                    .map(|glyph| {
                        let gx = x + glyph.x;
                        let gy = y - glyph.y;
                        x += glyph.advance;
                        vello::Glyph { id: glyph.id, x: gx, y: gy }
                    })
                    .collect();

                if !glyphs.is_empty() {
                    self.scene
                        .draw_glyphs(font)
                        .brush(&brush)
                        .hint(true)
                        .transform(text_transform)
                        .glyph_transform(glyph_xform)
                        .font_size(run_font_size)
                        .normalized_coords(run.normalized_coords())
                        .draw(Fill::NonZero, glyphs.into_iter());
                }
            }
        }

        measured
    }

    /// Draw one demo grid element.
    fn draw_demo_item(
        &mut self,
        item: &LaidOutElement,
        hovered: bool,
        ctx: &RenderContext,
        transform: Affine,
    ) {
        let theme = ctx.theme;
        let rect = item.rect;
        let label = item.element.label;

        match item.element.kind {
            TargetKind::PrimaryButton => {
                let fill = if hovered { theme.accent_hover } else { theme.accent };
                let shape = RoundedRect::from_rect(rect, 10.0);
                self.scene.fill(Fill::NonZero, transform, fill, None, &shape);
                self.draw_text(
                    label,
                    TextAnchor::Center(rect.center()),
                    14.0,
                    parley::FontWeight::SEMI_BOLD,
                    Color::WHITE,
                    None,
                    transform,
                );
            }
            TargetKind::SecondaryButton => {
                let fill = if hovered { theme.surface_hover } else { theme.surface };
                let shape = RoundedRect::from_rect(rect, 10.0);
                self.scene.fill(Fill::NonZero, transform, fill, None, &shape);
                self.scene
                    .stroke(&Stroke::new(1.5), transform, theme.accent, None, &shape);
                self.draw_text(
                    label,
                    TextAnchor::Center(rect.center()),
                    14.0,
                    parley::FontWeight::SEMI_BOLD,
                    theme.text,
                    None,
                    transform,
                );
            }
            TargetKind::Card => {
                let fill = if hovered { theme.surface_hover } else { theme.surface };
                let border = if hovered { theme.accent } else { theme.border };
                let shape = RoundedRect::from_rect(rect, 12.0);
                self.scene.fill(Fill::NonZero, transform, fill, None, &shape);
                self.scene.stroke(&Stroke::new(1.0), transform, border, None, &shape);

                let pad = 16.0;
                self.draw_text(
                    label,
                    TextAnchor::LeftCenter(Point::new(rect.x0 + pad, rect.y0 + 28.0)),
                    15.0,
                    parley::FontWeight::SEMI_BOLD,
                    theme.text,
                    None,
                    transform,
                );
                self.draw_text(
                    "Hover over this entire card area",
                    TextAnchor::TopLeft(Point::new(rect.x0 + pad, rect.y0 + 48.0)),
                    12.0,
                    parley::FontWeight::NORMAL,
                    theme.text_muted,
                    Some(rect.width() - pad * 2.0),
                    transform,
                );
                self.draw_text(
                    "The cursor will track movement across this element",
                    TextAnchor::TopLeft(Point::new(rect.x0 + pad, rect.y0 + 74.0)),
                    12.0,
                    parley::FontWeight::NORMAL,
                    theme.text_muted,
                    Some(rect.width() - pad * 2.0),
                    transform,
                );
            }
            TargetKind::Link => {
                let color = if hovered { theme.accent_hover } else { theme.accent };
                let size = self.draw_text(
                    "Navigation Link \u{2192}",
                    TextAnchor::Center(rect.center()),
                    14.0,
                    parley::FontWeight::NORMAL,
                    color,
                    None,
                    transform,
                );
                let underline_y = rect.center().y + size.height / 2.0 + 2.0;
                let underline = Line::new(
                    Point::new(rect.center().x - size.width / 2.0, underline_y),
                    Point::new(rect.center().x + size.width / 2.0, underline_y),
                );
                self.scene
                    .stroke(&Stroke::new(1.0), transform, color, None, &underline);
            }
            TargetKind::InputField => {
                let border = if ctx.input_focused || hovered { theme.accent } else { theme.border };
                let shape = RoundedRect::from_rect(rect, 8.0);
                self.scene
                    .fill(Fill::NonZero, transform, theme.background, None, &shape);
                self.scene.stroke(&Stroke::new(1.5), transform, border, None, &shape);

                let text_x = rect.x0 + 14.0;
                self.draw_text(
                    label,
                    TextAnchor::LeftCenter(Point::new(text_x, rect.center().y)),
                    13.0,
                    parley::FontWeight::NORMAL,
                    theme.text_muted,
                    None,
                    transform,
                );
                // Blinking caret while focused; the field never holds text,
                // so it sits before the placeholder.
                if ctx.input_focused && ctx.time.rem_euclid(1.0) < 0.6 {
                    let caret = Line::new(
                        Point::new(text_x - 4.0, rect.center().y - 9.0),
                        Point::new(text_x - 4.0, rect.center().y + 9.0),
                    );
                    self.scene
                        .stroke(&Stroke::new(1.5), transform, theme.text, None, &caret);
                }
            }
            TargetKind::Control => {}
        }
    }

    /// Draw one feature card.
    fn draw_feature(&mut self, feature: &LaidOutFeature, theme: &Theme, transform: Affine) {
        let rect = feature.rect;
        let shape = RoundedRect::from_rect(rect, 12.0);
        self.scene.fill(Fill::NonZero, transform, theme.surface, None, &shape);
        self.scene
            .stroke(&Stroke::new(1.0), transform, theme.border, None, &shape);

        let pad = 20.0;
        let icon_center = Point::new(rect.x0 + pad + 14.0, rect.y0 + pad + 12.0);
        self.draw_icon(feature.feature.icon, icon_center, 26.0, theme.accent, transform);

        self.draw_text(
            feature.feature.title,
            TextAnchor::LeftCenter(Point::new(icon_center.x + 26.0, icon_center.y)),
            14.0,
            parley::FontWeight::SEMI_BOLD,
            theme.text,
            None,
            transform,
        );
        self.draw_text(
            feature.feature.blurb,
            TextAnchor::TopLeft(Point::new(rect.x0 + pad, rect.y0 + pad + 34.0)),
            12.0,
            parley::FontWeight::NORMAL,
            theme.text_muted,
            Some(rect.width() - pad * 2.0),
            transform,
        );
    }

    /// Draw a programmatic vector icon centered at `center` in a `size` box.
    fn draw_icon(&mut self, icon: FeatureIcon, center: Point, size: f64, color: Color, transform: Affine) {
        let half = size / 2.0;
        let stroke = Stroke::new(2.0);
        match icon {
            FeatureIcon::Sliders => {
                // Three rails with offset knobs.
                let knob_ts = [0.25, 0.75, 0.45];
                for (i, t) in knob_ts.iter().enumerate() {
                    let y = center.y - half * 0.6 + i as f64 * half * 0.6;
                    let rail = Line::new(
                        Point::new(center.x - half, y),
                        Point::new(center.x + half, y),
                    );
                    self.scene.stroke(&stroke, transform, color, None, &rail);
                    let knob = Circle::new(Point::new(center.x - half + size * t, y), 3.0);
                    self.scene.fill(Fill::NonZero, transform, color, None, &knob);
                }
            }
            FeatureIcon::Swirl => {
                // Two offset arcs suggest rotation.
                let outer = Arc::new(center, Vec2::new(half, half), 0.3, 3.6, 0.0);
                let inner = Arc::new(center, Vec2::new(half * 0.55, half * 0.55), 3.4, 3.6, 0.0);
                self.scene.stroke(&stroke, transform, color, None, &outer);
                self.scene.stroke(&stroke, transform, color, None, &inner);
            }
            FeatureIcon::Target => {
                let outer = Circle::new(center, half);
                let inner = Circle::new(center, half * 0.55);
                let dot = Circle::new(center, 2.5);
                self.scene.stroke(&stroke, transform, color, None, &outer);
                self.scene.stroke(&stroke, transform, color, None, &inner);
                self.scene.fill(Fill::NonZero, transform, color, None, &dot);
            }
            FeatureIcon::Bolt => {
                let mut path = BezPath::new();
                let p = |x: f64, y: f64| Point::new(center.x + x * size, center.y + y * size);
                path.move_to(p(0.1, -0.5));
                path.line_to(p(-0.3, 0.05));
                path.line_to(p(-0.02, 0.05));
                path.line_to(p(-0.1, 0.5));
                path.line_to(p(0.3, -0.05));
                path.line_to(p(0.02, -0.05));
                path.close_path();
                self.scene.fill(Fill::NonZero, transform, color, None, &path);
            }
        }
    }
}

impl Renderer for VelloRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) {
        self.scene.reset();
        let theme = ctx.theme;

        // Background in physical pixels; everything else in logical points
        // under the DPI transform.
        self.scene.fill(
            Fill::NonZero,
            Affine::IDENTITY,
            theme.background,
            None,
            &Rect::new(0.0, 0.0, ctx.viewport_size.width, ctx.viewport_size.height),
        );
        let t = Affine::scale(ctx.scale_factor);
        let layout = ctx.layout;

        // Header
        self.draw_text(
            "Custom Target Cursor Demo",
            TextAnchor::Center(layout.title_center),
            30.0,
            parley::FontWeight::BOLD,
            theme.text,
            None,
            t,
        );
        self.draw_text(
            "Hover over any interactive element to see the custom cursor in action",
            TextAnchor::Center(layout.subtitle_center),
            15.0,
            parley::FontWeight::NORMAL,
            theme.text_muted,
            None,
            t,
        );

        // Demo section
        self.draw_text(
            "Interactive Elements",
            TextAnchor::LeftCenter(layout.demo_heading),
            20.0,
            parley::FontWeight::BOLD,
            theme.text,
            None,
            t,
        );
        self.draw_text(
            "Hover over these elements to see different cursor behaviors",
            TextAnchor::LeftCenter(layout.demo_blurb),
            13.0,
            parley::FontWeight::NORMAL,
            theme.text_muted,
            None,
            t,
        );
        for (i, item) in layout.items.iter().enumerate() {
            self.draw_demo_item(item, ctx.hovered_item == Some(i), ctx, t);
        }

        // Features section
        self.draw_text(
            "Features",
            TextAnchor::LeftCenter(layout.features_heading),
            20.0,
            parley::FontWeight::BOLD,
            theme.text,
            None,
            t,
        );
        for feature in &layout.features {
            self.draw_feature(feature, &theme, t);
        }

        // Footer
        for (line, center) in FOOTER_LINES.iter().zip(layout.footer_centers) {
            self.draw_text(
                line,
                TextAnchor::Center(center),
                13.0,
                parley::FontWeight::NORMAL,
                theme.text_muted,
                None,
                t,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reticle_core::page::PageLayout;
    use reticle_core::settings::CursorSettings;

    #[test]
    fn test_renderer_creation() {
        let renderer = VelloRenderer::new();
        assert!(renderer.scene().encoding().is_empty());
    }

    #[test]
    fn test_build_scene_populates_encoding() {
        let mut renderer = VelloRenderer::new();
        let layout = PageLayout::compute(Size::new(1280.0, 800.0), 0.0);
        let settings = CursorSettings::default();
        let ctx = RenderContext::new(&layout, &settings, Size::new(1280.0, 800.0));

        renderer.build_scene(&ctx);
        // At minimum the background rect is encoded.
        assert!(!renderer.scene().encoding().is_empty());
    }

    #[test]
    fn test_take_scene_resets() {
        let mut renderer = VelloRenderer::new();
        let layout = PageLayout::compute(Size::new(800.0, 600.0), 0.0);
        let settings = CursorSettings::default();
        let ctx = RenderContext::new(&layout, &settings, Size::new(800.0, 600.0))
            .with_hovered_item(Some(0))
            .with_input_focus(true)
            .with_time(0.3);

        renderer.build_scene(&ctx);
        let _scene = renderer.take_scene();
        assert!(renderer.scene().encoding().is_empty());
    }

    #[test]
    fn test_render_context_passes_settings_through() {
        // The snapshot handed to the renderer is the same record the panel
        // mutated, not a transformed copy.
        let layout = PageLayout::compute(Size::new(800.0, 600.0), 0.0);
        let mut settings = CursorSettings::default();
        settings.apply(reticle_core::settings::SettingUpdate::SpinDuration(3.0));

        let ctx = RenderContext::new(&layout, &settings, Size::new(800.0, 600.0));
        assert_eq!(*ctx.settings, settings);
        assert_eq!(ctx.settings.spin_duration, 3.0);
    }
}
