//! Demo page model: static element descriptors and the flow layout that
//! positions them for a given viewport and scroll offset.

use kurbo::{Point, Rect, Size};

use crate::targets::TargetKind;

/// Width reserved on the right edge for the floating settings panel.
pub const PANEL_WIDTH: f64 = 300.0;
/// Gap between the content column and the settings panel column.
pub const PANEL_GAP: f64 = 24.0;
/// Outer page margin, in logical points.
pub const PAGE_MARGIN: f64 = 48.0;
/// Scroll distance per wheel line.
pub const SCROLL_STEP: f64 = 40.0;

const MIN_CONTENT_WIDTH: f64 = 420.0;
const GRID_GAP: f64 = 24.0;

/// A sample interactive element shown in the demo grid.
#[derive(Debug, Clone, Copy)]
pub struct DemoElement {
    pub kind: TargetKind,
    pub label: &'static str,
}

/// The fixed demo grid contents. Read-only descriptive data.
pub const DEMO_ELEMENTS: &[DemoElement] = &[
    DemoElement { kind: TargetKind::PrimaryButton, label: "Primary Button" },
    DemoElement { kind: TargetKind::SecondaryButton, label: "Secondary Button" },
    DemoElement { kind: TargetKind::Card, label: "Interactive Card" },
    DemoElement { kind: TargetKind::Link, label: "Navigation Link" },
    DemoElement { kind: TargetKind::InputField, label: "Input Field" },
];

/// Icon glyphs for the feature cards, drawn programmatically by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureIcon {
    Sliders,
    Swirl,
    Target,
    Bolt,
}

/// A non-interactive feature card.
#[derive(Debug, Clone, Copy)]
pub struct Feature {
    pub icon: FeatureIcon,
    pub title: &'static str,
    pub blurb: &'static str,
}

/// The fixed features section contents.
pub const FEATURES: &[Feature] = &[
    Feature {
        icon: FeatureIcon::Sliders,
        title: "Customizable",
        blurb: "Adjust spin duration, size, color, and effects in real-time",
    },
    Feature {
        icon: FeatureIcon::Swirl,
        title: "Smooth Parallax",
        blurb: "Enable or disable the parallax effect for depth perception",
    },
    Feature {
        icon: FeatureIcon::Target,
        title: "Precise Tracking",
        blurb: "Accurately follows cursor movement with smooth animations",
    },
    Feature {
        icon: FeatureIcon::Bolt,
        title: "Performant",
        blurb: "Animations advance once per frame on the redraw loop",
    },
];

/// Footer hint lines.
pub const FOOTER_LINES: [&str; 2] = [
    "Try hovering over the settings controls too! The cursor responds to all interactive elements.",
    "Tip: Adjust the settings while hovering to see instant changes",
];

/// Mutable page state: vertical scroll and which demo element has focus.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageState {
    /// Vertical scroll offset in logical points, >= 0.
    pub scroll: f64,
    /// Whether the demo input field was clicked and shows a caret.
    pub input_focused: bool,
}

impl PageState {
    /// Scroll by `delta` (positive = down), clamped to the content extent.
    pub fn scroll_by(&mut self, delta: f64, viewport_height: f64, content_height: f64) {
        self.scroll = clamp_scroll(self.scroll + delta, viewport_height, content_height);
    }
}

/// Clamp a scroll offset to `[0, content_height - viewport_height]`.
pub fn clamp_scroll(scroll: f64, viewport_height: f64, content_height: f64) -> f64 {
    scroll.clamp(0.0, (content_height - viewport_height).max(0.0))
}

/// A positioned demo element: the grid cell and the interactive rect inside it.
#[derive(Debug, Clone, Copy)]
pub struct LaidOutElement {
    pub element: &'static DemoElement,
    pub cell: Rect,
    /// The target rect the cursor locks onto.
    pub rect: Rect,
}

/// A positioned feature card.
#[derive(Debug, Clone, Copy)]
pub struct LaidOutFeature {
    pub feature: &'static Feature,
    pub rect: Rect,
}

/// The fully laid-out page for one frame, in screen (scrolled) coordinates.
///
/// Header and footer positions are column-center anchors; section headings
/// are left-aligned at the content column's left edge.
#[derive(Debug, Clone)]
pub struct PageLayout {
    pub viewport: Size,
    pub content_left: f64,
    pub content_width: f64,
    pub title_center: Point,
    pub subtitle_center: Point,
    pub demo_heading: Point,
    pub demo_blurb: Point,
    pub items: Vec<LaidOutElement>,
    pub features_heading: Point,
    pub features: Vec<LaidOutFeature>,
    pub footer_centers: [Point; 2],
    /// Total unscrolled content height, for scroll clamping.
    pub content_height: f64,
}

/// Cell height for a demo element kind.
fn cell_height(kind: TargetKind) -> f64 {
    match kind {
        TargetKind::Card => 170.0,
        _ => 96.0,
    }
}

/// The interactive rect inside a demo cell.
fn element_rect(kind: TargetKind, cell: Rect) -> Rect {
    let centered = |w: f64, h: f64| {
        Rect::from_center_size(cell.center(), Size::new(w.min(cell.width() - 16.0), h))
    };
    match kind {
        TargetKind::PrimaryButton | TargetKind::SecondaryButton => centered(200.0, 48.0),
        TargetKind::Card => cell.inset(-8.0),
        TargetKind::Link => centered(200.0, 32.0),
        TargetKind::InputField => centered(240.0, 44.0),
        TargetKind::Control => cell,
    }
}

impl PageLayout {
    /// Lay out the page for `viewport`, shifted up by `scroll`.
    pub fn compute(viewport: Size, scroll: f64) -> Self {
        let content_width =
            (viewport.width - PAGE_MARGIN * 2.0 - PANEL_WIDTH - PANEL_GAP).max(MIN_CONTENT_WIDTH);
        let x0 = PAGE_MARGIN;
        let cx = x0 + content_width / 2.0;

        // Build at unscrolled y, shift at the end.
        let mut y = 72.0;
        let title_center = Point::new(cx, y);
        y += 42.0;
        let subtitle_center = Point::new(cx, y);
        y += 64.0;

        let demo_heading = Point::new(x0, y);
        y += 32.0;
        let demo_blurb = Point::new(x0, y);
        y += 40.0;

        let col_width = (content_width - GRID_GAP) / 2.0;
        let mut items = Vec::with_capacity(DEMO_ELEMENTS.len());
        let mut row_top = y;
        let mut row_height: f64 = 0.0;
        for (i, element) in DEMO_ELEMENTS.iter().enumerate() {
            let col = i % 2;
            if col == 0 && i > 0 {
                row_top += row_height + GRID_GAP;
                row_height = 0.0;
            }
            let cell_h = cell_height(element.kind);
            row_height = row_height.max(cell_h);
            let cell_x = x0 + col as f64 * (col_width + GRID_GAP);
            let cell = Rect::new(cell_x, row_top, cell_x + col_width, row_top + cell_h);
            items.push(LaidOutElement {
                element,
                cell,
                rect: element_rect(element.kind, cell),
            });
        }
        y = row_top + row_height + 56.0;

        let features_heading = Point::new(x0, y);
        y += 44.0;

        let feature_h = 116.0;
        let mut features = Vec::with_capacity(FEATURES.len());
        for (i, feature) in FEATURES.iter().enumerate() {
            let col = i % 2;
            let row = i / 2;
            let fx = x0 + col as f64 * (col_width + GRID_GAP);
            let fy = y + row as f64 * (feature_h + GRID_GAP);
            features.push(LaidOutFeature {
                feature,
                rect: Rect::new(fx, fy, fx + col_width, fy + feature_h),
            });
        }
        let feature_rows = FEATURES.len().div_ceil(2) as f64;
        y += feature_rows * feature_h + (feature_rows - 1.0) * GRID_GAP + 56.0;

        let footer_centers = [Point::new(cx, y), Point::new(cx, y + 26.0)];
        let content_height = y + 26.0 + 64.0;

        let shift = |p: Point| Point::new(p.x, p.y - scroll);
        let shift_rect = |r: Rect| Rect::new(r.x0, r.y0 - scroll, r.x1, r.y1 - scroll);

        Self {
            viewport,
            content_left: x0,
            content_width,
            title_center: shift(title_center),
            subtitle_center: shift(subtitle_center),
            demo_heading: shift(demo_heading),
            demo_blurb: shift(demo_blurb),
            items: items
                .into_iter()
                .map(|item| LaidOutElement {
                    element: item.element,
                    cell: shift_rect(item.cell),
                    rect: shift_rect(item.rect),
                })
                .collect(),
            features_heading: shift(features_heading),
            features: features
                .into_iter()
                .map(|f| LaidOutFeature { feature: f.feature, rect: shift_rect(f.rect) })
                .collect(),
            footer_centers: [shift(footer_centers[0]), shift(footer_centers[1])],
            content_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> PageLayout {
        PageLayout::compute(Size::new(1280.0, 800.0), 0.0)
    }

    #[test]
    fn test_all_elements_laid_out() {
        let layout = layout();
        assert_eq!(layout.items.len(), DEMO_ELEMENTS.len());
        assert_eq!(layout.features.len(), FEATURES.len());
    }

    #[test]
    fn test_elements_inside_content_column() {
        let layout = layout();
        let right = layout.content_left + layout.content_width + 1e-6;
        for item in &layout.items {
            assert!(item.cell.x0 >= layout.content_left - 1e-6, "{:?}", item.element.label);
            assert!(item.cell.x1 <= right, "{:?}", item.element.label);
            // The interactive rect stays inside its cell.
            assert!(item.rect.x0 >= item.cell.x0 && item.rect.x1 <= item.cell.x1);
            assert!(item.rect.y0 >= item.cell.y0 && item.rect.y1 <= item.cell.y1);
        }
        for feature in &layout.features {
            assert!(feature.rect.x1 <= right);
        }
    }

    #[test]
    fn test_sections_stack_downward() {
        let layout = layout();
        assert!(layout.subtitle_center.y > layout.title_center.y);
        assert!(layout.demo_heading.y > layout.subtitle_center.y);
        assert!(layout.features_heading.y > layout.items.last().unwrap().cell.y1);
        assert!(layout.footer_centers[0].y > layout.features.last().unwrap().rect.y1);
        assert!(layout.content_height > layout.footer_centers[1].y);
    }

    #[test]
    fn test_scroll_shifts_positions() {
        let base = layout();
        let scrolled = PageLayout::compute(Size::new(1280.0, 800.0), 120.0);
        assert_eq!(scrolled.title_center.y, base.title_center.y - 120.0);
        assert_eq!(scrolled.items[0].rect.y0, base.items[0].rect.y0 - 120.0);
        // Content height is scroll-independent.
        assert_eq!(scrolled.content_height, base.content_height);
    }

    #[test]
    fn test_scroll_clamping() {
        assert_eq!(clamp_scroll(-10.0, 800.0, 1200.0), 0.0);
        assert_eq!(clamp_scroll(1000.0, 800.0, 1200.0), 400.0);
        // Content shorter than viewport never scrolls.
        assert_eq!(clamp_scroll(50.0, 800.0, 600.0), 0.0);

        let mut state = PageState::default();
        state.scroll_by(10_000.0, 800.0, 1200.0);
        assert_eq!(state.scroll, 400.0);
        state.scroll_by(-10_000.0, 800.0, 1200.0);
        assert_eq!(state.scroll, 0.0);
    }

    #[test]
    fn test_narrow_viewport_keeps_min_width() {
        let narrow = PageLayout::compute(Size::new(700.0, 800.0), 0.0);
        assert!(narrow.content_width >= MIN_CONTENT_WIDTH);
    }
}
