//! Cursor animation: a targeting reticle of four corner brackets around a
//! center dot. The formation follows the pointer, spins while free, and
//! locks onto the corners of a hovered target.
//!
//! The animator is advanced once per frame with the elapsed time and the
//! current [`CursorSettings`] record, and emits a [`CursorFrame`] of plain
//! geometry for whichever painter draws the overlay.

use std::f64::consts::{FRAC_PI_2, TAU};

use kurbo::{Circle, Point, Rect, Vec2};

use crate::settings::CursorSettings;
use crate::targets::{Target, TargetId};

/// Exponential rate at which the dot chases the pointer (per second).
const FOLLOW_RATE: f64 = 30.0;
/// Exponential rate at which the bracket corners chase their goals.
const CORNER_RATE: f64 = 16.0;
/// Seconds for lock-on progress to reach a hovered target.
const LOCK_DURATION: f64 = 0.18;
/// Seconds for lock-on progress to drain after leaving a target.
const UNLOCK_DURATION: f64 = 0.25;
/// Padding added around a locked target rect.
const TARGET_PADDING: f64 = 6.0;
/// Maximum parallax shift of the locked frame, in logical points.
const PARALLAX_MAX: f64 = 10.0;
/// Formation scale while the button is held.
const PRESS_SCALE: f64 = 0.88;
/// Seconds for the press pulse to complete.
const PRESS_DURATION: f64 = 0.12;
/// Bracket arm length as a fraction of the cursor size.
const ARM_FRACTION: f64 = 0.4;
/// Dot radius as a fraction of the cursor size.
const DOT_FRACTION: f64 = 0.15;

/// Corner order: top-left, top-right, bottom-right, bottom-left.
const CORNER_SIGNS: [(f64, f64); 4] = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];

/// Approximate CSS ease-in-out.
fn ease_in_out(t: f64) -> f64 {
    bezier_easing::bezier_easing(0.42, 0.0, 0.58, 1.0).unwrap()(t as f32) as f64
}

/// Approximate CSS ease-out, for the press pulse.
fn ease_out(t: f64) -> f64 {
    bezier_easing::bezier_easing(0.0, 0.0, 0.58, 1.0).unwrap()(t as f32) as f64
}

fn rotate(v: Vec2, angle: f64) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// One corner bracket as a 3-point polyline: arm end, corner, arm end.
#[derive(Debug, Clone, Copy)]
pub struct Bracket {
    pub points: [Point; 3],
}

/// Geometry emitted for one frame of the cursor overlay, in logical points.
#[derive(Debug, Clone)]
pub struct CursorFrame {
    pub dot: Circle,
    pub brackets: [Bracket; 4],
    pub stroke_width: f64,
    /// False until the animator has seen a pointer position, or while the
    /// pointer is outside the window.
    pub visible: bool,
}

/// Per-frame cursor animation state.
#[derive(Debug)]
pub struct CursorAnimator {
    pos: Point,
    corners: [Point; 4],
    spin_angle: f64,
    display_angle: f64,
    /// Lock-on progress: 0 free, 1 fully locked.
    lock: f64,
    /// Press pulse progress: 0 released, 1 fully pressed.
    press: f64,
    scale: f64,
    locked: Option<TargetId>,
    pointer_inside: bool,
    initialized: bool,
}

impl Default for CursorAnimator {
    fn default() -> Self {
        Self::new()
    }
}

impl CursorAnimator {
    /// Create an animator. The formation snaps to the pointer on the first
    /// update instead of flying in from the origin.
    pub fn new() -> Self {
        Self {
            pos: Point::ZERO,
            corners: [Point::ZERO; 4],
            spin_angle: 0.0,
            display_angle: 0.0,
            lock: 0.0,
            press: 0.0,
            scale: 1.0,
            locked: None,
            pointer_inside: false,
            initialized: false,
        }
    }

    /// The eased dot position.
    pub fn position(&self) -> Point {
        self.pos
    }

    /// Target the brackets were locked onto at the last update, if any.
    pub fn locked_target(&self) -> Option<TargetId> {
        self.locked
    }

    /// Record whether the pointer is inside the window; the overlay hides
    /// itself while it is not.
    pub fn set_pointer_inside(&mut self, inside: bool) {
        self.pointer_inside = inside;
    }

    /// Advance the animation by `dt` seconds.
    pub fn update(
        &mut self,
        dt: f64,
        pointer: Point,
        pressed: bool,
        hover: Option<&Target>,
        settings: &CursorSettings,
    ) {
        // Cap pathological frame gaps so a stalled frame cannot teleport
        // the integration.
        let dt = dt.clamp(0.0, 0.1);

        if !self.initialized {
            self.pos = pointer;
            self.corners = self.orbit_goals(0.0, settings);
            self.initialized = true;
        }

        let follow = 1.0 - (-FOLLOW_RATE * dt).exp();
        self.pos += (pointer - self.pos) * follow;

        if hover.is_some() {
            self.lock = (self.lock + dt / LOCK_DURATION).min(1.0);
        } else {
            self.lock = (self.lock - dt / UNLOCK_DURATION).max(0.0);
        }

        if pressed {
            self.press = (self.press + dt / PRESS_DURATION).min(1.0);
        } else {
            self.press = (self.press - dt / PRESS_DURATION).max(0.0);
        }
        self.scale = 1.0 - (1.0 - PRESS_SCALE) * ease_out(self.press);

        // The spin pauses as lock-on completes and the residual rotation
        // unwinds to zero, so locked brackets land axis-aligned.
        let eased_lock = ease_in_out(self.lock);
        self.spin_angle += dt * TAU / settings.spin_duration * (1.0 - eased_lock);
        if self.lock == 0.0 {
            // The formation is symmetric under quarter turns.
            self.spin_angle = self.spin_angle.rem_euclid(FRAC_PI_2);
        }
        self.display_angle = self.spin_angle * (1.0 - eased_lock);

        let goals = match hover {
            Some(target) => self.locked_goals(target, pointer, settings),
            None => self.orbit_goals(self.display_angle, settings),
        };
        let snap = 1.0 - (-CORNER_RATE * dt).exp();
        for (corner, goal) in self.corners.iter_mut().zip(goals) {
            *corner += (goal - *corner) * snap;
        }

        let hover_id = hover.map(|t| t.id);
        if hover_id != self.locked {
            if let Some(target) = hover {
                log::debug!("cursor locked onto {}", target.kind.name());
            }
            self.locked = hover_id;
        }
    }

    /// Goal corners while orbiting the dot.
    fn orbit_goals(&self, angle: f64, settings: &CursorSettings) -> [Point; 4] {
        let half = settings.cursor_size.px() / 2.0 * self.scale;
        CORNER_SIGNS.map(|(sx, sy)| self.pos + rotate(Vec2::new(sx * half, sy * half), angle))
    }

    /// Goal corners while locked onto `target`.
    fn locked_goals(&self, target: &Target, pointer: Point, settings: &CursorSettings) -> [Point; 4] {
        let rect: Rect = target.rect.inflate(TARGET_PADDING, TARGET_PADDING);
        let mut center = rect.center();
        if settings.parallax_on {
            let nx = ((pointer.x - center.x) / (rect.width() / 2.0).max(1.0)).clamp(-1.0, 1.0);
            let ny = ((pointer.y - center.y) / (rect.height() / 2.0).max(1.0)).clamp(-1.0, 1.0);
            center += Vec2::new(nx * PARALLAX_MAX, ny * PARALLAX_MAX);
        }
        let hw = rect.width() / 2.0 * self.scale;
        let hh = rect.height() / 2.0 * self.scale;
        CORNER_SIGNS.map(|(sx, sy)| center + Vec2::new(sx * hw, sy * hh))
    }

    /// Emit the geometry for the current state.
    pub fn frame(&self, settings: &CursorSettings) -> CursorFrame {
        let size = settings.cursor_size.px();
        let arm = size * ARM_FRACTION * self.scale;

        let brackets: [Bracket; 4] = std::array::from_fn(|i| {
            let (sx, sy) = CORNER_SIGNS[i];
            let corner = self.corners[i];
            // Arms open toward the formation center.
            let horizontal = rotate(Vec2::new(-sx * arm, 0.0), self.display_angle);
            let vertical = rotate(Vec2::new(0.0, -sy * arm), self.display_angle);
            Bracket {
                points: [corner + horizontal, corner, corner + vertical],
            }
        });

        CursorFrame {
            dot: Circle::new(self.pos, size * DOT_FRACTION * self.scale),
            brackets,
            stroke_width: size / 20.0 * 2.0,
            visible: self.initialized && self.pointer_inside,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::CursorSize;
    use crate::targets::{TargetKind, TargetRegistry};

    const DT: f64 = 1.0 / 60.0;

    fn make_target(rect: Rect) -> (TargetRegistry, TargetId) {
        let mut registry = TargetRegistry::new();
        let id = registry.register(rect, TargetKind::PrimaryButton);
        (registry, id)
    }

    fn settle(
        animator: &mut CursorAnimator,
        pointer: Point,
        hover: Option<&Target>,
        settings: &CursorSettings,
        seconds: f64,
    ) {
        let steps = (seconds / DT).ceil() as usize;
        for _ in 0..steps {
            animator.update(DT, pointer, false, hover, settings);
        }
    }

    #[test]
    fn test_spin_rate_matches_duration() {
        let settings = CursorSettings::default(); // 2 s per revolution
        let mut animator = CursorAnimator::new();
        animator.update(0.3, Point::new(100.0, 100.0), false, None, &settings);

        let expected = 0.3 * TAU / 2.0;
        assert!((animator.spin_angle - expected).abs() < 1e-9);
    }

    #[test]
    fn test_spin_angle_continuous_across_duration_change() {
        let mut fast = CursorSettings::default();
        fast.spin_duration = 2.0;
        let mut slow = fast;
        slow.spin_duration = 4.0;

        let mut animator = CursorAnimator::new();
        animator.update(0.1, Point::ZERO, false, None, &fast);
        let angle = animator.spin_angle;

        animator.update(0.1, Point::ZERO, false, None, &slow);
        assert!((animator.spin_angle - (angle + 0.1 * TAU / 4.0)).abs() < 1e-9);
    }

    #[test]
    fn test_spin_pauses_while_locked() {
        let settings = CursorSettings::default();
        let rect = Rect::new(100.0, 100.0, 300.0, 200.0);
        let (registry, id) = make_target(rect);
        let target = registry.get(id).unwrap();
        let center = rect.center();

        let mut animator = CursorAnimator::new();
        settle(&mut animator, center, Some(target), &settings, 2.0);
        assert_eq!(animator.lock, 1.0);

        let angle = animator.spin_angle;
        settle(&mut animator, center, Some(target), &settings, 1.0);
        assert!((animator.spin_angle - angle).abs() < 1e-6);
        // Fully locked brackets carry no residual rotation.
        assert!(animator.display_angle.abs() < 1e-6);
    }

    #[test]
    fn test_dot_follows_pointer() {
        let settings = CursorSettings::default();
        let mut animator = CursorAnimator::new();
        animator.update(DT, Point::new(10.0, 10.0), false, None, &settings);

        let goal = Point::new(400.0, 300.0);
        settle(&mut animator, goal, None, &settings, 1.0);
        assert!((animator.position() - goal).hypot() < 0.1);
    }

    #[test]
    fn test_corners_converge_to_inflated_target() {
        let mut settings = CursorSettings::default();
        settings.parallax_on = false;
        let rect = Rect::new(100.0, 100.0, 300.0, 200.0);
        let (registry, id) = make_target(rect);
        let target = registry.get(id).unwrap();

        let mut animator = CursorAnimator::new();
        settle(&mut animator, rect.center(), Some(target), &settings, 3.0);

        let expected = rect.inflate(6.0, 6.0);
        let goals = [
            Point::new(expected.x0, expected.y0),
            Point::new(expected.x1, expected.y0),
            Point::new(expected.x1, expected.y1),
            Point::new(expected.x0, expected.y1),
        ];
        for (corner, goal) in animator.corners.iter().zip(goals) {
            assert!((*corner - goal).hypot() < 0.5, "{corner:?} vs {goal:?}");
        }
        assert_eq!(animator.locked_target(), Some(id));
    }

    #[test]
    fn test_parallax_shifts_frame_toward_pointer() {
        let settings = CursorSettings::default(); // parallax on
        let rect = Rect::new(100.0, 100.0, 300.0, 200.0);
        let (registry, id) = make_target(rect);
        let target = registry.get(id).unwrap();

        // Pointer at the right edge: frame centroid shifts right.
        let pointer = Point::new(rect.x1, rect.center().y);
        let mut animator = CursorAnimator::new();
        settle(&mut animator, pointer, Some(target), &settings, 3.0);

        let centroid_x = animator.corners.iter().map(|c| c.x).sum::<f64>() / 4.0;
        assert!(centroid_x > rect.center().x + 5.0);

        // Pointer at the center: no shift.
        let mut animator = CursorAnimator::new();
        settle(&mut animator, rect.center(), Some(target), &settings, 3.0);
        let centroid_x = animator.corners.iter().map(|c| c.x).sum::<f64>() / 4.0;
        assert!((centroid_x - rect.center().x).abs() < 0.5);
    }

    #[test]
    fn test_parallax_disabled_keeps_frame_centered() {
        let mut settings = CursorSettings::default();
        settings.parallax_on = false;
        let rect = Rect::new(100.0, 100.0, 300.0, 200.0);
        let (registry, id) = make_target(rect);
        let target = registry.get(id).unwrap();

        let pointer = Point::new(rect.x1, rect.y1);
        let mut animator = CursorAnimator::new();
        settle(&mut animator, pointer, Some(target), &settings, 3.0);

        let centroid_x = animator.corners.iter().map(|c| c.x).sum::<f64>() / 4.0;
        let centroid_y = animator.corners.iter().map(|c| c.y).sum::<f64>() / 4.0;
        assert!((centroid_x - rect.center().x).abs() < 0.5);
        assert!((centroid_y - rect.center().y).abs() < 0.5);
    }

    #[test]
    fn test_press_contracts_formation() {
        let settings = CursorSettings::default();
        let pointer = Point::new(200.0, 200.0);

        let mut animator = CursorAnimator::new();
        settle(&mut animator, pointer, None, &settings, 1.0);
        let relaxed = (animator.corners[0] - animator.position()).hypot();

        for _ in 0..30 {
            animator.update(DT, pointer, true, None, &settings);
        }
        let pressed = (animator.corners[0] - animator.position()).hypot();
        assert!(pressed < relaxed * 0.95, "{pressed} vs {relaxed}");

        // Releasing recovers.
        settle(&mut animator, pointer, None, &settings, 1.0);
        let recovered = (animator.corners[0] - animator.position()).hypot();
        assert!((recovered - relaxed).abs() < 0.2);
    }

    #[test]
    fn test_frame_geometry_scales_with_size() {
        let mut settings = CursorSettings::default();
        let pointer = Point::new(50.0, 50.0);

        let mut animator = CursorAnimator::new();
        animator.set_pointer_inside(true);
        settle(&mut animator, pointer, None, &settings, 1.0);

        let medium = animator.frame(&settings);
        assert!(medium.visible);
        assert_eq!(medium.stroke_width, 2.0);
        assert!((medium.dot.radius - 3.0).abs() < 1e-6);
        for bracket in &medium.brackets {
            assert_eq!(bracket.points.len(), 3);
        }

        settings.cursor_size = CursorSize::Large;
        let large = animator.frame(&settings);
        assert!(large.dot.radius > medium.dot.radius);
        assert!(large.stroke_width > medium.stroke_width);
    }

    #[test]
    fn test_hidden_until_pointer_seen() {
        let settings = CursorSettings::default();
        let animator = CursorAnimator::new();
        assert!(!animator.frame(&settings).visible);

        let mut animator = CursorAnimator::new();
        animator.set_pointer_inside(true);
        animator.update(DT, Point::new(10.0, 10.0), false, None, &settings);
        assert!(animator.frame(&settings).visible);

        animator.set_pointer_inside(false);
        assert!(!animator.frame(&settings).visible);
    }
}
