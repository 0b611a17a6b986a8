//! Target registry: the screen regions the cursor can lock onto.
//!
//! Every interactive region (demo elements and settings controls) registers
//! its rect each frame. Hit testing picks the innermost target under the
//! pointer, which is the only coupling between page content and the cursor.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Kind of interactive region, used for styling and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetKind {
    PrimaryButton,
    SecondaryButton,
    Card,
    Link,
    InputField,
    /// A settings-panel control.
    Control,
}

impl TargetKind {
    /// Short name for log output.
    pub const fn name(self) -> &'static str {
        match self {
            TargetKind::PrimaryButton => "primary button",
            TargetKind::SecondaryButton => "secondary button",
            TargetKind::Card => "card",
            TargetKind::Link => "link",
            TargetKind::InputField => "input field",
            TargetKind::Control => "control",
        }
    }
}

/// Identifier of a target within the current frame.
///
/// Ids are frame-local: the registry is rebuilt every frame and ids are
/// only meaningful until the next `begin_frame`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetId(u32);

/// A registered interactive region in screen (logical point) coordinates.
#[derive(Debug, Clone, Copy)]
pub struct Target {
    pub id: TargetId,
    pub rect: Rect,
    pub kind: TargetKind,
}

/// Per-frame collection of cursor targets.
#[derive(Debug, Default)]
pub struct TargetRegistry {
    targets: Vec<Target>,
}

impl TargetRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all targets at the start of a frame.
    pub fn begin_frame(&mut self) {
        self.targets.clear();
    }

    /// Register a target rect and return its frame-local id.
    pub fn register(&mut self, rect: Rect, kind: TargetKind) -> TargetId {
        let id = TargetId(self.targets.len() as u32);
        self.targets.push(Target { id, rect, kind });
        id
    }

    /// Number of registered targets.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Whether no targets are registered.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Look up a target by id.
    pub fn get(&self, id: TargetId) -> Option<&Target> {
        self.targets.get(id.0 as usize)
    }

    /// Iterate all registered targets.
    pub fn iter(&self) -> impl Iterator<Item = &Target> {
        self.targets.iter()
    }

    /// The innermost target containing `point`, if any.
    ///
    /// Smallest area wins so that a control inside a panel beats the panel;
    /// on equal area the later registration wins.
    pub fn hit_test(&self, point: Point) -> Option<&Target> {
        self.targets
            .iter()
            .filter(|t| t.rect.contains(point))
            .min_by(|a, b| {
                let (aa, ab) = (a.rect.area(), b.rect.area());
                aa.partial_cmp(&ab)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(b.id.0.cmp(&a.id.0))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_hit() {
        let mut registry = TargetRegistry::new();
        let id = registry.register(Rect::new(10.0, 10.0, 110.0, 60.0), TargetKind::PrimaryButton);

        let hit = registry.hit_test(Point::new(50.0, 30.0)).unwrap();
        assert_eq!(hit.id, id);
        assert_eq!(hit.kind, TargetKind::PrimaryButton);

        assert!(registry.hit_test(Point::new(200.0, 200.0)).is_none());
    }

    #[test]
    fn test_innermost_wins() {
        let mut registry = TargetRegistry::new();
        registry.register(Rect::new(0.0, 0.0, 300.0, 300.0), TargetKind::Card);
        let inner = registry.register(Rect::new(100.0, 100.0, 200.0, 150.0), TargetKind::Link);

        let hit = registry.hit_test(Point::new(150.0, 120.0)).unwrap();
        assert_eq!(hit.id, inner);

        // Outside the inner rect the outer card still hits.
        let hit = registry.hit_test(Point::new(20.0, 20.0)).unwrap();
        assert_eq!(hit.kind, TargetKind::Card);
    }

    #[test]
    fn test_equal_area_later_wins() {
        let mut registry = TargetRegistry::new();
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        registry.register(rect, TargetKind::Card);
        let later = registry.register(rect, TargetKind::Link);

        assert_eq!(registry.hit_test(Point::new(50.0, 50.0)).unwrap().id, later);
    }

    #[test]
    fn test_begin_frame_clears() {
        let mut registry = TargetRegistry::new();
        registry.register(Rect::new(0.0, 0.0, 100.0, 100.0), TargetKind::Card);
        assert_eq!(registry.len(), 1);

        registry.begin_frame();
        assert!(registry.is_empty());
        assert!(registry.hit_test(Point::new(50.0, 50.0)).is_none());
    }
}
