//! Visibility predicate: decides whether a world position is on screen and
//! far enough from the edges to be engaged.

use glam::DVec3;

use crate::config::ViewportConfig;
use crate::types::Position;

/// Injected test for "is this position eligible for targeting".
pub trait VisibilityPredicate {
    fn is_visible(&self, position: &Position) -> bool;
}

impl<F> VisibilityPredicate for F
where
    F: Fn(&Position) -> bool,
{
    fn is_visible(&self, position: &Position) -> bool {
        self(position)
    }
}

/// Treats every position as visible. Useful for headless runs and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysVisible;

impl VisibilityPredicate for AlwaysVisible {
    fn is_visible(&self, _position: &Position) -> bool {
        true
    }
}

/// Orthographic camera looking down +z.
///
/// World positions project to normalized viewport coordinates where (0, 0) is
/// the bottom-left corner and (1, 1) the top-right; z is depth in front of the
/// camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    camera: DVec3,
    half_extents: DVec3,
    inset: f64,
}

impl Viewport {
    pub fn new(config: &ViewportConfig) -> Self {
        Self {
            camera: config.camera.into(),
            half_extents: DVec3::new(config.half_height * config.aspect, config.half_height, 1.0),
            inset: config.inset,
        }
    }

    /// Project a world position into viewport space.
    pub fn project(&self, position: &Position) -> DVec3 {
        let rel = DVec3::from(*position) - self.camera;
        let normalized = rel / (2.0 * self.half_extents) + DVec3::new(0.5, 0.5, 0.0);
        DVec3::new(normalized.x, normalized.y, rel.z)
    }
}

impl VisibilityPredicate for Viewport {
    /// Strictly inside the inset margin on all four sides, in front of the camera.
    fn is_visible(&self, position: &Position) -> bool {
        let p = self.project(position);
        let lo = self.inset;
        let hi = 1.0 - self.inset;
        p.z > 0.0 && p.x > lo && p.x < hi && p.y > lo && p.y < hi
    }
}
