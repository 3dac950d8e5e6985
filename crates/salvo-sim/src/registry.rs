//! Registry of live damageable targets and nearest-target selection.

use std::collections::BTreeMap;

use hecs::{Entity, World};
use log::trace;

use salvo_core::capabilities::{Hitable, TargetFix};
use salvo_core::color::ColorId;
use salvo_core::components::BodySegment;
use salvo_core::types::{Position, TargetId};
use salvo_core::visibility::VisibilityPredicate;

#[derive(Debug, Clone, Copy)]
struct Registration {
    id: TargetId,
    entity: Entity,
}

/// Live targets, kept in registration order.
///
/// A target enters on spawn and leaves when it is destroyed, so a
/// [`TargetId`] that no longer resolves here refers to a dead target.
#[derive(Debug, Default)]
pub struct TargetRegistry {
    registered: Vec<Registration>,
}

impl TargetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a target. Returns false if the id is already registered.
    pub fn register(&mut self, id: TargetId, entity: Entity) -> bool {
        if self.contains(id) {
            return false;
        }
        self.registered.push(Registration { id, entity });
        trace!("target {id} registered ({} live)", self.registered.len());
        true
    }

    /// Remove a target, preserving the order of the rest.
    pub fn unregister(&mut self, id: TargetId) -> Option<Entity> {
        let idx = self.registered.iter().position(|r| r.id == id)?;
        let removed = self.registered.remove(idx);
        trace!("target {id} unregistered ({} live)", self.registered.len());
        Some(removed.entity)
    }

    pub fn entity_of(&self, id: TargetId) -> Option<Entity> {
        self.registered
            .iter()
            .find(|r| r.id == id)
            .map(|r| r.entity)
    }

    pub fn contains(&self, id: TargetId) -> bool {
        self.registered.iter().any(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.registered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registered.is_empty()
    }

    /// (id, entity) pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (TargetId, Entity)> + '_ {
        self.registered.iter().map(|r| (r.id, r.entity))
    }

    /// Current position and liveness of a target, or `None` if it is gone.
    pub fn fix(&self, world: &World, id: TargetId) -> Option<TargetFix> {
        let entity = self.entity_of(id)?;
        let segment = world.get::<&BodySegment>(entity).ok()?;
        let position = world.get::<&Position>(entity).ok()?;
        Some(TargetFix {
            position: *position,
            alive: segment.is_alive(),
        })
    }

    /// Nearest alive, unreserved, visible target of `color` as seen from `from`.
    ///
    /// Ties go to the earliest registered target.
    pub fn find_nearest(
        &self,
        world: &World,
        color: ColorId,
        from: &Position,
        visibility: &dyn VisibilityPredicate,
    ) -> Option<TargetId> {
        let mut best: Option<(TargetId, f64)> = None;

        for reg in &self.registered {
            let (segment, position) = match (
                world.get::<&BodySegment>(reg.entity),
                world.get::<&Position>(reg.entity),
            ) {
                (Ok(segment), Ok(position)) => (segment, *position),
                _ => continue,
            };

            if !segment.is_alive() || segment.color_id() != color || segment.is_reserved() {
                continue;
            }
            if !visibility.is_visible(&position) {
                continue;
            }

            let distance = from.range_to(&position);
            if best.map_or(true, |(_, d)| distance < d) {
                best = Some((reg.id, distance));
            }
        }

        best.map(|(id, _)| id)
    }

    /// Number of live targets per color.
    pub fn count_by_color(&self, world: &World) -> BTreeMap<ColorId, usize> {
        let mut counts = BTreeMap::new();
        for reg in &self.registered {
            if let Ok(segment) = world.get::<&BodySegment>(reg.entity) {
                *counts.entry(segment.color).or_insert(0) += 1;
            }
        }
        counts
    }
}
