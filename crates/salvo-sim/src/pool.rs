//! Per-color recycling store of projectile instances.
//!
//! Instances are hecs entities that stay spawned while parked; only their
//! `HomingProjectile` phase changes between Inactive and active. Nothing here
//! can fail: an empty queue allocates, a full queue disposes.

use std::collections::{BTreeMap, VecDeque};

use hecs::{Entity, World};
use log::trace;

use salvo_core::color::ColorId;
use salvo_core::components::{HomingProjectile, ProjectileTemplate};

use crate::world_setup;

/// What happened to a released instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// Deactivated and queued for reuse.
    Pooled,
    /// Queue was full (or the instance was gone); despawned.
    Disposed,
}

#[derive(Debug)]
pub struct ProjectilePool {
    idle: BTreeMap<ColorId, VecDeque<Entity>>,
    max_size: usize,
    template: ProjectileTemplate,
    instantiated: u64,
    disposed: u64,
}

impl ProjectilePool {
    pub fn new(template: ProjectileTemplate, max_size: usize) -> Self {
        Self {
            idle: BTreeMap::new(),
            max_size,
            template,
            instantiated: 0,
            disposed: 0,
        }
    }

    /// Fill each color's queue up to `count` inactive instances (capped at max size).
    pub fn prewarm(&mut self, world: &mut World, colors: &[ColorId], count: usize) {
        let target = count.min(self.max_size);
        for &color in colors {
            while self.occupancy(color) < target {
                let entity = self.instantiate(world, color);
                self.idle.entry(color).or_default().push_back(entity);
            }
        }
    }

    /// Hand out an active instance of `color`, reusing a parked one when possible.
    pub fn acquire(&mut self, world: &mut World, color: ColorId) -> Entity {
        while let Some(entity) = self.idle.get_mut(&color).and_then(|q| q.pop_front()) {
            if let Ok(mut projectile) = world.get::<&mut HomingProjectile>(entity) {
                projectile.activate();
                trace!("pool {color}: reused instance ({} idle)", self.occupancy(color));
                return entity;
            }
            // Stale handle: the instance was despawned behind our back.
        }

        let entity = self.instantiate(world, color);
        if let Ok(mut projectile) = world.get::<&mut HomingProjectile>(entity) {
            projectile.activate();
        }
        trace!("pool {color}: empty, instantiated fresh");
        entity
    }

    /// Return an instance to the `color` queue, or dispose it if the queue is full.
    pub fn release(&mut self, world: &mut World, entity: Entity, color: ColorId) -> ReleaseOutcome {
        let queue = self.idle.entry(color).or_default();
        if queue.contains(&entity) {
            return ReleaseOutcome::Pooled;
        }

        if queue.len() < self.max_size {
            if let Ok(mut projectile) = world.get::<&mut HomingProjectile>(entity) {
                projectile.recycle();
                queue.push_back(entity);
                trace!("pool {color}: parked instance ({} idle)", queue.len());
                return ReleaseOutcome::Pooled;
            }
        }

        let _ = world.despawn(entity);
        self.disposed += 1;
        trace!("pool {color}: full, disposed instance");
        ReleaseOutcome::Disposed
    }

    /// Parked instances of `color`.
    pub fn occupancy(&self, color: ColorId) -> usize {
        self.idle.get(&color).map_or(0, VecDeque::len)
    }

    /// Parked instances per color, ascending by color.
    pub fn occupancy_by_color(&self) -> BTreeMap<ColorId, usize> {
        self.idle
            .iter()
            .map(|(color, queue)| (*color, queue.len()))
            .collect()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Instances ever created.
    pub fn total_instantiated(&self) -> u64 {
        self.instantiated
    }

    /// Instances destroyed on release overflow.
    pub fn disposed(&self) -> u64 {
        self.disposed
    }

    fn instantiate(&mut self, world: &mut World, color: ColorId) -> Entity {
        self.instantiated += 1;
        world_setup::spawn_projectile(world, &self.template, color)
    }
}
