//! Per-session state shared by the combat systems.

use hecs::{Entity, World};

use salvo_core::color::ColorRegistry;
use salvo_core::events::CombatEvent;
use salvo_core::types::SimTime;
use salvo_core::visibility::VisibilityPredicate;

use crate::pool::ProjectilePool;
use crate::registry::TargetRegistry;

/// Everything one combat session owns. Systems borrow it mutably for the
/// duration of their pass; there is no global state.
pub struct CombatContext {
    pub world: World,
    pub time: SimTime,
    /// Fixed timestep in seconds.
    pub dt: f64,
    pub colors: ColorRegistry,
    pub targets: TargetRegistry,
    pub pool: ProjectilePool,
    /// Projectiles in flight, in launch order.
    pub in_flight: Vec<Entity>,
    /// Events collected since the last snapshot.
    pub events: Vec<CombatEvent>,
    pub visibility: Box<dyn VisibilityPredicate>,
}

impl CombatContext {
    pub fn new(
        dt: f64,
        colors: ColorRegistry,
        pool: ProjectilePool,
        visibility: Box<dyn VisibilityPredicate>,
    ) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            dt,
            colors,
            targets: TargetRegistry::new(),
            pool,
            in_flight: Vec::new(),
            events: Vec::new(),
            visibility,
        }
    }

    pub fn now(&self) -> f64 {
        self.time.elapsed_secs
    }
}
