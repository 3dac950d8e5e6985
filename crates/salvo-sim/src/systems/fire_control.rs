//! Fire control: on a fixed cadence, every registered unit that can fire
//! picks the nearest eligible target of its color and shoots.
//!
//! Units are evaluated in registration order. A unit keeps shooting within
//! one evaluation for as long as its cooldown allows, and stops as soon as it
//! has to turn, runs out of targets, or runs dry. A dry unit is retired.

use hecs::Entity;
use log::{debug, info};

use salvo_core::capabilities::{AimRequest, FireOutcome, Fireable};
use salvo_core::components::Cannon;
use salvo_core::config::FireControlConfig;
use salvo_core::events::CombatEvent;
use salvo_core::types::{Position, TargetId, UnitId};

use crate::context::CombatContext;
use crate::schedule::RecurringTask;
use crate::systems::projectile;

#[derive(Debug, Clone, Copy)]
struct RegisteredUnit {
    id: UnitId,
    entity: Entity,
}

#[derive(Debug)]
pub struct FireController {
    units: Vec<RegisteredUnit>,
    cadence: RecurringTask,
}

impl FireController {
    pub fn new(config: &FireControlConfig) -> Self {
        Self {
            units: Vec::new(),
            cadence: RecurringTask::new(config.check_interval_secs, config.start_delay_secs),
        }
    }

    /// Register a unit. Returns false if the id is already registered.
    pub fn register_unit(&mut self, id: UnitId, entity: Entity) -> bool {
        if self.units.iter().any(|u| u.id == id) {
            return false;
        }
        self.units.push(RegisteredUnit { id, entity });
        true
    }

    /// Remove a unit from evaluation, preserving the order of the rest.
    pub fn unregister_unit(&mut self, id: UnitId) -> Option<Entity> {
        let idx = self.units.iter().position(|u| u.id == id)?;
        Some(self.units.remove(idx).entity)
    }

    pub fn entity_of(&self, id: UnitId) -> Option<Entity> {
        self.units.iter().find(|u| u.id == id).map(|u| u.entity)
    }

    /// (id, entity) pairs in registration order.
    pub fn units(&self) -> impl Iterator<Item = (UnitId, Entity)> + '_ {
        self.units.iter().map(|u| (u.id, u.entity))
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn cadence(&self) -> &RecurringTask {
        &self.cadence
    }

    /// Evaluate all units if the cadence is due at the current time.
    pub fn run(&mut self, ctx: &mut CombatContext) {
        if self.cadence.poll(ctx.now()) {
            self.evaluate_units(ctx);
        }
    }

    /// One pass over every registered unit, regardless of cadence.
    pub fn evaluate_units(&mut self, ctx: &mut CombatContext) {
        let now = ctx.now();
        let units = self.units.clone();

        for unit in units {
            loop {
                let (color, origin) = match (
                    ctx.world.get::<&Cannon>(unit.entity),
                    ctx.world.get::<&Position>(unit.entity),
                ) {
                    (Ok(cannon), Ok(position)) if cannon.can_fire(now) => {
                        (cannon.color_id(), *position)
                    }
                    _ => break,
                };

                let Some(target) =
                    ctx.targets
                        .find_nearest(&ctx.world, color, &origin, ctx.visibility.as_ref())
                else {
                    break;
                };

                match fire_unit(ctx, unit.id, unit.entity, target) {
                    FireOutcome::Fired { exhausted: true } => {
                        self.retire(ctx, unit.id);
                        break;
                    }
                    FireOutcome::Fired { exhausted: false } => {}
                    FireOutcome::Aligning { aim_error_deg } => {
                        debug!("unit {} aligning on {target}, off by {aim_error_deg:.1} deg", unit.id);
                        break;
                    }
                    FireOutcome::Blocked => break,
                }
            }
        }
    }

    /// Unregister an exhausted unit and remove it from the world.
    fn retire(&mut self, ctx: &mut CombatContext, id: UnitId) {
        if let Some(entity) = self.unregister_unit(id) {
            let _ = ctx.world.despawn(entity);
            info!("unit {id} out of ammo, retired ({} active)", self.units.len());
        }
    }
}

/// Aim unit `entity` at `target` and, if aligned and off cooldown, fire a
/// projectile from the pool.
pub fn fire_unit(
    ctx: &mut CombatContext,
    unit: UnitId,
    entity: Entity,
    target: TargetId,
) -> FireOutcome {
    let fix = match ctx.targets.fix(&ctx.world, target) {
        Some(fix) if fix.alive => fix,
        _ => return FireOutcome::Blocked,
    };
    let origin = match ctx.world.get::<&Position>(entity) {
        Ok(position) => *position,
        Err(_) => return FireOutcome::Blocked,
    };

    let request = AimRequest {
        target,
        origin,
        target_position: fix.position,
        now: ctx.now(),
        dt: ctx.dt,
    };

    let (outcome, color, muzzle, remaining_ammo) = match ctx.world.get::<&mut Cannon>(entity) {
        Ok(mut cannon) => {
            let outcome = cannon.fire(&request);
            (
                outcome,
                cannon.color_id(),
                cannon.muzzle_position(&origin),
                cannon.remaining_ammo(),
            )
        }
        Err(_) => return FireOutcome::Blocked,
    };

    if let FireOutcome::Fired { exhausted } = outcome {
        let handle = ctx.pool.acquire(&mut ctx.world, color);
        projectile::launch(ctx, handle, target, muzzle, Some(unit));
        debug!("unit {unit} fired at {target}, {remaining_ammo} rounds left");
        ctx.events.push(CombatEvent::UnitFired {
            unit,
            target,
            remaining_ammo,
        });
        if exhausted {
            ctx.events.push(CombatEvent::UnitExhausted { unit });
        }
    }

    outcome
}
