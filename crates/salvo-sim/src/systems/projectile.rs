//! Projectile launch, per-tick pursuit, and resolution.
//!
//! A projectile binds to exactly one reserved target at launch. Every tick it
//! steps toward the target; it resolves as a hit, as lost (target died or
//! vanished), or as expired (self-destruct timer ran out). Resolution clears
//! the reservation and returns the instance to the pool, exactly once.

use hecs::Entity;
use log::{debug, warn};

use salvo_core::capabilities::{Bullet, Hitable, TrackStep};
use salvo_core::components::{BodySegment, HomingProjectile};
use salvo_core::enums::Resolution;
use salvo_core::events::CombatEvent;
use salvo_core::types::{Position, TargetId, UnitId};

use crate::context::CombatContext;
use crate::systems::damage;

enum Flight {
    Continue,
    Resolve(Resolution),
    /// Handle no longer refers to an in-flight projectile.
    Gone,
}

/// Reserve `target`, bind the pool instance `handle` to it, and place it at `start`.
///
/// Returns false (and hands the instance back to the pool) if the target is
/// gone or already claimed.
pub fn launch(
    ctx: &mut CombatContext,
    handle: Entity,
    target: TargetId,
    start: Position,
    source: Option<UnitId>,
) -> bool {
    let color = match ctx.world.get::<&HomingProjectile>(handle) {
        Ok(projectile) => projectile.color,
        Err(_) => return false,
    };

    let reserved = ctx
        .targets
        .entity_of(target)
        .and_then(|entity| ctx.world.get::<&mut BodySegment>(entity).ok())
        .map_or(false, |mut segment| segment.set_reserved());
    if !reserved {
        warn!("projectile launch aborted: target {target} unavailable");
        ctx.pool.release(&mut ctx.world, handle, color);
        return false;
    }

    let bound = match ctx.world.get::<&mut HomingProjectile>(handle) {
        Ok(mut projectile) => projectile.launch(target, source),
        Err(_) => false,
    };
    if !bound {
        warn!("projectile launch aborted: instance not ready");
        release_reservation(ctx, target);
        ctx.pool.release(&mut ctx.world, handle, color);
        return false;
    }

    if let Ok(mut position) = ctx.world.get::<&mut Position>(handle) {
        *position = start;
    }
    ctx.in_flight.push(handle);
    debug!("projectile ({color}) launched at target {target}");
    true
}

/// Step every in-flight projectile once, in launch order.
pub fn run(ctx: &mut CombatContext) {
    let dt = ctx.dt;
    let flights = std::mem::take(&mut ctx.in_flight);
    let mut still_flying = Vec::with_capacity(flights.len());

    for handle in flights {
        match advance(ctx, handle, dt) {
            Flight::Continue => still_flying.push(handle),
            Flight::Resolve(resolution) => {
                resolve(ctx, handle, resolution);
            }
            Flight::Gone => {}
        }
    }

    still_flying.append(&mut ctx.in_flight);
    ctx.in_flight = still_flying;
}

fn advance(ctx: &mut CombatContext, handle: Entity, dt: f64) -> Flight {
    let (target, damage) = match ctx.world.get::<&HomingProjectile>(handle) {
        Ok(projectile) if projectile.is_in_flight() => (projectile.target, projectile.damage()),
        _ => return Flight::Gone,
    };
    let fix = target.and_then(|id| ctx.targets.fix(&ctx.world, id));

    let step = {
        let (mut projectile, mut position) = match (
            ctx.world.get::<&mut HomingProjectile>(handle),
            ctx.world.get::<&mut Position>(handle),
        ) {
            (Ok(projectile), Ok(position)) => (projectile, position),
            _ => return Flight::Gone,
        };
        projectile.track(&mut position, fix, dt)
    };

    match step {
        TrackStep::Hit => {
            if let Some(target) = target {
                damage::apply(ctx, target, damage);
            }
            return Flight::Resolve(Resolution::Hit);
        }
        TrackStep::Lost => return Flight::Resolve(Resolution::TargetLost),
        TrackStep::Idle => return Flight::Gone,
        TrackStep::Continue => {}
    }

    let expired = ctx
        .world
        .get::<&mut HomingProjectile>(handle)
        .map_or(false, |mut projectile| projectile.tick_expiry(dt));
    if expired {
        Flight::Resolve(Resolution::Expired)
    } else {
        Flight::Continue
    }
}

/// End a projectile's flight: release its target's reservation, report the
/// outcome and return the instance to the pool.
///
/// Idempotent: returns false if the projectile was already resolved.
pub fn resolve(ctx: &mut CombatContext, handle: Entity, resolution: Resolution) -> bool {
    let (target, color) = match ctx.world.get::<&mut HomingProjectile>(handle) {
        Ok(mut projectile) => {
            if !projectile.resolve(resolution) {
                return false;
            }
            (projectile.target, projectile.color)
        }
        Err(_) => return false,
    };

    ctx.in_flight.retain(|h| *h != handle);
    if let Some(target) = target {
        release_reservation(ctx, target);
    }

    debug!("projectile ({color}) resolved: {resolution:?}");
    ctx.events.push(CombatEvent::ProjectileResolved {
        target,
        color,
        resolution,
    });
    ctx.pool.release(&mut ctx.world, handle, color);
    true
}

fn release_reservation(ctx: &mut CombatContext, target: TargetId) {
    let Some(entity) = ctx.targets.entity_of(target) else {
        return;
    };
    if let Ok(mut segment) = ctx.world.get::<&mut BodySegment>(entity) {
        if segment.is_alive() {
            segment.clear_reserved();
        }
    }
}
