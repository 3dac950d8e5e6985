//! Snapshot system: reads the combat context and builds a `CombatSnapshot`.
//!
//! Read-only. Ordering is stable: targets by registration, units by
//! registration, projectiles by launch, pools by color.

use salvo_core::components::{BodySegment, Cannon, HomingProjectile};
use salvo_core::events::CombatEvent;
use salvo_core::state::*;
use salvo_core::types::Position;

use crate::context::CombatContext;
use crate::systems::fire_control::FireController;

pub fn build_snapshot(
    ctx: &CombatContext,
    controller: &FireController,
    events: Vec<CombatEvent>,
) -> CombatSnapshot {
    CombatSnapshot {
        time: ctx.time,
        targets: build_targets(ctx),
        units: build_units(ctx, controller),
        projectiles: build_projectiles(ctx),
        pools: ctx
            .pool
            .occupancy_by_color()
            .into_iter()
            .map(|(color, idle)| PoolView { color, idle })
            .collect(),
        events,
    }
}

fn build_targets(ctx: &CombatContext) -> Vec<TargetView> {
    ctx.targets
        .iter()
        .filter_map(|(_, entity)| {
            let segment = ctx.world.get::<&BodySegment>(entity).ok()?;
            let position = ctx.world.get::<&Position>(entity).ok()?;
            Some(TargetView {
                id: segment.id,
                color: segment.color,
                position: *position,
                health: segment.health,
                max_health: segment.max_health,
                reserved: segment.reserved,
            })
        })
        .collect()
}

fn build_units(ctx: &CombatContext, controller: &FireController) -> Vec<UnitView> {
    controller
        .units()
        .filter_map(|(_, entity)| {
            let cannon = ctx.world.get::<&Cannon>(entity).ok()?;
            let position = ctx.world.get::<&Position>(entity).ok()?;
            Some(UnitView {
                id: cannon.id,
                color: cannon.color,
                position: *position,
                heading_deg: cannon.heading_deg,
                ammo: cannon.ammo,
                state: cannon.state,
                current_target: cannon.current_target,
                next_fire_time: cannon.next_fire_time,
            })
        })
        .collect()
}

fn build_projectiles(ctx: &CombatContext) -> Vec<ProjectileView> {
    ctx.in_flight
        .iter()
        .filter_map(|&entity| {
            let projectile = ctx.world.get::<&HomingProjectile>(entity).ok()?;
            let position = ctx.world.get::<&Position>(entity).ok()?;
            Some(ProjectileView {
                color: projectile.color,
                position: *position,
                target: projectile.target,
                phase: projectile.phase,
                remaining_secs: projectile.remaining_secs,
            })
        })
        .collect()
}
