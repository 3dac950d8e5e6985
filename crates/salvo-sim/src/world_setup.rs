//! Entity spawn factories for targets, firing units and projectile instances.

use hecs::{Entity, World};

use salvo_core::color::ColorId;
use salvo_core::components::{
    BodySegment, Cannon, HomingProjectile, ProjectileTemplate,
};
use salvo_core::config::CannonConfig;
use salvo_core::enums::TurretState;
use salvo_core::types::{Position, TargetId, UnitId};

/// Spawn a damageable target at full health.
pub fn spawn_target(
    world: &mut World,
    id: TargetId,
    color: ColorId,
    max_health: f64,
    position: Position,
) -> Entity {
    world.spawn((BodySegment::new(id, color, max_health), position))
}

/// Build a cannon from the configured turret parameters, ready to fire immediately.
pub fn build_cannon(
    id: UnitId,
    color: ColorId,
    ammo: u32,
    config: &CannonConfig,
    heading_deg: f64,
) -> Cannon {
    let mut cannon = Cannon {
        id,
        color,
        ammo,
        fire_rate_secs: config.fire_rate_secs,
        next_fire_time: 0.0,
        heading_deg: 0.0,
        rotation_speed_deg: config.rotation_speed_deg,
        aim_tolerance_deg: config.aim_tolerance_deg,
        // Muzzle sits ahead of the pivot along the barrel.
        fire_point: Position::planar(0.0, config.fire_point_offset),
        current_target: None,
        state: TurretState::Idle,
    };
    cannon.set_heading(heading_deg);
    cannon
}

/// Spawn a firing unit at `position`.
pub fn spawn_cannon(world: &mut World, cannon: Cannon, position: Position) -> Entity {
    world.spawn((cannon, position))
}

/// Spawn an inactive projectile instance parked at the origin.
pub fn spawn_projectile(
    world: &mut World,
    template: &ProjectileTemplate,
    color: ColorId,
) -> Entity {
    world.spawn((
        HomingProjectile::from_template(template, color),
        Position::ORIGIN,
    ))
}
