//! ECS components for hecs entities.
//!
//! Components are plain data. Their behavior is expressed through the
//! capability traits in [`crate::capabilities`]; systems drive them.

use serde::{Deserialize, Serialize};

use crate::color::ColorId;
use crate::enums::{ProjectilePhase, Resolution, TurretState};
use crate::types::{Position, TargetId, UnitId};

/// A damageable target (one segment of a body chain).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodySegment {
    pub id: TargetId,
    pub color: ColorId,
    /// Current health, in [0, max_health].
    pub health: f64,
    pub max_health: f64,
    /// Whether an in-flight projectile currently claims this target.
    pub reserved: bool,
}

impl BodySegment {
    pub fn new(id: TargetId, color: ColorId, max_health: f64) -> Self {
        Self {
            id,
            color,
            health: max_health,
            max_health,
            reserved: false,
        }
    }
}

/// A firing unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cannon {
    pub id: UnitId,
    pub color: ColorId,
    pub ammo: u32,
    /// Cooldown between shots (seconds).
    pub fire_rate_secs: f64,
    /// Simulation time at which the next shot is allowed.
    pub next_fire_time: f64,
    /// Current heading in degrees (0 = +y, clockwise).
    pub heading_deg: f64,
    /// Maximum turn rate (degrees per second).
    pub rotation_speed_deg: f64,
    /// Maximum aim error at which a shot is allowed (degrees).
    pub aim_tolerance_deg: f64,
    /// Muzzle offset in the unit's local frame (+y along the heading).
    pub fire_point: Position,
    /// Target the turret is currently turning toward.
    pub current_target: Option<TargetId>,
    pub state: TurretState,
}

/// A pooled homing projectile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomingProjectile {
    pub color: ColorId,
    pub damage: f64,
    /// Constant flight speed (world units per second).
    pub speed: f64,
    /// Distance at which the target counts as hit.
    pub hit_radius: f64,
    /// Lifetime granted at launch (seconds).
    pub self_destruct_secs: f64,
    pub phase: ProjectilePhase,
    /// Bound once at launch; cleared only when the instance is recycled.
    pub target: Option<TargetId>,
    /// Unit that fired this projectile, if any.
    pub source: Option<UnitId>,
    /// Time left before self-destruct.
    pub remaining_secs: f64,
    pub resolution: Option<Resolution>,
}

/// Stat block used to instantiate projectiles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileTemplate {
    pub damage: f64,
    pub speed: f64,
    pub hit_radius: f64,
    pub self_destruct_secs: f64,
}

impl HomingProjectile {
    /// A fresh, inactive instance of the given color.
    pub fn from_template(template: &ProjectileTemplate, color: ColorId) -> Self {
        Self {
            color,
            damage: template.damage,
            speed: template.speed,
            hit_radius: template.hit_radius,
            self_destruct_secs: template.self_destruct_secs,
            phase: ProjectilePhase::Inactive,
            target: None,
            source: None,
            remaining_secs: 0.0,
            resolution: None,
        }
    }
}
