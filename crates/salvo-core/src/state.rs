//! Engine snapshot: the complete visible state after each tick.

use serde::{Deserialize, Serialize};

use crate::color::ColorId;
use crate::enums::{ProjectilePhase, TurretState};
use crate::events::CombatEvent;
use crate::types::{Position, SimTime, TargetId, UnitId};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CombatSnapshot {
    pub time: SimTime,
    /// Live targets in registration order.
    pub targets: Vec<TargetView>,
    /// Active units in registration order.
    pub units: Vec<UnitView>,
    /// Projectiles in flight, in launch order.
    pub projectiles: Vec<ProjectileView>,
    /// Idle pooled instances per color, ascending by color.
    pub pools: Vec<PoolView>,
    /// Events emitted during this tick.
    pub events: Vec<CombatEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetView {
    pub id: TargetId,
    pub color: ColorId,
    pub position: Position,
    pub health: f64,
    pub max_health: f64,
    pub reserved: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitView {
    pub id: UnitId,
    pub color: ColorId,
    pub position: Position,
    pub heading_deg: f64,
    pub ammo: u32,
    pub state: TurretState,
    pub current_target: Option<TargetId>,
    pub next_fire_time: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub color: ColorId,
    pub position: Position,
    pub target: Option<TargetId>,
    pub phase: ProjectilePhase,
    pub remaining_secs: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolView {
    pub color: ColorId,
    pub idle: usize,
}
