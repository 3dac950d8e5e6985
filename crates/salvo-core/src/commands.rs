//! Requests from external game-flow logic (wave scripting, level setup).
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::color::ColorId;
use crate::types::{Position, TargetId, UnitId};

/// One unit to create: color and starting ammo.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitRequest {
    pub color: ColorId,
    pub ammo: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EngineCommand {
    /// Spawn and register a damageable target.
    SpawnTarget {
        color: ColorId,
        position: Position,
        /// Overrides the configured max health.
        #[serde(default)]
        max_health: Option<f64>,
    },
    /// Create one firing unit at the next spawn point.
    CreateUnit { color: ColorId, ammo: u32 },
    /// Create several firing units, in order.
    CreateUnits { units: Vec<UnitRequest> },
    /// Top up a unit's ammo. Negative amounts are ignored.
    AddAmmo { unit: UnitId, amount: i64 },
    /// Change a unit's matching color.
    SetUnitColor { unit: UnitId, color: ColorId },
    /// Damage a target from an outside source.
    DamageTarget { target: TargetId, amount: f64 },
}
