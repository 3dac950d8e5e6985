//! Lifecycle events emitted by the engine for external consumers
//! (body-chain owners, wave scripting, presentation).

use serde::{Deserialize, Serialize};

use crate::color::ColorId;
use crate::enums::Resolution;
use crate::types::{TargetId, UnitId};

/// Fire-and-forget notifications, collected per tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CombatEvent {
    /// A target was spawned and registered.
    TargetSpawned { target: TargetId, color: ColorId },
    /// A target took damage and survived.
    TargetDamaged {
        target: TargetId,
        amount: f64,
        remaining: f64,
    },
    /// A target's health reached zero. Emitted before the entity is removed.
    TargetDestroyed { target: TargetId, color: ColorId },
    /// A firing unit was created and registered.
    UnitSpawned {
        unit: UnitId,
        color: ColorId,
        ammo: u32,
    },
    /// A firing unit took a shot.
    UnitFired {
        unit: UnitId,
        target: TargetId,
        remaining_ammo: u32,
    },
    /// A firing unit ran out of ammo and was retired.
    UnitExhausted { unit: UnitId },
    /// A projectile's flight ended.
    ProjectileResolved {
        target: Option<TargetId>,
        color: ColorId,
        resolution: Resolution,
    },
}
