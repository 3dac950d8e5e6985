//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Firing unit aiming state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurretState {
    /// No current target.
    #[default]
    Idle,
    /// Rotating toward a candidate target, aim error above tolerance.
    Aligning,
    /// Within aim tolerance of the current target.
    ReadyToFire,
}

/// Projectile lifecycle phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectilePhase {
    /// Parked in the pool.
    #[default]
    Inactive,
    /// Handed out by the pool, not yet bound to a target.
    Ready,
    /// Bound to a target, first tracking step pending.
    Launched,
    /// Homing toward the target.
    Tracking,
    /// Terminal. Waiting to be returned to the pool.
    Resolved,
}

/// How a projectile's flight ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    /// Reached hit radius and applied damage.
    Hit,
    /// Target died or vanished before contact.
    TargetLost,
    /// Self-destruct timer elapsed.
    Expired,
}
