//! Systems that operate on the combat context each tick.
//!
//! Per-tick order: fire control (when its cadence is due), turret tracking,
//! then projectile tracking in launch order.

pub mod damage;
pub mod fire_control;
pub mod projectile;
pub mod snapshot;
pub mod turret;
