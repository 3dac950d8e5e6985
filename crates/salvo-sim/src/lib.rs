//! Combat engine for Salvo.
//!
//! Owns the hecs ECS world, the target registry and the projectile pool,
//! runs fire control and projectile tracking at a fixed tick rate, and
//! produces `CombatSnapshot`s for the outside world.

pub mod context;
pub mod engine;
pub mod pool;
pub mod registry;
pub mod scenario;
pub mod schedule;
pub mod systems;
pub mod world_setup;

pub use engine::CombatEngine;
pub use salvo_core as core;

#[cfg(test)]
mod tests;
