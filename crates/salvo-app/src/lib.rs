//! Salvo headless runner.
//!
//! Drives a combat engine on its own thread at the configured tick rate,
//! feeds it scenario commands and streams snapshots back to the caller.

pub mod game_loop;
pub mod options;
pub mod state;

pub use salvo_core as core;
