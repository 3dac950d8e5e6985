//! Core types and definitions for the Salvo combat engine.
//!
//! This crate defines the vocabulary shared across the other crates:
//! components, capability traits, commands, snapshots, events, configuration
//! and constants. It has no dependency on the ECS or any runtime loop.

pub mod angles;
pub mod capabilities;
pub mod color;
pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod events;
pub mod state;
pub mod types;
pub mod visibility;
