//! Messages exchanged between the runner and the combat loop thread.

use salvo_core::commands::EngineCommand;

/// Commands sent to the combat loop thread.
#[derive(Debug)]
pub enum LoopCommand {
    /// Forward a command to the combat engine.
    Engine(EngineCommand),
    /// Stop the loop after the current tick.
    Shutdown,
}
