//! Combat loop thread: runs the engine at its fixed tick rate and streams
//! snapshots.
//!
//! The engine is created inside this thread. Commands arrive via an `mpsc`
//! channel; snapshots leave through another one.

use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use log::{debug, info};
use serde::Serialize;

use salvo_core::config::CombatConfig;
use salvo_core::enums::Resolution;
use salvo_core::events::CombatEvent;
use salvo_core::state::CombatSnapshot;
use salvo_sim::scenario::Scenario;
use salvo_sim::CombatEngine;

use crate::state::LoopCommand;

/// How the loop spaces ticks in wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pacing {
    /// One tick per nominal tick duration, divided by the time scale.
    RealTime { time_scale: f64 },
    /// No sleeping between ticks.
    AsFastAsPossible,
}

pub struct LoopSettings {
    pub config: CombatConfig,
    pub scenario: Scenario,
    pub max_ticks: u64,
    pub pacing: Pacing,
}

/// Totals accumulated over a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoopSummary {
    pub ticks: u64,
    pub shots_fired: u64,
    pub hits: u64,
    pub misses: u64,
    pub targets_destroyed: u64,
    pub units_exhausted: u64,
    pub targets_remaining: usize,
    pub units_remaining: usize,
}

impl LoopSummary {
    pub fn record(&mut self, snapshot: &CombatSnapshot) {
        self.ticks = snapshot.time.tick;
        for event in &snapshot.events {
            match event {
                CombatEvent::UnitFired { .. } => self.shots_fired += 1,
                CombatEvent::UnitExhausted { .. } => self.units_exhausted += 1,
                CombatEvent::TargetDestroyed { .. } => self.targets_destroyed += 1,
                CombatEvent::ProjectileResolved { resolution, .. } => match resolution {
                    Resolution::Hit => self.hits += 1,
                    Resolution::TargetLost | Resolution::Expired => self.misses += 1,
                },
                _ => {}
            }
        }
    }

    fn finish(mut self, engine: &CombatEngine) -> Self {
        self.targets_remaining = engine.live_targets();
        self.units_remaining = engine.active_units();
        self
    }
}

/// Nominal duration of one tick, sped up by `time_scale`.
pub fn tick_duration(tick_rate: u32, time_scale: f64) -> Duration {
    let nominal = Duration::from_nanos(1_000_000_000 / u64::from(tick_rate.max(1)));
    if time_scale > 0.001 {
        nominal.div_f64(time_scale)
    } else {
        nominal
    }
}

/// Spawns the combat loop in a new thread.
///
/// Returns the command sender and a handle that yields the run summary.
pub fn spawn_combat_loop(
    settings: LoopSettings,
    snapshot_tx: Option<mpsc::Sender<CombatSnapshot>>,
) -> std::io::Result<(mpsc::Sender<LoopCommand>, JoinHandle<LoopSummary>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<LoopCommand>();

    let handle = std::thread::Builder::new()
        .name("salvo-combat-loop".into())
        .spawn(move || run_combat_loop(settings, cmd_rx, snapshot_tx))?;

    Ok((cmd_tx, handle))
}

/// The combat loop. Runs until `max_ticks`, a Shutdown command, or channel
/// disconnect.
pub fn run_combat_loop(
    settings: LoopSettings,
    cmd_rx: mpsc::Receiver<LoopCommand>,
    mut snapshot_tx: Option<mpsc::Sender<CombatSnapshot>>,
) -> LoopSummary {
    let LoopSettings {
        config,
        mut scenario,
        max_ticks,
        pacing,
    } = settings;

    let step = match pacing {
        Pacing::RealTime { time_scale } => Some(tick_duration(config.tick_rate, time_scale)),
        Pacing::AsFastAsPossible => None,
    };
    let mut engine = CombatEngine::new(config);
    let mut summary = LoopSummary::default();
    let mut next_tick_time = Instant::now();

    while summary.ticks < max_ticks {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(LoopCommand::Engine(cmd)) => engine.queue_command(cmd),
                Ok(LoopCommand::Shutdown) => {
                    info!("combat loop shut down at tick {}", summary.ticks);
                    return summary.finish(&engine);
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    debug!("command channel closed, stopping combat loop");
                    return summary.finish(&engine);
                }
            }
        }

        // 2. Scripted commands due this tick
        scenario.run(&mut engine);

        // 3. Advance one tick
        let snapshot = engine.tick();
        summary.record(&snapshot);

        // 4. Publish; a dropped receiver just stops publishing
        if let Some(tx) = &snapshot_tx {
            if tx.send(snapshot).is_err() {
                debug!("snapshot receiver gone");
                snapshot_tx = None;
            }
        }

        // 5. Sleep until next tick
        if let Some(step) = step {
            next_tick_time += step;
            let now = Instant::now();
            if next_tick_time > now {
                std::thread::sleep(next_tick_time - now);
            } else if now - next_tick_time > step * 2 {
                // Too far behind: reset to avoid a catch-up spiral
                next_tick_time = now;
            }
        }
    }

    info!("combat loop finished after {} ticks", summary.ticks);
    summary.finish(&engine)
}
