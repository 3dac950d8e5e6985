//! Scenario scripts: an optional seeded body chain plus commands issued at
//! scheduled ticks. Loaded from JSON by the headless runner.

use std::path::Path;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use salvo_core::color::ColorId;
use salvo_core::commands::{EngineCommand, UnitRequest};
use salvo_core::config::ConfigError;
use salvo_core::types::Position;

use crate::engine::CombatEngine;

/// Commands issued together at one tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptEntry {
    pub at_tick: u64,
    pub commands: Vec<EngineCommand>,
    #[serde(skip)]
    pub issued: bool,
}

/// A straight chain of segments with colors drawn from a seeded RNG.
/// Same seed, same chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainLayout {
    pub seed: u64,
    pub segments: usize,
    pub colors: Vec<ColorId>,
    /// Position of the first segment.
    pub start: Position,
    /// Distance between consecutive segments.
    pub spacing: f64,
    /// Direction the chain extends in, degrees clockwise from +y.
    #[serde(default)]
    pub direction_deg: f64,
    #[serde(default)]
    pub max_health: Option<f64>,
}

impl ChainLayout {
    /// Spawn commands for every segment, head first.
    pub fn commands(&self) -> Vec<EngineCommand> {
        if self.colors.is_empty() {
            return Vec::new();
        }
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        (0..self.segments)
            .map(|i| {
                let color = self.colors[rng.gen_range(0..self.colors.len())];
                let along = Position::planar(0.0, self.spacing * i as f64);
                EngineCommand::SpawnTarget {
                    color,
                    position: self.start.offset_by_heading(&along, self.direction_deg),
                    max_health: self.max_health,
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub name: String,
    /// Suggested run length for headless playback.
    pub ticks: u64,
    /// Spawned before the first scripted entry.
    pub chain: Option<ChainLayout>,
    pub script: Vec<ScriptEntry>,
    #[serde(skip)]
    chain_spawned: bool,
}

impl Scenario {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Built-in demo: a twelve-segment chain in three colors across the
    /// middle of the screen, and two units per color.
    pub fn demo() -> Self {
        let colors = vec![ColorId(0), ColorId(1), ColorId(2)];
        let units = colors
            .iter()
            .flat_map(|&color| [UnitRequest { color, ammo: 4 }; 2])
            .collect();

        Self {
            name: "demo".to_string(),
            ticks: 60 * 20,
            chain: Some(ChainLayout {
                seed: 7,
                segments: 12,
                colors,
                start: Position::planar(-3.0, 2.0),
                spacing: 0.5,
                direction_deg: 90.0,
                max_health: None,
            }),
            script: vec![ScriptEntry {
                at_tick: 0,
                commands: vec![EngineCommand::CreateUnits { units }],
                issued: false,
            }],
            chain_spawned: false,
        }
    }

    /// Number of targets the chain will spawn.
    pub fn chain_len(&self) -> usize {
        self.chain.as_ref().map_or(0, |c| c.segments)
    }

    /// Take every command due at or before `tick`. Each entry is issued once.
    pub fn due(&mut self, tick: u64) -> Vec<EngineCommand> {
        let mut commands = Vec::new();
        if !self.chain_spawned {
            self.chain_spawned = true;
            if let Some(chain) = &self.chain {
                commands.extend(chain.commands());
            }
        }
        for entry in &mut self.script {
            if !entry.issued && entry.at_tick <= tick {
                entry.issued = true;
                commands.extend(entry.commands.iter().cloned());
            }
        }
        commands
    }

    /// Queue whatever is due at the engine's current tick.
    pub fn run(&mut self, engine: &mut CombatEngine) {
        let due = self.due(engine.time().tick);
        if !due.is_empty() {
            engine.queue_commands(due);
        }
    }
}
