//! Engine configuration, loadable from JSON.
//!
//! Every field has a default (see [`crate::constants`]), so a config file
//! only needs to name what it overrides.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::{ColorEntry, ColorRegistry};
use crate::components::ProjectileTemplate;
use crate::constants::*;
use crate::types::Position;

/// Errors raised while loading or validating a [`CombatConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Simulation ticks per second.
    pub tick_rate: u32,
    pub pool: PoolConfig,
    pub fire_control: FireControlConfig,
    pub cannon: CannonConfig,
    pub projectile: ProjectileConfig,
    pub target: TargetConfig,
    pub viewport: ViewportConfig,
    /// Color palette. Pools are pre-warmed for each entry.
    pub palette: Vec<ColorEntry>,
    /// Unit spawn points, used round-robin.
    pub spawn_points: Vec<SpawnPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    pub initial_size: usize,
    pub max_size: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FireControlConfig {
    pub check_interval_secs: f64,
    pub start_delay_secs: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CannonConfig {
    pub fire_rate_secs: f64,
    pub rotation_speed_deg: f64,
    pub aim_tolerance_deg: f64,
    /// Muzzle distance ahead of the pivot along the heading.
    pub fire_point_offset: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    pub damage: f64,
    pub speed: f64,
    pub hit_radius: f64,
    pub self_destruct_secs: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    pub max_health: f64,
}

/// Orthographic camera looking down +z at the play plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub camera: Position,
    pub half_height: f64,
    pub aspect: f64,
    /// Margin on each side, as a fraction of the viewport.
    pub inset: f64,
}

/// Where a unit is placed and which way it initially faces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub position: Position,
    #[serde(default)]
    pub heading_deg: f64,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            tick_rate: TICK_RATE,
            pool: PoolConfig::default(),
            fire_control: FireControlConfig::default(),
            cannon: CannonConfig::default(),
            projectile: ProjectileConfig::default(),
            target: TargetConfig::default(),
            viewport: ViewportConfig::default(),
            palette: ColorRegistry::default_palette(),
            spawn_points: Vec::new(),
        }
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            initial_size: POOL_INITIAL_SIZE,
            max_size: POOL_MAX_SIZE,
        }
    }
}

impl Default for FireControlConfig {
    fn default() -> Self {
        Self {
            check_interval_secs: FIRE_CHECK_INTERVAL_SECS,
            start_delay_secs: FIRE_CHECK_START_DELAY_SECS,
        }
    }
}

impl Default for CannonConfig {
    fn default() -> Self {
        Self {
            fire_rate_secs: CANNON_FIRE_RATE_SECS,
            rotation_speed_deg: CANNON_ROTATION_SPEED_DEG,
            aim_tolerance_deg: CANNON_AIM_TOLERANCE_DEG,
            fire_point_offset: CANNON_FIRE_POINT_OFFSET,
        }
    }
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            damage: PROJECTILE_DAMAGE,
            speed: PROJECTILE_SPEED,
            hit_radius: PROJECTILE_HIT_RADIUS,
            self_destruct_secs: PROJECTILE_SELF_DESTRUCT_SECS,
        }
    }
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            max_health: TARGET_MAX_HEALTH,
        }
    }
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            camera: Position::new(0.0, 0.0, -VIEWPORT_CAMERA_DEPTH),
            half_height: VIEWPORT_HALF_HEIGHT,
            aspect: VIEWPORT_ASPECT,
            inset: VIEWPORT_INSET,
        }
    }
}

impl ProjectileConfig {
    pub fn template(&self) -> ProjectileTemplate {
        ProjectileTemplate {
            damage: self.damage,
            speed: self.speed,
            hit_radius: self.hit_radius,
            self_destruct_secs: self.self_destruct_secs,
        }
    }
}

impl CombatConfig {
    /// Seconds per tick.
    pub fn dt(&self) -> f64 {
        1.0 / self.tick_rate.max(1) as f64
    }

    /// Parse and validate a JSON config document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: CombatConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
            ConfigError::Invalid {
                field,
                reason: reason.into(),
            }
        }
        fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(invalid(field, format!("must be positive, got {value}")))
            }
        }
        fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(invalid(field, format!("must be >= 0, got {value}")))
            }
        }

        if self.tick_rate == 0 {
            return Err(invalid("tick_rate", "must be at least 1"));
        }
        if self.pool.initial_size > self.pool.max_size {
            return Err(invalid(
                "pool.initial_size",
                format!(
                    "{} exceeds pool.max_size {}",
                    self.pool.initial_size, self.pool.max_size
                ),
            ));
        }
        positive(
            "fire_control.check_interval_secs",
            self.fire_control.check_interval_secs,
        )?;
        non_negative(
            "fire_control.start_delay_secs",
            self.fire_control.start_delay_secs,
        )?;
        non_negative("cannon.fire_rate_secs", self.cannon.fire_rate_secs)?;
        positive("cannon.rotation_speed_deg", self.cannon.rotation_speed_deg)?;
        non_negative("cannon.aim_tolerance_deg", self.cannon.aim_tolerance_deg)?;
        non_negative("projectile.damage", self.projectile.damage)?;
        positive("projectile.speed", self.projectile.speed)?;
        non_negative("projectile.hit_radius", self.projectile.hit_radius)?;
        positive(
            "projectile.self_destruct_secs",
            self.projectile.self_destruct_secs,
        )?;
        positive("target.max_health", self.target.max_health)?;
        positive("viewport.half_height", self.viewport.half_height)?;
        positive("viewport.aspect", self.viewport.aspect)?;
        if !(0.0..0.5).contains(&self.viewport.inset) {
            return Err(invalid(
                "viewport.inset",
                format!("must be in [0, 0.5), got {}", self.viewport.inset),
            ));
        }

        let mut seen = HashSet::new();
        for entry in &self.palette {
            if !seen.insert(entry.id) {
                return Err(invalid("palette", format!("duplicate color id {}", entry.id)));
            }
        }
        Ok(())
    }
}
