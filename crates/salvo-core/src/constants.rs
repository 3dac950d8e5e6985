//! Simulation constants and tuning defaults.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick at the default tick rate.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Projectile pool ---

/// Inactive instances created per palette color at startup.
pub const POOL_INITIAL_SIZE: usize = 10;

/// Maximum inactive instances kept per color; surplus is disposed.
pub const POOL_MAX_SIZE: usize = 30;

// --- Fire control ---

/// Interval between fire-control passes (seconds).
pub const FIRE_CHECK_INTERVAL_SECS: f64 = 0.2;

/// Delay before the first fire-control pass (seconds).
pub const FIRE_CHECK_START_DELAY_SECS: f64 = 0.0;

// --- Cannons ---

/// Cooldown between shots (seconds).
pub const CANNON_FIRE_RATE_SECS: f64 = 1.0;

/// Turret turn rate (degrees per second).
pub const CANNON_ROTATION_SPEED_DEG: f64 = 360.0;

/// Maximum aim error for a shot (degrees).
pub const CANNON_AIM_TOLERANCE_DEG: f64 = 5.0;

/// Muzzle distance ahead of the turret pivot.
pub const CANNON_FIRE_POINT_OFFSET: f64 = 0.0;

// --- Projectiles ---

/// Damage dealt on hit.
pub const PROJECTILE_DAMAGE: f64 = 50.0;

/// Flight speed (world units per second).
pub const PROJECTILE_SPEED: f64 = 10.0;

/// Distance at which a projectile counts as hitting its target.
pub const PROJECTILE_HIT_RADIUS: f64 = 0.5;

/// Projectile lifetime before self-destruct (seconds).
pub const PROJECTILE_SELF_DESTRUCT_SECS: f64 = 5.0;

// --- Targets ---

/// Health of a freshly spawned body segment.
pub const TARGET_MAX_HEALTH: f64 = 100.0;

// --- Viewport ---

/// Fraction of the viewport on each side in which targets are not engaged.
pub const VIEWPORT_INSET: f64 = 0.1;

/// Half the visible world height of the orthographic camera.
pub const VIEWPORT_HALF_HEIGHT: f64 = 10.0;

/// Viewport width / height (portrait).
pub const VIEWPORT_ASPECT: f64 = 9.0 / 16.0;

/// Camera distance in front of the play plane (camera sits at z = -depth).
pub const VIEWPORT_CAMERA_DEPTH: f64 = 10.0;
