//! Capability traits for the three entity roles, and their implementations
//! for the concrete components.
//!
//! - [`Hitable`]: something that can be damaged and claimed by one projectile.
//! - [`Fireable`]: something that aims and fires at a [`Hitable`].
//! - [`Bullet`]: a projectile that homes in on a reserved target.
//!
//! All operations are total. Preconditions that do not hold produce a
//! "nothing happened" outcome instead of an error.

use crate::angles::{delta_angle, normalize_degrees, rotate_towards};
use crate::color::ColorId;
use crate::components::{BodySegment, Cannon, HomingProjectile};
use crate::enums::{ProjectilePhase, Resolution, TurretState};
use crate::types::{Position, TargetId, UnitId};

// ---- Hitable ----

/// Result of a damage application.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DamageOutcome {
    /// Target was already dead; nothing changed.
    Ignored,
    /// Health reduced, target still alive.
    Damaged { remaining: f64 },
    /// Health reached zero on this call. Reported exactly once per target.
    Destroyed,
}

pub trait Hitable {
    fn color_id(&self) -> ColorId;
    fn is_alive(&self) -> bool;
    fn is_reserved(&self) -> bool;
    fn take_damage(&mut self, amount: f64) -> DamageOutcome;
    /// Claim the target. Returns false if it was already claimed.
    fn set_reserved(&mut self) -> bool;
    fn clear_reserved(&mut self);
}

impl Hitable for BodySegment {
    fn color_id(&self) -> ColorId {
        self.color
    }

    fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    fn is_reserved(&self) -> bool {
        self.reserved
    }

    fn take_damage(&mut self, amount: f64) -> DamageOutcome {
        if !self.is_alive() {
            return DamageOutcome::Ignored;
        }
        self.health = (self.health - amount.max(0.0)).max(0.0);
        if self.is_alive() {
            DamageOutcome::Damaged {
                remaining: self.health,
            }
        } else {
            // A dead target holds no reservation.
            self.reserved = false;
            DamageOutcome::Destroyed
        }
    }

    fn set_reserved(&mut self) -> bool {
        if self.reserved {
            return false;
        }
        self.reserved = true;
        true
    }

    fn clear_reserved(&mut self) {
        self.reserved = false;
    }
}

// ---- Fireable ----

/// Everything a unit needs to aim at a target for one fire attempt.
#[derive(Debug, Clone, Copy)]
pub struct AimRequest {
    pub target: TargetId,
    /// Unit's own position.
    pub origin: Position,
    pub target_position: Position,
    /// Current simulation time (seconds).
    pub now: f64,
    /// Frame duration used to bound rotation (seconds).
    pub dt: f64,
}

/// Result of a fire attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FireOutcome {
    /// No ammo or still cooling down. Nothing changed.
    Blocked,
    /// Turned toward the target but still outside aim tolerance.
    Aligning { aim_error_deg: f64 },
    /// A shot was taken. `exhausted` is true when it was the last round.
    Fired { exhausted: bool },
}

pub trait Fireable {
    fn color_id(&self) -> ColorId;
    fn remaining_ammo(&self) -> u32;
    fn fire_rate(&self) -> f64;
    fn next_fire_time(&self) -> f64;
    fn can_fire(&self, now: f64) -> bool;
    fn fire(&mut self, request: &AimRequest) -> FireOutcome;
}

impl Fireable for Cannon {
    fn color_id(&self) -> ColorId {
        self.color
    }

    fn remaining_ammo(&self) -> u32 {
        self.ammo
    }

    fn fire_rate(&self) -> f64 {
        self.fire_rate_secs
    }

    fn next_fire_time(&self) -> f64 {
        self.next_fire_time
    }

    fn can_fire(&self, now: f64) -> bool {
        self.ammo > 0 && now >= self.next_fire_time
    }

    fn fire(&mut self, request: &AimRequest) -> FireOutcome {
        if !self.can_fire(request.now) {
            return FireOutcome::Blocked;
        }

        self.current_target = Some(request.target);
        self.rotate_toward(&request.origin, &request.target_position, request.dt);

        let aim_error = self.aim_error(&request.origin, &request.target_position);
        if aim_error.abs() > self.aim_tolerance_deg {
            self.state = TurretState::Aligning;
            return FireOutcome::Aligning {
                aim_error_deg: aim_error,
            };
        }

        self.next_fire_time = request.now + self.fire_rate_secs;
        self.ammo -= 1;
        self.current_target = None;
        self.state = TurretState::Idle;

        FireOutcome::Fired {
            exhausted: self.ammo == 0,
        }
    }
}

impl Cannon {
    /// Signed aim error in degrees, in (-180, 180].
    /// A target on top of the unit has no bearing and counts as aligned.
    pub fn aim_error(&self, origin: &Position, target: &Position) -> f64 {
        if origin.range_to(target) == 0.0 {
            return 0.0;
        }
        delta_angle(self.heading_deg, origin.bearing_to(target))
    }

    /// Turn toward `target` by at most one frame's worth of rotation.
    pub fn rotate_toward(&mut self, origin: &Position, target: &Position, dt: f64) {
        if origin.range_to(target) == 0.0 {
            return;
        }
        let bearing = origin.bearing_to(target);
        self.heading_deg = rotate_towards(self.heading_deg, bearing, self.rotation_speed_deg * dt);
    }

    /// Per-frame turret update toward the current target's position.
    pub fn track(&mut self, origin: &Position, target: &Position, dt: f64) {
        self.rotate_toward(origin, target, dt);
        self.state = if self.aim_error(origin, target).abs() <= self.aim_tolerance_deg {
            TurretState::ReadyToFire
        } else {
            TurretState::Aligning
        };
    }

    /// Forget the current target and return to Idle.
    pub fn clear_target(&mut self) {
        self.current_target = None;
        self.state = TurretState::Idle;
    }

    /// Add rounds. Negative amounts add nothing.
    pub fn add_ammo(&mut self, amount: i64) {
        let amount = u32::try_from(amount.max(0)).unwrap_or(u32::MAX);
        self.ammo = self.ammo.saturating_add(amount);
    }

    /// Switch the matching class. Drops the current target since it no longer matches.
    pub fn set_color(&mut self, color: ColorId) {
        if self.color != color {
            self.color = color;
            self.clear_target();
        }
    }

    pub fn set_heading(&mut self, heading_deg: f64) {
        self.heading_deg = normalize_degrees(heading_deg);
    }

    /// World-space muzzle position for a unit standing at `origin`.
    pub fn muzzle_position(&self, origin: &Position) -> Position {
        origin.offset_by_heading(&self.fire_point, self.heading_deg)
    }
}

// ---- Bullet ----

/// Latest known state of a projectile's target.
#[derive(Debug, Clone, Copy)]
pub struct TargetFix {
    pub position: Position,
    pub alive: bool,
}

/// Result of one tracking step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackStep {
    /// Still closing in.
    Continue,
    /// Within hit radius of a live target.
    Hit,
    /// Target missing or dead.
    Lost,
    /// Projectile is not in flight.
    Idle,
}

pub trait Bullet {
    fn color_id(&self) -> ColorId;
    fn damage(&self) -> f64;
    fn speed(&self) -> f64;
    fn hit_radius(&self) -> f64;
    /// Bind the target and arm the self-destruct timer.
    /// Only valid on an instance fresh from the pool; returns false otherwise.
    fn launch(&mut self, target: TargetId, source: Option<UnitId>) -> bool;
    /// Advance one tick of pure pursuit. `position` is the projectile's own.
    fn track(&mut self, position: &mut Position, target: Option<TargetFix>, dt: f64) -> TrackStep;
    /// Run down the self-destruct timer. Returns true once it has elapsed.
    fn tick_expiry(&mut self, dt: f64) -> bool;
    /// Enter the terminal phase. Returns false if already resolved or never launched.
    fn resolve(&mut self, resolution: Resolution) -> bool;
}

impl HomingProjectile {
    pub fn is_in_flight(&self) -> bool {
        matches!(
            self.phase,
            ProjectilePhase::Launched | ProjectilePhase::Tracking
        )
    }

    /// Pool handout: mark active and ready for a launch.
    pub fn activate(&mut self) {
        self.recycle();
        self.phase = ProjectilePhase::Ready;
    }

    /// Pool return: wipe per-flight state.
    pub fn recycle(&mut self) {
        self.phase = ProjectilePhase::Inactive;
        self.target = None;
        self.source = None;
        self.remaining_secs = 0.0;
        self.resolution = None;
    }
}

impl Bullet for HomingProjectile {
    fn color_id(&self) -> ColorId {
        self.color
    }

    fn damage(&self) -> f64 {
        self.damage
    }

    fn speed(&self) -> f64 {
        self.speed
    }

    fn hit_radius(&self) -> f64 {
        self.hit_radius
    }

    fn launch(&mut self, target: TargetId, source: Option<UnitId>) -> bool {
        if self.phase != ProjectilePhase::Ready {
            return false;
        }
        self.target = Some(target);
        self.source = source;
        self.remaining_secs = self.self_destruct_secs;
        self.resolution = None;
        self.phase = ProjectilePhase::Launched;
        true
    }

    fn track(&mut self, position: &mut Position, target: Option<TargetFix>, dt: f64) -> TrackStep {
        if !self.is_in_flight() {
            return TrackStep::Idle;
        }
        self.phase = ProjectilePhase::Tracking;

        let fix = match target {
            Some(fix) if fix.alive => fix,
            _ => return TrackStep::Lost,
        };

        *position = position.step_toward(&fix.position, self.speed * dt);
        if position.range_to(&fix.position) <= self.hit_radius {
            TrackStep::Hit
        } else {
            TrackStep::Continue
        }
    }

    fn tick_expiry(&mut self, dt: f64) -> bool {
        if !self.is_in_flight() {
            return false;
        }
        self.remaining_secs -= dt;
        self.remaining_secs <= 0.0
    }

    fn resolve(&mut self, resolution: Resolution) -> bool {
        if !self.is_in_flight() {
            return false;
        }
        self.phase = ProjectilePhase::Resolved;
        self.resolution = Some(resolution);
        true
    }
}
