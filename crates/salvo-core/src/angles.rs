//! Heading arithmetic in degrees.
//!
//! Headings follow the bearing convention of [`Position::bearing_to`]:
//! 0 = +y, increasing clockwise.
//!
//! [`Position::bearing_to`]: crate::types::Position::bearing_to

/// Wrap an angle into [0, 360).
pub fn normalize_degrees(angle: f64) -> f64 {
    angle.rem_euclid(360.0)
}

/// Shortest signed difference from `from` to `to`, in (-180, 180].
pub fn delta_angle(from: f64, to: f64) -> f64 {
    let delta = (to - from).rem_euclid(360.0);
    if delta > 180.0 {
        delta - 360.0
    } else {
        delta
    }
}

/// Rotate `current` toward `target` by at most `max_delta` degrees.
/// Returns the new heading in [0, 360).
pub fn rotate_towards(current: f64, target: f64, max_delta: f64) -> f64 {
    let delta = delta_angle(current, target);
    if delta.abs() <= max_delta {
        normalize_degrees(target)
    } else {
        normalize_degrees(current + max_delta.max(0.0) * delta.signum())
    }
}
