/// Full turn in degrees.
pub const FULL_TURN_DEG: f64 = 360.0;

/// Euclidean modulo for floating-point numbers, the result carries the sign of `b`.
pub fn fmod_f64(a: f64, b: f64) -> f64 { ((a % b) + b) % b }

/// Wraps an angle in degrees into `[0, 360)`.
///
/// Tiny negative inputs can round up to exactly `360.0` in `fmod_f64`; those are
/// folded back onto `0.0` so the half-open interval holds.
pub fn wrap_degrees(angle_deg: f64) -> f64 {
    let wrapped = fmod_f64(angle_deg, FULL_TURN_DEG);
    if wrapped >= FULL_TURN_DEG { 0.0 } else { wrapped }
}

