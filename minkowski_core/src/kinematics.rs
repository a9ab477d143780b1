//! Special-relativistic kinematics in 1+1 dimensions.
//!
//! Units are chosen so the speed of light is 1: velocities are dimensionless
//! fractions of c, the `y` axis is the time coordinate, and light paths are
//! the ±45° diagonals. Everything here is a pure function.

use crate::error::EngineError;

/// Returns `Ok(())` when `v` is a usable sub-light velocity.
///
/// Rejects `|v| >= 1` and non-finite values. This is the single gate used by
/// frames, objects, and the boost itself, so an invalid velocity is caught
/// where it enters rather than discovered later as a NaN.
pub fn validate_velocity(v: f64) -> Result<(), EngineError> {
    if v.is_finite() && v.abs() < 1.0 {
        Ok(())
    } else {
        Err(EngineError::InvalidVelocity(v))
    }
}

/// Relativistic addition of two collinear velocities.
///
/// `add_velocities(v, u) = (v + u) / (1 + v·u)`.
///
/// For `v, u ∈ (-1, 1)` the result stays strictly inside `(-1, 1)`:
/// sub-light observers can never compose their way to light speed. The
/// identities `add_velocities(v, 0) = v` and `add_velocities(v, -v) = 0`
/// hold to floating tolerance. Callers are responsible for supplying
/// validated velocities; the operation itself has no error path.
pub fn add_velocities(v: f64, u: f64) -> f64 {
    (v + u) / (1.0 + v * u)
}

/// The Lorentz factor `γ = 1 / sqrt(1 - v²)`, diverging as `|v| → 1`.
pub fn gamma(v: f64) -> Result<f64, EngineError> {
    validate_velocity(v)?;
    Ok(1.0 / (1.0 - v * v).sqrt())
}

/// Lorentz boost of the spacetime point `(x, y)` by velocity `v`.
///
/// Returns `(γ·(x − v·y), γ·(y − v·x))` where `y` is the time coordinate.
/// Self-inverse under velocity negation: `boost(boost(x, y, v), -v)`
/// recovers `(x, y)` to floating tolerance.
pub fn boost(x: f64, y: f64, v: f64) -> Result<(f64, f64), EngineError> {
    validate_velocity(v)?;
    Ok(boost_unchecked(x, y, v))
}

/// Boost for velocities already known to be valid.
///
/// Used on the frame-transform path, where every velocity has been validated
/// at construction and relativistic addition keeps compositions sub-light.
pub(crate) fn boost_unchecked(x: f64, y: f64, v: f64) -> (f64, f64) {
    let g = 1.0 / (1.0 - v * v).sqrt();
    (g * (x - v * y), g * (y - v * x))
}
