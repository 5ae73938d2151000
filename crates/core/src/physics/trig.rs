//! Trigonometric primitives of the wind triangle
//!
//! Every direction conversion in [`super::wind`] is a specialisation of
//! [`find_gamma`]: the angle of the resultant of a polar vector and a speed along the
//! reference axis. Using `atan2` on the two components resolves the quadrant and avoids
//! the cancellation the direct `arctan(opposite / adjacent)` form suffers near 0 and π.
//!
//! # Conventions
//! ```text
//! opposite = -m·sin(θ)
//! adjacent = V_ref - m·cos(θ)
//! γ        = atan2(opposite, adjacent)
//! ```

use nalgebra::Vector2;

use crate::error::{SeaTrialError, SeaTrialResult};

/// Relative size of a resultant below which its direction is treated as undefined.
pub(crate) const DEGENERATE_RESULTANT: f64 = 4.0 * f64::EPSILON;

/// Third side of a triangle from two sides and the angle between their directions
///
/// # Formula
/// ```text
/// c = sqrt(a² + b² + 2·a·b·cos(θ))
/// ```
///
/// With `θ = 0` the two vectors point the same way and `c = a + b`. The result always
/// lies in `[|a - b|, a + b]` and is symmetric in `a` and `b`.
///
/// # Example
/// ```
/// use seatrial_core::physics::trig::law_of_cosines;
///
/// let c = law_of_cosines(10.0, 5.0, std::f64::consts::FRAC_PI_2);
/// assert!((c - 125.0_f64.sqrt()).abs() < 1e-12);
/// ```
#[inline]
pub fn law_of_cosines(a: f64, b: f64, angle_between: f64) -> f64 {
    let squared = a * a + b * b + 2.0 * a * b * angle_between.cos();
    // Rounding can push a² + b² - 2ab slightly below zero when a ≈ b and θ ≈ π.
    // NaN must pass through, so no `f64::max` here.
    if squared < 0.0 {
        0.0
    } else {
        squared.sqrt()
    }
}

/// Component of a polar vector perpendicular to the reference axis: `-m·sin(θ)`
#[inline]
pub fn opposite_magnitude(magnitude: f64, angle: f64) -> f64 {
    -magnitude * angle.sin()
}

/// Component along the reference axis, offset by a reference speed: `V_ref - m·cos(θ)`
#[inline]
pub fn adjacent_magnitude(magnitude: f64, angle: f64, reference_speed: f64) -> f64 {
    reference_speed - magnitude * angle.cos()
}

/// Angle of the resultant vector, raw `atan2` output in (−π, π]
///
/// A zero resultant returns `atan2(0, 0) = 0`; use [`checked_find_gamma`] when that
/// case has to be rejected.
#[inline]
pub fn find_gamma(magnitude: f64, reference_speed: f64, angle: f64) -> f64 {
    let opposite = opposite_magnitude(magnitude, angle);
    opposite.atan2(adjacent_magnitude(magnitude, angle, reference_speed))
}

/// [`find_gamma`] that refuses to return a direction for a zero-length resultant
///
/// # Errors
/// [`SeaTrialError::UndefinedDirection`] when the resultant vanishes (relative to the
/// input magnitudes), and [`SeaTrialError::Domain`] for non-finite inputs.
pub fn checked_find_gamma(
    magnitude: f64,
    reference_speed: f64,
    angle: f64,
) -> SeaTrialResult<f64> {
    if !(magnitude.is_finite() && reference_speed.is_finite() && angle.is_finite()) {
        return Err(SeaTrialError::domain("direction", "inputs must be finite"));
    }
    let opposite = opposite_magnitude(magnitude, angle);
    let adjacent = adjacent_magnitude(magnitude, angle, reference_speed);
    resolve_angle(opposite, adjacent, magnitude.abs() + reference_speed.abs())
}

/// Sum of two polar vectors `a∠α + b∠β`
///
/// Returns the magnitude of the sum and its raw `atan2` angle.
pub fn combine_vectors(a: f64, b: f64, alpha: f64, beta: f64) -> (f64, f64) {
    let sum = Vector2::new(a * alpha.cos(), a * alpha.sin())
        + Vector2::new(b * beta.cos(), b * beta.sin());
    (sum.norm(), sum.y.atan2(sum.x))
}

/// `atan2(y, x)`, rejecting a resultant that is zero relative to `scale`.
pub(crate) fn resolve_angle(y: f64, x: f64, scale: f64) -> SeaTrialResult<f64> {
    if y.hypot(x) <= DEGENERATE_RESULTANT * scale {
        return Err(SeaTrialError::UndefinedDirection {
            quantity: "wind direction",
        });
    }
    Ok(y.atan2(x))
}
