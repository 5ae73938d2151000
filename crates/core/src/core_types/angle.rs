//! Angle wrapping policy
//!
//! Two representations of a direction coexist: the signed angle in (−π, π] that
//! `atan2` returns, and the constrained-positive angle in [0, 2π) that compass
//! bearings use. Every direction-producing function takes an [`AngleRange`] and
//! returns its result in that representation.

use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};

/// Output range of a direction-producing function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AngleRange {
    /// (−π, π], the raw `atan2` convention
    Signed,
    /// [0, 2π)
    #[default]
    Positive,
}

impl AngleRange {
    /// Wrap any finite angle into this range.
    ///
    /// NaN passes through unchanged so batch results keep their undefined markers.
    #[inline]
    pub fn wrap(self, angle: f64) -> f64 {
        let turn = angle.rem_euclid(TAU);
        let signed = if turn > PI { turn - TAU } else { turn };
        match self {
            AngleRange::Signed => signed,
            AngleRange::Positive => {
                let positive = if signed < 0.0 { signed + TAU } else { signed };
                // -1e-17 + 2π rounds to 2π
                if positive >= TAU {
                    0.0
                } else {
                    positive
                }
            }
        }
    }
}

/// Smallest signed difference `a - b`, in (−π, π].
#[inline]
pub fn angle_difference(a: f64, b: f64) -> f64 {
    AngleRange::Signed.wrap(a - b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_positive_wrap() {
        assert_abs_diff_eq!(AngleRange::Positive.wrap(-PI / 2.0), 1.5 * PI, epsilon = 1e-12);
        assert_abs_diff_eq!(AngleRange::Positive.wrap(5.0 * PI), PI, epsilon = 1e-12);
        assert_eq!(AngleRange::Positive.wrap(0.0), 0.0);
        assert_eq!(AngleRange::Positive.wrap(-1e-17), 0.0);
    }

    #[test]
    fn test_signed_wrap() {
        assert_abs_diff_eq!(AngleRange::Signed.wrap(1.5 * PI), -PI / 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(AngleRange::Signed.wrap(PI), PI, epsilon = 1e-12);
        assert_abs_diff_eq!(AngleRange::Signed.wrap(-PI), PI, epsilon = 1e-12);
    }

    #[test]
    fn test_default_is_positive() {
        assert_eq!(AngleRange::default(), AngleRange::Positive);
    }

    #[test]
    fn test_nan_passes_through() {
        assert!(AngleRange::Positive.wrap(f64::NAN).is_nan());
        assert!(AngleRange::Signed.wrap(f64::NAN).is_nan());
    }

    #[test]
    fn test_angle_difference_across_north() {
        assert_abs_diff_eq!(angle_difference(0.1, TAU - 0.1), 0.2, epsilon = 1e-12);
        assert_abs_diff_eq!(angle_difference(TAU - 0.1, 0.1), -0.2, epsilon = 1e-12);
    }
}
