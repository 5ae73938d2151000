//! Wind triangle: true ↔ relative wind
//!
//! Implements the wind conversions of ITTC 7.5-04-01-01.1 (Preparation, Conduct and
//! Analysis of Speed/Power Trials), Annex E.
//!
//! # Conventions
//! - Directions are the direction the wind comes **from**, in radians.
//! - True wind direction `ψ_WT` and heading `ψ` are measured clockwise from north.
//! - Relative wind direction `ψ_WR` is measured clockwise from the bow, so `0` is a head
//!   wind and `π` a following wind.
//!
//! The ship's motion over ground adds an apparent head wind of speed `V_G`:
//! ```text
//! W_R = W_T + V_G·e(ψ)        (vectors of where the wind comes from)
//! ```
//! Both directions of the conversion are obtained from [`find_gamma`] with different
//! argument substitutions, so they are exact algebraic inverses.
//!
//! [`find_gamma`]: super::trig::find_gamma

use serde::{Deserialize, Serialize};

use super::trig::{checked_find_gamma, combine_vectors, law_of_cosines, DEGENERATE_RESULTANT};
use crate::core_types::{AngleRange, REFERENCE_ANEMOMETER_HEIGHT, WIND_PROFILE_EXPONENT};
use crate::error::{ensure_positive, SeaTrialError, SeaTrialResult};

/// A single wind reading: speed (m/s) and the direction it blows from (rad)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WindObservation {
    pub speed: f64,
    pub direction: f64,
}

impl WindObservation {
    pub fn new(speed: f64, direction: f64) -> Self {
        Self { speed, direction }
    }
}

/// Relative wind speed from the true wind
///
/// # Formula
/// ```text
/// V_WR = sqrt(V_WT² + V_G² + 2·V_WT·V_G·cos(ψ_WT - ψ))
/// ```
pub fn relative_wind_speed(
    true_wind_speed: f64,
    speed_over_ground: f64,
    true_wind_direction: f64,
    heading: f64,
) -> f64 {
    law_of_cosines(
        true_wind_speed,
        speed_over_ground,
        true_wind_direction - heading,
    )
}

/// Relative wind direction (from the bow) from the true wind
///
/// # Formula
/// ```text
/// ψ_WR = atan2(V_WT·sin(ψ_WT - ψ), V_G + V_WT·cos(ψ_WT - ψ))
/// ```
///
/// # Errors
/// [`SeaTrialError::UndefinedDirection`] when the relative wind vanishes (the ship runs
/// with the wind at exactly wind speed, or there is neither wind nor motion).
pub fn relative_wind_direction(
    true_wind_speed: f64,
    speed_over_ground: f64,
    true_wind_direction: f64,
    heading: f64,
    range: AngleRange,
) -> SeaTrialResult<f64> {
    let gamma = checked_find_gamma(
        -true_wind_speed,
        speed_over_ground,
        true_wind_direction - heading,
    )?;
    Ok(range.wrap(gamma))
}

/// True wind speed from the relative wind
///
/// The law of cosines with the ship's contribution reversed:
/// ```text
/// V_WT = sqrt(V_WR² + V_G² - 2·V_WR·V_G·cos(ψ_WR))
/// ```
pub fn true_wind_speed(
    relative_wind_speed: f64,
    speed_over_ground: f64,
    relative_wind_direction: f64,
) -> f64 {
    law_of_cosines(
        relative_wind_speed,
        -speed_over_ground,
        relative_wind_direction,
    )
}

/// True wind direction (from north) from the relative wind
///
/// # Formula
/// ```text
/// ψ_WT = ψ + atan2(V_WR·sin(ψ_WR), V_WR·cos(ψ_WR) - V_G)
/// ```
///
/// # Errors
/// [`SeaTrialError::UndefinedDirection`] when the true wind speed is zero: the relative
/// wind is then exactly the ship's own head wind and carries no direction.
pub fn true_wind_direction(
    relative_wind_speed: f64,
    speed_over_ground: f64,
    relative_wind_direction: f64,
    heading: f64,
    range: AngleRange,
) -> SeaTrialResult<f64> {
    let gamma = checked_find_gamma(
        -relative_wind_speed,
        -speed_over_ground,
        relative_wind_direction,
    )?;
    Ok(range.wrap(heading + gamma))
}

/// Resolve a relative wind reading into the true wind
///
/// # Errors
/// See [`true_wind_direction`].
pub fn true_wind(
    relative: WindObservation,
    speed_over_ground: f64,
    heading: f64,
    range: AngleRange,
) -> SeaTrialResult<WindObservation> {
    Ok(WindObservation {
        speed: true_wind_speed(relative.speed, speed_over_ground, relative.direction),
        direction: true_wind_direction(
            relative.speed,
            speed_over_ground,
            relative.direction,
            heading,
            range,
        )?,
    })
}

/// Resolve a true wind into the wind felt on board
///
/// # Errors
/// See [`relative_wind_direction`].
pub fn relative_wind(
    true_wind: WindObservation,
    speed_over_ground: f64,
    heading: f64,
    range: AngleRange,
) -> SeaTrialResult<WindObservation> {
    Ok(WindObservation {
        speed: relative_wind_speed(
            true_wind.speed,
            speed_over_ground,
            true_wind.direction,
            heading,
        ),
        direction: relative_wind_direction(
            true_wind.speed,
            speed_over_ground,
            true_wind.direction,
            heading,
            range,
        )?,
    })
}

/// Vector mean of two wind readings, e.g. from the two legs of a double run
///
/// The polar vectors are summed and the resultant halved, so a bias that reverses with
/// the heading cancels. The halved magnitude is the magnitude of the mean vector, which is
/// smaller than the mean of the two speeds whenever the directions differ.
///
/// # Errors
/// [`SeaTrialError::UndefinedDirection`] when the two readings cancel.
pub fn double_run_average(
    first: WindObservation,
    second: WindObservation,
    range: AngleRange,
) -> SeaTrialResult<WindObservation> {
    let (magnitude, angle) = combine_vectors(
        first.speed,
        second.speed,
        first.direction,
        second.direction,
    );
    if !magnitude.is_finite()
        || magnitude <= DEGENERATE_RESULTANT * (first.speed.abs() + second.speed.abs())
    {
        return Err(SeaTrialError::UndefinedDirection {
            quantity: "double run wind direction",
        });
    }
    Ok(WindObservation {
        speed: magnitude / 2.0,
        direction: range.wrap(angle),
    })
}

/// Correct a wind speed measured at `measured_height` to `reference_height`
///
/// # Formula
/// ```text
/// V_ref = V · (z_ref / z)^(1/9)
/// ```
///
/// # Errors
/// [`SeaTrialError::Domain`] for non-positive heights.
pub fn vertical_position_anemometer(
    true_wind_speed: f64,
    reference_height: f64,
    measured_height: f64,
    exponent: f64,
) -> SeaTrialResult<f64> {
    let reference_height = ensure_positive("reference height", reference_height)?;
    let measured_height = ensure_positive("anemometer height", measured_height)?;
    Ok(true_wind_speed * (reference_height / measured_height).powf(exponent))
}

/// [`vertical_position_anemometer`] with the ITTC reference height (10 m) and exponent (1/9)
///
/// # Errors
/// [`SeaTrialError::Domain`] for a non-positive anemometer height.
pub fn wind_speed_at_reference_height(
    true_wind_speed: f64,
    measured_height: f64,
) -> SeaTrialResult<f64> {
    vertical_position_anemometer(
        true_wind_speed,
        REFERENCE_ANEMOMETER_HEIGHT,
        measured_height,
        WIND_PROFILE_EXPONENT,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::angle_difference;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    #[test]
    fn test_head_wind_adds_ship_speed() {
        let speed = relative_wind_speed(10.0, 5.0, 0.0, 0.0);
        let direction = relative_wind_direction(10.0, 5.0, 0.0, 0.0, AngleRange::Positive);
        assert_abs_diff_eq!(speed, 15.0, epsilon = 1e-12);
        assert_abs_diff_eq!(direction.unwrap(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_following_wind() {
        let speed = relative_wind_speed(10.0, 5.0, PI, 0.0);
        let direction = relative_wind_direction(10.0, 5.0, PI, 0.0, AngleRange::Positive)
            .unwrap();
        assert_abs_diff_eq!(speed, 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(angle_difference(direction, PI), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_beam_wind_moves_forward() {
        // Wind from the east on a ship heading north comes over the starboard bow
        let speed = relative_wind_speed(5.0, 5.0, FRAC_PI_2, 0.0);
        let direction =
            relative_wind_direction(5.0, 5.0, FRAC_PI_2, 0.0, AngleRange::Positive).unwrap();
        assert_abs_diff_eq!(speed, 50.0_f64.sqrt(), epsilon = 1e-12);
        assert_abs_diff_eq!(direction, FRAC_PI_4, epsilon = 1e-12);
    }

    #[test]
    fn test_port_side_wind_signed_and_positive() {
        // Wind from the west on a northbound ship comes over the port bow
        let signed =
            relative_wind_direction(5.0, 5.0, 1.5 * PI, 0.0, AngleRange::Signed).unwrap();
        let positive =
            relative_wind_direction(5.0, 5.0, 1.5 * PI, 0.0, AngleRange::Positive).unwrap();
        assert_abs_diff_eq!(signed, -FRAC_PI_4, epsilon = 1e-12);
        assert_abs_diff_eq!(positive, 2.0 * PI - FRAC_PI_4, epsilon = 1e-12);
    }

    #[test]
    fn test_relative_to_true_round_trip() {
        let (v_wt, v_g, psi_wt, psi) = (12.0, 7.5, 4.1, 0.6);
        let relative = relative_wind(
            WindObservation::new(v_wt, psi_wt),
            v_g,
            psi,
            AngleRange::Positive,
        )
        .unwrap();
        let recovered = true_wind(relative, v_g, psi, AngleRange::Positive).unwrap();
        assert_relative_eq!(recovered.speed, v_wt, max_relative = 1e-12);
        assert_abs_diff_eq!(recovered.direction, psi_wt, epsilon = 1e-12);
    }

    #[test]
    fn test_calm_air_gives_undefined_true_direction() {
        // 8 m/s dead ahead on a ship making 8 m/s is just the ship's own wind
        assert_abs_diff_eq!(true_wind_speed(8.0, 8.0, 0.0), 0.0, epsilon = 1e-12);
        let err = true_wind_direction(8.0, 8.0, 0.0, 1.0, AngleRange::Positive).unwrap_err();
        assert!(matches!(err, SeaTrialError::UndefinedDirection { .. }));
    }

    #[test]
    fn test_zero_true_wind_still_has_relative_direction() {
        let direction =
            relative_wind_direction(0.0, 6.0, 2.0, 1.0, AngleRange::Positive).unwrap();
        assert_abs_diff_eq!(direction, 0.0, epsilon = 1e-12);
        assert!(relative_wind_direction(0.0, 0.0, 2.0, 1.0, AngleRange::Positive).is_err());
    }

    #[test]
    fn test_double_run_average_cancels_reversing_bias() {
        // Same 10 m/s wind read with a ±1 m/s cross bias that flips with the heading
        let first = WindObservation::new(101.0_f64.sqrt(), 1.0_f64.atan2(10.0));
        let second = WindObservation::new(101.0_f64.sqrt(), (-1.0_f64).atan2(10.0));
        let mean = double_run_average(first, second, AngleRange::Positive).unwrap();
        assert_abs_diff_eq!(mean.speed, 10.0, epsilon = 1e-12);
        assert_abs_diff_eq!(mean.direction, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_double_run_average_identical_readings() {
        let reading = WindObservation::new(9.0, 1.2);
        let mean = double_run_average(reading, reading, AngleRange::Positive).unwrap();
        assert_abs_diff_eq!(mean.speed, 9.0, epsilon = 1e-12);
        assert_abs_diff_eq!(mean.direction, 1.2, epsilon = 1e-12);
    }

    #[test]
    fn test_double_run_average_opposed_readings() {
        let first = WindObservation::new(4.0, 0.0);
        let second = WindObservation::new(4.0, PI);
        assert!(double_run_average(first, second, AngleRange::Positive).is_err());
    }

    #[test]
    fn test_vertical_position_anemometer() {
        let corrected = vertical_position_anemometer(20.0, 10.0, 40.0, 1.0 / 9.0).unwrap();
        assert_relative_eq!(corrected, 20.0 * 0.25_f64.powf(1.0 / 9.0), max_relative = 1e-12);
        assert!(corrected > 17.1 && corrected < 17.2);
        assert_eq!(wind_speed_at_reference_height(20.0, 10.0).unwrap(), 20.0);
        assert!(vertical_position_anemometer(20.0, 10.0, 0.0, 1.0 / 9.0).is_err());
    }
}
