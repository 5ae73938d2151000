//! Added resistance in waves, STAWAVE-1
//!
//! STAWAVE-1 estimates the mean resistance increase from wave reflection at the bow for
//! ships in short head waves, using only the wave height and the waterline geometry. It
//! is valid when heave and pitch are small, which the ITTC expresses as a limit on the
//! significant wave height, and for waves within ±45° of the bow.
//!
//! # References
//! - ITTC 7.5-04-01-01.1 (2017), Section 10.3.2 and Annex D (eq. 28).

use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_4;

use crate::core_types::{AngleRange, GRAVITY};
use crate::error::{ensure_positive, SeaTrialError, SeaTrialResult};

/// Wave and hull inputs of the STAWAVE-1 formula
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveConditions {
    /// Significant wave height `H_W1/3` (m)
    pub significant_wave_height: f64,
    /// Direction the waves come from, relative to the bow (rad)
    pub relative_wave_direction: f64,
    /// Moulded breadth B (m)
    pub beam: f64,
    /// Length of the bow on the waterline to 95% of maximum breadth `L_BWL` (m)
    pub bow_length: f64,
    /// Length between perpendiculars `L_PP` (m)
    pub length_pp: f64,
    /// Water density (kg/m³)
    pub water_density: f64,
}

/// Largest significant wave height STAWAVE-1 accepts: `2.25·sqrt(L_PP/100)`
pub fn stawave1_wave_height_limit(length_pp: f64) -> f64 {
    2.25 * (length_pp / 100.0).sqrt()
}

/// Mean resistance increase in head waves (N)
///
/// # Formula
/// ```text
/// R_AWL = ρ·g·H²·B·sqrt(B/L_BWL) / 16
/// ```
///
/// # Errors
/// - [`SeaTrialError::OutOfValidityRange`] if the wave height exceeds
///   [`stawave1_wave_height_limit`] or the waves come from more than 45° off the bow.
///   The formula is never extrapolated.
/// - [`SeaTrialError::Domain`] for non-positive geometry or density, a negative wave
///   height, or a non-finite wave direction.
pub fn stawave1(conditions: &WaveConditions) -> SeaTrialResult<f64> {
    let beam = ensure_positive("beam", conditions.beam)?;
    let bow_length = ensure_positive("bow length", conditions.bow_length)?;
    let length_pp = ensure_positive("length between perpendiculars", conditions.length_pp)?;
    let density = ensure_positive("water density", conditions.water_density)?;
    let height = conditions.significant_wave_height;
    if !height.is_finite() || height < 0.0 {
        return Err(SeaTrialError::domain(
            "significant wave height",
            "must be finite and non-negative",
        ));
    }

    if !conditions.relative_wave_direction.is_finite() {
        return Err(SeaTrialError::domain(
            "relative wave direction",
            "must be finite",
        ));
    }

    let limit = stawave1_wave_height_limit(length_pp);
    if height > limit {
        return Err(SeaTrialError::OutOfValidityRange {
            formula: "STAWAVE-1",
            quantity: "significant wave height",
            value: height,
            limit,
        });
    }
    let off_bow = AngleRange::Signed
        .wrap(conditions.relative_wave_direction)
        .abs();
    if off_bow > FRAC_PI_4 {
        return Err(SeaTrialError::OutOfValidityRange {
            formula: "STAWAVE-1",
            quantity: "wave direction off the bow",
            value: off_bow,
            limit: FRAC_PI_4,
        });
    }

    Ok(density * GRAVITY * height * height * beam * (beam / bow_length).sqrt() / 16.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn head_sea(height: f64) -> WaveConditions {
        WaveConditions {
            significant_wave_height: height,
            relative_wave_direction: 0.0,
            beam: 32.0,
            bow_length: 40.0,
            length_pp: 225.0,
            water_density: 1025.0,
        }
    }

    #[test]
    fn test_stawave1_value() {
        let r_awl = stawave1(&head_sea(2.0)).unwrap();
        let expected = 1025.0 * GRAVITY * 4.0 * 32.0 * (32.0_f64 / 40.0).sqrt() / 16.0;
        assert_relative_eq!(r_awl, expected, max_relative = 1e-12);
    }

    #[test]
    fn test_stawave1_is_quadratic_in_wave_height() {
        let single = stawave1(&head_sea(1.0)).unwrap();
        let double = stawave1(&head_sea(2.0)).unwrap();
        assert_relative_eq!(double, 4.0 * single, max_relative = 1e-12);
        assert_eq!(stawave1(&head_sea(0.0)).unwrap(), 0.0);
    }

    #[test]
    fn test_stawave1_rejects_high_waves() {
        // Limit for L_PP = 225 m is 2.25·1.5 = 3.375 m
        assert_relative_eq!(stawave1_wave_height_limit(225.0), 3.375);
        let err = stawave1(&head_sea(3.5)).unwrap_err();
        assert!(matches!(err, SeaTrialError::OutOfValidityRange { .. }));
    }

    #[test]
    fn test_stawave1_rejects_beam_seas() {
        let mut beam_sea = head_sea(1.5);
        beam_sea.relative_wave_direction = 1.2;
        assert!(stawave1(&beam_sea).is_err());
        // 40° off the port bow is still inside the ±45° sector
        beam_sea.relative_wave_direction = (-40.0_f64).to_radians();
        assert!(stawave1(&beam_sea).is_ok());
    }

    #[test]
    fn test_stawave1_rejects_unknown_wave_direction() {
        for direction in [f64::NAN, f64::INFINITY] {
            let mut unknown = head_sea(1.5);
            unknown.relative_wave_direction = direction;
            assert!(matches!(stawave1(&unknown), Err(SeaTrialError::Domain { .. })));
        }
    }

    #[test]
    fn test_stawave1_rejects_bad_geometry() {
        let mut bad = head_sea(1.0);
        bad.beam = 0.0;
        assert!(matches!(stawave1(&bad), Err(SeaTrialError::Domain { .. })));
        assert!(stawave1(&head_sea(-1.0)).is_err());
    }
}
