//! Speed/power trial analysis: from raw run measurements to ideal-condition power
//!
//! [`SeaTrialAnalysis::analyse`] chains the individual corrections of the direct power
//! method for one run:
//!
//! 1. The measured relative wind is resolved into the true wind, corrected from the
//!    anemometer height to the 10 m reference height, and resolved back into the relative
//!    wind at reference height.
//! 2. Wind, wave and water temperature/salinity resistance increases are evaluated and
//!    summed into ΔR.
//! 3. Self-propulsion factors are moved from ideal to trial conditions with the resistance
//!    ratio `ΔR/R_id`, giving the trial propulsive efficiency `η_DMS`.
//! 4. The delivered power correction ΔP yields the delivered power in ideal conditions.
//!
//! # Example
//! ```
//! use seatrial_core::analysis::{
//!     PropulsionModel, SeaTrialAnalysis, SeaTrialRun, SelfPropulsionSensitivity, ShipParticulars,
//! };
//! use seatrial_core::physics::WindResistanceCoefficients;
//!
//! let ship = ShipParticulars {
//!     length_pp: 225.0,
//!     length_wl: 230.0,
//!     bow_length: 40.0,
//!     beam: 32.0,
//!     transverse_area: 1000.0,
//!     wetted_surface: 12_000.0,
//!     ideal_resistance: 800e3,
//! };
//! let propulsion = PropulsionModel {
//!     open_water_efficiency: 0.62,
//!     relative_rotative_efficiency: 1.01,
//!     thrust_deduction: 0.18,
//!     model_wake_fraction: 0.35,
//!     wake_scale_factor: 0.95,
//!     ideal_propulsive_efficiency: 0.74,
//!     sensitivity: SelfPropulsionSensitivity::default(),
//! };
//! let table = WindResistanceCoefficients::from_degrees(&[(0.0, 0.8), (180.0, -0.5)])?;
//! let analysis = SeaTrialAnalysis::new(ship, propulsion, table);
//!
//! let run = SeaTrialRun {
//!     speed_over_ground: 7.5,
//!     speed_through_water: 7.5,
//!     delivered_power: 9.0e6,
//!     ..SeaTrialRun::default()
//! };
//! let corrected = analysis.analyse(&run)?;
//! assert!(corrected.corrected_power.is_finite());
//! # Ok::<(), seatrial_core::SeaTrialError>(())
//! ```

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core_types::{AngleRange, REFERENCE_ANEMOMETER_HEIGHT, STANDARD_AIR_DENSITY};
use crate::error::{SeaTrialError, SeaTrialResult};
use crate::physics::hydro::WaterProperties;
use crate::physics::power::{
    corrected_delivered_power, correction_delivered_power, full_scale_wake_fraction,
    propulsive_efficiency_corrected, self_propulsion_factor, SelfPropulsionAdjustment,
};
use crate::physics::resistance::{
    air_resistance, frictional_resistance, temperature_salinity_resistance,
    WindCoefficientSource,
};
use crate::physics::wave::{stawave1, WaveConditions};
use crate::physics::wind::{
    double_run_average, relative_wind, true_wind, wind_speed_at_reference_height,
    WindObservation,
};

/// Measurements of one trial run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeaTrialRun {
    /// Relative wind at the anemometer (m/s, rad from the bow)
    pub relative_wind: WindObservation,
    /// Height of the anemometer above the sea surface (m)
    pub anemometer_height: f64,
    /// `V_G` (m/s)
    pub speed_over_ground: f64,
    /// `V_S` (m/s)
    pub speed_through_water: f64,
    /// Heading, clockwise from north (rad)
    pub heading: f64,
    /// Measured delivered power `P_DMS` (W)
    pub delivered_power: f64,
    pub water: WaterProperties,
    /// Air density `ρ_A` (kg/m³)
    pub air_density: f64,
    /// Significant wave height (m), zero for calm water
    pub significant_wave_height: f64,
    /// Direction the waves come from, relative to the bow (rad)
    pub relative_wave_direction: f64,
}

impl Default for SeaTrialRun {
    /// Calm run in reference conditions with the anemometer at reference height
    fn default() -> Self {
        Self {
            relative_wind: WindObservation::default(),
            anemometer_height: REFERENCE_ANEMOMETER_HEIGHT,
            speed_over_ground: 0.0,
            speed_through_water: 0.0,
            heading: 0.0,
            delivered_power: 0.0,
            water: WaterProperties::default(),
            air_density: STANDARD_AIR_DENSITY,
            significant_wave_height: 0.0,
            relative_wave_direction: 0.0,
        }
    }
}

/// Main dimensions of the ship and its ideal-condition resistance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShipParticulars {
    /// `L_PP` (m)
    pub length_pp: f64,
    /// Waterline length (m), used for Reynolds numbers
    pub length_wl: f64,
    /// `L_BWL` (m)
    pub bow_length: f64,
    pub beam: f64,
    /// `A_XV` (m²)
    pub transverse_area: f64,
    /// Wetted surface S (m²)
    pub wetted_surface: f64,
    /// Total resistance in ideal conditions at trial speed, `R_id` = `R_T0` (N)
    pub ideal_resistance: f64,
}

/// Per-unit changes of the self-propulsion factors with the resistance ratio `ΔR/R_id`
///
/// All zero (the default) keeps the ideal-condition factors.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SelfPropulsionSensitivity {
    pub thrust_deduction: f64,
    pub wake_fraction: f64,
    pub relative_rotative_efficiency: f64,
    pub open_water_efficiency: f64,
}

/// Self-propulsion factors from the model test in ideal conditions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PropulsionModel {
    /// `η_O`
    pub open_water_efficiency: f64,
    /// `η_R`
    pub relative_rotative_efficiency: f64,
    /// t
    pub thrust_deduction: f64,
    /// `w_M`
    pub model_wake_fraction: f64,
    /// Scale correlation factor of the wake
    pub wake_scale_factor: f64,
    /// `η_DID`
    pub ideal_propulsive_efficiency: f64,
    pub sensitivity: SelfPropulsionSensitivity,
}

/// Intermediate and final quantities of one analysed run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorrectedRun {
    /// True wind at anemometer height
    pub true_wind: WindObservation,
    /// True wind at the reference height
    pub reference_true_wind: WindObservation,
    /// Relative wind at the reference height
    pub reference_relative_wind: WindObservation,
    /// `R_AA` (N)
    pub wind_resistance: f64,
    /// `R_AWL` (N)
    pub wave_resistance: f64,
    /// `R_AS` (N)
    pub temperature_salinity_resistance: f64,
    /// ΔR (N)
    pub resistance_increase: f64,
    pub thrust_deduction: f64,
    /// Full-scale wake fraction in the trial
    pub wake_fraction: f64,
    pub relative_rotative_efficiency: f64,
    pub open_water_efficiency: f64,
    /// `η_DMS`
    pub propulsive_efficiency: f64,
    /// ΔP (W)
    pub power_correction: f64,
    /// `P_DID` (W)
    pub corrected_power: f64,
}

/// Analysis of trial runs for one ship
#[derive(Debug, Clone)]
pub struct SeaTrialAnalysis<C> {
    pub ship: ShipParticulars,
    pub propulsion: PropulsionModel,
    /// Wind resistance coefficients `C_AA`
    pub coefficients: C,
    /// Water condition of the ideal-condition prediction
    pub reference_water: WaterProperties,
}

/// A vanished wind vector is calm air; `direction` stands in for its undefined direction
fn calm_if_undefined(
    result: SeaTrialResult<WindObservation>,
    direction: f64,
) -> SeaTrialResult<WindObservation> {
    match result {
        Err(SeaTrialError::UndefinedDirection { quantity }) => {
            debug!("{} undefined, treating as calm", quantity);
            Ok(WindObservation::new(0.0, direction))
        }
        other => other,
    }
}

impl<C: WindCoefficientSource> SeaTrialAnalysis<C> {
    /// Analysis against the standard reference water (15 °C, 35 g/kg)
    pub fn new(ship: ShipParticulars, propulsion: PropulsionModel, coefficients: C) -> Self {
        Self {
            ship,
            propulsion,
            coefficients,
            reference_water: WaterProperties::default(),
        }
    }

    /// Correct one run to ideal conditions
    ///
    /// # Errors
    /// - [`SeaTrialError::OutOfValidityRange`] when the sea state is outside STAWAVE-1.
    /// - [`SeaTrialError::Domain`] for invalid geometry, anemometer height or a zero divisor
    ///   in the propulsion factors.
    pub fn analyse(&self, run: &SeaTrialRun) -> SeaTrialResult<CorrectedRun> {
        let (true_wind, reference_true_wind, reference_relative_wind) = self.resolve_wind(run)?;

        let wind_resistance = air_resistance(
            run.air_density,
            self.ship.transverse_area,
            reference_relative_wind,
            run.speed_over_ground,
            &self.coefficients,
        );
        let wave_resistance = self.wave_resistance(run)?;
        let temperature_salinity_resistance = self.temperature_salinity_resistance(run)?;
        let resistance_increase =
            wind_resistance + wave_resistance + temperature_salinity_resistance;
        debug!(
            "R_AA = {:.0} N, R_AWL = {:.0} N, R_AS = {:.0} N, dR = {:.0} N",
            wind_resistance, wave_resistance, temperature_salinity_resistance, resistance_increase
        );

        let model = &self.propulsion;
        let adjust = |ideal_value: f64, delta_per_unit: f64| {
            self_propulsion_factor(
                ideal_value,
                SelfPropulsionAdjustment {
                    delta_per_unit,
                    resistance_increase,
                    ideal_resistance: self.ship.ideal_resistance,
                },
            )
        };
        let thrust_deduction = adjust(model.thrust_deduction, model.sensitivity.thrust_deduction)?;
        let model_wake = adjust(model.model_wake_fraction, model.sensitivity.wake_fraction)?;
        let relative_rotative_efficiency = adjust(
            model.relative_rotative_efficiency,
            model.sensitivity.relative_rotative_efficiency,
        )?;
        let open_water_efficiency = adjust(
            model.open_water_efficiency,
            model.sensitivity.open_water_efficiency,
        )?;
        let wake_fraction = full_scale_wake_fraction(model_wake, model.wake_scale_factor);
        let propulsive_efficiency = propulsive_efficiency_corrected(
            open_water_efficiency,
            relative_rotative_efficiency,
            thrust_deduction,
            wake_fraction,
        )?;

        let power_correction = correction_delivered_power(
            run.delivered_power,
            resistance_increase,
            run.speed_through_water,
            model.ideal_propulsive_efficiency,
            propulsive_efficiency,
        )?;
        let corrected_power = corrected_delivered_power(run.delivered_power, power_correction);
        debug!(
            "eta_DMS = {:.4}, dP = {:.1} kW, P_DID = {:.1} kW",
            propulsive_efficiency,
            power_correction / 1e3,
            corrected_power / 1e3
        );

        Ok(CorrectedRun {
            true_wind,
            reference_true_wind,
            reference_relative_wind,
            wind_resistance,
            wave_resistance,
            temperature_salinity_resistance,
            resistance_increase,
            thrust_deduction,
            wake_fraction,
            relative_rotative_efficiency,
            open_water_efficiency,
            propulsive_efficiency,
            power_correction,
            corrected_power,
        })
    }

    /// True wind at the anemometer, true wind and relative wind at reference height
    fn resolve_wind(
        &self,
        run: &SeaTrialRun,
    ) -> SeaTrialResult<(WindObservation, WindObservation, WindObservation)> {
        let measured_true = calm_if_undefined(
            true_wind(
                run.relative_wind,
                run.speed_over_ground,
                run.heading,
                AngleRange::Positive,
            ),
            run.heading,
        )?;
        let reference_true = WindObservation::new(
            wind_speed_at_reference_height(measured_true.speed, run.anemometer_height)?,
            measured_true.direction,
        );
        let reference_relative = calm_if_undefined(
            relative_wind(
                reference_true,
                run.speed_over_ground,
                run.heading,
                AngleRange::Positive,
            ),
            0.0,
        )?;
        debug!(
            "True wind {:.2} m/s from {:.1}°, relative wind at reference height {:.2} m/s at {:.1}°",
            reference_true.speed,
            reference_true.direction.to_degrees(),
            reference_relative.speed,
            reference_relative.direction.to_degrees()
        );
        Ok((measured_true, reference_true, reference_relative))
    }

    fn wave_resistance(&self, run: &SeaTrialRun) -> SeaTrialResult<f64> {
        if run.significant_wave_height == 0.0 {
            return Ok(0.0);
        }
        stawave1(&WaveConditions {
            significant_wave_height: run.significant_wave_height,
            relative_wave_direction: run.relative_wave_direction,
            beam: self.ship.beam,
            bow_length: self.ship.bow_length,
            length_pp: self.ship.length_pp,
            water_density: run.water.density(),
        })
    }

    fn temperature_salinity_resistance(&self, run: &SeaTrialRun) -> SeaTrialResult<f64> {
        let speed = run.speed_through_water;
        let length = self.ship.length_wl;
        let density = run.water.density();
        let frictional_coefficient = run.water.frictional_coefficient(speed, length)?;
        let reference_frictional_coefficient =
            self.reference_water.frictional_coefficient(speed, length)?;
        temperature_salinity_resistance(
            self.ship.ideal_resistance,
            frictional_resistance(
                density,
                self.ship.wetted_surface,
                speed,
                frictional_coefficient,
            ),
            density,
            self.reference_water.density(),
            frictional_coefficient,
            reference_frictional_coefficient,
        )
    }
}

impl<C: WindCoefficientSource + Sync> SeaTrialAnalysis<C> {
    /// Analyse many runs in parallel; results keep the order of `runs`
    pub fn analyse_runs(&self, runs: &[SeaTrialRun]) -> Vec<SeaTrialResult<CorrectedRun>> {
        let results: Vec<_> = runs.par_iter().map(|run| self.analyse(run)).collect();
        let failed = results.iter().filter(|r| r.is_err()).count();
        info!(
            "Analysed {} trial runs ({} failed)",
            results.len(),
            failed
        );
        results
    }
}

/// Double-run mean of the reference-height true wind of two reciprocal runs
///
/// # Errors
/// [`SeaTrialError::UndefinedDirection`] when the two true winds cancel.
pub fn reciprocal_true_wind(
    first: &CorrectedRun,
    second: &CorrectedRun,
) -> SeaTrialResult<WindObservation> {
    double_run_average(
        first.reference_true_wind,
        second.reference_true_wind,
        AngleRange::Positive,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::resistance::WindResistanceCoefficients;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use std::f64::consts::PI;

    fn ship() -> ShipParticulars {
        ShipParticulars {
            length_pp: 225.0,
            length_wl: 230.0,
            bow_length: 40.0,
            beam: 32.26,
            transverse_area: 1000.0,
            wetted_surface: 12_000.0,
            ideal_resistance: 800e3,
        }
    }

    fn propulsion() -> PropulsionModel {
        let mut model = PropulsionModel {
            open_water_efficiency: 0.62,
            relative_rotative_efficiency: 1.01,
            thrust_deduction: 0.18,
            model_wake_fraction: 0.35,
            wake_scale_factor: 0.95,
            ideal_propulsive_efficiency: 0.0,
            sensitivity: SelfPropulsionSensitivity::default(),
        };
        let wake = full_scale_wake_fraction(model.model_wake_fraction, model.wake_scale_factor);
        model.ideal_propulsive_efficiency =
            propulsive_efficiency_corrected(0.62, 1.01, 0.18, wake).unwrap();
        model
    }

    fn analysis() -> SeaTrialAnalysis<WindResistanceCoefficients> {
        let table = WindResistanceCoefficients::from_degrees(&[
            (0.0, 0.8),
            (60.0, 0.6),
            (120.0, -0.2),
            (180.0, -0.5),
        ])
        .unwrap();
        SeaTrialAnalysis::new(ship(), propulsion(), table)
    }

    fn calm_run() -> SeaTrialRun {
        SeaTrialRun {
            relative_wind: WindObservation::new(7.5, 0.0),
            speed_over_ground: 7.5,
            speed_through_water: 7.5,
            heading: 1.0,
            delivered_power: 9.0e6,
            ..SeaTrialRun::default()
        }
    }

    #[test]
    fn test_ideal_conditions_need_no_correction() {
        let corrected = analysis().analyse(&calm_run()).unwrap();
        assert_eq!(corrected.true_wind.speed, 0.0);
        assert_abs_diff_eq!(corrected.wind_resistance, 0.0, epsilon = 1e-6);
        assert_eq!(corrected.wave_resistance, 0.0);
        assert_abs_diff_eq!(corrected.temperature_salinity_resistance, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(corrected.power_correction, 0.0, epsilon = 1e-3);
        assert_abs_diff_eq!(corrected.corrected_power, 9.0e6, epsilon = 1e-3);
    }

    #[test]
    fn test_head_wind_reduces_corrected_power() {
        let run = SeaTrialRun {
            relative_wind: WindObservation::new(17.5, 0.0),
            ..calm_run()
        };
        let corrected = analysis().analyse(&run).unwrap();
        assert_relative_eq!(corrected.true_wind.speed, 10.0, max_relative = 1e-12);
        assert!(corrected.wind_resistance > 0.0);
        assert!(corrected.power_correction > 0.0);
        assert!(corrected.corrected_power < run.delivered_power);
        // Only the wind term acts, so ΔP = R_AA·V_S/η_DID
        assert_relative_eq!(
            corrected.power_correction,
            corrected.resistance_increase * 7.5 / propulsion().ideal_propulsive_efficiency,
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_high_anemometer_reads_stronger_wind() {
        let low = SeaTrialRun {
            relative_wind: WindObservation::new(17.5, 0.0),
            ..calm_run()
        };
        let high = SeaTrialRun {
            anemometer_height: 40.0,
            ..low
        };
        let analysis = analysis();
        let low = analysis.analyse(&low).unwrap();
        let high = analysis.analyse(&high).unwrap();
        assert_relative_eq!(
            high.reference_true_wind.speed,
            10.0 * 0.25_f64.powf(1.0 / 9.0),
            max_relative = 1e-12
        );
        assert!(high.wind_resistance < low.wind_resistance);
    }

    #[test]
    fn test_cold_water_adds_resistance() {
        let run = SeaTrialRun {
            water: WaterProperties {
                temperature: 5.0,
                salinity: 35.0,
            },
            ..calm_run()
        };
        let corrected = analysis().analyse(&run).unwrap();
        assert!(corrected.temperature_salinity_resistance > 0.0);
    }

    #[test]
    fn test_waves_beyond_stawave1_fail() {
        let analysis = analysis();
        let moderate = SeaTrialRun {
            significant_wave_height: 2.0,
            ..calm_run()
        };
        assert!(analysis.analyse(&moderate).unwrap().wave_resistance > 0.0);
        let rough = SeaTrialRun {
            significant_wave_height: 4.0,
            ..calm_run()
        };
        assert!(matches!(
            analysis.analyse(&rough),
            Err(SeaTrialError::OutOfValidityRange { .. })
        ));
    }

    #[test]
    fn test_sensitivity_moves_factors_with_resistance_ratio() {
        let mut analysis = analysis();
        analysis.propulsion.sensitivity.thrust_deduction = 0.1;
        let run = SeaTrialRun {
            relative_wind: WindObservation::new(17.5, 0.0),
            ..calm_run()
        };
        let corrected = analysis.analyse(&run).unwrap();
        let expected = 0.18 + 0.1 * corrected.resistance_increase / 800e3;
        assert_relative_eq!(corrected.thrust_deduction, expected, max_relative = 1e-12);
    }

    #[test]
    fn test_analyse_runs_keeps_order() {
        let runs: Vec<SeaTrialRun> = [7.5, 17.5, 12.0]
            .iter()
            .map(|&speed| SeaTrialRun {
                relative_wind: WindObservation::new(speed, 0.0),
                ..calm_run()
            })
            .collect();
        let analysis = analysis();
        let results = analysis.analyse_runs(&runs);
        assert_eq!(results.len(), 3);
        for (run, result) in runs.iter().zip(&results) {
            assert_eq!(result, &analysis.analyse(run));
        }
    }

    #[test]
    fn test_reciprocal_runs_recover_true_wind() {
        // 6 m/s true wind from the north; double run on headings 0 and π
        let analysis = analysis();
        let mut legs = [0.0, PI].iter().map(|&heading| {
            let relative = relative_wind(
                WindObservation::new(6.0, 0.0),
                7.5,
                heading,
                AngleRange::Positive,
            )
            .unwrap();
            let run = SeaTrialRun {
                relative_wind: relative,
                heading,
                ..calm_run()
            };
            analysis.analyse(&run).unwrap()
        });
        let first = legs.next().unwrap();
        let second = legs.next().unwrap();
        let mean = reciprocal_true_wind(&first, &second).unwrap();
        assert_abs_diff_eq!(mean.speed, 6.0, epsilon = 1e-9);
        assert_abs_diff_eq!(
            crate::core_types::angle_difference(mean.direction, 0.0),
            0.0,
            epsilon = 1e-9
        );
    }
}
