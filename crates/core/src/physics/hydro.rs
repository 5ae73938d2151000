//! Basic hydrodynamic coefficients
//!
//! # References
//! - ITTC 7.5-02-02-02 (2017), ITTC-1957 model-ship correlation line.
//! - ITTC 7.5-02-03-01.4 (2017), 1978 ITTC performance prediction method
//!   (Bowden–Davison roughness allowance).
//! - ITTC 7.5-02-01-03 (2011), Fresh water and seawater properties.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core_types::{
    DEFAULT_HULL_ROUGHNESS, GRAVITY, REFERENCE_WATER_TEMPERATURE, STANDARD_SALINITY,
};
use crate::error::{ensure_positive, SeaTrialError, SeaTrialResult};

/// Temperature range of the ITTC water property regressions (°C)
const WATER_TEMPERATURE_RANGE: (f64, f64) = (0.0, 40.0);

/// Salinity range of the ITTC water property regressions (g/kg)
const SALINITY_RANGE: (f64, f64) = (0.0, 40.0);

/// Reynolds number `Re = V·L/ν`
///
/// # Errors
/// [`SeaTrialError::Domain`] for a non-positive kinematic viscosity.
pub fn reynolds_number(speed: f64, length: f64, kinematic_viscosity: f64) -> SeaTrialResult<f64> {
    let nu = ensure_positive("kinematic viscosity", kinematic_viscosity)?;
    Ok(speed * length / nu)
}

/// Froude number `Fr = V/sqrt(g·L)`
///
/// # Errors
/// [`SeaTrialError::Domain`] for a non-positive length.
pub fn froude_number(speed: f64, length: f64) -> SeaTrialResult<f64> {
    let length = ensure_positive("length", length)?;
    Ok(speed / (GRAVITY * length).sqrt())
}

/// Frictional resistance coefficient, ITTC-1957 correlation line
///
/// # Formula
/// ```text
/// C_F = 0.075 / (log10(Re) - 2)²
/// ```
///
/// # Errors
/// [`SeaTrialError::Domain`] when `Re ≤ 0` (no logarithm) or `Re = 100` (pole).
pub fn frictional_resistance_coefficient(reynolds: f64) -> SeaTrialResult<f64> {
    let reynolds = ensure_positive("Reynolds number", reynolds)?;
    let denominator = reynolds.log10() - 2.0;
    if denominator == 0.0 {
        return Err(SeaTrialError::domain(
            "frictional resistance coefficient",
            "log10(Re) - 2 is zero",
        ));
    }
    Ok(0.075 / (denominator * denominator))
}

/// Roughness allowance `ΔC_F` (Bowden–Davison, 1978 ITTC)
///
/// # Formula
/// ```text
/// ΔC_F = 0.044·((k_S/L)^(1/3) - 10·Re^(-1/3)) + 0.000125
/// ```
///
/// # Arguments
/// * `length` - Waterline length (m)
/// * `reynolds` - Full-scale Reynolds number
/// * `roughness` - Equivalent sand roughness `k_S` (m), 150 µm for a new hull
///
/// # Errors
/// [`SeaTrialError::Domain`] for non-positive length, Reynolds number or roughness.
pub fn roughness_allowance(length: f64, reynolds: f64, roughness: f64) -> SeaTrialResult<f64> {
    let length = ensure_positive("length", length)?;
    let reynolds = ensure_positive("Reynolds number", reynolds)?;
    let roughness = ensure_positive("hull roughness", roughness)?;
    Ok(0.044 * ((roughness / length).cbrt() - 10.0 * reynolds.powf(-1.0 / 3.0)) + 0.000125)
}

/// [`roughness_allowance`] for the default new-hull roughness of 150 µm
///
/// # Errors
/// See [`roughness_allowance`].
pub fn default_roughness_allowance(length: f64, reynolds: f64) -> SeaTrialResult<f64> {
    roughness_allowance(length, reynolds, DEFAULT_HULL_ROUGHNESS)
}

/// Kinematic viscosity of water (m²/s)
///
/// Fresh water and standard sea water regressions of ITTC 7.5-02-01-03, interpolated
/// linearly in salinity:
/// ```text
/// ν_fresh = ((0.585e-3·(T-12) - 0.03361)·(T-12) + 1.235)·1e-6
/// ν_sea   = ((0.659e-3·(T-1)  - 0.05076)·(T-1)  + 1.7688)·1e-6
/// ν       = ν_fresh + (ν_sea - ν_fresh)·S/35
/// ```
pub fn kinematic_viscosity(temperature: f64, salinity: f64) -> f64 {
    check_water_range(temperature, salinity);
    let t_fresh = temperature - 12.0;
    let t_sea = temperature - 1.0;
    let fresh = ((0.585e-3 * t_fresh - 0.03361) * t_fresh + 1.235) * 1e-6;
    let sea = ((0.659e-3 * t_sea - 0.05076) * t_sea + 1.7688) * 1e-6;
    fresh + (sea - fresh) * salinity / STANDARD_SALINITY
}

/// Density of water (kg/m³)
///
/// ```text
/// ρ = 1028.14 - 0.0735·T - 0.00469·T² + (0.802 - 0.002·T)·(S - 35)
/// ```
pub fn water_density(temperature: f64, salinity: f64) -> f64 {
    check_water_range(temperature, salinity);
    1028.14 - 0.0735 * temperature - 0.00469 * temperature * temperature
        + (0.802 - 0.002 * temperature) * (salinity - STANDARD_SALINITY)
}

fn check_water_range(temperature: f64, salinity: f64) {
    if !(WATER_TEMPERATURE_RANGE.0..=WATER_TEMPERATURE_RANGE.1).contains(&temperature) {
        warn!(
            "Water temperature {:.1} °C outside regression range {:?}",
            temperature, WATER_TEMPERATURE_RANGE
        );
    }
    if !(SALINITY_RANGE.0..=SALINITY_RANGE.1).contains(&salinity) {
        warn!(
            "Salinity {:.1} g/kg outside regression range {:?}",
            salinity, SALINITY_RANGE
        );
    }
}

/// Water temperature and salinity of a trial or of the reference condition
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaterProperties {
    /// Water temperature (°C)
    pub temperature: f64,
    /// Salinity (g/kg)
    pub salinity: f64,
}

impl Default for WaterProperties {
    /// Reference condition of the ideal-condition prediction: 15 °C sea water
    fn default() -> Self {
        Self {
            temperature: REFERENCE_WATER_TEMPERATURE,
            salinity: STANDARD_SALINITY,
        }
    }
}

impl WaterProperties {
    pub fn kinematic_viscosity(&self) -> f64 {
        kinematic_viscosity(self.temperature, self.salinity)
    }

    pub fn density(&self) -> f64 {
        water_density(self.temperature, self.salinity)
    }

    /// ITTC-1957 frictional coefficient for a hull of `length` at `speed` in this water
    ///
    /// # Errors
    /// See [`reynolds_number`] and [`frictional_resistance_coefficient`].
    pub fn frictional_coefficient(&self, speed: f64, length: f64) -> SeaTrialResult<f64> {
        let re = reynolds_number(speed, length, self.kinematic_viscosity())?;
        frictional_resistance_coefficient(re)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_reynolds_and_froude() {
        assert_relative_eq!(reynolds_number(7.7, 200.0, 1.1892e-6).unwrap(), 7.7 * 200.0 / 1.1892e-6);
        assert_relative_eq!(
            froude_number(7.7, 200.0).unwrap(),
            7.7 / (GRAVITY * 200.0).sqrt()
        );
        assert!(froude_number(7.7, 0.0).is_err());
        assert!(reynolds_number(7.7, 200.0, 0.0).is_err());
    }

    #[test]
    fn test_ittc_1957_line() {
        // Re = 1e9 → log10 = 9 → 0.075/49
        assert_relative_eq!(
            frictional_resistance_coefficient(1e9).unwrap(),
            0.075 / 49.0,
            max_relative = 1e-12
        );
        assert!(frictional_resistance_coefficient(100.0).is_err());
        assert!(frictional_resistance_coefficient(0.0).is_err());
        // Re = 1 is finite: log10(1) = 0
        assert_relative_eq!(frictional_resistance_coefficient(1.0).unwrap(), 0.075 / 4.0);
    }

    #[test]
    fn test_roughness_allowance_typical_ship() {
        let delta_cf = default_roughness_allowance(200.0, 1.3e9).unwrap();
        // 0.044·(0.0090856 - 0.0091624) + 0.000125 ≈ 0.0001216
        assert_abs_diff_eq!(delta_cf, 0.0001216, epsilon = 1e-7);
        assert!(roughness_allowance(0.0, 1.3e9, 150e-6).is_err());
    }

    #[test]
    fn test_sea_water_at_15c_matches_ittc_table() {
        let water = WaterProperties::default();
        // Table value 1.1892e-6 m²/s, 1026.02 kg/m³
        assert_abs_diff_eq!(water.kinematic_viscosity(), 1.1892e-6, epsilon = 5e-9);
        assert_abs_diff_eq!(water.density(), 1026.02, epsilon = 0.1);
    }

    #[test]
    fn test_fresh_water_at_15c() {
        // Table value 1.1386e-6 m²/s, 999.10 kg/m³
        assert_abs_diff_eq!(kinematic_viscosity(15.0, 0.0), 1.1386e-6, epsilon = 5e-9);
        assert_abs_diff_eq!(water_density(15.0, 0.0), 999.10, epsilon = 0.3);
    }

    #[test]
    fn test_colder_water_is_more_viscous() {
        assert!(kinematic_viscosity(5.0, 35.0) > kinematic_viscosity(25.0, 35.0));
        assert!(water_density(5.0, 35.0) > water_density(25.0, 35.0));
    }
}
