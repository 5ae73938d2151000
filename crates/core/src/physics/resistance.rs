//! Added resistance due to wind and to water temperature/salinity
//!
//! # References
//! - ITTC 7.5-04-01-01.1 (2017), Section 10.3: resistance increase due to wind (eq. 18)
//!   and due to deviation of water temperature and salt content (eq. 38).

use tracing::warn;

use super::wind::WindObservation;
use crate::core_types::{AngleRange, CELSIUS_KELVIN_OFFSET, DRY_AIR_GAS_CONSTANT};
use crate::error::{ensure_nonzero, ensure_positive, SeaTrialError, SeaTrialResult};

/// Density of dry air (kg/m³) from the ideal gas law
///
/// # Errors
/// [`SeaTrialError::Domain`] for a non-positive pressure or absolute temperature.
pub fn air_density(temperature: f64, pressure: f64) -> SeaTrialResult<f64> {
    let kelvin = ensure_positive("air temperature", temperature + CELSIUS_KELVIN_OFFSET)?;
    let pressure = ensure_positive("air pressure", pressure)?;
    Ok(pressure / (DRY_AIR_GAS_CONSTANT * kelvin))
}

/// Source of the wind resistance coefficient `C_AA(ψ_WR)`
///
/// The coefficients come from wind tunnel tests or a hull-geometry data set; the
/// formulas only need a number for a relative wind direction. Any `Fn(f64) -> f64`
/// closure is a source.
pub trait WindCoefficientSource {
    /// Wind resistance coefficient for a relative wind direction (rad, from the bow)
    fn coefficient(&self, relative_direction: f64) -> f64;
}

impl<F> WindCoefficientSource for F
where
    F: Fn(f64) -> f64,
{
    fn coefficient(&self, relative_direction: f64) -> f64 {
        self(relative_direction)
    }
}

/// Tabulated wind resistance coefficients over the relative wind direction
///
/// Angles run from the bow (0) to the stern (π); port and starboard are treated as
/// symmetric. Lookups are linear between table points and saturate at the table ends
/// with a warning. A non-finite direction looks up NaN.
#[derive(Debug, Clone, PartialEq)]
pub struct WindResistanceCoefficients {
    angles: Vec<f64>,
    coefficients: Vec<f64>,
}

impl WindResistanceCoefficients {
    /// Build a table from angles (rad, strictly increasing) and coefficients
    ///
    /// # Errors
    /// [`SeaTrialError::ShapeMismatch`] for columns of different length,
    /// [`SeaTrialError::InvalidTable`] for fewer than two points or angles that are not
    /// finite and strictly increasing.
    pub fn new(angles: Vec<f64>, coefficients: Vec<f64>) -> SeaTrialResult<Self> {
        if angles.len() != coefficients.len() {
            return Err(SeaTrialError::ShapeMismatch {
                argument: "coefficients",
                expected: angles.len(),
                actual: coefficients.len(),
            });
        }
        if angles.len() < 2 {
            return Err(SeaTrialError::InvalidTable {
                reason: "at least two points are required",
            });
        }
        if angles.iter().chain(&coefficients).any(|v| !v.is_finite()) {
            return Err(SeaTrialError::InvalidTable {
                reason: "entries must be finite",
            });
        }
        if angles.windows(2).any(|pair| pair[1] <= pair[0]) {
            return Err(SeaTrialError::InvalidTable {
                reason: "angles must be strictly increasing",
            });
        }
        Ok(Self {
            angles,
            coefficients,
        })
    }

    /// Build a table from `(degrees, coefficient)` pairs
    ///
    /// # Errors
    /// See [`WindResistanceCoefficients::new`].
    pub fn from_degrees(points: &[(f64, f64)]) -> SeaTrialResult<Self> {
        let (angles, coefficients): (Vec<f64>, Vec<f64>) = points
            .iter()
            .map(|&(degrees, coefficient)| (degrees.to_radians(), coefficient))
            .unzip();
        Self::new(angles, coefficients)
    }

    fn interpolate(&self, angle: f64) -> f64 {
        let last = self.angles.len() - 1;
        if angle <= self.angles[0] {
            return self.coefficients[0];
        }
        if angle >= self.angles[last] {
            return self.coefficients[last];
        }
        // First index with angles[i] > angle, in 1..=last
        let upper = self.angles.partition_point(|&a| a <= angle);
        let lower = upper - 1;
        let t = (angle - self.angles[lower]) / (self.angles[upper] - self.angles[lower]);
        self.coefficients[lower] + t * (self.coefficients[upper] - self.coefficients[lower])
    }
}

impl WindCoefficientSource for WindResistanceCoefficients {
    fn coefficient(&self, relative_direction: f64) -> f64 {
        if !relative_direction.is_finite() {
            return f64::NAN;
        }
        let folded = AngleRange::Signed.wrap(relative_direction).abs();
        let (first, last) = (self.angles[0], self.angles[self.angles.len() - 1]);
        if folded < first || folded > last {
            warn!(
                "Relative wind direction {:.1}° outside table span [{:.1}°, {:.1}°], saturating",
                folded.to_degrees(),
                first.to_degrees(),
                last.to_degrees()
            );
        }
        self.interpolate(folded)
    }
}

/// Resistance increase due to relative wind
///
/// # Formula
/// ```text
/// R_AA = ½·ρ_A·C_AA(ψ_WR)·A_XV·V_WR² - ½·ρ_A·C_AA(0)·A_XV·V_G²
/// ```
///
/// The second term removes the still-air resistance already contained in the
/// ideal-condition prediction.
///
/// # Arguments
/// * `air_density` - `ρ_A` (kg/m³)
/// * `transverse_area` - Transverse projected area above the waterline `A_XV` (m²)
/// * `relative_wind` - Relative wind at the reference height (m/s, rad from the bow)
/// * `speed_over_ground` - `V_G` (m/s)
/// * `coefficients` - Source of `C_AA`
pub fn air_resistance<C>(
    air_density: f64,
    transverse_area: f64,
    relative_wind: WindObservation,
    speed_over_ground: f64,
    coefficients: &C,
) -> f64
where
    C: WindCoefficientSource + ?Sized,
{
    let dynamic_area = 0.5 * air_density * transverse_area;
    dynamic_area * coefficients.coefficient(relative_wind.direction) * relative_wind.speed.powi(2)
        - dynamic_area * coefficients.coefficient(0.0) * speed_over_ground.powi(2)
}

/// Frictional resistance `R_F = ½·ρ·S·V²·C_F`
pub fn frictional_resistance(
    density: f64,
    wetted_surface: f64,
    speed: f64,
    frictional_coefficient: f64,
) -> f64 {
    0.5 * density * wetted_surface * speed * speed * frictional_coefficient
}

/// Resistance increase due to water temperature and salinity
///
/// # Formula
/// ```text
/// R_AS = R_T0·(ρ/ρ_0 - 1) - R_F·(C_F0/C_F - 1)
/// ```
///
/// # Arguments
/// * `total_resistance_reference` - `R_T0` at the reference water condition (N)
/// * `frictional_resistance` - `R_F` at the trial water condition (N)
/// * `density` / `reference_density` - ρ and `ρ_0` (kg/m³)
/// * `frictional_coefficient` / `reference_frictional_coefficient` - `C_F` and `C_F0`
///
/// # Errors
/// [`SeaTrialError::Domain`] for a zero reference density or trial frictional coefficient.
pub fn temperature_salinity_resistance(
    total_resistance_reference: f64,
    frictional_resistance: f64,
    density: f64,
    reference_density: f64,
    frictional_coefficient: f64,
    reference_frictional_coefficient: f64,
) -> SeaTrialResult<f64> {
    let reference_density = ensure_nonzero("reference water density", reference_density)?;
    let frictional_coefficient = ensure_nonzero("frictional coefficient", frictional_coefficient)?;
    Ok(total_resistance_reference * (density / reference_density - 1.0)
        - frictional_resistance * (reference_frictional_coefficient / frictional_coefficient - 1.0))
}
