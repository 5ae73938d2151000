//! Propulsion factors and delivered power correction (direct power method)
//!
//! # References
//! - ITTC 7.5-04-01-01.1 (2017), Section 10.4.1, the direct power method.
//! - ITTC 7.5-02-03-01.4 (2017), full-scale wake fraction.

use serde::{Deserialize, Serialize};

use crate::error::{ensure_nonzero, SeaTrialResult};

/// Resistance-dependent adjustment of a self-propulsion factor
///
/// `Default` is "no adjustment": without a dedicated model test at increased resistance
/// the ideal-condition factors are used unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelfPropulsionAdjustment {
    /// Change of the factor per unit resistance ratio (`ξ_P`, `ξ_n`, `ξ_V` in the ITTC)
    pub delta_per_unit: f64,
    /// Resistance increase in the trial ΔR (N)
    pub resistance_increase: f64,
    /// Resistance in ideal conditions `R_id` (N)
    pub ideal_resistance: f64,
}

impl Default for SelfPropulsionAdjustment {
    fn default() -> Self {
        Self {
            delta_per_unit: 0.0,
            resistance_increase: 1.0,
            ideal_resistance: 1.0,
        }
    }
}

/// Self-propulsion factor under trial conditions
///
/// # Formula
/// ```text
/// x_trial = x_ideal + Δx·(ΔR / R_id)
/// ```
///
/// A zero `delta_per_unit` returns `ideal_value` without evaluating the ratio.
///
/// # Errors
/// [`crate::SeaTrialError::Domain`] for a zero ideal resistance with a non-zero delta.
pub fn self_propulsion_factor(
    ideal_value: f64,
    adjustment: SelfPropulsionAdjustment,
) -> SeaTrialResult<f64> {
    if adjustment.delta_per_unit == 0.0 {
        return Ok(ideal_value);
    }
    let ideal_resistance = ensure_nonzero("ideal resistance", adjustment.ideal_resistance)?;
    Ok(ideal_value
        + adjustment.delta_per_unit * (adjustment.resistance_increase / ideal_resistance))
}

/// Full-scale wake fraction from the model wake fraction
///
/// # Formula
/// ```text
/// w_S = 1 - (1 - w_M)·k
/// ```
pub fn full_scale_wake_fraction(model_wake_fraction: f64, scale_correlation_factor: f64) -> f64 {
    1.0 - (1.0 - model_wake_fraction) * scale_correlation_factor
}

/// Propulsive efficiency from its components
///
/// # Formula
/// ```text
/// η_D = η_O·η_R·(1 - t)/(1 - w_S)
/// ```
///
/// # Errors
/// [`crate::SeaTrialError::Domain`] for a wake fraction of exactly one.
pub fn propulsive_efficiency_corrected(
    open_water_efficiency: f64,
    relative_rotative_efficiency: f64,
    thrust_deduction: f64,
    wake_fraction: f64,
) -> SeaTrialResult<f64> {
    let hull_inflow = ensure_nonzero("1 - wake fraction", 1.0 - wake_fraction)?;
    Ok(open_water_efficiency * relative_rotative_efficiency * (1.0 - thrust_deduction)
        / hull_inflow)
}

/// Delivered power correction ΔP of the direct power method
///
/// # Formula
/// ```text
/// ΔP = ΔR·V_S/η_DID + P_DMS·(1 - η_DMS/η_DID)
/// ```
///
/// # Arguments
/// * `measured_power` - Delivered power measured in the trial `P_DMS` (W)
/// * `resistance_increase` - Total resistance increase ΔR (N)
/// * `speed_through_water` - `V_S` (m/s)
/// * `ideal_efficiency` - Propulsive efficiency in ideal conditions `η_DID`
/// * `trial_efficiency` - Propulsive efficiency in the trial `η_DMS`
///
/// # Errors
/// [`crate::SeaTrialError::Domain`] for a zero ideal efficiency.
pub fn correction_delivered_power(
    measured_power: f64,
    resistance_increase: f64,
    speed_through_water: f64,
    ideal_efficiency: f64,
    trial_efficiency: f64,
) -> SeaTrialResult<f64> {
    let ideal_efficiency = ensure_nonzero("ideal propulsive efficiency", ideal_efficiency)?;
    Ok(resistance_increase * speed_through_water / ideal_efficiency
        + measured_power * (1.0 - trial_efficiency / ideal_efficiency))
}

/// Delivered power in ideal conditions `P_DID = P_DMS - ΔP`
pub fn corrected_delivered_power(measured_power: f64, power_correction: f64) -> f64 {
    measured_power - power_correction
}
