//! Element-wise evaluation over equal-length columns
//!
//! Trial logs are columns of samples. Each function here takes one slice per argument of
//! the scalar formula, checks that all slices have the same length before computing
//! anything, and evaluates the elements in parallel with rayon. Output order equals input
//! order.
//!
//! # NaN policy
//! Where the scalar formula returns an error for a single element (an undefined wind
//! direction, a zero divisor), the batch version writes `f64::NAN` into that element and
//! carries on. Callers filter with `f64::is_nan`. Shape mismatches still fail the whole
//! call.

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::core_types::AngleRange;
use crate::error::{SeaTrialError, SeaTrialResult};
use crate::physics::{hydro, power, wind, SelfPropulsionAdjustment, WindObservation};

/// Check that every column has the length of the first one
///
/// # Errors
/// [`SeaTrialError::ShapeMismatch`] naming the first column that differs.
pub fn check_lengths(columns: &[(&'static str, usize)]) -> SeaTrialResult<usize> {
    let Some(&(_, expected)) = columns.first() else {
        return Ok(0);
    };
    for &(argument, actual) in &columns[1..] {
        if actual != expected {
            return Err(SeaTrialError::ShapeMismatch {
                argument,
                expected,
                actual,
            });
        }
    }
    Ok(expected)
}

fn map2<F>(a: &[f64], b: &[f64], f: F) -> Vec<f64>
where
    F: Fn(f64, f64) -> f64 + Sync + Send,
{
    a.par_iter().zip(b).map(|(&a, &b)| f(a, b)).collect()
}

fn map3<F>(a: &[f64], b: &[f64], c: &[f64], f: F) -> Vec<f64>
where
    F: Fn(f64, f64, f64) -> f64 + Sync + Send,
{
    a.par_iter()
        .zip(b)
        .zip(c)
        .map(|((&a, &b), &c)| f(a, b, c))
        .collect()
}

fn map4<F>(a: &[f64], b: &[f64], c: &[f64], d: &[f64], f: F) -> Vec<f64>
where
    F: Fn(f64, f64, f64, f64) -> f64 + Sync + Send,
{
    a.par_iter()
        .zip(b)
        .zip(c)
        .zip(d)
        .map(|(((&a, &b), &c), &d)| f(a, b, c, d))
        .collect()
}

fn report_undefined(quantity: &str, values: &[f64]) {
    let undefined = values.iter().filter(|v| v.is_nan()).count();
    if undefined > 0 {
        warn!(
            "{} of {} {} values are undefined (NaN)",
            undefined,
            values.len(),
            quantity
        );
    }
}

/// [`wind::relative_wind_speed`] over columns
///
/// # Errors
/// [`SeaTrialError::ShapeMismatch`] for columns of different length.
pub fn relative_wind_speeds(
    true_wind_speed: &[f64],
    speed_over_ground: &[f64],
    true_wind_direction: &[f64],
    heading: &[f64],
) -> SeaTrialResult<Vec<f64>> {
    let n = check_lengths(&[
        ("true_wind_speed", true_wind_speed.len()),
        ("speed_over_ground", speed_over_ground.len()),
        ("true_wind_direction", true_wind_direction.len()),
        ("heading", heading.len()),
    ])?;
    debug!("Resolving {} relative wind speeds", n);
    Ok(map4(
        true_wind_speed,
        speed_over_ground,
        true_wind_direction,
        heading,
        wind::relative_wind_speed,
    ))
}

/// [`wind::relative_wind_direction`] over columns; undefined elements are NaN
///
/// # Errors
/// [`SeaTrialError::ShapeMismatch`] for columns of different length.
pub fn relative_wind_directions(
    true_wind_speed: &[f64],
    speed_over_ground: &[f64],
    true_wind_direction: &[f64],
    heading: &[f64],
    range: AngleRange,
) -> SeaTrialResult<Vec<f64>> {
    let n = check_lengths(&[
        ("true_wind_speed", true_wind_speed.len()),
        ("speed_over_ground", speed_over_ground.len()),
        ("true_wind_direction", true_wind_direction.len()),
        ("heading", heading.len()),
    ])?;
    debug!("Resolving {} relative wind directions", n);
    let directions = map4(
        true_wind_speed,
        speed_over_ground,
        true_wind_direction,
        heading,
        |v_wt, v_g, psi_wt, psi| {
            wind::relative_wind_direction(v_wt, v_g, psi_wt, psi, range).unwrap_or(f64::NAN)
        },
    );
    report_undefined("relative wind direction", &directions);
    Ok(directions)
}

/// [`wind::true_wind_speed`] over columns
///
/// # Errors
/// [`SeaTrialError::ShapeMismatch`] for columns of different length.
pub fn true_wind_speeds(
    relative_wind_speed: &[f64],
    speed_over_ground: &[f64],
    relative_wind_direction: &[f64],
) -> SeaTrialResult<Vec<f64>> {
    let n = check_lengths(&[
        ("relative_wind_speed", relative_wind_speed.len()),
        ("speed_over_ground", speed_over_ground.len()),
        ("relative_wind_direction", relative_wind_direction.len()),
    ])?;
    debug!("Resolving {} true wind speeds", n);
    Ok(map3(
        relative_wind_speed,
        speed_over_ground,
        relative_wind_direction,
        wind::true_wind_speed,
    ))
}

/// [`wind::true_wind_direction`] over columns; undefined elements are NaN
///
/// # Errors
/// [`SeaTrialError::ShapeMismatch`] for columns of different length.
pub fn true_wind_directions(
    relative_wind_speed: &[f64],
    speed_over_ground: &[f64],
    relative_wind_direction: &[f64],
    heading: &[f64],
    range: AngleRange,
) -> SeaTrialResult<Vec<f64>> {
    let n = check_lengths(&[
        ("relative_wind_speed", relative_wind_speed.len()),
        ("speed_over_ground", speed_over_ground.len()),
        ("relative_wind_direction", relative_wind_direction.len()),
        ("heading", heading.len()),
    ])?;
    debug!("Resolving {} true wind directions", n);
    let directions = map4(
        relative_wind_speed,
        speed_over_ground,
        relative_wind_direction,
        heading,
        |v_wr, v_g, psi_wr, psi| {
            wind::true_wind_direction(v_wr, v_g, psi_wr, psi, range).unwrap_or(f64::NAN)
        },
    );
    report_undefined("true wind direction", &directions);
    Ok(directions)
}

/// [`wind::vertical_position_anemometer`] over columns; invalid heights give NaN
///
/// # Errors
/// [`SeaTrialError::ShapeMismatch`] for columns of different length.
pub fn vertical_position_anemometer(
    true_wind_speed: &[f64],
    reference_height: &[f64],
    measured_height: &[f64],
    exponent: f64,
) -> SeaTrialResult<Vec<f64>> {
    check_lengths(&[
        ("true_wind_speed", true_wind_speed.len()),
        ("reference_height", reference_height.len()),
        ("measured_height", measured_height.len()),
    ])?;
    let speeds = map3(
        true_wind_speed,
        reference_height,
        measured_height,
        |speed, reference, measured| {
            wind::vertical_position_anemometer(speed, reference, measured, exponent)
                .unwrap_or(f64::NAN)
        },
    );
    report_undefined("height-corrected wind speed", &speeds);
    Ok(speeds)
}

/// [`power::correction_delivered_power`] over columns; a zero ideal efficiency gives NaN
///
/// # Errors
/// [`SeaTrialError::ShapeMismatch`] for columns of different length.
pub fn correction_delivered_power(
    measured_power: &[f64],
    resistance_increase: &[f64],
    speed_through_water: &[f64],
    ideal_efficiency: &[f64],
    trial_efficiency: &[f64],
) -> SeaTrialResult<Vec<f64>> {
    check_lengths(&[
        ("measured_power", measured_power.len()),
        ("resistance_increase", resistance_increase.len()),
        ("speed_through_water", speed_through_water.len()),
        ("ideal_efficiency", ideal_efficiency.len()),
        ("trial_efficiency", trial_efficiency.len()),
    ])?;
    let corrections: Vec<f64> = measured_power
        .par_iter()
        .zip(resistance_increase)
        .zip(speed_through_water)
        .zip(ideal_efficiency)
        .zip(trial_efficiency)
        .map(|((((&p_dms, &delta_r), &v_s), &eta_id), &eta_ms)| {
            power::correction_delivered_power(p_dms, delta_r, v_s, eta_id, eta_ms)
                .unwrap_or(f64::NAN)
        })
        .collect();
    report_undefined("power correction", &corrections);
    Ok(corrections)
}

/// [`wind::double_run_average`] over the columns of two legs
///
/// Returns the speed and direction columns of the mean wind. Where the two readings
/// cancel, both elements are NaN.
///
/// # Errors
/// [`SeaTrialError::ShapeMismatch`] for columns of different length.
pub fn double_run_averages(
    first_speed: &[f64],
    first_direction: &[f64],
    second_speed: &[f64],
    second_direction: &[f64],
    range: AngleRange,
) -> SeaTrialResult<(Vec<f64>, Vec<f64>)> {
    let n = check_lengths(&[
        ("first_speed", first_speed.len()),
        ("first_direction", first_direction.len()),
        ("second_speed", second_speed.len()),
        ("second_direction", second_direction.len()),
    ])?;
    debug!("Averaging {} double runs", n);
    let (speeds, directions): (Vec<f64>, Vec<f64>) = first_speed
        .par_iter()
        .zip(first_direction)
        .zip(second_speed)
        .zip(second_direction)
        .map(|(((&v1, &psi1), &v2), &psi2)| {
            wind::double_run_average(
                WindObservation::new(v1, psi1),
                WindObservation::new(v2, psi2),
                range,
            )
            .map_or((f64::NAN, f64::NAN), |mean| (mean.speed, mean.direction))
        })
        .unzip();
    report_undefined("double run wind direction", &directions);
    Ok((speeds, directions))
}

/// [`power::full_scale_wake_fraction`] over columns
///
/// # Errors
/// [`SeaTrialError::ShapeMismatch`] for columns of different length.
pub fn full_scale_wake_fractions(
    model_wake_fraction: &[f64],
    scale_correlation_factor: &[f64],
) -> SeaTrialResult<Vec<f64>> {
    check_lengths(&[
        ("model_wake_fraction", model_wake_fraction.len()),
        ("scale_correlation_factor", scale_correlation_factor.len()),
    ])?;
    Ok(map2(
        model_wake_fraction,
        scale_correlation_factor,
        power::full_scale_wake_fraction,
    ))
}

/// [`power::propulsive_efficiency_corrected`] over columns; a wake fraction of one gives NaN
///
/// # Errors
/// [`SeaTrialError::ShapeMismatch`] for columns of different length.
pub fn propulsive_efficiencies_corrected(
    open_water_efficiency: &[f64],
    relative_rotative_efficiency: &[f64],
    thrust_deduction: &[f64],
    wake_fraction: &[f64],
) -> SeaTrialResult<Vec<f64>> {
    check_lengths(&[
        ("open_water_efficiency", open_water_efficiency.len()),
        ("relative_rotative_efficiency", relative_rotative_efficiency.len()),
        ("thrust_deduction", thrust_deduction.len()),
        ("wake_fraction", wake_fraction.len()),
    ])?;
    let efficiencies = map4(
        open_water_efficiency,
        relative_rotative_efficiency,
        thrust_deduction,
        wake_fraction,
        |eta_o, eta_r, t, w_s| {
            power::propulsive_efficiency_corrected(eta_o, eta_r, t, w_s).unwrap_or(f64::NAN)
        },
    );
    report_undefined("propulsive efficiency", &efficiencies);
    Ok(efficiencies)
}

/// [`power::self_propulsion_factor`] over columns
///
/// A zero ideal resistance with a non-zero delta gives NaN.
///
/// # Errors
/// [`SeaTrialError::ShapeMismatch`] for columns of different length.
pub fn self_propulsion_factors(
    ideal_value: &[f64],
    delta_per_unit: &[f64],
    resistance_increase: &[f64],
    ideal_resistance: &[f64],
) -> SeaTrialResult<Vec<f64>> {
    check_lengths(&[
        ("ideal_value", ideal_value.len()),
        ("delta_per_unit", delta_per_unit.len()),
        ("resistance_increase", resistance_increase.len()),
        ("ideal_resistance", ideal_resistance.len()),
    ])?;
    let factors = map4(
        ideal_value,
        delta_per_unit,
        resistance_increase,
        ideal_resistance,
        |ideal, delta, increase, r_id| {
            let adjustment = SelfPropulsionAdjustment {
                delta_per_unit: delta,
                resistance_increase: increase,
                ideal_resistance: r_id,
            };
            power::self_propulsion_factor(ideal, adjustment).unwrap_or(f64::NAN)
        },
    );
    report_undefined("self-propulsion factor", &factors);
    Ok(factors)
}

/// [`hydro::reynolds_number`] over columns; a non-positive viscosity gives NaN
///
/// # Errors
/// [`SeaTrialError::ShapeMismatch`] for columns of different length.
pub fn reynolds_numbers(
    speed: &[f64],
    length: &[f64],
    kinematic_viscosity: &[f64],
) -> SeaTrialResult<Vec<f64>> {
    check_lengths(&[
        ("speed", speed.len()),
        ("length", length.len()),
        ("kinematic_viscosity", kinematic_viscosity.len()),
    ])?;
    let numbers = map3(speed, length, kinematic_viscosity, |v, l, nu| {
        hydro::reynolds_number(v, l, nu).unwrap_or(f64::NAN)
    });
    report_undefined("Reynolds number", &numbers);
    Ok(numbers)
}

/// [`hydro::froude_number`] over columns; a non-positive length gives NaN
///
/// # Errors
/// [`SeaTrialError::ShapeMismatch`] for columns of different length.
pub fn froude_numbers(speed: &[f64], length: &[f64]) -> SeaTrialResult<Vec<f64>> {
    check_lengths(&[("speed", speed.len()), ("length", length.len())])?;
    let numbers = map2(speed, length, |v, l| {
        hydro::froude_number(v, l).unwrap_or(f64::NAN)
    });
    report_undefined("Froude number", &numbers);
    Ok(numbers)
}

/// [`hydro::frictional_resistance_coefficient`] over a Reynolds number column
///
/// `Re ≤ 0` and the pole at `Re = 100` give NaN.
pub fn frictional_resistance_coefficients(reynolds: &[f64]) -> Vec<f64> {
    let coefficients: Vec<f64> = reynolds
        .par_iter()
        .map(|&re| hydro::frictional_resistance_coefficient(re).unwrap_or(f64::NAN))
        .collect();
    report_undefined("frictional resistance coefficient", &coefficients);
    coefficients
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_check_lengths() {
        assert_eq!(check_lengths(&[]), Ok(0));
        assert_eq!(check_lengths(&[("a", 3), ("b", 3)]), Ok(3));
        assert_eq!(
            check_lengths(&[("a", 3), ("b", 3), ("c", 2)]),
            Err(SeaTrialError::ShapeMismatch {
                argument: "c",
                expected: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn test_batch_matches_scalar() {
        let v_wt = [10.0, 4.0, 12.5];
        let v_g = [5.0, 7.0, 0.0];
        let psi_wt = [0.0, PI, 2.0];
        let psi = [0.0, 0.5, 4.0];
        let speeds = relative_wind_speeds(&v_wt, &v_g, &psi_wt, &psi).unwrap();
        let directions =
            relative_wind_directions(&v_wt, &v_g, &psi_wt, &psi, AngleRange::Positive).unwrap();
        let expected_speeds: Vec<f64> = (0..3)
            .map(|i| wind::relative_wind_speed(v_wt[i], v_g[i], psi_wt[i], psi[i]))
            .collect();
        let expected_directions: Vec<f64> = (0..3)
            .map(|i| {
                wind::relative_wind_direction(v_wt[i], v_g[i], psi_wt[i], psi[i], AngleRange::Positive)
                    .unwrap()
            })
            .collect();
        assert_eq!(speeds, expected_speeds);
        assert_eq!(directions, expected_directions);
    }

    #[test]
    fn test_undefined_direction_is_nan() {
        // Second element: relative wind equals the ship's own head wind
        let directions = true_wind_directions(
            &[10.0, 8.0],
            &[5.0, 8.0],
            &[0.3, 0.0],
            &[1.0, 1.0],
            AngleRange::Positive,
        )
        .unwrap();
        assert!(directions[0].is_finite());
        assert!(directions[1].is_nan());
        let speeds = true_wind_speeds(&[10.0, 8.0], &[5.0, 8.0], &[0.3, 0.0]).unwrap();
        assert_abs_diff_eq!(speeds[1], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_shape_mismatch_fails_before_evaluation() {
        let err = relative_wind_speeds(&[1.0, 2.0], &[1.0, 2.0], &[0.0], &[0.0, 0.0]).unwrap_err();
        assert!(matches!(
            err,
            SeaTrialError::ShapeMismatch {
                argument: "true_wind_direction",
                ..
            }
        ));
    }

    #[test]
    fn test_power_correction_batch() {
        let corrections = correction_delivered_power(
            &[1_000_000.0, 2_000_000.0],
            &[5000.0, 0.0],
            &[7.7, 7.7],
            &[0.7, 0.0],
            &[0.68, 0.7],
        )
        .unwrap();
        assert_abs_diff_eq!(corrections[0], 83_571.428_571, epsilon = 1e-5);
        assert!(corrections[1].is_nan());
    }

    #[test]
    fn test_anemometer_batch() {
        let speeds =
            vertical_position_anemometer(&[20.0, 20.0], &[10.0, 10.0], &[40.0, -1.0], 1.0 / 9.0)
                .unwrap();
        assert_abs_diff_eq!(speeds[0], 17.144_879_657, epsilon = 1e-8);
        assert!(speeds[1].is_nan());
    }
}
