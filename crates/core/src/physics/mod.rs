//! Sea-trial correction formulas, leaf to root
//!
//! - [`trig`]: law of cosines and vector components shared by the wind conversions
//! - [`wind`]: true ↔ relative wind, double-run averaging, anemometer height
//! - [`hydro`]: Reynolds/Froude numbers, ITTC-1957 friction, water properties
//! - [`resistance`]: added resistance due to wind and water temperature/salinity
//! - [`wave`]: added resistance in waves (STAWAVE-1)
//! - [`power`]: self-propulsion factors and delivered power correction

pub mod hydro;
pub mod power;
pub mod resistance;
pub mod trig;
pub mod wave;
pub mod wind;

pub use hydro::{
    froude_number, frictional_resistance_coefficient, kinematic_viscosity, reynolds_number,
    roughness_allowance, water_density, WaterProperties,
};
pub use power::{
    correction_delivered_power, corrected_delivered_power, full_scale_wake_fraction,
    propulsive_efficiency_corrected, self_propulsion_factor, SelfPropulsionAdjustment,
};
pub use resistance::{
    air_density, air_resistance, temperature_salinity_resistance, WindCoefficientSource,
    WindResistanceCoefficients,
};
pub use trig::{adjacent_magnitude, combine_vectors, find_gamma, law_of_cosines, opposite_magnitude};
pub use wave::{stawave1, WaveConditions};
pub use wind::{
    double_run_average, relative_wind, relative_wind_direction, relative_wind_speed, true_wind,
    true_wind_direction, true_wind_speed, vertical_position_anemometer, WindObservation,
};
