//! Core types and utilities

pub mod angle;
pub mod constants;
pub mod units;

pub use angle::{angle_difference, AngleRange};
pub use constants::{
    CELSIUS_KELVIN_OFFSET, DEFAULT_HULL_ROUGHNESS, DRY_AIR_GAS_CONSTANT, GRAVITY,
    KNOTS_TO_METERS_PER_SECOND, REFERENCE_ANEMOMETER_HEIGHT, REFERENCE_WATER_TEMPERATURE,
    STANDARD_AIR_DENSITY, STANDARD_SALINITY, WIND_PROFILE_EXPONENT,
};
pub use units::{knots_to_ms, ms_to_knots, Degrees, Knots, MetersPerSecond, Radians};
