//! Physical constants and ITTC default values.

/// Standard gravitational acceleration (m/s²)
pub const GRAVITY: f64 = 9.80665;

/// Metres per second in one knot
pub const KNOTS_TO_METERS_PER_SECOND: f64 = 0.514444;

/// Reference height the true wind speed is corrected to (m)
pub const REFERENCE_ANEMOMETER_HEIGHT: f64 = 10.0;

/// Exponent of the power-law wind profile used for the anemometer height correction
pub const WIND_PROFILE_EXPONENT: f64 = 1.0 / 9.0;

/// Salinity of standard sea water (g/kg)
pub const STANDARD_SALINITY: f64 = 35.0;

/// Water temperature the ideal-condition resistance refers to (°C)
pub const REFERENCE_WATER_TEMPERATURE: f64 = 15.0;

/// Default equivalent sand roughness of a new hull (m)
pub const DEFAULT_HULL_ROUGHNESS: f64 = 150.0e-6;

/// Air density at 15 °C and 1013.25 hPa (kg/m³)
pub const STANDARD_AIR_DENSITY: f64 = 1.225;

/// Specific gas constant of dry air (J/(kg·K))
pub const DRY_AIR_GAS_CONSTANT: f64 = 287.05;

/// Celsius to Kelvin offset
pub const CELSIUS_KELVIN_OFFSET: f64 = 273.15;
