//! Sea Trial Analysis Core Library
//!
//! Closed-form formulas of the ITTC speed/power trial procedure (7.5-04-01-01.1) for
//! turning raw trial measurements into ideal-condition speed and power.
//!
//! ## Layout
//!
//! - [`core_types`]: units, angle wrapping and physical constants
//! - [`physics`]: the wind triangle, hydrodynamic coefficients, resistance increases
//!   (wind, waves, water temperature/salinity) and propulsion factors
//! - [`batch`]: element-wise, parallel evaluation over trial log columns
//! - [`analysis`]: the complete correction chain for one run or many runs
//!
//! All quantities are SI (m, s, kg, N, W) and angles are radians unless a type says
//! otherwise. Conversions from knots and degrees live in [`core_types::units`].

// Core types and utilities
pub mod core_types;

// Formulas
pub mod physics;

// Column evaluation and the correction chain
pub mod analysis;
pub mod batch;

mod error;

pub use error::{SeaTrialError, SeaTrialResult};

// Re-export core types
pub use core_types::{AngleRange, Degrees, Knots, MetersPerSecond, Radians};

// Re-export analysis types
pub use analysis::{
    CorrectedRun, PropulsionModel, SeaTrialAnalysis, SeaTrialRun, SelfPropulsionSensitivity,
    ShipParticulars,
};
pub use physics::{WaterProperties, WindObservation, WindResistanceCoefficients};
