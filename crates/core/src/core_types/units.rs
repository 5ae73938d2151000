//! Semantic unit types for the quantities a trial log is recorded in
//!
//! Trial logs mix knots with m/s and degrees with radians. The formulas in
//! [`crate::physics`] work on raw SI `f64` values; these newtypes sit at the edge where
//! measurements come in, so a speed in knots cannot be passed where m/s is expected.
//!
//! # Design Philosophy
//! - All types wrap `f64` (the wind-triangle round trip is checked to 1e-9)
//! - Total ordering via `Ord` (NaN handled as greater than all values)
//! - Explicit conversion methods plus `From` impls between related types
//! - Serde support for serialization
//!
//! # Usage
//! ```
//! use seatrial_core::core_types::units::{Knots, MetersPerSecond};
//!
//! let sog = Knots::new(15.0);
//! let sog_ms: MetersPerSecond = sog.into();
//! assert!((*sog_ms - 7.71666).abs() < 1e-4);
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::Deref;

use super::constants::KNOTS_TO_METERS_PER_SECOND;

/// Compare f64 values with total ordering using Rust's built-in `total_cmp`
#[inline]
fn f64_total_cmp(a: f64, b: f64) -> Ordering {
    a.total_cmp(&b)
}

// ============================================================================
// SPEED TYPES
// ============================================================================

/// Speed in knots (nautical miles per hour)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Knots(f64);

impl Eq for Knots {}

impl PartialOrd for Knots {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Knots {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for Knots {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Knots {
    /// Create a new speed in knots
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Knots(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Convert to metres per second (1 kn = 0.514444 m/s)
    #[inline]
    #[must_use]
    pub fn to_meters_per_second(self) -> MetersPerSecond {
        MetersPerSecond(knots_to_ms(self.0))
    }
}

impl From<f64> for Knots {
    fn from(v: f64) -> Self {
        Knots(v)
    }
}

impl From<Knots> for f64 {
    fn from(k: Knots) -> f64 {
        k.0
    }
}

impl From<Knots> for MetersPerSecond {
    fn from(k: Knots) -> MetersPerSecond {
        k.to_meters_per_second()
    }
}

impl fmt::Display for Knots {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} kn", self.0)
    }
}

/// Speed in metres per second
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct MetersPerSecond(f64);

impl Eq for MetersPerSecond {}

impl PartialOrd for MetersPerSecond {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MetersPerSecond {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for MetersPerSecond {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl MetersPerSecond {
    /// Create a new speed in m/s
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        MetersPerSecond(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Convert to knots
    #[inline]
    #[must_use]
    pub fn to_knots(self) -> Knots {
        Knots(ms_to_knots(self.0))
    }
}

impl From<f64> for MetersPerSecond {
    fn from(v: f64) -> Self {
        MetersPerSecond(v)
    }
}

impl From<MetersPerSecond> for f64 {
    fn from(s: MetersPerSecond) -> f64 {
        s.0
    }
}

impl From<MetersPerSecond> for Knots {
    fn from(s: MetersPerSecond) -> Knots {
        s.to_knots()
    }
}

impl fmt::Display for MetersPerSecond {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3} m/s", self.0)
    }
}

/// Convert a raw speed in knots to m/s
#[inline]
pub fn knots_to_ms(knots: f64) -> f64 {
    knots * KNOTS_TO_METERS_PER_SECOND
}

/// Convert a raw speed in m/s to knots
#[inline]
pub fn ms_to_knots(meters_per_second: f64) -> f64 {
    meters_per_second / KNOTS_TO_METERS_PER_SECOND
}

// ============================================================================
// ANGLE TYPES
// ============================================================================

/// Angle in degrees (compass convention: 0 = north, clockwise positive)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Degrees(f64);

impl Eq for Degrees {}

impl PartialOrd for Degrees {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Degrees {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for Degrees {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Degrees {
    /// Create a new angle in degrees
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Degrees(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Convert to radians
    #[inline]
    #[must_use]
    pub fn to_radians(self) -> Radians {
        Radians(self.0.to_radians())
    }
}

impl From<f64> for Degrees {
    fn from(v: f64) -> Self {
        Degrees(v)
    }
}

impl From<Degrees> for f64 {
    fn from(d: Degrees) -> f64 {
        d.0
    }
}

impl From<Degrees> for Radians {
    fn from(d: Degrees) -> Radians {
        d.to_radians()
    }
}

impl fmt::Display for Degrees {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}°", self.0)
    }
}

/// Angle in radians
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Radians(f64);

impl Eq for Radians {}

impl PartialOrd for Radians {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Radians {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for Radians {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Radians {
    /// Create a new angle in radians
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Radians(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Convert to degrees
    #[inline]
    #[must_use]
    pub fn to_degrees(self) -> Degrees {
        Degrees(self.0.to_degrees())
    }
}

impl From<f64> for Radians {
    fn from(v: f64) -> Self {
        Radians(v)
    }
}

impl From<Radians> for f64 {
    fn from(r: Radians) -> f64 {
        r.0
    }
}

impl From<Radians> for Degrees {
    fn from(r: Radians) -> Degrees {
        r.to_degrees()
    }
}

impl fmt::Display for Radians {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4} rad", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_knots_to_mps() {
        let kn = Knots::new(10.0);
        let mps = kn.to_meters_per_second();
        assert!((mps.0 - 5.14444).abs() < 1e-9);
    }

    #[test]
    fn test_mps_to_knots_roundtrip() {
        let mps = MetersPerSecond::new(7.7);
        let back = mps.to_knots().to_meters_per_second();
        assert!((back.0 - 7.7).abs() < 1e-12);
    }

    #[test]
    fn test_degrees_radians() {
        let d = Degrees::new(180.0);
        assert!((*d.to_radians() - std::f64::consts::PI).abs() < 1e-12);
        assert!((*Radians::new(std::f64::consts::FRAC_PI_2).to_degrees() - 90.0).abs() < 1e-12);
    }

    #[test]
    fn test_total_ordering_handles_nan() {
        let mut speeds = vec![Knots::new(f64::NAN), Knots::new(3.0), Knots::new(1.0)];
        speeds.sort();
        assert_eq!(*speeds[0], 1.0);
        assert_eq!(*speeds[1], 3.0);
        assert!(speeds[2].is_nan());
    }

    #[test]
    fn test_display() {
        assert_eq!(Knots::new(12.345).to_string(), "12.35 kn");
        assert_eq!(Degrees::new(45.0).to_string(), "45.0°");
        assert_eq!(MetersPerSecond::new(1.0).to_string(), "1.000 m/s");
    }
}
