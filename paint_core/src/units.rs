//! # Unit Types
//!
//! Lightweight newtype wrappers for the metric units the engine works in.
//! Profile geometry arrives in millimetres; perimeters leave in metres and
//! areas in square metres.
//!
//! ## Example
//!
//! ```rust
//! use paint_core::units::{Meters, Millimeters};
//!
//! let perimeter = Millimeters(628.3);
//! let meters: Meters = perimeter.into();
//! assert!((meters.0 - 0.6283).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// Millimetres per metre
pub const MM_PER_M: f64 = 1000.0;

/// Decimal places kept for perimeters (m)
pub const PERIMETER_DECIMALS: u32 = 3;

/// Decimal places kept for plate area per piece (m²)
pub const PLATE_AREA_DECIMALS: u32 = 4;

/// Decimal places kept for total areas (m²)
pub const TOTAL_AREA_DECIMALS: u32 = 2;

// ============================================================================
// Length Units
// ============================================================================

/// Length in millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

/// Length in metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

impl From<Millimeters> for Meters {
    fn from(mm: Millimeters) -> Self {
        Meters(mm.0 / MM_PER_M)
    }
}

impl From<Meters> for Millimeters {
    fn from(m: Meters) -> Self {
        Millimeters(m.0 * MM_PER_M)
    }
}

// ============================================================================
// Area Units
// ============================================================================

/// Area in square metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SquareMeters(pub f64);

impl Mul for Meters {
    type Output = SquareMeters;
    fn mul(self, rhs: Meters) -> SquareMeters {
        SquareMeters(self.0 * rhs.0)
    }
}

// ============================================================================
// Arithmetic Implementations
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }

            /// Round to a fixed number of decimal places
            pub fn rounded(self, decimals: u32) -> Self {
                Self(round_to(self.0, decimals))
            }
        }
    };
}

impl_arithmetic!(Millimeters);
impl_arithmetic!(Meters);
impl_arithmetic!(SquareMeters);

/// Round half away from zero to `decimals` places.
///
/// Only applied at output boundaries; intermediate math stays at full precision.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mm_to_meters() {
        let m: Meters = Millimeters(2500.0).into();
        assert_eq!(m.0, 2.5);

        let mm: Millimeters = Meters(0.04).into();
        assert_eq!(mm.0, 40.0);
    }

    #[test]
    fn test_meters_product_is_area() {
        let area = Meters(1.0) * Meters(2.0);
        assert_eq!(area, SquareMeters(2.0));
    }

    #[test]
    fn test_arithmetic() {
        let a = Millimeters(100.0);
        let b = Millimeters(40.0);
        assert_eq!((a + b).0, 140.0);
        assert_eq!((a - b).0, 60.0);
        assert_eq!((b * 4.0).0, 160.0);
        assert_eq!((a / 2.0).0, 50.0);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(0.628_318_5, 3), 0.628);
        assert_eq!(round_to(2.5, 0), 3.0);
        assert_eq!(round_to(37.679_999_999, 2), 37.68);
        assert_eq!(Meters(1.23456).rounded(4), Meters(1.2346));
    }

    #[test]
    fn test_serialization() {
        let m = Meters(6.0);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "6.0");

        let roundtrip: Meters = serde_json::from_str(&json).unwrap();
        assert_eq!(m, roundtrip);
    }
}
