//! # Unit Types
//!
//! Type-safe wrappers for the handful of units a carton quote moves between.
//! They are plain f64 newtypes so JSON stays clean (just numbers) and the
//! arithmetic is free at runtime.
//!
//! ## Metric Units
//!
//! Sheet and window dimensions arrive in millimetres, board and film weights
//! in grams per square metre (gsm), and prices either per kilogram or per
//! tonne:
//! - Length: millimetres (mm)
//! - Area: square metres (m²)
//! - Substance: grams per square metre (gsm)
//! - Mass: kilograms (kg)
//! - Price: dollars per kilogram, dollars per tonne (1 t = 1000 kg)
//!
//! ## Example
//!
//! ```rust
//! use cost_core::units::{Gsm, Millimeters, PricePerKg, PricePerTonne, SquareMeters};
//!
//! let area = SquareMeters::from_rect(Millimeters(720.0), Millimeters(530.0));
//! assert!((area.0 - 0.3816).abs() < 1e-12);
//!
//! let board = Gsm(330.0).mass_of(area);
//! let per_kg: PricePerKg = PricePerTonne(1350.0).into();
//! assert!((per_kg.cost_of(board) - 0.1700028).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::Mul;

/// Clamp a raw input to `[0, ∞)`. NaN and infinities become zero.
pub fn non_negative(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

// ============================================================================
// Length & Area Units
// ============================================================================

/// Length in millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

/// Area in square metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SquareMeters(pub f64);

impl SquareMeters {
    /// Area of a rectangle given in millimetres. Negative sides count as zero.
    pub fn from_rect(length: Millimeters, width: Millimeters) -> Self {
        SquareMeters(length.0.max(0.0) * width.0.max(0.0) / 1_000_000.0)
    }
}

// ============================================================================
// Substance & Mass Units
// ============================================================================

/// Substance (basis weight) in grams per square metre
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Gsm(pub f64);

impl Gsm {
    /// Mass of `area` at this substance: m² × g/m² / 1000 = kg
    pub fn mass_of(self, area: SquareMeters) -> Kilograms {
        Kilograms(area.0 * self.0 / 1000.0)
    }
}

/// Mass in kilograms
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilograms(pub f64);

// ============================================================================
// Price Units
// ============================================================================

/// Price in dollars per kilogram
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PricePerKg(pub f64);

/// Price in dollars per tonne
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PricePerTonne(pub f64);

impl From<PricePerTonne> for PricePerKg {
    fn from(per_tonne: PricePerTonne) -> Self {
        PricePerKg(per_tonne.0 / 1000.0)
    }
}

impl PricePerKg {
    /// Cost of `mass` at this price
    pub fn cost_of(self, mass: Kilograms) -> f64 {
        mass.0 * self.0
    }
}

/// Scale a mass, e.g. one window's film by the windows on each piece
impl Mul<f64> for Kilograms {
    type Output = Kilograms;
    fn mul(self, rhs: f64) -> Self::Output {
        Kilograms(self.0 * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_area() {
        let area = SquareMeters::from_rect(Millimeters(1000.0), Millimeters(500.0));
        assert_eq!(area.0, 0.5);
    }

    #[test]
    fn test_negative_sides_clamp_to_zero() {
        let area = SquareMeters::from_rect(Millimeters(-720.0), Millimeters(530.0));
        assert_eq!(area.0, 0.0);
    }

    #[test]
    fn test_tonne_to_kg() {
        let per_kg: PricePerKg = PricePerTonne(1350.0).into();
        assert_eq!(per_kg.0, 1.35);
    }

    #[test]
    fn test_gsm_mass() {
        // 1 m² of 330 gsm board weighs 0.33 kg
        let kg = Gsm(330.0).mass_of(SquareMeters(1.0));
        assert!((kg.0 - 0.33).abs() < 1e-12);
    }

    #[test]
    fn test_non_negative() {
        assert_eq!(non_negative(-3.0), 0.0);
        assert_eq!(non_negative(f64::NAN), 0.0);
        assert_eq!(non_negative(f64::INFINITY), 0.0);
        assert_eq!(non_negative(12.5), 12.5);
    }

    #[test]
    fn test_scale_mass() {
        assert_eq!((Kilograms(0.0002472) * 2.0).0, 0.0004944);
    }

    #[test]
    fn test_serialization() {
        let mm = Millimeters(720.0);
        let json = serde_json::to_string(&mm).unwrap();
        assert_eq!(json, "720.0");

        let roundtrip: Millimeters = serde_json::from_str(&json).unwrap();
        assert_eq!(mm, roundtrip);
    }
}
