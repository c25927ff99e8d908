//! Board substrates.
//!
//! Each board is a named grade with a substance (gsm) and a reference price.
//! The price may be quoted per tonne (mill price lists) or per kilogram
//! (merchant sheets); [`PriceMode`] records which.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{CostError, CostResult};
use crate::units::{PricePerKg, PricePerTonne};

/// How a board price is expressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PriceMode {
    /// Dollars per tonne (the larger mass unit)
    #[default]
    #[serde(rename = "per_tonne", alias = "perTonne", alias = "tonne")]
    PerTonne,
    /// Dollars per kilogram (the smaller mass unit)
    #[serde(rename = "per_kg", alias = "perKg", alias = "kg")]
    PerKg,
}

impl PriceMode {
    /// All price modes
    pub const ALL: [PriceMode; 2] = [PriceMode::PerTonne, PriceMode::PerKg];

    /// Get the key used in JSON documents
    pub fn code(&self) -> &'static str {
        match self {
            PriceMode::PerTonne => "per_tonne",
            PriceMode::PerKg => "per_kg",
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CostResult<Self> {
        let letters: String = s
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .collect::<String>()
            .to_lowercase();
        match letters.as_str() {
            "pertonne" | "tonne" | "t" => Ok(PriceMode::PerTonne),
            "perkg" | "kg" => Ok(PriceMode::PerKg),
            _ => {
                let expected: Vec<&str> = PriceMode::ALL.iter().map(PriceMode::code).collect();
                Err(CostError::unknown_option("price mode", s, &expected))
            }
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            PriceMode::PerTonne => "$ / tonne",
            PriceMode::PerKg => "$ / kg",
        }
    }

    /// Convert a price in this mode to dollars per kilogram
    pub fn to_per_kg(self, price: f64) -> PricePerKg {
        match self {
            PriceMode::PerKg => PricePerKg(price),
            PriceMode::PerTonne => PricePerTonne(price).into(),
        }
    }
}

/// A board grade from the materials table.
///
/// ## JSON Example
///
/// ```json
/// { "name": "FBB", "gsm": 330, "price_per_tonne": 1350 }
/// ```
///
/// `grammage` is accepted for `gsm`, and `price_per_tonne` for `price`. When
/// `price_mode` is `"per_kg"` the price is read as dollars per kilogram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Board {
    /// Grade name shown in selectors (e.g. "FBB", "KRAFT")
    pub name: String,

    /// Substance in grams per square metre
    #[serde(alias = "grammage")]
    pub gsm: f64,

    /// Reference price, in `price_mode` units
    #[serde(alias = "price_per_tonne")]
    pub price: f64,

    /// Unit the reference price is quoted in
    pub price_mode: PriceMode,
}

impl Default for Board {
    fn default() -> Self {
        Board {
            name: String::new(),
            gsm: 0.0,
            price: 0.0,
            price_mode: PriceMode::PerTonne,
        }
    }
}

impl Board {
    /// Create a board priced per tonne
    pub fn per_tonne(name: impl Into<String>, gsm: f64, price_per_tonne: f64) -> Self {
        Board {
            name: name.into(),
            gsm,
            price: price_per_tonne,
            price_mode: PriceMode::PerTonne,
        }
    }

    /// Effective cost per kilogram.
    ///
    /// `price_override` replaces the reference price and `mode_override`
    /// replaces the reference unit. Negative prices count as zero.
    pub fn price_per_kg(&self, price_override: Option<f64>, mode_override: Option<PriceMode>) -> PricePerKg {
        let price = price_override.unwrap_or(self.price).max(0.0);
        mode_override.unwrap_or(self.price_mode).to_per_kg(price)
    }
}

static DEFAULT_BOARDS: Lazy<Vec<Board>> = Lazy::new(|| {
    vec![
        Board::per_tonne("MILKBOARD", 360.0, 1350.0),
        Board::per_tonne("FBB", 330.0, 1350.0),
        Board::per_tonne("KRAFT", 325.0, 1600.0),
        Board::per_tonne("2S KRAFT", 337.0, 1100.0),
    ]
});

/// Built-in board table
pub fn default_boards() -> &'static [Board] {
    &DEFAULT_BOARDS
}
