//! # Configuration
//!
//! Rate tables, material tables, make-ready policies and pricing rules that
//! drive the engine. A configuration document is usually partial: a plant
//! overrides its own press speeds and leaves everything else alone. Every
//! section therefore has two shapes:
//!
//! - `Partial*` - what was actually written in the document (all `Option`)
//! - the resolved section - every field filled, either from the document or
//!   from the section's `DEFAULT` constant
//!
//! Each section is merged field-by-field by its own `resolve` function, so
//! the fallback for any one value can be read (and tested) in isolation.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "materials": [{ "name": "FBB", "gsm": 330, "price_per_tonne": 1350 }],
//!   "rates": { "die": { "sph": 1400 }, "glue": { "op2": 50 } },
//!   "dieMakeReadyBuckets": { "very": 120 },
//!   "minMarkupTiers": [{ "minQty": 1000, "minMarkup": 0.7 }],
//!   "pricing": { "round_inc": 0.5, "pretty_end": "0.95", "default_target": 0.25 }
//! }
//! ```
//!
//! Keys may be written in snake_case, camelCase, or the short forms used by
//! older configuration files (`sph`, `setup_hr`, `lamMakeReadyPct`, ...).
//!
//! ## Example
//!
//! ```rust
//! use cost_core::config::{Configuration, PartialConfig};
//!
//! let partial: PartialConfig =
//!     serde_json::from_str(r#"{ "rates": { "die": { "sph": 1400 } } }"#).unwrap();
//! let config = Configuration::resolve(partial);
//!
//! assert_eq!(config.rates.die.sheets_per_hour, 1400.0);
//! // Untouched fields of the same section keep their defaults
//! assert_eq!(config.rates.die.run_rate, 40.0);
//! ```

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::materials::{
    default_boards, default_lamination_stocks, default_window_films, Board, LaminationStock, WindowFilm,
};
use crate::order::{DieWasteBucket, GlueType};
use crate::units::non_negative;

/// Index of the board selected when an order names none (FBB in the default table)
pub const DEFAULT_BOARD_INDEX: usize = 1;

/// Die make-ready sheets used for an unrecognised waste bucket
pub const FALLBACK_DIE_WASTE_SHEETS: f64 = 50.0;

/// Default order quantities offered to the user
pub const DEFAULT_QUANTITY_OPTIONS: [f64; 17] = [
    1000.0, 2500.0, 3000.0, 5000.0, 10000.0, 15000.0, 20000.0, 25000.0, 30000.0, 35000.0, 40000.0,
    50000.0, 60000.0, 70000.0, 80000.0, 90000.0, 100000.0,
];

/// Default laminating film substance (gsm)
pub const DEFAULT_LAMINATION_FILM_GSM: f64 = 24.0;

/// Default lamination make-ready, as a fraction of base sheets
pub const DEFAULT_LAMINATION_MAKE_READY: f64 = 0.02;

/// Default window-patch make-ready, as a fraction of pieces
pub const DEFAULT_WINDOW_PATCH_MAKE_READY: f64 = 0.015;

fn pick(value: Option<f64>, default: f64) -> f64 {
    non_negative(value.unwrap_or(default))
}

// ============================================================================
// Rate Tables
// ============================================================================

/// Setup + run rates for a sheet-fed stage (sheeting, die-cutting)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SheetRunRates {
    /// Make-ready time (hours)
    pub setup_hours: f64,
    /// Hourly rate charged during make-ready ($/h)
    pub setup_rate: f64,
    /// Running speed (sheets per hour)
    pub sheets_per_hour: f64,
    /// Hourly rate charged while running ($/h)
    pub run_rate: f64,
}

impl SheetRunRates {
    pub const SHEETING_DEFAULT: SheetRunRates = SheetRunRates {
        setup_hours: 1.5,
        setup_rate: 40.0,
        sheets_per_hour: 2000.0,
        run_rate: 35.0,
    };

    pub const DIE_DEFAULT: SheetRunRates = SheetRunRates {
        setup_hours: 1.5,
        setup_rate: 40.0,
        sheets_per_hour: 1100.0,
        run_rate: 40.0,
    };

    /// Make-ready cost: setup hours × setup rate
    pub fn setup_cost(&self) -> f64 {
        self.setup_hours * self.setup_rate
    }

    /// Running cost of one sheet, zero when no speed is configured
    pub fn run_cost_per_sheet(&self) -> f64 {
        if self.sheets_per_hour > 0.0 {
            self.run_rate / self.sheets_per_hour
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PartialSheetRunRates {
    #[serde(alias = "setup_hr", alias = "setupHours")]
    pub setup_hours: Option<f64>,
    #[serde(alias = "setupRate")]
    pub setup_rate: Option<f64>,
    #[serde(alias = "sph", alias = "sheetsPerHour")]
    pub sheets_per_hour: Option<f64>,
    #[serde(alias = "runRate")]
    pub run_rate: Option<f64>,
}

impl PartialSheetRunRates {
    pub fn resolve(self, defaults: SheetRunRates) -> SheetRunRates {
        SheetRunRates {
            setup_hours: pick(self.setup_hours, defaults.setup_hours),
            setup_rate: pick(self.setup_rate, defaults.setup_rate),
            sheets_per_hour: pick(self.sheets_per_hour, defaults.sheets_per_hour),
            run_rate: pick(self.run_rate, defaults.run_rate),
        }
    }
}

/// Lamination machine rates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaminationRates {
    /// Make-ready time (hours)
    pub setup_hours: f64,
    /// Hourly rate for both make-ready and running ($/h)
    pub rate: f64,
    /// Running speed (sheets per hour)
    pub sheets_per_hour: f64,
}

impl LaminationRates {
    pub const DEFAULT: LaminationRates = LaminationRates {
        setup_hours: 1.5,
        rate: 35.0,
        sheets_per_hour: 1000.0,
    };
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PartialLaminationRates {
    #[serde(alias = "setup_hr", alias = "setupHours")]
    pub setup_hours: Option<f64>,
    pub rate: Option<f64>,
    #[serde(alias = "sph", alias = "sheetsPerHour")]
    pub sheets_per_hour: Option<f64>,
}

impl PartialLaminationRates {
    pub fn resolve(self) -> LaminationRates {
        let d = LaminationRates::DEFAULT;
        LaminationRates {
            setup_hours: pick(self.setup_hours, d.setup_hours),
            rate: pick(self.rate, d.rate),
            sheets_per_hour: pick(self.sheets_per_hour, d.sheets_per_hour),
        }
    }
}

/// Window-patching machine rates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowPatchRates {
    /// Make-ready time (hours)
    pub setup_hours: f64,
    /// Hourly rate for both make-ready and running ($/h)
    pub rate: f64,
    /// Running speed (pieces per hour)
    pub pieces_per_hour: f64,
}

impl WindowPatchRates {
    pub const DEFAULT: WindowPatchRates = WindowPatchRates {
        setup_hours: 1.5,
        rate: 35.0,
        pieces_per_hour: 800.0,
    };
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PartialWindowPatchRates {
    #[serde(alias = "setup_hr", alias = "setupHours")]
    pub setup_hours: Option<f64>,
    pub rate: Option<f64>,
    #[serde(alias = "pph", alias = "piecesPerHour")]
    pub pieces_per_hour: Option<f64>,
}

impl PartialWindowPatchRates {
    pub fn resolve(self) -> WindowPatchRates {
        let d = WindowPatchRates::DEFAULT;
        WindowPatchRates {
            setup_hours: pick(self.setup_hours, d.setup_hours),
            rate: pick(self.rate, d.rate),
            pieces_per_hour: pick(self.pieces_per_hour, d.pieces_per_hour),
        }
    }
}

/// Folder-gluer rates. The line runs with two operators.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GluingRates {
    /// Running speed (pieces per hour)
    pub pieces_per_hour: f64,
    /// Feeder operator rate ($/h)
    pub operator_one_rate: f64,
    /// Packer operator rate ($/h)
    pub operator_two_rate: f64,
}

impl GluingRates {
    pub const DEFAULT: GluingRates = GluingRates {
        pieces_per_hour: 2000.0,
        operator_one_rate: 35.0,
        operator_two_rate: 45.0,
    };

    /// Combined crew rate while running
    pub fn crew_rate(&self) -> f64 {
        self.operator_one_rate + self.operator_two_rate
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PartialGluingRates {
    #[serde(alias = "sph", alias = "pph", alias = "piecesPerHour")]
    pub pieces_per_hour: Option<f64>,
    #[serde(alias = "op1")]
    pub operator_one_rate: Option<f64>,
    #[serde(alias = "op2")]
    pub operator_two_rate: Option<f64>,
}

impl PartialGluingRates {
    pub fn resolve(self) -> GluingRates {
        let d = GluingRates::DEFAULT;
        GluingRates {
            pieces_per_hour: pick(self.pieces_per_hour, d.pieces_per_hour),
            operator_one_rate: pick(self.operator_one_rate, d.operator_one_rate),
            operator_two_rate: pick(self.operator_two_rate, d.operator_two_rate),
        }
    }
}

/// Printing press rates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrintingRates {
    /// Running speed (sheets per hour)
    pub sheets_per_hour: f64,
    /// Press + crew rate ($/h), the default for an order's run rate
    pub combined_rate: f64,
    /// Nominal setup hours. Estimates derive setup from the ink count instead.
    pub setup_hours: f64,
}

impl PrintingRates {
    pub const DEFAULT: PrintingRates = PrintingRates {
        sheets_per_hour: 5000.0,
        combined_rate: 65.0,
        setup_hours: 1.0,
    };
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PartialPrintingRates {
    #[serde(alias = "sph", alias = "sheetsPerHour")]
    pub sheets_per_hour: Option<f64>,
    #[serde(alias = "combinedRate")]
    pub combined_rate: Option<f64>,
    #[serde(alias = "setup_hr", alias = "setupHours")]
    pub setup_hours: Option<f64>,
}

impl PartialPrintingRates {
    pub fn resolve(self) -> PrintingRates {
        let d = PrintingRates::DEFAULT;
        PrintingRates {
            sheets_per_hour: pick(self.sheets_per_hour, d.sheets_per_hour),
            combined_rate: pick(self.combined_rate, d.combined_rate),
            setup_hours: pick(self.setup_hours, d.setup_hours),
        }
    }
}

/// Rate tables for every stage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StageRates {
    pub sheet: SheetRunRates,
    pub die: SheetRunRates,
    pub lamination: LaminationRates,
    pub window_patch: WindowPatchRates,
    pub gluing: GluingRates,
    pub printing: PrintingRates,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PartialStageRates {
    pub sheet: Option<PartialSheetRunRates>,
    pub die: Option<PartialSheetRunRates>,
    #[serde(alias = "lam")]
    pub lamination: Option<PartialLaminationRates>,
    #[serde(alias = "wp", alias = "windowPatch")]
    pub window_patch: Option<PartialWindowPatchRates>,
    #[serde(alias = "glue")]
    pub gluing: Option<PartialGluingRates>,
    #[serde(alias = "print")]
    pub printing: Option<PartialPrintingRates>,
}

impl PartialStageRates {
    pub fn resolve(self) -> StageRates {
        StageRates {
            sheet: self.sheet.unwrap_or_default().resolve(SheetRunRates::SHEETING_DEFAULT),
            die: self.die.unwrap_or_default().resolve(SheetRunRates::DIE_DEFAULT),
            lamination: self.lamination.unwrap_or_default().resolve(),
            window_patch: self.window_patch.unwrap_or_default().resolve(),
            gluing: self.gluing.unwrap_or_default().resolve(),
            printing: self.printing.unwrap_or_default().resolve(),
        }
    }
}

// ============================================================================
// Consumables
// ============================================================================

/// Ink or coating consumption and price
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConsumableSpec {
    /// Price ($/kg)
    pub price_per_kg: f64,
    /// Laydown at 100% coverage (g/m²)
    pub g_per_m2_100pct: f64,
    /// Extra press rate while coating ($/h); zero means no surcharge
    pub rate: f64,
}

impl ConsumableSpec {
    pub const INK_DEFAULT: ConsumableSpec = ConsumableSpec {
        price_per_kg: 0.0,
        g_per_m2_100pct: 1.5,
        rate: 0.0,
    };

    pub const COATING_DEFAULT: ConsumableSpec = ConsumableSpec {
        price_per_kg: 0.0,
        g_per_m2_100pct: 2.0,
        rate: 0.0,
    };
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PartialConsumableSpec {
    #[serde(alias = "pricePerKg")]
    pub price_per_kg: Option<f64>,
    #[serde(alias = "gPerM2", alias = "grams_per_m2")]
    pub g_per_m2_100pct: Option<f64>,
    pub rate: Option<f64>,
}

impl PartialConsumableSpec {
    pub fn resolve(self, defaults: ConsumableSpec) -> ConsumableSpec {
        ConsumableSpec {
            price_per_kg: pick(self.price_per_kg, defaults.price_per_kg),
            g_per_m2_100pct: pick(self.g_per_m2_100pct, defaults.g_per_m2_100pct),
            rate: pick(self.rate, defaults.rate),
        }
    }
}

/// Lamination film table and the shared film substance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaminationTable {
    pub stocks: Vec<LaminationStock>,
    /// Film substance (gsm), the same for every stock
    pub film_gsm: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PartialLaminationTable {
    pub stocks: Option<Vec<LaminationStock>>,
    #[serde(alias = "filmGsm")]
    pub film_gsm: Option<f64>,
}

impl PartialLaminationTable {
    pub fn resolve(self) -> LaminationTable {
        LaminationTable {
            stocks: non_empty_or(self.stocks, default_lamination_stocks()),
            film_gsm: pick(self.film_gsm, DEFAULT_LAMINATION_FILM_GSM),
        }
    }
}

fn non_empty_or<T: Clone>(list: Option<Vec<T>>, defaults: &[T]) -> Vec<T> {
    match list {
        Some(items) if !items.is_empty() => items,
        _ => defaults.to_vec(),
    }
}

// ============================================================================
// Make-Ready Policies
// ============================================================================

/// Die-cutting make-ready sheets by job complexity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DieMakeReadyBuckets {
    pub simple: f64,
    pub standard: f64,
    pub intricate: f64,
    pub very_intricate: f64,
}

impl DieMakeReadyBuckets {
    pub const DEFAULT: DieMakeReadyBuckets = DieMakeReadyBuckets {
        simple: 20.0,
        standard: 50.0,
        intricate: 75.0,
        very_intricate: 100.0,
    };

    /// Waste sheets for a bucket. Unrecognised buckets use
    /// [`FALLBACK_DIE_WASTE_SHEETS`].
    pub fn sheets_for(&self, bucket: DieWasteBucket) -> f64 {
        match bucket {
            DieWasteBucket::Simple => self.simple,
            DieWasteBucket::Standard => self.standard,
            DieWasteBucket::Intricate => self.intricate,
            DieWasteBucket::VeryIntricate => self.very_intricate,
            DieWasteBucket::Unrecognized => FALLBACK_DIE_WASTE_SHEETS,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PartialDieMakeReadyBuckets {
    pub simple: Option<f64>,
    pub standard: Option<f64>,
    pub intricate: Option<f64>,
    #[serde(alias = "very", alias = "veryIntricate")]
    pub very_intricate: Option<f64>,
}

impl PartialDieMakeReadyBuckets {
    pub fn resolve(self) -> DieMakeReadyBuckets {
        let d = DieMakeReadyBuckets::DEFAULT;
        DieMakeReadyBuckets {
            simple: pick(self.simple, d.simple),
            standard: pick(self.standard, d.standard),
            intricate: pick(self.intricate, d.intricate),
            very_intricate: pick(self.very_intricate, d.very_intricate),
        }
    }
}

/// Folder-gluer setup and make-ready for one gluing style
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlueProfile {
    /// Setup time (hours), billed at one operator
    pub setup_hours: f64,
    /// Make-ready spoilage as a fraction of ordered pieces
    pub make_ready_percent: f64,
    /// Fixed make-ready spoilage (pieces)
    pub make_ready_fixed: f64,
}

impl GlueProfile {
    /// Profile used for an unrecognised gluing type
    pub const FALLBACK: GlueProfile = GlueProfile {
        setup_hours: 3.0,
        make_ready_percent: 0.03,
        make_ready_fixed: 0.0,
    };
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PartialGlueProfile {
    #[serde(alias = "setup_hr", alias = "setupHours")]
    pub setup_hours: Option<f64>,
    #[serde(alias = "mr_pieces_pct", alias = "mrPiecesPct")]
    pub make_ready_percent: Option<f64>,
    #[serde(alias = "mr_fixed", alias = "mrFixed")]
    pub make_ready_fixed: Option<f64>,
}

impl PartialGlueProfile {
    pub fn resolve(self, defaults: GlueProfile) -> GlueProfile {
        GlueProfile {
            setup_hours: pick(self.setup_hours, defaults.setup_hours),
            make_ready_percent: pick(self.make_ready_percent, defaults.make_ready_percent),
            make_ready_fixed: pick(self.make_ready_fixed, defaults.make_ready_fixed),
        }
    }
}

/// Gluing profiles for every gluing type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlueProfiles {
    pub straight_line: GlueProfile,
    pub crash_lock: GlueProfile,
    pub four_corner: GlueProfile,
    pub six_corner: GlueProfile,
}

impl GlueProfiles {
    pub const DEFAULT: GlueProfiles = GlueProfiles {
        straight_line: GlueProfile {
            setup_hours: 3.0,
            make_ready_percent: 0.03,
            make_ready_fixed: 0.0,
        },
        crash_lock: GlueProfile {
            setup_hours: 6.0,
            make_ready_percent: 0.06,
            make_ready_fixed: 0.0,
        },
        four_corner: GlueProfile {
            setup_hours: 4.0,
            make_ready_percent: 0.0,
            make_ready_fixed: 500.0,
        },
        six_corner: GlueProfile {
            setup_hours: 5.0,
            make_ready_percent: 0.0,
            make_ready_fixed: 750.0,
        },
    };

    /// Profile for a gluing type. Unrecognised types use [`GlueProfile::FALLBACK`].
    pub fn profile_for(&self, glue_type: GlueType) -> GlueProfile {
        match glue_type {
            GlueType::StraightLine => self.straight_line,
            GlueType::CrashLock => self.crash_lock,
            GlueType::FourCorner => self.four_corner,
            GlueType::SixCorner => self.six_corner,
            GlueType::Unrecognized => GlueProfile::FALLBACK,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PartialGlueProfiles {
    #[serde(alias = "sl", alias = "straightLine")]
    pub straight_line: Option<PartialGlueProfile>,
    #[serde(alias = "cl", alias = "crashLock")]
    pub crash_lock: Option<PartialGlueProfile>,
    #[serde(alias = "c4", alias = "fourCorner")]
    pub four_corner: Option<PartialGlueProfile>,
    #[serde(alias = "c6", alias = "sixCorner")]
    pub six_corner: Option<PartialGlueProfile>,
}

impl PartialGlueProfiles {
    pub fn resolve(self) -> GlueProfiles {
        let d = GlueProfiles::DEFAULT;
        GlueProfiles {
            straight_line: self.straight_line.unwrap_or_default().resolve(d.straight_line),
            crash_lock: self.crash_lock.unwrap_or_default().resolve(d.crash_lock),
            four_corner: self.four_corner.unwrap_or_default().resolve(d.four_corner),
            six_corner: self.six_corner.unwrap_or_default().resolve(d.six_corner),
        }
    }
}

/// Press make-ready sheet allowances
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrintMakeReady {
    /// Sheets for every print job
    pub base_sheets: f64,
    /// Extra sheets per ink unit
    pub per_colour_sheets: f64,
    /// Extra sheets when coating is on
    pub coating_adder_sheets: f64,
    /// Extra sheets for a varnish pass. Carried for rate-card completeness;
    /// no estimate applies it.
    pub varnish_adder_sheets: f64,
}

impl PrintMakeReady {
    pub const DEFAULT: PrintMakeReady = PrintMakeReady {
        base_sheets: 50.0,
        per_colour_sheets: 25.0,
        coating_adder_sheets: 20.0,
        varnish_adder_sheets: 10.0,
    };
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PartialPrintMakeReady {
    #[serde(alias = "baseSheets")]
    pub base_sheets: Option<f64>,
    #[serde(alias = "perColourSheets")]
    pub per_colour_sheets: Option<f64>,
    #[serde(alias = "coatingAdderSheets")]
    pub coating_adder_sheets: Option<f64>,
    #[serde(alias = "varnishAdderSheets")]
    pub varnish_adder_sheets: Option<f64>,
}

impl PartialPrintMakeReady {
    pub fn resolve(self) -> PrintMakeReady {
        let d = PrintMakeReady::DEFAULT;
        PrintMakeReady {
            base_sheets: pick(self.base_sheets, d.base_sheets),
            per_colour_sheets: pick(self.per_colour_sheets, d.per_colour_sheets),
            coating_adder_sheets: pick(self.coating_adder_sheets, d.coating_adder_sheets),
            varnish_adder_sheets: pick(self.varnish_adder_sheets, d.varnish_adder_sheets),
        }
    }
}

// ============================================================================
// Pricing Policy
// ============================================================================

/// One step of the minimum-markup ladder
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MarkupTier {
    /// Applies from this order quantity upward
    #[serde(alias = "minQty", alias = "minQuantity")]
    pub min_quantity: f64,
    /// Minimum (sell − cost) / cost for qualifying orders
    #[serde(alias = "minMarkup")]
    pub min_markup: f64,
}

/// Decimal suffix that quoted per-thousand prices are pushed to.
///
/// Serialises as a number (`0.95`) or the string `"none"`. Numeric strings
/// such as `"0.95"` are accepted when reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawPrettyEnding", into = "RawPrettyEnding")]
pub enum PrettyEnding {
    /// Leave the rounded price alone
    None,
    /// Force the fractional part to this value (e.g. 0.95)
    Ending(f64),
}

impl PrettyEnding {
    pub const DEFAULT: PrettyEnding = PrettyEnding::Ending(0.95);
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawPrettyEnding {
    Number(f64),
    Text(String),
}

impl From<RawPrettyEnding> for PrettyEnding {
    fn from(raw: RawPrettyEnding) -> Self {
        match raw {
            RawPrettyEnding::Number(value) => PrettyEnding::Ending(value),
            RawPrettyEnding::Text(text) => {
                let trimmed = text.trim();
                if trimmed.eq_ignore_ascii_case("none") {
                    return PrettyEnding::None;
                }
                match trimmed.parse::<f64>() {
                    Ok(value) if value.is_finite() => PrettyEnding::Ending(value),
                    _ => {
                        warn!(value = %text, "unreadable pretty ending, using default");
                        PrettyEnding::DEFAULT
                    }
                }
            }
        }
    }
}

impl From<PrettyEnding> for RawPrettyEnding {
    fn from(ending: PrettyEnding) -> Self {
        match ending {
            PrettyEnding::None => RawPrettyEnding::Text("none".to_string()),
            PrettyEnding::Ending(value) => RawPrettyEnding::Number(value),
        }
    }
}

/// Price rounding and margin defaults
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingPolicy {
    /// Per-thousand prices are rounded up to a multiple of this
    pub rounding_increment: f64,
    /// Decimal suffix applied after rounding
    pub pretty_ending: PrettyEnding,
    /// Target margin (sell − cost) / sell used when an order gives none
    pub default_target_margin: f64,
}

impl PricingPolicy {
    pub const DEFAULT: PricingPolicy = PricingPolicy {
        rounding_increment: 0.5,
        pretty_ending: PrettyEnding::DEFAULT,
        default_target_margin: 0.25,
    };
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PartialPricingPolicy {
    #[serde(alias = "round_inc", alias = "roundInc")]
    pub rounding_increment: Option<f64>,
    #[serde(alias = "pretty_end", alias = "prettyEnd")]
    pub pretty_ending: Option<PrettyEnding>,
    #[serde(alias = "default_target", alias = "defaultTarget")]
    pub default_target_margin: Option<f64>,
}

impl PartialPricingPolicy {
    pub fn resolve(self) -> PricingPolicy {
        let d = PricingPolicy::DEFAULT;
        PricingPolicy {
            rounding_increment: pick(self.rounding_increment, d.rounding_increment),
            pretty_ending: self.pretty_ending.unwrap_or(d.pretty_ending),
            default_target_margin: pick(self.default_target_margin, d.default_target_margin),
        }
    }
}

// ============================================================================
// Whole Document
// ============================================================================

/// A configuration document as written, before defaults are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PartialConfig {
    pub materials: Option<Vec<Board>>,
    #[serde(alias = "quantityOptions", alias = "qtyOptions")]
    pub quantity_options: Option<Vec<f64>>,
    pub lamination: Option<PartialLaminationTable>,
    #[serde(alias = "windowFilms")]
    pub window_films: Option<Vec<WindowFilm>>,
    pub rates: Option<PartialStageRates>,
    pub ink: Option<PartialConsumableSpec>,
    pub coating: Option<PartialConsumableSpec>,
    #[serde(alias = "dieMakeReadyBuckets")]
    pub die_make_ready_buckets: Option<PartialDieMakeReadyBuckets>,
    #[serde(alias = "lamMakeReadyPct", alias = "laminationMakeReadyPercent")]
    pub lamination_make_ready_percent: Option<f64>,
    #[serde(alias = "wpMakeReadyPct", alias = "windowPatchMakeReadyPercent")]
    pub window_patch_make_ready_percent: Option<f64>,
    #[serde(alias = "glueSetups", alias = "glueSetupProfiles")]
    pub glue_setup_profiles: Option<PartialGlueProfiles>,
    #[serde(alias = "printMR", alias = "printMakeReady")]
    pub print_make_ready: Option<PartialPrintMakeReady>,
    #[serde(alias = "minMarkupTiers")]
    pub min_markup_tiers: Option<Vec<MarkupTier>>,
    pub pricing: Option<PartialPricingPolicy>,
}

/// Fully resolved configuration. Immutable input to every estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    pub materials: Vec<Board>,
    pub quantity_options: Vec<f64>,
    pub lamination: LaminationTable,
    pub window_films: Vec<WindowFilm>,
    pub rates: StageRates,
    pub ink: ConsumableSpec,
    pub coating: ConsumableSpec,
    pub die_make_ready_buckets: DieMakeReadyBuckets,
    /// Lamination spoilage as a fraction of base sheets
    pub lamination_make_ready_percent: f64,
    /// Window-patch spoilage as a fraction of ordered pieces
    pub window_patch_make_ready_percent: f64,
    pub glue_setup_profiles: GlueProfiles,
    pub print_make_ready: PrintMakeReady,
    /// Empty means "use the built-in staircase"
    pub min_markup_tiers: Vec<MarkupTier>,
    pub pricing: PricingPolicy,
}

impl Configuration {
    /// Fill every missing field of `partial` from the documented defaults.
    pub fn resolve(partial: PartialConfig) -> Self {
        Configuration {
            materials: non_empty_or(partial.materials, default_boards()),
            quantity_options: resolve_quantity_options(partial.quantity_options),
            lamination: partial.lamination.unwrap_or_default().resolve(),
            window_films: non_empty_or(partial.window_films, default_window_films()),
            rates: partial.rates.unwrap_or_default().resolve(),
            ink: partial.ink.unwrap_or_default().resolve(ConsumableSpec::INK_DEFAULT),
            coating: partial.coating.unwrap_or_default().resolve(ConsumableSpec::COATING_DEFAULT),
            die_make_ready_buckets: partial.die_make_ready_buckets.unwrap_or_default().resolve(),
            lamination_make_ready_percent: pick(
                partial.lamination_make_ready_percent,
                DEFAULT_LAMINATION_MAKE_READY,
            ),
            window_patch_make_ready_percent: pick(
                partial.window_patch_make_ready_percent,
                DEFAULT_WINDOW_PATCH_MAKE_READY,
            ),
            glue_setup_profiles: partial.glue_setup_profiles.unwrap_or_default().resolve(),
            print_make_ready: partial.print_make_ready.unwrap_or_default().resolve(),
            min_markup_tiers: partial.min_markup_tiers.unwrap_or_default(),
            pricing: partial.pricing.unwrap_or_default().resolve(),
        }
    }

    /// Look up a board by name.
    ///
    /// With no name, or an unknown one, the default selection (the second
    /// board, FBB in the built-in table) is used, then the first board.
    pub fn board(&self, name: Option<&str>) -> Option<&Board> {
        if let Some(name) = name {
            if let Some(board) = self.materials.iter().find(|b| b.name == name) {
                return Some(board);
            }
            warn!(material = name, "unknown material, using default selection");
        }
        self.materials
            .get(DEFAULT_BOARD_INDEX)
            .or_else(|| self.materials.first())
    }

    /// Look up a lamination stock by key, falling back to the first stock.
    pub fn lamination_stock(&self, key: Option<&str>) -> Option<&LaminationStock> {
        let stocks = &self.lamination.stocks;
        if let Some(key) = key {
            if let Some(stock) = stocks.iter().find(|s| s.key == key) {
                return Some(stock);
            }
            warn!(stock = key, "unknown lamination stock, using first entry");
        }
        stocks.first()
    }

    /// Look up a window film by key, falling back to the first film.
    pub fn window_film(&self, key: Option<&str>) -> Option<&WindowFilm> {
        if let Some(key) = key {
            if let Some(film) = self.window_films.iter().find(|f| f.key == key) {
                return Some(film);
            }
            warn!(film = key, "unknown window film, using first entry");
        }
        self.window_films.first()
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration::resolve(PartialConfig::default())
    }
}

fn resolve_quantity_options(options: Option<Vec<f64>>) -> Vec<f64> {
    let kept: Vec<f64> = options
        .unwrap_or_default()
        .into_iter()
        .filter(|q| q.is_finite() && *q > 0.0)
        .collect();
    if kept.is_empty() {
        DEFAULT_QUANTITY_OPTIONS.to_vec()
    } else {
        kept
    }
}
