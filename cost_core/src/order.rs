//! # Order Parameters
//!
//! The caller-assembled snapshot of one quote request: how many cartons, on
//! what sheet, in which board, through which stages. The engine reads it and
//! never changes it.
//!
//! Every field has a default, so an order document only needs to name what
//! differs. Stage switches default to off. Gluing has no switch: every carton
//! is glued.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "order_quantity": 10000,
//!   "units_per_sheet": 4,
//!   "sheet_length_mm": 720,
//!   "sheet_width_mm": 530,
//!   "material": { "name": "FBB" },
//!   "sheeting": { "enabled": true },
//!   "die_cutting": { "enabled": true, "waste_bucket": "intricate" },
//!   "printing": { "enabled": true, "process_colours": 4, "coverage_percent": 35 },
//!   "gluing": { "glue_type": "cl" }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CostError, CostResult};
use crate::materials::PriceMode;
use crate::units::non_negative;

/// Most process (CMYK) colours a press can lay down
pub const MAX_PROCESS_COLOURS: f64 = 4.0;

/// Most spot colours a press can lay down
pub const MAX_SPOT_COLOURS: f64 = 6.0;

// ============================================================================
// Stage Choices
// ============================================================================

/// Die-cutting make-ready complexity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DieWasteBucket {
    /// Simple rectangular cut
    Simple,
    /// Typical carton die
    #[default]
    Standard,
    /// Many small features
    Intricate,
    /// Very intricate or delicate dies
    #[serde(alias = "very", alias = "veryIntricate")]
    VeryIntricate,
    /// Any bucket name this version does not know
    #[serde(other)]
    Unrecognized,
}

impl DieWasteBucket {
    /// All selectable buckets
    pub const ALL: [DieWasteBucket; 4] = [
        DieWasteBucket::Simple,
        DieWasteBucket::Standard,
        DieWasteBucket::Intricate,
        DieWasteBucket::VeryIntricate,
    ];

    /// Get the key used in order documents
    pub fn code(&self) -> &'static str {
        match self {
            DieWasteBucket::Simple => "simple",
            DieWasteBucket::Standard => "standard",
            DieWasteBucket::Intricate => "intricate",
            DieWasteBucket::VeryIntricate => "very_intricate",
            DieWasteBucket::Unrecognized => "unrecognized",
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CostResult<Self> {
        match s.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "simple" => Ok(DieWasteBucket::Simple),
            "standard" | "std" => Ok(DieWasteBucket::Standard),
            "intricate" => Ok(DieWasteBucket::Intricate),
            "very" | "very_intricate" | "veryintricate" => Ok(DieWasteBucket::VeryIntricate),
            _ => {
                let expected: Vec<&str> = DieWasteBucket::ALL.iter().map(DieWasteBucket::code).collect();
                Err(CostError::unknown_option("die make-ready bucket", s, &expected))
            }
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            DieWasteBucket::Simple => "Simple",
            DieWasteBucket::Standard => "Standard",
            DieWasteBucket::Intricate => "Intricate",
            DieWasteBucket::VeryIntricate => "Very intricate",
            DieWasteBucket::Unrecognized => "Unrecognized",
        }
    }
}

/// Folder-gluer style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum GlueType {
    /// Straight-line (side seam only)
    #[default]
    #[serde(rename = "sl", alias = "straight_line", alias = "straight-line", alias = "straightLine")]
    StraightLine,
    /// Crash-lock bottom
    #[serde(rename = "cl", alias = "crash_lock", alias = "crash-lock", alias = "crashLock")]
    CrashLock,
    /// Four-corner tray
    #[serde(rename = "c4", alias = "four_corner", alias = "4-corner", alias = "fourCorner")]
    FourCorner,
    /// Six-corner tray
    #[serde(rename = "c6", alias = "six_corner", alias = "6-corner", alias = "sixCorner")]
    SixCorner,
    /// Any gluing style this version does not know
    #[serde(other)]
    Unrecognized,
}

impl GlueType {
    /// All selectable gluing types
    pub const ALL: [GlueType; 4] = [
        GlueType::StraightLine,
        GlueType::CrashLock,
        GlueType::FourCorner,
        GlueType::SixCorner,
    ];

    /// Get the short code used in configuration files
    pub fn code(&self) -> &'static str {
        match self {
            GlueType::StraightLine => "sl",
            GlueType::CrashLock => "cl",
            GlueType::FourCorner => "c4",
            GlueType::SixCorner => "c6",
            GlueType::Unrecognized => "unrecognized",
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CostResult<Self> {
        match s.trim().to_lowercase().replace([' ', '_'], "-").as_str() {
            "sl" | "straight-line" | "straightline" => Ok(GlueType::StraightLine),
            "cl" | "crash-lock" | "crashlock" => Ok(GlueType::CrashLock),
            "c4" | "4-corner" | "four-corner" => Ok(GlueType::FourCorner),
            "c6" | "6-corner" | "six-corner" => Ok(GlueType::SixCorner),
            _ => {
                let expected: Vec<&str> = GlueType::ALL.iter().map(GlueType::code).collect();
                Err(CostError::unknown_option("gluing type", s, &expected))
            }
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            GlueType::StraightLine => "Straight-Line",
            GlueType::CrashLock => "Crash-Lock",
            GlueType::FourCorner => "4 Corner",
            GlueType::SixCorner => "6 Corner",
            GlueType::Unrecognized => "Unrecognized",
        }
    }
}

// ============================================================================
// Per-Stage Options
// ============================================================================

/// Board selection and price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MaterialChoice {
    /// Board name from the materials table; `None` takes the default board
    pub name: Option<String>,
    /// Replaces the board's reference price
    #[serde(alias = "price")]
    pub price_override: Option<f64>,
    /// Replaces the board's reference price unit
    pub price_mode: Option<PriceMode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SheetingOptions {
    pub enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DieCuttingOptions {
    pub enabled: bool,
    pub waste_bucket: DieWasteBucket,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrintingOptions {
    pub enabled: bool,
    /// CMYK units, 0-4
    #[serde(alias = "procCols")]
    pub process_colours: f64,
    /// Spot colour units, 0-6
    #[serde(alias = "spotCols")]
    pub spot_colours: f64,
    /// Average ink coverage, 0-100 %
    #[serde(alias = "coverage")]
    pub coverage_percent: f64,
    /// Inline coating pass
    #[serde(alias = "coatOn")]
    pub coating: bool,
    /// Press rate ($/h); `None` takes the configured combined rate
    pub run_rate_override: Option<f64>,
    /// Accepted for compatibility but never used: setup time is always
    /// derived from the ink count.
    pub setup_hours_override: Option<f64>,
}

impl Default for PrintingOptions {
    fn default() -> Self {
        PrintingOptions {
            enabled: false,
            process_colours: 4.0,
            spot_colours: 0.0,
            coverage_percent: 50.0,
            coating: false,
            run_rate_override: None,
            setup_hours_override: None,
        }
    }
}

impl PrintingOptions {
    /// Number of ink units on press
    pub fn ink_units(&self) -> f64 {
        self.process_colours + self.spot_colours
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LaminationOptions {
    pub enabled: bool,
    /// Stock key; `None` takes the first configured stock
    pub stock: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowPatchOptions {
    pub enabled: bool,
    /// Film key; `None` takes the first configured film
    pub film: Option<String>,
    pub window_width_mm: f64,
    pub window_height_mm: f64,
    /// Windows on each carton, at least 1
    pub windows_per_piece: f64,
}

impl Default for WindowPatchOptions {
    fn default() -> Self {
        WindowPatchOptions {
            enabled: false,
            film: None,
            window_width_mm: 60.0,
            window_height_mm: 40.0,
            windows_per_piece: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GluingOptions {
    pub glue_type: GlueType,
}

// ============================================================================
// Order Snapshot
// ============================================================================

/// Everything the engine needs to know about one quote request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderParameters {
    /// Cartons ordered
    #[serde(alias = "orderQty")]
    pub order_quantity: f64,
    /// Cartons imposed on one sheet (n-up), at least 1
    #[serde(alias = "nUp")]
    pub units_per_sheet: f64,
    #[serde(alias = "len")]
    pub sheet_length_mm: f64,
    #[serde(alias = "wid")]
    pub sheet_width_mm: f64,
    pub material: MaterialChoice,
    pub sheeting: SheetingOptions,
    pub die_cutting: DieCuttingOptions,
    pub printing: PrintingOptions,
    pub lamination: LaminationOptions,
    pub window_patch: WindowPatchOptions,
    pub gluing: GluingOptions,
    /// Target margin (sell − cost) / sell; `None` takes the configured default
    pub target_margin: Option<f64>,
}

impl Default for OrderParameters {
    fn default() -> Self {
        OrderParameters {
            order_quantity: 10000.0,
            units_per_sheet: 1.0,
            sheet_length_mm: 720.0,
            sheet_width_mm: 530.0,
            material: MaterialChoice::default(),
            sheeting: SheetingOptions::default(),
            die_cutting: DieCuttingOptions::default(),
            printing: PrintingOptions::default(),
            lamination: LaminationOptions::default(),
            window_patch: WindowPatchOptions::default(),
            gluing: GluingOptions::default(),
            target_margin: None,
        }
    }
}

impl OrderParameters {
    /// Copy with every numeric input pulled into its legal range.
    ///
    /// Negative quantities, dimensions, prices and rates become zero;
    /// units-per-sheet and windows-per-piece become at least 1; colour
    /// counts are whole numbers within press limits and coverage is 0-100.
    pub fn sanitized(&self) -> OrderParameters {
        let mut p = self.clone();
        p.order_quantity = non_negative(p.order_quantity);
        p.units_per_sheet = non_negative(p.units_per_sheet).max(1.0);
        p.sheet_length_mm = non_negative(p.sheet_length_mm);
        p.sheet_width_mm = non_negative(p.sheet_width_mm);
        p.material.price_override = p.material.price_override.map(non_negative);

        p.printing.process_colours = non_negative(p.printing.process_colours)
            .min(MAX_PROCESS_COLOURS)
            .floor();
        p.printing.spot_colours = non_negative(p.printing.spot_colours).min(MAX_SPOT_COLOURS).floor();
        p.printing.coverage_percent = non_negative(p.printing.coverage_percent).min(100.0);
        p.printing.run_rate_override = p.printing.run_rate_override.map(non_negative);

        p.window_patch.window_width_mm = non_negative(p.window_patch.window_width_mm);
        p.window_patch.window_height_mm = non_negative(p.window_patch.window_height_mm);
        p.window_patch.windows_per_piece = non_negative(p.window_patch.windows_per_piece).max(1.0);
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_defaults() {
        let params: OrderParameters = serde_json::from_str("{}").unwrap();
        assert_eq!(params, OrderParameters::default());
        assert_eq!(params.order_quantity, 10000.0);
        assert!(!params.sheeting.enabled);
        assert!(!params.die_cutting.enabled);
        assert!(!params.printing.enabled);
        assert_eq!(params.die_cutting.waste_bucket, DieWasteBucket::Standard);
        assert_eq!(params.gluing.glue_type, GlueType::StraightLine);
    }

    #[test]
    fn test_unknown_choice_names_become_unrecognized() {
        let params: OrderParameters = serde_json::from_str(
            r#"{ "die_cutting": { "waste_bucket": "extreme" }, "gluing": { "glue_type": "hotmelt" } }"#,
        )
        .unwrap();
        assert_eq!(params.die_cutting.waste_bucket, DieWasteBucket::Unrecognized);
        assert_eq!(params.gluing.glue_type, GlueType::Unrecognized);
    }

    #[test]
    fn test_choice_aliases() {
        let bucket: DieWasteBucket = serde_json::from_str(r#""very""#).unwrap();
        assert_eq!(bucket, DieWasteBucket::VeryIntricate);
        let glue: GlueType = serde_json::from_str(r#""straight-line""#).unwrap();
        assert_eq!(glue, GlueType::StraightLine);
        let glue: GlueType = serde_json::from_str(r#""c6""#).unwrap();
        assert_eq!(glue, GlueType::SixCorner);
        assert_eq!(serde_json::to_string(&GlueType::CrashLock).unwrap(), r#""cl""#);
    }

    #[test]
    fn test_flexible_parsing() {
        assert_eq!(DieWasteBucket::from_str_flexible("Very Intricate").unwrap(), DieWasteBucket::VeryIntricate);
        assert_eq!(GlueType::from_str_flexible("Crash Lock").unwrap(), GlueType::CrashLock);
        assert_eq!(GlueType::from_str_flexible("4-corner").unwrap(), GlueType::FourCorner);
        let err = GlueType::from_str_flexible("tuck-end").unwrap_err();
        assert!(err.to_string().contains("sl, cl, c4, c6"));
        let err = DieWasteBucket::from_str_flexible("huge").unwrap_err();
        assert!(err.to_string().contains("simple, standard, intricate, very_intricate"));
    }

    #[test]
    fn test_sanitized_clamps() {
        let mut params = OrderParameters::default();
        params.order_quantity = -100.0;
        params.units_per_sheet = 0.0;
        params.sheet_length_mm = -720.0;
        params.printing.process_colours = 7.0;
        params.printing.spot_colours = -2.0;
        params.printing.coverage_percent = 140.0;
        params.window_patch.windows_per_piece = 0.0;
        params.window_patch.window_width_mm = -60.0;
        params.material.price_override = Some(-1.0);

        let clean = params.sanitized();
        assert_eq!(clean.order_quantity, 0.0);
        assert_eq!(clean.units_per_sheet, 1.0);
        assert_eq!(clean.sheet_length_mm, 0.0);
        assert_eq!(clean.printing.process_colours, 4.0);
        assert_eq!(clean.printing.spot_colours, 0.0);
        assert_eq!(clean.printing.coverage_percent, 100.0);
        assert_eq!(clean.window_patch.windows_per_piece, 1.0);
        assert_eq!(clean.window_patch.window_width_mm, 0.0);
        assert_eq!(clean.material.price_override, Some(0.0));
    }

    #[test]
    fn test_original_key_aliases() {
        let params: OrderParameters = serde_json::from_str(
            r#"{ "orderQty": 5000, "nUp": 6, "len": 700, "wid": 500,
                 "printing": { "enabled": true, "procCols": 2, "spotCols": 1, "coatOn": true } }"#,
        )
        .unwrap();
        assert_eq!(params.order_quantity, 5000.0);
        assert_eq!(params.units_per_sheet, 6.0);
        assert_eq!(params.sheet_length_mm, 700.0);
        assert_eq!(params.printing.ink_units(), 3.0);
        assert!(params.printing.coating);
    }
}
