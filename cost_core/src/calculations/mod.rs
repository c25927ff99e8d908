//! # Stage Calculations
//!
//! One module per production stage. Each follows the same pattern:
//!
//! - `*Breakdown` - stage figures (JSON-serializable), always carrying
//!   `total` and `per_unit`
//! - `calculate(...) -> *Breakdown` - pure function of the resolved
//!   configuration, the sanitised order and the sheet geometry
//!
//! A disabled stage returns its `Default` breakdown, which is all zeros.
//! Nothing here can fail: inputs were clamped by
//! [`OrderParameters::sanitized`](crate::order::OrderParameters::sanitized)
//! and every division by a speed short-circuits to zero when the speed is
//! not positive.
//!
//! ## Available Stages
//!
//! - [`geometry`] - sheet area, board mass and material cost
//! - [`sheeting`] - reel-to-sheet conversion
//! - [`die_cutting`] - cutting and creasing
//! - [`printing`] - offset printing with optional inline coating
//! - [`lamination`] - film lamination
//! - [`window_patch`] - window film application
//! - [`gluing`] - folder-gluing (always included)

pub mod die_cutting;
pub mod geometry;
pub mod gluing;
pub mod lamination;
pub mod printing;
pub mod sheeting;
pub mod window_patch;

use serde::{Deserialize, Serialize};

pub use die_cutting::DieCuttingBreakdown;
pub use geometry::SheetGeometry;
pub use gluing::GluingBreakdown;
pub use lamination::LaminationBreakdown;
pub use printing::PrintingBreakdown;
pub use sheeting::SheetingBreakdown;
pub use window_patch::WindowPatchBreakdown;

/// Production stages in process order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Sheeting,
    DieCutting,
    Printing,
    Lamination,
    WindowPatch,
    Gluing,
}

impl Stage {
    /// All stages in process order
    pub const ALL: [Stage; 6] = [
        Stage::Sheeting,
        Stage::DieCutting,
        Stage::Printing,
        Stage::Lamination,
        Stage::WindowPatch,
        Stage::Gluing,
    ];

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Stage::Sheeting => "Sheeting",
            Stage::DieCutting => "Die-cutting",
            Stage::Printing => "Printing",
            Stage::Lamination => "Lamination",
            Stage::WindowPatch => "Window patching",
            Stage::Gluing => "Gluing",
        }
    }
}

/// Spread a stage total over the order. An empty order counts as one unit.
pub fn per_unit(total: f64, order_quantity: f64) -> f64 {
    total / order_quantity.max(1.0)
}

/// Hours to run `count` sheets or pieces at `per_hour`; zero when no speed
/// is configured.
pub fn run_hours(count: f64, per_hour: f64) -> f64 {
    if per_hour > 0.0 {
        count / per_hour
    } else {
        0.0
    }
}
