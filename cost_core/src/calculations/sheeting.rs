//! Sheeting: cutting reel stock into sheets.
//!
//! Sheeting runs before die-cutting and lamination, so it always produces
//! their make-ready sheets as well, whether or not those stages are switched
//! on for this order.

use serde::{Deserialize, Serialize};

use super::{per_unit, SheetGeometry};
use crate::config::Configuration;
use crate::order::OrderParameters;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct SheetingBreakdown {
    /// Sheets cut: base + die waste + lamination waste
    pub sheets: f64,
    pub setup_cost: f64,
    pub run_cost: f64,
    pub total: f64,
    pub per_unit: f64,
}

/// `die_waste_sheets` and `lamination_waste_sheets` are the downstream
/// make-ready figures, which are computed regardless of their stage switches.
pub fn calculate(
    config: &Configuration,
    params: &OrderParameters,
    geometry: &SheetGeometry,
    die_waste_sheets: f64,
    lamination_waste_sheets: f64,
) -> SheetingBreakdown {
    if !params.sheeting.enabled {
        return SheetingBreakdown::default();
    }

    let rates = config.rates.sheet;
    let sheets = geometry.base_sheets + die_waste_sheets + lamination_waste_sheets;
    let setup_cost = rates.setup_cost();
    let run_cost = sheets * rates.run_cost_per_sheet();
    let total = setup_cost + run_cost;

    SheetingBreakdown {
        sheets,
        setup_cost,
        run_cost,
        total,
        per_unit: per_unit(total, params.order_quantity),
    }
}
