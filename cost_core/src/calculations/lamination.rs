//! Film lamination.
//!
//! Film substance is a single configured value; the chosen stock only sets
//! the film price.

use serde::{Deserialize, Serialize};

use super::{per_unit, run_hours, SheetGeometry};
use crate::config::Configuration;
use crate::order::OrderParameters;
use crate::units::{Gsm, SquareMeters};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LaminationBreakdown {
    /// Stock actually used (after fallback); empty when disabled
    pub stock: String,
    /// Make-ready sheets. Reported even when disabled.
    pub waste_sheets: f64,
    /// Sheets laminated: base + waste
    pub sheets: f64,
    pub film_kg_per_sheet: f64,
    pub setup_cost: f64,
    pub run_cost: f64,
    pub film_cost: f64,
    /// Film on one carton: film cost of a sheet / units per sheet
    pub film_per_unit: f64,
    pub total: f64,
    pub per_unit: f64,
}

/// Make-ready sheets: base sheets × make-ready fraction, rounded up.
pub fn waste_sheets(config: &Configuration, geometry: &SheetGeometry) -> f64 {
    (geometry.base_sheets * config.lamination_make_ready_percent).ceil()
}

pub fn calculate(config: &Configuration, params: &OrderParameters, geometry: &SheetGeometry) -> LaminationBreakdown {
    let waste_sheets = waste_sheets(config, geometry);
    if !params.lamination.enabled {
        return LaminationBreakdown {
            waste_sheets,
            ..LaminationBreakdown::default()
        };
    }

    let rates = config.rates.lamination;
    let sheets = geometry.base_sheets + waste_sheets;
    let film = Gsm(config.lamination.film_gsm).mass_of(SquareMeters(geometry.sheet_area_m2));
    let stock = config.lamination_stock(params.lamination.stock.as_deref());
    let film_cost_per_sheet = stock.map_or(0.0, |s| s.price_per_kg().cost_of(film));
    let film_cost = film_cost_per_sheet * sheets;

    let setup_cost = rates.setup_hours * rates.rate;
    let run_cost = run_hours(sheets, rates.sheets_per_hour) * rates.rate;
    let total = setup_cost + run_cost + film_cost;

    LaminationBreakdown {
        stock: stock.map(|s| s.name.clone()).unwrap_or_default(),
        waste_sheets,
        sheets,
        film_kg_per_sheet: film.0,
        setup_cost,
        run_cost,
        film_cost,
        film_per_unit: film_cost_per_sheet / params.units_per_sheet.max(1.0),
        total,
        per_unit: per_unit(total, params.order_quantity),
    }
}
