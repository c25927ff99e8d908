//! # Printing
//!
//! Offset printing with an optional inline coating pass.
//!
//! Setup time is derived from the number of ink units on press:
//!
//! ```text
//! setup hours = 1.0 + 0.25 × (process + spot colours)
//! ```
//!
//! A manually entered setup time on the order is ignored.
//!
//! ## Example
//!
//! ```rust
//! use cost_core::calculations::{geometry, printing};
//! use cost_core::config::Configuration;
//! use cost_core::order::OrderParameters;
//!
//! let config = Configuration::default();
//! let mut order = OrderParameters::default();
//! order.printing.enabled = true;
//! order.printing.setup_hours_override = Some(8.0);
//!
//! let sheet = geometry::calculate(&config, &order);
//! let print = printing::calculate(&config, &order, &sheet);
//! assert_eq!(print.setup_hours, 2.0);
//! ```

use serde::{Deserialize, Serialize};

use super::{per_unit, run_hours, SheetGeometry};
use crate::config::Configuration;
use crate::order::OrderParameters;

/// Base press setup time before ink units are added
pub const BASE_SETUP_HOURS: f64 = 1.0;

/// Extra setup time per ink unit
pub const SETUP_HOURS_PER_INK: f64 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct PrintingBreakdown {
    pub ink_units: f64,
    pub setup_hours: f64,
    pub make_ready_sheets: f64,
    /// Sheets through the press: base + make-ready
    pub sheets: f64,
    /// Setup + running time
    pub hours: f64,
    pub labour_cost: f64,
    pub ink_cost: f64,
    pub coating_cost: f64,
    pub coating_labour_cost: f64,
    pub total: f64,
    pub per_unit: f64,
}

/// Setup hours for a given number of ink units
pub fn setup_hours_for(ink_units: f64) -> f64 {
    BASE_SETUP_HOURS + SETUP_HOURS_PER_INK * ink_units
}

pub fn calculate(config: &Configuration, params: &OrderParameters, geometry: &SheetGeometry) -> PrintingBreakdown {
    let options = &params.printing;
    if !options.enabled {
        return PrintingBreakdown::default();
    }

    let rates = config.rates.printing;
    let mr = config.print_make_ready;
    let ink_units = options.ink_units();
    let setup_hours = setup_hours_for(ink_units);

    let mut make_ready_sheets = mr.base_sheets + mr.per_colour_sheets * ink_units;
    if options.coating {
        make_ready_sheets += mr.coating_adder_sheets;
    }
    let sheets = geometry.base_sheets + make_ready_sheets;
    let hours = setup_hours + run_hours(sheets, rates.sheets_per_hour);
    let run_rate = options.run_rate_override.unwrap_or(rates.combined_rate);
    let labour_cost = hours * run_rate;

    // One ink unit at the order's coverage
    let ink_kg_per_sheet =
        geometry.sheet_area_m2 * (config.ink.g_per_m2_100pct / 1000.0) * (options.coverage_percent / 100.0);
    let ink_cost = sheets * ink_kg_per_sheet * ink_units * config.ink.price_per_kg;

    let (coating_cost, coating_labour_cost) = if options.coating {
        let coat = config.coating;
        let coat_kg_per_sheet = geometry.sheet_area_m2 * (coat.g_per_m2_100pct / 1000.0);
        let labour = if coat.rate > 0.0 { hours * coat.rate } else { 0.0 };
        (sheets * coat_kg_per_sheet * coat.price_per_kg, labour)
    } else {
        (0.0, 0.0)
    };

    let total = labour_cost + ink_cost + coating_cost + coating_labour_cost;

    PrintingBreakdown {
        ink_units,
        setup_hours,
        make_ready_sheets,
        sheets,
        hours,
        labour_cost,
        ink_cost,
        coating_cost,
        coating_labour_cost,
        total,
        per_unit: per_unit(total, params.order_quantity),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::geometry;
    use crate::config::PartialConfig;

    fn enabled() -> OrderParameters {
        let mut params = OrderParameters::default();
        params.printing.enabled = true;
        params
    }

    fn run(config: &Configuration, params: &OrderParameters) -> PrintingBreakdown {
        let geo = geometry::calculate(config, params);
        calculate(config, params, &geo)
    }

    #[test]
    fn test_disabled_reports_zeros() {
        let result = run(&Configuration::default(), &OrderParameters::default());
        assert_eq!(result, PrintingBreakdown::default());
    }

    #[test]
    fn test_four_colour_defaults() {
        let result = run(&Configuration::default(), &enabled());

        assert_eq!(result.ink_units, 4.0);
        assert_eq!(result.setup_hours, 2.0);
        assert_eq!(result.make_ready_sheets, 150.0);
        assert_eq!(result.sheets, 10150.0);
        assert!((result.hours - 4.03).abs() < 1e-12);
        assert!((result.labour_cost - 261.95).abs() < 1e-9);
        // Ink is free in the default configuration
        assert_eq!(result.ink_cost, 0.0);
        assert!((result.per_unit - 0.026195).abs() < 1e-12);
    }

    #[test]
    fn test_spot_colours_add_setup_and_make_ready() {
        let mut params = enabled();
        params.printing.process_colours = 4.0;
        params.printing.spot_colours = 6.0;
        let result = run(&Configuration::default(), &params);

        assert_eq!(result.ink_units, 10.0);
        assert_eq!(result.setup_hours, 3.5);
        // 50 base + 25 × 10 inks
        assert_eq!(result.make_ready_sheets, 300.0);
        assert_eq!(result.sheets, 10300.0);
    }

    #[test]
    fn test_manual_setup_hours_ignored() {
        let mut params = enabled();
        params.printing.setup_hours_override = Some(0.5);
        assert_eq!(run(&Configuration::default(), &params).setup_hours, 2.0);
    }

    #[test]
    fn test_ink_and_coating_costs() {
        let partial: PartialConfig = serde_json::from_str(
            r#"{ "ink": { "price_per_kg": 10 }, "coating": { "price_per_kg": 5, "rate": 20 } }"#,
        )
        .unwrap();
        let config = Configuration::resolve(partial);
        let mut params = enabled();
        params.printing.coating = true;
        let result = run(&config, &params);

        assert_eq!(result.make_ready_sheets, 170.0);
        assert_eq!(result.sheets, 10170.0);
        // 10170 sheets × 0.3816 m² × 1.5 g/m² / 1000 × 50% × 4 inks × $10/kg
        assert!((result.ink_cost - 10170.0 * 0.3816 * 0.0015 * 0.5 * 4.0 * 10.0).abs() < 1e-9);
        // 10170 sheets × 0.3816 m² × 2 g/m² / 1000 × $5/kg
        assert!((result.coating_cost - 10170.0 * 0.3816 * 0.002 * 5.0).abs() < 1e-9);
        assert!((result.coating_labour_cost - result.hours * 20.0).abs() < 1e-12);
        let sum = result.labour_cost + result.ink_cost + result.coating_cost + result.coating_labour_cost;
        assert!((result.total - sum).abs() < 1e-12);
    }

    #[test]
    fn test_run_rate_override() {
        let mut params = enabled();
        params.printing.run_rate_override = Some(100.0);
        let result = run(&Configuration::default(), &params);
        assert!((result.labour_cost - 403.0).abs() < 1e-9);
    }

    #[test]
    fn test_coating_without_rate_adds_no_labour() {
        let mut params = enabled();
        params.printing.coating = true;
        assert_eq!(run(&Configuration::default(), &params).coating_labour_cost, 0.0);
    }
}
