//! # Sheet Geometry & Material
//!
//! Resolves the selected board and works out what one sheet weighs and costs,
//! and how many sheets the order needs before any spoilage.
//!
//! ## Formulas
//!
//! ```text
//! area        = length × width / 1e6                  (m²)
//! kg/sheet    = area × gsm / 1000
//! cost/kg     = price            (per kg)
//!             = price / 1000     (per tonne)
//! cost/sheet  = kg/sheet × cost/kg
//! cost/unit   = cost/sheet / max(1, units per sheet)
//! base sheets = ceil(quantity / max(1, units per sheet))
//! ```

use serde::{Deserialize, Serialize};

use crate::config::Configuration;
use crate::materials::PriceMode;
use crate::order::OrderParameters;
use crate::units::{Gsm, Millimeters, SquareMeters};

/// Sheet-level figures shared by every stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SheetGeometry {
    /// Board actually used (after fallback)
    pub material_name: String,
    pub sheet_area_m2: f64,
    pub paper_kg_per_sheet: f64,
    /// Unit the board price was quoted in (after any order override)
    pub price_mode: PriceMode,
    /// Effective board price ($/kg)
    pub cost_per_kg: f64,
    pub material_cost_per_sheet: f64,
    pub material_per_unit: f64,
    /// Sheets needed for the ordered quantity before make-ready
    pub base_sheets: f64,
}

/// Resolve board and sheet figures for a sanitised order.
///
/// With an empty materials table the board contributes nothing.
pub fn calculate(config: &Configuration, params: &OrderParameters) -> SheetGeometry {
    let ups = params.units_per_sheet.max(1.0);
    let area = SquareMeters::from_rect(Millimeters(params.sheet_length_mm), Millimeters(params.sheet_width_mm));
    let base_sheets = (params.order_quantity / ups).ceil().max(0.0);

    let Some(board) = config.board(params.material.name.as_deref()) else {
        return SheetGeometry {
            sheet_area_m2: area.0,
            base_sheets,
            ..SheetGeometry::default()
        };
    };

    let paper = Gsm(board.gsm.max(0.0)).mass_of(area);
    let cost_per_kg = board.price_per_kg(params.material.price_override, params.material.price_mode);
    let material_cost_per_sheet = cost_per_kg.cost_of(paper);

    SheetGeometry {
        material_name: board.name.clone(),
        sheet_area_m2: area.0,
        paper_kg_per_sheet: paper.0,
        price_mode: params.material.price_mode.unwrap_or(board.price_mode),
        cost_per_kg: cost_per_kg.0,
        material_cost_per_sheet,
        material_per_unit: material_cost_per_sheet / ups,
        base_sheets,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sheet_fbb() {
        let config = Configuration::default();
        let geo = calculate(&config, &OrderParameters::default());

        assert_eq!(geo.material_name, "FBB");
        assert_eq!(geo.price_mode, PriceMode::PerTonne);
        assert!((geo.sheet_area_m2 - 0.3816).abs() < 1e-12);
        assert!((geo.paper_kg_per_sheet - 0.125928).abs() < 1e-12);
        assert!((geo.cost_per_kg - 1.35).abs() < 1e-12);
        assert!((geo.material_cost_per_sheet - 0.1700028).abs() < 1e-9);
        assert!((geo.material_per_unit - 0.1700028).abs() < 1e-9);
        assert_eq!(geo.base_sheets, 10000.0);
    }

    #[test]
    fn test_units_per_sheet_divides_cost_and_sheets() {
        let config = Configuration::default();
        let mut params = OrderParameters::default();
        params.order_quantity = 10001.0;
        params.units_per_sheet = 4.0;
        let geo = calculate(&config, &params);

        assert_eq!(geo.base_sheets, 2501.0);
        assert!((geo.material_per_unit - geo.material_cost_per_sheet / 4.0).abs() < 1e-15);
    }

    #[test]
    fn test_price_override_per_kg() {
        let config = Configuration::default();
        let mut params = OrderParameters::default();
        params.material.name = Some("KRAFT".to_string());
        params.material.price_override = Some(2.0);
        params.material.price_mode = Some(PriceMode::PerKg);
        let geo = calculate(&config, &params);

        assert_eq!(geo.price_mode, PriceMode::PerKg);
        assert_eq!(geo.cost_per_kg, 2.0);
        assert!((geo.paper_kg_per_sheet - 0.3816 * 0.325).abs() < 1e-12);
    }

    #[test]
    fn test_zero_quantity_needs_no_sheets() {
        let config = Configuration::default();
        let mut params = OrderParameters::default();
        params.order_quantity = 0.0;
        assert_eq!(calculate(&config, &params).base_sheets, 0.0);
    }
}
