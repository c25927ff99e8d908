//! Die-cutting: cutting and creasing the carton blanks.

use serde::{Deserialize, Serialize};

use super::{per_unit, SheetGeometry};
use crate::config::Configuration;
use crate::order::OrderParameters;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct DieCuttingBreakdown {
    /// Make-ready sheets for the chosen bucket. Reported even when disabled.
    pub waste_sheets: f64,
    /// Sheets through the platen: base + waste
    pub sheets: f64,
    pub setup_cost: f64,
    pub run_cost: f64,
    pub total: f64,
    pub per_unit: f64,
}

/// Make-ready sheets for the order's waste bucket, as configured.
pub fn waste_sheets(config: &Configuration, params: &OrderParameters) -> f64 {
    config
        .die_make_ready_buckets
        .sheets_for(params.die_cutting.waste_bucket)
}

pub fn calculate(config: &Configuration, params: &OrderParameters, geometry: &SheetGeometry) -> DieCuttingBreakdown {
    let waste_sheets = waste_sheets(config, params);
    if !params.die_cutting.enabled {
        return DieCuttingBreakdown {
            waste_sheets,
            ..DieCuttingBreakdown::default()
        };
    }

    let rates = config.rates.die;
    let sheets = geometry.base_sheets + waste_sheets;
    let setup_cost = rates.setup_cost();
    let run_cost = sheets * rates.run_cost_per_sheet();
    let total = setup_cost + run_cost;

    DieCuttingBreakdown {
        waste_sheets,
        sheets,
        setup_cost,
        run_cost,
        total,
        per_unit: per_unit(total, params.order_quantity),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::geometry;
    use crate::config::PartialConfig;
    use crate::order::DieWasteBucket;

    fn run(params: &OrderParameters) -> DieCuttingBreakdown {
        let config = Configuration::default();
        let geo = geometry::calculate(&config, params);
        calculate(&config, params, &geo)
    }

    #[test]
    fn test_disabled_reports_waste_only() {
        let result = run(&OrderParameters::default());
        assert_eq!(result.waste_sheets, 50.0);
        assert_eq!(result.total, 0.0);
        assert_eq!(result.per_unit, 0.0);
        assert_eq!(result.sheets, 0.0);
    }

    #[test]
    fn test_intricate_bucket() {
        let mut params = OrderParameters::default();
        params.die_cutting.enabled = true;
        params.die_cutting.waste_bucket = DieWasteBucket::Intricate;
        let result = run(&params);

        assert_eq!(result.waste_sheets, 75.0);
        assert_eq!(result.sheets, 10075.0);
        assert_eq!(result.setup_cost, 60.0);
        assert!((result.run_cost - 10075.0 * 40.0 / 1100.0).abs() < 1e-9);
        assert!((result.per_unit - result.total / 10000.0).abs() < 1e-15);
    }

    #[test]
    fn test_fractional_bucket_is_not_rounded() {
        let partial: PartialConfig = serde_json::from_str(r#"{ "dieMakeReadyBuckets": { "simple": 20.5 } }"#).unwrap();
        let config = Configuration::resolve(partial);
        let mut params = OrderParameters::default();
        params.die_cutting.enabled = true;
        params.die_cutting.waste_bucket = DieWasteBucket::Simple;
        let geo = geometry::calculate(&config, &params);
        let result = calculate(&config, &params, &geo);

        assert_eq!(result.waste_sheets, 20.5);
        assert_eq!(result.sheets, 10020.5);
    }

    #[test]
    fn test_unrecognized_bucket_uses_fifty() {
        let mut params = OrderParameters::default();
        params.die_cutting.enabled = true;
        params.die_cutting.waste_bucket = DieWasteBucket::Unrecognized;
        assert_eq!(run(&params).waste_sheets, 50.0);
    }
}
