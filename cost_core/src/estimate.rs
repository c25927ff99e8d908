//! # Estimate
//!
//! The engine entry point: one configuration plus one order in, one
//! complete cost breakdown and quote out.
//!
//! ```text
//! unit cost = material / unit
//!           + sheeting + die-cutting + printing
//!           + lamination + window patching + gluing      (per unit)
//! ```
//!
//! `estimate` holds no state and never fails. Calling it twice with the same
//! inputs gives identical results.
//!
//! ## Example
//!
//! ```rust
//! use cost_core::{estimate, Configuration, OrderParameters};
//!
//! let config = Configuration::default();
//! let order = OrderParameters::default(); // 10,000 on FBB, gluing only
//!
//! let quote = estimate(&config, &order);
//! assert_eq!(quote.sheeting.total, 0.0);
//! assert!(quote.gluing.total > 0.0);
//! assert!(quote.unit_cost > quote.geometry.material_per_unit);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::{
    die_cutting, geometry, gluing, lamination, printing, sheeting, window_patch, DieCuttingBreakdown,
    GluingBreakdown, LaminationBreakdown, PrintingBreakdown, SheetGeometry, SheetingBreakdown, Stage,
    WindowPatchBreakdown,
};
use crate::config::Configuration;
use crate::order::OrderParameters;
use crate::pricing::{self, PricingOutcome};

/// Full result of one estimate. Read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    /// The order as costed, after clamping
    pub order: OrderParameters,
    pub geometry: SheetGeometry,
    pub sheeting: SheetingBreakdown,
    pub die_cutting: DieCuttingBreakdown,
    pub printing: PrintingBreakdown,
    pub lamination: LaminationBreakdown,
    pub window_patch: WindowPatchBreakdown,
    pub gluing: GluingBreakdown,
    /// Material plus every stage, per unit
    pub unit_cost: f64,
    pub pricing: PricingOutcome,
}

/// One reported stage cost
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StageLine {
    pub stage: Stage,
    pub enabled: bool,
    pub total: f64,
    pub per_unit: f64,
}

/// One row of a price ladder
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LadderRow {
    pub quantity: f64,
    pub unit_cost: f64,
    pub sell_per_thousand: f64,
    pub order_total_ex_tax: f64,
    pub achieved_markup: f64,
    pub below_tier: bool,
}

/// Cost and price one order.
pub fn estimate(config: &Configuration, params: &OrderParameters) -> Estimate {
    let params = params.sanitized();

    let geometry = geometry::calculate(config, &params);
    let die_cutting = die_cutting::calculate(config, &params, &geometry);
    let lamination = lamination::calculate(config, &params, &geometry);
    let sheeting = sheeting::calculate(
        config,
        &params,
        &geometry,
        die_cutting.waste_sheets,
        lamination.waste_sheets,
    );
    let printing = printing::calculate(config, &params, &geometry);
    let window_patch = window_patch::calculate(config, &params);
    let gluing = gluing::calculate(config, &params);

    let unit_cost = geometry.material_per_unit
        + sheeting.per_unit
        + die_cutting.per_unit
        + printing.per_unit
        + lamination.per_unit
        + window_patch.per_unit
        + gluing.per_unit;

    let target_margin = params
        .target_margin
        .unwrap_or(config.pricing.default_target_margin);
    let pricing = pricing::resolve(config, unit_cost, params.order_quantity, target_margin);

    debug!(
        quantity = params.order_quantity,
        material = %geometry.material_name,
        unit_cost,
        sell_per_thousand = pricing.sell_per_thousand,
        "estimate complete"
    );

    Estimate {
        order: params,
        geometry,
        sheeting,
        die_cutting,
        printing,
        lamination,
        window_patch,
        gluing,
        unit_cost,
        pricing,
    }
}

impl Estimate {
    /// Per-stage costs in process order. Gluing is always enabled.
    pub fn stage_lines(&self) -> Vec<StageLine> {
        Stage::ALL
            .iter()
            .map(|&stage| {
                let (total, per_unit) = self.stage_cost(stage);
                StageLine {
                    stage,
                    enabled: self.stage_enabled(stage),
                    total,
                    per_unit,
                }
            })
            .collect()
    }

    /// (total, per unit) for one stage
    pub fn stage_cost(&self, stage: Stage) -> (f64, f64) {
        match stage {
            Stage::Sheeting => (self.sheeting.total, self.sheeting.per_unit),
            Stage::DieCutting => (self.die_cutting.total, self.die_cutting.per_unit),
            Stage::Printing => (self.printing.total, self.printing.per_unit),
            Stage::Lamination => (self.lamination.total, self.lamination.per_unit),
            Stage::WindowPatch => (self.window_patch.total, self.window_patch.per_unit),
            Stage::Gluing => (self.gluing.total, self.gluing.per_unit),
        }
    }

    /// Whether the order switched a stage on
    pub fn stage_enabled(&self, stage: Stage) -> bool {
        match stage {
            Stage::Sheeting => self.order.sheeting.enabled,
            Stage::DieCutting => self.order.die_cutting.enabled,
            Stage::Printing => self.order.printing.enabled,
            Stage::Lamination => self.order.lamination.enabled,
            Stage::WindowPatch => self.order.window_patch.enabled,
            Stage::Gluing => true,
        }
    }
}

/// Re-run the order at every configured quantity option.
pub fn quote_ladder(config: &Configuration, params: &OrderParameters) -> Vec<LadderRow> {
    config
        .quantity_options
        .iter()
        .map(|&quantity| {
            let order = OrderParameters {
                order_quantity: quantity,
                ..params.clone()
            };
            let quote = estimate(config, &order);
            LadderRow {
                quantity: quote.order.order_quantity,
                unit_cost: quote.unit_cost,
                sell_per_thousand: quote.pricing.sell_per_thousand,
                order_total_ex_tax: quote.pricing.order_total_ex_tax,
                achieved_markup: quote.pricing.achieved_markup,
                below_tier: quote.pricing.below_tier,
            }
        })
        .collect()
}
