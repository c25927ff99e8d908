//! # Pricing
//!
//! Turns a combined unit cost into a quoted sell price.
//!
//! ## Steps
//!
//! 1. Invert the target margin: `raw = cost / (1 − margin)`
//! 2. Scale to a price per thousand and round **up** to the configured
//!    increment
//! 3. Push the price to the configured pretty ending (e.g. `.95`), moving to
//!    the next whole number if the ending would fall below the rounded price
//! 4. Round to cents
//!
//! The quote is then checked against the minimum-markup ladder for the
//! order quantity. Falling short is reported, never refused.
//!
//! ## Example
//!
//! ```rust
//! use cost_core::config::PricingPolicy;
//! use cost_core::pricing::round_per_thousand;
//!
//! let policy = PricingPolicy::DEFAULT; // increment 0.5, ending 0.95
//! assert_eq!(round_per_thousand(100.0, &policy), 100.95);
//! assert_eq!(round_per_thousand(100.96, &policy), 101.95);
//! ```

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::{Configuration, MarkupTier, PrettyEnding, PricingPolicy};

/// Flat consumption tax (GST) applied to order totals
pub const TAX_RATE: f64 = 0.10;

/// Highest accepted target margin. A margin of 1 would need an infinite price.
pub const MAX_TARGET_MARGIN: f64 = 0.99;

/// Built-in minimum-markup staircase used when no tiers are configured:
/// (minimum quantity, minimum markup), largest quantity first.
pub const DEFAULT_MARKUP_STAIRCASE: [(f64, f64); 3] = [(10000.0, 0.50), (5000.0, 0.60), (1000.0, 0.70)];

/// Quoted price and how it measures up against cost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct PricingOutcome {
    /// Margin the quote was built from (after clamping)
    pub target_margin: f64,
    pub sell_per_thousand: f64,
    pub sell_per_unit: f64,
    pub order_total_ex_tax: f64,
    pub tax: f64,
    pub order_total_inc_tax: f64,
    /// (sell − cost) / sell
    pub achieved_margin: f64,
    /// (sell − cost) / cost
    pub achieved_markup: f64,
    /// Minimum markup for this order quantity
    pub tier_min_markup: f64,
    /// Achieved markup is below the tier minimum
    pub below_tier: bool,
}

/// Clamp a requested target margin to `[0, MAX_TARGET_MARGIN]`.
pub fn clamp_target_margin(margin: f64) -> f64 {
    if margin.is_finite() {
        margin.clamp(0.0, MAX_TARGET_MARGIN)
    } else {
        0.0
    }
}

/// Minimum markup for `quantity`.
///
/// With configured tiers, the largest markup among tiers whose minimum
/// quantity is met (zero when none is met). With no tiers, the built-in
/// staircase.
pub fn tier_min_markup(tiers: &[MarkupTier], quantity: f64) -> f64 {
    if tiers.is_empty() {
        return staircase_min_markup(quantity);
    }
    tiers
        .iter()
        .filter(|t| t.min_quantity <= quantity)
        .map(|t| t.min_markup)
        .fold(0.0, f64::max)
}

/// Built-in ladder: ≥10000 → 50%, ≥5000 → 60%, ≥1000 → 70%, else 0.
pub fn staircase_min_markup(quantity: f64) -> f64 {
    DEFAULT_MARKUP_STAIRCASE
        .iter()
        .find(|(min_quantity, _)| quantity >= *min_quantity)
        .map_or(0.0, |(_, markup)| *markup)
}

/// Round a raw per-thousand price up to the increment, apply the pretty
/// ending and round to cents. An increment of zero skips the round-up.
pub fn round_per_thousand(raw_per_thousand: f64, policy: &PricingPolicy) -> f64 {
    let mut price = raw_per_thousand;
    if policy.rounding_increment > 0.0 {
        price = (price / policy.rounding_increment).ceil() * policy.rounding_increment;
    }
    if let PrettyEnding::Ending(end) = policy.pretty_ending {
        let whole = price.floor();
        let mut candidate = whole + end;
        if candidate < price {
            candidate = whole + 1.0 + end;
        }
        price = candidate;
    }
    (price * 100.0).round() / 100.0
}

/// Quote price per thousand for a unit cost at a target margin.
pub fn sell_per_thousand(unit_cost: f64, target_margin: f64, policy: &PricingPolicy) -> f64 {
    let raw_unit = if unit_cost > 0.0 {
        unit_cost / (1.0 - clamp_target_margin(target_margin))
    } else {
        0.0
    };
    round_per_thousand(raw_unit * 1000.0, policy)
}

/// Price an order of `quantity` units costing `unit_cost` each.
pub fn resolve(config: &Configuration, unit_cost: f64, quantity: f64, target_margin: f64) -> PricingOutcome {
    let target_margin = clamp_target_margin(target_margin);
    let sell_per_thousand = sell_per_thousand(unit_cost, target_margin, &config.pricing);
    let sell_per_unit = sell_per_thousand / 1000.0;

    let order_total_ex_tax = sell_per_unit * quantity;
    let tax = order_total_ex_tax * TAX_RATE;

    let achieved_margin = if sell_per_unit > 0.0 {
        (sell_per_unit - unit_cost) / sell_per_unit
    } else {
        0.0
    };
    let achieved_markup = if unit_cost > 0.0 {
        (sell_per_unit - unit_cost) / unit_cost
    } else {
        0.0
    };

    let tier_min_markup = tier_min_markup(&config.min_markup_tiers, quantity);
    let below_tier = achieved_markup < tier_min_markup;
    if below_tier {
        warn!(
            quantity,
            achieved_markup,
            tier_min_markup,
            "quote is below the minimum markup for this quantity"
        );
    }

    PricingOutcome {
        target_margin,
        sell_per_thousand,
        sell_per_unit,
        order_total_ex_tax,
        tax,
        order_total_inc_tax: order_total_ex_tax + tax,
        achieved_margin,
        achieved_markup,
        tier_min_markup,
        below_tier,
    }
}
