//! # Folder-Gluing
//!
//! Every carton is glued, so this stage has no switch and is part of every
//! estimate. The gluing type picks a setup profile; an unrecognised type
//! uses the straight-line fallback profile.
//!
//! ```text
//! make-ready pieces = max(0, ceil(quantity × make-ready % + fixed pieces))
//! setup cost        = setup hours × 35
//! run cost          = (quantity + make-ready) / pieces per hour × (op1 + op2)
//! ```

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{per_unit, run_hours};
use crate::config::Configuration;
use crate::order::{GlueType, OrderParameters};

/// Hourly rate billed during folder-gluer setup (one operator)
pub const SETUP_OPERATOR_RATE: f64 = 35.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct GluingBreakdown {
    pub glue_type: GlueType,
    pub setup_hours: f64,
    pub make_ready_pieces: f64,
    /// Pieces through the gluer: quantity + make-ready
    pub pieces: f64,
    pub setup_cost: f64,
    pub run_cost: f64,
    pub total: f64,
    pub per_unit: f64,
}

pub fn calculate(config: &Configuration, params: &OrderParameters) -> GluingBreakdown {
    let glue_type = params.gluing.glue_type;
    if glue_type == GlueType::Unrecognized {
        warn!("unrecognised gluing type, using fallback profile");
    }

    let profile = config.glue_setup_profiles.profile_for(glue_type);
    let rates = config.rates.gluing;
    let quantity = params.order_quantity;

    let make_ready_pieces = (quantity * profile.make_ready_percent + profile.make_ready_fixed)
        .ceil()
        .max(0.0);
    let pieces = quantity + make_ready_pieces;
    let setup_cost = profile.setup_hours * SETUP_OPERATOR_RATE;
    let run_cost = run_hours(pieces, rates.pieces_per_hour) * rates.crew_rate();
    let total = setup_cost + run_cost;

    GluingBreakdown {
        glue_type,
        setup_hours: profile.setup_hours,
        make_ready_pieces,
        pieces,
        setup_cost,
        run_cost,
        total,
        per_unit: per_unit(total, quantity),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(glue_type: GlueType) -> GluingBreakdown {
        let mut params = OrderParameters::default();
        params.gluing.glue_type = glue_type;
        calculate(&Configuration::default(), &params)
    }

    #[test]
    fn test_straight_line_defaults() {
        let result = run(GlueType::StraightLine);
        assert_eq!(result.make_ready_pieces, 300.0);
        assert_eq!(result.pieces, 10300.0);
        assert_eq!(result.setup_cost, 105.0);
        // 10300 / 2000 × (35 + 45)
        assert!((result.run_cost - 412.0).abs() < 1e-9);
        assert!((result.total - 517.0).abs() < 1e-9);
        assert!((result.per_unit - 0.0517).abs() < 1e-12);
    }

    #[test]
    fn test_fixed_make_ready_profiles() {
        let four = run(GlueType::FourCorner);
        assert_eq!(four.make_ready_pieces, 500.0);
        assert_eq!(four.setup_cost, 140.0);

        let six = run(GlueType::SixCorner);
        assert_eq!(six.make_ready_pieces, 750.0);
        assert_eq!(six.setup_cost, 175.0);
    }

    #[test]
    fn test_crash_lock() {
        let result = run(GlueType::CrashLock);
        assert_eq!(result.make_ready_pieces, 600.0);
        assert_eq!(result.setup_hours, 6.0);
    }

    #[test]
    fn test_unrecognized_matches_fallback_profile() {
        let result = run(GlueType::Unrecognized);
        assert_eq!(result.setup_hours, 3.0);
        assert_eq!(result.make_ready_pieces, 300.0);
    }

    #[test]
    fn test_runs_with_every_other_stage_off() {
        let result = calculate(&Configuration::default(), &OrderParameters::default());
        assert!(result.total > 0.0);
    }
}
