//! End-to-end estimates through the public API.

use cost_core::calculations::{window_patch, Stage};
use cost_core::config::{MarkupTier, PrettyEnding};
use cost_core::pricing::{round_per_thousand, staircase_min_markup, tier_min_markup};
use cost_core::{estimate, parse_config, Configuration, GlueType, OrderParameters};

fn all_stages_on() -> OrderParameters {
    let mut params = OrderParameters::default();
    params.sheeting.enabled = true;
    params.die_cutting.enabled = true;
    params.printing.enabled = true;
    params.lamination.enabled = true;
    params.window_patch.enabled = true;
    params
}

fn cents(price: f64) -> i64 {
    (price * 100.0).round() as i64
}

#[test]
fn test_fbb_gluing_only_quote() {
    let config = Configuration::default();
    let mut params = OrderParameters::default();
    params.order_quantity = 10000.0;
    params.units_per_sheet = 1.0;
    params.sheet_length_mm = 720.0;
    params.sheet_width_mm = 530.0;
    params.material.name = Some("FBB".to_string());
    params.gluing.glue_type = GlueType::StraightLine;
    params.target_margin = Some(0.25);

    let quote = estimate(&config, &params);

    assert!(quote.unit_cost > 0.0);
    let expected = quote.geometry.material_per_unit + quote.gluing.per_unit;
    assert!((quote.unit_cost - expected).abs() < 1e-15);

    // 0.2217028 / 0.75 × 1000 = 295.60… → 296.0 → 296.95
    assert_eq!(quote.pricing.sell_per_thousand, 296.95);
    assert_eq!(cents(quote.pricing.sell_per_thousand) % 100, 95);
}

#[test]
fn test_disabled_stages_cost_nothing() {
    let mut params = all_stages_on();
    // Non-default choices must not leak into disabled stages
    params.printing.coating = true;
    params.window_patch.windows_per_piece = 3.0;
    params.sheeting.enabled = false;
    params.die_cutting.enabled = false;
    params.printing.enabled = false;
    params.lamination.enabled = false;
    params.window_patch.enabled = false;

    let quote = estimate(&Configuration::default(), &params);
    for stage in [
        Stage::Sheeting,
        Stage::DieCutting,
        Stage::Printing,
        Stage::Lamination,
        Stage::WindowPatch,
    ] {
        assert_eq!(quote.stage_cost(stage), (0.0, 0.0), "{}", stage.display_name());
    }
    assert_eq!(quote.printing.hours, 0.0);
    assert_eq!(quote.printing.ink_cost, 0.0);
    assert_eq!(quote.printing.sheets, 0.0);
}

#[test]
fn test_toggling_a_stage_changes_cost_by_its_share() {
    let config = Configuration::default();
    let full = estimate(&config, &all_stages_on());

    for stage in [Stage::DieCutting, Stage::Printing, Stage::Lamination, Stage::WindowPatch] {
        let mut params = all_stages_on();
        match stage {
            Stage::DieCutting => params.die_cutting.enabled = false,
            Stage::Printing => params.printing.enabled = false,
            Stage::Lamination => params.lamination.enabled = false,
            Stage::WindowPatch => params.window_patch.enabled = false,
            _ => unreachable!(),
        }
        let without = estimate(&config, &params);
        let (_, share) = full.stage_cost(stage);
        assert!(
            (full.unit_cost - without.unit_cost - share).abs() < 1e-12,
            "{}",
            stage.display_name()
        );
    }
}

#[test]
fn test_combined_cost_is_sum_of_parts() {
    let quote = estimate(&Configuration::default(), &all_stages_on());
    let parts: f64 = quote.geometry.material_per_unit + quote.stage_lines().iter().map(|l| l.per_unit).sum::<f64>();
    assert!((quote.unit_cost - parts).abs() < 1e-12);
}

#[test]
fn test_base_sheets_formula() {
    let config = Configuration::default();
    for quantity in [0u32, 1, 7, 999, 1000, 10001] {
        for ups in [0u32, 1, 2, 3, 8] {
            let mut params = OrderParameters::default();
            params.order_quantity = quantity as f64;
            params.units_per_sheet = ups as f64;
            let quote = estimate(&config, &params);

            let expected = quantity.div_ceil(ups.max(1));
            assert_eq!(quote.geometry.base_sheets, expected as f64, "qty {} ups {}", quantity, ups);
        }
    }
}

#[test]
fn test_staircase_never_falls_at_tier_boundaries() {
    let boundaries = [0.0, 999.0, 1000.0, 4999.0, 5000.0, 9999.0, 10000.0];
    let floors: Vec<f64> = boundaries.iter().map(|&q| staircase_min_markup(q)).collect();
    assert_eq!(floors, vec![0.0, 0.0, 0.70, 0.70, 0.60, 0.60, 0.50]);
    // The staircase is what an empty tier list resolves to
    assert_eq!(tier_min_markup(&[], 5000.0), 0.60);
}

#[test]
fn test_configured_tiers_replace_staircase() {
    let config = parse_config(r#"{ "minMarkupTiers": [{ "minQty": 0, "minMarkup": 0.1 }] }"#).unwrap();
    assert_eq!(config.min_markup_tiers, vec![MarkupTier { min_quantity: 0.0, min_markup: 0.1 }]);

    let quote = estimate(&config, &OrderParameters::default());
    assert_eq!(quote.pricing.tier_min_markup, 0.1);
    assert!(!quote.pricing.below_tier);
}

#[test]
fn test_hundred_rounds_to_hundred_ninety_five() {
    let config = Configuration::default();
    assert_eq!(config.pricing.rounding_increment, 0.5);
    assert_eq!(config.pricing.pretty_ending, PrettyEnding::Ending(0.95));
    assert_eq!(round_per_thousand(100.0, &config.pricing), 100.95);
}

#[test]
fn test_estimate_is_idempotent() {
    let config = Configuration::default();
    let params = all_stages_on();
    let first = estimate(&config, &params);
    let second = estimate(&config, &params);

    assert_eq!(first, second);
    assert_eq!(first.unit_cost.to_bits(), second.unit_cost.to_bits());
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_printing_setup_ignores_manual_hours() {
    let mut params = OrderParameters::default();
    params.printing.enabled = true;
    params.printing.process_colours = 4.0;
    params.printing.spot_colours = 0.0;
    params.printing.coverage_percent = 50.0;
    params.printing.coating = false;

    for manual in [None, Some(0.0), Some(0.75), Some(12.0)] {
        params.printing.setup_hours_override = manual;
        let quote = estimate(&Configuration::default(), &params);
        assert_eq!(quote.printing.setup_hours, 2.0);
    }
}

#[test]
fn test_window_patch_pieces() {
    assert_eq!(window_patch::pieces_processed(10000.0, 0.015), 10150.0);

    let mut params = OrderParameters::default();
    params.window_patch.enabled = true;
    let quote = estimate(&Configuration::default(), &params);
    assert_eq!(quote.window_patch.pieces, 10150.0);
}

#[test]
fn test_gluing_is_always_charged() {
    let quote = estimate(&Configuration::default(), &OrderParameters::default());
    assert!(quote.gluing.total > 0.0);
    assert!(quote.stage_enabled(Stage::Gluing));
    assert!(quote.unit_cost > quote.geometry.material_per_unit);
}

#[test]
fn test_sheeting_covers_downstream_waste_when_those_stages_are_off() {
    let mut params = OrderParameters::default();
    params.sheeting.enabled = true;
    let quote = estimate(&Configuration::default(), &params);

    assert!(!quote.stage_enabled(Stage::DieCutting));
    assert!(!quote.stage_enabled(Stage::Lamination));
    // 10000 base + 50 die waste + 200 lamination waste
    assert_eq!(quote.die_cutting.waste_sheets, 50.0);
    assert_eq!(quote.lamination.waste_sheets, 200.0);
    assert_eq!(quote.sheeting.sheets, 10250.0);
}

#[test]
fn test_partial_config_changes_only_named_rates() {
    let config = parse_config(r#"{ "rates": { "glue": { "op2": 65 } } }"#).unwrap();
    let base = estimate(&Configuration::default(), &OrderParameters::default());
    let quote = estimate(&config, &OrderParameters::default());

    assert_eq!(quote.geometry, base.geometry);
    // 10300 pieces / 2000 × $20 more per hour
    assert!((quote.gluing.run_cost - base.gluing.run_cost - 103.0).abs() < 1e-9);
}

#[test]
fn test_degenerate_config_still_quotes() {
    let config = parse_config(
        r#"{ "rates": { "sheet": { "sph": 0 }, "die": { "sph": 0 }, "lam": { "sph": 0 },
             "wp": { "pph": 0 }, "glue": { "pph": 0 }, "print": { "sph": 0 } } }"#,
    )
    .unwrap();
    let quote = estimate(&config, &all_stages_on());

    assert!(quote.unit_cost.is_finite());
    assert!(quote.pricing.sell_per_thousand.is_finite());
    assert_eq!(quote.sheeting.run_cost, 0.0);
    assert_eq!(quote.gluing.run_cost, 0.0);
}
