//! Plain-text rendering of estimates and price ladders.

use cost_core::{Estimate, LadderRow};

const RULE: &str = "═══════════════════════════════════════════════";

pub fn print_estimate(quote: &Estimate) {
    let order = &quote.order;
    let geo = &quote.geometry;

    println!("{}", RULE);
    println!("  CARTON RUN ESTIMATE");
    println!("{}", RULE);
    println!();
    println!("Order:");
    println!("  Quantity:       {:.0}", order.order_quantity);
    println!("  Units / sheet:  {:.0}", order.units_per_sheet);
    println!("  Sheet:          {:.0} × {:.0} mm", order.sheet_length_mm, order.sheet_width_mm);
    println!("  Material:       {}", geo.material_name);
    println!("  Gluing:         {}", quote.gluing.glue_type.display_name());
    println!();
    println!("Sheet:");
    println!("  Area:           {:.4} m²", geo.sheet_area_m2);
    println!("  Paper / sheet:  {:.6} kg", geo.paper_kg_per_sheet);
    println!("  Cost / kg:      ${:.4} (priced in {})", geo.cost_per_kg, geo.price_mode.display_name());
    println!("  Base sheets:    {:.0}", geo.base_sheets);
    println!(
        "  Die waste:      {} sheets ({})",
        quote.die_cutting.waste_sheets,
        order.die_cutting.waste_bucket.display_name()
    );
    println!("  Lam waste:      {:.0} sheets", quote.lamination.waste_sheets);
    println!();
    println!("Costs:                 total       per unit");
    println!("  {:<16} {:>11} {:>14.5}", "Material", "", geo.material_per_unit);
    for line in quote.stage_lines() {
        if !line.enabled {
            println!("  {:<16} {:>11}", line.stage.display_name(), "off");
            continue;
        }
        println!(
            "  {:<16} {:>11.2} {:>14.5}",
            line.stage.display_name(),
            line.total,
            line.per_unit
        );
    }
    println!("  {:<16} {:>11} {:>14.5}", "Unit cost", "", quote.unit_cost);

    if order.printing.enabled {
        let p = &quote.printing;
        println!();
        println!("Printing:");
        println!("  Setup:          {:.2} h ({:.0} inks)", p.setup_hours, p.ink_units);
        println!("  Make-ready:     {:.0} sheets", p.make_ready_sheets);
        println!("  Sheets:         {:.0}", p.sheets);
        println!("  Press hours:    {:.2}", p.hours);
        println!("  Ink:            ${:.2}", p.ink_cost);
        println!("  Coating:        ${:.2}", p.coating_cost + p.coating_labour_cost);
    }

    let pr = &quote.pricing;
    println!();
    println!("Price (target margin {:.1}%):", pr.target_margin * 100.0);
    println!("  Sell / unit:    ${:.5}", pr.sell_per_unit);
    println!("  Sell / 1,000:   ${:.2}", pr.sell_per_thousand);
    println!("  Order ex-GST:   ${:.2}", pr.order_total_ex_tax);
    println!("  GST:            ${:.2}", pr.tax);
    println!("  Order inc-GST:  ${:.2}", pr.order_total_inc_tax);
    println!("  Margin:         {:.1}%", pr.achieved_margin * 100.0);
    println!("  Markup:         {:.1}%", pr.achieved_markup * 100.0);
    println!();

    if pr.below_tier {
        println!(
            "⚠ Markup {:.1}% is below the {:.0}% minimum for this quantity",
            pr.achieved_markup * 100.0,
            pr.tier_min_markup * 100.0
        );
    } else {
        println!("✓ Meets the minimum markup for this quantity");
    }
}

pub fn print_ladder(rows: &[LadderRow]) {
    println!("{:>10} {:>12} {:>12} {:>14} {:>9}", "Quantity", "Unit cost", "Sell/1000", "Order ex-GST", "Markup");
    for row in rows {
        println!(
            "{:>10.0} {:>12.5} {:>12.2} {:>14.2} {:>8.1}%{}",
            row.quantity,
            row.unit_cost,
            row.sell_per_thousand,
            row.order_total_ex_tax,
            row.achieved_markup * 100.0,
            if row.below_tier { " ⚠" } else { "" }
        );
    }
}
