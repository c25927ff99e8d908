//! # Cartonwise CLI
//!
//! Quote a packaging run from the terminal.
//!
//! ```text
//! cost-cli --config plant.json --order job.json
//! cost-cli --qty 25000 --ups 6 --print --die --glue cl --json
//! cost-cli --order job.json --ladder
//! ```
//!
//! Flags override whatever the order file says. Stage flags only switch a
//! stage on.

mod logging;
mod report;

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{DateTime, Utc};
use clap::Parser;
use serde::Serialize;
use tracing::debug;

use cost_core::materials::PriceMode;
use cost_core::pricing::MAX_TARGET_MARGIN;
use cost_core::{
    estimate, load_config, load_order, quote_ladder, Configuration, CostError, CostResult, DieWasteBucket, Estimate,
    GlueType, OrderParameters,
};

#[derive(Parser, Debug)]
#[command(name = "cost-cli")]
#[command(about = "Cost and price a folding-carton production run", long_about = None)]
#[command(version)]
struct Cli {
    /// Plant configuration (JSON); built-in defaults when omitted
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Order parameters (JSON); defaults when omitted
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    order: Option<PathBuf>,

    /// Order quantity
    #[arg(long)]
    qty: Option<f64>,

    /// Units per sheet (n-up)
    #[arg(long)]
    ups: Option<f64>,

    /// Sheet length (mm)
    #[arg(long)]
    length: Option<f64>,

    /// Sheet width (mm)
    #[arg(long)]
    width: Option<f64>,

    /// Board name from the materials table
    #[arg(long)]
    material: Option<String>,

    /// Board price override
    #[arg(long)]
    price: Option<f64>,

    /// Unit of --price: "per_tonne" or "per_kg"
    #[arg(long, value_parser = PriceMode::from_str_flexible)]
    price_mode: Option<PriceMode>,

    /// Target margin, e.g. 0.25 (at most 0.99)
    #[arg(long)]
    target_margin: Option<f64>,

    /// Enable sheeting
    #[arg(long)]
    sheeting: bool,

    /// Enable die-cutting
    #[arg(long)]
    die: bool,

    /// Enable printing
    #[arg(long)]
    print: bool,

    /// Enable lamination
    #[arg(long)]
    laminate: bool,

    /// Enable window patching
    #[arg(long)]
    window: bool,

    /// Die make-ready bucket: simple, standard, intricate, very_intricate
    #[arg(long, value_parser = DieWasteBucket::from_str_flexible)]
    die_bucket: Option<DieWasteBucket>,

    /// Gluing type: sl, cl, c4, c6
    #[arg(long, value_parser = GlueType::from_str_flexible)]
    glue: Option<GlueType>,

    /// Print the estimate as JSON
    #[arg(long)]
    json: bool,

    /// Print a price break table over the configured quantities
    #[arg(long)]
    ladder: bool,

    /// Print the resolved configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: DateTime<Utc>,
    estimate: &'a Estimate,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error [{}]: {}", e.error_code(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> CostResult<()> {
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => {
            debug!("no configuration file, using built-in defaults");
            Configuration::default()
        }
    };

    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let mut order = match &cli.order {
        Some(path) => load_order(path)?,
        None => OrderParameters::default(),
    };
    apply_overrides(cli, &mut order)?;
    debug!(
        quantity = order.order_quantity,
        ups = order.units_per_sheet,
        material = order.material.name.as_deref().unwrap_or("(default)"),
        "order ready"
    );

    if cli.ladder {
        let rows = quote_ladder(&config, &order);
        debug!(rows = rows.len(), "price ladder built");
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&rows)?);
        } else {
            report::print_ladder(&rows);
        }
        return Ok(());
    }

    let quote = estimate(&config, &order);
    debug!(unit_cost = quote.unit_cost, sell_per_thousand = quote.pricing.sell_per_thousand, "estimate done");
    if cli.json {
        let out = JsonReport {
            generated_at: Utc::now(),
            estimate: &quote,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        report::print_estimate(&quote);
    }
    Ok(())
}

fn apply_overrides(cli: &Cli, order: &mut OrderParameters) -> CostResult<()> {
    if let Some(qty) = cli.qty {
        order.order_quantity = qty;
    }
    if let Some(ups) = cli.ups {
        order.units_per_sheet = ups;
    }
    if let Some(length) = cli.length {
        order.sheet_length_mm = length;
    }
    if let Some(width) = cli.width {
        order.sheet_width_mm = width;
    }
    if let Some(material) = &cli.material {
        order.material.name = Some(material.clone());
    }
    if let Some(price) = cli.price {
        order.material.price_override = Some(price);
    }
    if let Some(mode) = cli.price_mode {
        order.material.price_mode = Some(mode);
    }
    if let Some(margin) = cli.target_margin {
        if !(0.0..=MAX_TARGET_MARGIN).contains(&margin) {
            return Err(CostError::invalid_input(
                "target_margin",
                margin.to_string(),
                format!("Margin must be between 0 and {}", MAX_TARGET_MARGIN),
            ));
        }
        order.target_margin = Some(margin);
    }

    order.sheeting.enabled |= cli.sheeting;
    order.die_cutting.enabled |= cli.die;
    order.printing.enabled |= cli.print;
    order.lamination.enabled |= cli.laminate;
    order.window_patch.enabled |= cli.window;

    if let Some(bucket) = cli.die_bucket {
        order.die_cutting.waste_bucket = bucket;
    }
    if let Some(glue) = cli.glue {
        order.gluing.glue_type = glue;
    }
    Ok(())
}
