//! # cost_core - Carton Costing & Pricing Engine
//!
//! `cost_core` estimates what a folding-carton run costs to make and what to
//! quote for it. A run passes through up to six stages (sheeting,
//! die-cutting, printing, lamination, window patching and gluing) on top of
//! the board itself. The per-unit cost is then priced at a target margin,
//! rounded to a tidy per-thousand figure and checked against
//! quantity-tiered minimum markups.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: `estimate(&config, &order)` is a pure function
//! - **Never fails**: bad numbers are clamped, unknown names fall back
//! - **JSON-First**: configuration, orders and estimates all serialise
//! - **Partial configs**: every configuration field has its own default
//!
//! ## Quick Start
//!
//! ```rust
//! use cost_core::{estimate, Configuration, OrderParameters};
//!
//! let config = Configuration::default();
//! let mut order = OrderParameters::default();
//! order.order_quantity = 5000.0;
//! order.units_per_sheet = 4.0;
//! order.printing.enabled = true;
//!
//! let quote = estimate(&config, &order);
//! assert!(quote.pricing.sell_per_thousand > 0.0);
//!
//! let json = serde_json::to_string_pretty(&quote).unwrap();
//! assert!(json.contains("sell_per_thousand"));
//! ```
//!
//! ## Modules
//!
//! - [`config`] - Rate tables, make-ready policies and pricing rules
//! - [`order`] - The order snapshot and its stage choices
//! - [`calculations`] - Sheet geometry and one calculator per stage
//! - [`pricing`] - Margin inversion, rounding and markup tiers
//! - [`estimate`] - Aggregation and the price ladder
//! - [`materials`] - Board, lamination and window film tables
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types
//! - [`file_io`] - Loading configuration and order documents

pub mod calculations;
pub mod config;
pub mod errors;
pub mod estimate;
pub mod file_io;
pub mod materials;
pub mod order;
pub mod pricing;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use config::{Configuration, PartialConfig};
pub use errors::{CostError, CostResult};
pub use estimate::{estimate, quote_ladder, Estimate, LadderRow, StageLine};
pub use file_io::{load_config, load_order, parse_config};
pub use order::{DieWasteBucket, GlueType, OrderParameters};
pub use pricing::PricingOutcome;
