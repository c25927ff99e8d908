//! # File I/O Module
//!
//! Reads configuration and order documents. Both are JSON, and both may be
//! partial: anything left out takes its documented default.
//!
//! Reading is the only place this crate can fail. A missing file is a
//! [`CostError::FileError`]; a document that is not valid JSON, or has a
//! value of the wrong type, is a [`CostError::SerializationError`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use cost_core::file_io::{load_config, load_order};
//! use cost_core::estimate;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("plant.json"))?;
//! let order = load_order(Path::new("order.json"))?;
//! let quote = estimate(&config, &order);
//! println!("{:.2} per thousand", quote.pricing.sell_per_thousand);
//! # Ok::<(), cost_core::errors::CostError>(())
//! ```

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::{Configuration, PartialConfig};
use crate::errors::{CostError, CostResult};
use crate::order::OrderParameters;

/// Parse and resolve an in-memory configuration document.
///
/// ```rust
/// use cost_core::file_io::parse_config;
///
/// let config = parse_config(r#"{ "pricing": { "round_inc": 1 } }"#)?;
/// assert_eq!(config.pricing.rounding_increment, 1.0);
/// assert_eq!(config.pricing.default_target_margin, 0.25);
/// # Ok::<(), cost_core::errors::CostError>(())
/// ```
pub fn parse_config(json: &str) -> CostResult<Configuration> {
    let partial: PartialConfig = serde_json::from_str(json)
        .map_err(|e| CostError::serialization(format!("Invalid configuration: {}", e)))?;
    Ok(Configuration::resolve(partial))
}

/// Load a configuration file and fill in defaults.
pub fn load_config(path: &Path) -> CostResult<Configuration> {
    let contents = read_file(path)?;
    let partial: PartialConfig = serde_json::from_str(&contents).map_err(|e| CostError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    })?;
    debug!(path = %path.display(), "configuration loaded");
    Ok(Configuration::resolve(partial))
}

/// Load an order file. Missing fields take their defaults.
pub fn load_order(path: &Path) -> CostResult<OrderParameters> {
    let contents = read_file(path)?;
    let order: OrderParameters = serde_json::from_str(&contents).map_err(|e| CostError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    })?;
    debug!(path = %path.display(), quantity = order.order_quantity, "order loaded");
    Ok(order)
}

fn read_file(path: &Path) -> CostResult<String> {
    fs::read_to_string(path).map_err(|e| CostError::file_error("read", path.display().to_string(), e.to_string()))
}
