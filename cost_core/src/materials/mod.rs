//! # Materials Database
//!
//! Substrate and consumable definitions used by the costing engine.
//!
//! ## Material Types
//!
//! - **Board**: the carton substrate run through every stage (FBB, kraft, ...)
//! - **Lamination stock**: gloss or matte laminating film, priced per tonne
//! - **Window film**: PET or cellulose acetate patches applied per piece
//!
//! All three tables are supplied by configuration; the built-in defaults
//! below are used when a configuration omits a table or supplies it empty.
//!
//! ## Example
//!
//! ```rust
//! use cost_core::materials::{default_boards, PriceMode};
//!
//! let fbb = &default_boards()[1];
//! assert_eq!(fbb.name, "FBB");
//! assert_eq!(fbb.price_mode, PriceMode::PerTonne);
//! assert!((fbb.price_per_kg(None, None).0 - 1.35).abs() < 1e-12);
//! ```

pub mod board;
pub mod films;

pub use board::{default_boards, Board, PriceMode};
pub use films::{default_lamination_stocks, default_window_films, LaminationStock, WindowFilm};
