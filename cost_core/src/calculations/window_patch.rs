//! Window patching: gluing a clear film over a cut-out window.
//!
//! Runs per piece rather than per sheet, so make-ready is a fraction of the
//! ordered quantity.

use serde::{Deserialize, Serialize};

use super::{per_unit, run_hours};
use crate::config::Configuration;
use crate::order::OrderParameters;
use crate::units::{Millimeters, SquareMeters};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct WindowPatchBreakdown {
    /// Film actually used (after fallback)
    pub film: String,
    /// Pieces through the patcher, make-ready included
    pub pieces: f64,
    pub window_area_m2: f64,
    pub film_kg_per_piece: f64,
    /// Film cost of one piece
    pub film_cost_per_piece: f64,
    pub setup_cost: f64,
    pub run_cost: f64,
    pub film_cost: f64,
    pub total: f64,
    pub per_unit: f64,
}

/// Pieces processed: quantity × (1 + make-ready fraction), rounded up.
pub fn pieces_processed(order_quantity: f64, make_ready_fraction: f64) -> f64 {
    (order_quantity * (1.0 + make_ready_fraction)).ceil()
}

pub fn calculate(config: &Configuration, params: &OrderParameters) -> WindowPatchBreakdown {
    let options = &params.window_patch;
    if !options.enabled {
        return WindowPatchBreakdown::default();
    }

    let rates = config.rates.window_patch;
    let pieces = pieces_processed(params.order_quantity, config.window_patch_make_ready_percent);
    let window = SquareMeters::from_rect(
        Millimeters(options.window_width_mm),
        Millimeters(options.window_height_mm),
    );

    let film = config.window_film(options.film.as_deref());
    let (film_name, film_kg_per_piece, film_cost_per_piece) = match film {
        Some(film) => {
            let mass = film.substance().mass_of(window) * options.windows_per_piece;
            (film.name.clone(), mass.0, film.price_per_kg().cost_of(mass))
        }
        None => (String::new(), 0.0, 0.0),
    };

    let setup_cost = rates.setup_hours * rates.rate;
    let run_cost = run_hours(pieces, rates.pieces_per_hour) * rates.rate;
    let film_cost = pieces * film_cost_per_piece;
    let total = setup_cost + run_cost + film_cost;

    WindowPatchBreakdown {
        film: film_name,
        pieces,
        window_area_m2: window.0,
        film_kg_per_piece,
        film_cost_per_piece,
        setup_cost,
        run_cost,
        film_cost,
        total,
        per_unit: per_unit(total, params.order_quantity),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enabled() -> OrderParameters {
        let mut params = OrderParameters::default();
        params.window_patch.enabled = true;
        params
    }

    #[test]
    fn test_pieces_for_ten_thousand() {
        assert_eq!(pieces_processed(10000.0, 0.015), 10150.0);
        assert_eq!(pieces_processed(0.0, 0.015), 0.0);
    }

    #[test]
    fn test_disabled_is_zero() {
        let result = calculate(&Configuration::default(), &OrderParameters::default());
        assert_eq!(result, WindowPatchBreakdown::default());
    }

    #[test]
    fn test_pet_defaults() {
        let result = calculate(&Configuration::default(), &enabled());

        assert_eq!(result.film, "PET");
        assert_eq!(result.pieces, 10150.0);
        assert!((result.window_area_m2 - 0.0024).abs() < 1e-15);
        // 0.0024 m² × 103 gsm / 1000
        assert!((result.film_kg_per_piece - 0.0002472).abs() < 1e-15);
        assert!((result.film_cost_per_piece - 0.0002472 * 4.15).abs() < 1e-15);
        assert_eq!(result.setup_cost, 52.5);
        assert!((result.run_cost - 10150.0 / 800.0 * 35.0).abs() < 1e-9);
        assert!((result.per_unit - result.total / 10000.0).abs() < 1e-15);
    }

    #[test]
    fn test_windows_per_piece_multiplies_film() {
        let mut params = enabled();
        let single = calculate(&Configuration::default(), &params);
        params.window_patch.windows_per_piece = 2.0;
        let double = calculate(&Configuration::default(), &params);

        assert!((double.film_kg_per_piece - 2.0 * single.film_kg_per_piece).abs() < 1e-15);
        assert_eq!(double.setup_cost, single.setup_cost);
        assert_eq!(double.run_cost, single.run_cost);
    }
}
