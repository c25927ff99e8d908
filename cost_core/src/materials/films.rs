//! Lamination stocks and window-patch films.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::units::{Gsm, PricePerKg, PricePerTonne};

/// Laminating film stock.
///
/// The film substance is shared by every stock (see
/// [`LaminationTable`](crate::config::LaminationTable)); only the price differs.
///
/// ```json
/// { "key": "gloss", "name": "Gloss", "price_per_tonne": 5250 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LaminationStock {
    /// Selection key (e.g. "gloss")
    pub key: String,
    /// Display name
    pub name: String,
    /// Price in dollars per tonne
    pub price_per_tonne: f64,
}

impl LaminationStock {
    pub fn new(key: impl Into<String>, name: impl Into<String>, price_per_tonne: f64) -> Self {
        LaminationStock {
            key: key.into(),
            name: name.into(),
            price_per_tonne,
        }
    }

    /// Film cost per kilogram (negative prices count as zero)
    pub fn price_per_kg(&self) -> PricePerKg {
        PricePerTonne(self.price_per_tonne.max(0.0)).into()
    }
}

/// Window-patch film.
///
/// ```json
/// { "key": "pet", "name": "PET", "gsm": 103, "price_per_tonne": 4150 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct WindowFilm {
    /// Selection key (e.g. "pet")
    pub key: String,
    /// Display name
    pub name: String,
    /// Film substance in grams per square metre
    #[serde(alias = "grammage")]
    pub gsm: f64,
    /// Price in dollars per tonne
    pub price_per_tonne: f64,
}

impl WindowFilm {
    pub fn new(key: impl Into<String>, name: impl Into<String>, gsm: f64, price_per_tonne: f64) -> Self {
        WindowFilm {
            key: key.into(),
            name: name.into(),
            gsm,
            price_per_tonne,
        }
    }

    /// Film substance (negative values count as zero)
    pub fn substance(&self) -> Gsm {
        Gsm(self.gsm.max(0.0))
    }

    /// Film cost per kilogram (negative prices count as zero)
    pub fn price_per_kg(&self) -> PricePerKg {
        PricePerTonne(self.price_per_tonne.max(0.0)).into()
    }
}

static DEFAULT_LAMINATION_STOCKS: Lazy<Vec<LaminationStock>> = Lazy::new(|| {
    vec![
        LaminationStock::new("gloss", "Gloss", 5250.0),
        LaminationStock::new("matte", "Matte", 5500.0),
    ]
});

static DEFAULT_WINDOW_FILMS: Lazy<Vec<WindowFilm>> = Lazy::new(|| {
    vec![
        WindowFilm::new("pet", "PET", 103.0, 4150.0),
        WindowFilm::new("ca", "Cellulose Acetate", 97.0, 28500.0),
    ]
});

/// Built-in lamination stock table
pub fn default_lamination_stocks() -> &'static [LaminationStock] {
    &DEFAULT_LAMINATION_STOCKS
}

/// Built-in window film table
pub fn default_window_films() -> &'static [WindowFilm] {
    &DEFAULT_WINDOW_FILMS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tables() {
        assert_eq!(default_lamination_stocks()[0].key, "gloss");
        assert_eq!(default_lamination_stocks()[1].price_per_tonne, 5500.0);
        assert_eq!(default_window_films()[1].name, "Cellulose Acetate");
    }

    #[test]
    fn test_film_price_per_kg() {
        let pet = &default_window_films()[0];
        assert!((pet.price_per_kg().0 - 4.15).abs() < 1e-12);
        assert_eq!(pet.substance().0, 103.0);

        let gloss = &default_lamination_stocks()[0];
        assert!((gloss.price_per_kg().0 - 5.25).abs() < 1e-12);
    }

    #[test]
    fn test_partial_film_entry() {
        let film: WindowFilm = serde_json::from_str(r#"{"key":"opp","gsm":40}"#).unwrap();
        assert_eq!(film.price_per_tonne, 0.0);
        assert_eq!(film.price_per_kg().0, 0.0);
    }
}
