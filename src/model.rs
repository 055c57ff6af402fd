// Data model: the product record as the backend returns it, the body we
// send on create/update, and the raw form input the user types.
//
// The backend speaks Portuguese on the wire (`nome`, `preco`), so the
// structs rename their fields with serde and keep English names in Rust.

use crate::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A catalog record. `id` is assigned by the server.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Product {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "preco")]
    pub price: f64,
}

impl Product {
    /// Price formatted the way the list shows it, e.g. `R$ 12.50`.
    pub fn price_label(&self) -> String {
        format_price(self.price)
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}  {}  {}", self.id, self.name, self.price_label())
    }
}

/// Body of POST and PUT requests. Never carries the id; the id travels in
/// the URL for updates.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ProductPayload {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "preco")]
    pub price: f64,
}

/// Raw form fields as typed. Validation happens on submit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductForm {
    pub name: String,
    pub price: String,
}

impl ProductForm {
    pub fn new(name: impl Into<String>, price: impl Into<String>) -> Self {
        ProductForm {
            name: name.into(),
            price: price.into(),
        }
    }

    /// Prefill from an existing record (edit flow).
    pub fn from_product(product: &Product) -> Self {
        ProductForm {
            name: product.name.clone(),
            price: product.price.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.price.is_empty()
    }

    pub fn clear(&mut self) {
        self.name.clear();
        self.price.clear();
    }

    /// Apply the same checks a browser form with `required` and `min="0"`
    /// would: name present, price a finite number >= 0.
    pub fn validate(&self) -> Result<ProductPayload> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(CatalogError::InvalidInput("name is required".into()));
        }
        let raw = self.price.trim();
        if raw.is_empty() {
            return Err(CatalogError::InvalidInput("price is required".into()));
        }
        let price: f64 = raw
            .parse()
            .map_err(|_| CatalogError::InvalidInput(format!("price '{}' is not a number", raw)))?;
        if !price.is_finite() || price < 0.0 {
            return Err(CatalogError::InvalidInput(
                "price must be zero or greater".into(),
            ));
        }
        Ok(ProductPayload {
            name: name.to_string(),
            price,
        })
    }
}

/// Case-insensitive substring match on the product name. An empty term
/// keeps everything.
pub fn filter_by_name(products: Vec<Product>, term: &str) -> Vec<Product> {
    let needle = term.to_lowercase();
    if needle.is_empty() {
        return products;
    }
    products
        .into_iter()
        .filter(|p| p.name.to_lowercase().contains(&needle))
        .collect()
}

pub fn format_price(price: f64) -> String {
    format!("R$ {:.2}", price)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, name: &str) -> Product {
        Product {
            id,
            name: name.into(),
            price: 1.0,
        }
    }

    #[test]
    fn wire_names_are_portuguese() {
        let json = r#"{"id":7,"nome":"Abacaxi","preco":4.5}"#;
        let p: Product = serde_json::from_str(json).unwrap();
        assert_eq!(p.name, "Abacaxi");
        assert_eq!(p.price, 4.5);

        let body = serde_json::to_value(ProductPayload {
            name: "Banana".into(),
            price: 2.0,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"nome": "Banana", "preco": 2.0}));
    }

    #[test]
    fn validate_rejects_missing_or_negative_values() {
        assert!(ProductForm::new("", "1").validate().is_err());
        assert!(ProductForm::new("   ", "1").validate().is_err());
        assert!(ProductForm::new("Uva", "").validate().is_err());
        assert!(ProductForm::new("Uva", "abc").validate().is_err());
        assert!(ProductForm::new("Uva", "-0.01").validate().is_err());
        assert!(ProductForm::new("Uva", "NaN").validate().is_err());
    }

    #[test]
    fn validate_trims_and_parses() {
        let payload = ProductForm::new("  Uva ", " 0 ").validate().unwrap();
        assert_eq!(payload.name, "Uva");
        assert_eq!(payload.price, 0.0);
    }

    #[test]
    fn filter_is_case_insensitive_substring() {
        let items = vec![product(1, "Abacaxi"), product(2, "Banana")];
        let names: Vec<_> = filter_by_name(items.clone(), "ab")
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Abacaxi"]);
        assert_eq!(filter_by_name(items.clone(), "AN").len(), 1);
        assert_eq!(filter_by_name(items, "").len(), 2);
    }

    #[test]
    fn price_has_two_decimals() {
        assert_eq!(format_price(3.0), "R$ 3.00");
        assert_eq!(product(9, "Kiwi").to_string(), "#9  Kiwi  R$ 1.00");
    }
}
