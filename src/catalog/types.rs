//! Wire types for the catalog service.

use serde::{Deserialize, Serialize};

/// Type-safe product identifier.
///
/// Newtype over `i64` so product ids cannot be mixed up with other numeric
/// values. Serializes transparently as a bare number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(i64);

impl ProductId {
    /// Create a new ID from an i64 value.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the underlying i64 value.
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// A product as served by `GET /products/{id}`.
///
/// Only `id` matters to the cart logic. The remaining catalog fields are
/// display data; anything beyond the known ones is captured in `extra` and
/// round-tripped untouched when the full body is written back on updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    pub image: String,
    #[serde(flatten, default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Available quantity for a product, as served by `GET /stock/{id}`.
///
/// Remote source of truth. Fetched per operation, never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLevel {
    pub id: ProductId,
    pub amount: u32,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_id_serializes_as_bare_number() {
        let id = ProductId::new(7);
        assert_eq!(serde_json::to_string(&id).unwrap(), "7");

        let back: ProductId = serde_json::from_str("7").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_product_preserves_unknown_catalog_fields() {
        let raw = r#"{
            "id": 1,
            "title": "Tenis de Caminhada Leve Confortavel",
            "price": 179.9,
            "image": "https://cdn.example.com/shoes-1.jpg",
            "brand": "RocketShoes"
        }"#;

        let product: Product = serde_json::from_str(raw).unwrap();
        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.extra.get("brand").and_then(|v| v.as_str()), Some("RocketShoes"));

        // Unknown fields survive the round trip back to the catalog.
        let out = serde_json::to_value(&product).unwrap();
        assert_eq!(out["brand"], "RocketShoes");
        assert_eq!(out["price"], 179.9);
    }

    #[test]
    fn test_stock_level_round_trip() {
        let stock: StockLevel = serde_json::from_str(r#"{"id": 3, "amount": 2}"#).unwrap();
        assert_eq!(stock.id, ProductId::new(3));
        assert_eq!(stock.amount, 2);
    }
}
