//! Catalog service client.
//!
//! The catalog is the remote read/write source for product and stock data:
//!
//! - `GET /products/{id}` — product display fields
//! - `GET /stock/{id}` — available quantity (source of truth)
//! - `PUT /products/{id}` — full item body including a new cart amount
//! - `PUT /stock/{id}` — new available quantity
//!
//! [`CatalogApi`] is the seam consumed by the cart manager; [`CatalogClient`]
//! is the `reqwest`-backed production implementation. Tests substitute an
//! in-memory implementation, so nothing above this module touches the network.

mod client;
mod types;

pub use client::CatalogClient;
pub use types::{Product, ProductId, StockLevel};

use thiserror::Error;

/// Errors that can occur when talking to the catalog service.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed (connection, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Resource not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Catalog returned a non-success status.
    #[error("catalog returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Request/response surface of the catalog service.
///
/// The cart manager is generic over this trait so operations can be exercised
/// against an in-memory catalog in tests.
#[allow(async_fn_in_trait)]
pub trait CatalogApi {
    /// Fetch a product by id.
    async fn product(&self, id: ProductId) -> Result<Product, CatalogError>;

    /// Fetch the current stock level for a product. Never cached.
    async fn stock(&self, id: ProductId) -> Result<StockLevel, CatalogError>;

    /// Write a new stock level back to the catalog.
    async fn update_stock(&self, id: ProductId, amount: u32) -> Result<(), CatalogError>;

    /// Write the full product body, including the new cart amount, back to
    /// the catalog.
    async fn update_product(&self, product: &Product, amount: u32) -> Result<(), CatalogError>;
}
