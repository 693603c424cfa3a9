//! Tagged error taxonomy for cart operations.
//!
//! Every failure a cart operation can report is a distinct variant, so callers
//! can branch on out-of-stock versus not-in-cart versus infrastructure
//! failures instead of receiving one opaque error. The UI boundary maps these
//! to user-facing toast messages; the library never panics.

use thiserror::Error;

use crate::catalog::{CatalogError, ProductId};
use crate::store::StoreError;

/// Errors reported by cart operations.
///
/// Operations are fail-soft: whenever one of these is returned, the in-memory
/// cart and the persisted snapshot are unchanged (state is only mutated after
/// all remote checks pass).
#[derive(Debug, Error)]
pub enum CartError {
    /// Remote stock is insufficient for the requested change.
    #[error("product {0} is out of stock")]
    OutOfStock(ProductId),

    /// The product is not in the cart.
    #[error("product {0} is not in the cart")]
    NotFound(ProductId),

    /// A catalog request failed.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Persisting the cart failed.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}
