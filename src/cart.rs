//! Cart state container and operations.
//!
//! [`CartManager`] holds the in-memory cart for the session and is the only
//! writer of the persisted snapshot. It is an explicit container passed by
//! reference to whoever renders it — there is no global singleton — and it is
//! generic over the catalog and store seams so operations can be tested
//! without a network or filesystem.
//!
//! Mutations are copy-on-write: each operation builds the next cart vector,
//! persists it, and only then commits it as the current state. A failed remote
//! check therefore never leaves a half-applied cart behind, in memory or on
//! disk.

use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

use crate::catalog::{CatalogApi, Product, ProductId};
use crate::error::CartError;
use crate::store::{LocalStore, StoreError};

/// Store key holding the JSON-serialized cart array.
pub const CART_STORAGE_KEY: &str = "@RocketShoes:cart";

/// A product in the cart with its selected quantity.
///
/// Serializes flat: the product's catalog fields plus `amount` in one object,
/// which is both the persisted shape and the body of `PUT /products/{id}`.
/// `amount` is always at least 1; an amount driven below 1 removes the item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,
    pub amount: u32,
}

/// The cart state container.
///
/// Holds the ordered item list (insertion order = add order, at most one item
/// per product id), the catalog client, and the local store. Constructed once
/// at startup via [`CartManager::load`]; consumers read snapshots and issue
/// one operation at a time.
pub struct CartManager<C, S> {
    catalog: C,
    store: S,
    items: Vec<CartItem>,
}

impl<C: CatalogApi, S: LocalStore> CartManager<C, S> {
    /// Load the persisted cart from the store.
    ///
    /// An absent, unreadable, or unparseable snapshot degrades to an empty
    /// cart with a warning; it never fails construction.
    pub fn load(catalog: C, store: S) -> Self {
        let items = match store.get(CART_STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(items) => items,
                Err(err) => {
                    warn!(error = %err, "stored cart is unparseable, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(error = %err, "could not read stored cart, starting empty");
                Vec::new()
            }
        };

        Self {
            catalog,
            store,
            items,
        }
    }

    // =========================================================================
    // Read-only snapshot
    // =========================================================================

    /// Current cart contents, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Owned copy of the current cart contents.
    #[must_use]
    pub fn snapshot(&self) -> Vec<CartItem> {
        self.items.clone()
    }

    /// Whether the cart holds an item with this product id.
    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.position(id).is_some()
    }

    /// Total number of units across all items.
    #[must_use]
    pub fn total_units(&self) -> u32 {
        self.items.iter().map(|item| item.amount).sum()
    }

    /// Whether the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get a reference to the catalog client.
    #[must_use]
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Get a reference to the local store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Add one unit of a product to the cart.
    ///
    /// For a product not yet in the cart, appends a new item with amount 1.
    /// For a product already in the cart, checks remote stock first: with
    /// stock available the item's amount is incremented and the decremented
    /// stock is written back to the catalog; with no stock the cart is left
    /// untouched.
    ///
    /// # Errors
    ///
    /// - [`CartError::OutOfStock`] if the product is already in the cart and
    ///   remote stock is zero
    /// - [`CartError::Catalog`] if any catalog request fails
    /// - [`CartError::Store`] if persisting the new cart fails
    #[instrument(skip(self))]
    pub async fn add_product(&mut self, id: ProductId) -> Result<(), CartError> {
        let product = self.catalog.product(id).await?;

        match self.position(id) {
            Some(index) => {
                let stock = self.catalog.stock(id).await?;
                if stock.amount == 0 {
                    return Err(CartError::OutOfStock(id));
                }

                let mut next = self.items.clone();
                if let Some(item) = next.get_mut(index) {
                    item.amount += 1;
                }
                self.commit(next)?;
                self.catalog.update_stock(id, stock.amount - 1).await?;
            }
            None => {
                let mut next = self.items.clone();
                next.push(CartItem { product, amount: 1 });
                self.commit(next)?;
            }
        }

        Ok(())
    }

    /// Remove a product from the cart.
    ///
    /// # Errors
    ///
    /// - [`CartError::NotFound`] if the product is not in the cart
    /// - [`CartError::Store`] if persisting the new cart fails
    #[instrument(skip(self))]
    pub fn remove_product(&mut self, id: ProductId) -> Result<(), CartError> {
        let index = self.position(id).ok_or(CartError::NotFound(id))?;

        let mut next = self.items.clone();
        next.remove(index);
        self.commit(next)
    }

    /// Adjust a product's quantity by a signed delta.
    ///
    /// A candidate total below 1 delegates to [`CartManager::remove_product`].
    /// Otherwise the change requires available remote stock — except for a
    /// delta of exactly -1, which always succeeds (putting one unit back never
    /// needs stock). On success the new amount is written to the catalog's
    /// product record, the cart is persisted with the item in its original
    /// position, and the stock count is adjusted by the delta.
    ///
    /// # Errors
    ///
    /// - [`CartError::NotFound`] if the product is not in the cart
    /// - [`CartError::OutOfStock`] if remote stock is zero and the delta is
    ///   not -1
    /// - [`CartError::Catalog`] if any catalog request fails
    /// - [`CartError::Store`] if persisting the new cart fails
    #[instrument(skip(self))]
    pub async fn update_product_amount(
        &mut self,
        id: ProductId,
        delta: i32,
    ) -> Result<(), CartError> {
        let index = self.position(id).ok_or(CartError::NotFound(id))?;
        let item = self
            .items
            .get(index)
            .cloned()
            .ok_or(CartError::NotFound(id))?;

        let candidate = i64::from(item.amount) + i64::from(delta);
        if candidate < 1 {
            return self.remove_product(id);
        }
        let new_amount = u32::try_from(candidate).unwrap_or(u32::MAX);

        let stock = self.catalog.stock(id).await?;
        if stock.amount == 0 && delta != -1 {
            return Err(CartError::OutOfStock(id));
        }

        self.catalog
            .update_product(&item.product, new_amount)
            .await?;

        let mut next = self.items.clone();
        if let Some(slot) = next.get_mut(index) {
            slot.amount = new_amount;
        }
        self.commit(next)?;

        let remaining =
            u32::try_from(i64::from(stock.amount) - i64::from(delta)).unwrap_or(0);
        self.catalog.update_stock(id, remaining).await?;

        Ok(())
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn position(&self, id: ProductId) -> Option<usize> {
        self.items.iter().position(|item| item.product.id == id)
    }

    /// Persist a new cart vector, then make it the current state.
    fn commit(&mut self, next: Vec<CartItem>) -> Result<(), CartError> {
        let raw = serde_json::to_string(&next).map_err(StoreError::Parse)?;
        self.store.set(CART_STORAGE_KEY, &raw)?;
        self.items = next;
        Ok(())
    }
}
