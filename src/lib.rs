//! RocketShoes cart state container.
//!
//! This crate holds the user's cart for the RocketShoes storefront: an ordered
//! list of products with quantities, persisted locally after every mutation and
//! reconciled against the remote catalog's stock counts.
//!
//! # Architecture
//!
//! - [`cart::CartManager`] is an explicit state container (no global singleton)
//!   exposing a read-only snapshot plus the three cart operations
//! - [`catalog`] talks to the catalog service over REST (`reqwest`); the
//!   [`catalog::CatalogApi`] trait is the seam for testing without a network
//! - [`store`] is the persistent local key/value store behind the cart
//!   (a JSON file in production, in-memory for tests)
//!
//! Stock is the remote source of truth and is fetched per operation, never
//! cached. State is mutated only after every remote check succeeds, so failed
//! operations leave the cart untouched.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod store;

pub use cart::{CART_STORAGE_KEY, CartItem, CartManager};
pub use catalog::{CatalogApi, CatalogClient, CatalogError, Product, ProductId, StockLevel};
pub use config::{CartConfig, ConfigError};
pub use error::CartError;
pub use store::{FileStore, LocalStore, MemoryStore, StoreError};
