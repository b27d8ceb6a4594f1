//! Fishmarket Cart - client-side shopping cart.
//!
//! The cart is an ordered, deduplicated list of line items that survives
//! restarts through a local snapshot. All changes go through [`CartStore`],
//! which enforces the cart invariants and rewrites the snapshot after every
//! mutation.
//!
//! # Modules
//!
//! - [`cart`] - In-memory cart with merge/clamp rules and derived totals
//! - [`store`] - Authoritative store owning the cart and its persistence
//! - [`persistence`] - Snapshot adapter plus file and in-memory storage
//! - [`order`] - Order summary handed to the checkout collaborator
//! - [`config`] - Environment-driven configuration
//! - [`error`] - Cart error types

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod config;
pub mod error;
pub mod order;
pub mod persistence;
pub mod store;

pub use cart::Cart;
pub use config::{CartConfig, ConfigError};
pub use error::CartError;
pub use order::OrderSummary;
pub use persistence::{
    DEFAULT_CART_KEY, FileStorage, MemoryStorage, PersistenceAdapter, Storage, StorageError,
};
pub use store::CartStore;
