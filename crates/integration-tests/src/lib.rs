//! Integration tests for the Fishmarket cart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p fishmarket-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_sessions` - Cart state carried across store instances on disk
//! - `cart_properties` - Invariants over longer operation sequences
//!
//! Each store opened on the same directory and key stands in for a new
//! session reading the snapshot left by the previous one.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::Path;

use fishmarket_cart::{CartStore, FileStorage, PersistenceAdapter};
use fishmarket_core::{LineItem, ProductId};

/// Storage key used by the fixtures.
pub const TEST_CART_KEY: &str = "cart";

/// Open a file-backed store on `dir`, as a new session would.
#[must_use]
pub fn open_session(dir: &Path) -> CartStore<FileStorage> {
    CartStore::open(PersistenceAdapter::new(
        FileStorage::new(dir),
        TEST_CART_KEY,
    ))
}

/// Build a line item with fixed descriptive fields.
///
/// # Panics
///
/// Panics if `id` is not a valid product id.
#[must_use]
pub fn line_item(id: &str, price: f64, quantity: f64) -> LineItem {
    LineItem {
        id: ProductId::parse(id).expect("fixture product id"),
        species: "Atlantic mackerel".to_string(),
        form: "whole".to_string(),
        price,
        quantity,
        seller_name: "Old Harbour".to_string(),
        available_quantity: 25.0,
    }
}
