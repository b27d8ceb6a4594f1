//! Durable mirror of the cart.
//!
//! The persisted state is a single keyed entry whose value is the JSON array
//! of line items. [`Storage`] is the raw keyed medium and the only place I/O
//! happens; [`PersistenceAdapter`] encodes and decodes the snapshot on top of
//! it and swallows every failure after logging it.

mod file;
mod memory;

use std::path::PathBuf;

use fishmarket_core::LineItem;
use thiserror::Error;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::cart::Cart;

/// Default key under which the cart snapshot is stored.
pub const DEFAULT_CART_KEY: &str = "cart";

/// Failure of the underlying storage medium.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("i/o error at {path}: {source}")]
    Io {
        /// Path being read or written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The medium refused the operation (quota, unavailable, ...).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Keyed string storage, the local-storage equivalent.
pub trait Storage {
    /// Read the value stored under `key`, `Ok(None)` if there is none.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the medium cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the medium cannot be written.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Reads and writes cart snapshots on a [`Storage`].
#[derive(Debug, Clone)]
pub struct PersistenceAdapter<S> {
    storage: S,
    key: String,
}

impl<S: Storage> PersistenceAdapter<S> {
    /// Create an adapter storing the snapshot under `key`.
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Create an adapter using [`DEFAULT_CART_KEY`].
    pub fn with_default_key(storage: S) -> Self {
        Self::new(storage, DEFAULT_CART_KEY)
    }

    /// Storage key of the snapshot.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Underlying storage.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Read the persisted cart.
    ///
    /// Returns `None` when nothing is stored, the medium fails, or the value
    /// does not decode as a sequence of line items.
    #[must_use]
    pub fn load(&self) -> Option<Cart> {
        let raw = match self.storage.read(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!(key = %self.key, "No persisted cart");
                return None;
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Failed to read persisted cart");
                return None;
            }
        };

        let items: Vec<LineItem> = match serde_json::from_str(&raw) {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Discarding undecodable cart snapshot");
                return None;
            }
        };

        let stored = items.len();
        let cart = Cart::from_items(items);
        if cart.count() != stored {
            tracing::warn!(
                key = %self.key,
                stored,
                kept = cart.count(),
                "Normalized persisted cart (duplicate or invalid lines)"
            );
        }

        tracing::debug!(key = %self.key, items = cart.count(), "Loaded persisted cart");
        Some(cart)
    }

    /// Overwrite the snapshot with `cart`.
    ///
    /// Best effort: failures are logged and reported as `false`, never
    /// returned as errors. A cart holding a non-finite number is not written,
    /// since JSON would encode it as `null` and the snapshot would no longer
    /// load.
    pub fn save(&self, cart: &Cart) -> bool {
        if let Some(item) = cart.items().iter().find(|item| !is_encodable(item)) {
            tracing::error!(
                key = %self.key,
                product_id = %item.id,
                "Refusing to persist cart with non-finite number"
            );
            return false;
        }

        let payload = match serde_json::to_string(cart.items()) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!(key = %self.key, error = %e, "Failed to encode cart snapshot");
                return false;
            }
        };

        match self.storage.write(&self.key, &payload) {
            Ok(()) => {
                tracing::debug!(key = %self.key, items = cart.count(), "Saved cart snapshot");
                true
            }
            Err(e) => {
                tracing::error!(key = %self.key, error = %e, "Failed to persist cart");
                false
            }
        }
    }
}

/// Whether every number in `item` survives a JSON round trip.
fn is_encodable(item: &LineItem) -> bool {
    item.price.is_finite() && item.quantity.is_finite() && item.available_quantity.is_finite()
}
