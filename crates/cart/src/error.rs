//! Errors surfaced by cart operations.
//!
//! Storage failures never appear here: they are logged by the persistence
//! adapter and the in-memory cart stays authoritative.

use fishmarket_core::LineItemError;
use thiserror::Error;

/// Error returned by a rejected cart mutation.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CartError {
    /// The item failed validation (price or availability ceiling).
    #[error("invalid line item: {0}")]
    InvalidLineItem(#[source] LineItemError),

    /// The quantity is not a usable number.
    #[error("quantity must be a positive number, got {0}")]
    InvalidQuantity(f64),

    /// Checkout was requested with nothing in the cart.
    #[error("cannot check out an empty cart")]
    EmptyCart,
}

impl From<LineItemError> for CartError {
    fn from(err: LineItemError) -> Self {
        match err {
            LineItemError::InvalidQuantity(quantity) => Self::InvalidQuantity(quantity),
            other => Self::InvalidLineItem(other),
        }
    }
}
