//! Cart line item.
//!
//! A [`LineItem`] is one purchasable offer in the cart. Its serialized form is
//! the record layout of the persisted cart snapshot:
//!
//! ```json
//! {
//!   "id": "p1",
//!   "species": "Atlantic cod",
//!   "form": "fillet",
//!   "price": 12.5,
//!   "quantity": 2,
//!   "sellerName": "Harbor Fish Co.",
//!   "availableQuantity": 40
//! }
//! ```

use serde::{Deserialize, Serialize};

use super::{Product, ProductId};

/// Reasons a line item is rejected at the cart boundary.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum LineItemError {
    /// Quantity is zero, negative or not a finite number.
    #[error("quantity must be a positive number, got {0}")]
    InvalidQuantity(f64),
    /// Unit price is negative or not a finite number.
    #[error("price must be a non-negative number, got {0}")]
    InvalidPrice(f64),
    /// Available quantity ceiling is negative or not a finite number.
    #[error("available quantity must be a non-negative number, got {0}")]
    InvalidAvailableQuantity(f64),
}

/// One product entry in the cart, keyed by product id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Product identifier, unique within a cart.
    pub id: ProductId,
    /// Fish species.
    pub species: String,
    /// Form or preparation.
    pub form: String,
    /// Unit price, currency per kilogram.
    pub price: f64,
    /// Kilograms or units, depending on the product.
    pub quantity: f64,
    /// Seller display name.
    pub seller_name: String,
    /// Quantity the seller had on hand when the item was added.
    ///
    /// Informational only; the cart does not enforce it.
    pub available_quantity: f64,
}

impl LineItem {
    /// Map a catalog product into a line item with the given quantity.
    #[must_use]
    pub fn from_product(product: &Product, quantity: f64) -> Self {
        Self {
            id: product.id.clone(),
            species: product.species.clone(),
            form: product.form.clone(),
            price: product.price,
            quantity,
            seller_name: product.seller_name.clone(),
            available_quantity: product.available_quantity,
        }
    }

    /// Check that the item can enter a cart.
    ///
    /// # Errors
    ///
    /// Returns `LineItemError::InvalidQuantity` if the quantity is not a
    /// positive finite number, `LineItemError::InvalidPrice` if the price is
    /// negative or not finite, and `LineItemError::InvalidAvailableQuantity`
    /// if the availability ceiling is negative or not finite.
    pub fn validate(&self) -> Result<(), LineItemError> {
        if !is_positive_quantity(self.quantity) {
            return Err(LineItemError::InvalidQuantity(self.quantity));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(LineItemError::InvalidPrice(self.price));
        }
        if !self.available_quantity.is_finite() || self.available_quantity < 0.0 {
            return Err(LineItemError::InvalidAvailableQuantity(
                self.available_quantity,
            ));
        }
        Ok(())
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> f64 {
        self.price * self.quantity
    }

    /// Whether the quantity is above what the seller had on hand.
    #[must_use]
    pub fn exceeds_available(&self) -> bool {
        self.quantity > self.available_quantity
    }
}

/// Whether `quantity` may be held by a cart line.
#[must_use]
pub fn is_positive_quantity(quantity: f64) -> bool {
    quantity.is_finite() && quantity > 0.0
}
