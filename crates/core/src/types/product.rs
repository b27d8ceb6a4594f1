//! Catalog product shape consumed by the cart.

use serde::{Deserialize, Serialize};

use super::ProductId;

/// A fish offer as listed by the catalog.
///
/// The catalog is an external collaborator; the cart only reads this shape
/// when the UI maps a listing into a [`LineItem`](super::LineItem).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Offer identifier.
    pub id: ProductId,
    /// Fish species (e.g. "Atlantic salmon").
    pub species: String,
    /// Form or preparation (e.g. "fillet", "whole").
    pub form: String,
    /// Unit price, currency per kilogram.
    pub price: f64,
    /// Quantity the seller has on hand.
    pub available_quantity: f64,
    /// Seller display name.
    pub seller_name: String,
}
