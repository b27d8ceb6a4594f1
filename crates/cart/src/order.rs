//! Order summary consumed by the checkout collaborator.

use fishmarket_core::LineItem;
use serde::{Deserialize, Serialize};

use crate::cart::Cart;

/// Snapshot of a cart at checkout time.
///
/// The cart never submits orders itself; whoever handles checkout reads this
/// and forwards it (order record, admin notification).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    /// Lines in cart order.
    pub items: Vec<LineItem>,
    /// Number of distinct lines.
    pub item_count: usize,
    /// Sum of quantities.
    pub total_quantity: f64,
    /// Sum of price times quantity, unrounded.
    pub total_price: f64,
}

impl From<&Cart> for OrderSummary {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.items().to_vec(),
            item_count: cart.count(),
            total_quantity: cart.total_quantity(),
            total_price: cart.total_price(),
        }
    }
}
