//! In-memory cart.
//!
//! [`Cart`] holds the merge and clamp rules but performs no I/O and no input
//! validation; [`CartStore`](crate::CartStore) validates before delegating
//! here and persists afterwards.
//!
//! # Invariants
//!
//! - Product ids are unique; adding a known id merges quantities.
//! - Every held quantity is positive; driving it to zero removes the line.
//! - Existing lines keep their position; new lines append at the end.

use fishmarket_core::{LineItem, is_positive_quantity};
use serde::{Deserialize, Serialize};

/// Ordered, deduplicated collection of line items.
///
/// Serializes as a bare JSON array of line items. Deserialization goes
/// through [`Cart::from_items`], so a decoded cart always satisfies the
/// invariants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<LineItem>", into = "Vec<LineItem>")]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a cart from an untrusted sequence.
    ///
    /// Duplicate ids are merged into the first occurrence. Lines that fail
    /// [`LineItem::validate`] are dropped, as are duplicates whose merged
    /// quantity would not be a finite positive number.
    #[must_use]
    pub fn from_items(items: impl IntoIterator<Item = LineItem>) -> Self {
        let mut cart = Self::new();
        for item in items {
            if item.validate().is_ok() && is_positive_quantity(cart.merged_quantity(&item)) {
                cart.add(item);
            }
        }
        cart
    }

    /// Quantity the line for `item.id` would hold after [`Cart::add`].
    #[must_use]
    pub fn merged_quantity(&self, item: &LineItem) -> f64 {
        self.get(item.id.as_str())
            .map_or(item.quantity, |existing| existing.quantity + item.quantity)
    }

    /// Add an item, merging into an existing line with the same id.
    ///
    /// On merge only the quantity changes; the existing line's price and
    /// seller fields are kept.
    pub fn add(&mut self, item: LineItem) {
        match self.position(item.id.as_str()) {
            Some(index) => {
                if let Some(existing) = self.items.get_mut(index) {
                    existing.quantity += item.quantity;
                }
            }
            None => self.items.push(item),
        }
    }

    /// Set a line's quantity in place, removing it when `quantity <= 0`.
    ///
    /// Returns `true` if a line with `product_id` was present.
    pub fn update_quantity(&mut self, product_id: &str, quantity: f64) -> bool {
        if quantity <= 0.0 {
            return self.remove(product_id);
        }
        match self.items.iter_mut().find(|item| item.id == product_id) {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Remove the line with `product_id`. Returns `true` if one was removed.
    pub fn remove(&mut self, product_id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != product_id);
        self.items.len() != before
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Number of distinct lines (not the sum of quantities).
    #[must_use]
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn total_quantity(&self) -> f64 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Sum of unit price times quantity. No rounding is applied.
    #[must_use]
    pub fn total_price(&self) -> f64 {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Look up a line by product id.
    #[must_use]
    pub fn get(&self, product_id: &str) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == product_id)
    }

    /// Whether a line with `product_id` is present.
    #[must_use]
    pub fn contains(&self, product_id: &str) -> bool {
        self.position(product_id).is_some()
    }

    /// Lines in cart order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position(&self, product_id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == product_id)
    }
}

impl From<Vec<LineItem>> for Cart {
    fn from(items: Vec<LineItem>) -> Self {
        Self::from_items(items)
    }
}

impl From<Cart> for Vec<LineItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}
