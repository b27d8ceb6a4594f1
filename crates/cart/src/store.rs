//! Authoritative cart store.
//!
//! [`CartStore`] owns the in-memory [`Cart`] and its [`PersistenceAdapter`].
//! It hydrates once on [`CartStore::open`], validates every mutation before
//! touching state, and ends every mutation with an explicit save. Saves are
//! synchronous, so snapshots are written in the order mutations were issued.
//!
//! A failed save never fails the mutation: the in-memory cart stays usable
//! and [`CartStore::last_save_ok`] reports the degraded state.

use fishmarket_core::{LineItem, ProductId, is_positive_quantity};
use tracing::instrument;

use crate::cart::Cart;
use crate::error::CartError;
use crate::order::OrderSummary;
use crate::persistence::{PersistenceAdapter, Storage};

/// Cart plus its durable mirror.
#[derive(Debug)]
pub struct CartStore<S> {
    cart: Cart,
    persistence: PersistenceAdapter<S>,
    last_save_ok: bool,
}

impl<S: Storage> CartStore<S> {
    /// Open the store, hydrating from the persisted snapshot.
    ///
    /// A missing or undecodable snapshot yields an empty cart.
    pub fn open(persistence: PersistenceAdapter<S>) -> Self {
        let cart = persistence.load().unwrap_or_default();
        tracing::info!(
            key = persistence.key(),
            items = cart.count(),
            "Cart store opened"
        );
        Self {
            cart,
            persistence,
            last_save_ok: true,
        }
    }

    /// Add an item, merging with an existing line of the same id.
    ///
    /// On merge the existing line's price and seller fields are kept and only
    /// the quantity grows.
    ///
    /// # Errors
    ///
    /// Returns `CartError::InvalidQuantity` if the quantity is not positive
    /// or the merged quantity would overflow, and `CartError::InvalidLineItem`
    /// for a negative price or availability ceiling. Nothing is changed or
    /// persisted in that case.
    #[instrument(skip(self, item), fields(product_id = %item.id, quantity = item.quantity))]
    pub fn add(&mut self, item: LineItem) -> Result<(), CartError> {
        item.validate()?;
        let merged = self.cart.merged_quantity(&item);
        if !is_positive_quantity(merged) {
            return Err(CartError::InvalidQuantity(merged));
        }
        self.cart.add(item);
        self.persist();
        Ok(())
    }

    /// Set a line's quantity; `quantity <= 0` removes the line.
    ///
    /// Unknown ids are ignored (the snapshot is still rewritten).
    ///
    /// # Errors
    ///
    /// Returns `CartError::InvalidQuantity` if `quantity` is NaN or infinite.
    #[instrument(skip(self))]
    pub fn update_quantity(&mut self, product_id: &str, quantity: f64) -> Result<(), CartError> {
        if !quantity.is_finite() {
            return Err(CartError::InvalidQuantity(quantity));
        }
        if !self.cart.update_quantity(product_id, quantity) {
            tracing::debug!("Quantity update for product not in cart");
        }
        self.persist();
        Ok(())
    }

    /// Remove the line with `product_id`, if present.
    #[instrument(skip(self))]
    pub fn remove(&mut self, product_id: &str) {
        if !self.cart.remove(product_id) {
            tracing::debug!("Remove for product not in cart");
        }
        self.persist();
    }

    /// Empty the cart and write an empty snapshot.
    #[instrument(skip(self))]
    pub fn clear(&mut self) {
        self.cart.clear();
        self.persist();
    }

    /// Summarize the cart for order submission and clear it.
    ///
    /// # Errors
    ///
    /// Returns `CartError::EmptyCart` if there is nothing to check out.
    #[instrument(skip(self))]
    pub fn checkout(&mut self) -> Result<OrderSummary, CartError> {
        if self.cart.is_empty() {
            return Err(CartError::EmptyCart);
        }
        let summary = self.order_summary();
        tracing::info!(
            items = summary.item_count,
            total_price = summary.total_price,
            "Cart checked out"
        );
        self.clear();
        Ok(summary)
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn count(&self) -> usize {
        self.cart.count()
    }

    /// Sum of price times quantity, unrounded.
    #[must_use]
    pub fn total_price(&self) -> f64 {
        self.cart.total_price()
    }

    /// Sum of quantities.
    #[must_use]
    pub fn total_quantity(&self) -> f64 {
        self.cart.total_quantity()
    }

    /// Lines in cart order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        self.cart.items()
    }

    /// Look up a line by product id.
    #[must_use]
    pub fn get(&self, product_id: &str) -> Option<&LineItem> {
        self.cart.get(product_id)
    }

    /// Read-only view of the cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Owned copy of the cart for rendering.
    #[must_use]
    pub fn snapshot(&self) -> Cart {
        self.cart.clone()
    }

    /// Ids of lines whose quantity is above the seller's stated availability.
    ///
    /// Informational; such lines are kept as they are.
    #[must_use]
    pub fn over_available(&self) -> Vec<&ProductId> {
        self.cart
            .items()
            .iter()
            .filter(|item| item.exceeds_available())
            .map(|item| &item.id)
            .collect()
    }

    /// Order summary of the current cart.
    #[must_use]
    pub fn order_summary(&self) -> OrderSummary {
        OrderSummary::from(&self.cart)
    }

    /// Whether the most recent save reached storage.
    #[must_use]
    pub const fn last_save_ok(&self) -> bool {
        self.last_save_ok
    }

    /// Persistence adapter in use.
    #[must_use]
    pub const fn persistence(&self) -> &PersistenceAdapter<S> {
        &self.persistence
    }

    fn persist(&mut self) {
        self.last_save_ok = self.persistence.save(&self.cart);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::persistence::{DEFAULT_CART_KEY, MemoryStorage};

    fn item(id: &str, price: f64, quantity: f64) -> LineItem {
        LineItem {
            id: ProductId::parse(id).unwrap(),
            species: "Rainbow trout".to_string(),
            form: "whole".to_string(),
            price,
            quantity,
            seller_name: "Lakeside Farm".to_string(),
            available_quantity: 5.0,
        }
    }

    fn open(storage: &MemoryStorage) -> CartStore<MemoryStorage> {
        CartStore::open(PersistenceAdapter::with_default_key(storage.clone()))
    }

    #[test]
    fn test_opens_empty_without_snapshot() {
        let store = open(&MemoryStorage::new());
        assert_eq!(store.count(), 0);
        assert!(store.last_save_ok());
    }

    #[test]
    fn test_opens_empty_on_corrupt_snapshot() {
        let storage = MemoryStorage::new();
        storage.insert(DEFAULT_CART_KEY, "\u{0}garbage");
        let store = open(&storage);
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn test_every_mutation_persists() {
        let storage = MemoryStorage::new();
        let mut store = open(&storage);

        store.add(item("a", 1.0, 1.0)).unwrap();
        store.update_quantity("a", 3.0).unwrap();
        store.remove("missing");
        store.clear();

        assert_eq!(storage.write_count(), 4);
        assert_eq!(storage.get(DEFAULT_CART_KEY).as_deref(), Some("[]"));
    }

    #[test]
    fn test_rejected_add_changes_nothing() {
        let storage = MemoryStorage::new();
        let mut store = open(&storage);

        assert_eq!(
            store.add(item("a", 1.0, 0.0)),
            Err(CartError::InvalidQuantity(0.0))
        );
        assert!(matches!(
            store.add(item("a", -2.0, 1.0)),
            Err(CartError::InvalidLineItem(_))
        ));
        assert_eq!(store.count(), 0);
        assert_eq!(storage.write_count(), 0);
    }

    #[test]
    fn test_update_rejects_non_finite() {
        let storage = MemoryStorage::new();
        let mut store = open(&storage);
        store.add(item("a", 1.0, 1.0)).unwrap();

        for quantity in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                store.update_quantity("a", quantity),
                Err(CartError::InvalidQuantity(_))
            ));
        }
        assert_eq!(store.get("a").unwrap().quantity, 1.0);
        assert_eq!(storage.write_count(), 1);
    }

    #[test]
    fn test_overflowing_merge_is_rejected() {
        let storage = MemoryStorage::new();
        let mut store = open(&storage);
        store.add(item("keep", 1.0, 1.0)).unwrap();
        store.add(item("p", 1.0, 1e308)).unwrap();
        let writes = storage.write_count();

        assert_eq!(
            store.add(item("p", 1.0, 1e308)),
            Err(CartError::InvalidQuantity(f64::INFINITY))
        );
        assert_eq!(store.get("p").unwrap().quantity, 1e308);
        assert_eq!(storage.write_count(), writes);
        assert!(store.last_save_ok());

        let reloaded = open(&storage);
        assert_eq!(reloaded.count(), 2);
        assert_eq!(reloaded.items(), store.items());
    }

    #[test]
    fn test_end_to_end_merge_then_zero_empties_cart() {
        let mut store = open(&MemoryStorage::new());
        store.add(item("p1", 12.0, 1.0)).unwrap();
        store.add(item("p1", 12.0, 2.0)).unwrap();
        assert_eq!(store.get("p1").unwrap().quantity, 3.0);

        store.update_quantity("p1", 0.0).unwrap();
        assert_eq!(store.count(), 0);
        assert!(store.items().is_empty());
    }

    #[test]
    fn test_write_failure_keeps_memory_authoritative() {
        let storage = MemoryStorage::new();
        let mut store = open(&storage);
        store.add(item("a", 2.0, 1.0)).unwrap();

        storage.set_fail_writes(true);
        store.add(item("b", 3.0, 2.0)).unwrap();
        assert!(!store.last_save_ok());
        assert_eq!(store.count(), 2);
        assert_eq!(store.total_price(), 8.0);

        // The stale snapshot still only has the first line.
        assert_eq!(open(&storage).count(), 1);

        storage.set_fail_writes(false);
        store.remove("a");
        assert!(store.last_save_ok());
        assert_eq!(open(&storage).items(), store.items());
    }

    #[test]
    fn test_over_available() {
        let mut store = open(&MemoryStorage::new());
        store.add(item("a", 1.0, 2.0)).unwrap();
        store.add(item("b", 1.0, 9.0)).unwrap();
        let b = ProductId::parse("b").unwrap();
        assert_eq!(store.over_available(), [&b]);
        // Not enforced.
        assert_eq!(store.get("b").unwrap().quantity, 9.0);
    }

    #[test]
    fn test_checkout_returns_summary_and_clears() {
        let storage = MemoryStorage::new();
        let mut store = open(&storage);
        store.add(item("a", 10.0, 2.0)).unwrap();
        store.add(item("b", 5.0, 3.0)).unwrap();

        let summary = store.checkout().unwrap();
        assert_eq!(summary.item_count, 2);
        assert_eq!(summary.total_price, 35.0);
        assert_eq!(store.count(), 0);
        assert_eq!(open(&storage).count(), 0);

        assert_eq!(store.checkout(), Err(CartError::EmptyCart));
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut store = open(&MemoryStorage::new());
        store.add(item("a", 1.0, 1.0)).unwrap();
        let snapshot = store.snapshot();
        store.clear();
        assert_eq!(snapshot.count(), 1);
        assert_eq!(store.cart().count(), 0);
    }
}
