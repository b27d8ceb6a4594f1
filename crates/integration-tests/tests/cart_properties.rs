//! Integration tests for cart invariants over operation sequences.

#![allow(clippy::unwrap_used, clippy::float_cmp)]

use std::collections::HashSet;

use fishmarket_cart::{CartError, CartStore, MemoryStorage, PersistenceAdapter};
use fishmarket_integration_tests::line_item;

fn memory_store() -> CartStore<MemoryStorage> {
    CartStore::open(PersistenceAdapter::with_default_key(MemoryStorage::new()))
}

fn assert_invariants(store: &CartStore<MemoryStorage>) {
    let ids: HashSet<&str> = store.items().iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids.len(), store.count(), "duplicate product id in cart");
    assert!(
        store.items().iter().all(|i| i.quantity > 0.0),
        "non-positive quantity retained"
    );
}

#[test]
fn test_uniqueness_over_mixed_sequence() {
    let mut store = memory_store();
    let ids = ["a", "b", "c", "d"];

    for step in 0..40_u32 {
        let id = ids[(step as usize * 7) % ids.len()];
        match step % 5 {
            0..=2 => store.add(line_item(id, 2.0, f64::from(step % 3) + 1.0)).unwrap(),
            3 => store.update_quantity(id, f64::from(step % 4) - 1.0).unwrap(),
            _ => store.remove(id),
        }
        assert_invariants(&store);
    }
}

#[test]
fn test_merge_additivity() {
    let mut store = memory_store();
    store.add(line_item("p", 3.0, 1.5)).unwrap();
    store.add(line_item("p", 3.0, 2.5)).unwrap();
    assert_eq!(store.count(), 1);
    assert_eq!(store.get("p").unwrap().quantity, 4.0);
}

#[test]
fn test_quantity_clamp() {
    let mut store = memory_store();
    store.add(line_item("p", 3.0, 1.0)).unwrap();

    store.update_quantity("p", 7.0).unwrap();
    assert_eq!(store.get("p").unwrap().quantity, 7.0);

    store.update_quantity("p", -1.0).unwrap();
    assert!(store.get("p").is_none());
}

#[test]
fn test_idempotent_clear() {
    let mut store = memory_store();
    store.add(line_item("p", 3.0, 1.0)).unwrap();
    store.clear();
    assert_eq!(store.count(), 0);
    store.clear();
    assert_eq!(store.count(), 0);
}

#[test]
fn test_derivation() {
    let mut store = memory_store();
    store.add(line_item("x", 10.0, 2.0)).unwrap();
    store.add(line_item("y", 5.0, 3.0)).unwrap();
    assert_eq!(store.total_price(), 35.0);
    assert_eq!(store.count(), 2);
}

#[test]
fn test_end_to_end_add_add_zero() {
    let mut store = memory_store();
    store.add(line_item("p1", 12.0, 1.0)).unwrap();
    store.add(line_item("p1", 12.0, 2.0)).unwrap();
    store.update_quantity("p1", 0.0).unwrap();
    assert!(store.items().is_empty());
    assert_eq!(store.count(), 0);
}

#[test]
fn test_invalid_inputs_are_rejected() {
    let mut store = memory_store();
    assert_eq!(
        store.add(line_item("p1", 12.0, -1.0)),
        Err(CartError::InvalidQuantity(-1.0))
    );
    assert!(matches!(
        store.add(line_item("p1", f64::NAN, 1.0)),
        Err(CartError::InvalidLineItem(_))
    ));
    assert_invariants(&store);
    assert_eq!(store.count(), 0);
}
