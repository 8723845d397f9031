//! Cart snapshots across store instances.

use farm_cache::{FileStore, MemoryStore, Store};
use farm_commerce::prelude::*;
use serde_json::json;

const DEFAULT_KEY: &str = farm_commerce::cart::DEFAULT_STORAGE_KEY;

fn spinach() -> Product {
    Product::new(
        ProductId::new(1),
        "Organic Spinach",
        Money::from_decimal(1000.0, Currency::IDR).unwrap(),
    )
    .with_category("Sayuran")
    .with_image_url("spinach.jpg")
    .with_farmer(FarmerId::new(9), "Pak Budi")
}

fn carrots() -> Product {
    Product::new(
        ProductId::new(2),
        "Carrots",
        Money::from_decimal(2500.5, Currency::IDR).unwrap(),
    )
}

#[test]
fn reopening_restores_equivalent_state() {
    let store = MemoryStore::new();
    let mut cart = CartStore::open(store.clone());
    cart.add_item(spinach(), 2).unwrap();
    cart.add_item(carrots(), 3).unwrap();

    let restored = CartStore::open(store);
    assert_eq!(restored.state(), cart.state());
    assert_eq!(restored.total_items(), 5);
    assert_eq!(restored.total_price(), cart.total_price());
}

#[test]
fn file_store_roundtrip() {
    let dir = tempfile::tempdir().unwrap();

    {
        let mut cart = CartStore::open(FileStore::open(dir.path()).unwrap());
        cart.add_item(spinach(), 4).unwrap();
        cart.update_quantity(ProductId::new(1), 6).unwrap();
    }

    let cart = CartStore::open(FileStore::open(dir.path()).unwrap());
    let entry = cart.get(ProductId::new(1)).unwrap();
    assert_eq!(entry.quantity, 6);
    assert_eq!(entry.product, spinach());
}

#[test]
fn snapshot_uses_canonical_shape() {
    let store = MemoryStore::new();
    let mut cart = CartStore::open(store.clone());
    cart.add_raw_item(
        &json!({"ID": 1, "Name": "Organic Spinach", "Price": 1000, "ImageURL": "spinach.jpg"}),
        1,
    )
    .unwrap();

    let bytes = store.get(DEFAULT_KEY).unwrap().unwrap();
    let snapshot: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    let product = &snapshot[0]["product"];

    assert_eq!(product["id"], 1);
    assert_eq!(product["image_url"], "spinach.jpg");
    assert!(product.get("ImageURL").is_none());
    assert_eq!(snapshot[0]["quantity"], 1);
}

#[test]
fn last_writer_wins_between_tabs() {
    let storage = MemoryStore::new();
    let mut tab_a = CartStore::open(storage.clone());
    let mut tab_b = CartStore::open(storage.clone());

    tab_a.add_item(spinach(), 1).unwrap();
    tab_b.add_item(carrots(), 1).unwrap();

    // Tab B never saw tab A's write and overwrote it.
    let fresh = CartStore::open(storage);
    assert!(!fresh.contains(ProductId::new(1)));
    assert!(fresh.contains(ProductId::new(2)));

    tab_a.reload();
    assert_eq!(tab_a.state(), fresh.state());
}

#[test]
fn add_sequences_sum_per_product() {
    let mut cart = CartStore::open(MemoryStore::new());
    let quantities = [1, 4, 2, 7, 1];
    for q in quantities {
        cart.add_item(spinach(), q).unwrap();
        cart.add_item(carrots(), 1).unwrap();
    }

    let spinach_entries = cart
        .entries()
        .iter()
        .filter(|e| e.product.id == ProductId::new(1))
        .count();
    assert_eq!(spinach_entries, 1);
    assert_eq!(
        cart.get(ProductId::new(1)).unwrap().quantity,
        quantities.iter().sum::<i64>()
    );

    let expected_items: i64 = cart.entries().iter().map(|e| e.quantity).sum();
    let expected_price: i64 = cart
        .entries()
        .iter()
        .map(|e| e.product.price.amount_minor * e.quantity)
        .sum();
    assert_eq!(cart.total_items(), expected_items);
    assert_eq!(cart.total_price().amount_minor, expected_price);
}

#[test]
fn invalid_snapshot_does_not_block_startup() {
    let store = MemoryStore::new();
    store.set(DEFAULT_KEY, b"[{\"product\":").unwrap();

    let mut cart = CartStore::open(store);
    assert!(cart.is_empty());

    cart.add_item(carrots(), 1).unwrap();
    assert_eq!(cart.total_items(), 1);
}
