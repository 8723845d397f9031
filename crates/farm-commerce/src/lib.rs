//! Cart state and checkout shaping for the SmartFarm marketplace.
//!
//! - **Cart**: session cart with one entry per product, derived totals, and
//!   full-snapshot persistence to a Key-Value store
//! - **Catalog**: canonical product records and image URL resolution
//! - **Checkout**: delivery addresses and the order creation payload
//! - **Normalize**: `snake_case` / `UpperCamelCase` field adapter shared by
//!   the record types
//!
//! # Example
//!
//! ```rust
//! use farm_cache::MemoryStore;
//! use farm_commerce::prelude::*;
//! use serde_json::json;
//!
//! let store = MemoryStore::new();
//! let mut cart = CartStore::open(store.clone());
//!
//! // Records from the backend may arrive in either casing.
//! cart.add_raw_item(&json!({"ID": 1, "Name": "Spinach", "Price": 1000}), 2).unwrap();
//! cart.add_raw_item(&json!({"id": 1, "name": "Spinach", "price": 1000}), 3).unwrap();
//! assert_eq!(cart.total_items(), 5);
//!
//! // A second store over the same storage sees the snapshot.
//! let restored = CartStore::open(store);
//! assert_eq!(restored.total_price().display(), "Rp5000.00");
//!
//! let order = restored.to_order_request(Some(AddressId::new(3))).unwrap();
//! assert_eq!(order.items[0].quantity, 5);
//! ```

pub mod error;
pub mod ids;
pub mod money;
pub mod normalize;

pub mod cart;
pub mod catalog;
pub mod checkout;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Cart
    pub use crate::cart::{CartConfig, CartEntry, CartState, CartStore};

    // Catalog
    pub use crate::catalog::{resolve_image_url, Product};

    // Checkout
    pub use crate::checkout::{Address, CreateOrderRequest, OrderItemRequest};
}
