//! Shopping cart module.
//!
//! Contains the cart entries, their derived totals, and the store that
//! keeps them persisted.

mod config;
mod state;
mod store;

pub use config::{CartConfig, DEFAULT_STORAGE_KEY, MAX_QUANTITY_PER_ITEM};
pub use state::{CartEntry, CartState, CART_CURRENCY};
pub use store::CartStore;
