//! Checkout module.
//!
//! Contains delivery addresses and the order request built from a cart.

mod address;
mod order;

pub use address::{default_address, Address};
pub use order::{CreateOrderRequest, OrderItemRequest};
