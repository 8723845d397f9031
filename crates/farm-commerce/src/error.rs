//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in cart and checkout operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Quantity exceeds maximum allowed.
    #[error("Quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(i64, i64),

    /// Product priced in a currency the cart does not hold.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// A required field is absent under every accepted name.
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    /// A field is present but unusable.
    #[error("Invalid field {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    /// Checkout cannot proceed with the current cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Persistence error.
    #[error("Cache error: {0}")]
    Cache(#[from] farm_cache::CacheError),
}
