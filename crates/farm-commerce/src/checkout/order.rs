//! Order creation payload.

use serde::{Deserialize, Serialize};

use crate::cart::CartState;
use crate::error::CommerceError;
use crate::ids::{AddressId, ProductId};

/// One product line in an order request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItemRequest {
    pub product_id: ProductId,
    pub quantity: i64,
}

/// Body of the order creation request sent at checkout.
///
/// Prices are deliberately absent: the backend prices the order itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    /// Lines in cart order.
    pub items: Vec<OrderItemRequest>,
    /// Delivery address; the backend uses the user's default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_id: Option<AddressId>,
}

impl CreateOrderRequest {
    /// Build a request from the cart's entries.
    ///
    /// Returns [`CommerceError::EmptyCart`] for an empty cart.
    pub fn from_cart(
        cart: &CartState,
        address_id: Option<AddressId>,
    ) -> Result<Self, CommerceError> {
        if cart.is_empty() {
            return Err(CommerceError::EmptyCart);
        }

        let items = cart
            .iter()
            .map(|entry| OrderItemRequest {
                product_id: entry.product.id,
                quantity: entry.quantity,
            })
            .collect();

        Ok(Self { items, address_id })
    }

    /// Total units across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}
