//! Cart entries and derived totals.

use serde::Serialize;

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};

/// Currency every cart is priced in.
///
/// Snapshots store prices as bare amounts, which read back in this currency.
pub const CART_CURRENCY: Currency = Currency::IDR;

/// One line in the cart: a product and how many units of it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartEntry {
    /// Canonical product record.
    pub product: Product,
    /// Units requested; always positive.
    pub quantity: i64,
}

impl CartEntry {
    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.product.price.saturating_multiply(self.quantity)
    }
}

/// Ordered cart entries, unique by product ID.
///
/// Serializes as a bare JSON array of `{product, quantity}` objects, which
/// is the persisted snapshot format. Mutation is crate-private so every
/// change goes through [`CartStore`](crate::cart::CartStore) and gets
/// persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CartState {
    entries: Vec<CartEntry>,
}

impl CartState {
    /// Entries in insertion order.
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, CartEntry> {
        self.entries.iter()
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the entry for a product.
    pub fn get(&self, product_id: ProductId) -> Option<&CartEntry> {
        self.entries.iter().find(|e| e.product.id == product_id)
    }

    /// Check if a product is in the cart.
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.get(product_id).is_some()
    }

    /// Sum of all quantities.
    pub fn total_items(&self) -> i64 {
        self.entries
            .iter()
            .fold(0_i64, |sum, e| sum.saturating_add(e.quantity))
    }

    /// Sum of unit price × quantity over all entries.
    ///
    /// Saturates at the `i64` bounds instead of overflowing.
    pub fn total_price(&self) -> Money {
        self.entries
            .iter()
            .fold(Money::zero(CART_CURRENCY), |sum, e| {
                sum.saturating_add(&e.line_total())
            })
    }

    /// Add `quantity` units, merging into an existing entry for the same
    /// product. The existing entry keeps its product record.
    pub(crate) fn add(
        &mut self,
        product: Product,
        quantity: i64,
        max_quantity: i64,
    ) -> Result<(), CommerceError> {
        if quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }

        let got = product.price.currency;
        if got != CART_CURRENCY {
            return Err(CommerceError::CurrencyMismatch {
                expected: CART_CURRENCY.code().to_string(),
                got: got.code().to_string(),
            });
        }

        if let Some(existing) = self.entries.iter_mut().find(|e| e.product.id == product.id) {
            let new_quantity = existing.quantity.saturating_add(quantity);
            if new_quantity > max_quantity {
                return Err(CommerceError::QuantityExceedsLimit(new_quantity, max_quantity));
            }
            existing.quantity = new_quantity;
            return Ok(());
        }

        if quantity > max_quantity {
            return Err(CommerceError::QuantityExceedsLimit(quantity, max_quantity));
        }

        self.entries.push(CartEntry { product, quantity });
        Ok(())
    }

    /// Remove the entry for a product. Returns whether anything changed.
    pub(crate) fn remove(&mut self, product_id: ProductId) -> bool {
        let len_before = self.entries.len();
        self.entries.retain(|e| e.product.id != product_id);
        self.entries.len() < len_before
    }

    /// Set an entry's quantity exactly; `quantity <= 0` removes it.
    ///
    /// A product that is not in the cart is left alone. Returns whether
    /// anything changed.
    pub(crate) fn set_quantity(
        &mut self,
        product_id: ProductId,
        quantity: i64,
        max_quantity: i64,
    ) -> Result<bool, CommerceError> {
        let Some(position) = self.entries.iter().position(|e| e.product.id == product_id) else {
            return Ok(false);
        };

        if quantity <= 0 {
            self.entries.remove(position);
            return Ok(true);
        }

        if quantity > max_quantity {
            return Err(CommerceError::QuantityExceedsLimit(quantity, max_quantity));
        }

        let entry = &mut self.entries[position];
        let changed = entry.quantity != quantity;
        entry.quantity = quantity;
        Ok(changed)
    }

    /// Drop every entry. Returns whether anything changed.
    pub(crate) fn clear(&mut self) -> bool {
        let had_entries = !self.entries.is_empty();
        self.entries.clear();
        had_entries
    }

    /// Merge an entry read back from a snapshot.
    ///
    /// Duplicates are summed and capped rather than rejected so that a
    /// snapshot written by an older build still upholds the one entry per
    /// product rule.
    pub(crate) fn merge(&mut self, product: Product, quantity: i64, max_quantity: i64) {
        if let Some(existing) = self.entries.iter_mut().find(|e| e.product.id == product.id) {
            existing.quantity = existing
                .quantity
                .saturating_add(quantity)
                .min(max_quantity);
        } else {
            self.entries.push(CartEntry {
                product,
                quantity: quantity.min(max_quantity),
            });
        }
    }
}

impl<'a> IntoIterator for &'a CartState {
    type Item = &'a CartEntry;
    type IntoIter = std::slice::Iter<'a, CartEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::MAX_QUANTITY_PER_ITEM;

    fn product(id: u64, price_minor: i64) -> Product {
        Product::new(
            ProductId::new(id),
            format!("Product {}", id),
            Money::new(price_minor, Currency::IDR),
        )
    }

    #[test]
    fn test_empty_state() {
        let state = CartState::default();
        assert!(state.is_empty());
        assert_eq!(state.total_items(), 0);
        assert!(state.total_price().is_zero());
    }

    #[test]
    fn test_add_same_item_increases_quantity() {
        let mut state = CartState::default();
        state.add(product(1, 1000), 2, MAX_QUANTITY_PER_ITEM).unwrap();
        state.add(product(1, 1000), 3, MAX_QUANTITY_PER_ITEM).unwrap();

        assert_eq!(state.len(), 1);
        assert_eq!(state.get(ProductId::new(1)).unwrap().quantity, 5);
        assert_eq!(state.total_items(), 5);
        assert_eq!(state.total_price().amount_minor, 5000);
    }

    #[test]
    fn test_add_keeps_existing_record() {
        let mut state = CartState::default();
        state.add(product(1, 1000), 1, MAX_QUANTITY_PER_ITEM).unwrap();

        let mut renamed = product(1, 1000);
        renamed.name = "Renamed".to_string();
        state.add(renamed, 1, MAX_QUANTITY_PER_ITEM).unwrap();

        assert_eq!(state.entries()[0].product.name, "Product 1");
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut state = CartState::default();
        for id in [3, 1, 2] {
            state.add(product(id, 100), 1, MAX_QUANTITY_PER_ITEM).unwrap();
        }
        let ids: Vec<u64> = state.iter().map(|e| e.product.id.get()).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_invalid_quantity() {
        let mut state = CartState::default();
        assert!(matches!(
            state.add(product(1, 100), 0, MAX_QUANTITY_PER_ITEM),
            Err(CommerceError::InvalidQuantity(0))
        ));
        assert!(state.is_empty());
    }

    #[test]
    fn test_quantity_limit() {
        let mut state = CartState::default();
        state.add(product(1, 100), 9000, MAX_QUANTITY_PER_ITEM).unwrap();

        let result = state.add(product(1, 100), 1000, MAX_QUANTITY_PER_ITEM);
        assert!(matches!(result, Err(CommerceError::QuantityExceedsLimit(10000, 9999))));
        assert_eq!(state.total_items(), 9000);
    }

    #[test]
    fn test_currency_mismatch() {
        let usd = Product::new(ProductId::new(2), "Import", Money::new(100, Currency::USD));

        let mut empty = CartState::default();
        assert!(matches!(
            empty.add(usd.clone(), 1, MAX_QUANTITY_PER_ITEM),
            Err(CommerceError::CurrencyMismatch { .. })
        ));
        assert!(empty.is_empty());

        let mut state = CartState::default();
        state.add(product(1, 100), 1, MAX_QUANTITY_PER_ITEM).unwrap();
        assert!(matches!(
            state.add(usd, 1, MAX_QUANTITY_PER_ITEM),
            Err(CommerceError::CurrencyMismatch { .. })
        ));
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn test_set_quantity_is_exact() {
        let mut state = CartState::default();
        state.add(product(1, 100), 4, MAX_QUANTITY_PER_ITEM).unwrap();

        assert!(state.set_quantity(ProductId::new(1), 2, MAX_QUANTITY_PER_ITEM).unwrap());
        assert_eq!(state.total_items(), 2);
    }

    #[test]
    fn test_set_quantity_non_positive_removes() {
        let mut zero = CartState::default();
        zero.add(product(1, 100), 4, MAX_QUANTITY_PER_ITEM).unwrap();
        let mut removed = zero.clone();

        zero.set_quantity(ProductId::new(1), 0, MAX_QUANTITY_PER_ITEM).unwrap();
        removed.remove(ProductId::new(1));
        assert_eq!(zero, removed);

        let mut negative = CartState::default();
        negative.add(product(1, 100), 4, MAX_QUANTITY_PER_ITEM).unwrap();
        negative.set_quantity(ProductId::new(1), -3, MAX_QUANTITY_PER_ITEM).unwrap();
        assert!(negative.is_empty());
    }

    #[test]
    fn test_set_quantity_missing_is_noop() {
        let mut state = CartState::default();
        state.add(product(1, 100), 1, MAX_QUANTITY_PER_ITEM).unwrap();
        let before = state.clone();

        assert!(!state.set_quantity(ProductId::new(99), 5, MAX_QUANTITY_PER_ITEM).unwrap());
        assert_eq!(state, before);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut state = CartState::default();
        assert!(!state.remove(ProductId::new(1)));
    }

    #[test]
    fn test_merge_caps_duplicates() {
        let mut state = CartState::default();
        state.merge(product(1, 100), 9000, MAX_QUANTITY_PER_ITEM);
        state.merge(product(1, 100), 9000, MAX_QUANTITY_PER_ITEM);
        assert_eq!(state.len(), 1);
        assert_eq!(state.total_items(), MAX_QUANTITY_PER_ITEM);
    }

    #[test]
    fn test_totals_mixed_entries() {
        let mut state = CartState::default();
        state.add(product(1, 1000), 2, MAX_QUANTITY_PER_ITEM).unwrap();
        state.add(product(2, 2500), 3, MAX_QUANTITY_PER_ITEM).unwrap();

        assert_eq!(state.total_items(), 5);
        assert_eq!(state.total_price().amount_minor, 2 * 1000 + 3 * 2500);
        let line_totals: i64 = state.iter().map(|e| e.line_total().amount_minor).sum();
        assert_eq!(line_totals, state.total_price().amount_minor);
    }

    #[test]
    fn test_serializes_as_array() {
        let mut state = CartState::default();
        state.add(product(1, 1000), 2, MAX_QUANTITY_PER_ITEM).unwrap();

        let json = serde_json::to_value(&state).unwrap();
        let array = json.as_array().unwrap();
        assert_eq!(array.len(), 1);
        assert_eq!(array[0]["quantity"], 2);
        assert_eq!(array[0]["product"]["id"], 1);
    }
}
