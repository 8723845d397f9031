//! Persistent cart store.

use farm_cache::{Cache, Store};
use serde::Deserialize;
use serde_json::Value;

use crate::cart::{CartConfig, CartEntry, CartState, MAX_QUANTITY_PER_ITEM};
use crate::catalog::Product;
use crate::checkout::CreateOrderRequest;
use crate::error::CommerceError;
use crate::ids::{AddressId, ProductId};
use crate::money::Money;

/// Shape of one snapshot entry before its product is normalized.
#[derive(Deserialize)]
struct SnapshotEntry {
    product: Value,
    quantity: i64,
}

/// Cart state for one session, kept in sync with a Key-Value store.
///
/// The store is created once at start-up and handed to whoever needs it.
/// Opening hydrates the cart from the persisted snapshot; every mutation
/// that changes the cart rewrites the full snapshot under
/// [`CartConfig::storage_key`]. Mutations return the new state.
///
/// # Example
///
/// ```
/// use farm_cache::MemoryStore;
/// use farm_commerce::cart::CartStore;
/// use farm_commerce::catalog::Product;
/// use farm_commerce::ids::ProductId;
/// use farm_commerce::money::{Currency, Money};
///
/// let mut cart = CartStore::open(MemoryStore::new());
/// let kale = Product::new(ProductId::new(1), "Kale", Money::new(1_500_000, Currency::IDR));
///
/// cart.add_item(kale.clone(), 2).unwrap();
/// cart.add_item(kale, 1).unwrap();
///
/// assert_eq!(cart.total_items(), 3);
/// assert_eq!(cart.total_price().amount_minor, 4_500_000);
/// ```
pub struct CartStore<S> {
    cache: Cache<S>,
    config: CartConfig,
    state: CartState,
}

impl<S: Store> CartStore<S> {
    /// Open a cart with default settings, hydrating from `store`.
    pub fn open(store: S) -> Self {
        Self::with_config(store, CartConfig::default())
    }

    /// Open a cart with explicit settings, hydrating from `store`.
    ///
    /// A snapshot that cannot be read or parsed is logged and ignored; the
    /// cart then starts empty.
    ///
    /// A per-item maximum below 1 would leave no valid quantity, so it is
    /// replaced by [`MAX_QUANTITY_PER_ITEM`] with a warning.
    pub fn with_config(store: S, mut config: CartConfig) -> Self {
        if config.max_quantity_per_item < 1 {
            tracing::warn!(
                configured = config.max_quantity_per_item,
                fallback = MAX_QUANTITY_PER_ITEM,
                "ignoring non-positive max_quantity_per_item"
            );
            config.max_quantity_per_item = MAX_QUANTITY_PER_ITEM;
        }
        let cache = Cache::new(store);
        let state = load_snapshot(&cache, &config);
        Self {
            cache,
            config,
            state,
        }
    }

    /// Re-read the snapshot, discarding in-memory state.
    ///
    /// Picks up writes made by another context sharing the same store.
    pub fn reload(&mut self) -> &CartState {
        self.state = load_snapshot(&self.cache, &self.config);
        &self.state
    }

    /// Current cart state.
    pub fn state(&self) -> &CartState {
        &self.state
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[CartEntry] {
        self.state.entries()
    }

    /// Get the entry for a product.
    pub fn get(&self, product_id: ProductId) -> Option<&CartEntry> {
        self.state.get(product_id)
    }

    /// Check if a product is in the cart.
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.state.contains(product_id)
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.state.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    /// Sum of all quantities.
    pub fn total_items(&self) -> i64 {
        self.state.total_items()
    }

    /// Sum of unit price × quantity.
    pub fn total_price(&self) -> Money {
        self.state.total_price()
    }

    /// Settings this store was opened with.
    pub fn config(&self) -> &CartConfig {
        &self.config
    }

    /// Underlying Key-Value store.
    pub fn store(&self) -> &S {
        self.cache.store()
    }

    /// Add `quantity` units of a product.
    ///
    /// If the product is already in the cart its quantity is increased;
    /// otherwise a new entry is appended.
    ///
    /// Returns an error if:
    /// - Quantity is not positive
    /// - The resulting quantity would exceed the per-item maximum
    /// - The product is priced in a different currency from the cart
    /// - The snapshot could not be written
    pub fn add_item(&mut self, product: Product, quantity: i64) -> Result<&CartState, CommerceError> {
        let product_id = product.id;
        self.state
            .add(product, quantity, self.config.max_quantity_per_item)?;
        tracing::debug!(product_id = %product_id, quantity, "added to cart");
        self.persist()
    }

    /// Add a single unit of a product.
    pub fn add_one(&mut self, product: Product) -> Result<&CartState, CommerceError> {
        self.add_item(product, 1)
    }

    /// Normalize a loosely typed product record and add it.
    ///
    /// Accepts either `snake_case` or `UpperCamelCase` field names.
    pub fn add_raw_item(&mut self, raw: &Value, quantity: i64) -> Result<&CartState, CommerceError> {
        let product = Product::from_raw(raw)?;
        self.add_item(product, quantity)
    }

    /// Remove a product from the cart. Removing an absent product is a no-op.
    pub fn remove_item(&mut self, product_id: ProductId) -> Result<&CartState, CommerceError> {
        if !self.state.remove(product_id) {
            return Ok(&self.state);
        }
        tracing::debug!(product_id = %product_id, "removed from cart");
        self.persist()
    }

    /// Set a product's quantity exactly.
    ///
    /// `quantity <= 0` removes the entry. A product that is not in the cart
    /// is left alone.
    pub fn update_quantity(
        &mut self,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<&CartState, CommerceError> {
        let changed =
            self.state
                .set_quantity(product_id, quantity, self.config.max_quantity_per_item)?;
        if !changed {
            return Ok(&self.state);
        }
        tracing::debug!(product_id = %product_id, quantity, "updated cart quantity");
        self.persist()
    }

    /// Remove every entry.
    ///
    /// Always rewrites the snapshot, which also replaces a snapshot that
    /// failed to load.
    pub fn clear(&mut self) -> Result<&CartState, CommerceError> {
        if self.state.clear() {
            tracing::debug!("cleared cart");
        }
        self.persist()
    }

    /// Build the checkout payload for the current cart.
    pub fn to_order_request(
        &self,
        address_id: Option<AddressId>,
    ) -> Result<CreateOrderRequest, CommerceError> {
        CreateOrderRequest::from_cart(&self.state, address_id)
    }

    /// Write the full snapshot.
    ///
    /// On failure the in-memory state keeps the mutation; the next
    /// successful write brings the snapshot back in line.
    fn persist(&self) -> Result<&CartState, CommerceError> {
        if let Err(e) = self.cache.set(&self.config.storage_key, &self.state) {
            tracing::error!(key = %self.config.storage_key, error = %e, "failed to persist cart");
            return Err(e.into());
        }
        tracing::trace!(
            key = %self.config.storage_key,
            entries = self.state.len(),
            "persisted cart snapshot"
        );
        Ok(&self.state)
    }
}

fn load_snapshot<S: Store>(cache: &Cache<S>, config: &CartConfig) -> CartState {
    match read_snapshot(cache, config) {
        Ok(Some(state)) => {
            tracing::debug!(
                key = %config.storage_key,
                entries = state.len(),
                "restored cart snapshot"
            );
            state
        }
        Ok(None) => CartState::default(),
        Err(e) => {
            tracing::warn!(
                key = %config.storage_key,
                error = %e,
                "discarding unreadable cart snapshot"
            );
            CartState::default()
        }
    }
}

fn read_snapshot<S: Store>(
    cache: &Cache<S>,
    config: &CartConfig,
) -> Result<Option<CartState>, CommerceError> {
    let Some(entries) = cache.get::<Vec<SnapshotEntry>>(&config.storage_key)? else {
        return Ok(None);
    };

    let mut state = CartState::default();
    for entry in entries {
        if entry.quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(entry.quantity));
        }
        let product = Product::from_raw(&entry.product)?;
        state.merge(product, entry.quantity, config.max_quantity_per_item);
    }
    Ok(Some(state))
}
