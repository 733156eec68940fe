//! The local cart store.
//!
//! Every operation reads the whole line-item list from storage, changes it in
//! memory and writes the whole list back. Nothing is cached between calls, so
//! two stores over the same medium see each other's writes, but concurrent
//! read-modify-write cycles are not coordinated: the last write wins.

use tracing::{debug, instrument, warn};

use crate::cart::Cart;
use crate::error::InvalidProductError;
use crate::item::{CartLineItem, NewCartItem, OrderLine};
use crate::persisted;
use crate::storage::CartStorage;

/// Storage key used by the browser storefront.
pub const DEFAULT_STORAGE_KEY: &str = "localCart";

/// Cart store over an injected persistence medium.
#[derive(Debug, Clone)]
pub struct LocalCartStore<S> {
    storage: S,
    key: String,
}

impl<S: CartStorage> LocalCartStore<S> {
    /// Create a store using [`DEFAULT_STORAGE_KEY`].
    #[must_use]
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_STORAGE_KEY)
    }

    /// Create a store that persists under `key`.
    #[must_use]
    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Storage key this store reads and writes.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The underlying medium.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Current cart.
    ///
    /// Never fails: missing, unreadable or corrupt storage reads as an empty
    /// cart, and malformed entries are skipped.
    #[instrument(level = "debug", skip(self), fields(key = %self.key))]
    pub fn cart(&self) -> Cart {
        Cart::from_items(self.load())
    }

    /// Add one unit of `item`. See [`Self::add_with_quantity`].
    ///
    /// # Errors
    ///
    /// Returns [`InvalidProductError`] if the item is malformed.
    pub fn add(&self, item: NewCartItem) -> Result<Cart, InvalidProductError> {
        self.add_with_quantity(item, 1)
    }

    /// Add `quantity` units of `item`.
    ///
    /// If the product is already in the cart its quantity is increased and
    /// the stored title, price and image are kept; otherwise a new line is
    /// appended.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidProductError`] if the product ID or title is empty,
    /// the price is negative, or `quantity` is zero. Storage is not touched.
    #[instrument(
        level = "debug",
        skip(self, item),
        fields(key = %self.key, product_id = %item.product_id)
    )]
    pub fn add_with_quantity(
        &self,
        item: NewCartItem,
        quantity: u32,
    ) -> Result<Cart, InvalidProductError> {
        let line = item.into_line(quantity)?;
        let before = self.load();
        let mut items = before.clone();

        match position_of(&items, line.product_id().as_str()) {
            Some(position) => {
                if let Some(existing) = items.get_mut(position) {
                    existing.increment(quantity);
                    debug!(quantity = existing.quantity(), "Incremented cart line");
                }
            }
            None => {
                debug!(quantity, "Appended cart line");
                items.push(line);
            }
        }

        Ok(self.commit(before, &items))
    }

    /// Set the quantity of `product_id`.
    ///
    /// A quantity of zero or less removes the line. Unknown products are a
    /// no-op and nothing is written.
    #[instrument(level = "debug", skip(self), fields(key = %self.key))]
    pub fn update_quantity(&self, product_id: &str, quantity: i64) -> Cart {
        let before = self.load();
        let Some(position) = position_of(&before, product_id) else {
            debug!("Product not in cart, nothing to update");
            return Cart::from_items(before);
        };

        let mut items = before.clone();
        if quantity <= 0 {
            items.remove(position);
            debug!("Removed cart line via zero quantity");
        } else if let Some(line) = items.get_mut(position) {
            line.set_quantity(u32::try_from(quantity).unwrap_or(u32::MAX));
            debug!(quantity = line.quantity(), "Updated cart line quantity");
        }

        self.commit(before, &items)
    }

    /// Remove the line for `product_id`. Unknown products are a no-op.
    #[instrument(level = "debug", skip(self), fields(key = %self.key))]
    pub fn remove(&self, product_id: &str) -> Cart {
        let before = self.load();
        let Some(position) = position_of(&before, product_id) else {
            debug!("Product not in cart, nothing to remove");
            return Cart::from_items(before);
        };

        let mut items = before.clone();
        items.remove(position);
        debug!("Removed cart line");
        self.commit(before, &items)
    }

    /// Empty the cart.
    ///
    /// If the empty list cannot be written the previous cart is returned.
    #[instrument(level = "debug", skip(self), fields(key = %self.key))]
    pub fn clear(&self) -> Cart {
        if self.save(&[]).is_some() {
            debug!("Cleared cart");
            Cart::empty()
        } else {
            Cart::from_items(self.load())
        }
    }

    /// `{productId, quantity}` lines for order creation.
    pub fn order_lines(&self) -> Vec<OrderLine> {
        self.cart().order_lines()
    }

    /// Whether `product_id` has a line in the cart.
    pub fn contains(&self, product_id: &str) -> bool {
        position_of(&self.load(), product_id).is_some()
    }

    /// Quantity of `product_id` in the cart, `0` if absent.
    pub fn quantity_of(&self, product_id: &str) -> u32 {
        self.load()
            .iter()
            .find(|line| line.product_id() == product_id)
            .map_or(0, CartLineItem::quantity)
    }

    /// Line for `product_id`, if present.
    pub fn line(&self, product_id: &str) -> Option<CartLineItem> {
        self.load()
            .into_iter()
            .find(|line| line.product_id() == product_id)
    }

    /// Total number of units in the cart.
    pub fn item_count(&self) -> u64 {
        self.cart().item_count()
    }

    fn load(&self) -> Vec<CartLineItem> {
        match self.storage.get(&self.key) {
            Ok(Some(raw)) => persisted::decode(&raw),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to read cart, treating it as empty");
                Vec::new()
            }
        }
    }

    /// Write `items`, returning the blob that was stored.
    fn save(&self, items: &[CartLineItem]) -> Option<String> {
        let raw = match persisted::encode(items) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to serialize cart, change discarded");
                return None;
            }
        };

        match self.storage.set(&self.key, &raw) {
            Ok(()) => Some(raw),
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to write cart, change discarded");
                None
            }
        }
    }

    /// Persist `after`, falling back to `before` if the write fails.
    ///
    /// The snapshot is decoded from the stored blob so it matches what the
    /// next read returns, including any precision the JSON number dropped.
    fn commit(&self, before: Vec<CartLineItem>, after: &[CartLineItem]) -> Cart {
        self.save(after).map_or_else(
            || Cart::from_items(before),
            |raw| Cart::from_items(persisted::decode(&raw)),
        )
    }
}

fn position_of(items: &[CartLineItem], product_id: &str) -> Option<usize> {
    items.iter().position(|line| line.product_id() == product_id)
}
