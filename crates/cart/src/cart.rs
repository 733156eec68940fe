//! Cart snapshots.

use aquastore_core::Price;
use serde::Serialize;

use crate::item::{CartLineItem, OrderLine};

/// The cart as returned to callers: line items plus derived totals.
///
/// Totals are computed once, when the snapshot is built, and the fields are
/// private so they cannot drift from `items`.
///
/// Snapshots only come from a store, never from arbitrary lines:
///
/// ```compile_fail
/// let cart = aquastore_cart::Cart::from_items(Vec::new());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    items: Vec<CartLineItem>,
    total_amount: Price,
    item_count: u64,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_amount: Price::ZERO,
            item_count: 0,
        }
    }

    /// Build a snapshot from `items`, computing totals.
    #[must_use]
    pub(crate) fn from_items(items: Vec<CartLineItem>) -> Self {
        let total_amount = items
            .iter()
            .map(CartLineItem::line_total)
            .fold(Price::ZERO, Price::saturating_add);
        let item_count = items.iter().map(|item| u64::from(item.quantity())).sum();

        Self {
            items,
            total_amount,
            item_count,
        }
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Sum of `price * quantity` over all items.
    #[must_use]
    pub const fn total_amount(&self) -> Price {
        self.total_amount
    }

    /// Sum of quantities over all items.
    #[must_use]
    pub const fn item_count(&self) -> u64 {
        self.item_count
    }

    /// Whether the cart has no items.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Line item for `product_id`, if present.
    #[must_use]
    pub fn get(&self, product_id: &str) -> Option<&CartLineItem> {
        self.items.iter().find(|item| item.product_id() == product_id)
    }

    /// `{productId, quantity}` projection used for order creation.
    #[must_use]
    pub fn order_lines(&self) -> Vec<OrderLine> {
        self.items.iter().map(CartLineItem::to_order_line).collect()
    }

    /// Consume the snapshot and return its items.
    #[must_use]
    pub fn into_items(self) -> Vec<CartLineItem> {
        self.items
    }
}
