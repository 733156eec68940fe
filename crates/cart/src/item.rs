//! Cart line items.

use aquastore_core::{Price, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::InvalidProductError;

/// One product-and-quantity entry in the cart.
///
/// Title, price and image are a snapshot taken when the product was first
/// added; they are display data only and are never re-synced with the
/// catalog. Persisted with camelCase keys, matching the browser storefront.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    product_id: ProductId,
    title: String,
    price: Price,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image: Option<String>,
    quantity: u32,
}

impl CartLineItem {
    /// Product this line refers to.
    #[must_use]
    pub const fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    /// Display title captured at add-time.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Unit price captured at add-time.
    #[must_use]
    pub const fn price(&self) -> Price {
        self.price
    }

    /// Display image URL, if any.
    #[must_use]
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Number of units, always at least 1.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// `price * quantity` for this line.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }

    /// Minimal `{productId, quantity}` shape for order creation.
    #[must_use]
    pub fn to_order_line(&self) -> OrderLine {
        OrderLine {
            product_id: self.product_id.clone(),
            quantity: self.quantity,
        }
    }

    /// Whether a deserialized entry satisfies the invariants that serde
    /// alone cannot express.
    pub(crate) fn check(&self) -> Result<(), InvalidProductError> {
        if self.title.trim().is_empty() {
            return Err(InvalidProductError::MissingTitle);
        }
        if self.quantity == 0 {
            return Err(InvalidProductError::InvalidQuantity(0));
        }
        Ok(())
    }

    pub(crate) const fn increment(&mut self, by: u32) {
        self.quantity = self.quantity.saturating_add(by);
    }

    pub(crate) const fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
    }
}

/// A product as handed to the cart by a product page.
///
/// Nothing is validated until the item reaches
/// [`LocalCartStore::add`](crate::LocalCartStore::add).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCartItem {
    /// Catalog product ID.
    pub product_id: String,
    /// Display title.
    pub title: String,
    /// Unit price.
    pub price: Decimal,
    /// Display image URL.
    pub image: Option<String>,
}

impl NewCartItem {
    /// Create a new item without an image.
    #[must_use]
    pub fn new(product_id: impl Into<String>, title: impl Into<String>, price: Decimal) -> Self {
        Self {
            product_id: product_id.into(),
            title: title.into(),
            price,
            image: None,
        }
    }

    /// Set the display image URL.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Validate the item and turn it into a line with `quantity` units.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidProductError`] if the product ID or title is empty,
    /// the price is negative, or `quantity` is zero.
    pub fn into_line(self, quantity: u32) -> Result<CartLineItem, InvalidProductError> {
        let product_id = ProductId::parse(&self.product_id)?;
        if self.title.trim().is_empty() {
            return Err(InvalidProductError::MissingTitle);
        }
        let price = Price::new(self.price)?;
        if quantity == 0 {
            return Err(InvalidProductError::InvalidQuantity(quantity));
        }

        Ok(CartLineItem {
            product_id,
            title: self.title,
            price,
            image: self.image,
            quantity,
        })
    }
}

/// A line of the order-creation payload.
///
/// Carries no price: the backend re-derives prices from its own catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    /// Catalog product ID.
    pub product_id: ProductId,
    /// Units ordered.
    pub quantity: u32,
}
