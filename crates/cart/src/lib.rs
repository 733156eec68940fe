//! AquaStore cart - the client-side shopping cart.
//!
//! The cart lives entirely on the customer's device. Line items are kept in a
//! single JSON blob inside a key-value [`CartStorage`] medium, and every
//! operation is a synchronous read-modify-write of that blob. Totals are never
//! stored; each [`Cart`] snapshot recomputes them from its items.
//!
//! The server re-prices every order, so the cart is a convenience rather than
//! a source of record: storage failures are logged and absorbed, and the only
//! error a caller ever sees is [`InvalidProductError`] from an add.
//!
//! # Example
//!
//! ```
//! use aquastore_cart::{LocalCartStore, MemoryStorage, NewCartItem};
//! use rust_decimal::Decimal;
//!
//! let store = LocalCartStore::new(MemoryStorage::new());
//! let widget = NewCartItem::new("A", "Widget", Decimal::from(200)).with_image("x.png");
//!
//! store.add(widget.clone()).unwrap();
//! let cart = store.add_with_quantity(widget, 2).unwrap();
//! assert_eq!(cart.items().len(), 1);
//! assert_eq!(cart.item_count(), 3);
//! assert_eq!(cart.total_amount().amount(), Decimal::from(600));
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod error;
pub mod item;
mod persisted;
pub mod storage;
pub mod store;

pub use cart::Cart;
pub use error::{InvalidProductError, StorageError};
pub use item::{CartLineItem, NewCartItem, OrderLine};
pub use storage::{CartStorage, FileStorage, MemoryStorage};
pub use store::{DEFAULT_STORAGE_KEY, LocalCartStore};
