//! Integration tests for the AquaStore cart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p aquastore-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_properties` - Behavioural properties of the store over an in-memory medium
//! - `file_storage` - The store over the file medium, including persistence across instances
//! - `shared_storage` - Several stores sharing one medium (last-writer-wins)
//!
//! This library only holds shared fixtures.

use aquastore_cart::NewCartItem;
use rust_decimal::Decimal;

/// Install a test-friendly tracing subscriber once per test binary.
///
/// Set `RUST_LOG=aquastore_cart=debug` to see store activity in test output.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aquastore_cart=warn".into()),
        )
        .with_test_writer()
        .try_init();
}

/// The widget from the storefront walkthrough: ID `A`, price 200.
#[must_use]
pub fn widget() -> NewCartItem {
    NewCartItem::new("A", "Widget", Decimal::from(200)).with_image("x.png")
}

/// A product with a generated title and whole-rupee price.
#[must_use]
pub fn product(id: &str, price: i64) -> NewCartItem {
    NewCartItem::new(id, format!("Product {id}"), Decimal::from(price))
        .with_image(format!("https://cdn.example.com/{id}.png"))
}
