//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart
//! aquastore show
//!
//! # Add two units of a product
//! aquastore add --id 65f1c0ffee --title "Smart Water Controller" --price 2499 --quantity 2
//!
//! # Change a quantity (0 or less removes the line)
//! aquastore update --id 65f1c0ffee --quantity 1
//!
//! # Print the order-creation payload
//! aquastore order
//! ```

use aquastore_cart::{Cart, CartStorage, InvalidProductError, LocalCartStore, NewCartItem};
use aquastore_core::CurrencyCode;
use clap::Subcommand;
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur while running a cart command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The product passed to `add` was rejected.
    #[error("Invalid product: {0}")]
    InvalidProduct(#[from] InvalidProductError),

    /// The result could not be rendered.
    #[error("Output error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Cart subcommands.
#[derive(Debug, Subcommand)]
pub enum CartCommand {
    /// Show the cart with totals
    Show,
    /// Add a product to the cart
    Add {
        /// Product ID
        #[arg(long)]
        id: String,

        /// Product title
        #[arg(long)]
        title: String,

        /// Unit price
        #[arg(long, allow_negative_numbers = true)]
        price: Decimal,

        /// Image URL
        #[arg(long)]
        image: Option<String>,

        /// Units to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Set the quantity of a product (0 or less removes it)
    Update {
        /// Product ID
        #[arg(long)]
        id: String,

        /// New quantity
        #[arg(short, long, allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove a product from the cart
    Remove {
        /// Product ID
        #[arg(long)]
        id: String,
    },
    /// Empty the cart
    Clear,
    /// Print the order-creation payload
    Order,
    /// Print the number of units in the cart
    Count,
}

/// Cart snapshot plus a formatted total, as printed by the CLI.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CartSummary<'a> {
    #[serde(flatten)]
    cart: &'a Cart,
    total_display: String,
}

fn render(cart: &Cart, currency: CurrencyCode) -> Result<String, CliError> {
    let summary = CartSummary {
        cart,
        total_display: cart.total_amount().display(currency),
    };
    Ok(serde_json::to_string_pretty(&summary)?)
}

/// Run `command` against `store` and return the text to print.
///
/// # Errors
///
/// Returns `CliError` if `add` is given an invalid product or the output
/// cannot be rendered. Storage failures are logged by the store and do not
/// surface here.
pub fn run<S: CartStorage>(
    store: &LocalCartStore<S>,
    command: CartCommand,
    currency: CurrencyCode,
) -> Result<String, CliError> {
    match command {
        CartCommand::Show => render(&store.cart(), currency),
        CartCommand::Add {
            id,
            title,
            price,
            image,
            quantity,
        } => {
            let mut item = NewCartItem::new(id, title, price);
            if let Some(image) = image {
                item = item.with_image(image);
            }
            let cart = store.add_with_quantity(item, quantity)?;
            tracing::info!(item_count = cart.item_count(), "Added to cart");
            render(&cart, currency)
        }
        CartCommand::Update { id, quantity } => {
            render(&store.update_quantity(&id, quantity), currency)
        }
        CartCommand::Remove { id } => render(&store.remove(&id), currency),
        CartCommand::Clear => {
            let cart = store.clear();
            tracing::info!("Cart cleared");
            render(&cart, currency)
        }
        CartCommand::Order => Ok(serde_json::to_string_pretty(&store.order_lines())?),
        CartCommand::Count => Ok(store.item_count().to_string()),
    }
}
