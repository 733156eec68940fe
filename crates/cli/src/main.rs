//! AquaStore CLI - Inspect and edit a file-backed cart.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart in the default location (.aquastore/localCart.json)
//! aquastore show
//!
//! # Add a product
//! aquastore add --id P1 --title "Water Level Controller" --price 1899
//!
//! # Use another cart file
//! aquastore --dir /tmp/carts --key guestCart show
//! ```
//!
//! # Commands
//!
//! - `show`, `count` - Read the cart
//! - `add`, `update`, `remove`, `clear` - Change the cart
//! - `order` - Print the `{productId, quantity}` order payload

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use aquastore_cart::{FileStorage, LocalCartStore};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use commands::cart::{CartCommand, CliError};
use config::CartConfig;

#[derive(Parser)]
#[command(name = "aquastore")]
#[command(author, version, about = "AquaStore cart tools")]
struct Cli {
    /// Directory holding the cart file (overrides `AQUASTORE_CART_DIR`)
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Storage key of the cart (overrides `AQUASTORE_CART_KEY`)
    #[arg(long, global = true)]
    key: Option<String>,

    #[command(subcommand)]
    command: CartCommand,
}

fn main() {
    // Logs go to stderr so stdout stays machine-readable
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "aquastore_cart=info,aquastore_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(output) => print_output(&output),
        Err(e) => {
            tracing::error!("Command failed: {e}");
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<String, CliError> {
    let config = CartConfig::from_env()?.with_overrides(cli.dir, cli.key)?;
    tracing::debug!(
        dir = %config.storage_dir.display(),
        key = %config.storage_key,
        "Opening cart"
    );

    let store = LocalCartStore::with_key(
        FileStorage::new(config.storage_dir),
        config.storage_key,
    );
    commands::cart::run(&store, cli.command, config.currency)
}

#[allow(clippy::print_stdout)]
fn print_output(output: &str) {
    println!("{output}");
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_update_with_negative_quantity() {
        let cli = Cli::try_parse_from(["aquastore", "update", "--id", "P1", "--quantity", "-1"])
            .unwrap();
        assert!(matches!(
            cli.command,
            CartCommand::Update { ref id, quantity: -1 } if id == "P1"
        ));
    }

    #[test]
    fn test_parse_global_overrides_after_subcommand() {
        let cli = Cli::try_parse_from(["aquastore", "show", "--dir", "carts", "--key", "guest"])
            .unwrap();
        assert_eq!(cli.dir, Some(PathBuf::from("carts")));
        assert_eq!(cli.key.as_deref(), Some("guest"));
    }

    #[test]
    fn test_parse_add_defaults_to_one_unit() {
        let cli = Cli::try_parse_from([
            "aquastore", "add", "--id", "P1", "--title", "Controller", "--price", "1899.50",
        ])
        .unwrap();
        assert!(matches!(cli.command, CartCommand::Add { quantity: 1, .. }));
    }
}
