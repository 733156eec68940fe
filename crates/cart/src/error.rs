//! Cart error types.

use std::io;
use std::path::PathBuf;

use aquastore_core::{PriceError, ProductIdError};
use thiserror::Error;

/// An add-to-cart call was made with a malformed product.
///
/// This is a caller bug, not an environmental failure, so it is the one error
/// the store returns instead of absorbing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidProductError {
    /// The product ID is missing or malformed.
    #[error("invalid product id: {0}")]
    ProductId(#[from] ProductIdError),

    /// The title is empty or only whitespace.
    #[error("product title cannot be empty")]
    MissingTitle,

    /// The unit price is not a valid non-negative amount.
    #[error("invalid product price: {0}")]
    Price(#[from] PriceError),

    /// The requested quantity is not a positive count.
    #[error("quantity must be at least 1, got {0}")]
    InvalidQuantity(u32),
}

/// Failure of the persistence medium.
///
/// The store never propagates these; they are logged and the operation
/// degrades to having no effect.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O error at {}: {source}", .path.display())]
    Io {
        /// File that was being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },

    /// The key cannot be used with this medium.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// The medium cannot currently be used.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// The value is larger than the medium accepts.
    #[error("storage quota exceeded: {attempted} bytes attempted, limit is {limit}")]
    QuotaExceeded {
        /// Maximum value size in bytes.
        limit: usize,
        /// Size of the rejected value in bytes.
        attempted: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_product_display() {
        let err = InvalidProductError::from(ProductIdError::Empty);
        assert_eq!(err.to_string(), "invalid product id: product id cannot be empty");

        let err = InvalidProductError::InvalidQuantity(0);
        assert_eq!(err.to_string(), "quantity must be at least 1, got 0");
    }

    #[test]
    fn test_storage_error_display() {
        let err = StorageError::QuotaExceeded {
            limit: 10,
            attempted: 42,
        };
        assert_eq!(
            err.to_string(),
            "storage quota exceeded: 42 bytes attempted, limit is 10"
        );
    }
}
