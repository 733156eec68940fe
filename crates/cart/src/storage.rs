//! Persistence media for the cart.
//!
//! A medium is a synchronous string-keyed key-value store, the shape of a
//! browser's `localStorage`. The cart uses exactly one key per store and
//! always writes the whole value.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use crate::error::StorageError;

/// Abstraction over the key-value medium a cart is persisted in.
pub trait CartStorage {
    /// Read the value stored under `key`.
    ///
    /// Returns `Ok(None)` when nothing has been stored yet.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the medium cannot be written or rejects
    /// the value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S: CartStorage + ?Sized> CartStorage for &S {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

impl<S: CartStorage + ?Sized> CartStorage for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

impl<S: CartStorage + ?Sized> CartStorage for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

/// Check that `key` is usable with every medium in this crate.
///
/// Keys are limited to ASCII letters, digits, `-` and `_` so a key can
/// double as a file name without escaping its directory.
///
/// # Errors
///
/// Returns [`StorageError::InvalidKey`] if the key is empty, longer than 128
/// characters, or contains other characters.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key.len() <= 128
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_owned()))
    }
}

// =============================================================================
// In-memory medium
// =============================================================================

/// In-process medium backed by a `HashMap`.
///
/// Used in tests and when embedding the cart somewhere without durable
/// storage. An optional quota caps the size of any single value, the way
/// browsers cap `localStorage`.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: RwLock<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStorage {
    /// Create an empty medium with no quota.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty medium that rejects values over `limit` bytes.
    #[must_use]
    pub fn with_quota(limit: usize) -> Self {
        Self {
            values: RwLock::default(),
            quota: Some(limit),
        }
    }

    /// Delete the value under `key`, as if the user cleared site data.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] if the lock is poisoned.
    pub fn remove(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut values = self.values.write().map_err(poisoned)?;
        Ok(values.remove(key))
    }
}

impl CartStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let values = self.values.read().map_err(poisoned)?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(limit) = self.quota
            && value.len() > limit
        {
            return Err(StorageError::QuotaExceeded {
                limit,
                attempted: value.len(),
            });
        }

        let mut values = self.values.write().map_err(poisoned)?;
        values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> StorageError {
    StorageError::Unavailable("memory storage lock poisoned".to_string())
}

// =============================================================================
// File medium
// =============================================================================

/// Medium that keeps each key in `<dir>/<key>.json`.
///
/// Each write goes to its own uniquely named temporary file in the same
/// directory and is then renamed into place, so readers see either the old
/// blob or a complete new one, even with several writers on one key.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Create a medium rooted at `dir`.
    ///
    /// The directory is created on first write; reading from a missing
    /// directory yields no data.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the value files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidKey`] if the key fails [`validate_key`].
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }

    fn io_error(path: &Path, source: io::Error) -> StorageError {
        StorageError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl CartStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(Self::io_error(&path, err)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir).map_err(|err| Self::io_error(&self.dir, err))?;

        let mut temp = tempfile::NamedTempFile::new_in(&self.dir)
            .map_err(|err| Self::io_error(&self.dir, err))?;
        temp.write_all(value.as_bytes())
            .map_err(|err| Self::io_error(temp.path(), err))?;
        temp.persist(&path)
            .map_err(|err| Self::io_error(&path, err.error))?;
        Ok(())
    }
}
