//! Persistent store adapter.
//!
//! The engine mirrors its state (cart, wishlist, order log) into a local
//! key/value store after every mutation, one JSON file per key under a state
//! directory. Storage is strictly best-effort: every I/O or JSON failure is
//! caught and logged, and callers see `None` / a silent no-op instead of an
//! error - a missing or corrupt store degrades to empty initial state, never
//! to a user-facing failure.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::warn;

/// Store key for the active cart.
pub const CART_KEY: &str = "grindctrl_cart";
/// Store key for the wishlist.
pub const WISHLIST_KEY: &str = "grindctrl_wishlist";
/// Store key for the completed-order log.
pub const ORDERS_KEY: &str = "grindctrl_orders";

/// Internal storage failure. Logged at the adapter boundary, never surfaced.
#[derive(Debug, Error)]
enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Key/value JSON store over a local directory.
///
/// Cheap to clone; clones share the same directory. Writes are synchronous
/// write-through - there is no buffering and no background flush.
#[derive(Debug, Clone)]
pub struct Store {
    dir: PathBuf,
}

impl Store {
    /// Open a store rooted at `dir`, creating the directory if needed.
    ///
    /// Directory creation failure is logged and tolerated; subsequent writes
    /// will fail (and be logged) but reads behave as an empty store.
    #[must_use]
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        if let Err(e) = std::fs::create_dir_all(&dir) {
            warn!(dir = %dir.display(), error = %e, "Failed to create state directory");
        }
        Self { dir }
    }

    /// Read and deserialize the value under `key`.
    ///
    /// Returns `None` when the key has never been written, or when the stored
    /// file cannot be read or parsed (logged as a warning).
    #[must_use]
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.path_for(key);
        if !path.exists() {
            return None;
        }
        match read_value(&path) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "Failed to load from store; treating as empty");
                None
            }
        }
    }

    /// Serialize and write `value` under `key`, replacing any previous value.
    ///
    /// Failures are logged and swallowed.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) {
        let path = self.path_for(key);
        if let Err(e) = write_value(&path, value) {
            warn!(key, error = %e, "Failed to save to store");
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

fn read_value<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let data = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

fn write_value<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let data = serde_json::to_string(value)?;
    std::fs::write(path, data)?;
    Ok(())
}
