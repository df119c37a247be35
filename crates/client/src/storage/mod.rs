//! Durable key/value storage for client-side state.
//!
//! The browser analog is origin-scoped local storage: a small set of string
//! keys that survive restarts. The [`Storage`] trait keeps the credential
//! store and the cart independent of where bytes actually land -
//! [`FileStorage`] for real use, [`MemoryStorage`] for tests and embedders
//! that manage persistence themselves.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use thiserror::Error;

/// Errors that can occur reading or writing persisted state.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The storage key contains characters that cannot be persisted.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),
}

/// Durable string key/value storage.
///
/// Values persist across process restarts. Reads of never-written keys
/// return `Ok(None)`. Implementations must be safe to share across tasks.
pub trait Storage: Send + Sync {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// The write must be complete when this returns, so a subsequent `get`
    /// observes it.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the value stored under `key`; no-op if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Well-known storage keys.
pub mod keys {
    /// Key for the persisted credential pair.
    pub const CREDENTIALS: &str = "credentials";

    /// Key for the persisted cart lines.
    pub const CART: &str = "cart";
}
