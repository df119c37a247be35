//! Credential pair persistence.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::storage::{Storage, StorageError, keys};

/// The session's token pair.
///
/// Exactly one pair is active per session: created on login, the access
/// half replaced on renewal, destroyed on logout or unrecoverable renewal
/// failure. `Debug` redacts both tokens.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialPair {
    /// Short-lived token attached to every authenticated request.
    pub access: String,
    /// Longer-lived token used solely to mint a new access token.
    pub refresh: String,
}

impl std::fmt::Debug for CredentialPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialPair")
            .field("access", &"[REDACTED]")
            .field("refresh", &"[REDACTED]")
            .finish()
    }
}

/// Persists the credential pair across restarts.
///
/// No expiry inspection happens here; validity is determined only by the
/// remote API's responses.
#[derive(Clone)]
pub struct CredentialStore {
    storage: Arc<dyn Storage>,
}

impl CredentialStore {
    /// Create a credential store over the given storage backend.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Persist a credential pair, replacing any existing one.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    pub fn save(&self, pair: &CredentialPair) -> Result<(), StorageError> {
        // Two opaque strings; serialization cannot fail.
        let serialized = serde_json::to_string(pair).expect("credential pair serializes");
        self.storage.set(keys::CREDENTIALS, &serialized)
    }

    /// Load the stored credential pair, if any.
    ///
    /// A corrupt persisted value is treated as absent and cleaned up, never
    /// surfaced as an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    pub fn load(&self) -> Result<Option<CredentialPair>, StorageError> {
        let Some(raw) = self.storage.get(keys::CREDENTIALS)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(pair) => Ok(Some(pair)),
            Err(e) => {
                tracing::debug!(error = %e, "discarding corrupt persisted credentials");
                self.storage.remove(keys::CREDENTIALS)?;
                Ok(None)
            }
        }
    }

    /// Overwrite only the access token, keeping the refresh token.
    ///
    /// Used by the renewal protocol; a no-op if no pair is stored (the
    /// session was torn down while the renewal was in flight).
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    pub fn store_access(&self, access: &str) -> Result<(), StorageError> {
        if let Some(mut pair) = self.load()? {
            pair.access = access.to_string();
            self.save(&pair)?;
        }
        Ok(())
    }

    /// Remove the stored credential pair; idempotent.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove(keys::CREDENTIALS)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn store() -> CredentialStore {
        CredentialStore::new(Arc::new(MemoryStorage::new()))
    }

    fn pair(access: &str, refresh: &str) -> CredentialPair {
        CredentialPair {
            access: access.to_string(),
            refresh: refresh.to_string(),
        }
    }

    #[test]
    fn test_save_load_clear() {
        let store = store();
        assert_eq!(store.load().unwrap(), None);

        store.save(&pair("a1", "r1")).unwrap();
        assert_eq!(store.load().unwrap(), Some(pair("a1", "r1")));

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);

        // clear is idempotent
        store.clear().unwrap();
    }

    #[test]
    fn test_store_access_keeps_refresh() {
        let store = store();
        store.save(&pair("a1", "r1")).unwrap();
        store.store_access("a2").unwrap();
        assert_eq!(store.load().unwrap(), Some(pair("a2", "r1")));
    }

    #[test]
    fn test_store_access_without_pair_is_noop() {
        let store = store();
        store.store_access("a2").unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_corrupt_value_treated_as_absent() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(keys::CREDENTIALS, "{not json").unwrap();
        let store = CredentialStore::new(storage.clone());
        assert_eq!(store.load().unwrap(), None);
        // and cleaned up
        assert_eq!(storage.get(keys::CREDENTIALS).unwrap(), None);
    }

    #[test]
    fn test_debug_redacts_tokens() {
        let debug = format!("{:?}", pair("topsecret", "alsosecret"));
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("topsecret"));
        assert!(!debug.contains("alsosecret"));
    }
}
