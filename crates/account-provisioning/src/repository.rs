//! In-memory user collection synchronised with a durable store.
//!
//! The repository is loaded once and then owns the collection. Every
//! mutation rewrites the whole collection under a single key; there is no
//! incremental append at the storage layer.

use tracing::{info, warn};

use crate::error::StoreError;
use crate::record::UserRecord;
use crate::store::DurableStore;

/// Storage key holding the serialised collection unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "registered_users";

/// Ordered collection of user records backed by a [`DurableStore`].
///
/// # Example
///
/// ```
/// use account_provisioning::{MemoryStore, UserRepository};
///
/// let mut repository = UserRepository::load(MemoryStore::default()).expect("load");
/// assert!(repository.list().is_empty());
///
/// repository.clear().expect("clear");
/// assert_eq!(repository.store().writes().len(), 1);
/// ```
#[derive(Debug)]
pub struct UserRepository<S> {
    store: S,
    key: String,
    records: Vec<UserRecord>,
}

impl<S: DurableStore> UserRepository<S> {
    /// Loads the collection stored under [`DEFAULT_STORAGE_KEY`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store cannot be read or holds a payload
    /// that is not a user collection.
    pub fn load(store: S) -> Result<Self, StoreError> {
        Self::load_with_key(store, DEFAULT_STORAGE_KEY)
    }

    /// Loads the collection stored under `key`; a missing key is an empty
    /// collection.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store cannot be read or holds a payload
    /// that is not a user collection.
    pub fn load_with_key(store: S, key: impl Into<String>) -> Result<Self, StoreError> {
        let key_value = key.into();
        let records = match store.read(&key_value)? {
            Some(payload) => {
                serde_json::from_str(&payload).map_err(|err| StoreError::Corrupt {
                    key: key_value.clone(),
                    message: err.to_string(),
                })?
            }
            None => Vec::new(),
        };
        info!(key = %key_value, record_count = records.len(), "user collection loaded");

        Ok(Self {
            store,
            key: key_value,
            records,
        })
    }

    /// Appends a record and rewrites the stored collection.
    ///
    /// The record stays in memory even when the rewrite fails, so memory and
    /// storage can diverge until the next successful write.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the collection cannot be persisted.
    pub fn append(&mut self, record: UserRecord) -> Result<(), StoreError> {
        self.records.push(record);
        self.persist()
    }

    /// Removes every record and rewrites the store with an empty collection.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the empty collection cannot be persisted.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        let removed = self.records.len();
        self.records.clear();
        info!(key = %self.key, removed, "user collection cleared");
        self.persist()
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        let payload = serde_json::to_string(&self.records).map_err(|err| StoreError::Write {
            key: self.key.clone(),
            message: err.to_string(),
        })?;
        self.store.write(&self.key, &payload).inspect_err(|err| {
            warn!(
                key = %self.key,
                error = %err,
                "failed to persist user collection; memory and storage have diverged"
            );
        })
    }
}

impl<S> UserRepository<S> {
    /// Returns the records in insertion order.
    #[must_use]
    pub fn list(&self) -> &[UserRecord] {
        &self.records
    }

    /// Finds a record by identifier.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&UserRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if no records are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the storage key of the collection.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the backing store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Consumes the repository and returns the backing store.
    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }
}
