//! Save slot: one snapshot under one key
//!
//! The slot owns a key-value backend and never reports failure to its caller.
//! Read problems look like an empty slot; write problems are logged and dropped.

use super::StorageError;
use super::snapshot::Snapshot;
use crate::consts::STORAGE_KEY;

/// String key-value storage, shaped after the browser's `Storage` interface
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}

/// Durable slot holding the progress snapshot
#[derive(Debug, Clone)]
pub struct SaveSlot<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> SaveSlot<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Slot under the standard progression key
    pub fn with_default_key(store: S) -> Self {
        Self::new(store, STORAGE_KEY)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the saved snapshot, or `None` if absent, unreadable or malformed
    pub fn read(&self) -> Option<Snapshot> {
        let raw = match self.store.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                log::warn!("Could not read saved progress ({}): {}", self.key, e);
                return None;
            }
        };

        match Snapshot::from_json(&raw) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                log::warn!("Discarding malformed saved progress ({}): {}", self.key, e);
                None
            }
        }
    }

    /// Overwrite the slot with `snapshot`
    pub fn write(&mut self, snapshot: &Snapshot) {
        let json = match snapshot.to_json() {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not encode progress: {}", e);
                return;
            }
        };

        match self.store.set_item(&self.key, &json) {
            Ok(()) => log::debug!("Progress saved ({} locations)", snapshot.len()),
            Err(e) => log::warn!("Progress not saved ({}): {}", self.key, e),
        }
    }

    /// Remove the slot entirely
    pub fn clear(&mut self) {
        if let Err(e) = self.store.remove_item(&self.key) {
            log::warn!("Could not clear saved progress ({}): {}", self.key, e);
        }
    }
}
