//! Save/load persistence for journey progress
//!
//! Features:
//! - Plain JSON snapshot (location id → unlocked/completed), no version field
//! - One fixed key, always fully overwritten
//! - Swappable key-value backends (memory, file, LocalStorage)
//! - Unreadable or malformed saves degrade to "no save"

pub mod memory;
pub mod slot;
pub mod snapshot;

pub use memory::MemoryStore;
pub use slot::{KeyValueStore, SaveSlot};
pub use snapshot::{Snapshot, SnapshotEntry};

use thiserror::Error;

/// Failure reported by a storage backend
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage is unavailable")]
    Unavailable,
    #[error("storage backend error: {0}")]
    Backend(String),
}
