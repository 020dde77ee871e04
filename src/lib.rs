//! Ocean Explorer - progression engine for a gated learning journey
//!
//! Core modules:
//! - `catalog`: The fixed, ordered list of locations
//! - `cascade`: Unlock cascade repair
//! - `progression`: Session store for unlock/completion state
//! - `shared`: Re-entrant handle for listeners that call back into the store
//! - `persistence`: Snapshot format and save slot over key-value storage
//! - `platform`: Browser/native storage backends and JS bindings

pub mod cascade;
pub mod catalog;
pub mod persistence;
pub mod platform;
pub mod progression;
pub mod shared;

pub use catalog::{Catalog, CatalogError, Location, LocationStatus};
pub use persistence::{KeyValueStore, MemoryStore, SaveSlot, Snapshot, StorageError};
pub use progression::{Progress, Progression, SubscriptionId};
pub use shared::SharedProgression;

/// Storage configuration constants
pub mod consts {
    /// Key of the progress snapshot in LocalStorage (and file stem on native)
    pub const STORAGE_KEY: &str = "ocean-explorer-progression";
    /// Extension of snapshot files written by the native file store
    pub const SNAPSHOT_EXTENSION: &str = "json";
    /// Data directory used by the native binary when none is given
    pub const DEFAULT_DATA_DIR: &str = ".ocean-explorer";
}
