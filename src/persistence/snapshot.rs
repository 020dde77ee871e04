//! Persisted snapshot format
//!
//! On disk this is a single JSON object:
//!
//! ```json
//! {"coral-reef": {"unlocked": true, "completed": true}, "kelp-forest": {...}}
//! ```
//!
//! Entries stay raw until a known id asks for its flags, so entries under ids
//! the catalog no longer has are never inspected. Either flag may be missing
//! or `null` and falls back to the catalog default; a `null` entry counts as
//! missing.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog::Location;

/// Stored flags for one location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SnapshotEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlocked: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

/// Mapping from location id to its stored (undecoded) flags
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    pub entries: BTreeMap<String, Value>,
}

impl Snapshot {
    /// Capture every location's flags
    pub fn from_locations(locations: &[Location]) -> Self {
        let mut snapshot = Self::default();
        for loc in locations {
            snapshot.insert(loc.id.clone(), loc.unlocked, loc.completed);
        }
        snapshot
    }

    /// Decode the flags stored under `id`.
    ///
    /// `Ok(None)` when the id is absent or `null`; `Err` when the entry is
    /// not an object of optional booleans.
    pub fn get(&self, id: &str) -> serde_json::Result<Option<SnapshotEntry>> {
        match self.entries.get(id) {
            None => Ok(None),
            Some(value) => Option::<SnapshotEntry>::deserialize(value),
        }
    }

    pub fn insert(&mut self, id: impl Into<String>, unlocked: bool, completed: bool) {
        self.entries.insert(
            id.into(),
            serde_json::json!({ "unlocked": unlocked, "completed": completed }),
        );
    }

    /// Stored ids, known to the catalog or not
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Parse a stored value; only the top level must be a JSON object
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
