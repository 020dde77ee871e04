//! Location catalog
//!
//! The fixed, ordered list of locations the journey walks through. Identity,
//! order and metadata never change at runtime; only the `unlocked` and
//! `completed` flags of the live copy held by the progression store do.

use serde::Serialize;
use thiserror::Error;

/// Display state of a location on the map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LocationStatus {
    /// Not reachable yet
    Locked,
    /// Unlocked and waiting to be finished
    Available,
    /// Content finished
    Completed,
}

impl LocationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationStatus::Locked => "Locked",
            LocationStatus::Available => "Available",
            LocationStatus::Completed => "Completed",
        }
    }
}

/// One gated stage of the journey
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// Stable identifier, unique within the catalog
    pub id: String,
    pub name: String,
    pub display_icon: String,
    /// Navigation targets owned by this location; the first is where a visit starts
    pub entry_points: Vec<String>,
    pub unlocked: bool,
    pub completed: bool,
}

impl Location {
    /// Create a locked, incomplete location
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        display_icon: impl Into<String>,
        entry_points: &[&str],
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            display_icon: display_icon.into(),
            entry_points: entry_points.iter().map(|e| e.to_string()).collect(),
            unlocked: false,
            completed: false,
        }
    }

    /// Builder-style override of the default unlock flag
    pub fn with_unlocked(mut self, unlocked: bool) -> Self {
        self.unlocked = unlocked;
        self
    }

    /// Canonical "start here" target, if the location has any entry point
    pub fn start_entry_point(&self) -> Option<&str> {
        self.entry_points.first().map(String::as_str)
    }

    pub fn has_entry_point(&self, entry_point: &str) -> bool {
        self.entry_points.iter().any(|e| e == entry_point)
    }

    pub fn status(&self) -> LocationStatus {
        if self.completed {
            LocationStatus::Completed
        } else if self.unlocked {
            LocationStatus::Available
        } else {
            LocationStatus::Locked
        }
    }
}

/// Reasons a catalog definition is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("catalog must contain at least one location")]
    Empty,
    #[error("duplicate location id: {0}")]
    DuplicateId(String),
}

/// Ordered, immutable definition of every location and its default flags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    locations: Vec<Location>,
}

impl Catalog {
    /// Build a catalog from its locations in progression order.
    ///
    /// Defaults are normalized: nothing starts completed and the first
    /// location always starts unlocked.
    pub fn new(mut locations: Vec<Location>) -> Result<Self, CatalogError> {
        if locations.is_empty() {
            return Err(CatalogError::Empty);
        }
        for (i, location) in locations.iter().enumerate() {
            if locations[..i].iter().any(|l| l.id == location.id) {
                return Err(CatalogError::DuplicateId(location.id.clone()));
            }
        }

        for location in &mut locations {
            location.completed = false;
        }
        locations[0].unlocked = true;

        Ok(Self { locations })
    }

    /// The Ocean Explorer journey: reef, kelp forest, open ocean, deep sea
    pub fn ocean() -> Self {
        Self {
            locations: vec![
                Location::new(
                    "coral-reef",
                    "Coral Reef",
                    "🪸",
                    &["/intro", "/lesson", "/coral-reef-quiz"],
                )
                .with_unlocked(true),
                Location::new(
                    "kelp-forest",
                    "Kelp Forest",
                    "🌿",
                    &["/kelp-forest-intro", "/kelp-forest-lesson", "/kelp-forest-quiz"],
                ),
                Location::new("open-ocean", "Open Ocean", "🌊", &["/analyze"]),
                Location::new("deep-sea", "Deep Sea", "🐙", &["/quiz", "/summary"]),
            ],
        }
    }

    /// Fresh copy of the default location list
    pub fn defaults(&self) -> Vec<Location> {
        self.locations.clone()
    }

    pub fn get(&self, id: &str) -> Option<&Location> {
        self.locations.iter().find(|l| l.id == id)
    }

    /// Catalog position of a location id
    pub fn position(&self, id: &str) -> Option<usize> {
        self.locations.iter().position(|l| l.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Location> {
        self.locations.iter()
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::ocean()
    }
}
