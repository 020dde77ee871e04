//! Progression store
//!
//! Owns the live location list for a session. It is the only writer of saved
//! progress: every mutation re-runs the unlock cascade, saves the full list,
//! then notifies observers, all before returning.
//!
//! Nothing here fails. Bad saves fall back to catalog defaults, unknown ids
//! are ignored and storage errors are only logged.

use serde::Serialize;

use crate::cascade;
use crate::catalog::{Catalog, Location};
use crate::persistence::{KeyValueStore, SaveSlot, Snapshot};

/// Handle returned by [`Progression::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u32);

impl SubscriptionId {
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

type Observer = Box<dyn FnMut(&[Location])>;

/// Journey summary for progress indicators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub total: usize,
    pub unlocked: usize,
    pub completed: usize,
    /// First location that is unlocked but not finished yet
    pub current: Option<usize>,
    pub is_complete: bool,
}

/// Session owner of unlock/completion state
pub struct Progression<S: KeyValueStore> {
    catalog: Catalog,
    locations: Vec<Location>,
    slot: SaveSlot<S>,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u32,
}

impl<S: KeyValueStore> Progression<S> {
    /// Restore progress from `slot`, reconciled against `catalog`
    pub fn load(catalog: Catalog, slot: SaveSlot<S>) -> Self {
        let mut locations = match slot.read().and_then(|snapshot| overlay(&catalog, &snapshot)) {
            Some(locations) => locations,
            None => {
                log::info!("No usable saved progress, starting fresh");
                catalog.defaults()
            }
        };

        let forced = cascade::repair(&mut locations);
        if forced > 0 {
            log::info!("Saved progress was out of sync, unlocked {} location(s)", forced);
        }

        let completed = locations.iter().filter(|l| l.completed).count();
        log::info!("Progress loaded ({}/{} completed)", completed, locations.len());

        Self {
            catalog,
            locations,
            slot,
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Current locations in catalog order
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn slot(&self) -> &SaveSlot<S> {
        &self.slot
    }

    pub fn location(&self, id: &str) -> Option<&Location> {
        self.locations.iter().find(|l| l.id == id)
    }

    /// `false` for unknown ids
    pub fn is_location_unlocked(&self, id: &str) -> bool {
        self.location(id).is_some_and(|l| l.unlocked)
    }

    /// First location (catalog order) that owns `entry_point`
    pub fn location_by_entry_point(&self, entry_point: &str) -> Option<&Location> {
        self.locations.iter().find(|l| l.has_entry_point(entry_point))
    }

    /// Where a map click on `id` should go: the first entry point, if unlocked
    pub fn start_entry_point(&self, id: &str) -> Option<&str> {
        self.location(id)
            .filter(|l| l.unlocked)
            .and_then(Location::start_entry_point)
    }

    /// Gate for direct navigation.
    ///
    /// Entry points owned by no location (home, map) are always open.
    pub fn can_enter(&self, entry_point: &str) -> bool {
        self.location_by_entry_point(entry_point)
            .is_none_or(|l| l.unlocked)
    }

    pub fn progress(&self) -> Progress {
        progress_of(&self.locations)
    }

    /// Record that a location's content has been finished.
    ///
    /// Unlocks the next location in catalog order regardless of whether the
    /// ones before it are done, saves, then notifies observers. Unknown ids
    /// change nothing and trigger no save.
    pub fn mark_location_completed(&mut self, id: &str) -> &[Location] {
        let Some(index) = self.catalog.position(id) else {
            log::debug!("Ignoring completion of unknown location: {}", id);
            return &self.locations;
        };

        self.locations[index].completed = true;
        if let Some(next) = self.locations.get_mut(index + 1) {
            next.unlocked = true;
        }
        cascade::repair(&mut self.locations);

        log::info!("Location completed: {}", id);
        self.save();
        self.notify();

        &self.locations
    }

    /// Back to catalog defaults, with the save removed
    pub fn reset(&mut self) {
        self.locations = self.catalog.defaults();
        self.slot.clear();
        log::info!("Progress reset");
        self.notify();
    }

    /// Register a callback run after every completion and reset
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&[Location]) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription = self.next_subscription.wrapping_add(1);
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns `false` if the subscription was not registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    fn save(&mut self) {
        self.slot.write(&Snapshot::from_locations(&self.locations));
    }

    fn notify(&mut self) {
        for (_, observer) in &mut self.observers {
            observer(&self.locations);
        }
    }
}

/// Summarize a location list
pub fn progress_of(locations: &[Location]) -> Progress {
    let total = locations.len();
    let completed = locations.iter().filter(|l| l.completed).count();
    Progress {
        total,
        unlocked: locations.iter().filter(|l| l.unlocked).count(),
        completed,
        current: locations.iter().position(|l| l.unlocked && !l.completed),
        is_complete: completed == total,
    }
}

/// Catalog defaults with stored flags laid over them, matched by id.
///
/// Only catalog ids are decoded. A malformed entry under one of them rejects
/// the whole snapshot; entries under other ids are skipped unread.
fn overlay(catalog: &Catalog, snapshot: &Snapshot) -> Option<Vec<Location>> {
    let mut locations = catalog.defaults();
    for location in &mut locations {
        let stored = match snapshot.get(&location.id) {
            Ok(stored) => stored.unwrap_or_default(),
            Err(e) => {
                log::warn!("Discarding saved progress, bad entry for {}: {}", location.id, e);
                return None;
            }
        };
        location.unlocked = stored.unlocked.unwrap_or(location.unlocked);
        location.completed = stored.completed.unwrap_or(false);
    }

    let unknown = snapshot.ids().filter(|id| catalog.get(id).is_none()).count();
    if unknown > 0 {
        log::debug!("Ignoring {} unknown location id(s) in saved progress", unknown);
    }

    Some(locations)
}
