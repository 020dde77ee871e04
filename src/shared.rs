//! Shared progression handle
//!
//! Wraps a [`Progression`] for consumers that hold it behind a shared
//! reference (the JS bindings) and whose listeners read or mutate it again
//! while being notified. Every borrow of the store ends before listeners run,
//! so a listener may call back into the handle.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::catalog::Location;
use crate::persistence::KeyValueStore;
use crate::progression::{Progression, SubscriptionId};

type Listener = Rc<dyn Fn(&[Location])>;

pub struct SharedProgression<S: KeyValueStore> {
    inner: RefCell<Progression<S>>,
    listeners: RefCell<Vec<(SubscriptionId, Listener)>>,
    next_listener: Cell<u32>,
}

impl<S: KeyValueStore> SharedProgression<S> {
    pub fn new(progression: Progression<S>) -> Self {
        Self {
            inner: RefCell::new(progression),
            listeners: RefCell::new(Vec::new()),
            next_listener: Cell::new(0),
        }
    }

    /// Run a read-only query against the store
    pub fn with<R>(&self, query: impl FnOnce(&Progression<S>) -> R) -> R {
        query(&self.inner.borrow())
    }

    /// Complete `id`, then notify listeners if the id is known
    pub fn mark_location_completed(&self, id: &str) -> Vec<Location> {
        let (known, locations) = {
            let mut progression = self.inner.borrow_mut();
            let known = progression.location(id).is_some();
            (known, progression.mark_location_completed(id).to_vec())
        };
        if known {
            self.dispatch(&locations);
        }
        locations
    }

    pub fn reset(&self) {
        let locations = {
            let mut progression = self.inner.borrow_mut();
            progression.reset();
            progression.locations().to_vec()
        };
        self.dispatch(&locations);
    }

    pub fn subscribe(&self, listener: impl Fn(&[Location]) + 'static) -> SubscriptionId {
        let id = SubscriptionId::from_raw(self.next_listener.get());
        self.next_listener.set(self.next_listener.get().wrapping_add(1));
        self.listeners.borrow_mut().push((id, Rc::new(listener)));
        id
    }

    /// Returns `false` if the subscription was not registered
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(sub, _)| *sub != id);
        listeners.len() != before
    }

    fn dispatch(&self, locations: &[Location]) {
        // Listeners registered or removed during dispatch take effect next time
        let listeners: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener(locations);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::persistence::{MemoryStore, SaveSlot};

    fn shared() -> Rc<SharedProgression<MemoryStore>> {
        let slot = SaveSlot::with_default_key(MemoryStore::new());
        Rc::new(SharedProgression::new(Progression::load(Catalog::ocean(), slot)))
    }

    #[test]
    fn test_listener_can_query_during_notification() {
        let store = shared();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let handle = Rc::downgrade(&store);
        let sink = seen.clone();
        store.subscribe(move |_| {
            if let Some(store) = handle.upgrade() {
                let unlocked = store.with(|p| p.is_location_unlocked("kelp-forest"));
                let completed = store.with(|p| p.progress().completed);
                sink.borrow_mut().push((unlocked, completed));
            }
        });

        store.mark_location_completed("coral-reef");
        store.reset();
        assert_eq!(*seen.borrow(), [(true, 1), (false, 0)]);
    }

    #[test]
    fn test_listener_can_mutate_during_notification() {
        let store = shared();
        let calls = Rc::new(Cell::new(0));

        let handle = Rc::downgrade(&store);
        let counter = calls.clone();
        store.subscribe(move |locations| {
            counter.set(counter.get() + 1);
            // Finishing the reef also finishes the kelp forest
            if locations[0].completed && !locations[1].completed {
                if let Some(store) = handle.upgrade() {
                    store.mark_location_completed("kelp-forest");
                }
            }
        });

        store.mark_location_completed("coral-reef");
        assert_eq!(calls.get(), 2);
        assert!(store.with(|p| p.is_location_unlocked("open-ocean")));
    }

    #[test]
    fn test_listener_can_unsubscribe_itself() {
        let store = shared();
        let calls = Rc::new(Cell::new(0));
        let own_id: Rc<Cell<Option<SubscriptionId>>> = Rc::default();

        let handle = Rc::downgrade(&store);
        let counter = calls.clone();
        let id_slot = own_id.clone();
        let id = store.subscribe(move |_| {
            counter.set(counter.get() + 1);
            if let (Some(store), Some(id)) = (handle.upgrade(), id_slot.get()) {
                store.unsubscribe(id);
            }
        });
        own_id.set(Some(id));

        store.mark_location_completed("coral-reef");
        store.mark_location_completed("kelp-forest");
        assert_eq!(calls.get(), 1);
        assert!(!store.unsubscribe(id));
    }

    #[test]
    fn test_unknown_id_does_not_notify() {
        let store = shared();
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        store.subscribe(move |_| counter.set(counter.get() + 1));

        let locations = store.mark_location_completed("abyss");
        assert_eq!(locations, Catalog::ocean().defaults());
        assert_eq!(calls.get(), 0);
    }
}
