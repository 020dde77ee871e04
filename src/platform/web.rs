//! JavaScript bindings
//!
//! Pages create one `Explorer` at start-up and share it. Structured values
//! cross the boundary as JSON strings.

use wasm_bindgen::prelude::*;

use crate::catalog::Catalog;
use crate::consts::STORAGE_KEY;
use crate::persistence::{KeyValueStore, MemoryStore, SaveSlot};
use crate::platform::storage::BrowserStore;
use crate::progression::{Progression, SubscriptionId, progress_of};
use crate::shared::SharedProgression;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // Already set if the module was started before
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Ocean Explorer progression ready");
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        log::error!("Could not encode value for JS: {:?}", e);
        "null".to_string()
    })
}

/// Progression store handle for the web pages.
///
/// Every method takes `&self` and subscriber callbacks run after the store is
/// released, so a callback may query or mutate the explorer it listens to.
#[wasm_bindgen]
pub struct Explorer {
    shared: SharedProgression<Box<dyn KeyValueStore>>,
}

#[wasm_bindgen]
impl Explorer {
    /// Load progress from LocalStorage; falls back to a session-only store
    #[wasm_bindgen(constructor)]
    pub fn new() -> Explorer {
        let store: Box<dyn KeyValueStore> = match BrowserStore::open() {
            Ok(store) => Box::new(store),
            Err(e) => {
                log::warn!("{}, progress will only last this session", e);
                Box::new(MemoryStore::new())
            }
        };
        let progression = Progression::load(Catalog::ocean(), SaveSlot::new(store, STORAGE_KEY));
        Self {
            shared: SharedProgression::new(progression),
        }
    }

    /// JSON array of locations in journey order
    pub fn locations(&self) -> String {
        self.shared.with(|p| to_json(p.locations()))
    }

    #[wasm_bindgen(js_name = markLocationCompleted)]
    pub fn mark_location_completed(&self, id: &str) -> String {
        to_json(&self.shared.mark_location_completed(id))
    }

    #[wasm_bindgen(js_name = isLocationUnlocked)]
    pub fn is_location_unlocked(&self, id: &str) -> bool {
        self.shared.with(|p| p.is_location_unlocked(id))
    }

    /// JSON location, or `undefined` when no location owns the entry point
    #[wasm_bindgen(js_name = getLocationByEntryPoint)]
    pub fn location_by_entry_point(&self, entry_point: &str) -> Option<String> {
        self.shared
            .with(|p| p.location_by_entry_point(entry_point).map(to_json))
    }

    #[wasm_bindgen(js_name = startEntryPoint)]
    pub fn start_entry_point(&self, id: &str) -> Option<String> {
        self.shared
            .with(|p| p.start_entry_point(id).map(str::to_string))
    }

    #[wasm_bindgen(js_name = canEnter)]
    pub fn can_enter(&self, entry_point: &str) -> bool {
        self.shared.with(|p| p.can_enter(entry_point))
    }

    pub fn progress(&self) -> String {
        self.shared.with(|p| to_json(&p.progress()))
    }

    pub fn reset(&self) {
        self.shared.reset();
    }

    /// Call `callback(locationsJson, progressJson)` after every change;
    /// returns a handle for `unsubscribe`
    pub fn subscribe(&self, callback: js_sys::Function) -> u32 {
        let id = self.shared.subscribe(move |locations| {
            let progress = to_json(&progress_of(locations));
            let result = callback.call2(
                &JsValue::NULL,
                &JsValue::from_str(&to_json(locations)),
                &JsValue::from_str(&progress),
            );
            if let Err(e) = result {
                log::warn!("Progress subscriber threw: {:?}", e);
            }
        });
        id.as_u32()
    }

    pub fn unsubscribe(&self, id: u32) -> bool {
        self.shared.unsubscribe(SubscriptionId::from_raw(id))
    }
}

impl Default for Explorer {
    fn default() -> Self {
        Self::new()
    }
}
