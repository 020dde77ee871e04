//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Storage (LocalStorage on web, JSON files on native)
//! - JavaScript bindings for the pages (web only)

pub mod storage;

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(target_arch = "wasm32")]
pub use storage::BrowserStore;
#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStore;
