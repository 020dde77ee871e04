//! Durable key-value backends
//!
//! - `BrowserStore`: `window.localStorage` (wasm32)
//! - `FileStore`: one JSON file per key in a data directory (native)

use crate::persistence::{KeyValueStore, StorageError};

#[cfg(target_arch = "wasm32")]
pub use web_storage::BrowserStore;

#[cfg(not(target_arch = "wasm32"))]
pub use file_storage::FileStore;

#[cfg(target_arch = "wasm32")]
mod web_storage {
    use super::*;

    /// LocalStorage of the current window
    #[derive(Debug, Clone)]
    pub struct BrowserStore {
        storage: web_sys::Storage,
    }

    impl BrowserStore {
        /// Fails when there is no window or the browser blocks storage access
        pub fn open() -> Result<Self, StorageError> {
            let storage = web_sys::window()
                .and_then(|w| w.local_storage().ok())
                .flatten()
                .ok_or(StorageError::Unavailable)?;
            Ok(Self { storage })
        }
    }

    fn js_error(e: wasm_bindgen::JsValue) -> StorageError {
        StorageError::Backend(format!("{:?}", e))
    }

    impl KeyValueStore for BrowserStore {
        fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.storage.get_item(key).map_err(js_error)
        }

        fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            self.storage.set_item(key, value).map_err(js_error)
        }

        fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
            self.storage.remove_item(key).map_err(js_error)
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod file_storage {
    use std::fs::{self, File};
    use std::io::{ErrorKind, Write};
    use std::path::{Path, PathBuf};

    use super::*;
    use crate::consts::SNAPSHOT_EXTENSION;

    /// Directory of `<key>.json` files
    ///
    /// Writes go to a temp file first and are renamed over the old value, so a
    /// crash mid-write leaves either the old or the new save.
    #[derive(Debug, Clone)]
    pub struct FileStore {
        dir: PathBuf,
    }

    impl FileStore {
        /// The directory is created on first write
        pub fn new(dir: impl Into<PathBuf>) -> Self {
            Self { dir: dir.into() }
        }

        /// File backing `key`; characters unsafe in file names become `_`
        pub fn path_for(&self, key: &str) -> PathBuf {
            let name: String = key
                .chars()
                .map(|c| {
                    if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                        c
                    } else {
                        '_'
                    }
                })
                .collect();
            self.dir.join(format!("{}.{}", name, SNAPSHOT_EXTENSION))
        }
    }

    fn write_synced(path: &Path, value: &str) -> std::io::Result<()> {
        let mut file = File::create(path)?;
        file.write_all(value.as_bytes())?;
        file.sync_all()
    }

    impl KeyValueStore for FileStore {
        fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
            match fs::read_to_string(self.path_for(key)) {
                Ok(contents) => Ok(Some(contents)),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
                Err(e) => Err(e.into()),
            }
        }

        fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            fs::create_dir_all(&self.dir)?;
            let path = self.path_for(key);
            let tmp = path.with_extension(format!("{}.tmp", SNAPSHOT_EXTENSION));
            let written = write_synced(&tmp, value).and_then(|()| fs::rename(&tmp, &path));
            if let Err(e) = written {
                // Never leave a half-written temp file behind
                let _ = fs::remove_file(&tmp);
                return Err(e.into());
            }
            Ok(())
        }

        fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
            match fs::remove_file(self.path_for(key)) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
                Err(e) => Err(e.into()),
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_missing_file_reads_as_none() {
            let dir = tempfile::tempdir().unwrap();
            let store = FileStore::new(dir.path());
            assert_eq!(store.get_item("progress").unwrap(), None);
        }

        #[test]
        fn test_set_get_remove() {
            let dir = tempfile::tempdir().unwrap();
            let mut store = FileStore::new(dir.path().join("nested"));

            store.set_item("progress", "{}").unwrap();
            assert_eq!(store.get_item("progress").unwrap().as_deref(), Some("{}"));

            store.set_item("progress", r#"{"a":{}}"#).unwrap();
            assert_eq!(
                store.get_item("progress").unwrap().as_deref(),
                Some(r#"{"a":{}}"#)
            );
            assert!(!store.path_for("progress").with_extension("json.tmp").exists());

            store.remove_item("progress").unwrap();
            assert_eq!(store.get_item("progress").unwrap(), None);
            store.remove_item("progress").unwrap();
        }

        #[test]
        fn test_path_for_sanitizes_key() {
            let store = FileStore::new("/data");
            assert_eq!(
                store.path_for("ocean-explorer-progression"),
                PathBuf::from("/data/ocean-explorer-progression.json")
            );
            assert_eq!(store.path_for("../up"), PathBuf::from("/data/___up.json"));
        }

        #[test]
        fn test_unreadable_path_is_io_error() {
            let dir = tempfile::tempdir().unwrap();
            let store = FileStore::new(dir.path());
            // A directory where the file should be
            fs::create_dir(store.path_for("progress")).unwrap();
            assert!(matches!(store.get_item("progress"), Err(StorageError::Io(_))));
        }

        #[test]
        fn test_failed_write_removes_temp_file() {
            let dir = tempfile::tempdir().unwrap();
            let mut store = FileStore::new(dir.path());
            let target = store.path_for("progress");
            fs::create_dir(&target).unwrap();
            fs::write(target.join("keep"), "x").unwrap();

            let result = store.set_item("progress", "{}");
            assert!(matches!(result, Err(StorageError::Io(_))));
            assert!(!target.with_extension("json.tmp").exists());
            assert!(target.join("keep").exists());
        }
    }
}
