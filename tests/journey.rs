//! Full journey through the public API, persisted to disk between sessions

use ocean_explorer::consts::STORAGE_KEY;
use ocean_explorer::platform::FileStore;
use ocean_explorer::{Catalog, KeyValueStore, LocationStatus, Progression, SaveSlot};

fn session(dir: &std::path::Path) -> Progression<FileStore> {
    Progression::load(Catalog::ocean(), SaveSlot::with_default_key(FileStore::new(dir)))
}

fn statuses(progression: &Progression<FileStore>) -> Vec<LocationStatus> {
    progression.locations().iter().map(|l| l.status()).collect()
}

#[test]
fn test_journey_survives_reload() {
    let dir = tempfile::tempdir().unwrap();

    let mut first = session(dir.path());
    assert!(first.can_enter("/intro"));
    assert!(!first.can_enter("/kelp-forest-intro"));

    // Finishing the reef quiz
    let owner = first.location_by_entry_point("/coral-reef-quiz").unwrap().id.clone();
    first.mark_location_completed(&owner);
    drop(first);

    let mut second = session(dir.path());
    use LocationStatus::*;
    assert_eq!(statuses(&second), [Completed, Available, Locked, Locked]);
    assert_eq!(second.start_entry_point("kelp-forest"), Some("/kelp-forest-intro"));

    second.mark_location_completed("kelp-forest");
    second.mark_location_completed("open-ocean");
    second.mark_location_completed("deep-sea");
    assert!(second.progress().is_complete);
    drop(second);

    let third = session(dir.path());
    assert_eq!(statuses(&third), [Completed; 4]);
}

#[test]
fn test_partial_save_on_disk_is_repaired() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::new(dir.path());
    store
        .set_item(
            STORAGE_KEY,
            r#"{"coral-reef":{"unlocked":true,"completed":true},"open-ocean":{"unlocked":true,"completed":true}}"#,
        )
        .unwrap();

    let progression = session(dir.path());
    assert!(progression.is_location_unlocked("kelp-forest"));
    assert!(!progression.location("kelp-forest").unwrap().completed);
    assert!(progression.is_location_unlocked("deep-sea"));
}

#[test]
fn test_corrupt_save_on_disk_starts_over() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::new(dir.path());
    store.set_item(STORAGE_KEY, "{\"coral-reef\":{\"unlo").unwrap();

    let progression = session(dir.path());
    assert_eq!(progression.locations(), Catalog::ocean().defaults().as_slice());
}

#[test]
fn test_reset_removes_save_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut progression = session(dir.path());
    progression.mark_location_completed("coral-reef");

    let path = FileStore::new(dir.path()).path_for(STORAGE_KEY);
    assert!(path.exists());

    progression.reset();
    assert!(!path.exists());
    assert_eq!(progression.slot().read(), None);
    assert_eq!(session(dir.path()).locations(), Catalog::ocean().defaults().as_slice());
}

#[test]
fn test_retired_location_in_save_does_not_lose_progress() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::new(dir.path());
    store
        .set_item(
            STORAGE_KEY,
            r#"{"coral-reef":{"unlocked":true,"completed":true},"retired-zone":["old","format"]}"#,
        )
        .unwrap();

    let progression = session(dir.path());
    use LocationStatus::*;
    assert_eq!(statuses(&progression), [Completed, Available, Locked, Locked]);
}
