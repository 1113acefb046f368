//! Storage behaviour tests
//!
//! Exercise the public API against temporary roots: round-trip, overwrite,
//! absent reads, idempotent deletes, clearing and directory isolation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use stowage::{Directory, DirectoryRoots, Error, MemorySink, Storage};
use tempfile::{tempdir, TempDir};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Settings {
    theme: String,
    count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Session {
    user: String,
    tags: Vec<String>,
    expires_at: Option<u64>,
    flags: HashMap<String, bool>,
    ratio: f64,
}

fn store_in(dir: &Path) -> (Storage, Arc<MemorySink>) {
    let docs = dir.join("Documents");
    let cache = dir.join("Caches");
    std::fs::create_dir_all(&docs).unwrap();
    std::fs::create_dir_all(&cache).unwrap();

    let sink = Arc::new(MemorySink::new());
    let storage = Storage::new(DirectoryRoots::fixed(docs, cache)).with_shared_sink(sink.clone());
    (storage, sink)
}

fn fresh() -> (TempDir, Storage, Arc<MemorySink>) {
    let dir = tempdir().unwrap();
    let (storage, sink) = store_in(dir.path());
    (dir, storage, sink)
}

// ============================================================================
// Round-trip and overwrite
// ============================================================================

#[test]
fn test_round_trip_nested_record() {
    let (_dir, storage, _sink) = fresh();

    let mut flags = HashMap::new();
    flags.insert("beta".to_string(), true);
    flags.insert("ads".to_string(), false);
    let session = Session {
        user: "ana".into(),
        tags: vec!["admin".into(), "ops".into()],
        expires_at: Some(1_700_000_000),
        flags,
        ratio: 0.25,
    };

    for dir in Directory::ALL {
        storage.save(&session, dir, "session").unwrap();
        let read: Session = storage.read("session", dir).unwrap().unwrap();
        assert_eq!(read, session);
    }
}

#[test]
fn test_round_trip_primitives() {
    let (_dir, storage, _sink) = fresh();

    storage.save(&42u8, Directory::Cache, "n").unwrap();
    assert_eq!(storage.read::<u8>("n", Directory::Cache).unwrap(), Some(42));

    storage.save("plain text", Directory::Cache, "s").unwrap();
    assert_eq!(
        storage.read::<String>("s", Directory::Cache).unwrap(),
        Some("plain text".to_string())
    );

    storage.save(&Vec::<i32>::new(), Directory::Cache, "empty").unwrap();
    assert_eq!(
        storage.read::<Vec<i32>>("empty", Directory::Cache).unwrap(),
        Some(vec![])
    );
}

#[test]
fn test_overwrite_returns_latest() {
    let (_dir, storage, _sink) = fresh();

    let v1 = Settings {
        theme: "a much longer theme name than the second".into(),
        count: 1,
    };
    let v2 = Settings {
        theme: "light".into(),
        count: 2,
    };

    storage.save(&v1, Directory::Documents, "settings.json").unwrap();
    storage.save(&v2, Directory::Documents, "settings.json").unwrap();

    let read: Settings = storage
        .read("settings.json", Directory::Documents)
        .unwrap()
        .unwrap();
    assert_eq!(read, v2);
}

#[test]
fn test_new_store_sees_earlier_writes() {
    let dir = tempdir().unwrap();

    {
        let (storage, _sink) = store_in(dir.path());
        storage.save(&vec![1, 2, 3], Directory::Documents, "list").unwrap();
    }

    let (storage, _sink) = store_in(dir.path());
    let read: Vec<i32> = storage.read("list", Directory::Documents).unwrap().unwrap();
    assert_eq!(read, vec![1, 2, 3]);
}

// ============================================================================
// Absent vs corrupt
// ============================================================================

#[test]
fn test_absent_read_is_not_an_error() {
    let (_dir, storage, sink) = fresh();

    for dir in Directory::ALL {
        assert_eq!(storage.read::<Settings>("nothing-here", dir).unwrap(), None);
    }
    assert!(sink.is_empty());
}

#[test]
fn test_corrupt_read_is_distinguishable() {
    let (_dir, storage, sink) = fresh();

    storage.save(&"not an object", Directory::Documents, "settings.json").unwrap();

    let err = storage
        .read::<Settings>("settings.json", Directory::Documents)
        .unwrap_err();
    assert!(err.is_decode());
    assert!(matches!(err, Error::Decode { .. }));

    let messages = sink.messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("Error reading from"));
}

// ============================================================================
// Delete and clear
// ============================================================================

#[test]
fn test_delete_twice() {
    let (_dir, storage, _sink) = fresh();

    storage.save(&1, Directory::Cache, "token").unwrap();

    storage.delete("token", Directory::Cache).unwrap();
    assert!(!storage.file_exists("token", Directory::Cache).unwrap());

    storage.delete("token", Directory::Cache).unwrap();
    assert!(!storage.file_exists("token", Directory::Cache).unwrap());
}

#[test]
fn test_clear_is_exhaustive() {
    let (_dir, storage, _sink) = fresh();

    for name in ["a", "b", "c"] {
        storage.save(&name, Directory::Documents, name).unwrap();
    }

    let removed = storage.clear(Directory::Documents).unwrap();
    assert_eq!(removed.len(), 3);

    for name in ["a", "b", "c"] {
        assert!(!storage.file_exists(name, Directory::Documents).unwrap());
    }
}

#[test]
fn test_directory_isolation() {
    let (_dir, storage, _sink) = fresh();

    storage.save(&7, Directory::Documents, "n").unwrap();

    assert_eq!(storage.read::<i32>("n", Directory::Cache).unwrap(), None);
    assert!(!storage.file_exists("n", Directory::Cache).unwrap());

    storage.delete("n", Directory::Cache).unwrap();
    assert_eq!(storage.read::<i32>("n", Directory::Documents).unwrap(), Some(7));
}

// ============================================================================
// Scenario
// ============================================================================

#[test]
fn test_settings_scenario() {
    let (_dir, storage, sink) = fresh();

    let settings: Settings = serde_json::from_value(serde_json::json!({
        "theme": "dark",
        "count": 3
    }))
    .unwrap();
    storage.save(&settings, Directory::Documents, "settings.json").unwrap();

    let read: Settings = storage
        .read("settings.json", Directory::Documents)
        .unwrap()
        .unwrap();
    assert_eq!(read.theme, "dark");
    assert_eq!(read.count, 3);

    storage.clear(Directory::Documents).unwrap();
    assert!(!storage.file_exists("settings.json", Directory::Documents).unwrap());
    assert!(sink.is_empty());
}

#[test]
fn test_storage_is_shareable_across_threads() {
    let (_dir, storage, _sink) = fresh();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let storage = storage.clone();
            std::thread::spawn(move || {
                let name = format!("record-{}", i);
                storage.save(&i, Directory::Cache, &name).unwrap();
                storage.read::<i32>(&name, Directory::Cache).unwrap()
            })
        })
        .collect();

    for (i, h) in handles.into_iter().enumerate() {
        assert_eq!(h.join().unwrap(), Some(i as i32));
    }
}
