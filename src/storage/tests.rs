//! Unit tests for storage handlers

use super::*;
use crate::error::RfaError;

fn create_file_handler(dir: &tempfile::TempDir) -> FileStorageHandler {
    FileStorageHandler::with_path(dir.path().join("session.json")).unwrap()
}

#[test]
fn test_memory_round_trip() {
    let store = MemoryStorageHandler::new();

    assert!(!store.has_value("access_token").unwrap());
    store.set_value("access_token", "T1").unwrap();
    assert!(store.has_value("access_token").unwrap());
    assert_eq!(store.get_value("access_token").unwrap(), "T1");

    // Overwrite keeps the latest value
    store.set_value("access_token", "T2").unwrap();
    assert_eq!(store.get_value("access_token").unwrap(), "T2");

    store.delete_value("access_token").unwrap();
    assert!(!store.has_value("access_token").unwrap());
}

#[test]
fn test_memory_get_missing_key() {
    let store = MemoryStorageHandler::new();

    match store.get_value("expires").unwrap_err() {
        RfaError::MissingValue { key } => assert_eq!(key, "expires"),
        _ => panic!("Expected MissingValue error variant"),
    }
}

#[test]
fn test_memory_delete_absent_key_is_noop() {
    let store = MemoryStorageHandler::new();
    store.delete_value("access_token").unwrap();
}

#[test]
fn test_memory_clones_share_values() {
    let store = MemoryStorageHandler::new();
    let handle = store.clone();

    store.set_value("device_id", "dev-1").unwrap();
    assert_eq!(handle.get_value("device_id").unwrap(), "dev-1");
}

#[test]
fn test_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = create_file_handler(&dir);

    store.set_value("device_id", "dev-1").unwrap();
    assert!(store.has_value("device_id").unwrap());
    assert_eq!(store.get_value("device_id").unwrap(), "dev-1");

    store.delete_value("device_id").unwrap();
    assert!(!store.has_value("device_id").unwrap());
}

#[test]
fn test_file_values_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    {
        let store = FileStorageHandler::with_path(&path).unwrap();
        store.set_value("access_token", "T1").unwrap();
        store.set_value("expires", "1893456000").unwrap();
    }

    let reopened = FileStorageHandler::with_path(&path).unwrap();
    assert_eq!(reopened.get_value("access_token").unwrap(), "T1");
    assert_eq!(reopened.get_value("expires").unwrap(), "1893456000");
}

#[test]
fn test_file_delete_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    {
        let store = FileStorageHandler::with_path(&path).unwrap();
        store.set_value("access_token", "T1").unwrap();
        store.delete_value("access_token").unwrap();
    }

    let reopened = FileStorageHandler::with_path(&path).unwrap();
    assert!(!reopened.has_value("access_token").unwrap());
}

#[test]
fn test_file_creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("deeper").join("session.json");

    let store = FileStorageHandler::with_path(&path).unwrap();
    store.set_value("device_id", "dev-1").unwrap();

    assert!(path.exists());
}

#[test]
fn test_file_rejects_corrupt_contents() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "not json").unwrap();

    match FileStorageHandler::with_path(&path).unwrap_err() {
        RfaError::Json(_) => (),
        _ => panic!("Expected Json error variant"),
    }
}

#[test]
fn test_handlers_have_debug_formatting() {
    let dir = tempfile::tempdir().unwrap();
    let file_store = create_file_handler(&dir);
    assert!(format!("{:?}", file_store).contains("FileStorageHandler"));

    let memory_store = MemoryStorageHandler::new();
    assert!(format!("{:?}", memory_store).contains("MemoryStorageHandler"));
}

#[test]
fn test_new_device_ids_are_distinct() {
    let store = MemoryStorageHandler::new();

    let first = store.new_device_id();
    let second = store.new_device_id();

    assert!(!first.is_empty());
    assert_ne!(first, second);
}
