//! Storage engine integration tests
//!
//! Exercises the engine against a real temporary directory: containment,
//! round trips, idempotent deletes, and listing order.

use std::fs;
use std::path::{Path, PathBuf};

use files_manager::error::StorageError;
use files_manager::storage::StorageEngine;

/// A storage root nested inside a tempdir, so escapes would land in an
/// inspectable parent directory.
fn test_engine() -> (tempfile::TempDir, StorageEngine) {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("root");
    fs::create_dir(&root).unwrap();
    (dir, StorageEngine::new(root))
}

#[tokio::test]
async fn test_store_then_read_round_trip() {
    let (_dir, engine) = test_engine();
    let content = b"quarterly numbers";

    engine.store_file("report.txt", content).await.unwrap();

    assert_eq!(engine.read_file("report.txt").await.unwrap(), content);
}

#[tokio::test]
async fn test_store_creates_parent_chain() {
    let (_dir, engine) = test_engine();
    let content = b"%PDF-1.4 fake invoice";

    engine
        .store_file("2025/Janvier/Factures/invoice.pdf", content)
        .await
        .unwrap();

    let stored = engine.root().join("2025/Janvier/Factures/invoice.pdf");
    assert_eq!(fs::read(stored).unwrap(), content);

    let listing = engine.list_files().await.unwrap();
    for expected in [
        "2025",
        "2025/Janvier",
        "2025/Janvier/Factures",
        "2025/Janvier/Factures/invoice.pdf",
    ] {
        assert!(
            listing.contains(&PathBuf::from(expected)),
            "listing missing {}: {:?}",
            expected,
            listing
        );
    }
}

#[tokio::test]
async fn test_store_overwrites_existing_file() {
    let (_dir, engine) = test_engine();

    engine.store_file("notes.txt", b"first").await.unwrap();
    engine.store_file("notes.txt", b"second").await.unwrap();

    assert_eq!(engine.read_file("notes.txt").await.unwrap(), b"second");
}

#[tokio::test]
async fn test_read_missing_file_is_not_found() {
    let (_dir, engine) = test_engine();

    let result = engine.read_file("missing.txt").await;
    assert!(matches!(result, Err(StorageError::NotFound(_))));
}

#[tokio::test]
async fn test_escaping_operations_are_rejected_without_mutation() {
    let (dir, engine) = test_engine();

    let result = engine.store_file("../outside.txt", b"leak").await;
    assert!(matches!(result, Err(StorageError::PathEscape(_))));
    assert!(!dir.path().join("outside.txt").exists());

    let result = engine.read_file("../../etc/passwd").await;
    assert!(matches!(result, Err(StorageError::PathEscape(_))));

    let result = engine.delete_file("../outside.txt").await;
    assert!(matches!(result, Err(StorageError::PathEscape(_))));

    let result = engine.create_directory("../evil").await;
    assert!(matches!(result, Err(StorageError::PathEscape(_))));
    assert!(!dir.path().join("evil").exists());

    let result = engine.delete_directory("..").await;
    assert!(matches!(result, Err(StorageError::PathEscape(_))));
    assert!(dir.path().exists());
}

#[tokio::test]
async fn test_empty_filename_is_rejected() {
    let (_dir, engine) = test_engine();

    let result = engine.store_file("", b"anonymous").await;
    assert!(matches!(result, Err(StorageError::InvalidPath(_))));
}

#[tokio::test]
async fn test_delete_file_is_idempotent() {
    let (_dir, engine) = test_engine();

    engine.store_file("gone.txt", b"bye").await.unwrap();
    engine.delete_file("gone.txt").await.unwrap();
    engine.delete_file("gone.txt").await.unwrap();

    assert!(!engine.root().join("gone.txt").exists());
}

#[tokio::test]
async fn test_create_directory_is_idempotent() {
    let (_dir, engine) = test_engine();

    engine.create_directory("a/b/c").await.unwrap();
    engine.create_directory("a/b/c").await.unwrap();

    let listing = engine.list_files().await.unwrap();
    for expected in ["a", "a/b", "a/b/c"] {
        assert!(listing.contains(&PathBuf::from(expected)));
    }
}

#[tokio::test]
async fn test_delete_directory_removes_subtree() {
    let (_dir, engine) = test_engine();

    engine
        .store_file("a/b/report.txt", b"data")
        .await
        .unwrap();
    engine.delete_directory("a").await.unwrap();

    let listing = engine.list_files().await.unwrap();
    assert!(
        !listing.iter().any(|p| p.starts_with(Path::new("a"))),
        "entries under a/ survived: {:?}",
        listing
    );

    let result = engine.read_file("a/b/report.txt").await;
    assert!(matches!(result, Err(StorageError::NotFound(_))));
}

#[tokio::test]
async fn test_delete_directory_is_idempotent() {
    let (_dir, engine) = test_engine();

    engine.delete_directory("never-existed").await.unwrap();

    engine.create_directory("twice").await.unwrap();
    engine.delete_directory("twice").await.unwrap();
    engine.delete_directory("twice").await.unwrap();
}

#[tokio::test]
async fn test_delete_root_clears_but_keeps_root() {
    let (_dir, engine) = test_engine();

    engine.store_file("a/file.txt", b"x").await.unwrap();
    engine.delete_directory("").await.unwrap();

    assert!(engine.root().is_dir());
    assert!(engine.list_files().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_is_lexical_depth_first() {
    let (_dir, engine) = test_engine();

    engine.store_file("b.txt", b"").await.unwrap();
    engine.store_file("a/z.txt", b"").await.unwrap();
    engine.store_file("a.txt", b"").await.unwrap();

    let listing = engine.list_files().await.unwrap();
    let expected: Vec<PathBuf> = ["a", "a/z.txt", "a.txt", "b.txt"]
        .iter()
        .map(PathBuf::from)
        .collect();
    assert_eq!(listing, expected);
}

#[tokio::test]
async fn test_list_excludes_root_itself() {
    let (_dir, engine) = test_engine();

    let listing = engine.list_files().await.unwrap();
    assert!(listing.is_empty());
}

#[tokio::test]
async fn test_dot_segments_inside_root_are_collapsed() {
    let (_dir, engine) = test_engine();

    engine
        .store_file("a/./b/../c.txt", b"normalized")
        .await
        .unwrap();

    assert_eq!(
        engine.read_file("a/c.txt").await.unwrap(),
        b"normalized"
    );
    assert!(!engine.root().join("a/b").exists());
}
