//! Storage operations
//!
//! Implements the file and directory operations exposed to the API layer:
//! store, read, list, delete file, create directory, delete directory. Every
//! operation resolves its path through the resolver first and fails closed on
//! a rejection, before any filesystem access.

use log::{error, info};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::error::StorageError;
use crate::storage::resolver::{PathKind, resolve};

/// Owns the storage root and all filesystem access under it.
///
/// The root is fixed for the lifetime of the engine; it must be absolute and
/// normalized (the locator hands out canonicalized roots). Deletes are
/// tolerant: a missing target is treated as success.
pub struct StorageEngine {
    root: PathBuf,
}

impl StorageEngine {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Store a file, creating missing parent directories and fully replacing
    /// any previous content at that path.
    pub async fn store_file(&self, relative: &str, content: &[u8]) -> Result<(), StorageError> {
        let file_path = self.resolve_file(relative)?;

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                error!("Failed to create parent directories for {}: {}", relative, e);
                StorageError::Io(e)
            })?;
        }

        match fs::write(&file_path, content).await {
            Ok(()) => {
                info!("Stored file {} ({} bytes)", relative, content.len());
                Ok(())
            }
            Err(e) => {
                error!("Failed to store file {}: {}", relative, e);
                Err(StorageError::Io(e))
            }
        }
    }

    /// Read the full contents of a file.
    pub async fn read_file(&self, relative: &str) -> Result<Vec<u8>, StorageError> {
        let file_path = self.resolve_file(relative)?;

        match fs::read(&file_path).await {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(StorageError::NotFound(relative.to_string()))
            }
            Err(e) => {
                error!("Failed to read file {}: {}", relative, e);
                Err(StorageError::Io(e))
            }
        }
    }

    /// Delete a file. Idempotent: a missing target is not an error.
    pub async fn delete_file(&self, relative: &str) -> Result<(), StorageError> {
        let file_path = self.resolve_file(relative)?;

        match fs::remove_file(&file_path).await {
            Ok(()) => {
                info!("Deleted file {}", relative);
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => {
                error!("Failed to delete file {}: {}", relative, e);
                Err(StorageError::Io(e))
            }
        }
    }

    /// Create a directory and any missing intermediate directories.
    /// Idempotent if the directory already exists.
    pub async fn create_directory(&self, relative: &str) -> Result<(), StorageError> {
        let dir_path = resolve(&self.root, relative, PathKind::Directory)?;

        match fs::create_dir_all(&dir_path).await {
            Ok(()) => {
                info!("Created directory {}", relative);
                Ok(())
            }
            Err(e) => {
                error!("Failed to create directory {}: {}", relative, e);
                Err(StorageError::Io(e))
            }
        }
    }

    /// Delete a directory and everything beneath it. Idempotent: a missing
    /// target is treated as success, matching the tolerant delete-file
    /// policy. Deleting the root path itself clears the tree and recreates
    /// the empty root, so the root keeps existing for the process lifetime.
    pub async fn delete_directory(&self, relative: &str) -> Result<(), StorageError> {
        let dir_path = resolve(&self.root, relative, PathKind::Directory)?;

        match fs::remove_dir_all(&dir_path).await {
            Ok(()) => {
                info!("Deleted directory {}", relative);
            }
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(e) => {
                error!("Failed to delete directory {}: {}", relative, e);
                return Err(StorageError::Io(e));
            }
        }

        if dir_path == self.root {
            fs::create_dir_all(&self.root)
                .await
                .map_err(StorageError::Io)?;
        }

        Ok(())
    }

    /// List every file and directory entry under the root, expressed relative
    /// to it. The walk is a snapshot: depth-first, lexically ordered, with
    /// entries removed mid-walk silently skipped.
    pub async fn list_files(&self) -> Result<Vec<PathBuf>, StorageError> {
        let mut entries = Vec::new();
        let mut stack = read_dir_sorted(&self.root).await?;

        while let Some((path, is_dir)) = stack.pop() {
            if let Ok(relative) = path.strip_prefix(&self.root) {
                entries.push(relative.to_path_buf());
            }

            if is_dir {
                match read_dir_sorted(&path).await {
                    Ok(mut children) => stack.append(&mut children),
                    // Directory vanished under a concurrent delete
                    Err(StorageError::Io(e)) if e.kind() == ErrorKind::NotFound => {}
                    Err(e) => return Err(e),
                }
            }
        }

        Ok(entries)
    }

    fn resolve_file(&self, relative: &str) -> Result<PathBuf, StorageError> {
        if relative.trim().is_empty() {
            return Err(StorageError::InvalidPath("Empty filename".into()));
        }
        resolve(&self.root, relative, PathKind::File)
    }
}

/// Read a directory's entries with their kind, sorted descending so that
/// popping off a stack yields lexical order.
async fn read_dir_sorted(dir: &Path) -> Result<Vec<(PathBuf, bool)>, StorageError> {
    let mut children = Vec::new();
    let mut reader = fs::read_dir(dir).await?;

    while let Some(entry) = reader.next_entry().await? {
        let is_dir = entry.file_type().await?.is_dir();
        children.push((entry.path(), is_dir));
    }

    children.sort_by(|a, b| b.0.cmp(&a.0));
    Ok(children)
}
