//! Error types
//!
//! Defines domain-specific error types for each module of the files manager.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Storage module errors
#[derive(Debug)]
pub enum StorageError {
    /// Resolved path would fall outside the storage root
    PathEscape(String),
    /// Empty or otherwise unusable relative path
    InvalidPath(String),
    /// Target file does not exist for an operation that requires it
    NotFound(String),
    /// Underlying filesystem operation failed
    Io(io::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::PathEscape(p) => write!(f, "Path escapes storage root: {}", p),
            StorageError::InvalidPath(p) => write!(f, "Invalid path: {}", p),
            StorageError::NotFound(p) => write!(f, "File not found: {}", p),
            StorageError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for StorageError {
    fn from(error: io::Error) -> Self {
        StorageError::Io(error)
    }
}

/// Startup errors: no usable storage root could be established
#[derive(Debug)]
pub enum BootstrapError {
    RootCreation(PathBuf, io::Error),
}

impl fmt::Display for BootstrapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BootstrapError::RootCreation(path, e) => {
                write!(
                    f,
                    "Failed to initialize storage root {}: {}",
                    path.display(),
                    e
                )
            }
        }
    }
}

impl std::error::Error for BootstrapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BootstrapError::RootCreation(_, e) => Some(e),
        }
    }
}

/// API layer errors returned by HTTP handlers
#[derive(Debug)]
pub enum ApiError {
    Storage(StorageError),
    BadRequest(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Storage(e) => write!(f, "Storage error: {}", e),
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<StorageError> for ApiError {
    fn from(error: StorageError) -> Self {
        ApiError::Storage(error)
    }
}
