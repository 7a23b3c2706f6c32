//! Storage root location
//!
//! Picks a usable storage root at startup from an ordered candidate list:
//! the configured path, a per-user application directory, then the system
//! temp directory. Runs once before the server starts serving; if even the
//! temp fallback cannot be created there is no usable storage and startup
//! must fail.

use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::BootstrapError;

#[cfg(windows)]
const APP_DIR_NAME: &str = "FilesManager";
#[cfg(not(windows))]
const APP_DIR_NAME: &str = ".files-manager";

const TEMP_DIR_NAME: &str = "files-manager";

/// Locate, create, and canonicalize the storage root.
pub fn locate_storage_root(configured: Option<&str>) -> Result<PathBuf, BootstrapError> {
    if let Some(configured) = configured.map(str::trim).filter(|s| !s.is_empty()) {
        let candidate = PathBuf::from(configured);
        if is_location_usable(&candidate) {
            let root = create_root(candidate)?;
            info!("Using configured storage root: {}", root.display());
            return Ok(root);
        }
        warn!("Configured storage root {} is not usable", configured);
    }

    if let Some(candidate) = user_app_dir() {
        if is_location_usable(&candidate) {
            let root = create_root(candidate)?;
            info!("Using user storage root: {}", root.display());
            return Ok(root);
        }
        warn!(
            "User storage directory {} is not usable",
            candidate.display()
        );
    }

    let fallback = std::env::temp_dir().join(TEMP_DIR_NAME);
    warn!(
        "Falling back to temporary storage root: {}",
        fallback.display()
    );
    create_root(fallback)
}

/// Per-platform user-scoped application data directory:
/// `%USERPROFILE%\AppData\Local\FilesManager` on Windows,
/// `~/.files-manager` elsewhere.
fn user_app_dir() -> Option<PathBuf> {
    #[cfg(windows)]
    {
        dirs::data_local_dir().map(|dir| dir.join(APP_DIR_NAME))
    }
    #[cfg(not(windows))]
    {
        dirs::home_dir().map(|home| home.join(APP_DIR_NAME))
    }
}

fn create_root(candidate: PathBuf) -> Result<PathBuf, BootstrapError> {
    fs::create_dir_all(&candidate)
        .map_err(|e| BootstrapError::RootCreation(candidate.clone(), e))?;
    candidate
        .canonicalize()
        .map_err(|e| BootstrapError::RootCreation(candidate, e))
}

/// A candidate is usable when it either already exists as a readable,
/// writable, traversable directory, or does not exist yet but its parent
/// does and accepts writes.
fn is_location_usable(path: &Path) -> bool {
    if !path.exists() {
        return path
            .parent()
            .is_some_and(|parent| parent.is_dir() && is_writable_dir(parent));
    }

    path.is_dir() && fs::read_dir(path).is_ok() && is_writable_dir(path)
}

/// Permission bits alone don't answer "can this process write here", so
/// probe with a throwaway file.
fn is_writable_dir(dir: &Path) -> bool {
    let probe = dir.join(".files-manager-probe");
    match fs::write(&probe, b"") {
        Ok(()) => {
            let _ = fs::remove_file(&probe);
            true
        }
        Err(_) => false,
    }
}
