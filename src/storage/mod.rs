//! File system storage management
//!
//! Handles path resolution, storage root location, and the file operations
//! exposed to the API layer.

pub mod engine;
pub mod locator;
pub mod resolver;

pub use engine::StorageEngine;
pub use locator::locate_storage_root;
pub use resolver::{PathKind, resolve};
