//! Error handling
//!
//! Defines error types and HTTP response mapping for the files manager.

pub mod handlers;
pub mod types;

pub use types::*;
