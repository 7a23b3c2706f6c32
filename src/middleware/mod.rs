//! Middleware
//!
//! Request-level middleware for the HTTP layer.

pub mod logging;
