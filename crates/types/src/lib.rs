//! Shared types for the Spacebears startup configuration
//!
//! This crate holds the error taxonomy shared by the configuration loader
//! and the process entry point.

pub mod error;

// Re-export commonly used types
pub use error::{ConfigError, Result};
