//! Camstream Common Utilities
//!
//! Shared infrastructure for all camstream crates:
//! - Error types, result aliases, and process exit codes
//! - Tracing/logging initialization
//! - Configuration loading

pub mod config;
pub mod error;
pub mod logging;

pub use config::*;
pub use error::*;
