//! Client configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, forum routes, field names)
//! - Client option types used to build a session
//! - Logging option types shared with the CLI

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{ClientOptions, LogFormat, LogLevel, VerboseFn};
