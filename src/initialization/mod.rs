//! Application initialization and resource setup.
//!
//! This module provides functions to initialize shared resources:
//! - HTTP clients (with timeouts, default headers and redirect policy)
//! - Logger
//!
//! All initialization functions return proper error types for error handling.

mod client;
mod logger;

// Re-export public API
pub use client::{default_headers, init_client, init_redirect_client};
pub use logger::init_logger_with;
