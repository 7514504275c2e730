//! Error handling.
//!
//! This module provides the error types for every failure the client can
//! surface:
//! - **Initialization**: invalid configuration, detected before any network activity
//! - **Transport**: network and timeout failures, passed through unchanged
//! - **Session**: forum-level rejections (failed login, rejected session, unexpected status)
//! - **Cookie store**: browser cookie database lookups

mod types;

// Re-export public API
pub use types::{
    CookieStoreError, InitializationError, NotAuthenticatedDetails, SessionError, TransportError,
};
