//! HTML token extraction.
//!
//! The session only needs two things from a forum page: the anti-forgery
//! token embedded in its forms and the login-state flag on the session
//! marker. Both are read with CSS selectors via the `scraper` crate.

mod token;

// Re-export public API
pub use token::{extract, extract_token, is_logged_in, PageTokens};
