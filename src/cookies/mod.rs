//! Session cookies.
//!
//! This module provides:
//! - [`CookieSet`]: the ordered, name-keyed set of raw cookie strings a session carries
//! - [`merge`]: the overlay used to fold freshly issued cookies into a stored set
//! - [`firefox`]: lookup of a stored cookie in a local Firefox profile, for
//!   bootstrapping a session without an interactive login
//!
//! This is intentionally not an RFC 6265 cookie jar. Cookies never expire,
//! and domain, path, `Secure` and `HttpOnly` attributes are carried along
//! verbatim but never interpreted.

pub mod firefox;
mod jar;

// Re-export public API
pub use jar::{cookie_name, merge, CookieSet};
