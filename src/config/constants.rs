//! Configuration constants.
//!
//! This module defines the defaults and the fixed XenForo routes, selectors and
//! form field names the session relies on.

// Network defaults
/// Default per-request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Maximum redirect hops followed by requests that allow redirects.
///
/// Writes and the login POST never follow redirects; the 303 itself is the signal.
pub const MAX_REDIRECT_HOPS: usize = 1;

/// Default User-Agent string for HTTP requests.
///
/// Mimics a desktop Chrome on Windows. Override it through
/// [`ClientOptions::header`](crate::config::ClientOptions::header) or the
/// `--user-agent` CLI flag.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

// Forum routes
/// Site root, used for the pre-login GET and both phases of the login check.
pub const ROOT_PATH: &str = "/";
/// Login form target.
pub const LOGIN_PATH: &str = "index.php?login/login/";
/// Prefix of every action route (XenForo's query-string router).
pub const ROUTER_PREFIX: &str = "index.php?";

// Form fields
/// Anti-forgery token field name, both in the HTML form and in submissions.
pub const TOKEN_FIELD: &str = "_xfToken";
/// Value of the `remember` field on login.
pub const REMEMBER_ME: &str = "1";

// Verbosity
/// Prefix of every message passed to the verbosity callback.
pub const VERBOSE_PREFIX: &str = "[!] ";

// Scraping
/// CSS selector for the anti-forgery token input.
pub const TOKEN_SELECTOR: &str = "input[name=\"_xfToken\"]";
/// CSS selector for the session marker element.
pub const SESSION_MARKER_SELECTOR: &str = "#XF";
/// Attribute on the session marker carrying the login state.
pub const LOGGED_IN_ATTRIBUTE: &str = "data-logged-in";

// Not-authenticated diagnostics
/// Error code attached to rejected login checks.
pub const NOT_AUTHENTICATED_CODE: &str = "NOTAUTHENTICATED";
/// Numeric error code attached to rejected login checks.
pub const NOT_AUTHENTICATED_ERRNO: i32 = -3010;

// HTTP status codes
/// `303 See Other`, XenForo's confirmation of a successful write.
pub const HTTP_STATUS_SEE_OTHER: u16 = 303;
/// Highest status the login-check refresh POST may answer with.
pub const HTTP_STATUS_BAD_REQUEST: u16 = 400;
