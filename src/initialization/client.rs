//! HTTP client initialization.
//!
//! This module builds the two `reqwest` clients a session uses: one that
//! follows a single redirect for page fetches, and one with redirects disabled
//! so a `303 See Other` can be inspected as the success signal of a write.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::ClientBuilder;

use crate::config::{ClientOptions, MAX_REDIRECT_HOPS};
use crate::error_handling::InitializationError;

/// Converts the configured headers into a `HeaderMap`.
///
/// # Errors
///
/// Returns `InitializationError::InvalidHeader` naming the first header whose
/// name or value is not valid HTTP.
pub fn default_headers(options: &ClientOptions) -> Result<HeaderMap, InitializationError> {
    let mut headers = HeaderMap::new();
    for (name, value) in &options.headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| InitializationError::InvalidHeader(format!("{name}: {e}")))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|e| InitializationError::InvalidHeader(format!("{name}: {e}")))?;
        headers.insert(header_name, header_value);
    }
    Ok(headers)
}

/// Initializes the HTTP client used for page fetches.
///
/// Creates a `reqwest::Client` configured with:
/// - Default headers from options (User-Agent included)
/// - Timeout from options
/// - Redirect following limited to `MAX_REDIRECT_HOPS`
///
/// # Errors
///
/// Returns an `InitializationError` if a header is invalid or client creation fails.
pub fn init_client(options: &ClientOptions) -> Result<Arc<reqwest::Client>, InitializationError> {
    let client = ClientBuilder::new()
        .default_headers(default_headers(options)?)
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECT_HOPS))
        .timeout(options.timeout)
        .build()?;
    Ok(Arc::new(client))
}

/// Initializes the HTTP client used for login and writes.
///
/// Same as [`init_client`] but with redirects disabled, so the caller sees the
/// `303` the forum answers with instead of the page it points to.
///
/// # Errors
///
/// Returns an `InitializationError` if a header is invalid or client creation fails.
pub fn init_redirect_client(
    options: &ClientOptions,
) -> Result<Arc<reqwest::Client>, InitializationError> {
    let client = ClientBuilder::new()
        .default_headers(default_headers(options)?)
        .redirect(reqwest::redirect::Policy::none())
        .timeout(options.timeout)
        .build()?;
    Ok(Arc::new(client))
}
