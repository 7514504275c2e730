//! HTTP transport.
//!
//! The session never talks to `reqwest` directly. It builds a
//! [`TransportRequest`] (absolute URL, optional `Cookie` header, optional form
//! body, redirect policy) and hands it to a [`Transport`], which returns the
//! raw status, final URL, `Set-Cookie` values and body. Deciding whether a
//! status is a success is left to the session through [`SuccessPolicy`].
//!
//! [`ReqwestTransport`] is the production implementation; tests and callers
//! with special networking needs can plug in their own.

mod client;
pub mod status;

use async_trait::async_trait;
use url::Url;

use crate::cookies::CookieSet;
use crate::error_handling::{InitializationError, TransportError};

// Re-export public API
pub use client::ReqwestTransport;
pub use status::{is_lenient_success, is_redirect_success, is_standard_success, SuccessPolicy};

/// HTTP method used by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
}

/// A single request, fully resolved by the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportRequest {
    /// HTTP method
    pub method: Method,
    /// Absolute request URL
    pub url: Url,
    /// `Cookie` header value, omitted when `None`
    pub cookie: Option<String>,
    /// URL-encoded form body; `None` sends no body
    pub form: Option<Vec<(String, String)>>,
    /// Whether redirects are followed (up to `MAX_REDIRECT_HOPS`)
    pub follow_redirects: bool,
}

/// The parts of a response the session inspects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// Final URL after any followed redirects
    pub url: String,
    /// Every `Set-Cookie` header, in order
    pub set_cookies: CookieSet,
    /// Response body as text
    pub body: String,
}

/// Something that can perform HTTP requests for a session.
///
/// Implementations must resolve with the response for *every* status code;
/// only network-level failures (connect, timeout, body read) are errors.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `request` and returns the response.
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError>;
}

/// Parses and normalizes a forum base URL.
///
/// The path always ends with `/` so relative paths resolve underneath it, and
/// any query or fragment is dropped.
///
/// # Errors
///
/// Returns `InitializationError::MissingBaseUrl` for an empty string and
/// `InitializationError::InvalidBaseUrl` for anything that is not an absolute
/// hierarchical URL.
pub fn parse_base_url(raw: &str) -> Result<Url, InitializationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(InitializationError::MissingBaseUrl);
    }
    let invalid = |source| InitializationError::InvalidBaseUrl {
        url: trimmed.to_string(),
        source,
    };
    let mut url = Url::parse(trimmed).map_err(invalid)?;
    if url.cannot_be_a_base() {
        return Err(invalid(url::ParseError::RelativeUrlWithCannotBeABaseBase));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

/// Resolves a forum-relative path against the base URL.
///
/// Leading slashes are ignored, so `"/"` and `""` both address the base URL
/// itself and forums installed under a sub-directory keep working.
pub fn resolve(base: &Url, path: &str) -> Result<Url, url::ParseError> {
    base.join(path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_base_url_appends_slash() {
        let url = parse_base_url("https://forum.example.com/community").unwrap();
        assert_eq!(url.as_str(), "https://forum.example.com/community/");
    }

    #[test]
    fn test_parse_base_url_drops_query_and_fragment() {
        let url = parse_base_url(" https://forum.example.com/?a=b#top ").unwrap();
        assert_eq!(url.as_str(), "https://forum.example.com/");
    }

    #[test]
    fn test_parse_base_url_missing() {
        assert!(matches!(
            parse_base_url("   "),
            Err(InitializationError::MissingBaseUrl)
        ));
    }

    #[test]
    fn test_parse_base_url_invalid() {
        assert!(matches!(
            parse_base_url("forum.example.com"),
            Err(InitializationError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            parse_base_url("mailto:admin@example.com"),
            Err(InitializationError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn test_resolve_root() {
        let base = parse_base_url("https://forum.example.com/community/").unwrap();
        assert_eq!(resolve(&base, "/").unwrap().as_str(), base.as_str());
        assert_eq!(resolve(&base, "").unwrap().as_str(), base.as_str());
    }

    #[test]
    fn test_resolve_router_paths() {
        let base = parse_base_url("https://forum.example.com/community").unwrap();
        assert_eq!(
            resolve(&base, "index.php?posts/1001/react").unwrap().as_str(),
            "https://forum.example.com/community/index.php?posts/1001/react"
        );
        assert_eq!(
            resolve(&base, "/index.php?login/login/").unwrap().as_str(),
            "https://forum.example.com/community/index.php?login/login/"
        );
    }
}
