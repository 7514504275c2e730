//! Error type definitions.
//!
//! This module defines all error types used throughout the client.

use std::path::PathBuf;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

use crate::config::{NOT_AUTHENTICATED_CODE, NOT_AUTHENTICATED_ERRNO};
use crate::transport::TransportResponse;

/// Error types for initialization failures.
///
/// These are raised synchronously while building a session or the logger,
/// before any request is sent.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// No forum base URL was supplied.
    #[error("Forum URL is required")]
    MissingBaseUrl,

    /// The forum base URL could not be parsed.
    #[error("Invalid forum URL '{url}': {source}")]
    InvalidBaseUrl {
        /// The rejected URL
        url: String,
        /// Parser failure
        #[source]
        source: url::ParseError,
    },

    /// A configured header name or value is not valid HTTP.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Network-level failures reported by a [`Transport`](crate::transport::Transport).
#[derive(Error, Debug)]
pub enum TransportError {
    /// The underlying HTTP client failed (connect, timeout, body read).
    #[error("HTTP request error: {0}")]
    Request(#[from] ReqwestError),

    /// Failure reported by a custom transport.
    #[error("Transport error: {0}")]
    Other(String),
}

impl TransportError {
    /// Returns true if the failure was a request timeout.
    pub fn is_timeout(&self) -> bool {
        match self {
            TransportError::Request(e) => e.is_timeout(),
            TransportError::Other(_) => false,
        }
    }
}

/// Diagnostic context attached to a rejected login check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotAuthenticatedDetails {
    /// Fixed error code (`NOTAUTHENTICATED`)
    pub code: &'static str,
    /// Fixed numeric error code (`-3010`)
    pub errno: i32,
    /// Host of the forum that answered
    pub host: Option<String>,
    /// Final URL of the response that carried the session marker
    pub url: String,
    /// HTTP status of that response
    pub status: u16,
    /// The page that reported the visitor as a guest
    pub response: TransportResponse,
}

impl NotAuthenticatedDetails {
    /// Builds the details for the page that failed the login check.
    pub fn new(response: TransportResponse) -> Self {
        let host = url::Url::parse(&response.url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string));
        Self {
            code: NOT_AUTHENTICATED_CODE,
            errno: NOT_AUTHENTICATED_ERRNO,
            host,
            url: response.url.clone(),
            status: response.status,
            response,
        }
    }
}

/// Error types for session operations.
///
/// Callers branch on the variant: a [`SessionError::Transport`] means the forum
/// was not reached, while the other variants mean it answered and rejected the
/// request.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Network or timeout failure, propagated unchanged.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The login POST did not answer with a 303 redirect.
    #[error("Login failed: expected HTTP 303, got {status}")]
    AuthenticationFailure {
        /// Status returned by the login endpoint
        status: u16,
    },

    /// The forum was reachable but does not recognise the session.
    #[error("Not logged in ({} {}, HTTP {} from {})", .0.code, .0.errno, .0.status, .0.url)]
    NotAuthenticated(Box<NotAuthenticatedDetails>),

    /// A request completed with a status outside its success policy.
    #[error("Unexpected HTTP {status} from '{path}'")]
    UnexpectedStatus {
        /// Relative path that was requested
        path: String,
        /// Status that was returned
        status: u16,
    },

    /// The cookie set could not be serialized.
    #[error("Cookie serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A path could not be resolved against the base URL, or resolved to a
    /// URL outside the forum's origin.
    #[error("Invalid request path '{path}': {reason}")]
    InvalidUrl {
        /// The rejected path
        path: String,
        /// What was wrong with it
        reason: String,
    },
}

impl SessionError {
    /// Returns true for network-level failures.
    pub fn is_transport(&self) -> bool {
        matches!(self, SessionError::Transport(_))
    }

    /// Returns true when the login check rejected the session.
    pub fn is_not_authenticated(&self) -> bool {
        matches!(self, SessionError::NotAuthenticated(_))
    }

    /// HTTP status that triggered the error, if the forum answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            SessionError::AuthenticationFailure { status } => Some(*status),
            SessionError::NotAuthenticated(details) => Some(details.status),
            SessionError::UnexpectedStatus { status, .. } => Some(*status),
            SessionError::Transport(_)
            | SessionError::Serialization(_)
            | SessionError::InvalidUrl { .. } => None,
        }
    }
}

/// Error types for browser cookie store lookups.
#[derive(Error, Debug)]
pub enum CookieStoreError {
    /// No Firefox profile could be located.
    #[error("Firefox profile not found under {0}")]
    ProfileNotFound(PathBuf),

    /// Reading the profile directory failed.
    #[error("Cookie store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// SQL execution error.
    #[error("Cookie store SQL error: {0}")]
    Database(#[from] sqlx::Error),
}
