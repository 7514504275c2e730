//! Configuration types.
//!
//! This module defines the options used to build a forum session and the
//! logging enums shared with the command-line interface.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use clap::ValueEnum;

use crate::config::constants::{DEFAULT_TIMEOUT_MS, DEFAULT_USER_AGENT};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Callback invoked with a human-readable message after each successful write.
pub type VerboseFn = Arc<dyn Fn(&str) + Send + Sync>;

/// Options for building a [`Session`](crate::Session).
///
/// Only the base URL is required. Everything else has a default matching the
/// forum's usual expectations: a 5 second timeout and a desktop Chrome
/// User-Agent.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use xenforo_client::ClientOptions;
///
/// let options = ClientOptions::new("https://forum.example.com/")
///     .timeout(Duration::from_secs(10))
///     .verbose(|message| println!("{message}"));
/// assert_eq!(options.timeout, Duration::from_secs(10));
/// ```
#[derive(Clone)]
pub struct ClientOptions {
    /// Forum base URL; every request path is resolved against it.
    pub base_url: String,

    /// Per-request timeout
    pub timeout: Duration,

    /// Headers sent with every request (name, value)
    pub headers: Vec<(String, String)>,

    /// Success-only side channel for write confirmations
    pub verbose: Option<VerboseFn>,
}

impl ClientOptions {
    /// Creates options for the given forum base URL with default settings.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            headers: vec![("User-Agent".to_string(), DEFAULT_USER_AGENT.to_string())],
            verbose: None,
        }
    }

    /// Sets the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Adds a header, replacing any existing header with the same name
    /// (case-insensitive).
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.headers
            .retain(|(existing, _)| !existing.eq_ignore_ascii_case(&name));
        self.headers.push((name, value.into()));
        self
    }

    /// Installs the verbosity callback.
    pub fn verbose<F>(mut self, callback: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.verbose = Some(Arc::new(callback));
        self
    }
}

impl fmt::Debug for ClientOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientOptions")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("headers", &self.headers)
            .field("verbose", &self.verbose.is_some())
            .finish()
    }
}
