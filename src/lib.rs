//! xenforo_client library: a cookie-backed client for XenForo forums
//!
//! This library logs in to a XenForo forum, keeps the session cookies and the
//! anti-forgery token in step with what the forum expects, and submits the
//! forum's write actions (replies, reactions, private messages, ...) as plain
//! form posts.
//!
//! # Example
//!
//! ```no_run
//! use xenforo_client::{Action, ClientOptions, Session};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let options = ClientOptions::new("https://forum.example.com/")
//!     .verbose(|message| println!("{message}"));
//! let mut session = Session::new(options)?;
//!
//! let cookies = session.login("alice", "secret").await?;
//! std::fs::write("cookies.json", cookies.to_json()?)?;
//!
//! session.check_login(None).await?;
//! session.perform(&Action::react("1", "1001")).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

pub mod actions;
pub mod config;
pub mod cookies;
mod error_handling;
pub mod initialization;
pub mod parse;
pub mod session;
pub mod transport;

// Re-export public API
pub use actions::{Action, ActionRequest, ActionRoute};
pub use config::{ClientOptions, LogFormat, LogLevel};
pub use cookies::CookieSet;
pub use error_handling::{
    CookieStoreError, InitializationError, NotAuthenticatedDetails, SessionError, TransportError,
};
pub use session::{Authenticated, FormDraft, Session};
pub use transport::{
    Method, ReqwestTransport, SuccessPolicy, Transport, TransportRequest, TransportResponse,
};
