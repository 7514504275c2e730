//! Forum session.
//!
//! A [`Session`] owns everything that persists between requests to one
//! forum: the cookie set and the draft of form fields (which carries the
//! anti-forgery token once a login check has succeeded). It exposes the
//! authentication state machine ([`Session::login`], [`Session::check_login`])
//! and the two request primitives every action builds on ([`Session::get`],
//! [`Session::post`]).
//!
//! ```text
//! Anonymous --login (303)--> Authenticated --check_login ok--> Authenticated (token refreshed)
//!                                          --check_login rejected--> NotAuthenticated
//! ```
//!
//! Nothing recovers automatically: a rejected check or a failed write is
//! returned to the caller, who decides whether to log in again.
//!
//! # Concurrency
//!
//! Operations that change session state take `&mut self`, so one session is
//! one logical conversation with the forum. Share it across tasks behind a
//! `tokio::sync::Mutex`, or give each task its own session.

mod auth;
mod draft;

use log::{debug, info, warn};
use url::Url;

use crate::actions::Action;
use crate::config::{ClientOptions, VerboseFn, TOKEN_FIELD, VERBOSE_PREFIX};
use crate::cookies::CookieSet;
use crate::error_handling::{InitializationError, SessionError};
use crate::transport::{
    parse_base_url, resolve, Method, ReqwestTransport, SuccessPolicy, Transport, TransportRequest,
    TransportResponse,
};

// Re-export public API
pub use auth::Authenticated;
pub use draft::FormDraft;

/// A cookie-backed session with one XenForo forum.
pub struct Session<T = ReqwestTransport> {
    transport: T,
    base_url: Url,
    cookies: CookieSet,
    draft: FormDraft,
    verbose: Option<VerboseFn>,
}

impl Session<ReqwestTransport> {
    /// Creates an anonymous session using the default `reqwest` transport.
    ///
    /// # Errors
    ///
    /// Fails synchronously, before any request, if the base URL is missing or
    /// invalid or a configured header is not valid HTTP.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use xenforo_client::{ClientOptions, Session};
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut session = Session::new(ClientOptions::new("https://forum.example.com/"))?;
    /// session.login("user", "secret").await?;
    /// session.check_login(None).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(options: ClientOptions) -> Result<Self, InitializationError> {
        let transport = ReqwestTransport::new(&options)?;
        Self::with_transport(options, transport)
    }
}

impl<T: Transport> Session<T> {
    /// Creates an anonymous session on top of a custom transport.
    ///
    /// Headers and timeout in `options` are the transport's business; only the
    /// base URL and the verbosity callback are used here.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::MissingBaseUrl` or
    /// `InitializationError::InvalidBaseUrl` for an unusable base URL.
    pub fn with_transport(options: ClientOptions, transport: T) -> Result<Self, InitializationError> {
        let base_url = parse_base_url(&options.base_url)?;
        Ok(Self {
            transport,
            base_url,
            cookies: CookieSet::new(),
            draft: FormDraft::new(),
            verbose: options.verbose,
        })
    }

    /// The normalized forum base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The transport the session sends requests through.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The current cookie set.
    pub fn cookies(&self) -> &CookieSet {
        &self.cookies
    }

    /// Replaces the cookie set, e.g. with one restored from disk.
    ///
    /// The cookies are not validated; follow up with
    /// [`Session::check_login`] before writing.
    pub fn set_cookies(&mut self, cookies: CookieSet) {
        self.cookies = cookies;
    }

    /// The anti-forgery token obtained by the last successful login check.
    pub fn token(&self) -> Option<&str> {
        self.draft.get(TOKEN_FIELD)
    }

    /// Fields every write currently carries.
    pub fn draft(&self) -> &FormDraft {
        &self.draft
    }

    /// Adds a field that every following write will carry, until the next
    /// login check resets the draft.
    pub fn with_draft_field(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> &mut Self {
        self.draft.set(name, value);
        self
    }

    /// Empties the draft, dropping the anti-forgery token as well.
    pub fn clear_draft(&mut self) {
        self.draft.clear();
    }

    /// Fetches a forum page with the session cookies attached.
    ///
    /// Redirects are followed; only a 2xx final status counts as success.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Transport` on network failure,
    /// `SessionError::UnexpectedStatus` for any non-2xx status and
    /// `SessionError::InvalidUrl` if `path` names a URL on another origin.
    pub async fn get(&self, path: &str) -> Result<TransportResponse, SessionError> {
        self.send(
            Method::Get,
            path,
            self.cookies.header_value(),
            None,
            true,
            SuccessPolicy::Standard,
        )
        .await
    }

    /// Submits a form with the session cookies attached.
    ///
    /// Redirects are not followed and only `303 See Other` counts as success:
    /// that is how XenForo confirms a write. On success the verbosity callback
    /// receives `log_message`, prefixed with `"[!] "` like every other
    /// verbosity message.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Transport` on network failure and
    /// `SessionError::UnexpectedStatus` for any status other than 303.
    pub async fn post(
        &self,
        path: &str,
        fields: &FormDraft,
        log_message: &str,
    ) -> Result<TransportResponse, SessionError> {
        let response = self
            .send(
                Method::Post,
                path,
                self.cookies.header_value(),
                Some(fields.to_pairs()),
                false,
                SuccessPolicy::SeeOther,
            )
            .await?;
        info!("{log_message}");
        self.verbosity(log_message);
        Ok(response)
    }

    /// Submits a catalog action.
    ///
    /// The action's fields are laid over a copy of the draft (action fields win)
    /// and posted to the action's route.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use xenforo_client::{Action, ClientOptions, Session};
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut session = Session::new(ClientOptions::new("https://forum.example.com/"))?;
    /// session.check_login(None).await?;
    /// session.perform(&Action::react("1", "1001")).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn perform(&self, action: &Action) -> Result<TransportResponse, SessionError> {
        let request = action.request();
        let fields = self.draft.overlay(&request.fields);
        debug!("Performing {} on {}", request.name, request.path);
        self.post(&request.uri(), &fields, &request.log_message)
            .await
    }

    /// Resolves `path`, sends the request and applies `policy` to the status.
    async fn send(
        &self,
        method: Method,
        path: &str,
        cookie: Option<String>,
        form: Option<Vec<(String, String)>>,
        follow_redirects: bool,
        policy: SuccessPolicy,
    ) -> Result<TransportResponse, SessionError> {
        let url = resolve(&self.base_url, path).map_err(|e| SessionError::InvalidUrl {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
        // Cookies only ever go to the forum itself.
        if url.origin() != self.base_url.origin() {
            warn!("Refusing to send session cookies to {}", url);
            return Err(SessionError::InvalidUrl {
                path: path.to_string(),
                reason: format!(
                    "outside the forum origin {}",
                    self.base_url.origin().ascii_serialization()
                ),
            });
        }
        let response = self
            .transport
            .send(TransportRequest {
                method,
                url,
                cookie,
                form,
                follow_redirects,
            })
            .await?;

        if policy.accepts(response.status) {
            Ok(response)
        } else {
            debug!(
                "{:?} {} rejected by {:?} policy: HTTP {}",
                method, path, policy, response.status
            );
            Err(SessionError::UnexpectedStatus {
                path: path.to_string(),
                status: response.status,
            })
        }
    }

    /// Reports a success to the verbosity callback, if one is installed.
    fn verbosity(&self, message: &str) {
        if let Some(callback) = &self.verbose {
            callback(&format!("{VERBOSE_PREFIX}{message}"));
        }
    }
}

#[cfg(test)]
mod tests;
