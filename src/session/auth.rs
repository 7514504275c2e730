//! Login and session checks.

use log::{debug, info, warn};

use crate::config::{LOGIN_PATH, REMEMBER_ME, ROOT_PATH, TOKEN_FIELD};
use crate::cookies::{merge, CookieSet};
use crate::error_handling::{NotAuthenticatedDetails, SessionError};
use crate::parse;
use crate::transport::{is_redirect_success, Method, SuccessPolicy, Transport, TransportResponse};

use super::{FormDraft, Session};

/// A successful login check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authenticated {
    /// Cookie set the session now holds
    pub cookies: CookieSet,
    /// The page that reported the visitor as logged in
    pub response: TransportResponse,
}

impl<T: Transport> Session<T> {
    /// Logs in with a username and password.
    ///
    /// Fetches the front page for its anti-forgery token and guest cookies,
    /// then posts the login form with redirects disabled. Only a `303` answer
    /// counts as success, in which case the cookies it sets *replace* the
    /// stored set (the forum issues a brand-new session) and are returned for
    /// the caller to persist.
    ///
    /// The draft is left alone: call [`Session::check_login`] before writing to
    /// obtain a token bound to the new session.
    ///
    /// # Errors
    ///
    /// - `SessionError::Transport` if either request fails at the network level
    /// - `SessionError::UnexpectedStatus` if the front page is not 2xx
    /// - `SessionError::AuthenticationFailure` if the login POST is not answered
    ///   with 303; the stored cookies are unchanged in that case
    pub async fn login(&mut self, username: &str, password: &str) -> Result<CookieSet, SessionError> {
        let landing = self
            .send(
                Method::Get,
                ROOT_PATH,
                None,
                None,
                true,
                SuccessPolicy::Standard,
            )
            .await?;

        let mut form = FormDraft::new()
            .with("login", username)
            .with("password", password)
            .with("remember", REMEMBER_ME);
        match parse::extract(&landing.body).token {
            Some(token) => form.set(TOKEN_FIELD, token),
            None => debug!("No anti-forgery token on the front page; logging in without one"),
        }

        let response = self
            .send(
                Method::Post,
                LOGIN_PATH,
                landing.set_cookies.header_value(),
                Some(form.to_pairs()),
                false,
                SuccessPolicy::Any,
            )
            .await?;
        if !is_redirect_success(response.status) {
            warn!(
                "Login as '{}' rejected: HTTP {}",
                username, response.status
            );
            return Err(SessionError::AuthenticationFailure {
                status: response.status,
            });
        }

        self.cookies = response.set_cookies;
        info!("Logged in as '{}' ({} cookies)", username, self.cookies.len());
        self.verbosity("successfully logged in.");
        Ok(self.cookies.clone())
    }

    /// Same as [`Session::login`], returning the cookie set as a JSON array
    /// for external persistence.
    pub async fn login_json(&mut self, username: &str, password: &str) -> Result<String, SessionError> {
        let cookies = self.login(username, password).await?;
        Ok(cookies.to_json()?)
    }

    /// Refreshes the anti-forgery cookie and token, and verifies the session.
    ///
    /// 1. Resets the draft.
    /// 2. Posts an empty body to the front page. XenForo answers `400` here
    ///    while still issuing a fresh `xf_csrf` cookie, so any status up to 400
    ///    is accepted.
    /// 3. Merges the cookies from that answer into `supplied` (or the stored
    ///    set when `None`) and stores the result.
    /// 4. Fetches the front page with the merged cookies and reads the session
    ///    marker and token from it.
    ///
    /// On success the token is stored in the draft, so subsequent actions carry
    /// it. On rejection the draft stays empty.
    ///
    /// # Errors
    ///
    /// - `SessionError::Transport` if a request fails at the network level
    /// - `SessionError::UnexpectedStatus` if the refresh POST answers above 400
    /// - `SessionError::NotAuthenticated` if the forum does not recognise the
    ///   session; the details carry the page that reported it
    pub async fn check_login(
        &mut self,
        supplied: Option<CookieSet>,
    ) -> Result<Authenticated, SessionError> {
        self.draft.clear();
        let working = supplied.unwrap_or_else(|| self.cookies.clone());

        let refresh = self
            .send(
                Method::Post,
                ROOT_PATH,
                None,
                None,
                true,
                SuccessPolicy::Lenient,
            )
            .await?;
        debug!(
            "CSRF refresh answered HTTP {} with {} cookies",
            refresh.status,
            refresh.set_cookies.len()
        );
        self.cookies = merge(&working, &refresh.set_cookies);

        let page = self
            .send(
                Method::Get,
                ROOT_PATH,
                self.cookies.header_value(),
                None,
                true,
                SuccessPolicy::Any,
            )
            .await?;
        let tokens = parse::extract(&page.body);

        if !tokens.authenticated {
            warn!(
                "Session rejected by {} (HTTP {})",
                page.url, page.status
            );
            return Err(SessionError::NotAuthenticated(Box::new(
                NotAuthenticatedDetails::new(page),
            )));
        }

        match tokens.token {
            Some(token) => self.draft.set(TOKEN_FIELD, token),
            None => warn!("Logged-in page carries no anti-forgery token; writes may be refused"),
        }
        info!("Session is logged in");
        self.verbosity("check login: true");
        Ok(Authenticated {
            cookies: self.cookies.clone(),
            response: page,
        })
    }
}
