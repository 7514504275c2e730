//! `reqwest`-backed transport.

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use reqwest::header::{COOKIE, SET_COOKIE};

use crate::config::ClientOptions;
use crate::cookies::CookieSet;
use crate::error_handling::{InitializationError, TransportError};
use crate::initialization::{init_client, init_redirect_client};

use super::{Method, Transport, TransportRequest, TransportResponse};

/// Production [`Transport`] built on two `reqwest` clients sharing the same
/// headers and timeout: one following redirects, one not.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Arc<reqwest::Client>,
    redirect_client: Arc<reqwest::Client>,
}

impl ReqwestTransport {
    /// Builds the transport from client options.
    ///
    /// # Errors
    ///
    /// Returns an `InitializationError` if a configured header is invalid or
    /// the TLS backend cannot be initialized.
    pub fn new(options: &ClientOptions) -> Result<Self, InitializationError> {
        Ok(Self {
            client: init_client(options)?,
            redirect_client: init_redirect_client(options)?,
        })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let client = if request.follow_redirects {
            &self.client
        } else {
            &self.redirect_client
        };

        let mut builder = match request.method {
            Method::Get => client.get(request.url.clone()),
            Method::Post => client.post(request.url.clone()),
        };
        if let Some(cookie) = &request.cookie {
            builder = builder.header(COOKIE, cookie);
        }
        if let Some(form) = &request.form {
            builder = builder.form(form);
        }

        debug!("{:?} {}", request.method, request.url);
        let response = builder.send().await?;

        let status = response.status().as_u16();
        let url = response.url().to_string();
        let set_cookies: CookieSet = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .map(str::to_string)
            .collect();
        let body = response.text().await?;

        debug!(
            "{:?} {} -> {} ({} cookies, {} bytes)",
            request.method,
            request.url,
            status,
            set_cookies.len(),
            body.len()
        );
        Ok(TransportResponse {
            status,
            url,
            set_cookies,
            body,
        })
    }
}
