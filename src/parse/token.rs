//! Anti-forgery token and session marker extraction.

use std::sync::LazyLock;

use log::error;
use scraper::{Html, Selector};

use crate::config::{LOGGED_IN_ATTRIBUTE, SESSION_MARKER_SELECTOR, TOKEN_SELECTOR};

static TOKEN: LazyLock<Option<Selector>> = LazyLock::new(|| compile(TOKEN_SELECTOR));

static SESSION_MARKER: LazyLock<Option<Selector>> =
    LazyLock::new(|| compile(SESSION_MARKER_SELECTOR));

/// Parses a selector constant. A selector that does not parse is logged and
/// treated as matching nothing.
fn compile(css: &str) -> Option<Selector> {
    Selector::parse(css)
        .map_err(|e| error!("Invalid CSS selector '{}': {}", css, e))
        .ok()
}

/// Tokens scraped from a forum page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageTokens {
    /// Value of the first `_xfToken` form control, if any
    pub token: Option<String>,
    /// Whether the session marker reports a logged-in visitor
    pub authenticated: bool,
}

/// Extracts the anti-forgery token and login state from an HTML document.
///
/// Never fails: `html5ever` recovers from malformed markup, and anything it
/// cannot make sense of yields `PageTokens { token: None, authenticated: false }`.
///
/// # Examples
///
/// ```
/// use xenforo_client::parse::extract;
///
/// let html = r#"<html id="XF" data-logged-in="true"><body>
///     <form><input type="hidden" name="_xfToken" value="abc123"></form>
/// </body></html>"#;
/// let tokens = extract(html);
/// assert_eq!(tokens.token.as_deref(), Some("abc123"));
/// assert!(tokens.authenticated);
/// ```
pub fn extract(html: &str) -> PageTokens {
    let document = Html::parse_document(html);
    PageTokens {
        token: extract_token(&document),
        authenticated: is_logged_in(&document),
    }
}

/// Returns the `value` of the first `_xfToken` input in the document.
pub fn extract_token(document: &Html) -> Option<String> {
    document
        .select(TOKEN.as_ref()?)
        .next()
        .and_then(|input| input.value().attr("value"))
        .map(str::to_string)
}

/// Returns true iff the session marker carries `data-logged-in="true"`.
///
/// The marker is the `#XF` element (XenForo puts it on `<html>`); pages without
/// one fall back to the document's root element.
pub fn is_logged_in(document: &Html) -> bool {
    let marker = SESSION_MARKER
        .as_ref()
        .and_then(|selector| document.select(selector).next())
        .unwrap_or_else(|| document.root_element());
    marker.value().attr(LOGGED_IN_ATTRIBUTE) == Some("true")
}
