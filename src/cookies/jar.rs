//! Cookie set and merge.

use serde::{Deserialize, Serialize};

/// Returns the name of a raw cookie string: the trimmed text before the first `=`.
///
/// A string without `=` is treated as a bare name (up to the first `;`).
///
/// # Examples
///
/// ```
/// use xenforo_client::cookies::cookie_name;
///
/// assert_eq!(cookie_name("xf_session=abc; path=/; httponly"), "xf_session");
/// assert_eq!(cookie_name(" xf_user = 1"), "xf_user");
/// ```
pub fn cookie_name(raw: &str) -> &str {
    let end = raw.find(['=', ';']).unwrap_or(raw.len());
    raw[..end].trim()
}

/// The `name=value` pair of a raw cookie string, without attributes.
fn cookie_pair(raw: &str) -> &str {
    raw.split(';').next().unwrap_or_default().trim()
}

/// An ordered set of raw cookie strings, keyed by cookie name.
///
/// Entries are stored exactly as received from `Set-Cookie` (attributes
/// included) so they can be persisted and restored verbatim. Serializes as a
/// JSON array of strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CookieSet(Vec<String>);

impl CookieSet {
    /// Creates an empty cookie set.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Returns true if the set holds no cookies.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of cookies in the set.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over the raw cookie strings in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Returns the raw cookie string stored under `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.iter().find(|raw| cookie_name(raw) == name)
    }

    /// Returns true if a cookie named `name` is present.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Formats the set as a `Cookie` request header value.
    ///
    /// Attributes are stripped and the `name=value` pairs joined with `"; "`.
    /// Returns `None` for an empty set so callers can omit the header.
    pub fn header_value(&self) -> Option<String> {
        let pairs: Vec<&str> = self
            .iter()
            .map(cookie_pair)
            .filter(|pair| !pair.is_empty())
            .collect();
        if pairs.is_empty() {
            None
        } else {
            Some(pairs.join("; "))
        }
    }

    /// Serializes the set as a JSON array of raw cookie strings.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Restores a set previously produced by [`CookieSet::to_json`].
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Collapses duplicate names: the last value wins, at the first position.
    fn dedup(entries: &[String]) -> Vec<String> {
        let mut out: Vec<String> = Vec::with_capacity(entries.len());
        for raw in entries {
            let name = cookie_name(raw);
            match out.iter_mut().find(|kept| cookie_name(kept) == name) {
                Some(kept) => *kept = raw.clone(),
                None => out.push(raw.clone()),
            }
        }
        out
    }
}

impl From<Vec<String>> for CookieSet {
    fn from(cookies: Vec<String>) -> Self {
        Self(cookies)
    }
}

impl<'a> From<Vec<&'a str>> for CookieSet {
    fn from(cookies: Vec<&'a str>) -> Self {
        Self(cookies.into_iter().map(str::to_string).collect())
    }
}

impl FromIterator<String> for CookieSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for CookieSet {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Folds `incoming` cookies into `previous`.
///
/// Every `previous` entry whose name also appears in `incoming` is dropped; the
/// result is the surviving `previous` entries in their original order followed
/// by the `incoming` entries. An empty `incoming` set returns `previous`
/// unchanged.
///
/// Names are compared exactly, after trimming. Domain and path are ignored: two
/// cookies with the same name but different scopes collapse into one.
///
/// # Examples
///
/// ```
/// use xenforo_client::cookies::{merge, CookieSet};
///
/// let stored = CookieSet::from(vec!["xf_user=1", "xf_csrf=old"]);
/// let fresh = CookieSet::from(vec!["xf_csrf=new; path=/"]);
/// let merged = merge(&stored, &fresh);
/// assert_eq!(merged, CookieSet::from(vec!["xf_user=1", "xf_csrf=new; path=/"]));
/// ```
pub fn merge(previous: &CookieSet, incoming: &CookieSet) -> CookieSet {
    if incoming.is_empty() {
        return previous.clone();
    }

    let incoming = CookieSet::dedup(&incoming.0);
    let mut merged: Vec<String> = CookieSet::dedup(&previous.0)
        .into_iter()
        .filter(|raw| {
            let name = cookie_name(raw);
            !incoming.iter().any(|fresh| cookie_name(fresh) == name)
        })
        .collect();
    merged.extend(incoming);
    CookieSet(merged)
}
