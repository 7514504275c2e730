//! Firefox cookie store lookup.
//!
//! Reads the most recently used cookie for a forum host straight out of a
//! Firefox profile's `cookies.sqlite`, so a session can be bootstrapped from a
//! browser that is already logged in. The lookup is read-only and independent
//! of any [`Session`](crate::Session); feed its result to
//! [`Session::check_login`](crate::Session::check_login).

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{Connection, Row, SqliteConnection};

use crate::error_handling::CookieStoreError;

/// Name of the XenForo "remember me" cookie, which is enough to restore a session.
pub const REMEMBER_COOKIE: &str = "xf_user";

const COOKIE_DB_FILE: &str = "cookies.sqlite";

/// Returns the platform's Firefox profiles directory, if it can be derived
/// from the environment.
pub fn profiles_dir() -> Option<PathBuf> {
    if cfg!(target_os = "windows") {
        std::env::var_os("APPDATA")
            .map(|appdata| PathBuf::from(appdata).join("Mozilla/Firefox/Profiles"))
    } else if cfg!(target_os = "macos") {
        std::env::var_os("HOME").map(|home| {
            PathBuf::from(home).join("Library/Application Support/Firefox/Profiles")
        })
    } else {
        std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".mozilla/firefox"))
    }
}

/// Locates the cookie database of the first profile under `profiles`.
///
/// Profiles are visited in lexical order and the first one holding a
/// `cookies.sqlite` file wins.
///
/// # Errors
///
/// Returns `CookieStoreError::ProfileNotFound` if no profile has a cookie
/// database, or `CookieStoreError::Io` if the directory cannot be read.
pub fn find_cookie_db(profiles: &Path) -> Result<PathBuf, CookieStoreError> {
    let mut candidates: Vec<PathBuf> = fs::read_dir(profiles)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path().join(COOKIE_DB_FILE))
        .filter(|path| path.is_file())
        .collect();
    candidates.sort();
    candidates
        .into_iter()
        .next()
        .ok_or_else(|| CookieStoreError::ProfileNotFound(profiles.to_path_buf()))
}

/// Locates the cookie database of the default Firefox profile.
pub fn default_cookie_db() -> Result<PathBuf, CookieStoreError> {
    let profiles =
        profiles_dir().ok_or_else(|| CookieStoreError::ProfileNotFound(PathBuf::new()))?;
    find_cookie_db(&profiles)
}

/// Reads the most recently accessed cookie named `name` for `host`.
///
/// Returns the cookie as a raw `name=value` string ready to be placed in a
/// [`CookieSet`](crate::CookieSet), or `None` if the store has no match.
/// `host` must match the stored host exactly (e.g. `www.example.com` or
/// `.example.com`).
///
/// # Errors
///
/// Returns `CookieStoreError::Database` if the file cannot be opened or is not
/// a Firefox cookie database. Firefox holds an exclusive lock on the file while
/// running; copy it first in that case.
pub async fn latest_cookie(
    db_path: &Path,
    host: &str,
    name: &str,
) -> Result<Option<String>, CookieStoreError> {
    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .read_only(true);
    let mut conn = SqliteConnection::connect_with(&options).await?;

    let row = sqlx::query(
        "SELECT name, value FROM moz_cookies
         WHERE name = ? AND host = ?
         ORDER BY lastAccessed DESC LIMIT 1",
    )
    .bind(name)
    .bind(host)
    .fetch_optional(&mut conn)
    .await?;
    conn.close().await?;

    let cookie = row.map(|row| {
        let name: String = row.get("name");
        let value: String = row.get("value");
        format!("{name}={value}")
    });
    debug!(
        "Firefox cookie lookup for {name}@{host} in {}: {}",
        db_path.display(),
        if cookie.is_some() { "found" } else { "none" }
    );
    Ok(cookie)
}
