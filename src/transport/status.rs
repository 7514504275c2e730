//! Named success predicates for HTTP status codes.
//!
//! XenForo signals outcomes through status codes rather than bodies: a write
//! that took effect answers `303 See Other`, and the root POST used to refresh
//! the CSRF cookie answers `400` while still issuing a valid cookie. Each
//! operation picks one of these policies instead of comparing numbers inline.

use crate::config::{HTTP_STATUS_BAD_REQUEST, HTTP_STATUS_SEE_OTHER};

/// Any 2xx status.
pub fn is_standard_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Exactly `303 See Other`, the forum's "write succeeded" answer.
pub fn is_redirect_success(status: u16) -> bool {
    status == HTTP_STATUS_SEE_OTHER
}

/// Anything up to and including `400 Bad Request`.
///
/// The root POST answers 400 but still sets a fresh `xf_csrf` cookie, so 400
/// must count as success there.
pub fn is_lenient_success(status: u16) -> bool {
    status <= HTTP_STATUS_BAD_REQUEST
}

/// Which statuses an operation accepts as success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuccessPolicy {
    /// 2xx only (page fetches)
    Standard,
    /// 303 only (login and writes)
    SeeOther,
    /// ≤ 400 (CSRF refresh)
    Lenient,
    /// Every status; the body decides (session check)
    Any,
}

impl SuccessPolicy {
    /// Returns true if `status` satisfies this policy.
    pub fn accepts(self, status: u16) -> bool {
        match self {
            SuccessPolicy::Standard => is_standard_success(status),
            SuccessPolicy::SeeOther => is_redirect_success(status),
            SuccessPolicy::Lenient => is_lenient_success(status),
            SuccessPolicy::Any => true,
        }
    }
}
