//! Forum write actions.
//!
//! Every action the client can perform is a form POST to a fixed route that
//! answers `303` on success. The differences between actions are pure data:
//! a route template, the fields it takes, and the message reported once it
//! succeeds. That data lives in [`catalog::ROUTES`]; [`Action`] fills it in
//! to produce an [`ActionRequest`], which
//! [`Session::perform`](crate::Session::perform) submits.

mod action;
pub mod catalog;

use crate::config::ROUTER_PREFIX;
use crate::session::FormDraft;

// Re-export public API
pub use action::Action;
pub use catalog::{ActionRoute, ROUTES};

/// A fully rendered action, built per call and never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRequest {
    /// Catalog name of the action (kebab-case)
    pub name: &'static str,
    /// Route below the forum's `index.php?` router
    pub path: String,
    /// Fields specific to this action
    pub fields: FormDraft,
    /// Message reported after a successful submission
    pub log_message: String,
}

impl ActionRequest {
    /// The relative URI the form is posted to.
    pub fn uri(&self) -> String {
        format!("{ROUTER_PREFIX}{}", self.path)
    }
}
