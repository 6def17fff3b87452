//! Auth gate evaluated before every page transition.
//!
//! SYSTEM CONTEXT
//! ==============
//! Only decides allow vs. divert and records the blocked destination. The
//! login page later consumes that destination through
//! `SessionStore::complete_login`.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use crate::state::session::SessionStore;
use crate::state::storage::KeyValueStore;

use super::location::Location;
use super::routes::{APP_NAME, LOGIN_PATH, RouteMeta};

/// Outcome of the auth check for one target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    /// Divert to `/login`; `pending` is the recorded original destination.
    RedirectToLogin { pending: String },
}

/// Document title for an allowed route: `"<title> - Grand Things"`.
pub fn document_title(meta: &RouteMeta) -> Option<String> {
    meta.title.map(|title| format!("{title} - {APP_NAME}"))
}

#[derive(Clone, Debug)]
pub struct NavigationGuard<S> {
    session: SessionStore<S>,
}

impl<S: KeyValueStore> NavigationGuard<S> {
    pub fn new(session: SessionStore<S>) -> Self {
        Self { session }
    }

    /// Check `target` against its route metadata.
    ///
    /// Public routes always pass. Protected routes need a valid session;
    /// otherwise the full target path is stored as the pending redirect
    /// (replacing any earlier one) in the same step that diverts to login.
    pub fn check(&self, target: &Location, meta: &RouteMeta) -> GuardDecision {
        if !meta.requires_auth || self.session.is_authenticated() {
            return GuardDecision::Allow;
        }
        let pending = target.full_path();
        self.session.set_pending_redirect(&pending);
        log::info!("{pending} requires auth, diverting to {LOGIN_PATH}");
        GuardDecision::RedirectToLogin { pending }
    }
}
