//! Client-held session and the pending post-login redirect.
//!
//! SYSTEM CONTEXT
//! ==============
//! Shared by the interceptor chain (reads the token, clears on 401) and the
//! navigation guard (checks validity, records the blocked destination).
//! Both hold a clone of the same `SessionStore`, so the backing storage is
//! the single source of truth.
//!
//! INVARIANTS
//! ==========
//! - A session is valid only when both the token and the user info are
//!   present and non-empty.
//! - At most one pending redirect exists; recording a new one overwrites it.
//! - `clear` is idempotent.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use serde::{Deserialize, Serialize};

use super::storage::{KeyValueStore, LocalStorage};

pub const TOKEN_KEY: &str = "access_token";
pub const USER_INFO_KEY: &str = "user_info";
pub const REDIRECT_KEY: &str = "redirect_after_login";

/// Where a fresh login lands when no redirect was recorded.
pub const DEFAULT_LANDING: &str = "/";

/// Proof of login: bearer token plus an opaque user profile.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub user_info: serde_json::Value,
}

/// Session store backed by `localStorage` in the browser.
pub type BrowserSessionStore = SessionStore<LocalStorage>;

/// Typed access to the session keys of a `KeyValueStore`.
#[derive(Clone, Debug, Default)]
pub struct SessionStore<S> {
    storage: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Bearer token, if one is stored and non-empty.
    pub fn token(&self) -> Option<String> {
        self.storage.get_item(TOKEN_KEY).filter(|t| !t.is_empty())
    }

    /// Decoded user info. Unparseable records read as absent.
    pub fn user_info(&self) -> Option<serde_json::Value> {
        let raw = self.storage.get_item(USER_INFO_KEY).filter(|u| !u.is_empty())?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                log::warn!("stored user info is not valid JSON: {err}");
                None
            }
        }
    }

    /// Both token and user info are present and non-empty.
    pub fn is_authenticated(&self) -> bool {
        let has_user = self
            .storage
            .get_item(USER_INFO_KEY)
            .is_some_and(|u| !u.is_empty());
        self.token().is_some() && has_user
    }

    /// Persist a freshly issued session.
    pub fn establish(&self, session: &Session) {
        self.storage.set_item(TOKEN_KEY, &session.access_token);
        match serde_json::to_string(&session.user_info) {
            Ok(raw) => self.storage.set_item(USER_INFO_KEY, &raw),
            Err(err) => log::warn!("failed to serialize user info: {err}"),
        }
    }

    /// Drop token and user info. Safe to call on an empty session.
    pub fn clear(&self) {
        self.storage.remove_item(TOKEN_KEY);
        self.storage.remove_item(USER_INFO_KEY);
    }

    /// Record the destination to resume after login, replacing any earlier one.
    pub fn set_pending_redirect(&self, full_path: &str) {
        self.storage.set_item(REDIRECT_KEY, full_path);
    }

    pub fn pending_redirect(&self) -> Option<String> {
        self.storage.get_item(REDIRECT_KEY).filter(|p| !p.is_empty())
    }

    /// Read the pending redirect once and clear it.
    pub fn take_pending_redirect(&self) -> Option<String> {
        let target = self.pending_redirect();
        self.storage.remove_item(REDIRECT_KEY);
        target
    }

    /// Store the session and return where the user should go next.
    ///
    /// Consumes the pending redirect; falls back to `DEFAULT_LANDING` when
    /// none was recorded or when it points back at the login page.
    pub fn complete_login(&self, session: &Session) -> String {
        self.establish(session);
        self.take_pending_redirect()
            .filter(|path| !is_login_path(path))
            .unwrap_or_else(|| DEFAULT_LANDING.to_owned())
    }

    /// End the session explicitly.
    pub fn logout(&self) {
        log::info!("logging out");
        self.clear();
    }
}

fn is_login_path(path: &str) -> bool {
    let bare = path.split(['?', '#']).next().unwrap_or_default();
    bare == crate::routing::routes::LOGIN_PATH
}
