//! Per-transition state machine: match, guard, load, resolve.
//!
//! ARCHITECTURE
//! ============
//! A `Navigation` starts in `Evaluating` and ends in exactly one
//! `Resolution`. View loading is an explicit async step (`ViewLoader`) with
//! its own failure branch; failures go to `on_navigation_error` and resolve
//! to `Failed`, which the shell renders as an error page instead of leaving
//! the transition hanging.
//!
//! Superseded transitions are the host router's concern: it drops the
//! in-flight future when a newer navigation starts.

#[cfg(test)]
#[path = "navigator_test.rs"]
mod navigator_test;

use std::future::Future;

use thiserror::Error;

use crate::state::session::SessionStore;
use crate::state::storage::KeyValueStore;

use super::guard::{GuardDecision, NavigationGuard, document_title};
use super::location::Location;
use super::routes::{RouteMatch, ViewId, match_route};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("failed to load view {view:?}: {message}")]
    ViewLoad { view: ViewId, message: String },
}

/// Prepares a view before it is shown.
pub trait ViewLoader {
    fn load(&self, view: ViewId) -> impl Future<Output = Result<(), NavigationError>>;
}

/// Every view is compiled into the bundle, so loading always succeeds.
#[derive(Clone, Copy, Debug, Default)]
pub struct BundledViews;

impl ViewLoader for BundledViews {
    fn load(&self, _view: ViewId) -> impl Future<Output = Result<(), NavigationError>> {
        std::future::ready(Ok(()))
    }
}

/// A route that passed the guard and loaded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AllowedView {
    pub route: RouteMatch,
    pub location: Location,
    /// Document title to apply, when the route declares one.
    pub title: Option<String>,
}

/// Terminal outcome of one navigation attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    Allowed(AllowedView),
    RedirectedToLogin { pending: String },
    NotFound { path: String },
    Failed { target: String, message: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavigationState {
    Evaluating,
    Resolved(Resolution),
}

/// One navigation attempt from `from` to `to`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Navigation {
    pub from: String,
    pub to: Location,
    state: NavigationState,
}

impl Navigation {
    pub fn begin(from: &str, to: Location) -> Self {
        log::debug!("navigate: {from} -> {to}");
        Self { from: from.to_owned(), to, state: NavigationState::Evaluating }
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    /// The resolution, once reached.
    pub fn outcome(&self) -> Option<&Resolution> {
        match &self.state {
            NavigationState::Resolved(resolution) => Some(resolution),
            NavigationState::Evaluating => None,
        }
    }

    /// Move to the terminal state. A resolved navigation never changes again.
    pub fn resolve(&mut self, resolution: Resolution) -> Resolution {
        if let NavigationState::Resolved(existing) = &self.state {
            log::warn!("navigation to {} already resolved", self.to);
            return existing.clone();
        }
        self.state = NavigationState::Resolved(resolution.clone());
        resolution
    }
}

/// Top-level handler for errors raised while resolving a navigation.
///
/// Logs and returns; never propagates to application code.
pub fn on_navigation_error(error: &NavigationError, to: &Location, from: &str) {
    log::error!("navigation error: {error}; target={to}; from={from}");
}

/// Runs navigations through the guard and the view loader.
#[derive(Clone, Debug)]
pub struct Navigator<S, L> {
    guard: NavigationGuard<S>,
    loader: L,
}

impl<S: KeyValueStore, L: ViewLoader> Navigator<S, L> {
    pub fn new(session: SessionStore<S>, loader: L) -> Self {
        Self { guard: NavigationGuard::new(session), loader }
    }

    /// Resolve a transition from `from` to `to`.
    pub async fn navigate(&self, from: &str, to: Location) -> Resolution {
        let mut nav = Navigation::begin(from, to);

        let Some(route) = match_route(&nav.to.path) else {
            let path = nav.to.path.clone();
            return nav.resolve(Resolution::NotFound { path });
        };

        let meta = route.descriptor.meta;
        if let GuardDecision::RedirectToLogin { pending } = self.guard.check(&nav.to, &meta) {
            return nav.resolve(Resolution::RedirectedToLogin { pending });
        }

        match self.loader.load(route.descriptor.view).await {
            Ok(()) => {
                let allowed = AllowedView { route, location: nav.to.clone(), title: document_title(&meta) };
                nav.resolve(Resolution::Allowed(allowed))
            }
            Err(err) => {
                on_navigation_error(&err, &nav.to, &nav.from);
                let target = nav.to.full_path();
                nav.resolve(Resolution::Failed { target, message: err.to_string() })
            }
        }
    }
}
