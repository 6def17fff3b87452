//! Request/response interceptor chain wrapping every API call.
//!
//! ARCHITECTURE
//! ============
//! `prepare_request` runs before transmission and attaches the bearer token.
//! `normalize_response` runs after and is pure: it turns the raw outcome into
//! either the payload text or a `Failure`. The chain only *announces* a 401
//! by sending `AuthEvent::Invalidated`; `SessionInvalidator` owns the actual
//! teardown and redirect, so the effect fires regardless of what the caller
//! does with the returned error.
//!
//! ERROR HANDLING
//! ==============
//! Message priority is server `detail`, then the transport/status message,
//! then `FALLBACK_MESSAGE`. Nothing is retried.

#[cfg(test)]
#[path = "interceptor_test.rs"]
mod interceptor_test;

use std::cell::Cell;
use std::rc::Rc;

use futures::channel::mpsc;
use futures::{FutureExt, StreamExt};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::ApiConfig;
use crate::routing::routes::LOGIN_PATH;
use crate::state::session::SessionStore;
use crate::state::storage::KeyValueStore;

use super::envelope::{Method, RequestEnvelope, ResponseEnvelope};
use super::error::{ApiError, TransportError};
use super::transport::Transport;

/// Session-level signals emitted by the chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthEvent {
    /// The server rejected the credentials (HTTP 401).
    Invalidated,
}

pub type AuthEventSender = mpsc::UnboundedSender<AuthEvent>;
pub type AuthEventStream = mpsc::UnboundedReceiver<AuthEvent>;

/// Create the auth event channel shared by the chain and its handler.
pub fn auth_channel() -> (AuthEventSender, AuthEventStream) {
    mpsc::unbounded()
}

/// A failed call after normalization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Failure {
    /// HTTP status when a response was received.
    pub status: Option<u16>,
    pub error: ApiError,
}

impl Failure {
    pub fn is_unauthorized(&self) -> bool {
        self.status == Some(401)
    }
}

/// Request phase: attach `Authorization: Bearer <token>` when a token exists.
///
/// A missing token is legal; the server decides whether the call needs one.
pub fn prepare_request<S: KeyValueStore>(mut request: RequestEnvelope, session: &SessionStore<S>) -> RequestEnvelope {
    if let Some(token) = session.token() {
        request.set_header("Authorization", &format!("Bearer {token}"));
    }
    log::debug!("request: {} {}", request.method, request.path);
    request
}

/// Response phase: unwrap the payload or derive the single error message.
///
/// # Errors
///
/// Returns a `Failure` for transport errors and non-2xx statuses.
pub fn normalize_response(outcome: Result<ResponseEnvelope, TransportError>) -> Result<String, Failure> {
    match outcome {
        Ok(resp) if resp.is_success() => {
            log::debug!("response: {}", resp.status);
            Ok(resp.body)
        }
        Ok(resp) => {
            let message = detail_message(&resp.body)
                .unwrap_or_else(|| status_failed_message(resp.status));
            log::warn!("response error: {} {message}", resp.status);
            Err(Failure { status: Some(resp.status), error: ApiError::new(message) })
        }
        Err(err) => {
            log::warn!("transport error: {err}");
            Err(Failure { status: None, error: ApiError::new(err.to_string()) })
        }
    }
}

/// Decode a payload body into the expected shape.
///
/// # Errors
///
/// Returns an error if `body` does not match `T`.
pub fn decode_payload<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    let raw = if body.trim().is_empty() { "null" } else { body };
    serde_json::from_str(raw).map_err(|e| ApiError::new(format!("invalid response payload: {e}")))
}

fn status_failed_message(status: u16) -> String {
    format!("request failed with status code {status}")
}

/// Server-supplied `detail`, either a plain string or FastAPI's list of
/// validation errors.
fn detail_message(body: &str) -> Option<String> {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return None;
    };
    match value.get("detail")? {
        serde_json::Value::String(detail) if !detail.trim().is_empty() => Some(detail.clone()),
        serde_json::Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(serde_json::Value::as_str))
                .filter(|msg| !msg.trim().is_empty())
                .collect();
            if messages.is_empty() {
                None
            } else {
                Some(messages.join("; "))
            }
        }
        _ => None,
    }
}

/// Interceptor chain bound to one transport and one session store.
#[derive(Clone, Debug)]
pub struct InterceptorChain<T, S> {
    config: ApiConfig,
    transport: T,
    session: SessionStore<S>,
    events: AuthEventSender,
}

impl<T: Transport, S: KeyValueStore> InterceptorChain<T, S> {
    pub fn new(config: ApiConfig, transport: T, session: SessionStore<S>, events: AuthEventSender) -> Self {
        Self { config, transport, session, events }
    }

    pub fn session(&self) -> &SessionStore<S> {
        &self.session
    }

    /// Run one call through both phases.
    ///
    /// # Errors
    ///
    /// Returns the normalized error for any failure.
    pub async fn execute(&self, request: RequestEnvelope) -> Result<String, ApiError> {
        let request = prepare_request(request, &self.session);
        let outcome = self.transport.send(request).await;
        normalize_response(outcome).map_err(|failure| {
            if failure.is_unauthorized() {
                self.announce(AuthEvent::Invalidated);
            }
            failure.error
        })
    }

    /// Build, send and decode a call without a body.
    ///
    /// # Errors
    ///
    /// Returns the normalized error for any failure.
    pub async fn call<R: DeserializeOwned>(&self, method: Method, path: &str) -> Result<R, ApiError> {
        let request = RequestEnvelope::new(method, &self.config, path);
        let body = self.execute(request).await?;
        decode_payload(&body)
    }

    /// Build, send and decode a call with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns the normalized error for any failure.
    pub async fn call_with<B, R>(&self, method: Method, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let request = RequestEnvelope::new(method, &self.config, path).with_json(body)?;
        let body = self.execute(request).await?;
        decode_payload(&body)
    }

    fn announce(&self, event: AuthEvent) {
        if let Err(err) = self.events.unbounded_send(event) {
            log::warn!("auth event dropped, no listener: {err}");
        }
    }
}

/// Page-level navigation used by the 401 handler.
pub trait Redirector {
    /// Path of the page currently shown.
    fn current_path(&self) -> String;
    /// Leave the current page for `path`.
    fn redirect(&self, path: &str);
}

/// Full-page navigation through `window.location`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserRedirector;

#[cfg_attr(not(feature = "hydrate"), allow(unused_variables))]
impl Redirector for BrowserRedirector {
    fn current_path(&self) -> String {
        #[cfg(feature = "hydrate")]
        {
            let Some(window) = web_sys::window() else {
                return String::new();
            };
            window.location().pathname().unwrap_or_default()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            String::new()
        }
    }

    fn redirect(&self, path: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(window) = web_sys::window() {
                if let Err(err) = window.location().set_href(path) {
                    log::error!("redirect to {path} failed: {err:?}");
                }
            }
        }
    }
}

/// Effect handler for `AuthEvent`s: tears down the session and forces
/// re-login.
///
/// A full-page redirect leaves `current_path` unchanged until the page
/// unloads, so the handler latches after issuing one and ignores further
/// invalidations until the login page is actually showing.
#[derive(Clone, Debug)]
pub struct SessionInvalidator<S, R> {
    session: SessionStore<S>,
    redirector: R,
    redirect_pending: Rc<Cell<bool>>,
}

impl<S: KeyValueStore, R: Redirector> SessionInvalidator<S, R> {
    pub fn new(session: SessionStore<S>, redirector: R) -> Self {
        Self { session, redirector, redirect_pending: Rc::new(Cell::new(false)) }
    }

    /// Apply one event. Idempotent for repeated invalidations.
    pub fn handle(&self, event: AuthEvent) {
        match event {
            AuthEvent::Invalidated => {
                log::info!("session invalidated by server");
                self.session.clear();
                if self.redirector.current_path() == LOGIN_PATH {
                    self.redirect_pending.set(false);
                } else if !self.redirect_pending.replace(true) {
                    self.redirector.redirect(LOGIN_PATH);
                }
            }
        }
    }

    /// Apply every event already queued without waiting for more.
    pub fn drain(&self, events: &mut AuthEventStream) -> usize {
        let mut handled = 0;
        while let Some(Some(event)) = events.next().now_or_never() {
            self.handle(event);
            handled += 1;
        }
        handled
    }

    /// Handle events until every sender is dropped.
    pub async fn run(self, mut events: AuthEventStream) {
        while let Some(event) = events.next().await {
            self.handle(event);
        }
    }
}
