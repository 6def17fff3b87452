//! Error types surfaced by the HTTP layer.

use thiserror::Error;

/// Message used when nothing more specific is known.
pub const FALLBACK_MESSAGE: &str = "network error";

/// The one error shape callers see: a non-empty human-readable message.
///
/// Transport failures, error statuses and undecodable payloads all collapse
/// into this type.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    message: String,
}

impl ApiError {
    /// Wrap `message`, substituting `FALLBACK_MESSAGE` when it is blank.
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            return Self { message: FALLBACK_MESSAGE.to_owned() };
        }
        Self { message }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// No response was received.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("timeout of {0}ms exceeded")]
    Timeout(u32),
    #[error("{0}")]
    Network(String),
}
