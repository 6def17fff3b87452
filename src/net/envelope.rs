//! Transport-neutral request and response envelopes.
//!
//! A fresh `RequestEnvelope` is built for every call; nothing carries over
//! between calls.

#[cfg(test)]
#[path = "envelope_test.rs"]
mod envelope_test;

use std::fmt;

use serde::Serialize;

use crate::config::{ApiConfig, DEFAULT_HEADERS};

use super::error::ApiError;

/// HTTP verbs used against the events API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outgoing request as seen by the interceptor chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestEnvelope {
    pub method: Method,
    /// API path including the query string, e.g. `/api/events/timeline?page=1`.
    pub path: String,
    /// Absolute (or same-origin relative) URL handed to the transport.
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl RequestEnvelope {
    /// New envelope carrying the default headers.
    pub fn new(method: Method, config: &ApiConfig, path: &str) -> Self {
        Self {
            method,
            path: path.to_owned(),
            url: config.url_for(path),
            headers: DEFAULT_HEADERS
                .iter()
                .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                .collect(),
            body: None,
        }
    }

    /// Attach a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if `body` cannot be serialized.
    pub fn with_json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        let raw = serde_json::to_string(body)
            .map_err(|e| ApiError::new(format!("invalid request body: {e}")))?;
        self.body = Some(raw);
        Ok(self)
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Set a header, replacing any existing value under the same name.
    pub fn set_header(&mut self, name: &str, value: &str) {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((name.to_owned(), value.to_owned()));
    }
}

/// Completed HTTP exchange: status plus raw body text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResponseEnvelope {
    pub status: u16,
    pub body: String,
}

impl ResponseEnvelope {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
