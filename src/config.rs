//! API endpoint configuration.
//!
//! SYSTEM CONTEXT
//! ==============
//! The base URL is fixed at build time. An explicit override wins, debug
//! builds talk to the local backend, and release builds fall back to
//! same-origin relative requests behind the reverse proxy.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// Local backend address used by debug builds.
pub const DEV_BASE_URL: &str = "http://localhost:8000";

/// Per-call ceiling after which the transport gives up.
pub const DEFAULT_TIMEOUT_MS: u32 = 10_000;

/// Headers attached to every outgoing request.
pub const DEFAULT_HEADERS: &[(&str, &str)] = &[("Content-Type", "application/json")];

/// Resolved client configuration for the API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_ms: u32,
}

impl ApiConfig {
    /// Build the configuration baked in at compile time.
    ///
    /// `GRAND_THINGS_API_URL` overrides the base URL when set during the build.
    pub fn from_build_env() -> Self {
        let base_url = resolve_base_url(option_env!("GRAND_THINGS_API_URL"), cfg!(debug_assertions));
        log::info!("api base url: {base_url:?}");
        Self { base_url, timeout_ms: DEFAULT_TIMEOUT_MS }
    }

    /// Configuration pointing at an explicit base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), timeout_ms: DEFAULT_TIMEOUT_MS }
    }

    /// Join the base URL with an absolute API path.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::from_build_env()
    }
}

/// Pick the base URL: explicit override, then dev address, then same-origin.
///
/// An empty or whitespace-only override counts as unset.
pub fn resolve_base_url(override_url: Option<&str>, dev: bool) -> String {
    if let Some(url) = override_url.map(str::trim).filter(|u| !u.is_empty()) {
        return url.to_owned();
    }
    if dev {
        return DEV_BASE_URL.to_owned();
    }
    String::new()
}
