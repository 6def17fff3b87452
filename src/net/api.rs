//! Typed operations against the events API.
//!
//! Every method goes through `InterceptorChain`, so all of them attach the
//! bearer token, normalize failures into `ApiError`, and announce 401s.
//!
//! ERROR HANDLING
//! ==============
//! Callers get a single message string; status codes are not exposed.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use url::form_urlencoded;

use crate::config::ApiConfig;
use crate::state::session::{Session, SessionStore};
use crate::state::storage::{KeyValueStore, LocalStorage};

use super::envelope::Method;
use super::error::ApiError;
use super::interceptor::{AuthEventSender, InterceptorChain};
use super::transport::{FetchTransport, Transport};
use super::types::{
    CategoryStat, Credentials, DeleteAck, Event, EventCreate, EventUpdate, Health, LoginGrant, MonthlyStat,
    SearchQuery, TimelinePage, TimelineQuery, WechatArticle,
};

const EVENTS_PATH: &str = "/api/events/";
const TIMELINE_PATH: &str = "/api/events/timeline";
const SEARCH_PATH: &str = "/api/events/search";
const CATEGORY_STATS_PATH: &str = "/api/events/stats/categories";
const TIMELINE_STATS_PATH: &str = "/api/events/stats/timeline";
const EXTRACT_WECHAT_PATH: &str = "/api/events/extract-wechat";
const AUTH_LOGIN_PATH: &str = "/api/auth/login";
const HEALTH_PATH: &str = "/health";

/// API client used in the browser.
pub type BrowserApi = ApiClient<FetchTransport, LocalStorage>;

fn event_path(event_id: i64) -> String {
    format!("/api/events/{event_id}")
}

fn timeline_path(query: &TimelineQuery) -> String {
    let mut params = form_urlencoded::Serializer::new(String::new());
    params.append_pair("page", &query.page.to_string());
    params.append_pair("size", &query.size.to_string());
    if let Some(category) = non_empty(query.category.as_deref()) {
        params.append_pair("category", category);
    }
    format!("{TIMELINE_PATH}?{}", params.finish())
}

fn search_path(query: &SearchQuery) -> String {
    let mut params = form_urlencoded::Serializer::new(String::new());
    if let Some(text) = non_empty(query.query.as_deref()) {
        params.append_pair("query", text);
    }
    let tags: Vec<&str> = query
        .tags
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .collect();
    if !tags.is_empty() {
        params.append_pair("tags", &tags.join(","));
    }
    if let Some(category) = non_empty(query.category.as_deref()) {
        params.append_pair("category", category);
    }
    if let Some(start) = non_empty(query.start_date.as_deref()) {
        params.append_pair("start_date", start);
    }
    if let Some(end) = non_empty(query.end_date.as_deref()) {
        params.append_pair("end_date", end);
    }
    let encoded = params.finish();
    if encoded.is_empty() {
        SEARCH_PATH.to_owned()
    } else {
        format!("{SEARCH_PATH}?{encoded}")
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Events API client.
#[derive(Clone, Debug)]
pub struct ApiClient<T, S> {
    chain: InterceptorChain<T, S>,
}

impl<S: KeyValueStore> ApiClient<FetchTransport, S> {
    /// Client over browser `fetch` using the configured timeout.
    pub fn browser(config: ApiConfig, session: SessionStore<S>, events: AuthEventSender) -> Self {
        let transport = FetchTransport::new(config.timeout_ms);
        Self::new(InterceptorChain::new(config, transport, session, events))
    }
}

impl<T: Transport, S: KeyValueStore> ApiClient<T, S> {
    pub fn new(chain: InterceptorChain<T, S>) -> Self {
        Self { chain }
    }

    pub fn session(&self) -> &SessionStore<S> {
        self.chain.session()
    }

    /// `POST /api/events/`
    ///
    /// # Errors
    ///
    /// Returns the normalized error message on any failure.
    pub async fn create_event(&self, event: &EventCreate) -> Result<Event, ApiError> {
        self.chain.call_with(Method::Post, EVENTS_PATH, event).await
    }

    /// `GET /api/events/timeline`
    ///
    /// # Errors
    ///
    /// Returns the normalized error message on any failure.
    pub async fn get_timeline(&self, query: &TimelineQuery) -> Result<TimelinePage, ApiError> {
        self.chain.call(Method::Get, &timeline_path(query)).await
    }

    /// `GET /api/events/search`
    ///
    /// # Errors
    ///
    /// Returns the normalized error message on any failure.
    pub async fn search_events(&self, query: &SearchQuery) -> Result<Vec<Event>, ApiError> {
        self.chain.call(Method::Get, &search_path(query)).await
    }

    /// `GET /api/events/{id}`
    ///
    /// # Errors
    ///
    /// Returns the normalized error message on any failure.
    pub async fn get_event(&self, event_id: i64) -> Result<Event, ApiError> {
        self.chain.call(Method::Get, &event_path(event_id)).await
    }

    /// `PUT /api/events/{id}`
    ///
    /// # Errors
    ///
    /// Returns the normalized error message on any failure.
    pub async fn update_event(&self, event_id: i64, update: &EventUpdate) -> Result<Event, ApiError> {
        self.chain.call_with(Method::Put, &event_path(event_id), update).await
    }

    /// `DELETE /api/events/{id}`
    ///
    /// # Errors
    ///
    /// Returns the normalized error message on any failure.
    pub async fn delete_event(&self, event_id: i64) -> Result<DeleteAck, ApiError> {
        self.chain.call(Method::Delete, &event_path(event_id)).await
    }

    /// `GET /api/events/stats/categories`
    ///
    /// # Errors
    ///
    /// Returns the normalized error message on any failure.
    pub async fn get_categories_stats(&self) -> Result<Vec<CategoryStat>, ApiError> {
        self.chain.call(Method::Get, CATEGORY_STATS_PATH).await
    }

    /// `GET /api/events/stats/timeline`
    ///
    /// # Errors
    ///
    /// Returns the normalized error message on any failure.
    pub async fn get_timeline_stats(&self) -> Result<Vec<MonthlyStat>, ApiError> {
        self.chain.call(Method::Get, TIMELINE_STATS_PATH).await
    }

    /// `POST /api/events/extract-wechat` with `{url}`.
    ///
    /// # Errors
    ///
    /// Returns the normalized error message on any failure.
    pub async fn extract_wechat_content(&self, url: &str) -> Result<WechatArticle, ApiError> {
        let body = serde_json::json!({ "url": url });
        self.chain.call_with(Method::Post, EXTRACT_WECHAT_PATH, &body).await
    }

    /// `GET /health`
    ///
    /// # Errors
    ///
    /// Returns the normalized error message on any failure.
    pub async fn health(&self) -> Result<Health, ApiError> {
        self.chain.call(Method::Get, HEALTH_PATH).await
    }

    /// Exchange credentials for a session via `POST /api/auth/login`.
    ///
    /// The session is returned, not stored; the login flow persists it with
    /// `SessionStore::complete_login`. When the grant carries no user record,
    /// the username stands in for it.
    ///
    /// # Errors
    ///
    /// Returns the normalized error message on any failure.
    pub async fn login(&self, credentials: &Credentials) -> Result<Session, ApiError> {
        let grant: LoginGrant = self.chain.call_with(Method::Post, AUTH_LOGIN_PATH, credentials).await?;
        if grant.access_token.is_empty() {
            return Err(ApiError::new("login response carried no access token"));
        }
        let user_info = if grant.user.is_null() {
            serde_json::json!({ "username": credentials.username })
        } else {
            grant.user
        };
        Ok(Session { access_token: grant.access_token, user_info })
    }
}
