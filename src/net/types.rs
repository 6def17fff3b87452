//! Wire DTOs for the events API.
//!
//! DESIGN
//! ======
//! These mirror the backend response models closely enough for serde to
//! round-trip them. Fields the server may omit are `Option` or defaulted so
//! older rows (no owner, no review flag) still decode.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Separators the backend accepts between tags (ASCII and full-width).
const TAG_SEPARATORS: [char; 4] = [',', '，', ';', '；'];

/// A timeline event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub event_date: Option<String>,
    /// Tags, whether the server sends a list or a comma-separated string.
    #[serde(default, deserialize_with = "deserialize_tags")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub category: Option<String>,
    /// Importance on a 0-10 scale.
    #[serde(default)]
    pub impact_score: i32,
    #[serde(default)]
    pub feedback: Option<String>,
    #[serde(default)]
    pub is_reviewed: bool,
    #[serde(default)]
    pub user_id: Option<i64>,
}

/// Body for `POST /api/events/`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EventCreate {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_date: Option<String>,
    /// Comma-separated user tags; the server merges in extracted ones.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Body for `PUT /api/events/{id}`. Absent fields are left unchanged.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EventUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impact_score: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_reviewed: Option<bool>,
}

/// One page of `GET /api/events/timeline`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimelinePage {
    pub events: Vec<Event>,
    pub total: i64,
    pub page: u32,
    pub size: u32,
}

/// Paging and filter for the timeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimelineQuery {
    pub page: u32,
    pub size: u32,
    pub category: Option<String>,
}

impl Default for TimelineQuery {
    fn default() -> Self {
        Self { page: 1, size: 20, category: None }
    }
}

/// Filters for `GET /api/events/search`. Empty fields are not sent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub query: Option<String>,
    pub tags: Vec<String>,
    pub category: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Event count for one category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryStat {
    pub category: Option<String>,
    pub count: i64,
}

/// Event count for one calendar month.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyStat {
    pub year: i32,
    pub month: u32,
    pub count: i64,
    /// `YYYY-MM`.
    pub date: String,
}

/// Content pulled from a WeChat article.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WechatArticle {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub images: Vec<String>,
}

/// Confirmation returned by delete.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteAck {
    pub message: String,
}

/// `GET /health` response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// Username/password pair for `POST /api/auth/login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Token grant returned by login.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LoginGrant {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub user: serde_json::Value,
}

/// Split a tag string the way the backend does: on ASCII or full-width
/// commas and semicolons, trimming and dropping empties.
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(TAG_SEPARATORS)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
        .collect()
}

fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Null => Ok(Vec::new()),
        serde_json::Value::String(raw) => Ok(split_tags(&raw)),
        serde_json::Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                serde_json::Value::String(tag) => Ok(tag),
                serde_json::Value::Object(mut obj) => match obj.remove("name") {
                    Some(serde_json::Value::String(tag)) => Ok(tag),
                    _ => Err(D::Error::custom("expected tag object with a name")),
                },
                _ => Err(D::Error::custom("expected tag string")),
            })
            .collect(),
        _ => Err(D::Error::custom("expected tag list or string")),
    }
}
