use super::*;

// =============================================================
// resolve_base_url
// =============================================================

#[test]
fn override_wins_over_dev_address() {
    assert_eq!(resolve_base_url(Some("https://api.example.com"), true), "https://api.example.com");
}

#[test]
fn blank_override_is_ignored() {
    assert_eq!(resolve_base_url(Some("   "), true), DEV_BASE_URL);
}

#[test]
fn dev_build_uses_local_backend() {
    assert_eq!(resolve_base_url(None, true), "http://localhost:8000");
}

#[test]
fn release_build_falls_back_to_same_origin() {
    assert_eq!(resolve_base_url(None, false), "");
}

// =============================================================
// ApiConfig
// =============================================================

#[test]
fn url_for_joins_without_double_slash() {
    let config = ApiConfig::with_base_url("http://localhost:8000/");
    assert_eq!(config.url_for("/api/events/"), "http://localhost:8000/api/events/");
}

#[test]
fn url_for_same_origin_keeps_path_relative() {
    let config = ApiConfig::with_base_url("");
    assert_eq!(config.url_for("/api/events/7"), "/api/events/7");
}

#[test]
fn with_base_url_uses_default_timeout() {
    assert_eq!(ApiConfig::with_base_url("x").timeout_ms, 10_000);
}
