use futures::executor::block_on;

use super::*;
use crate::net::interceptor::{AuthEventStream, SessionInvalidator, auth_channel};
use crate::net::test_support::{FakeRedirector, RecordingTransport};
use crate::state::storage::MemoryStore;

fn client(transport: &RecordingTransport) -> (ApiClient<RecordingTransport, MemoryStore>, AuthEventStream) {
    let session = SessionStore::new(MemoryStore::new());
    session.establish(&Session {
        access_token: "t1".to_owned(),
        user_info: serde_json::json!({ "username": "alice" }),
    });
    let (tx, rx) = auth_channel();
    let chain = InterceptorChain::new(
        ApiConfig::with_base_url("http://localhost:8000"),
        transport.clone(),
        session,
        tx,
    );
    (ApiClient::new(chain), rx)
}

fn event_json(id: i64) -> String {
    serde_json::json!({ "id": id, "title": "Graduated", "tags": "school", "impact_score": 9 }).to_string()
}

// =============================================================
// Path builders
// =============================================================

#[test]
fn event_path_formats_id() {
    assert_eq!(event_path(42), "/api/events/42");
}

#[test]
fn timeline_path_uses_defaults() {
    assert_eq!(timeline_path(&TimelineQuery::default()), "/api/events/timeline?page=1&size=20");
}

#[test]
fn timeline_path_includes_category_when_set() {
    let q = TimelineQuery { page: 3, size: 50, category: Some("工作".to_owned()) };
    assert_eq!(
        timeline_path(&q),
        "/api/events/timeline?page=3&size=50&category=%E5%B7%A5%E4%BD%9C"
    );
}

#[test]
fn timeline_path_skips_blank_category() {
    let q = TimelineQuery { category: Some("  ".to_owned()), ..TimelineQuery::default() };
    assert_eq!(timeline_path(&q), "/api/events/timeline?page=1&size=20");
}

#[test]
fn search_path_sends_only_filled_fields() {
    let q = SearchQuery {
        query: Some("move house".to_owned()),
        tags: vec!["life".to_owned(), " ".to_owned(), "city".to_owned()],
        end_date: Some("2024-12-31".to_owned()),
        ..SearchQuery::default()
    };
    assert_eq!(
        search_path(&q),
        "/api/events/search?query=move+house&tags=life%2Ccity&end_date=2024-12-31"
    );
}

#[test]
fn search_path_without_filters_has_no_query_string() {
    assert_eq!(search_path(&SearchQuery::default()), "/api/events/search");
}

// =============================================================
// Operations
// =============================================================

#[test]
fn create_event_posts_json_body() {
    let transport = RecordingTransport::new();
    transport.respond(200, &event_json(5));
    let (api, _rx) = client(&transport);
    let body = EventCreate { title: "Graduated".to_owned(), ..Default::default() };
    let event = block_on(api.create_event(&body)).unwrap();
    assert_eq!(event.id, 5);

    let req = transport.last_request().unwrap();
    assert_eq!(req.method, Method::Post);
    assert_eq!(req.url, "http://localhost:8000/api/events/");
    assert_eq!(req.body.as_deref(), Some(r#"{"title":"Graduated"}"#));
    assert_eq!(req.header("Authorization"), Some("Bearer t1"));
}

#[test]
fn get_timeline_decodes_page() {
    let transport = RecordingTransport::new();
    let page = format!(r#"{{"events":[{}],"total":1,"page":1,"size":20}}"#, event_json(1));
    transport.respond(200, &page);
    let (api, _rx) = client(&transport);
    let page = block_on(api.get_timeline(&TimelineQuery::default())).unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.events[0].tags, vec!["school"]);
}

#[test]
fn get_event_404_surfaces_detail() {
    let transport = RecordingTransport::new();
    transport.respond(404, r#"{"detail":"not found"}"#);
    let (api, _rx) = client(&transport);
    let err = block_on(api.get_event(99)).unwrap_err();
    assert_eq!(err.message(), "not found");
    assert_eq!(transport.last_request().unwrap().path, "/api/events/99");
}

#[test]
fn update_event_uses_put() {
    let transport = RecordingTransport::new();
    transport.respond(200, &event_json(3));
    let (api, _rx) = client(&transport);
    let update = EventUpdate { is_reviewed: Some(true), ..Default::default() };
    block_on(api.update_event(3, &update)).unwrap();
    let req = transport.last_request().unwrap();
    assert_eq!(req.method, Method::Put);
    assert_eq!(req.body.as_deref(), Some(r#"{"is_reviewed":true}"#));
}

#[test]
fn delete_event_returns_ack() {
    let transport = RecordingTransport::new();
    transport.respond(200, r#"{"message":"事件已删除"}"#);
    let (api, _rx) = client(&transport);
    let ack = block_on(api.delete_event(3)).unwrap();
    assert_eq!(ack.message, "事件已删除");
    assert_eq!(transport.last_request().unwrap().method, Method::Delete);
}

#[test]
fn stats_endpoints_decode_lists() {
    let transport = RecordingTransport::new();
    transport
        .respond(200, r#"[{"category":"work","count":4},{"category":null,"count":1}]"#)
        .respond(200, r#"[{"year":2024,"month":3,"count":2,"date":"2024-03"}]"#);
    let (api, _rx) = client(&transport);
    let categories = block_on(api.get_categories_stats()).unwrap();
    assert_eq!(categories.len(), 2);
    assert_eq!(categories[1].category, None);
    let months = block_on(api.get_timeline_stats()).unwrap();
    assert_eq!(months[0].date, "2024-03");

    let paths: Vec<String> = transport.requests.borrow().iter().map(|r| r.path.clone()).collect();
    assert_eq!(paths, vec!["/api/events/stats/categories", "/api/events/stats/timeline"]);
}

#[test]
fn extract_wechat_sends_url_body() {
    let transport = RecordingTransport::new();
    transport.respond(200, r#"{"title":"t","content":"c"}"#);
    let (api, _rx) = client(&transport);
    let article = block_on(api.extract_wechat_content("https://mp.weixin.qq.com/s/x")).unwrap();
    assert!(article.images.is_empty());
    let req = transport.last_request().unwrap();
    assert_eq!(req.path, "/api/events/extract-wechat");
    assert_eq!(req.body.as_deref(), Some(r#"{"url":"https://mp.weixin.qq.com/s/x"}"#));
}

#[test]
fn malformed_payload_is_reported_as_error() {
    let transport = RecordingTransport::new();
    transport.respond(200, "not json");
    let (api, _rx) = client(&transport);
    let err = block_on(api.search_events(&SearchQuery::default())).unwrap_err();
    assert!(!err.message().is_empty());
}

#[test]
fn health_hits_root_health_endpoint() {
    let transport = RecordingTransport::new();
    transport.respond(200, r#"{"status":"healthy"}"#);
    let (api, _rx) = client(&transport);
    assert_eq!(block_on(api.health()).unwrap().status, "healthy");
    assert_eq!(transport.last_request().unwrap().url, "http://localhost:8000/health");
}

// =============================================================
// Login
// =============================================================

#[test]
fn login_returns_session_from_grant() {
    let transport = RecordingTransport::new();
    transport.respond(200, r#"{"access_token":"t9","token_type":"bearer","user":{"id":3}}"#);
    let (api, _rx) = client(&transport);
    let creds = Credentials { username: "bob".to_owned(), password: "pw".to_owned() };
    let session = block_on(api.login(&creds)).unwrap();
    assert_eq!(session.access_token, "t9");
    assert_eq!(session.user_info, serde_json::json!({ "id": 3 }));
    assert_eq!(transport.last_request().unwrap().path, "/api/auth/login");
}

#[test]
fn login_without_user_record_uses_username() {
    let transport = RecordingTransport::new();
    transport.respond(200, r#"{"access_token":"t9"}"#);
    let (api, _rx) = client(&transport);
    let creds = Credentials { username: "bob".to_owned(), password: "pw".to_owned() };
    let session = block_on(api.login(&creds)).unwrap();
    assert_eq!(session.user_info, serde_json::json!({ "username": "bob" }));
}

#[test]
fn login_rejects_empty_token() {
    let transport = RecordingTransport::new();
    transport.respond(200, r#"{"access_token":""}"#);
    let (api, _rx) = client(&transport);
    let creds = Credentials { username: "bob".to_owned(), password: "pw".to_owned() };
    assert!(block_on(api.login(&creds)).is_err());
}

// =============================================================
// 401 end to end
// =============================================================

#[test]
fn unauthorized_call_tears_down_session_after_handling() {
    let transport = RecordingTransport::new();
    transport.respond(401, r#"{"detail":"Token expired"}"#);
    let (api, mut rx) = client(&transport);
    let redirector = FakeRedirector::at("/statistics");
    let handler = SessionInvalidator::new(api.session().clone(), redirector.clone());

    let err = block_on(api.get_categories_stats()).unwrap_err();
    assert_eq!(err.message(), "Token expired");
    handler.drain(&mut rx);

    assert!(!api.session().is_authenticated());
    assert_eq!(api.session().token(), None);
    assert_eq!(redirector.issued(), vec!["/login".to_owned()]);
}
