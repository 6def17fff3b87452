use super::*;
use crate::state::storage::MemoryStore;

fn store() -> SessionStore<MemoryStore> {
    SessionStore::new(MemoryStore::new())
}

fn session(token: &str) -> Session {
    Session {
        access_token: token.to_owned(),
        user_info: serde_json::json!({ "id": 1, "username": "alice" }),
    }
}

// =============================================================
// Session presence
// =============================================================

#[test]
fn empty_store_is_not_authenticated() {
    let s = store();
    assert!(!s.is_authenticated());
    assert_eq!(s.token(), None);
    assert_eq!(s.user_info(), None);
}

#[test]
fn establish_makes_session_valid() {
    let s = store();
    s.establish(&session("t1"));
    assert!(s.is_authenticated());
    assert_eq!(s.token().as_deref(), Some("t1"));
    assert_eq!(s.user_info(), Some(serde_json::json!({ "id": 1, "username": "alice" })));
}

#[test]
fn token_without_user_info_is_not_valid() {
    let s = store();
    s.storage().set_item(TOKEN_KEY, "t1");
    assert!(!s.is_authenticated());
}

#[test]
fn user_info_without_token_is_not_valid() {
    let s = store();
    s.storage().set_item(USER_INFO_KEY, "{\"id\":1}");
    assert!(!s.is_authenticated());
}

#[test]
fn empty_token_counts_as_absent() {
    let s = store();
    s.storage().set_item(TOKEN_KEY, "");
    s.storage().set_item(USER_INFO_KEY, "{\"id\":1}");
    assert_eq!(s.token(), None);
    assert!(!s.is_authenticated());
}

#[test]
fn malformed_user_info_reads_as_none() {
    let s = store();
    s.storage().set_item(USER_INFO_KEY, "not json");
    assert_eq!(s.user_info(), None);
}

// =============================================================
// clear
// =============================================================

#[test]
fn clear_removes_token_and_user_info() {
    let s = store();
    s.establish(&session("t1"));
    s.clear();
    assert_eq!(s.storage().get_item(TOKEN_KEY), None);
    assert_eq!(s.storage().get_item(USER_INFO_KEY), None);
}

#[test]
fn clear_twice_is_harmless() {
    let s = store();
    s.clear();
    s.clear();
    assert!(!s.is_authenticated());
    assert!(s.storage().is_empty());
}

#[test]
fn clear_keeps_pending_redirect() {
    let s = store();
    s.set_pending_redirect("/search");
    s.establish(&session("t1"));
    s.clear();
    assert_eq!(s.pending_redirect().as_deref(), Some("/search"));
}

// =============================================================
// Pending redirect
// =============================================================

#[test]
fn newer_pending_redirect_overwrites_older() {
    let s = store();
    s.set_pending_redirect("/timeline");
    s.set_pending_redirect("/event/42?tab=notes");
    assert_eq!(s.pending_redirect().as_deref(), Some("/event/42?tab=notes"));
}

#[test]
fn take_pending_redirect_reads_once() {
    let s = store();
    s.set_pending_redirect("/statistics");
    assert_eq!(s.take_pending_redirect().as_deref(), Some("/statistics"));
    assert_eq!(s.take_pending_redirect(), None);
}

// =============================================================
// Login flow
// =============================================================

#[test]
fn complete_login_resumes_pending_redirect() {
    let s = store();
    s.set_pending_redirect("/event/42?tab=notes");
    let next = s.complete_login(&session("t2"));
    assert_eq!(next, "/event/42?tab=notes");
    assert!(s.is_authenticated());
    assert_eq!(s.pending_redirect(), None);
}

#[test]
fn complete_login_without_redirect_lands_on_default() {
    let s = store();
    assert_eq!(s.complete_login(&session("t2")), DEFAULT_LANDING);
}

#[test]
fn complete_login_ignores_redirect_back_to_login() {
    let s = store();
    s.set_pending_redirect("/login?next=x");
    assert_eq!(s.complete_login(&session("t2")), DEFAULT_LANDING);
}

#[test]
fn logout_clears_session() {
    let s = store();
    s.establish(&session("t1"));
    s.logout();
    assert!(!s.is_authenticated());
}
