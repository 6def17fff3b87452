//! # grand-things
//!
//! Leptos + WASM frontend for the Grand Things personal timeline.
//!
//! The interesting part is the auth-aware pipeline: `net::interceptor` wraps
//! every API call (bearer token in, one error message out, session teardown
//! on 401) and `routing::navigator` gates every page transition on the
//! session, remembering where the user was headed before the login detour.
//! Both share one `state::session::SessionStore`.

pub mod app;
pub mod config;
pub mod net;
pub mod pages;
pub mod routing;
pub mod state;

/// Browser entry point.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Debug) {
        leptos::logging::warn!("logger already initialized: {err}");
    }
    leptos::mount::hydrate_body(app::App);
}
