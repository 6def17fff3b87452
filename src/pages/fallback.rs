//! Pages shown when a navigation cannot render its target.

use leptos::prelude::*;
use leptos_router::components::A;

/// Rendered when resolving a route failed (e.g. the view could not load).
///
/// The retry link is a plain anchor so it forces a full reload.
#[component]
pub fn NavigationErrorPage(target: String, message: String) -> impl IntoView {
    view! {
        <div class="error-page">
            <h1>"页面加载失败"</h1>
            <p class="error-page__message">{message}</p>
            <a class="btn" href=target>"重试"</a>
            <A href="/">"返回首页"</A>
        </div>
    }
}

#[component]
pub fn NotFoundPage(path: String) -> impl IntoView {
    view! {
        <div class="error-page">
            <h1>"页面不存在"</h1>
            <p class="error-page__message">{path}</p>
            <A href="/">"返回首页"</A>
        </div>
    }
}
