//! Stand-in for routes whose views live outside this crate.

use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn PlaceholderPage(name: &'static str, path: String) -> impl IntoView {
    view! {
        <div class="placeholder-page">
            <h1>{name}</h1>
            <p class="placeholder-page__path">{path}</p>
            <A href="/">"返回首页"</A>
        </div>
    }
}
