//! Public landing page.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::app::AppServices;
use crate::routing::routes::LOGIN_PATH;

#[component]
pub fn HomePage() -> impl IntoView {
    let services = expect_context::<AppServices>();
    let navigate = use_navigate();
    let signed_in = services.session.is_authenticated();

    let on_logout = move |_| {
        services.session.logout();
        navigate(LOGIN_PATH, NavigateOptions::default());
    };

    let session_action = if signed_in {
        view! { <button class="btn" on:click=on_logout>"退出登录"</button> }.into_any()
    } else {
        view! { <A href=LOGIN_PATH>"登录"</A> }.into_any()
    };

    view! {
        <div class="home-page">
            <h1>"Grand Things"</h1>
            <nav class="home-page__nav">
                <A href="/timeline">"时间线"</A>
                <A href="/search">"搜索"</A>
                <A href="/event/add">"添加事件"</A>
                <A href="/statistics">"统计"</A>
            </nav>
            {session_action}
        </div>
    }
}
