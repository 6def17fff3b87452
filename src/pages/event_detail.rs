//! Single event view.

#[cfg(test)]
#[path = "event_detail_test.rs"]
mod event_detail_test;

use leptos::prelude::*;

use crate::app::AppServices;
use crate::net::error::ApiError;

fn parse_event_id(raw: &str) -> Result<i64, ApiError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ApiError::new(format!("无效的事件编号: {raw}")))
}

#[component]
pub fn EventDetailPage(id: String) -> impl IntoView {
    let services = expect_context::<AppServices>();
    let event = LocalResource::new(move || {
        let api = services.api.clone();
        let id = parse_event_id(&id);
        async move { api.get_event(id?).await }
    });

    view! {
        <div class="event-detail-page">
            <Suspense fallback=move || view! { <p>"加载中..."</p> }>
                {move || {
                    event.get()
                        .map(|result| match result {
                            Ok(event) => view! {
                                <h1>{event.title}</h1>
                                <p class="event-detail-page__meta">
                                    {event.category.unwrap_or_default()}
                                    " · "
                                    {event.event_date.unwrap_or_default()}
                                </p>
                                <p class="event-detail-page__tags">{event.tags.join(", ")}</p>
                                <p class="event-detail-page__body">{event.description.unwrap_or_default()}</p>
                            }
                            .into_any(),
                            Err(e) => view! { <p class="error">{e.message().to_owned()}</p> }.into_any(),
                        })
                }}
            </Suspense>
        </div>
    }
}
