//! First page of the user's timeline.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::app::AppServices;
use crate::net::types::TimelineQuery;

#[component]
pub fn TimelinePage() -> impl IntoView {
    let services = expect_context::<AppServices>();
    let page = LocalResource::new(move || {
        let api = services.api.clone();
        async move { api.get_timeline(&TimelineQuery::default()).await }
    });

    view! {
        <div class="timeline-page">
            <h1>"时间线"</h1>
            <Suspense fallback=move || view! { <p>"加载中..."</p> }>
                {move || {
                    page.get()
                        .map(|result| match result {
                            Ok(page) => view! {
                                <p class="timeline-page__total">{format!("共 {} 条", page.total)}</p>
                                <ul class="timeline-page__list">
                                    {page.events
                                        .into_iter()
                                        .map(|event| {
                                            let href = format!("/event/{}", event.id);
                                            view! {
                                                <li class="timeline-page__item">
                                                    <A href=href>{event.title}</A>
                                                    <span class="timeline-page__date">
                                                        {event.event_date.unwrap_or_default()}
                                                    </span>
                                                </li>
                                            }
                                        })
                                        .collect_view()}
                                </ul>
                            }
                            .into_any(),
                            Err(e) => view! { <p class="error">{e.message().to_owned()}</p> }.into_any(),
                        })
                }}
            </Suspense>
        </div>
    }
}
