//! Root application component, shared services, and the guarded route host.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::NavigateOptions;
use leptos_router::components::Router;
use leptos_router::hooks::{use_location, use_navigate};

use crate::config::ApiConfig;
use crate::net::api::{ApiClient, BrowserApi};
use crate::net::interceptor::{AuthEventStream, auth_channel};
use crate::pages::{
    event_detail::EventDetailPage,
    fallback::{NavigationErrorPage, NotFoundPage},
    home::HomePage,
    login::LoginPage,
    placeholder::PlaceholderPage,
    timeline::TimelinePage,
};
use crate::routing::location::Location;
use crate::routing::navigator::{AllowedView, BundledViews, Navigator, Resolution};
use crate::routing::routes::{APP_NAME, LOGIN_PATH, ViewId};
use crate::state::session::{BrowserSessionStore, SessionStore};
use crate::state::storage::LocalStorage;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="zh-CN">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Session store, API client and navigator shared through context.
///
/// All three observe the same `localStorage`-backed session.
#[derive(Clone, Debug)]
pub struct AppServices {
    pub session: BrowserSessionStore,
    pub api: BrowserApi,
    pub navigator: Navigator<LocalStorage, BundledViews>,
}

impl AppServices {
    /// Wire the services together; the returned stream feeds the 401 handler.
    pub fn new(config: ApiConfig) -> (Self, AuthEventStream) {
        let session = SessionStore::new(LocalStorage);
        let (events, stream) = auth_channel();
        let api = ApiClient::browser(config, session.clone(), events);
        let navigator = Navigator::new(session.clone(), BundledViews);
        (Self { session, api, navigator }, stream)
    }
}

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let (services, auth_events) = AppServices::new(ApiConfig::from_build_env());
    #[cfg(feature = "hydrate")]
    {
        use crate::net::interceptor::{BrowserRedirector, SessionInvalidator};

        let invalidator = SessionInvalidator::new(services.session.clone(), BrowserRedirector);
        leptos::task::spawn_local(invalidator.run(auth_events));
    }
    // Server rendering never reaches the API, so nothing listens for 401s.
    #[cfg(not(feature = "hydrate"))]
    drop(auth_events);

    provide_context(services);

    view! {
        <Stylesheet id="leptos" href="/pkg/grand-things.css"/>
        <Title text=APP_NAME/>

        <Router>
            <RouteHost/>
        </Router>
    }
}

/// Resolves the current location through the navigator and renders the
/// outcome. Every transition, including the first render, passes the guard.
#[component]
fn RouteHost() -> impl IntoView {
    let services = expect_context::<AppServices>();
    let location = use_location();
    let navigate = use_navigate();
    let previous = StoredValue::new(String::from("/"));

    let navigator = services.navigator.clone();
    let resolution = LocalResource::new(move || {
        let target = Location::from_parts(
            &location.pathname.get(),
            &location.search.get(),
            &location.hash.get(),
        );
        let from = previous.get_value();
        let navigator = navigator.clone();
        async move { navigator.navigate(&from, target).await }
    });

    Effect::new(move || match resolution.get() {
        Some(Resolution::RedirectedToLogin { .. }) => {
            navigate(LOGIN_PATH, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
        Some(Resolution::Allowed(allowed)) => previous.set_value(allowed.location.full_path()),
        _ => {}
    });

    view! {
        <Suspense fallback=move || view! { <p class="route-loading">"加载中..."</p> }>
            {move || resolution.get().map(render_resolution)}
        </Suspense>
    }
}

fn render_resolution(resolution: Resolution) -> AnyView {
    match resolution {
        Resolution::Allowed(allowed) => {
            let title = allowed.title.clone();
            view! {
                {title.map(|text| view! { <Title text=text/> })}
                {render_view(allowed)}
            }
            .into_any()
        }
        Resolution::RedirectedToLogin { .. } => {
            view! { <p class="route-loading">"正在跳转到登录页..."</p> }.into_any()
        }
        Resolution::NotFound { path } => view! { <NotFoundPage path=path/> }.into_any(),
        Resolution::Failed { target, message } => {
            view! { <NavigationErrorPage target=target message=message/> }.into_any()
        }
    }
}

fn render_view(allowed: AllowedView) -> AnyView {
    let descriptor = allowed.route.descriptor;
    match descriptor.view {
        ViewId::Home => view! { <HomePage/> }.into_any(),
        ViewId::Login => view! { <LoginPage/> }.into_any(),
        ViewId::Timeline => view! { <TimelinePage/> }.into_any(),
        ViewId::EventDetail => {
            let id = allowed.route.param("id").unwrap_or_default().to_owned();
            view! { <EventDetailPage id=id/> }.into_any()
        }
        ViewId::Search | ViewId::AddEvent | ViewId::EditEvent | ViewId::Statistics | ViewId::Profile => {
            let path = allowed.location.full_path();
            view! { <PlaceholderPage name=descriptor.name path=path/> }.into_any()
        }
    }
}
