//! Static route table and path matching.
//!
//! Routes are matched in table order, so literal routes listed before a
//! parameterized sibling win (`/event/add` before `/event/:id`).

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

/// Application name appended to every page title.
pub const APP_NAME: &str = "Grand Things";

pub const LOGIN_PATH: &str = "/login";

/// Page implementations a route can render.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViewId {
    Home,
    Login,
    Timeline,
    Search,
    AddEvent,
    EditEvent,
    EventDetail,
    Statistics,
    Profile,
}

/// Per-route metadata consumed by the navigation guard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteMeta {
    pub title: Option<&'static str>,
    pub requires_auth: bool,
}

/// A navigable page and its access requirements.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteDescriptor {
    /// Path pattern; `:name` segments capture a parameter.
    pub path: &'static str,
    pub name: &'static str,
    pub view: ViewId,
    pub meta: RouteMeta,
}

const fn route(path: &'static str, name: &'static str, view: ViewId, title: &'static str, requires_auth: bool) -> RouteDescriptor {
    RouteDescriptor { path, name, view, meta: RouteMeta { title: Some(title), requires_auth } }
}

pub static ROUTES: &[RouteDescriptor] = &[
    route("/", "Home", ViewId::Home, "首页", false),
    route(LOGIN_PATH, "Login", ViewId::Login, "登录", false),
    route("/timeline", "Timeline", ViewId::Timeline, "时间线", true),
    route("/search", "Search", ViewId::Search, "搜索", true),
    route("/event/add", "AddEvent", ViewId::AddEvent, "添加事件", true),
    route("/event/edit/:id", "EditEvent", ViewId::EditEvent, "编辑事件", true),
    route("/event/:id", "EventDetail", ViewId::EventDetail, "事件详情", true),
    route("/statistics", "Statistics", ViewId::Statistics, "统计", true),
    route("/profile", "Profile", ViewId::Profile, "个人资料", true),
];

/// A route table hit with its captured parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteMatch {
    pub descriptor: &'static RouteDescriptor,
    pub params: Vec<(String, String)>,
}

impl RouteMatch {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Find the first route whose pattern matches `path` (no query or hash).
pub fn match_route(path: &str) -> Option<RouteMatch> {
    ROUTES.iter().find_map(|descriptor| {
        match_pattern(descriptor.path, path).map(|params| RouteMatch { descriptor, params })
    })
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

fn match_pattern(pattern: &str, path: &str) -> Option<Vec<(String, String)>> {
    let mut wanted = segments(pattern);
    let mut actual = segments(path);
    let mut params = Vec::new();
    loop {
        match (wanted.next(), actual.next()) {
            (None, None) => return Some(params),
            (Some(w), Some(a)) => {
                if let Some(name) = w.strip_prefix(':') {
                    params.push((name.to_owned(), a.to_owned()));
                } else if w != a {
                    return None;
                }
            }
            _ => return None,
        }
    }
}
