//! Route observation: turns a stream of "current path" reports into the
//! transitions the session flow reacts to.

pub const HOME_ROUTE: &str = "/dashboard";
pub const HISTORY_ROUTE: &str = "/history";
pub const LOGIN_ROUTE: &str = "/login";
pub const REGISTER_ROUTE: &str = "/register";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteTransition {
    /// First report after mount.
    pub initial: bool,
    /// Path differs from the previous report.
    pub changed: bool,
    /// Moved into the home route from a different route (never on mount).
    pub entered_home: bool,
    /// Arrived on the history route, including on mount.
    pub entered_history: bool,
    pub on_history: bool,
}

#[derive(Debug, Clone, Default)]
pub struct RouteObserver {
    current: Option<String>,
}

impl RouteObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn is_on(&self, route: &str) -> bool {
        self.current() == Some(route)
    }

    pub fn observe(&mut self, path: &str) -> RouteTransition {
        let path = normalize_path(path);
        let previous = self.current.replace(path.clone());

        let initial = previous.is_none();
        let changed = previous.as_deref() != Some(path.as_str());
        let on_history = path == HISTORY_ROUTE;

        RouteTransition {
            initial,
            changed,
            entered_home: !initial && changed && path == HOME_ROUTE,
            entered_history: changed && on_history,
            on_history,
        }
    }
}

/// Where to send a visitor instead of `path`, if anywhere: signed-out users
/// away from the dashboard and history, signed-in users away from the auth
/// pages.
pub fn redirect_for(path: &str, authenticated: bool) -> Option<&'static str> {
    let path = normalize_path(path);
    let protected = path == HOME_ROUTE || path == HISTORY_ROUTE;
    let auth_page = path == LOGIN_ROUTE || path == REGISTER_ROUTE;
    match (authenticated, protected, auth_page) {
        (false, true, _) => Some(LOGIN_ROUTE),
        (true, _, true) => Some(HOME_ROUTE),
        _ => None,
    }
}

pub fn is_auth_page(path: &str) -> bool {
    let path = normalize_path(path);
    path == LOGIN_ROUTE || path == REGISTER_ROUTE
}

/// Strip query, fragment and trailing slash so `/history/?x=1` matches `/history`.
fn normalize_path(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}
