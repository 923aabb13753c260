use dioxus::prelude::*;

use ui::app::{register_navigate, AppServices};
use ui::components::app_navbar::{register_nav, NavBuilder};
use ui::components::AppShell;
use ui::core::route::{HISTORY_ROUTE, LOGIN_ROUTE, REGISTER_ROUTE};
use ui::views::{Dashboard, History, Login, Register};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(WebShell)]
    #[redirect("/", || Route::Dashboard {})]
    #[route("/login")]
    Login {},
    #[route("/register")]
    Register {},
    #[route("/dashboard")]
    Dashboard {},
    #[route("/history")]
    History {},
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

impl Route {
    fn from_path(path: &str) -> Self {
        match path {
            HISTORY_ROUTE => Route::History {},
            LOGIN_ROUTE => Route::Login {},
            REGISTER_ROUTE => Route::Register {},
            _ => Route::Dashboard {},
        }
    }
}

fn nav_dashboard(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Dashboard {},
        "{label}"
    })
}
fn nav_history(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::History {},
        "{label}"
    })
}

fn go(path: &str) {
    navigator().push(Route::from_path(path));
}

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    {
        ui::i18n::init();
        register_nav(NavBuilder {
            dashboard: nav_dashboard,
            history: nav_history,
        });
        register_navigate(go);
    }

    let services = use_hook(AppServices::from_build_env);
    let lang_code = use_signal(|| "en-US".to_string());
    use_context_provider(|| lang_code);

    // The hook result is fixed after the first render, so the branch taken
    // here never changes between renders.
    match services {
        Ok(services) => {
            use_context_provider(|| services);
            rsx! {
                document::Link { rel: "stylesheet", href: MAIN_CSS }
                Router::<Route> {}
            }
        }
        Err(err) => {
            tracing::error!(error = %err, "api configuration rejected");
            rsx! {
                document::Link { rel: "stylesheet", href: MAIN_CSS }
                section { class: "page page-error",
                    h1 { "SportsX is misconfigured" }
                    p { "{err}" }
                }
            }
        }
    }
}

/// Web layout: shared shell around the router outlet, fed with the current
/// path so the session flow can react to navigation.
#[component]
fn WebShell() -> Element {
    let route = use_route::<Route>();
    let path = route.to_string();

    rsx! {
        AppShell { path,
            Outlet::<Route> {}
        }
    }
}
