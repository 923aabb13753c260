use dioxus::prelude::*;

use crate::app::{navigate, use_services};
use crate::components::{AppNavbar, Toasts};
use crate::core::route::{is_auth_page, redirect_for, LOGIN_ROUTE, REGISTER_ROUTE};
use crate::core::session::PageTitle;
use crate::t;

/// Page frame rendered by the platform layout around its router outlet.
/// Feeds every route change into the session controller, sends signed-out
/// users to the login page and signed-in users away from it.
#[component]
pub fn AppShell(path: String, children: Element) -> Element {
    let services = use_services();
    let _revision = (services.revision)();

    let route_services = services.clone();
    use_effect(use_reactive((&path,), move |(path,)| {
        let authenticated = route_services.session.is_authenticated();
        if let Some(target) = redirect_for(&path, authenticated) {
            tracing::info!(%path, to = target, authenticated, "route guard redirect");
            navigate(target);
            return;
        }
        if !authenticated {
            return;
        }
        let controller = route_services.controller.clone();
        route_services.run(async move {
            let transition = controller.on_route_change(&path).await;
            tracing::debug!(%path, ?transition, "route observed");
        });
    }));

    // A 401 anywhere invalidates the session; follow it to the login page.
    let redirect_services = services.clone();
    use_effect(move || {
        let _ = (redirect_services.revision)();
        if redirect_services.session.take_redirect() {
            redirect_services.notices().info(t!("session-expired"));
            redirect_services.sign_out();
            navigate(LOGIN_ROUTE);
        }
    });

    let teardown = services.controller.clone();
    use_drop(move || teardown.teardown());

    let auth_page = is_auth_page(&path);
    let title = match path.as_str() {
        p if p.starts_with(LOGIN_ROUTE) => t!("auth-login-title"),
        p if p.starts_with(REGISTER_ROUTE) => t!("auth-register-title"),
        _ => page_title_text(services.controller.page_title()),
    };
    let layout = if auth_page { "app-shell--login" } else { "app-shell--sport" };
    let theme = (services.theme)().class();

    rsx! {
        document::Title { "{title} · SportsX" }
        div { class: "app-shell {theme} {layout}",
            AppNavbar {}
            main { class: "app-main", {children} }
            Toasts {}
        }
    }
}

fn page_title_text(title: PageTitle) -> String {
    match title {
        PageTitle::SelectSport => t!("title-select-sport"),
        PageTitle::SelectMetric => t!("title-select-metric"),
        PageTitle::UploadVideo => t!("title-upload-video"),
        PageTitle::VideoMetrics => t!("title-video-metrics"),
        PageTitle::History => t!("title-history"),
    }
}
