use crate::app::{navigate, use_services};
use crate::core::route::{HOME_ROUTE, LOGIN_ROUTE};
use crate::core::theme::Theme;
use crate::i18n::{self};
use crate::t;
use dioxus::prelude::*;
use once_cell::sync::OnceCell;

const NAVBAR_CSS: Asset = asset!("/assets/styling/navbar.css");
const NAVBAR_CSS_INLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/styling/navbar.css"
));

/// Platform-supplied link constructors, so `ui` does not need to know the
/// platform's `Route` enum. Each closure receives the localized label and
/// returns a `Link` that contains it.
///
/// ```ignore
/// register_nav(NavBuilder {
///     dashboard: |label| rsx!( Link { class: "navbar__link", to: Route::Dashboard {}, "{label}" } ),
///     history: |label| rsx!( Link { class: "navbar__link", to: Route::History {}, "{label}" } ),
/// });
/// ```
pub struct NavBuilder {
    pub dashboard: fn(label: &str) -> Element,
    pub history: fn(label: &str) -> Element,
}

static NAV_BUILDER: OnceCell<NavBuilder> = OnceCell::new();

pub fn register_nav(builder: NavBuilder) {
    let _ = NAV_BUILDER.set(builder);
}

#[component]
pub fn AppNavbar() -> Element {
    i18n::init();

    let services = use_services();
    let _revision = (services.revision)();

    let mut current_lang = use_signal(|| "en-US".to_string());
    let langs = use_signal(i18n::available_languages);
    let show_switcher = langs().len() > 1;
    // Global language code provided by the platform; reading it subscribes
    // this component to language changes.
    let lang_code_ctx: Option<Signal<String>> = try_use_context::<Signal<String>>();
    let _lang_marker = lang_code_ctx.as_ref().map(|c| c()).unwrap_or_default();

    let on_change = move |evt: dioxus::events::FormEvent| {
        let val = evt.value();
        match i18n::set_language(&val) {
            Ok(()) => {
                tracing::info!(lang = %val, "language changed");
                current_lang.set(val.clone());
                if let Some(mut code) = lang_code_ctx {
                    code.set(val);
                }
            }
            Err(err) => tracing::warn!(lang = %val, error = %err, "language switch failed"),
        }
    };

    let brand_services = services.clone();
    let on_brand = move |_| {
        brand_services.controller.start_over();
        brand_services.touch();
        navigate(HOME_ROUTE);
    };

    let history_services = services.clone();
    let on_history = move |_| {
        history_services.controller.open_history();
        history_services.touch();
    };

    let logout_services = services.clone();
    let on_logout = move |_| {
        let client = logout_services.client.clone();
        logout_services.sign_out();
        logout_services.run(async move {
            if let Err(err) = client.logout().await {
                tracing::warn!(error = %err, "logout request failed");
            }
            navigate(LOGIN_ROUTE);
        });
    };

    let theme_services = services.clone();
    let on_theme = move |_| theme_services.toggle_theme();
    let theme_label = match (services.theme)() {
        Theme::Light => t!("nav-theme-dark"),
        Theme::Dark => t!("nav-theme-light"),
    };

    let internal_nav = NAV_BUILDER.get().map(|b| {
        let dashboard = (b.dashboard)(&t!("nav-dashboard"));
        let history = (b.history)(&t!("nav-history"));
        rsx! {
            nav { class: "navbar__links",
                {dashboard}
                span { class: "navbar__link-wrap", onclick: on_history, {history} }
            }
        }
    });

    let signed_in = services.session.is_authenticated();
    let user_name = services
        .session
        .user()
        .map(|user| user.display_name().to_string());
    let tagline = t!("tagline");

    rsx! {
        document::Link { rel: "stylesheet", href: NAVBAR_CSS }
        if cfg!(all(not(debug_assertions), not(target_arch = "wasm32"))) {
            document::Style { "{NAVBAR_CSS_INLINE}" }
        }

        header {
            id: "navbar",
            class: "navbar",
            div { style: "display:none", "{_lang_marker}" }
            div { class: "navbar__inner",
                div { class: "navbar__brand",
                    button {
                        r#type: "button",
                        class: "navbar__brand-link",
                        onclick: on_brand,
                        span { class: "navbar__brand-spark", aria_hidden: "true" }
                        span { class: "navbar__brand-mark", "SportsX" }
                    }
                    span { class: "navbar__brand-subtitle", "{tagline}" }
                }

                if signed_in {
                    if let Some(nav) = internal_nav {
                        {nav}
                    }
                }

                if signed_in {
                    div { class: "navbar__account",
                        if let Some(name) = user_name {
                            span { class: "navbar__user", "{name}" }
                        }
                        button {
                            r#type: "button",
                            class: "navbar__link navbar__theme",
                            aria_label: "{theme_label}",
                            onclick: on_theme,
                            "{theme_label}"
                        }
                        button {
                            r#type: "button",
                            class: "navbar__link navbar__logout",
                            onclick: on_logout,
                            {t!("nav-logout")}
                        }
                    }
                }

                if show_switcher {
                    div { class: "navbar__locale",
                        label {
                            class: "visually-hidden",
                            r#for: "locale-select",
                            {t!("nav-language-label")}
                        }
                        select {
                            id: "locale-select",
                            value: "{current_lang()}",
                            oninput: on_change,
                            { langs().iter().map(|code| {
                                let c = code.clone();
                                rsx!{
                                    option { key: "{c}", value: "{c}", "{c}" }
                                }
                            })}
                        }
                    }
                }
            }
        }
    }
}
