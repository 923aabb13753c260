use api::auth::{LoginRequest, RegisterRequest};
use dioxus::prelude::*;

use crate::app::{navigate, use_services};
use crate::core::route::{HOME_ROUTE, LOGIN_ROUTE, REGISTER_ROUTE};
use crate::t;

#[component]
pub fn Login() -> Element {
    let services = use_services();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut pending = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if pending() {
            return;
        }
        pending.set(true);
        error.set(None);

        let request = LoginRequest {
            email: email().trim().to_string(),
            password: password(),
        };
        let client = services.client.clone();
        let notices = services.notices().clone();
        services.run(async move {
            match client.login(&request).await {
                Ok(user) => {
                    notices.success(t!("auth-welcome", name = user.display_name()));
                    navigate(HOME_ROUTE);
                }
                Err(err) => error.set(Some(err.user_message())),
            }
            pending.set(false);
        });
    };

    rsx! {
        section { class: "page page-auth",
            h1 { {t!("auth-login-title")} }
            form { class: "auth-form", onsubmit: on_submit,
                label { class: "auth-form__field",
                    span { {t!("auth-email")} }
                    input {
                        r#type: "email",
                        required: true,
                        value: "{email}",
                        oninput: move |evt| email.set(evt.value()),
                    }
                }
                label { class: "auth-form__field",
                    span { {t!("auth-password")} }
                    input {
                        r#type: "password",
                        required: true,
                        value: "{password}",
                        oninput: move |evt| password.set(evt.value()),
                    }
                }
                if let Some(message) = error() {
                    p { class: "auth-form__error", role: "alert", "{message}" }
                }
                button {
                    r#type: "submit",
                    class: "button button--primary",
                    disabled: pending(),
                    if pending() {
                        {t!("auth-working")}
                    } else {
                        {t!("auth-login-submit")}
                    }
                }
            }
            button {
                r#type: "button",
                class: "button button--link",
                onclick: move |_| navigate(REGISTER_ROUTE),
                {t!("auth-to-register")}
            }
        }
    }
}

#[component]
pub fn Register() -> Element {
    let services = use_services();
    let mut username = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut pending = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if pending() {
            return;
        }
        pending.set(true);
        error.set(None);

        let request = RegisterRequest::new(
            username().trim().to_string(),
            email().trim().to_string(),
            password(),
        );
        let client = services.client.clone();
        let notices = services.notices().clone();
        services.run(async move {
            match client.register(&request).await {
                Ok(user) => {
                    notices.success(t!("auth-welcome", name = user.display_name()));
                    navigate(HOME_ROUTE);
                }
                Err(err) => error.set(Some(err.user_message())),
            }
            pending.set(false);
        });
    };

    rsx! {
        section { class: "page page-auth",
            h1 { {t!("auth-register-title")} }
            form { class: "auth-form", onsubmit: on_submit,
                label { class: "auth-form__field",
                    span { {t!("auth-username")} }
                    input {
                        r#type: "text",
                        required: true,
                        value: "{username}",
                        oninput: move |evt| username.set(evt.value()),
                    }
                }
                label { class: "auth-form__field",
                    span { {t!("auth-email")} }
                    input {
                        r#type: "email",
                        required: true,
                        value: "{email}",
                        oninput: move |evt| email.set(evt.value()),
                    }
                }
                label { class: "auth-form__field",
                    span { {t!("auth-password")} }
                    input {
                        r#type: "password",
                        required: true,
                        value: "{password}",
                        oninput: move |evt| password.set(evt.value()),
                    }
                }
                if let Some(message) = error() {
                    p { class: "auth-form__error", role: "alert", "{message}" }
                }
                button {
                    r#type: "submit",
                    class: "button button--primary",
                    disabled: pending(),
                    if pending() {
                        {t!("auth-working")}
                    } else {
                        {t!("auth-register-submit")}
                    }
                }
            }
            button {
                r#type: "button",
                class: "button button--link",
                onclick: move |_| navigate(LOGIN_ROUTE),
                {t!("auth-to-login")}
            }
        }
    }
}
