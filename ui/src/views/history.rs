use dioxus::prelude::*;

use crate::app::use_services;
use crate::results::{HistoryDetail, HistoryList};

#[component]
pub fn History() -> Element {
    let services = use_services();
    let _revision = (services.revision)();
    let _lang_code: Option<Signal<String>> = try_use_context::<Signal<String>>();
    let _lang_current = _lang_code.as_ref().map(|s| s()).unwrap_or_default();

    let viewing = services.controller.history().viewing();

    rsx! {
        section { class: "page page-history",
            match viewing {
                Some(report) => rsx! { HistoryDetail { report } },
                None => rsx! { HistoryList {} },
            }
        }
    }
}
