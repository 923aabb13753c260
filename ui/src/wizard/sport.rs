use dioxus::prelude::*;

use crate::app::use_services;
use crate::core::sports::Sport;
use crate::t;

#[component]
pub fn SportPicker() -> Element {
    let services = use_services();

    rsx! {
        section { class: "wizard wizard--sport",
            h2 { {t!("wizard-sport-heading")} }
            div { class: "wizard__grid",
                for sport in Sport::ALL {
                    button {
                        key: "{sport.key()}",
                        r#type: "button",
                        class: "wizard__tile",
                        onclick: {
                            let services = services.clone();
                            move |_| {
                                services.controller.select_sport(sport);
                                services.touch();
                            }
                        },
                        span { class: "wizard__tile-label", "{sport.label()}" }
                        span { class: "wizard__tile-meta", "{sport.metrics().len()} metrics" }
                    }
                }
            }
        }
    }
}
