use dioxus::prelude::*;

use crate::app::use_services;
use crate::core::sports::Sport;
use crate::t;

#[component]
pub fn MetricPicker(sport: Sport) -> Element {
    let services = use_services();

    let back_services = services.clone();
    let on_back = move |_| {
        back_services.controller.back_to_sports();
        back_services.touch();
    };

    rsx! {
        section { class: "wizard wizard--metric",
            h2 { {t!("wizard-metric-heading")} }
            p { class: "wizard__context", "{sport.label()}" }
            ul { class: "wizard__list",
                for def in sport.metrics() {
                    li { key: "{def.key}",
                        button {
                            r#type: "button",
                            class: "wizard__option",
                            onclick: {
                                let services = services.clone();
                                let key = def.key;
                                move |_| {
                                    if let Err(err) = services.controller.select_metric(key) {
                                        tracing::warn!(error = %err, "metric rejected");
                                        services.notices().error(err.to_string());
                                    }
                                    services.touch();
                                }
                            },
                            "{def.label}"
                        }
                    }
                }
            }
            button {
                r#type: "button",
                class: "button button--ghost",
                onclick: on_back,
                {t!("wizard-back")}
            }
        }
    }
}
