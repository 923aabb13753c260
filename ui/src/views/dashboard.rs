use dioxus::prelude::*;

use crate::app::use_services;
use crate::core::session::WizardStage;
use crate::results::ReportView;
use crate::t;
use crate::wizard::{MetricPicker, SportPicker, UploadPanel};

#[component]
pub fn Dashboard() -> Element {
    let services = use_services();
    let _revision = (services.revision)();
    // Re-render on language change.
    let _lang_code: Option<Signal<String>> = try_use_context::<Signal<String>>();
    let _lang_current = _lang_code.as_ref().map(|s| s()).unwrap_or_default();

    let state = services.controller.state();
    let stage = state.stage();

    let another_services = services.clone();
    let on_another = move |_| {
        another_services.controller.upload_another();
        another_services.touch();
    };
    let over_services = services.clone();
    let on_start_over = move |_| {
        over_services.controller.start_over();
        over_services.touch();
    };

    let body = match (stage, state.sport, state.report.clone()) {
        (WizardStage::SelectMetric, Some(sport), _) => rsx! { MetricPicker { sport } },
        (WizardStage::Upload, _, _) => rsx! { UploadPanel { state: state.clone() } },
        (WizardStage::ViewReport, _, Some(report)) => rsx! {
            ReportView { report,
                button {
                    r#type: "button",
                    class: "button button--primary",
                    onclick: on_another,
                    {t!("wizard-upload-another")}
                }
                button {
                    r#type: "button",
                    class: "button button--ghost",
                    onclick: on_start_over,
                    {t!("wizard-start-over")}
                }
            }
        },
        _ => rsx! { SportPicker {} },
    };

    rsx! {
        section { class: "page page-dashboard", "data-stage": stage.as_str(),
            {body}
        }
    }
}
