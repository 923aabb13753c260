use dioxus::prelude::*;

use crate::app::use_services;
use crate::core::report::Report;
use crate::results::ReportView;
use crate::t;

/// Full-screen view of a history entry with a way back to the list.
#[component]
pub fn HistoryDetail(report: Report) -> Element {
    let services = use_services();
    let _revision = (services.revision)();
    let report_id = report.id.clone();
    let deleting = services.controller.history_snapshot().is_deleting(&report_id);

    let back_services = services.clone();
    let on_back = move |_| {
        back_services.controller.back_to_history_list();
        back_services.touch();
    };

    let delete_services = services.clone();
    let on_delete = move |_| {
        let Some(ticket) = delete_services.controller.history().begin_delete(&report_id) else {
            return;
        };
        delete_services.touch();
        let controller = delete_services.controller.clone();
        delete_services.run(async move {
            controller.history().finish_delete(ticket).await;
        });
    };

    rsx! {
        section { class: "results-detail",
            ReportView { report,
                button {
                    r#type: "button",
                    class: "button button--ghost",
                    onclick: on_back,
                    {t!("history-back")}
                }
                button {
                    r#type: "button",
                    class: "button button--danger",
                    disabled: deleting,
                    onclick: on_delete,
                    if deleting {
                        {t!("history-deleting")}
                    } else {
                        {t!("history-delete")}
                    }
                }
            }
        }
    }
}
