use dioxus::prelude::*;

use crate::app::{navigate, use_services, AppServices};
use crate::core::{format, history::HistorySnapshot, report::Report, sports::sport_label};
use crate::t;

#[component]
pub fn HistoryList() -> Element {
    let services = use_services();
    let _revision = (services.revision)();
    let snapshot: HistorySnapshot = services.controller.history_snapshot();
    let count = snapshot.reports.len();

    let entries: Vec<ListEntry> = snapshot
        .reports
        .iter()
        .map(|report| ListEntry {
            deleting: snapshot.is_deleting(&report.id),
            sport: sport_label(&report.sport),
            date: format::format_report_date(&report.created_at),
            report: report.clone(),
        })
        .collect();

    rsx! {
        section { class: "results-card results-list",
            div { class: "results-card__header",
                h2 { {t!("history-heading")} }
                if count > 0 {
                    span { class: "results-card__meta", {t!("history-count", count = count)} }
                }
            }

            if snapshot.loading && count == 0 {
                p { class: "results-card__placeholder", {t!("history-loading")} }
            } else if count == 0 {
                p { class: "results-card__placeholder", {t!("history-empty")} }
            } else {
                ul { class: "results-list__items",
                    for entry in entries.into_iter() {
                        {render_list_entry(entry, services.clone())}
                    }
                }
            }
        }
    }
}

#[derive(Clone)]
struct ListEntry {
    report: Report,
    deleting: bool,
    sport: String,
    date: String,
}

fn render_list_entry(entry: ListEntry, services: AppServices) -> Element {
    let ListEntry {
        report,
        deleting,
        sport,
        date,
    } = entry;

    let id = report.id.clone();
    let label = report.label.clone();

    let select_services = services.clone();
    let on_select = move |_| {
        if let Some(route) = select_services
            .controller
            .select_history_report(report.clone())
        {
            navigate(route);
        }
        select_services.touch();
    };

    let delete_services = services.clone();
    let delete_id = id.clone();
    let on_delete = move |evt: MouseEvent| {
        evt.stop_propagation();
        let Some(ticket) = delete_services.controller.history().begin_delete(&delete_id) else {
            return;
        };
        delete_services.touch();
        let controller = delete_services.controller.clone();
        delete_services.run(async move {
            controller.history().finish_delete(ticket).await;
        });
    };

    rsx! {
        li { key: "{id}", class: "results-list__item",
            button {
                r#type: "button",
                class: "results-list__button",
                onclick: on_select,

                span { class: "results-list__heading",
                    span { class: "results-list__task", "{sport}" }
                    span { class: "results-list__timestamp", "{date}" }
                }
                span { class: "results-list__label", "{label}" }
            }
            button {
                r#type: "button",
                class: "results-list__delete",
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
