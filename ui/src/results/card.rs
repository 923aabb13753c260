use dioxus::prelude::*;

use crate::core::{
    format,
    report::{FighterPerformance, Report},
    sports::sport_label,
};
use crate::results::{stat_label, stat_rows};
use crate::t;

#[component]
pub fn FighterCard(title: String, fighter: FighterPerformance) -> Element {
    let corner = format::corner_label(&fighter.corner);
    let rows = stat_rows(&fighter);

    rsx! {
        article { class: "results-card fighter-card",
            div { class: "results-card__header",
                h3 { "{title}" }
                span { class: "results-card__meta", "{corner}" }
            }
            ul { class: "results-detail__grid",
                for row in rows {
                    li { key: "{row.key}",
                        span { class: "results-detail__metric-label", {stat_label(row.key)} }
                        span { class: "results-detail__metric-value", "{row.value}" }
                    }
                }
            }
        }
    }
}

/// Full report: summary header and both fighter cards. `children` renders
/// below the cards (the caller's action buttons).
#[component]
pub fn ReportView(report: Report, children: Element) -> Element {
    let sport = sport_label(&report.sport);
    let date = format::format_report_date(&report.created_at);
    let pair = report.response.clone();

    rsx! {
        section { class: "report",
            div { class: "report__summary",
                h2 { "{report.label}" }
                div { class: "report__meta",
                    if !report.sport.is_empty() {
                        span { class: "report__sport", "{sport}" }
                    }
                    if !report.created_at.is_empty() {
                        span { class: "report__date", "{date}" }
                    }
                }
                if !report.message.is_empty() {
                    p { class: "report__message", "{report.message}" }
                }
            }

            if !report.has_fighter_data() {
                p { class: "results-card__placeholder", {t!("report-partial")} }
            }

            div { class: "report__fighters",
                FighterCard { title: t!("report-fighter-a"), fighter: pair.primary }
                FighterCard { title: t!("report-fighter-b"), fighter: pair.secondary }
            }

            div { class: "report__actions", {children} }
        }
    }
}
