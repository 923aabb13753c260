//! Rendering of analysis reports: the fighter cards shared by the fresh
//! upload view and the history detail, plus the history list.

mod card;
pub use card::{FighterCard, ReportView};

mod list;
pub use list::HistoryList;

mod detail;
pub use detail::HistoryDetail;

use crate::core::report::FighterPerformance;
use crate::core::format;
use crate::t;

/// One row of a fighter card. `key` is the Fluent id of its label.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct StatRow {
    pub key: &'static str,
    pub value: String,
}

pub(crate) fn stat_rows(fighter: &FighterPerformance) -> Vec<StatRow> {
    let row = |key, value: String| StatRow { key, value };
    vec![
        row("stat-total-punches", format::format_stat(fighter.total_punches.as_ref(), "")),
        row("stat-landed", format::format_stat(fighter.landed.as_ref(), "")),
        row("stat-accuracy", format::format_stat(fighter.accuracy.as_ref(), "%")),
        row("stat-jabs", format::format_stat(fighter.jabs.as_ref(), "")),
        row("stat-hooks", format::format_stat(fighter.hooks.as_ref(), "")),
        row("stat-ring-control", format::format_stat(fighter.ring_control.as_ref(), "%")),
        row("stat-distance", format::format_stat(fighter.distance_covered.as_ref(), " m")),
        row("stat-blocks", format::format_stat(fighter.blocks.as_ref(), "")),
        row("stat-corner-confidence", format::format_confidence(fighter.corner.confidence_score)),
    ]
}

pub(crate) fn stat_label(key: &str) -> String {
    match key {
        "stat-total-punches" => t!("stat-total-punches"),
        "stat-landed" => t!("stat-landed"),
        "stat-accuracy" => t!("stat-accuracy"),
        "stat-jabs" => t!("stat-jabs"),
        "stat-hooks" => t!("stat-hooks"),
        "stat-ring-control" => t!("stat-ring-control"),
        "stat-distance" => t!("stat-distance"),
        "stat-blocks" => t!("stat-blocks"),
        "stat-corner-confidence" => t!("stat-corner-confidence"),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::report::StatValue;

    #[test]
    fn rows_format_units_and_placeholders() {
        let fighter = FighterPerformance {
            accuracy: Some(StatValue::Number(62.5)),
            distance_covered: Some(StatValue::Number(140.0)),
            jabs: Some(StatValue::Number(12.0)),
            ..FighterPerformance::empty()
        };
        let rows = stat_rows(&fighter);
        let value = |key: &str| rows.iter().find(|r| r.key == key).unwrap().value.clone();

        assert_eq!(value("stat-accuracy"), "62.5%");
        assert_eq!(value("stat-distance"), "140 m");
        assert_eq!(value("stat-jabs"), "12");
        assert_eq!(value("stat-hooks"), format::PLACEHOLDER);
        assert_eq!(value("stat-corner-confidence"), format::PLACEHOLDER);
    }
}
