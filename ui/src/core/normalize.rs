//! Response normalization.
//!
//! The analysis backend is loose about shapes: a "performance" or "response"
//! field may be the canonical `{ fighter_A, fighter_B }` object, a list of
//! partial objects (`[{ fighter_A }, { fighter_B }]`), or missing entirely.
//! History bodies may be a bare array or an array wrapped under `result`,
//! `reports` or `data`. Everything here is total: any input produces a
//! structurally valid value, and malformed data degrades to "no data".

use serde_json::{Map, Value};

use super::format::format_report_date;
use super::report::{
    Corner, FighterPerformance, FighterPerformancePair, Report, SlotPresence, StatValue,
};
use super::sports::sport_label;

const PRIMARY_KEYS: [&str; 2] = ["fighter_A", "primary"];
const SECONDARY_KEYS: [&str; 2] = ["fighter_B", "secondary"];
const HISTORY_WRAPPER_KEYS: [&str; 3] = ["result", "reports", "data"];

/// Shape of a performance field as received.
enum PerformanceVariant<'a> {
    List(&'a [Value]),
    Object(&'a Map<String, Value>),
    Absent,
}

impl<'a> PerformanceVariant<'a> {
    fn classify(value: Option<&'a Value>) -> Self {
        match value {
            Some(Value::Array(items)) => PerformanceVariant::List(items),
            Some(Value::Object(map)) => PerformanceVariant::Object(map),
            _ => PerformanceVariant::Absent,
        }
    }
}

/// Stateless normalizer handed to the controller and the history cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResponseNormalizer;

impl ResponseNormalizer {
    pub fn normalize_pair(&self, value: Option<&Value>) -> FighterPerformancePair {
        normalize_pair(value)
    }

    pub fn normalize_upload_result(&self, raw: &Value) -> Report {
        normalize_upload_result(raw)
    }

    pub fn normalize_history_entry(&self, raw: &Value) -> Report {
        normalize_history_entry(raw)
    }

    pub fn history_reports(&self, body: &Value) -> Vec<Report> {
        history_reports(body)
    }
}

/// Canonical pair for `value`. `None` stands for an absent field, distinct
/// from an explicit JSON `null`; both normalize the same way.
pub fn normalize_pair(value: Option<&Value>) -> FighterPerformancePair {
    normalize_pair_with_presence(value).0
}

fn normalize_pair_with_presence(value: Option<&Value>) -> (FighterPerformancePair, SlotPresence) {
    let mut primary: Option<&Map<String, Value>> = None;
    let mut secondary: Option<&Map<String, Value>> = None;

    match PerformanceVariant::classify(value) {
        PerformanceVariant::List(items) => {
            // Later entries overwrite earlier ones, independently per slot.
            for item in items.iter().filter_map(Value::as_object) {
                if let Some(found) = slot(item, &PRIMARY_KEYS) {
                    primary = Some(found);
                }
                if let Some(found) = slot(item, &SECONDARY_KEYS) {
                    secondary = Some(found);
                }
            }
        }
        PerformanceVariant::Object(map) => {
            primary = slot(map, &PRIMARY_KEYS);
            secondary = slot(map, &SECONDARY_KEYS);
        }
        PerformanceVariant::Absent => {}
    }

    let presence = SlotPresence {
        primary: primary.is_some(),
        secondary: secondary.is_some(),
    };
    let pair = FighterPerformancePair {
        primary: primary.map(fighter_from).unwrap_or_else(FighterPerformance::empty),
        secondary: secondary
            .map(fighter_from)
            .unwrap_or_else(FighterPerformance::empty),
    };
    (pair, presence)
}

/// Only object-valued entries count; `null` and scalars are treated as absent.
fn slot<'a>(map: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Map<String, Value>> {
    keys.iter().find_map(|key| map.get(*key).and_then(Value::as_object))
}

fn fighter_from(map: &Map<String, Value>) -> FighterPerformance {
    let corner = map
        .get("corner")
        .and_then(Value::as_object)
        .map(corner_from)
        .unwrap_or_default();

    FighterPerformance {
        corner,
        total_punches: stat(map.get("total_punches")),
        landed: stat(map.get("landed")),
        accuracy: stat(map.get("accuracy")),
        jabs: stat(map.get("jabs")),
        hooks: stat(map.get("hooks")),
        ring_control: stat(map.get("ring_control")),
        distance_covered: stat(map.get("distance_covered")),
        blocks: stat(map.get("blocks")),
    }
}

fn corner_from(map: &Map<String, Value>) -> Corner {
    Corner {
        corner_name: text(map.get("corner_name")),
        trunk_color_detected: text(map.get("trunk_color_detected")),
        confidence_score: number(map.get("confidence_score")),
    }
}

fn stat(value: Option<&Value>) -> Option<StatValue> {
    match value? {
        Value::Number(n) => n.as_f64().map(StatValue::Number),
        Value::String(s) => Some(StatValue::Text(s.clone())),
        _ => None,
    }
}

fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn number(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Scalar coercion for identity and timestamp fields: absent and `null`
/// become the empty string.
fn coerce_string(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Normalize the body returned by the upload endpoint:
/// `{ message, user_id, response, report: { _id, user_id, sport, performance, created_at, updated_at } }`.
pub fn normalize_upload_result(raw: &Value) -> Report {
    let top = raw.as_object();
    let field = |key: &str| top.and_then(|map| map.get(key));
    let stored = field("report").and_then(Value::as_object);
    let stored_field = |key: &str| stored.and_then(|map| map.get(key));

    let (response, response_slots) = normalize_pair_with_presence(field("response"));
    let performance = normalize_pair(stored_field("performance"));

    let mut user_id = coerce_string(stored_field("user_id"));
    if user_id.is_empty() {
        user_id = coerce_string(field("user_id"));
    }

    Report {
        id: coerce_string(stored_field("_id")),
        user_id,
        sport: coerce_string(stored_field("sport")),
        message: coerce_string(field("message")),
        response,
        performance,
        response_slots,
        created_at: coerce_string(stored_field("created_at")),
        updated_at: coerce_string(stored_field("updated_at")),
        label: String::new(),
    }
}

/// Normalize one history record: `{ _id, user_id, sport, performance, created_at, updated_at }`.
/// The display label is `"{sport} – {date}"`.
pub fn normalize_history_entry(raw: &Value) -> Report {
    let record = raw.as_object();
    let field = |key: &str| record.and_then(|map| map.get(key));

    let (performance, response_slots) = normalize_pair_with_presence(field("performance"));
    let sport = coerce_string(field("sport"));
    let created_at = coerce_string(field("created_at"));

    let sport_display = if sport.is_empty() {
        "Session".to_string()
    } else {
        sport_label(&sport)
    };
    let label = format!("{sport_display} – {}", format_report_date(&created_at));

    Report {
        id: coerce_string(field("_id")),
        user_id: coerce_string(field("user_id")),
        sport,
        message: String::new(),
        response: performance.clone(),
        performance,
        response_slots,
        created_at,
        updated_at: coerce_string(field("updated_at")),
        label,
    }
}

/// The raw record list inside a history body, or an empty slice for any
/// unrecognised shape.
pub fn history_entries(body: &Value) -> &[Value] {
    match body {
        Value::Array(items) => items.as_slice(),
        Value::Object(map) => {
            let wrapped = HISTORY_WRAPPER_KEYS
                .iter()
                .find_map(|key| map.get(*key).filter(|value| !value.is_null()));
            match wrapped {
                Some(Value::Array(items)) => items.as_slice(),
                _ => &[],
            }
        }
        _ => &[],
    }
}

/// Map a whole history body into reports, keeping the first record for
/// each non-empty id.
pub fn history_reports(body: &Value) -> Vec<Report> {
    let mut seen = std::collections::HashSet::new();
    history_entries(body)
        .iter()
        .map(normalize_history_entry)
        .filter(|report| report.id.is_empty() || seen.insert(report.id.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fighter(jabs: f64) -> Value {
        json!({
            "corner": { "corner_name": "Red", "trunk_color_detected": "red", "confidence_score": 0.9 },
            "total_punches": 40,
            "landed": 22,
            "accuracy": 55,
            "jabs": jabs,
            "hooks": 7,
            "ring_control": 61.5,
            "distance_covered": 120,
            "blocks": 4
        })
    }

    fn jabs(perf: &FighterPerformance) -> Option<f64> {
        match perf.jabs {
            Some(StatValue::Number(n)) => Some(n),
            _ => None,
        }
    }

    #[test]
    fn absent_null_and_empty_list_all_yield_empty_pair() {
        let expected = FighterPerformancePair::default();
        assert_eq!(normalize_pair(None), expected);
        assert_eq!(normalize_pair(Some(&Value::Null)), expected);
        assert_eq!(normalize_pair(Some(&json!([]))), expected);
        assert_eq!(normalize_pair(Some(&json!("garbage"))), expected);
        assert_eq!(normalize_pair(Some(&json!(42))), expected);
    }

    #[test]
    fn list_form_last_non_null_wins_per_slot() {
        let value = json!([
            { "fighter_A": fighter(1.0) },
            { "fighter_B": fighter(2.0) },
            { "fighter_A": fighter(3.0) },
            { "fighter_B": null }
        ]);
        let pair = normalize_pair(Some(&value));
        assert_eq!(jabs(&pair.primary), Some(3.0));
        assert_eq!(jabs(&pair.secondary), Some(2.0));
    }

    #[test]
    fn list_form_skips_non_object_items() {
        let value = json!([null, 3, "x", { "fighter_B": fighter(5.0) }]);
        let pair = normalize_pair(Some(&value));
        assert!(pair.primary.is_empty());
        assert_eq!(jabs(&pair.secondary), Some(5.0));
    }

    #[test]
    fn object_form_reads_slots_directly() {
        let value = json!({ "fighter_A": fighter(1.0), "fighter_B": null });
        let pair = normalize_pair(Some(&value));
        assert_eq!(jabs(&pair.primary), Some(1.0));
        assert!(pair.secondary.is_empty());
        assert_eq!(pair.primary.corner.corner_name.as_deref(), Some("Red"));
        assert_eq!(pair.primary.corner.confidence_score, Some(0.9));
    }

    #[test]
    fn normalizing_own_output_is_idempotent() {
        let value = json!({ "fighter_A": fighter(1.0), "fighter_B": fighter(2.0) });
        let once = normalize_pair(Some(&value));
        let serialized = serde_json::to_value(&once).unwrap();
        let twice = normalize_pair(Some(&serialized));
        assert_eq!(once, twice);
    }

    #[test]
    fn malformed_fields_degrade_to_none() {
        let value = json!({
            "fighter_A": {
                "corner": "not an object",
                "total_punches": { "nested": true },
                "landed": "12",
                "accuracy": [1, 2]
            }
        });
        let pair = normalize_pair(Some(&value));
        assert_eq!(pair.primary.corner, Corner::default());
        assert_eq!(pair.primary.total_punches, None);
        assert_eq!(pair.primary.landed, Some(StatValue::Text("12".into())));
        assert_eq!(pair.primary.accuracy, None);
    }

    #[test]
    fn upload_result_coerces_scalars_and_fills_both_pairs() {
        let raw = json!({
            "message": "ok",
            "user_id": 77,
            "response": [{ "fighter_A": fighter(1.0) }, { "fighter_B": fighter(2.0) }],
            "report": {
                "_id": "r1",
                "user_id": null,
                "sport": "boxing",
                "performance": { "fighter_A": fighter(1.0) },
                "created_at": "2025-03-05T14:30:00Z"
            }
        });
        let report = normalize_upload_result(&raw);

        assert_eq!(report.id, "r1");
        assert_eq!(report.user_id, "77");
        assert_eq!(report.message, "ok");
        assert_eq!(report.updated_at, "");
        assert_eq!(jabs(&report.response.primary), Some(1.0));
        assert_eq!(jabs(&report.response.secondary), Some(2.0));
        assert!(report.performance.secondary.is_empty());
        assert!(report.has_fighter_data());
    }

    #[test]
    fn upload_result_of_garbage_is_still_a_report() {
        for raw in [Value::Null, json!([]), json!("x"), json!({ "report": 5 })] {
            let report = normalize_upload_result(&raw);
            assert_eq!(report.id, "");
            assert_eq!(report.response, FighterPerformancePair::default());
            assert!(!report.has_fighter_data());
        }
    }

    #[test]
    fn history_entry_label_uses_sport_and_date() {
        let raw = json!({
            "_id": "h1",
            "user_id": "u1",
            "sport": "boxing",
            "performance": { "fighter_A": fighter(1.0), "fighter_B": fighter(2.0) },
            "created_at": "2025-03-05T14:30:00Z",
            "updated_at": "2025-03-05T14:31:00Z"
        });
        let report = normalize_history_entry(&raw);
        assert_eq!(report.label, "Boxing – Mar 5, 02:30 PM");
        assert_eq!(report.response, report.performance);
        assert!(report.has_fighter_data());

        let bare = normalize_history_entry(&json!({ "_id": "h2" }));
        assert_eq!(bare.label, "Session – ");
        assert!(!bare.has_fighter_data());
    }

    #[test]
    fn history_body_shapes() {
        let entry = json!({ "_id": "a" });
        assert_eq!(history_entries(&json!([entry.clone()])).len(), 1);
        assert_eq!(history_entries(&json!({ "result": [entry.clone()] })).len(), 1);
        assert_eq!(history_entries(&json!({ "reports": [entry.clone()] })).len(), 1);
        assert_eq!(history_entries(&json!({ "data": [entry.clone()] })).len(), 1);
        assert_eq!(
            history_entries(&json!({ "result": null, "data": [entry.clone(), entry.clone()] })).len(),
            2
        );
        assert!(history_entries(&json!({ "result": "nope", "data": [entry] })).is_empty());
        assert!(history_entries(&json!({ "user_id": "u" })).is_empty());
        assert!(history_entries(&Value::Null).is_empty());
    }

    #[test]
    fn history_reports_are_unique_by_id() {
        let body = json!([
            { "_id": "a", "sport": "judo" },
            { "_id": "b" },
            { "_id": "a", "sport": "boxing" }
        ]);
        let reports = history_reports(&body);
        let ids: Vec<&str> = reports.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(reports[0].sport, "judo");
    }
}
