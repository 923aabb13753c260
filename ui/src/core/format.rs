//! Formatting helpers for presenting report values.

use time::{
    format_description::well_known::Rfc3339, macros::format_description, OffsetDateTime,
    PrimitiveDateTime,
};

use super::report::{Corner, StatValue};

pub const PLACEHOLDER: &str = "—";

/// `value` with `suffix`, or the placeholder when not computed.
pub fn format_stat(value: Option<&StatValue>, suffix: &str) -> String {
    match value {
        None => PLACEHOLDER.to_string(),
        Some(StatValue::Text(text)) if text.is_empty() => PLACEHOLDER.to_string(),
        Some(value) => format!("{value}{suffix}"),
    }
}

/// `"Red corner · red"`, whichever parts are known.
pub fn corner_label(corner: &Corner) -> String {
    let parts: Vec<&str> = [
        corner.corner_name.as_deref(),
        corner.trunk_color_detected.as_deref(),
    ]
    .into_iter()
    .flatten()
    .filter(|part| !part.is_empty())
    .collect();

    if parts.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        parts.join(" · ")
    }
}

pub fn format_confidence(score: Option<f64>) -> String {
    match score {
        Some(score) if score.is_finite() => {
            // Scores arrive either as a 0–1 ratio or already as a percentage.
            let percent = if score <= 1.0 { score * 100.0 } else { score };
            format!("{percent:.0}%")
        }
        _ => PLACEHOLDER.to_string(),
    }
}

/// Parse a backend timestamp. Accepts RFC 3339 and offset-less ISO
/// timestamps (taken as UTC).
pub fn parse_timestamp(raw: &str) -> Option<OffsetDateTime> {
    let raw = raw.trim();
    if let Ok(ts) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(ts);
    }
    PrimitiveDateTime::parse(
        raw,
        &format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]"),
    )
    .or_else(|_| {
        PrimitiveDateTime::parse(
            raw,
            &format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
        )
    })
    .ok()
    .map(PrimitiveDateTime::assume_utc)
}

/// `Mar 5, 02:30 PM`; unparseable input is returned unchanged.
pub fn format_report_date(raw: &str) -> String {
    parse_timestamp(raw)
        .and_then(|ts| {
            ts.format(&format_description!(
                "[month repr:short] [day padding:none], [hour repr:12]:[minute] [period]"
            ))
            .ok()
        })
        .unwrap_or_else(|| raw.to_string())
}
