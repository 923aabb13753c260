//! Sports offered by the wizard and the metric catalog for each.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Sport {
    Boxing,
    Judo,
    Swimming,
    TrackField,
    Wrestling,
    WinterSports,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricDef {
    pub key: &'static str,
    pub label: &'static str,
}

const fn metric(key: &'static str, label: &'static str) -> MetricDef {
    MetricDef { key, label }
}

const BOXING_METRICS: &[MetricDef] = &[
    metric("punchSpeed", "Punch speed"),
    metric("punchAccuracy", "Punch accuracy"),
    metric("ringCoverage", "Ring coverage"),
];

const JUDO_METRICS: &[MetricDef] = &[
    metric("throwEfficiency", "Throw efficiency"),
    metric("gripTime", "Grip control time"),
    metric("transitionSpeed", "Transition speed"),
];

const SWIMMING_METRICS: &[MetricDef] = &[
    metric("lapTime", "Average lap time"),
    metric("strokeRate", "Stroke rate"),
    metric("turnEfficiency", "Turn efficiency"),
];

const TRACK_FIELD_METRICS: &[MetricDef] = &[
    metric("splitTime", "Split times"),
    metric("strideLength", "Stride length"),
    metric("acceleration", "Acceleration phases"),
];

const WRESTLING_METRICS: &[MetricDef] = &[
    metric("takedownSuccess", "Takedown success rate"),
    metric("controlTime", "Control time"),
    metric("escapeSpeed", "Escape speed"),
];

const WINTER_SPORTS_METRICS: &[MetricDef] = &[
    metric("speed", "Average speed"),
    metric("lineChoice", "Line choice"),
    metric("transitionSmoothness", "Turn / transition smoothness"),
];

impl Sport {
    pub const ALL: [Sport; 6] = [
        Sport::Boxing,
        Sport::Judo,
        Sport::Swimming,
        Sport::TrackField,
        Sport::Wrestling,
        Sport::WinterSports,
    ];

    /// Identifier used on the wire and in history records.
    pub fn key(self) -> &'static str {
        match self {
            Sport::Boxing => "boxing",
            Sport::Judo => "judo",
            Sport::Swimming => "swimming",
            Sport::TrackField => "trackField",
            Sport::Wrestling => "wrestling",
            Sport::WinterSports => "winterSports",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Sport::Boxing => "Boxing",
            Sport::Judo => "Judo",
            Sport::Swimming => "Swimming",
            Sport::TrackField => "Track & Field",
            Sport::Wrestling => "Wrestling",
            Sport::WinterSports => "Winter Sports",
        }
    }

    pub fn from_key(key: &str) -> Option<Sport> {
        Sport::ALL
            .into_iter()
            .find(|sport| sport.key().eq_ignore_ascii_case(key.trim()))
    }

    pub fn metrics(self) -> &'static [MetricDef] {
        match self {
            Sport::Boxing => BOXING_METRICS,
            Sport::Judo => JUDO_METRICS,
            Sport::Swimming => SWIMMING_METRICS,
            Sport::TrackField => TRACK_FIELD_METRICS,
            Sport::Wrestling => WRESTLING_METRICS,
            Sport::WinterSports => WINTER_SPORTS_METRICS,
        }
    }

    pub fn metric(self, key: &str) -> Option<&'static MetricDef> {
        self.metrics().iter().find(|def| def.key == key)
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Display label for a sport tag coming back from the backend; unknown tags
/// are shown verbatim.
pub fn sport_label(tag: &str) -> String {
    Sport::from_key(tag)
        .map(|sport| sport.label().to_string())
        .unwrap_or_else(|| tag.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip_through_serde() {
        for sport in Sport::ALL {
            let json = serde_json::to_value(sport).unwrap();
            assert_eq!(json, serde_json::Value::String(sport.key().to_string()));
            assert_eq!(Sport::from_key(sport.key()), Some(sport));
        }
    }

    #[test]
    fn every_sport_has_three_metrics_with_unique_keys() {
        for sport in Sport::ALL {
            let metrics = sport.metrics();
            assert_eq!(metrics.len(), 3, "{sport}");
            for def in metrics {
                assert_eq!(sport.metric(def.key), Some(def));
            }
        }
    }

    #[test]
    fn metric_lookup_is_per_sport() {
        assert!(Sport::Boxing.metric("punchAccuracy").is_some());
        assert!(Sport::Judo.metric("punchAccuracy").is_none());
    }

    #[test]
    fn unknown_tags_display_verbatim() {
        assert_eq!(sport_label("trackField"), "Track & Field");
        assert_eq!(sport_label("curling"), "curling");
    }
}
