//! Canonical report model shared by the fresh-upload view and the history list.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A counter as reported by the analysis backend: usually numeric, sometimes text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Number(f64),
    Text(String),
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatValue::Number(value) => write!(f, "{value}"),
            StatValue::Text(text) => f.write_str(text),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Corner {
    pub corner_name: Option<String>,
    pub trunk_color_detected: Option<String>,
    pub confidence_score: Option<f64>,
}

/// One analyzed subject. Every field is independently optional: `None`
/// means "not computed", never an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FighterPerformance {
    pub corner: Corner,
    pub total_punches: Option<StatValue>,
    pub landed: Option<StatValue>,
    pub accuracy: Option<StatValue>,
    pub jabs: Option<StatValue>,
    pub hooks: Option<StatValue>,
    pub ring_control: Option<StatValue>,
    pub distance_covered: Option<StatValue>,
    pub blocks: Option<StatValue>,
}

impl FighterPerformance {
    /// The all-null placeholder used for missing slots.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::empty()
    }
}

/// Both analyzed subjects of a session. Always fully materialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FighterPerformancePair {
    #[serde(rename = "fighter_A")]
    pub primary: FighterPerformance,
    #[serde(rename = "fighter_B")]
    pub secondary: FighterPerformance,
}

/// Which slots the backend actually supplied, before placeholders were filled in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlotPresence {
    pub primary: bool,
    pub secondary: bool,
}

impl SlotPresence {
    pub fn both(self) -> bool {
        self.primary && self.secondary
    }
}

/// A normalized analysis report. Scalar fields are never null: missing
/// values are empty strings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    pub id: String,
    pub user_id: String,
    pub sport: String,
    pub message: String,
    /// Pair from the immediate upload response (mirrors `performance` for history entries).
    pub response: FighterPerformancePair,
    /// Pair persisted on the stored report.
    pub performance: FighterPerformancePair,
    pub response_slots: SlotPresence,
    pub created_at: String,
    pub updated_at: String,
    /// File name for fresh uploads, "sport – date" for history entries.
    pub label: String,
}

impl Report {
    /// Whether the backend supplied both fighters for this report.
    pub fn has_fighter_data(&self) -> bool {
        self.response_slots.both()
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}
