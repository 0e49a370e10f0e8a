use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const FALLBACK_INSIGHT_ID: &str = "fallback-1";

const FALLBACK_TITLE: &str = "AI Temporarily Unavailable";
const FALLBACK_MESSAGE: &str =
    "Spending insights could not be loaded right now. Please try again later.";

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum InsightCategory {
    Warning,
    Info,
    Success,
    Tip,
    /// Categories newer than this build; the dashboard falls back to its
    /// neutral styling for these.
    Other,
}

impl InsightCategory {
    fn from_wire(value: &str) -> Self {
        match value {
            "warning" => InsightCategory::Warning,
            "info" => InsightCategory::Info,
            "success" => InsightCategory::Success,
            "tip" => InsightCategory::Tip,
            _ => InsightCategory::Other,
        }
    }
}

// Unknown category strings must not fail the whole fetch, so deserialization
// goes through a string and maps the leftovers to `Other`.
impl<'de> Deserialize<'de> for InsightCategory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(InsightCategory::from_wire(&raw))
    }
}

impl Default for InsightCategory {
    fn default() -> Self {
        InsightCategory::Info
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightRecord {
    pub id: String,
    pub category: InsightCategory,
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub action_label: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
}

impl InsightRecord {
    /// An insight is answerable only when it carries a non-empty action label.
    pub fn action_label(&self) -> Option<&str> {
        self.action_label
            .as_deref()
            .filter(|label| !label.trim().is_empty())
    }

    /// The question sent to the answer generator for this insight.
    pub fn question(&self) -> Option<String> {
        self.action_label()
            .map(|label| format!("{}: {}", self.title, label))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerEntry {
    pub insight_id: String,
    pub answer_text: String,
    pub pending: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum PanelStatus {
    Loading,
    Loaded,
}

impl Default for PanelStatus {
    fn default() -> Self {
        PanelStatus::Loading
    }
}

/// Outcome of an answer request against the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerToggle {
    /// The insight has no action label; nothing changed.
    Ignored,
    /// An entry existed and was removed (the hide gesture).
    Removed,
    /// A pending entry was inserted; the caller should issue this question.
    Requested { question: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelState {
    pub status: PanelStatus,
    pub insights: Vec<InsightRecord>,
    pub answers: HashMap<String, AnswerEntry>,
    pub last_updated: Option<DateTime<Utc>>,
}

impl Default for PanelState {
    fn default() -> Self {
        Self {
            status: PanelStatus::Loading,
            insights: Vec::new(),
            answers: HashMap::new(),
            last_updated: None,
        }
    }
}

pub fn fallback_insight() -> InsightRecord {
    InsightRecord {
        id: FALLBACK_INSIGHT_ID.to_string(),
        category: InsightCategory::Info,
        title: FALLBACK_TITLE.to_string(),
        message: FALLBACK_MESSAGE.to_string(),
        action_label: None,
        confidence: None,
    }
}

impl PanelState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_load(&mut self) {
        self.status = PanelStatus::Loading;
    }

    /// Replace the insight sequence wholesale, preserving the fetched order.
    /// Existing answer entries are left alone; entries whose insight is gone
    /// simply stop being rendered.
    pub fn complete_load(&mut self, insights: Vec<InsightRecord>, fetched_at: DateTime<Utc>) {
        self.insights = insights;
        self.last_updated = Some(fetched_at);
        self.status = PanelStatus::Loaded;
    }

    /// Degrade a failed fetch to the single informational fallback card.
    /// `last_updated` intentionally keeps its previous value: only a
    /// successful fetch counts as an update.
    pub fn complete_load_fallback(&mut self) {
        self.insights = vec![fallback_insight()];
        self.status = PanelStatus::Loaded;
    }

    /// Toggle the answer entry for `insight`. Removing wins over inserting,
    /// so repeated requests round-trip back to "no entry".
    pub fn toggle_answer(&mut self, insight: &InsightRecord) -> AnswerToggle {
        let question = match insight.question() {
            Some(question) => question,
            None => return AnswerToggle::Ignored,
        };

        if self.answers.remove(&insight.id).is_some() {
            return AnswerToggle::Removed;
        }

        self.answers.insert(
            insight.id.clone(),
            AnswerEntry {
                insight_id: insight.id.clone(),
                answer_text: String::new(),
                pending: true,
            },
        );

        AnswerToggle::Requested { question }
    }

    /// Apply a finished generation call. Returns false when no entry exists
    /// for `insight_id` anymore; the caller must treat that as a silent
    /// cancellation, never as a reason to recreate the entry.
    pub fn resolve_answer(&mut self, insight_id: &str, answer_text: String) -> bool {
        match self.answers.get_mut(insight_id) {
            Some(entry) => {
                entry.pending = false;
                entry.answer_text = answer_text;
                true
            }
            None => false,
        }
    }

    pub fn has_answer(&self, insight_id: &str) -> bool {
        self.answers.contains_key(insight_id)
    }
}
