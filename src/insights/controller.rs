use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use log::{debug, error};
use serde::Serialize;
use tauri::{AppHandle, Emitter};
use tokio::sync::Mutex;

use crate::providers::{AnswerGenerator, InsightSource};

use super::state::{AnswerToggle, InsightRecord, PanelState};

pub const ANSWER_UNAVAILABLE_TEXT: &str =
    "Sorry, I couldn't put together an answer right now. Please try again.";

#[derive(Serialize, Clone)]
struct PanelStateChangedEvent {
    state: PanelState,
}

#[derive(Clone)]
pub struct InsightsController {
    state: Arc<Mutex<PanelState>>,
    source: Arc<dyn InsightSource>,
    generator: Arc<dyn AnswerGenerator>,
    app_handle: AppHandle,
}

impl InsightsController {
    pub fn new(
        app_handle: AppHandle,
        source: Arc<dyn InsightSource>,
        generator: Arc<dyn AnswerGenerator>,
    ) -> Self {
        Self {
            state: Arc::new(Mutex::new(PanelState::new())),
            source,
            generator,
            app_handle,
        }
    }

    pub async fn get_state(&self) -> PanelState {
        self.state.lock().await.clone()
    }

    /// Fetch the insight list and replace the panel contents wholesale.
    /// A failed fetch degrades to the single fallback card; the panel never
    /// surfaces a distinct error state.
    pub async fn load_insights(&self) -> Result<PanelState> {
        {
            let mut state = self.state.lock().await;
            state.begin_load();
            emit_panel_state(&self.app_handle, state.clone());
        }

        let state = match self.source.fetch_insights().await {
            Ok(insights) => {
                let mut state = self.state.lock().await;
                state.complete_load(insights, Utc::now());
                state
            }
            Err(err) => {
                error!("insight fetch failed: {err:#}");
                let mut state = self.state.lock().await;
                state.complete_load_fallback();
                state
            }
        };

        emit_panel_state(&self.app_handle, state.clone());
        Ok(state.clone())
    }

    /// Toggle the on-demand answer for one insight. Inserting a fresh entry
    /// kicks off a generation call in the background; the command returns as
    /// soon as the pending entry is visible.
    pub async fn request_answer(&self, insight: InsightRecord) -> Result<PanelState> {
        let toggle = {
            let mut state = self.state.lock().await;
            let toggle = state.toggle_answer(&insight);
            if toggle != AnswerToggle::Ignored {
                emit_panel_state(&self.app_handle, state.clone());
            }
            toggle
        };

        if let AnswerToggle::Requested { question } = toggle {
            self.spawn_generation(insight.id.clone(), question);
        }

        Ok(self.get_state().await)
    }

    fn spawn_generation(&self, insight_id: String, question: String) {
        let state = self.state.clone();
        let generator = self.generator.clone();
        let app_handle = self.app_handle.clone();

        tokio::spawn(async move {
            let outcome = generator.generate(&question).await;

            let mut guard = state.lock().await;
            if apply_generation_outcome(&mut guard, &insight_id, outcome) {
                emit_panel_state(&app_handle, guard.clone());
            } else {
                debug!("answer for insight {insight_id} arrived after toggle-off; dropping");
            }
        });
    }
}

/// Fold a finished generation call into the panel state. A failure becomes
/// the fixed apology text; a missing entry means the user hid the answer
/// while the call was in flight, and the result is discarded.
fn apply_generation_outcome(
    state: &mut PanelState,
    insight_id: &str,
    outcome: Result<String>,
) -> bool {
    let answer_text = match outcome {
        Ok(text) => text,
        Err(err) => {
            error!("answer generation failed for insight {insight_id}: {err:#}");
            ANSWER_UNAVAILABLE_TEXT.to_string()
        }
    };

    state.resolve_answer(insight_id, answer_text)
}

fn emit_panel_state(app_handle: &AppHandle, state: PanelState) {
    let payload = PanelStateChangedEvent { state };
    let _ = app_handle.emit("insights-state-changed", payload);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::state::InsightCategory;
    use anyhow::anyhow;

    fn answerable(id: &str) -> InsightRecord {
        InsightRecord {
            id: id.to_string(),
            category: InsightCategory::Tip,
            title: "Save more".to_string(),
            message: "...".to_string(),
            action_label: Some("See how".to_string()),
            confidence: None,
        }
    }

    #[test]
    fn successful_generation_lands_in_the_entry() {
        let mut state = PanelState::new();
        state.toggle_answer(&answerable("1"));

        let applied =
            apply_generation_outcome(&mut state, "1", Ok("Try the 50/30/20 rule.".to_string()));
        assert!(applied);

        let entry = state.answers.get("1").unwrap();
        assert!(!entry.pending);
        assert_eq!(entry.answer_text, "Try the 50/30/20 rule.");
    }

    #[test]
    fn failed_generation_resolves_to_apology_text() {
        let mut state = PanelState::new();
        state.toggle_answer(&answerable("1"));

        let applied = apply_generation_outcome(&mut state, "1", Err(anyhow!("model overloaded")));
        assert!(applied);

        let entry = state.answers.get("1").unwrap();
        assert!(!entry.pending);
        assert_eq!(entry.answer_text, ANSWER_UNAVAILABLE_TEXT);
    }

    #[test]
    fn outcome_for_a_hidden_entry_is_dropped() {
        let mut state = PanelState::new();
        let insight = answerable("1");
        state.toggle_answer(&insight);
        state.toggle_answer(&insight); // hidden before the call lands

        let applied = apply_generation_outcome(&mut state, "1", Ok("too late".to_string()));
        assert!(!applied);
        assert!(!state.has_answer("1"));
    }
}
