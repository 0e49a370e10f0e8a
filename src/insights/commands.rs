use tauri::State;

use crate::{
    insights::{InsightRecord, InsightsController, PanelState},
    AppState,
};

fn controller_from_state(state: &State<'_, AppState>) -> InsightsController {
    state.insights.clone()
}

#[tauri::command]
pub async fn get_insights_state(state: State<'_, AppState>) -> Result<PanelState, String> {
    let controller = controller_from_state(&state);
    Ok(controller.get_state().await)
}

#[tauri::command]
pub async fn load_insights(state: State<'_, AppState>) -> Result<PanelState, String> {
    let controller = controller_from_state(&state);
    controller.load_insights().await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn request_answer(
    state: State<'_, AppState>,
    insight: InsightRecord,
) -> Result<PanelState, String> {
    let controller = controller_from_state(&state);
    controller
        .request_answer(insight)
        .await
        .map_err(|e| e.to_string())
}
