mod auth;
mod db;
mod insights;
mod providers;
mod settings;
mod utils;

use std::sync::Arc;

use auth::commands::resolve_user;
use db::Database;
use insights::{
    commands::{get_insights_state, load_insights, request_answer},
    InsightsController,
};
use providers::{CompletionClient, InsightsApiClient};
use settings::{ProviderSettings, SettingsStore};
use tauri::{Emitter, Manager, State};

pub(crate) struct AppState {
    pub(crate) db: Database,
    pub(crate) insights: InsightsController,
    pub(crate) settings: Arc<SettingsStore>,
}

#[tauri::command]
fn get_provider_settings(state: State<AppState>) -> Result<ProviderSettings, String> {
    Ok(state.settings.providers())
}

#[tauri::command]
fn set_provider_settings(
    settings: ProviderSettings,
    state: State<AppState>,
    app_handle: tauri::AppHandle,
) -> Result<(), String> {
    state
        .settings
        .update_providers(settings.clone())
        .map_err(|e| e.to_string())?;

    app_handle
        .emit("provider-settings-updated", &settings)
        .map_err(|e| e.to_string())?;

    Ok(())
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Finsight starting up...");

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .setup(|app| {
            let result = (|| -> anyhow::Result<()> {
                let app_data_dir = app
                    .path()
                    .app_data_dir()
                    .map_err(|err| anyhow::anyhow!(err))?;
                std::fs::create_dir_all(&app_data_dir)?;

                let db_path = app_data_dir.join("finsight.sqlite3");
                let database = Database::new(db_path)?;

                let settings_path = app_data_dir.join("settings.json");
                let settings_store = Arc::new(SettingsStore::new(settings_path)?);

                let source = Arc::new(InsightsApiClient::new(settings_store.clone()));
                let generator = Arc::new(CompletionClient::new(settings_store.clone()));
                let insights_controller =
                    InsightsController::new(app.handle().clone(), source, generator);

                app.manage(AppState {
                    db: database,
                    insights: insights_controller,
                    settings: settings_store,
                });

                Ok(())
            })();

            result.map_err(|err| err.into())
        })
        .invoke_handler(tauri::generate_handler![
            resolve_user,
            get_insights_state,
            load_insights,
            request_answer,
            get_provider_settings,
            set_provider_settings,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
