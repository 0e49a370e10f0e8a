use tauri::State;

use crate::{
    auth::{self, IdentityProfile},
    db::User,
    AppState,
};

/// Page-shell entry point: `None` when no authenticated session exists, the
/// internal user record otherwise. The front end picks the guest or
/// dashboard view from the result.
#[tauri::command]
pub async fn resolve_user(
    state: State<'_, AppState>,
    profile: Option<IdentityProfile>,
) -> Result<Option<User>, String> {
    let Some(profile) = profile else {
        return Ok(None);
    };

    auth::find_or_create_user(&state.db, &profile)
        .await
        .map(Some)
        .map_err(|e| e.to_string())
}
