//! Handlers for the admin settings form.

use axum::extract::State;
use axum::Json;
use event_notifier_core::settings_form::{self, SettingsFormDefinition, SettingsSubmission};
use event_notifier_core::NotificationSettings;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/settings
///
/// Return the form schema populated with the current settings.
pub async fn get_settings_form(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<SettingsFormDefinition>>> {
    let settings = state.config_store.load().await?;

    Ok(Json(DataResponse {
        data: settings_form::build(&settings),
    }))
}

/// PUT /api/v1/settings
///
/// Validate a form submission and persist all three keys.
pub async fn update_settings(
    State(state): State<AppState>,
    Json(input): Json<SettingsSubmission>,
) -> AppResult<Json<DataResponse<NotificationSettings>>> {
    let settings = settings_form::submit(state.config_store.as_ref(), input).await?;

    Ok(Json(DataResponse { data: settings }))
}
