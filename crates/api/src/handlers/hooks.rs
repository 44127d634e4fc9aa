//! Lifecycle hook endpoints called by the host CMS.
//!
//! These never fail on account of notification problems: the outcome is
//! reported in the body with a 200 so the host's save proceeds regardless.

use axum::extract::State;
use axum::Json;
use event_notifier_core::EventRecord;
use event_notifier_events::DispatchOutcome;

use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/hooks/content-created
///
/// Body is the created record, or `null` when the host has none.
pub async fn content_created(
    State(state): State<AppState>,
    Json(record): Json<Option<EventRecord>>,
) -> Json<DataResponse<DispatchOutcome>> {
    let outcome = state.dispatcher.on_created(record.as_ref()).await;

    Json(DataResponse { data: outcome })
}

/// POST /api/v1/hooks/content-updated
///
/// Body is the updated record with `previous_state` attached.
pub async fn content_updated(
    State(state): State<AppState>,
    Json(record): Json<EventRecord>,
) -> Json<DataResponse<DispatchOutcome>> {
    let outcome = state.dispatcher.on_updated(&record).await;

    Json(DataResponse { data: outcome })
}
