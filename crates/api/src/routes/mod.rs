pub mod health;
pub mod hooks;
pub mod settings;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /settings                  settings form (GET schema, PUT submit)
/// /hooks/content-created     lifecycle hook
/// /hooks/content-updated     lifecycle hook
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/settings", settings::router())
        .nest("/hooks", hooks::router())
}
