//! Route definitions for the `/hooks` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::hooks;
use crate::state::AppState;

/// Routes mounted at `/hooks`.
///
/// ```text
/// POST   /content-created   -> content_created
/// POST   /content-updated   -> content_updated
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/content-created", post(hooks::content_created))
        .route("/content-updated", post(hooks::content_updated))
}
