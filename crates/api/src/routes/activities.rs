use axum::routing::get;
use axum::Router;

use crate::handlers::activities;
use crate::state::AppState;

/// Routes mounted at `/activities`.
///
/// ```text
/// GET /?lead_id=   -> list_activities
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(activities::list_activities))
}
