use axum::routing::get;
use axum::Router;

use crate::handlers::{dashboard, performance};
use crate::state::AppState;

/// Routes mounted at `/dashboard`.
///
/// ```text
/// GET /summary       -> summary
/// GET /performance   -> team_performance (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/summary", get(dashboard::summary))
        .route("/performance", get(performance::team_performance))
}
