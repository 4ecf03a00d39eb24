use axum::routing::get;
use axum::Router;

use crate::handlers::navigation;
use crate::state::AppState;

/// Routes mounted at `/navigation`.
///
/// ```text
/// GET /resolve?path=   -> resolve_path (token optional)
/// GET /menu            -> menu
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/resolve", get(navigation::resolve_path))
        .route("/menu", get(navigation::menu))
}
