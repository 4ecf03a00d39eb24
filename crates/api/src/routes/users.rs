//! Route definitions for the `/users` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET  /             -> list_users (admin)
/// POST /             -> create_user (admin)
/// GET  /assignable   -> list_assignable (admin, manager)
/// PUT  /{id}/role    -> update_role (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list_users).post(users::create_user))
        .route("/assignable", get(users::list_assignable))
        .route("/{id}/role", put(users::update_role))
}
