pub mod activities;
pub mod auth;
pub mod dashboard;
pub mod health;
pub mod leads;
pub mod navigation;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/login                      login (public)
/// /auth/refresh                    refresh (public)
/// /auth/logout                     logout
/// /auth/me                         current user
///
/// /leads                           list, create
/// /leads/bulk-assign               bulk assign (POST)
/// /leads/{id}                      get, update (PATCH), delete
/// /leads/{id}/activities           add activity (POST)
///
/// /activities?lead_id=             activity timeline
///
/// /users                           list, create
/// /users/assignable                assignee picker
/// /users/{id}/role                 update role (PUT)
///
/// /dashboard/summary               summary over visible leads
/// /dashboard/performance           team performance (admin)
///
/// /navigation/resolve?path=        route gate (token optional)
/// /navigation/menu                 menu entries for the caller
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/leads", leads::router())
        .nest("/activities", activities::router())
        .nest("/users", users::router())
        .nest("/dashboard", dashboard::router())
        .nest("/navigation", navigation::router())
}
