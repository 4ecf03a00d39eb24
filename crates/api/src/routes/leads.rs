//! Route definitions for the `/leads` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{activities, leads};
use crate::state::AppState;

/// Routes mounted at `/leads`.
///
/// ```text
/// GET    /                  -> list_leads
/// POST   /                  -> create_lead
/// POST   /bulk-assign       -> bulk_assign
/// GET    /{id}              -> get_lead
/// PATCH  /{id}              -> update_lead
/// DELETE /{id}              -> delete_lead
/// POST   /{id}/activities   -> add_activity
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(leads::list_leads).post(leads::create_lead))
        .route("/bulk-assign", post(leads::bulk_assign))
        .route(
            "/{id}",
            get(leads::get_lead)
                .patch(leads::update_lead)
                .delete(leads::delete_lead),
        )
        .route("/{id}/activities", post(activities::add_activity))
}
