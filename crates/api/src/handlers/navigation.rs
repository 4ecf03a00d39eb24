//! Handlers exposing the role-gated route table.

use axum::extract::Query;
use axum::Json;
use leadtrack_core::navigation::{menu_for, resolve, MenuEntry, RouteDecision};
use serde::Deserialize;

use crate::middleware::auth::{AuthUser, OptionalAuthUser};
use crate::response::DataResponse;

#[derive(Debug, Deserialize)]
pub struct ResolveParams {
    pub path: String,
}

/// GET /api/v1/navigation/resolve?path=
///
/// Render, redirect, or not-found for `path`. The token is optional; without
/// one the caller is treated as signed out.
pub async fn resolve_path(
    OptionalAuthUser(user): OptionalAuthUser,
    Query(params): Query<ResolveParams>,
) -> Json<DataResponse<RouteDecision>> {
    let role = user.as_ref().map(|u| u.role.as_str());
    Json(DataResponse {
        data: resolve(&params.path, role),
    })
}

/// GET /api/v1/navigation/menu
pub async fn menu(user: AuthUser) -> Json<DataResponse<Vec<MenuEntry>>> {
    Json(DataResponse {
        data: menu_for(&user.role),
    })
}
