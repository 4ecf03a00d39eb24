//! Team performance handler.

use axum::extract::State;
use axum::Json;
use leadtrack_core::performance::{compute_team_stats, SalesmanProfile, SalesmanStats};
use leadtrack_core::policy::{can_view_team_performance, ensure};
use leadtrack_core::roles::ROLE_SALESMAN;
use leadtrack_db::repositories::{LeadRepo, ProfileRepo, UserRoleRepo};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/dashboard/performance
///
/// Per-salesman lead totals, recomputed from every lead on each call.
/// Admins only.
pub async fn team_performance(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<SalesmanStats>>>> {
    ensure(
        can_view_team_performance(&user.session()),
        "Admin role required",
    )?;

    let salesman_ids = UserRoleRepo::list_user_ids_by_role(&state.pool, ROLE_SALESMAN).await?;
    if salesman_ids.is_empty() {
        return Ok(Json(DataResponse { data: Vec::new() }));
    }

    let salesmen: Vec<SalesmanProfile> = ProfileRepo::find_by_ids(&state.pool, &salesman_ids)
        .await?
        .into_iter()
        .map(|p| SalesmanProfile {
            user_id: p.id,
            email: Some(p.email),
            full_name: p.full_name,
        })
        .collect();

    let leads = LeadRepo::list_assignments(&state.pool).await?;
    let stats = compute_team_stats(
        &salesmen,
        leads.iter().map(|l| (l.assigned_to, l.status.as_str())),
    );

    tracing::debug!(salesmen = stats.len(), leads = leads.len(), "Team performance computed");
    Ok(Json(DataResponse { data: stats }))
}
