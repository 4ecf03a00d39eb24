use axum::extract::State;
use axum::Json;
use leadtrack_core::dashboard::{summarize, DashboardSummary};
use leadtrack_core::lead::LeadScope;

use crate::error::AppResult;
use crate::handlers::leads::load_scoped_leads;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/dashboard/summary
///
/// Cards and chart data over the caller's visible leads.
pub async fn summary(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<DashboardSummary>>> {
    let leads = load_scoped_leads(&state, LeadScope::for_session(&user.session())).await?;
    Ok(Json(DataResponse {
        data: summarize(leads.as_slice()),
    }))
}
