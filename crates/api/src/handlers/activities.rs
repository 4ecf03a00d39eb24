//! Handlers for lead activity timelines.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use leadtrack_core::activity::{validate_activity_text, validate_activity_type};
use leadtrack_core::policy::{can_update_lead, ensure};
use leadtrack_core::types::{DbId, Timestamp, UserId};
use leadtrack_db::models::activity::{
    ActivityListParams, AddActivityRequest, CreateLeadActivity, LeadActivity,
    LeadActivityWithCreator,
};
use leadtrack_db::repositories::LeadActivityRepo;
use serde::Serialize;

use crate::error::AppResult;
use crate::handlers::leads::find_visible_lead;
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, MutationResponse};
use crate::state::AppState;

/// One timeline entry with the creator resolved to a display name.
#[derive(Debug, Clone, Serialize)]
pub struct ActivityEntry {
    pub id: uuid::Uuid,
    pub lead_id: DbId,
    pub activity_type: String,
    pub activity_text: String,
    pub created_by: Option<UserId>,
    pub created_by_name: String,
    pub created_at: Timestamp,
}

impl From<&LeadActivityWithCreator> for ActivityEntry {
    fn from(row: &LeadActivityWithCreator) -> Self {
        Self {
            id: row.id,
            lead_id: row.lead_id,
            activity_type: row.activity_type.clone(),
            activity_text: row.activity_text.clone(),
            created_by: row.created_by,
            created_by_name: row.creator_name(),
            created_at: row.created_at,
        }
    }
}

/// GET /api/v1/activities?lead_id=
///
/// Newest first. Without `lead_id` the list is empty and nothing is queried.
pub async fn list_activities(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<ActivityListParams>,
) -> AppResult<Json<DataResponse<Vec<ActivityEntry>>>> {
    let Some(lead_id) = params.lead_id else {
        return Ok(Json(DataResponse { data: Vec::new() }));
    };

    find_visible_lead(&state, &user, lead_id).await?;

    let rows = match state.cache.activities.get(&lead_id).await {
        Some(hit) => hit,
        None => {
            let generation = state.cache.activities.generation();
            let rows = LeadActivityRepo::list_for_lead(&state.pool, lead_id).await?;
            state.cache.activities.insert(generation, lead_id, rows).await
        }
    };

    Ok(Json(DataResponse {
        data: rows.iter().map(ActivityEntry::from).collect(),
    }))
}

/// POST /api/v1/leads/{id}/activities
///
/// Append a manual entry. The caller must be allowed to edit the lead.
pub async fn add_activity(
    State(state): State<AppState>,
    user: AuthUser,
    Path(lead_id): Path<DbId>,
    Json(input): Json<AddActivityRequest>,
) -> AppResult<(StatusCode, Json<MutationResponse<LeadActivity>>)> {
    validate_activity_type(&input.activity_type)?;
    validate_activity_text(&input.activity_text)?;

    let session = user.session();
    let lead = find_visible_lead(&state, &user, lead_id).await?;
    ensure(
        can_update_lead(&session, lead.assigned_to),
        "You can only add activities to leads assigned to you",
    )?;

    let activity = LeadActivityRepo::create(
        &state.pool,
        &CreateLeadActivity {
            lead_id,
            activity_type: input.activity_type,
            activity_text: input.activity_text.trim().to_string(),
            created_by: Some(session.user_id),
        },
    )
    .await?;

    state.cache.invalidate_activities(lead_id).await;
    tracing::info!(lead_id, activity_id = %activity.id, "Activity added");

    Ok((
        StatusCode::CREATED,
        Json(MutationResponse::new(activity, "Activity added successfully")),
    ))
}
