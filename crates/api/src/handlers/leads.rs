//! Handlers for the `/leads` resource.
//!
//! Reads go through the shared [`QueryCache`](crate::cache::QueryCache) keyed
//! by the caller's [`LeadScope`]. Every successful write drops the cached lead
//! lists; a failed write leaves them alone.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use leadtrack_core::activity::{planned_activities, LeadChange};
use leadtrack_core::error::CoreError;
use leadtrack_core::lead::{validate_status, LeadFilter, LeadScope};
use leadtrack_core::patch::reject_immutable_fields;
use leadtrack_core::policy::{
    can_bulk_assign, can_create_lead, can_delete_lead, can_reassign_lead, can_update_lead, ensure,
};
use leadtrack_core::types::{DbId, UserId};
use leadtrack_db::models::activity::CreateLeadActivity;
use leadtrack_db::models::lead::{BulkAssign, CreateLead, Lead, LeadListParams, UpdateLead};
use leadtrack_db::repositories::{LeadRepo, ProfileRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, MutationResponse};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DeletedLead {
    pub id: DbId,
}

#[derive(Debug, Serialize)]
pub struct BulkAssignResult {
    pub assigned: u64,
    pub assignee_id: UserId,
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// GET /api/v1/leads
///
/// The caller's visible leads, soonest follow-up first. Optional `search`,
/// `status`, and `unassigned` narrow the list.
pub async fn list_leads(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<LeadListParams>,
) -> AppResult<Json<DataResponse<Vec<Lead>>>> {
    let filter = LeadFilter {
        search: params.search,
        status: params.status,
        unassigned: params.unassigned,
    };
    filter.validate()?;

    let leads = load_scoped_leads(&state, LeadScope::for_session(&user.session())).await?;
    let data = if filter.is_empty() {
        leads.as_ref().clone()
    } else {
        filter.apply(leads.as_slice())
    };

    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/leads/{id}
///
/// A lead outside the caller's scope reads as not found.
pub async fn get_lead(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Lead>>> {
    let lead = find_visible_lead(&state, &user, id).await?;
    Ok(Json(DataResponse { data: lead }))
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

/// POST /api/v1/leads
///
/// Admins and managers only. Status defaults to `new`.
pub async fn create_lead(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateLead>,
) -> AppResult<(StatusCode, Json<MutationResponse<Lead>>)> {
    ensure(
        can_create_lead(&user.session()),
        "Only admins and managers can create leads",
    )?;
    if let Some(status) = &input.status {
        validate_status(status)?;
    }
    if let Some(assignee) = input.assigned_to {
        ensure_assignee_exists(&state, assignee).await?;
    }

    let lead = LeadRepo::create(&state.pool, &input).await?;
    state.cache.invalidate_leads().await;
    tracing::info!(lead_id = lead.id, user_id = %user.user_id, "Lead created");

    Ok((
        StatusCode::CREATED,
        Json(MutationResponse::new(lead, "Lead created successfully")),
    ))
}

/// PATCH /api/v1/leads/{id}
///
/// Partial update. `id` and `created_at` cannot be patched. Status, follow-up,
/// and notes changes are logged as activities in the same transaction.
pub async fn update_lead(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(body): Json<serde_json::Value>,
) -> AppResult<Json<MutationResponse<Lead>>> {
    reject_immutable_fields(&body)?;
    let patch: UpdateLead = serde_json::from_value(body)
        .map_err(|e| AppError::BadRequest(format!("Invalid lead update: {e}")))?;
    if let Some(status) = &patch.status {
        validate_status(status)?;
    }

    let session = user.session();
    let current = find_visible_lead(&state, &user, id).await?;

    ensure(
        can_update_lead(&session, current.assigned_to),
        "You can only update leads assigned to you",
    )?;
    if patch.reassigns(current.assigned_to) {
        ensure(
            can_reassign_lead(&session),
            "Only admins and managers can reassign leads",
        )?;
        if let Some(Some(assignee)) = patch.assigned_to {
            ensure_assignee_exists(&state, assignee).await?;
        }
    }

    let activities = derived_activities(&current, &patch, session.user_id);

    let lead = LeadRepo::update(&state.pool, id, &patch, &activities)
        .await?
        .ok_or_else(|| CoreError::not_found("Lead", id))?;

    state.cache.invalidate_leads().await;
    if !activities.is_empty() {
        state.cache.invalidate_activities(id).await;
    }
    tracing::info!(
        lead_id = id,
        user_id = %user.user_id,
        activities = activities.len(),
        "Lead updated"
    );

    Ok(Json(MutationResponse::new(lead, "Lead updated successfully")))
}

/// DELETE /api/v1/leads/{id}
///
/// Permanent. Admins only.
pub async fn delete_lead(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<MutationResponse<DeletedLead>>> {
    ensure(
        can_delete_lead(&user.session()),
        "Only admins can delete leads",
    )?;

    if !LeadRepo::delete(&state.pool, id).await? {
        return Err(CoreError::not_found("Lead", id).into());
    }

    state.cache.invalidate_leads().await;
    state.cache.invalidate_activities(id).await;
    tracing::info!(lead_id = id, user_id = %user.user_id, "Lead deleted");

    Ok(Json(MutationResponse::new(
        DeletedLead { id },
        "Lead deleted successfully",
    )))
}

/// POST /api/v1/leads/bulk-assign
///
/// Assign every listed lead to one user in a single statement.
pub async fn bulk_assign(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<BulkAssign>,
) -> AppResult<Json<MutationResponse<BulkAssignResult>>> {
    ensure(
        can_bulk_assign(&user.session()),
        "Only admins and managers can assign leads",
    )?;
    if input.lead_ids.is_empty() {
        return Err(CoreError::Validation("Select at least one lead to assign".into()).into());
    }
    ensure_assignee_exists(&state, input.assignee_id).await?;

    let assigned = LeadRepo::bulk_assign(&state.pool, &input.lead_ids, input.assignee_id).await?;
    state.cache.invalidate_leads().await;
    tracing::info!(
        assigned,
        assignee_id = %input.assignee_id,
        user_id = %user.user_id,
        "Leads bulk-assigned"
    );

    Ok(Json(MutationResponse::new(
        BulkAssignResult {
            assigned,
            assignee_id: input.assignee_id,
        },
        assigned_message(assigned),
    )))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Cached lead list for a scope, loading it on a miss.
pub(crate) async fn load_scoped_leads(
    state: &AppState,
    scope: LeadScope,
) -> AppResult<Arc<Vec<Lead>>> {
    if let Some(hit) = state.cache.leads.get(&scope).await {
        return Ok(hit);
    }
    let generation = state.cache.leads.generation();
    let leads = LeadRepo::list(&state.pool, scope).await?;
    Ok(state.cache.leads.insert(generation, scope, leads).await)
}

/// Load a lead the caller may see, or 404.
pub(crate) async fn find_visible_lead(
    state: &AppState,
    user: &AuthUser,
    id: DbId,
) -> AppResult<Lead> {
    let scope = LeadScope::for_session(&user.session());
    LeadRepo::find_scoped(&state.pool, id, scope)
        .await?
        .ok_or_else(|| CoreError::not_found("Lead", id).into())
}

async fn ensure_assignee_exists(state: &AppState, assignee: UserId) -> AppResult<()> {
    if ProfileRepo::exists(&state.pool, assignee).await? {
        Ok(())
    } else {
        Err(CoreError::Validation(format!("Assignee {assignee} does not exist")).into())
    }
}

/// Activities implied by applying `patch` to `current`, stamped with `actor`.
fn derived_activities(current: &Lead, patch: &UpdateLead, actor: UserId) -> Vec<CreateLeadActivity> {
    let change = LeadChange {
        previous_status: &current.status,
        new_status: patch.status.as_deref(),
        previous_followup: current.next_followup_date,
        new_followup: patch.next_followup_date,
        followup_note: match &patch.followup_note {
            Some(note) => note.as_deref(),
            None => current.followup_note.as_deref(),
        },
        previous_notes: current.notes.as_deref(),
        new_notes: patch.notes.as_ref().map(|n| n.as_deref()),
    };

    planned_activities(&change)
        .into_iter()
        .map(|planned| CreateLeadActivity {
            lead_id: current.id,
            activity_type: planned.kind.to_string(),
            activity_text: planned.text,
            created_by: Some(actor),
        })
        .collect()
}

fn assigned_message(count: u64) -> String {
    let noun = if count == 1 { "lead" } else { "leads" };
    format!("{count} {noun} assigned successfully")
}
