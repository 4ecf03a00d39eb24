//! Handlers for the `/users` resource (listing, roles, provisioning).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use leadtrack_core::error::CoreError;
use leadtrack_core::policy::{can_list_assignees, can_manage_users, ensure};
use leadtrack_core::roles::{validate_role, ASSIGNABLE_ROLES};
use leadtrack_core::types::UserId;
use leadtrack_core::validation::NewUser;
use leadtrack_db::models::profile::{CreateProfile, UserResponse};
use leadtrack_db::models::role::{UpdateRoleRequest, UserRole};
use leadtrack_db::repositories::{ProfileRepo, UserRoleRepo};

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, MutationResponse};
use crate::state::AppState;

/// GET /api/v1/users
///
/// Every profile, newest first. Profiles without a role row report `user`.
pub async fn list_users(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    ensure(can_manage_users(&user.session()), "Admin role required")?;

    let users = ProfileRepo::list_with_roles(&state.pool).await?;
    Ok(Json(DataResponse {
        data: users.into_iter().map(UserResponse::from).collect(),
    }))
}

/// GET /api/v1/users/assignable
///
/// Salesmen and admins, for the assignee picker.
pub async fn list_assignable(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    ensure(
        can_list_assignees(&user.session()),
        "Admin or Manager role required",
    )?;

    let users = ProfileRepo::list_by_roles(&state.pool, ASSIGNABLE_ROLES).await?;
    Ok(Json(DataResponse {
        data: users.into_iter().map(UserResponse::from).collect(),
    }))
}

/// PUT /api/v1/users/{id}/role
///
/// Insert or replace the user's role row.
pub async fn update_role(
    State(state): State<AppState>,
    user: AuthUser,
    Path(user_id): Path<UserId>,
    Json(input): Json<UpdateRoleRequest>,
) -> AppResult<Json<MutationResponse<UserRole>>> {
    ensure(can_manage_users(&user.session()), "Admin role required")?;
    validate_role(&input.role)?;

    if !ProfileRepo::exists(&state.pool, user_id).await? {
        return Err(CoreError::not_found("User", user_id).into());
    }

    let role = UserRoleRepo::upsert(&state.pool, user_id, &input.role).await?;
    tracing::info!(
        target_user = %user_id,
        role = %role.role,
        changed_by = %user.user_id,
        "Role updated"
    );

    Ok(Json(MutationResponse::new(role, "Role updated successfully")))
}

/// POST /api/v1/users
///
/// Provision an account: profile, credentials, and role in one transaction.
/// Checks run in order: session, admin role, field validation, then storage.
pub async fn create_user(
    State(state): State<AppState>,
    caller: Result<AuthUser, AppError>,
    Json(input): Json<NewUser>,
) -> AppResult<(StatusCode, Json<MutationResponse<UserResponse>>)> {
    let caller = caller.map_err(|_| {
        AppError::Core(CoreError::Unauthorized(
            "You must be logged in to create users".into(),
        ))
    })?;
    ensure(
        can_manage_users(&caller.session()),
        "Only admins can create users",
    )?;
    input.check()?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let created = ProfileRepo::create_with_credentials(
        &state.pool,
        &CreateProfile {
            email: input.normalized_email(),
            full_name: Some(input.full_name.trim().to_string()),
            password_hash,
            role: input.role.clone(),
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(MutationResponse::new(
            UserResponse::from(created),
            "User created successfully",
        )),
    ))
}
