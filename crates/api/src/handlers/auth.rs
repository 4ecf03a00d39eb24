//! Handlers for the `/auth` resource (login, refresh, logout, me).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use leadtrack_core::error::CoreError;
use leadtrack_core::navigation::default_dashboard;
use leadtrack_core::roles::effective_role;
use leadtrack_core::session::Session;
use leadtrack_core::types::UserId;
use leadtrack_db::models::credential::LoginAccount;
use leadtrack_db::models::profile::UserResponse;
use leadtrack_db::models::session::CreateSession;
use leadtrack_db::repositories::{CredentialRepo, ProfileRepo, SessionRepo};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::{hash_refresh_token, issue_access_token, RefreshToken};
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Consecutive failed logins before the account is locked.
const MAX_FAILED_ATTEMPTS: i32 = 5;

/// Lock duration after too many failed logins.
const LOCK_DURATION_MINS: i64 = 15;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Returned by login and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserInfo,
}

#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: UserId,
    pub email: String,
    pub full_name: Option<String>,
    pub role: String,
    /// Where the client should land after sign-in.
    pub default_path: &'static str,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Authenticate with email + password. Returns access and refresh tokens.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let account = CredentialRepo::find_by_email(&state.pool, input.email.trim())
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized(INVALID_CREDENTIALS.into())))?;

    ensure_can_sign_in(&account)?;

    let password_valid = verify_password(&input.password, &account.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        CredentialRepo::increment_failed_login(&state.pool, account.user_id).await?;

        if account.failed_login_count + 1 >= MAX_FAILED_ATTEMPTS {
            let lock_until = Utc::now() + chrono::Duration::minutes(LOCK_DURATION_MINS);
            CredentialRepo::lock_account(&state.pool, account.user_id, lock_until).await?;
            tracing::warn!(user_id = %account.user_id, "Account locked after repeated failed logins");
        }

        return Err(AppError::Core(CoreError::Unauthorized(
            INVALID_CREDENTIALS.into(),
        )));
    }

    CredentialRepo::record_successful_login(&state.pool, account.user_id).await?;
    tracing::info!(user_id = %account.user_id, "User signed in");

    let response = create_auth_response(&state, &account).await?;
    Ok(Json(response))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a valid refresh token for a new token pair. The old one is revoked.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    let token_hash = hash_refresh_token(&input.refresh_token);

    let session = SessionRepo::find_active_by_hash(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    SessionRepo::revoke(&state.pool, session.id).await?;

    let account = CredentialRepo::find_by_user_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    if !account.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    let response = create_auth_response(&state, &account).await?;
    Ok(Json(response))
}

/// POST /api/v1/auth/logout
///
/// Revoke every session of the caller. Returns 204 No Content.
pub async fn logout(State(state): State<AppState>, auth_user: AuthUser) -> AppResult<StatusCode> {
    let revoked = SessionRepo::revoke_all_for_user(&state.pool, auth_user.user_id).await?;
    tracing::info!(user_id = %auth_user.user_id, revoked, "User signed out");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/auth/me
///
/// The caller's profile with the role currently stored for them.
pub async fn me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = ProfileRepo::find_with_role(&state.pool, auth_user.user_id)
        .await?
        .ok_or_else(|| CoreError::not_found("User", auth_user.user_id))?;

    Ok(Json(DataResponse { data: user.into() }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn ensure_can_sign_in(account: &LoginAccount) -> AppResult<()> {
    if !account.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }
    if let Some(locked_until) = account.locked_until {
        if locked_until > Utc::now() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Account is temporarily locked. Try again later.".into(),
            )));
        }
    }
    Ok(())
}

/// Issue a token pair, persist the refresh session, and build the response.
async fn create_auth_response(state: &AppState, account: &LoginAccount) -> AppResult<AuthResponse> {
    let role = effective_role(account.role.as_deref());

    let session = Session::new(account.user_id, role);

    let access_token = issue_access_token(&session, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let refresh = RefreshToken::issue(&state.config.jwt);

    SessionRepo::create(
        &state.pool,
        &CreateSession {
            user_id: account.user_id,
            refresh_token_hash: refresh.hash,
            expires_at: refresh.expires_at,
            user_agent: None,
            ip_address: None,
        },
    )
    .await?;

    Ok(AuthResponse {
        access_token,
        refresh_token: refresh.plaintext,
        expires_in: state.config.jwt.access_ttl().num_seconds(),
        user: UserInfo {
            id: account.user_id,
            email: account.email.clone(),
            full_name: account.full_name.clone(),
            role: role.to_string(),
            default_path: default_dashboard(role),
        },
    })
}
