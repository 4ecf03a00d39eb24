//! JWT-based authentication extractors for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use leadtrack_core::error::CoreError;
use leadtrack_core::session::Session;
use leadtrack_core::types::UserId;

use crate::auth::jwt::verify_access_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from a JWT Bearer token in the `Authorization` header.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     let session = user.session();
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: UserId,
    /// Role name from the token (e.g. `"admin"`, `"salesman"`).
    pub role: String,
}

impl AuthUser {
    /// The explicit per-request context passed to policy and scoping.
    pub fn session(&self) -> Session {
        Session::new(self.user_id, self.role.clone())
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let session = verify_access_token(token, &state.config.jwt).map_err(|e| {
            tracing::debug!(error = %e, "Access token rejected");
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        let span = tracing::Span::current();
        span.record("user_id", tracing::field::display(session.user_id));
        span.record("role", session.role.as_str());

        Ok(AuthUser {
            user_id: session.user_id,
            role: session.role,
        })
    }
}

/// The caller when a valid Bearer token is present, `None` otherwise.
///
/// Never rejects; an invalid token reads as anonymous.
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<AuthUser>);

impl FromRequestParts<AppState> for OptionalAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(OptionalAuthUser(
            AuthUser::from_request_parts(parts, state).await.ok(),
        ))
    }
}
