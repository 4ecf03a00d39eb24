//! User profile models and DTOs.

use leadtrack_core::roles::effective_role;
use leadtrack_core::types::{Timestamp, UserId};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `profiles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Profile {
    pub id: UserId,
    pub email: String,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Profile left-joined with its `user_roles` row.
///
/// `role` is `None` when the profile has no role row; see
/// [`UserWithRole::effective_role`].
#[derive(Debug, Clone, FromRow)]
pub struct UserWithRole {
    pub id: UserId,
    pub email: String,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: Timestamp,
    pub role: Option<String>,
}

impl UserWithRole {
    pub fn effective_role(&self) -> &str {
        effective_role(self.role.as_deref())
    }
}

/// API representation of a user with the resolved role.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub email: String,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub role: String,
    pub created_at: Timestamp,
}

impl From<UserWithRole> for UserResponse {
    fn from(user: UserWithRole) -> Self {
        let role = user.effective_role().to_string();
        Self {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            avatar_url: user.avatar_url,
            role,
            created_at: user.created_at,
        }
    }
}

/// DTO for provisioning a user: profile, credentials, and role in one go.
#[derive(Debug, Clone)]
pub struct CreateProfile {
    pub email: String,
    pub full_name: Option<String>,
    pub password_hash: String,
    pub role: String,
}
