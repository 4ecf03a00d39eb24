//! Role assignment model and DTOs.

use leadtrack_core::types::{DbId, Timestamp, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `user_roles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserRole {
    pub id: DbId,
    pub user_id: UserId,
    pub role: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for `PUT /users/{id}/role`.
#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: String,
}
