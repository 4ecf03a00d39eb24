//! Repository for the `user_roles` table.

use leadtrack_core::types::UserId;
use sqlx::PgPool;

use crate::models::role::UserRole;

const COLUMNS: &str = "id, user_id, role, created_at, updated_at";

/// Provides role lookups and assignment.
pub struct UserRoleRepo;

impl UserRoleRepo {
    /// Set a user's role, inserting the row if missing. Idempotent.
    pub async fn upsert(pool: &PgPool, user_id: UserId, role: &str) -> Result<UserRole, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_roles (user_id, role) VALUES ($1, $2) \
             ON CONFLICT (user_id) DO UPDATE SET role = EXCLUDED.role \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserRole>(&query)
            .bind(user_id)
            .bind(role)
            .fetch_one(pool)
            .await
    }

    /// IDs of every user holding `role`.
    pub async fn list_user_ids_by_role(
        pool: &PgPool,
        role: &str,
    ) -> Result<Vec<UserId>, sqlx::Error> {
        sqlx::query_scalar::<_, UserId>("SELECT user_id FROM user_roles WHERE role = $1 ORDER BY id")
            .bind(role)
            .fetch_all(pool)
            .await
    }

    /// Number of users holding `role`.
    pub async fn count_by_role(pool: &PgPool, role: &str) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM user_roles WHERE role = $1")
            .bind(role)
            .fetch_one(pool)
            .await
    }
}
