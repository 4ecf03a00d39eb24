//! Repository for the `user_credentials` table.

use leadtrack_core::types::{Timestamp, UserId};
use sqlx::PgPool;

use crate::models::credential::LoginAccount;

/// Credential columns joined with the profile and role.
const LOGIN_COLUMNS: &str = "c.user_id, p.email, p.full_name, c.password_hash, c.is_active, \
                              c.failed_login_count, c.locked_until, c.last_login_at, r.role";

/// Provides lookups and login bookkeeping for credentials.
pub struct CredentialRepo;

impl CredentialRepo {
    /// Find login details by email (case-insensitive).
    pub async fn find_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<LoginAccount>, sqlx::Error> {
        let query = format!(
            "SELECT {LOGIN_COLUMNS} FROM user_credentials c \
             JOIN profiles p ON p.id = c.user_id \
             LEFT JOIN user_roles r ON r.user_id = c.user_id \
             WHERE LOWER(p.email) = LOWER($1)"
        );
        sqlx::query_as::<_, LoginAccount>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Find login details by user ID.
    pub async fn find_by_user_id(
        pool: &PgPool,
        user_id: UserId,
    ) -> Result<Option<LoginAccount>, sqlx::Error> {
        let query = format!(
            "SELECT {LOGIN_COLUMNS} FROM user_credentials c \
             JOIN profiles p ON p.id = c.user_id \
             LEFT JOIN user_roles r ON r.user_id = c.user_id \
             WHERE c.user_id = $1"
        );
        sqlx::query_as::<_, LoginAccount>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Increment the failed login counter by 1.
    pub async fn increment_failed_login(pool: &PgPool, user_id: UserId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE user_credentials SET failed_login_count = failed_login_count + 1 \
             WHERE user_id = $1",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Lock an account until the specified timestamp.
    pub async fn lock_account(
        pool: &PgPool,
        user_id: UserId,
        until: Timestamp,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE user_credentials SET locked_until = $2 WHERE user_id = $1")
            .bind(user_id)
            .bind(until)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Reset the failure counter, clear any lock, and stamp `last_login_at`.
    pub async fn record_successful_login(
        pool: &PgPool,
        user_id: UserId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE user_credentials SET \
                 failed_login_count = 0, \
                 locked_until = NULL, \
                 last_login_at = NOW() \
             WHERE user_id = $1",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(())
    }
}
