//! Repository for the `profiles` table and user provisioning.

use leadtrack_core::types::UserId;
use sqlx::PgPool;

use crate::models::profile::{CreateProfile, Profile, UserWithRole};

const COLUMNS: &str = "id, email, full_name, avatar_url, created_at, updated_at";

/// Profile columns plus the role, for queries joining `user_roles`.
const WITH_ROLE_COLUMNS: &str = "p.id, p.email, p.full_name, p.avatar_url, p.created_at, r.role";

/// Provides read operations for profiles and transactional user creation.
pub struct ProfileRepo;

impl ProfileRepo {
    /// Find a profile by ID together with its role.
    pub async fn find_with_role(
        pool: &PgPool,
        id: UserId,
    ) -> Result<Option<UserWithRole>, sqlx::Error> {
        let query = format!(
            "SELECT {WITH_ROLE_COLUMNS} FROM profiles p \
             LEFT JOIN user_roles r ON r.user_id = p.id \
             WHERE p.id = $1"
        );
        sqlx::query_as::<_, UserWithRole>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether a profile with this ID exists.
    pub async fn exists(pool: &PgPool, id: UserId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM profiles WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Every profile, newest first, with its role (if any).
    pub async fn list_with_roles(pool: &PgPool) -> Result<Vec<UserWithRole>, sqlx::Error> {
        let query = format!(
            "SELECT {WITH_ROLE_COLUMNS} FROM profiles p \
             LEFT JOIN user_roles r ON r.user_id = p.id \
             ORDER BY p.created_at DESC"
        );
        sqlx::query_as::<_, UserWithRole>(&query)
            .fetch_all(pool)
            .await
    }

    /// Profiles holding one of `roles`, ordered by name then email.
    pub async fn list_by_roles(
        pool: &PgPool,
        roles: &[&str],
    ) -> Result<Vec<UserWithRole>, sqlx::Error> {
        let query = format!(
            "SELECT {WITH_ROLE_COLUMNS} FROM profiles p \
             JOIN user_roles r ON r.user_id = p.id \
             WHERE r.role = ANY($1) \
             ORDER BY p.full_name ASC NULLS LAST, p.email ASC"
        );
        sqlx::query_as::<_, UserWithRole>(&query)
            .bind(roles)
            .fetch_all(pool)
            .await
    }

    /// Profiles for the given IDs, ordered by email. Unknown IDs are skipped.
    pub async fn find_by_ids(pool: &PgPool, ids: &[UserId]) -> Result<Vec<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE id = ANY($1) ORDER BY email");
        sqlx::query_as::<_, Profile>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// Create a profile, its credentials, and its role row in one transaction.
    ///
    /// A duplicate email fails on `uq_profiles_email` and nothing is written.
    pub async fn create_with_credentials(
        pool: &PgPool,
        input: &CreateProfile,
    ) -> Result<UserWithRole, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO profiles (email, full_name) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        let profile = sqlx::query_as::<_, Profile>(&query)
            .bind(&input.email)
            .bind(&input.full_name)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("INSERT INTO user_credentials (user_id, password_hash) VALUES ($1, $2)")
            .bind(profile.id)
            .bind(&input.password_hash)
            .execute(&mut *tx)
            .await?;

        sqlx::query("INSERT INTO user_roles (user_id, role) VALUES ($1, $2)")
            .bind(profile.id)
            .bind(&input.role)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(user_id = %profile.id, role = %input.role, "User provisioned");

        Ok(UserWithRole {
            id: profile.id,
            email: profile.email,
            full_name: profile.full_name,
            avatar_url: profile.avatar_url,
            created_at: profile.created_at,
            role: Some(input.role.clone()),
        })
    }
}
