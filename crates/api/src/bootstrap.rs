//! First-run administrator seeding.
//!
//! Accounts are only provisioned by admins, so an empty database needs one
//! admin to start from. When `BOOTSTRAP_ADMIN_EMAIL` and
//! `BOOTSTRAP_ADMIN_PASSWORD` are set and no admin exists yet, one is created
//! at startup.

use leadtrack_core::roles::ROLE_ADMIN;
use leadtrack_core::validation::NewUser;
use leadtrack_db::models::profile::CreateProfile;
use leadtrack_db::repositories::{ProfileRepo, UserRoleRepo};
use leadtrack_db::DbPool;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};

/// Credentials for the seeded administrator.
#[derive(Debug, Clone)]
pub struct BootstrapAdmin {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

impl BootstrapAdmin {
    /// Read the bootstrap credentials; `None` unless both email and password are set.
    ///
    /// | Env Var                    | Default         |
    /// |----------------------------|-----------------|
    /// | `BOOTSTRAP_ADMIN_EMAIL`    | --              |
    /// | `BOOTSTRAP_ADMIN_PASSWORD` | --              |
    /// | `BOOTSTRAP_ADMIN_NAME`     | `Administrator` |
    pub fn from_env() -> Option<Self> {
        let email = std::env::var("BOOTSTRAP_ADMIN_EMAIL").ok()?;
        let password = std::env::var("BOOTSTRAP_ADMIN_PASSWORD").ok()?;
        let full_name =
            std::env::var("BOOTSTRAP_ADMIN_NAME").unwrap_or_else(|_| "Administrator".into());
        Some(Self {
            email,
            password,
            full_name,
        })
    }

    fn as_new_user(&self) -> NewUser {
        NewUser {
            email: self.email.clone(),
            password: self.password.clone(),
            confirm_password: None,
            full_name: self.full_name.clone(),
            role: ROLE_ADMIN.to_string(),
        }
    }
}

/// Create the bootstrap admin unless an admin already exists.
///
/// Returns `true` when an account was created.
pub async fn seed_admin(pool: &DbPool, admin: &BootstrapAdmin) -> AppResult<bool> {
    if UserRoleRepo::count_by_role(pool, ROLE_ADMIN).await? > 0 {
        tracing::debug!("Admin already present, skipping bootstrap");
        return Ok(false);
    }

    let input = admin.as_new_user();
    input.check()?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let created = ProfileRepo::create_with_credentials(
        pool,
        &CreateProfile {
            email: input.normalized_email(),
            full_name: Some(input.full_name.clone()),
            password_hash,
            role: ROLE_ADMIN.to_string(),
        },
    )
    .await?;

    tracing::info!(user_id = %created.id, email = %created.email, "Bootstrap admin created");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use leadtrack_core::error::CoreError;

    #[test]
    fn bootstrap_credentials_are_validated_like_any_account() {
        let admin = BootstrapAdmin {
            email: "not-an-email".into(),
            password: "123".into(),
            full_name: "Administrator".into(),
        };

        let err = admin.as_new_user().check().unwrap_err();
        assert_matches!(err, CoreError::FieldValidation(ref fields)
            if fields.contains_key("email") && fields.contains_key("password"));
    }
}
