//! Login credential model.

use leadtrack_core::types::{Timestamp, UserId};
use sqlx::FromRow;

/// A row from `user_credentials` joined with the profile email and role.
///
/// Contains the password hash -- never serialize this.
#[derive(Debug, Clone, FromRow)]
pub struct LoginAccount {
    pub user_id: UserId,
    pub email: String,
    pub full_name: Option<String>,
    pub password_hash: String,
    pub is_active: bool,
    pub failed_login_count: i32,
    pub locked_until: Option<Timestamp>,
    pub last_login_at: Option<Timestamp>,
    pub role: Option<String>,
}
