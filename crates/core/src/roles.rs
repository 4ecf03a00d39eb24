//! Well-known role name constants.
//!
//! These must match the CHECK constraint on `user_roles.role`.

use crate::error::CoreError;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_MANAGER: &str = "manager";
pub const ROLE_SALESMAN: &str = "salesman";
pub const ROLE_USER: &str = "user";

/// All valid role names.
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_MANAGER, ROLE_SALESMAN, ROLE_USER];

/// Effective role of a profile that has no `user_roles` row.
pub const DEFAULT_ROLE: &str = ROLE_USER;

/// Validate that a role string is one of the accepted values.
pub fn validate_role(role: &str) -> Result<(), CoreError> {
    if VALID_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid role '{role}'. Must be one of: {}",
            VALID_ROLES.join(", ")
        )))
    }
}

/// Resolve the effective role for a profile whose role row may be missing.
pub fn effective_role(role: Option<&str>) -> &str {
    role.unwrap_or(DEFAULT_ROLE)
}

/// Roles that may receive lead assignments.
pub const ASSIGNABLE_ROLES: &[&str] = &[ROLE_SALESMAN, ROLE_ADMIN];
