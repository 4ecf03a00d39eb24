//! Explicit per-request caller context.
//!
//! Every request resolves its own [`Session`] from the bearer token; handlers
//! pass it into policy checks and repository scoping instead of consulting
//! any process-wide "current user".

use crate::roles::{ROLE_ADMIN, ROLE_MANAGER, ROLE_SALESMAN};
use crate::types::UserId;

/// The signed-in identity and its role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: UserId,
    pub role: String,
}

impl Session {
    pub fn new(user_id: UserId, role: impl Into<String>) -> Self {
        Self {
            user_id,
            role: role.into(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }

    pub fn is_manager(&self) -> bool {
        self.role == ROLE_MANAGER
    }

    pub fn is_salesman(&self) -> bool {
        self.role == ROLE_SALESMAN
    }

    /// Admins and managers oversee the whole lead book.
    pub fn is_supervisor(&self) -> bool {
        self.is_admin() || self.is_manager()
    }
}
