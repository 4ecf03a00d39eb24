//! Authorization rules for lead and user operations.
//!
//! These checks run server-side on every mutation; client-side route gating
//! in [`crate::navigation`] is only a convenience.

use crate::error::CoreError;
use crate::session::Session;
use crate::types::UserId;

/// Admins and managers create leads.
pub fn can_create_lead(session: &Session) -> bool {
    session.is_supervisor()
}

/// Supervisors may edit any lead; everyone else only their own assignments.
pub fn can_update_lead(session: &Session, assigned_to: Option<UserId>) -> bool {
    session.is_supervisor() || assigned_to == Some(session.user_id)
}

/// Changing the assignee is a supervisor action.
pub fn can_reassign_lead(session: &Session) -> bool {
    session.is_supervisor()
}

/// Deletion is permanent and reserved for admins.
pub fn can_delete_lead(session: &Session) -> bool {
    session.is_admin()
}

pub fn can_bulk_assign(session: &Session) -> bool {
    session.is_supervisor()
}

/// Listing users, changing roles, and provisioning accounts.
pub fn can_manage_users(session: &Session) -> bool {
    session.is_admin()
}

pub fn can_view_team_performance(session: &Session) -> bool {
    session.is_admin()
}

/// Reading the assignee picker (salesmen and admins).
pub fn can_list_assignees(session: &Session) -> bool {
    session.is_supervisor()
}

/// Turn a failed check into a [`CoreError::Forbidden`].
pub fn ensure(allowed: bool, message: &str) -> Result<(), CoreError> {
    if allowed {
        Ok(())
    } else {
        Err(CoreError::Forbidden(message.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::{ROLE_ADMIN, ROLE_MANAGER, ROLE_SALESMAN, ROLE_USER};
    use uuid::Uuid;

    fn session(role: &str) -> Session {
        Session::new(Uuid::new_v4(), role)
    }

    #[test]
    fn test_only_admin_deletes() {
        assert!(can_delete_lead(&session(ROLE_ADMIN)));
        assert!(!can_delete_lead(&session(ROLE_MANAGER)));
        assert!(!can_delete_lead(&session(ROLE_SALESMAN)));
        assert!(!can_delete_lead(&session(ROLE_USER)));
    }

    #[test]
    fn test_salesman_updates_only_own_leads() {
        let me = session(ROLE_SALESMAN);
        assert!(can_update_lead(&me, Some(me.user_id)));
        assert!(!can_update_lead(&me, Some(Uuid::new_v4())));
        assert!(!can_update_lead(&me, None));
        assert!(!can_reassign_lead(&me));
    }

    #[test]
    fn test_supervisors_update_and_assign_anything() {
        for role in [ROLE_ADMIN, ROLE_MANAGER] {
            let s = session(role);
            assert!(can_update_lead(&s, None));
            assert!(can_update_lead(&s, Some(Uuid::new_v4())));
            assert!(can_bulk_assign(&s));
            assert!(can_create_lead(&s));
        }
    }

    #[test]
    fn test_plain_user_cannot_mutate() {
        let s = session(ROLE_USER);
        assert!(!can_create_lead(&s));
        assert!(!can_bulk_assign(&s));
        assert!(!can_update_lead(&s, None));
    }

    #[test]
    fn test_user_management_is_admin_only() {
        assert!(can_manage_users(&session(ROLE_ADMIN)));
        assert!(!can_manage_users(&session(ROLE_MANAGER)));
        assert!(can_view_team_performance(&session(ROLE_ADMIN)));
        assert!(!can_view_team_performance(&session(ROLE_SALESMAN)));
    }

    #[test]
    fn test_ensure_maps_to_forbidden() {
        assert!(ensure(true, "nope").is_ok());
        let err = ensure(false, "Admin role required").unwrap_err();
        assert_eq!(err.to_string(), "Forbidden: Admin role required");
    }
}
