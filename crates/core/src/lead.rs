//! Lead lifecycle constants, visibility scoping, and list filtering.
//!
//! The canonical lifecycle is `new -> contacted -> qualified -> converted | lost`.
//! Status is free to move between any two values (last write wins); only the
//! value itself is validated.

use crate::error::CoreError;
use crate::session::Session;
use crate::types::UserId;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

pub const STATUS_NEW: &str = "new";
pub const STATUS_CONTACTED: &str = "contacted";
pub const STATUS_QUALIFIED: &str = "qualified";
pub const STATUS_CONVERTED: &str = "converted";
pub const STATUS_LOST: &str = "lost";

/// All valid statuses in lifecycle order.
pub const LEAD_STATUSES: &[&str] = &[
    STATUS_NEW,
    STATUS_CONTACTED,
    STATUS_QUALIFIED,
    STATUS_CONVERTED,
    STATUS_LOST,
];

/// Status assigned by the store when a lead is created without one.
pub const DEFAULT_STATUS: &str = STATUS_NEW;

/// Validate that a status string is part of the lifecycle.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if LEAD_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid lead status '{status}'. Must be one of: {}",
            LEAD_STATUSES.join(", ")
        )))
    }
}

// ---------------------------------------------------------------------------
// Visibility
// ---------------------------------------------------------------------------

/// Which leads a caller may read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeadScope {
    /// Every lead in the book.
    All,
    /// Only leads whose `assigned_to` equals the given user.
    AssignedTo(UserId),
}

impl LeadScope {
    /// Salesmen see their own assignments; every other role sees everything.
    pub fn for_session(session: &Session) -> Self {
        if session.is_salesman() {
            LeadScope::AssignedTo(session.user_id)
        } else {
            LeadScope::All
        }
    }

    /// Whether a lead with the given assignee falls inside this scope.
    pub fn includes(&self, assigned_to: Option<UserId>) -> bool {
        match self {
            LeadScope::All => true,
            LeadScope::AssignedTo(user_id) => assigned_to == Some(*user_id),
        }
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Read access to the lead fields the filters and summaries look at.
pub trait LeadFields {
    fn full_name(&self) -> Option<&str>;
    fn phone_number(&self) -> Option<&str>;
    fn bike_model(&self) -> Option<&str>;
    fn status(&self) -> &str;
    fn assigned_to(&self) -> Option<UserId>;
}

/// Table filters applied on top of the scoped list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadFilter {
    /// Case-insensitive match on name or bike model; substring match on phone.
    pub search: Option<String>,
    /// Exact status match.
    pub status: Option<String>,
    /// Only leads without an assignee.
    pub unassigned: bool,
}

impl LeadFilter {
    /// Validate the filter values before use.
    pub fn validate(&self) -> Result<(), CoreError> {
        if let Some(status) = &self.status {
            validate_status(status)?;
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.search.as_deref().map_or(true, |s| s.trim().is_empty())
            && self.status.is_none()
            && !self.unassigned
    }

    pub fn matches<L: LeadFields>(&self, lead: &L) -> bool {
        if self.unassigned && lead.assigned_to().is_some() {
            return false;
        }
        if let Some(status) = &self.status {
            if lead.status() != status {
                return false;
            }
        }
        match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(term) => matches_search(lead, term),
        }
    }

    /// Keep only the leads matching this filter, preserving order.
    pub fn apply<L: LeadFields + Clone>(&self, leads: &[L]) -> Vec<L> {
        leads.iter().filter(|l| self.matches(*l)).cloned().collect()
    }
}

fn matches_search<L: LeadFields>(lead: &L, term: &str) -> bool {
    let needle = term.to_lowercase();
    let contains_ci = |value: Option<&str>| {
        value.is_some_and(|v| v.to_lowercase().contains(&needle))
    };
    contains_ci(lead.full_name())
        || lead.phone_number().is_some_and(|p| p.contains(term))
        || contains_ci(lead.bike_model())
}
