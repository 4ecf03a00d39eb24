//! Lead entity model and DTOs.

use leadtrack_core::lead::LeadFields;
use leadtrack_core::patch::deserialize_some;
use leadtrack_core::types::{Date, DbId, Timestamp, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `leads` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Lead {
    pub id: DbId,
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
    pub post_code: Option<String>,
    pub bike_model: Option<String>,
    pub purchase_timeline: Option<String>,
    pub lead_time: Option<String>,
    pub source: Option<String>,
    pub notes: Option<String>,
    pub assigned_to: Option<UserId>,
    pub status: String,
    pub next_followup_date: Option<Date>,
    pub followup_note: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl LeadFields for Lead {
    fn full_name(&self) -> Option<&str> {
        self.full_name.as_deref()
    }

    fn phone_number(&self) -> Option<&str> {
        self.phone_number.as_deref()
    }

    fn bike_model(&self) -> Option<&str> {
        self.bike_model.as_deref()
    }

    fn status(&self) -> &str {
        &self.status
    }

    fn assigned_to(&self) -> Option<UserId> {
        self.assigned_to
    }
}

/// DTO for creating a lead. `status` falls back to the column default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateLead {
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
    pub post_code: Option<String>,
    pub bike_model: Option<String>,
    pub purchase_timeline: Option<String>,
    pub lead_time: Option<String>,
    pub source: Option<String>,
    pub notes: Option<String>,
    pub assigned_to: Option<UserId>,
    pub status: Option<String>,
    pub next_followup_date: Option<Date>,
    pub followup_note: Option<String>,
}

/// DTO for patching a lead.
///
/// Outer `None` leaves a column untouched; `Some(None)` clears it.
/// `status` is not nullable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateLead {
    #[serde(default, deserialize_with = "deserialize_some")]
    pub full_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub phone_number: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub post_code: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub bike_model: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub purchase_timeline: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub lead_time: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub source: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub notes: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub assigned_to: Option<Option<UserId>>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub next_followup_date: Option<Option<Date>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub followup_note: Option<Option<String>>,
}

impl UpdateLead {
    /// True when the patch sets an assignee different from `current`.
    pub fn reassigns(&self, current: Option<UserId>) -> bool {
        matches!(self.assigned_to, Some(next) if next != current)
    }
}

/// Query parameters for the lead list.
#[derive(Debug, Default, Deserialize)]
pub struct LeadListParams {
    pub search: Option<String>,
    pub status: Option<String>,
    #[serde(default)]
    pub unassigned: bool,
}

/// Request body for bulk assignment.
#[derive(Debug, Deserialize)]
pub struct BulkAssign {
    pub lead_ids: Vec<DbId>,
    pub assignee_id: UserId,
}
