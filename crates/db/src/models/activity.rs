//! Lead activity models and DTOs.

use leadtrack_core::activity::creator_display_name;
use leadtrack_core::types::{DbId, Timestamp, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `lead_activities` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LeadActivity {
    pub id: uuid::Uuid,
    pub lead_id: DbId,
    pub activity_type: String,
    pub activity_text: String,
    pub created_by: Option<UserId>,
    pub created_at: Timestamp,
}

/// Activity row joined with the creator's profile.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LeadActivityWithCreator {
    pub id: uuid::Uuid,
    pub lead_id: DbId,
    pub activity_type: String,
    pub activity_text: String,
    pub created_by: Option<UserId>,
    pub created_at: Timestamp,
    pub creator_full_name: Option<String>,
    pub creator_email: Option<String>,
}

impl LeadActivityWithCreator {
    pub fn creator_name(&self) -> String {
        creator_display_name(
            self.creator_full_name.as_deref(),
            self.creator_email.as_deref(),
        )
    }
}

/// DTO for appending an activity.
#[derive(Debug, Clone)]
pub struct CreateLeadActivity {
    pub lead_id: DbId,
    pub activity_type: String,
    pub activity_text: String,
    pub created_by: Option<UserId>,
}

/// Request body for `POST /leads/{id}/activities`.
#[derive(Debug, Deserialize)]
pub struct AddActivityRequest {
    pub activity_type: String,
    pub activity_text: String,
}

/// Query parameters for the activity timeline.
#[derive(Debug, Default, Deserialize)]
pub struct ActivityListParams {
    pub lead_id: Option<DbId>,
}
