//! Lead activity kinds, validation, and the activity entries implied by a
//! lead update.

use crate::error::CoreError;
use crate::lead::{STATUS_CONVERTED, STATUS_LOST};
use crate::types::Date;

pub const ACTIVITY_STATUS_CHANGE: &str = "status_change";
pub const ACTIVITY_FOLLOWUP_SCHEDULED: &str = "followup_scheduled";
pub const ACTIVITY_NOTE_ADDED: &str = "note_added";
pub const ACTIVITY_CONVERTED: &str = "converted";
pub const ACTIVITY_LOST: &str = "lost";

/// All valid activity kinds.
pub const ACTIVITY_TYPES: &[&str] = &[
    ACTIVITY_STATUS_CHANGE,
    ACTIVITY_FOLLOWUP_SCHEDULED,
    ACTIVITY_NOTE_ADDED,
    ACTIVITY_CONVERTED,
    ACTIVITY_LOST,
];

/// Maximum length of an activity description in characters.
pub const MAX_ACTIVITY_TEXT_LENGTH: usize = 5_000;

/// Label shown when an activity has no known creator.
pub const SYSTEM_ACTOR: &str = "System";

pub fn validate_activity_type(kind: &str) -> Result<(), CoreError> {
    if ACTIVITY_TYPES.contains(&kind) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid activity type '{kind}'. Must be one of: {}",
            ACTIVITY_TYPES.join(", ")
        )))
    }
}

pub fn validate_activity_text(text: &str) -> Result<(), CoreError> {
    if text.trim().is_empty() {
        return Err(CoreError::Validation(
            "Activity text cannot be empty".to_string(),
        ));
    }
    if text.chars().count() > MAX_ACTIVITY_TEXT_LENGTH {
        return Err(CoreError::Validation(format!(
            "Activity text exceeds maximum length of {MAX_ACTIVITY_TEXT_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Creator label: full name, then email, then [`SYSTEM_ACTOR`].
pub fn creator_display_name(full_name: Option<&str>, email: Option<&str>) -> String {
    full_name
        .filter(|n| !n.trim().is_empty())
        .or(email)
        .unwrap_or(SYSTEM_ACTOR)
        .to_string()
}

// ---------------------------------------------------------------------------
// Activities derived from an update
// ---------------------------------------------------------------------------

/// Before/after view of the fields whose changes are logged.
///
/// `new_*` fields are `None` when the patch leaves that field untouched.
#[derive(Debug, Default)]
pub struct LeadChange<'a> {
    pub previous_status: &'a str,
    pub new_status: Option<&'a str>,
    pub previous_followup: Option<Date>,
    pub new_followup: Option<Option<Date>>,
    pub followup_note: Option<&'a str>,
    pub previous_notes: Option<&'a str>,
    pub new_notes: Option<Option<&'a str>>,
}

/// An activity entry to append after a successful update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedActivity {
    pub kind: &'static str,
    pub text: String,
}

impl PlannedActivity {
    fn new(kind: &'static str, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Work out which activities an update implies. Unchanged values log nothing.
pub fn planned_activities(change: &LeadChange<'_>) -> Vec<PlannedActivity> {
    let mut planned = Vec::new();

    if let Some(status) = change.new_status.filter(|s| *s != change.previous_status) {
        planned.push(match status {
            STATUS_CONVERTED => PlannedActivity::new(ACTIVITY_CONVERTED, "Lead marked as converted"),
            STATUS_LOST => PlannedActivity::new(ACTIVITY_LOST, "Lead marked as lost"),
            _ => PlannedActivity::new(
                ACTIVITY_STATUS_CHANGE,
                format!(
                    "Status changed from {} to {status}",
                    change.previous_status
                ),
            ),
        });
    }

    if let Some(Some(date)) = change.new_followup {
        if change.previous_followup != Some(date) {
            let text = match change.followup_note.filter(|n| !n.trim().is_empty()) {
                Some(note) => format!("Follow-up scheduled for {date}: {note}"),
                None => format!("Follow-up scheduled for {date}"),
            };
            planned.push(PlannedActivity::new(ACTIVITY_FOLLOWUP_SCHEDULED, text));
        }
    }

    if let Some(Some(notes)) = change.new_notes {
        if change.previous_notes != Some(notes) && !notes.trim().is_empty() {
            planned.push(PlannedActivity::new(ACTIVITY_NOTE_ADDED, "Notes updated"));
        }
    }

    planned
}
