//! Repository for the `lead_activities` table (append-only).

use leadtrack_core::types::DbId;
use sqlx::PgPool;

use crate::models::activity::{CreateLeadActivity, LeadActivity, LeadActivityWithCreator};

const COLUMNS: &str = "id, lead_id, activity_type, activity_text, created_by, created_at";

/// Provides read and append operations for lead activities.
pub struct LeadActivityRepo;

impl LeadActivityRepo {
    /// Activities for one lead, newest first, with the creator's profile fields.
    pub async fn list_for_lead(
        pool: &PgPool,
        lead_id: DbId,
    ) -> Result<Vec<LeadActivityWithCreator>, sqlx::Error> {
        sqlx::query_as::<_, LeadActivityWithCreator>(
            "SELECT a.id, a.lead_id, a.activity_type, a.activity_text, a.created_by, \
                    a.created_at, p.full_name AS creator_full_name, p.email AS creator_email \
             FROM lead_activities a \
             LEFT JOIN profiles p ON p.id = a.created_by \
             WHERE a.lead_id = $1 \
             ORDER BY a.created_at DESC, a.id",
        )
        .bind(lead_id)
        .fetch_all(pool)
        .await
    }

    /// Append an activity, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateLeadActivity,
    ) -> Result<LeadActivity, sqlx::Error> {
        let query = format!(
            "INSERT INTO lead_activities (lead_id, activity_type, activity_text, created_by) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LeadActivity>(&query)
            .bind(input.lead_id)
            .bind(&input.activity_type)
            .bind(&input.activity_text)
            .bind(input.created_by)
            .fetch_one(pool)
            .await
    }

    /// Append an activity inside an open transaction.
    pub(crate) async fn insert_in_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        input: &CreateLeadActivity,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO lead_activities (lead_id, activity_type, activity_text, created_by) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(input.lead_id)
        .bind(&input.activity_type)
        .bind(&input.activity_text)
        .bind(input.created_by)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }
}
