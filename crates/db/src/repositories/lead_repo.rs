//! Repository for the `leads` table.

use leadtrack_core::lead::{LeadScope, DEFAULT_STATUS};
use leadtrack_core::types::{DbId, UserId};
use sqlx::{FromRow, PgPool};

use crate::models::activity::CreateLeadActivity;
use crate::models::lead::{CreateLead, Lead, UpdateLead};
use crate::repositories::lead_activity_repo::LeadActivityRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, full_name, phone_number, post_code, bike_model, purchase_timeline, \
                        lead_time, source, notes, assigned_to, status, next_followup_date, \
                        followup_note, created_at, updated_at";

/// Listing order: soonest follow-up first, leads without one last, then newest.
const LIST_ORDER: &str = "ORDER BY next_followup_date ASC NULLS LAST, created_at DESC, id DESC";

/// Assignee and status of a lead, used by the performance aggregation.
#[derive(Debug, Clone, FromRow)]
pub struct LeadAssignment {
    pub assigned_to: Option<UserId>,
    pub status: String,
}

/// Provides CRUD operations for leads.
pub struct LeadRepo;

impl LeadRepo {
    /// List the leads visible within `scope`.
    pub async fn list(pool: &PgPool, scope: LeadScope) -> Result<Vec<Lead>, sqlx::Error> {
        match scope {
            LeadScope::All => {
                let query = format!("SELECT {COLUMNS} FROM leads {LIST_ORDER}");
                sqlx::query_as::<_, Lead>(&query).fetch_all(pool).await
            }
            LeadScope::AssignedTo(user_id) => {
                let query =
                    format!("SELECT {COLUMNS} FROM leads WHERE assigned_to = $1 {LIST_ORDER}");
                sqlx::query_as::<_, Lead>(&query)
                    .bind(user_id)
                    .fetch_all(pool)
                    .await
            }
        }
    }

    /// Find a lead by ID regardless of assignment.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Lead>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM leads WHERE id = $1");
        sqlx::query_as::<_, Lead>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a lead by ID, returning `None` when it falls outside `scope`.
    pub async fn find_scoped(
        pool: &PgPool,
        id: DbId,
        scope: LeadScope,
    ) -> Result<Option<Lead>, sqlx::Error> {
        let lead = Self::find_by_id(pool, id).await?;
        Ok(lead.filter(|l| scope.includes(l.assigned_to)))
    }

    /// Insert a new lead, returning the created row.
    ///
    /// A missing status falls back to [`DEFAULT_STATUS`].
    pub async fn create(pool: &PgPool, input: &CreateLead) -> Result<Lead, sqlx::Error> {
        let query = format!(
            "INSERT INTO leads (full_name, phone_number, post_code, bike_model, \
                 purchase_timeline, lead_time, source, notes, assigned_to, status, \
                 next_followup_date, followup_note) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lead>(&query)
            .bind(&input.full_name)
            .bind(&input.phone_number)
            .bind(&input.post_code)
            .bind(&input.bike_model)
            .bind(&input.purchase_timeline)
            .bind(&input.lead_time)
            .bind(&input.source)
            .bind(&input.notes)
            .bind(input.assigned_to)
            .bind(input.status.as_deref().unwrap_or(DEFAULT_STATUS))
            .bind(input.next_followup_date)
            .bind(&input.followup_note)
            .fetch_one(pool)
            .await
    }

    /// Apply a partial update and append `activities` in the same transaction.
    ///
    /// Nullable columns use a provided-flag so `Some(None)` clears the value.
    /// Returns `None` (and writes nothing) if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateLead,
        activities: &[CreateLeadActivity],
    ) -> Result<Option<Lead>, sqlx::Error> {
        let query = format!(
            "UPDATE leads SET \
                 full_name          = CASE WHEN $2  THEN $3  ELSE full_name END, \
                 phone_number       = CASE WHEN $4  THEN $5  ELSE phone_number END, \
                 post_code          = CASE WHEN $6  THEN $7  ELSE post_code END, \
                 bike_model         = CASE WHEN $8  THEN $9  ELSE bike_model END, \
                 purchase_timeline  = CASE WHEN $10 THEN $11 ELSE purchase_timeline END, \
                 lead_time          = CASE WHEN $12 THEN $13 ELSE lead_time END, \
                 source             = CASE WHEN $14 THEN $15 ELSE source END, \
                 notes              = CASE WHEN $16 THEN $17 ELSE notes END, \
                 assigned_to        = CASE WHEN $18 THEN $19 ELSE assigned_to END, \
                 status             = COALESCE($20, status), \
                 next_followup_date = CASE WHEN $21 THEN $22 ELSE next_followup_date END, \
                 followup_note      = CASE WHEN $23 THEN $24 ELSE followup_note END \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );

        let mut tx = pool.begin().await?;

        let updated = sqlx::query_as::<_, Lead>(&query)
            .bind(id)
            .bind(input.full_name.is_some())
            .bind(input.full_name.clone().flatten())
            .bind(input.phone_number.is_some())
            .bind(input.phone_number.clone().flatten())
            .bind(input.post_code.is_some())
            .bind(input.post_code.clone().flatten())
            .bind(input.bike_model.is_some())
            .bind(input.bike_model.clone().flatten())
            .bind(input.purchase_timeline.is_some())
            .bind(input.purchase_timeline.clone().flatten())
            .bind(input.lead_time.is_some())
            .bind(input.lead_time.clone().flatten())
            .bind(input.source.is_some())
            .bind(input.source.clone().flatten())
            .bind(input.notes.is_some())
            .bind(input.notes.clone().flatten())
            .bind(input.assigned_to.is_some())
            .bind(input.assigned_to.flatten())
            .bind(&input.status)
            .bind(input.next_followup_date.is_some())
            .bind(input.next_followup_date.flatten())
            .bind(input.followup_note.is_some())
            .bind(input.followup_note.clone().flatten())
            .fetch_optional(&mut *tx)
            .await?;

        let Some(lead) = updated else {
            return Ok(None);
        };

        for activity in activities {
            LeadActivityRepo::insert_in_tx(&mut tx, activity).await?;
        }

        tx.commit().await?;

        tracing::debug!(
            lead_id = id,
            activities = activities.len(),
            "Lead updated"
        );

        Ok(Some(lead))
    }

    /// Permanently delete a lead. Its activities cascade.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM leads WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Set `assigned_to` on every listed lead in one statement.
    ///
    /// Returns the number of rows updated; IDs that do not exist are skipped.
    pub async fn bulk_assign(
        pool: &PgPool,
        ids: &[DbId],
        assignee: UserId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("UPDATE leads SET assigned_to = $1 WHERE id = ANY($2)")
            .bind(assignee)
            .bind(ids)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Assignee and status of every lead, unfiltered.
    pub async fn list_assignments(pool: &PgPool) -> Result<Vec<LeadAssignment>, sqlx::Error> {
        sqlx::query_as::<_, LeadAssignment>("SELECT assigned_to, status FROM leads ORDER BY id")
            .fetch_all(pool)
            .await
    }
}
