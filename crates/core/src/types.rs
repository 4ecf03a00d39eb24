/// Numeric primary keys (leads) are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// User identities are UUIDs shared by profiles, roles, and credentials.
pub type UserId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar date without a time component (follow-up dates).
pub type Date = chrono::NaiveDate;
