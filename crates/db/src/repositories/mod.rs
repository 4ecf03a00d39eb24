//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods
//! that accept `&PgPool` as the first argument.

pub mod credential_repo;
pub mod lead_activity_repo;
pub mod lead_repo;
pub mod profile_repo;
pub mod session_repo;
pub mod user_role_repo;

pub use credential_repo::CredentialRepo;
pub use lead_activity_repo::LeadActivityRepo;
pub use lead_repo::{LeadAssignment, LeadRepo};
pub use profile_repo::ProfileRepo;
pub use session_repo::SessionRepo;
pub use user_role_repo::UserRoleRepo;
