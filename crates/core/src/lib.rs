//! Domain rules for the lead-tracking service.
//!
//! Everything here is pure: no I/O, no database types. The `db` crate stores
//! what these modules validate, and the `api` crate enforces their policies.

pub mod activity;
pub mod dashboard;
pub mod error;
pub mod lead;
pub mod navigation;
pub mod patch;
pub mod performance;
pub mod policy;
pub mod roles;
pub mod session;
pub mod types;
pub mod validation;
