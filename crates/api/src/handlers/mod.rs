//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers resolve the caller's [`Session`](leadtrack_core::session::Session),
//! apply `leadtrack_core::policy`, delegate to the repositories in
//! `leadtrack_db`, and map errors via [`AppError`](crate::error::AppError).

pub mod activities;
pub mod auth;
pub mod dashboard;
pub mod health;
pub mod leads;
pub mod navigation;
pub mod performance;
pub mod users;
