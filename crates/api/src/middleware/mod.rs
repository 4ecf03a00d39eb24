//! Authentication extractors.
//!
//! - [`auth::AuthUser`] -- the caller resolved from a JWT Bearer token.
//! - [`auth::OptionalAuthUser`] -- the caller if a valid token is present.
//!
//! Role checks happen in handlers through `leadtrack_core::policy`, since
//! several of them depend on the lead being touched.

pub mod auth;
