//! Shared response envelope types for API handlers.
//!
//! Reads use a `{ "data": ... }` envelope. Mutations add the user-facing
//! confirmation text: `{ "data": ..., "message": "..." }`.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "data": T, "message": "..." }` envelope returned by successful writes.
#[derive(Debug, Serialize)]
pub struct MutationResponse<T: Serialize> {
    pub data: T,
    pub message: String,
}

impl<T: Serialize> MutationResponse<T> {
    pub fn new(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: message.into(),
        }
    }
}
