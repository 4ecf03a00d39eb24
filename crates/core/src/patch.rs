//! Helpers for partial-update payloads.
//!
//! A patch distinguishes "field absent" (leave unchanged) from "field set to
//! null" (clear it). Nullable patch fields are declared as `Option<Option<T>>`
//! with `#[serde(default, deserialize_with = "deserialize_some")]`.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::CoreError;

/// Fields that identify or date a record and can never be patched.
pub const IMMUTABLE_FIELDS: &[&str] = &["id", "created_at"];

/// Wrap any present value (including `null`) in `Some`.
pub fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

/// Reject a patch body that is not an object or that touches an immutable field.
pub fn reject_immutable_fields(patch: &Value) -> Result<(), CoreError> {
    let obj = patch
        .as_object()
        .ok_or_else(|| CoreError::Validation("Patch body must be a JSON object".into()))?;

    if let Some(field) = IMMUTABLE_FIELDS.iter().find(|f| obj.contains_key(**f)) {
        return Err(CoreError::Validation(format!(
            "Field '{field}' cannot be changed"
        )));
    }
    if obj.is_empty() {
        return Err(CoreError::Validation("Patch contains no fields".into()));
    }
    Ok(())
}
