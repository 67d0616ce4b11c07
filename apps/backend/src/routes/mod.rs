//! HTTP route handlers

pub mod import;
pub mod sets;
pub mod study;

use crate::error::{ApiError, Result};

/// Reject a missing or blank caller-supplied user id.
pub(crate) fn require_user_id(user_id: &str) -> Result<()> {
    if user_id.trim().is_empty() {
        return Err(ApiError::BadRequest("user_id must not be empty".to_string()));
    }
    Ok(())
}
