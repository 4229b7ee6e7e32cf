//! Catalog identifier parsing for the listings routes.

use crate::error::ValidationError;

/// Extract a positive catalog id from a raw token.
///
/// Accepts either a bare number (`"278502"`) or a composite
/// `"<id>:<variant>"` token (`"278502:1"`); only the part before the first
/// `:` is significant, so both forms resolve to the same catalog target.
/// Anything that does not parse to an integer ≥ 1 is a validation error,
/// reported before any upstream call is attempted.
pub fn parse_blueprint_id(raw: &str) -> Result<u64, ValidationError> {
    let trimmed = raw.trim();
    let head = trimmed.split(':').next().unwrap_or("");
    match head.parse::<u64>() {
        Ok(id) if id >= 1 => Ok(id),
        _ => Err(ValidationError::InvalidBlueprintId),
    }
}
