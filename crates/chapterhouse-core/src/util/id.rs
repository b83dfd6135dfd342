//! Identifier parsing for ids arriving over the wire.

use uuid::Uuid;

use crate::error::{CoreError, CoreResult};

/// Parse a record id supplied by a client.
///
/// Surrounding whitespace is ignored. Anything that is not a UUID is an
/// `InvalidInput` error naming the field, so callers can answer 400 before
/// touching storage.
///
/// ## Errors
/// Returns `CoreError::InvalidInput` if `raw` is not a valid UUID.
pub fn parse_id(field: &str, raw: &str) -> CoreResult<Uuid> {
    Uuid::parse_str(raw.trim())
        .map_err(|_err| CoreError::InvalidInput(format!("{field} is not a valid id: '{raw}'")))
}

/// Like [`parse_id`], but absent or blank input means no id.
///
/// ## Errors
/// Returns `CoreError::InvalidInput` if `raw` is present but not a UUID.
pub fn parse_optional_id(field: &str, raw: Option<&str>) -> CoreResult<Option<Uuid>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_id(field, value).map(Some),
    }
}
