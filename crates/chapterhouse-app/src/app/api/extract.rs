//! Request parsing shared by the JSON handlers.
//!
//! Everything here runs before a database connection is taken, so malformed
//! input is answered with 400 without touching storage.

use chapterhouse_core::util::id::parse_id;
use salvo::Request;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// ## Summary
/// Deserializes the JSON request body.
///
/// ## Errors
/// Returns `AppError::BadRequest` if the body is missing or malformed.
pub async fn json_body<T: DeserializeOwned + Send>(req: &mut Request) -> AppResult<T> {
    req.parse_json::<T>()
        .await
        .map_err(|err| AppError::BadRequest(format!("Invalid request body: {err}")))
}

/// ## Summary
/// Parses the `{id}` path parameter.
///
/// ## Errors
/// Returns an input error if the parameter is absent or not a UUID.
pub fn path_id(req: &Request) -> AppResult<Uuid> {
    let raw = req
        .param::<String>("id")
        .ok_or_else(|| AppError::BadRequest("missing id".to_string()))?;
    Ok(parse_id("id", &raw)?)
}

/// Raw query-string value, if present.
pub fn query<'a>(req: &'a Request, key: &str) -> Option<&'a str> {
    req.queries().get(key).map(String::as_str)
}
