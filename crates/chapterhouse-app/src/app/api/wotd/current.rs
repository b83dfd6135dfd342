use chapterhouse_core::util::id::{parse_id, parse_optional_id};
use chapterhouse_db::db::enums::RotationMode;
use chapterhouse_db::model::word::WordOfDay;
use chapterhouse_service::rotation::{self, CurrentWord, RotationSummary, ScheduleChange};
use chrono::{DateTime, Utc};
use salvo::writing::Json;
use salvo::{Depot, Request, Router, handler};
use serde::Deserialize;

use crate::app::api::extract::json_body;
use crate::db_handler::get_db_from_depot;
use crate::error::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct SetCurrentRequest {
    pub id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleChangeRequest {
    pub mode: String,
    pub change_at: Option<String>,
    pub scheduled_id: Option<String>,
}

impl ScheduleChangeRequest {
    fn parse(&self) -> AppResult<ScheduleChange> {
        let mode: RotationMode = self.mode.parse()?;
        let change_at = self
            .change_at
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .map(parse_instant)
            .transpose()?;
        let scheduled_id = match mode {
            RotationMode::Fixed => parse_optional_id("scheduledId", self.scheduled_id.as_deref())?,
            RotationMode::Random => None,
        };

        Ok(ScheduleChange {
            mode,
            change_at,
            scheduled_id,
        })
    }
}

fn parse_instant(raw: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|instant| instant.with_timezone(&Utc))
        .map_err(|err| AppError::BadRequest(format!("changeAt must be RFC 3339: {err}")))
}

/// ## Summary
/// GET /api/wotd/current
///
/// Applies any due change first. Falls back to the latest published item,
/// then to a built-in quote, so this never answers 404.
#[handler]
async fn get_current(depot: &mut Depot) -> AppResult<Json<CurrentWord>> {
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    Ok(Json(rotation::get_current(&mut conn, Utc::now()).await?))
}

/// ## Summary
/// POST /api/wotd/current `{id}`
///
/// ## Errors
/// 400 for a malformed id, 404 if no item has it.
#[handler]
async fn set_current(req: &mut Request, depot: &mut Depot) -> AppResult<Json<WordOfDay>> {
    let body = json_body::<SetCurrentRequest>(req).await?;
    let id = parse_id("id", &body.id)?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    Ok(Json(rotation::set_current(&mut conn, id).await?))
}

/// ## Summary
/// PUT /api/wotd/current `{mode, changeAt?, scheduledId?}`
///
/// ## Errors
/// 400 for an unknown mode, a malformed instant or a fixed change without
/// `scheduledId`; 404 if `scheduledId` names no item.
#[handler]
async fn schedule_change(req: &mut Request, depot: &mut Depot) -> AppResult<Json<RotationSummary>> {
    let change = json_body::<ScheduleChangeRequest>(req).await?.parse()?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    Ok(Json(
        rotation::schedule_change(&mut conn, change, Utc::now()).await?,
    ))
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("current")
        .get(get_current)
        .post(set_current)
        .put(schedule_change)
}
