use chapterhouse_core::util::id::parse_optional_id;
use chapterhouse_db::db::enums::RotationMode;
use chapterhouse_db::model::rotation::ScheduleEntry;
use chapterhouse_service::rotation::{
    self, CalendarSchedule, CalendarScheduleResult, parse_timezone,
};
use salvo::http::StatusCode;
use salvo::writing::Json;
use salvo::{Depot, Request, Response, Router, handler};
use serde::Deserialize;

use crate::app::api::extract::{json_body, path_id};
use crate::config::get_config_from_depot;
use crate::db_handler::get_db_from_depot;
use crate::error::AppResult;

/// ## Summary
/// Calendar schedule request payload
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarRequest {
    pub dates: Vec<String>,
    pub time: String,
    pub mode: String,
    pub scheduled_id: Option<String>,
}

impl CalendarRequest {
    fn parse(self) -> AppResult<CalendarSchedule> {
        let mode: RotationMode = self.mode.parse()?;
        let scheduled_id = match mode {
            RotationMode::Fixed => parse_optional_id("scheduledId", self.scheduled_id.as_deref())?,
            RotationMode::Random => None,
        };

        Ok(CalendarSchedule {
            dates: self.dates,
            time: self.time,
            mode,
            scheduled_id,
        })
    }
}

/// GET /api/wotd/schedule
#[handler]
async fn list_schedule(depot: &mut Depot) -> AppResult<Json<Vec<ScheduleEntry>>> {
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    Ok(Json(rotation::list_schedule(&mut conn).await?))
}

/// ## Summary
/// POST /api/wotd/schedule `{dates, time, mode, scheduledId?}`
///
/// Dates that cannot be placed in the configured zone come back in
/// `skipped` rather than failing the request.
///
/// ## Errors
/// 400 for an empty date list, a malformed time or mode, or a fixed change
/// without `scheduledId`; 404 if `scheduledId` names no item.
#[handler]
async fn add_schedule(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> AppResult<Json<CalendarScheduleResult>> {
    let request = json_body::<CalendarRequest>(req).await?.parse()?;
    let zone = parse_timezone(&get_config_from_depot(depot)?.rotation.timezone)?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    let result = rotation::add_calendar_schedule(&mut conn, &request, zone).await?;

    res.status_code(StatusCode::CREATED);
    Ok(Json(result))
}

/// ## Summary
/// PUT /api/wotd/schedule
///
/// Same body as POST; entries already at one of the resolved instants are
/// replaced.
#[handler]
async fn upsert_schedule(
    req: &mut Request,
    depot: &mut Depot,
) -> AppResult<Json<CalendarScheduleResult>> {
    let request = json_body::<CalendarRequest>(req).await?.parse()?;
    let zone = parse_timezone(&get_config_from_depot(depot)?.rotation.timezone)?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    Ok(Json(
        rotation::upsert_calendar_schedule(&mut conn, &request, zone).await?,
    ))
}

/// DELETE /api/wotd/schedule/{id}
#[handler]
async fn delete_schedule_entry(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> AppResult<()> {
    let id = path_id(req)?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    rotation::delete_schedule_entry(&mut conn, id).await?;

    res.status_code(StatusCode::NO_CONTENT);
    Ok(())
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("schedule")
        .get(list_schedule)
        .post(add_schedule)
        .put(upsert_schedule)
        .push(Router::with_path("{id}").delete(delete_schedule_entry))
}
