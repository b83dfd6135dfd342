use chapterhouse_db::db::connection::DbConnection;
use chapterhouse_db::db::enums::RotationMode;
use chapterhouse_db::db::query::{rotation as rotation_query, word as word_query};
use chapterhouse_db::model::rotation::{NewScheduleEntry, ScheduleEntry};
use chapterhouse_db::model::word::WordOfDay;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use diesel_async::AsyncConnection;
use diesel_async::scoped_futures::ScopedFutureExt;
use uuid::Uuid;

use super::calendar::{parse_time, resolve_dates};
use super::state::{
    ChangeTarget, RotationState, RotationSummary, apply_due_changes, needs_published,
    stored_changeset,
};
use super::types::{CalendarSchedule, CalendarScheduleResult, CurrentWord, ScheduleChange};
use crate::error::{ServiceError, ServiceResult};

/// ## Summary
/// Applies whatever is due at `now` and returns the item on display.
///
/// The read, the transition and the write-back share one transaction.
/// When nothing stored resolves, the built-in quote is returned.
///
/// ## Errors
/// Returns a database error if any step fails.
#[tracing::instrument(skip(conn))]
pub async fn get_current(
    conn: &mut DbConnection<'_>,
    now: DateTime<Utc>,
) -> ServiceResult<CurrentWord> {
    conn.transaction::<_, ServiceError, _>(move |tx| {
        async move {
            let setting = rotation_query::get_or_create_setting(tx).await?;
            let entries = rotation_query::due_entries(tx, now).await?;
            let state = RotationState::from_setting(&setting);

            let published = if needs_published(&state, &entries, now) {
                word_query::published_ids(tx).await?
            } else {
                Vec::new()
            };
            let transition =
                apply_due_changes(&state, &entries, now, &published, &mut rand::thread_rng());

            let removed = rotation_query::delete_entries(tx, &transition.consumed).await?;
            let changes = transition.state.to_changeset();
            if changes != stored_changeset(&setting) {
                rotation_query::save_setting(tx, &changes).await?;
                tracing::info!(
                    current = ?changes.current_id,
                    applied = transition.applied,
                    consumed = removed,
                    "Rotation advanced"
                );
            }

            let summary = transition.state.summary(now);
            let word = match resolve_item(tx, transition.state.current).await? {
                Some(item) => CurrentWord::from_item(item, summary),
                None => {
                    tracing::debug!("No stored item to show, using the built-in quote");
                    CurrentWord::fallback(summary)
                }
            };
            Ok(word)
        }
        .scope_boxed()
    })
    .await
}

async fn resolve_item(
    conn: &mut DbConnection<'_>,
    current: Option<Uuid>,
) -> ServiceResult<Option<WordOfDay>> {
    if let Some(id) = current
        && let Some(item) = word_query::get_word(conn, id).await?
    {
        return Ok(Some(item));
    }
    Ok(word_query::latest_published(conn).await?)
}

/// ## Summary
/// Puts `item_id` on display immediately.
///
/// ## Errors
/// Returns `NotFound` if the item does not exist, or a database error.
#[tracing::instrument(skip(conn))]
pub async fn set_current(conn: &mut DbConnection<'_>, item_id: Uuid) -> ServiceResult<WordOfDay> {
    let item = word_query::get_word(conn, item_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("word of the day", item_id))?;

    rotation_query::get_or_create_setting(conn).await?;
    rotation_query::set_current_item(conn, item_id).await?;

    tracing::info!(item = %item_id, "Current word set");
    Ok(item)
}

/// ## Summary
/// Replaces the setting's pending change. Without `change_at` the target is
/// recorded but nothing is pending.
///
/// ## Errors
/// Returns `ValidationError` for a fixed change without an item, `NotFound`
/// if that item does not exist, or a database error.
#[tracing::instrument(skip(conn))]
pub async fn schedule_change(
    conn: &mut DbConnection<'_>,
    request: ScheduleChange,
    now: DateTime<Utc>,
) -> ServiceResult<RotationSummary> {
    let target = resolve_target(conn, request.mode, request.scheduled_id).await?;

    let setting = rotation_query::get_or_create_setting(conn).await?;
    let mut state = RotationState::from_setting(&setting);
    state.schedule(target, request.change_at);

    let saved = rotation_query::save_setting(conn, &state.to_changeset()).await?;
    tracing::info!(
        mode = %saved.mode,
        next_change_at = ?saved.next_change_at,
        "Rotation change scheduled"
    );

    Ok(RotationState::from_setting(&saved).summary(now))
}

/// ## Summary
/// Adds one schedule entry per resolvable calendar date.
///
/// ## Errors
/// Returns `ValidationError` for an empty date list, a malformed time or a
/// fixed change without an item; `NotFound` if that item does not exist.
#[tracing::instrument(skip(conn))]
pub async fn add_calendar_schedule(
    conn: &mut DbConnection<'_>,
    request: &CalendarSchedule,
    zone: Tz,
) -> ServiceResult<CalendarScheduleResult> {
    let (entries, skipped) = prepare_entries(conn, request, zone).await?;
    let created = rotation_query::insert_entries(conn, &entries).await?;

    tracing::info!(created = created.len(), skipped = skipped.len(), "Calendar schedule added");
    Ok(CalendarScheduleResult { created, skipped })
}

/// ## Summary
/// Like [`add_calendar_schedule`], but first removes every entry already
/// scheduled at one of the resolved instants.
///
/// ## Errors
/// Same as [`add_calendar_schedule`].
#[tracing::instrument(skip(conn))]
pub async fn upsert_calendar_schedule(
    conn: &mut DbConnection<'_>,
    request: &CalendarSchedule,
    zone: Tz,
) -> ServiceResult<CalendarScheduleResult> {
    let (entries, skipped) = prepare_entries(conn, request, zone).await?;
    let instants: Vec<DateTime<Utc>> = entries.iter().map(|entry| entry.change_at).collect();

    let (replaced, created) = conn
        .transaction::<_, ServiceError, _>(|tx| {
            async move {
                let replaced = rotation_query::delete_entries_at(tx, &instants).await?;
                let created = rotation_query::insert_entries(tx, &entries).await?;
                Ok((replaced, created))
            }
            .scope_boxed()
        })
        .await?;

    tracing::info!(
        created = created.len(),
        replaced,
        skipped = skipped.len(),
        "Calendar schedule upserted"
    );
    Ok(CalendarScheduleResult { created, skipped })
}

async fn prepare_entries(
    conn: &mut DbConnection<'_>,
    request: &CalendarSchedule,
    zone: Tz,
) -> ServiceResult<(Vec<NewScheduleEntry>, Vec<String>)> {
    if request.dates.is_empty() {
        return Err(ServiceError::ValidationError(
            "dates must contain at least one date".to_string(),
        ));
    }
    let time = parse_time(&request.time)?;
    let target = resolve_target(conn, request.mode, request.scheduled_id).await?;

    let resolved = resolve_dates(&request.dates, time, zone);
    let entries = resolved
        .instants
        .into_iter()
        .map(|change_at| NewScheduleEntry {
            id: Uuid::now_v7(),
            mode: target.mode(),
            change_at,
            scheduled_id: target.scheduled_id(),
        })
        .collect();

    Ok((entries, resolved.skipped))
}

async fn resolve_target(
    conn: &mut DbConnection<'_>,
    mode: RotationMode,
    scheduled_id: Option<Uuid>,
) -> ServiceResult<ChangeTarget> {
    match mode {
        RotationMode::Random => Ok(ChangeTarget::Random),
        RotationMode::Fixed => {
            let id = scheduled_id.ok_or_else(|| {
                ServiceError::ValidationError("scheduledId is required for fixed mode".to_string())
            })?;
            if !word_query::word_exists(conn, id).await? {
                return Err(ServiceError::not_found("word of the day", id));
            }
            Ok(ChangeTarget::Fixed(id))
        }
    }
}

/// ## Summary
/// Lists every pending schedule entry, earliest first.
///
/// ## Errors
/// Returns a database error if the query fails.
#[tracing::instrument(skip(conn))]
pub async fn list_schedule(conn: &mut DbConnection<'_>) -> ServiceResult<Vec<ScheduleEntry>> {
    Ok(rotation_query::list_entries(conn).await?)
}

/// ## Summary
/// Removes one pending schedule entry.
///
/// ## Errors
/// Returns `NotFound` if no entry has this id, or a database error.
#[tracing::instrument(skip(conn))]
pub async fn delete_schedule_entry(conn: &mut DbConnection<'_>, id: Uuid) -> ServiceResult<()> {
    match rotation_query::delete_entry(conn, id).await? {
        0 => Err(ServiceError::not_found("schedule entry", id)),
        _ => Ok(()),
    }
}
