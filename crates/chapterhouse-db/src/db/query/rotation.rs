//! Query functions for the rotation singleton and its calendar schedule.

use chrono::{DateTime, Utc};
use diesel::helper_types::AsSelect;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::connection::DbConnection;
use crate::db::schema::{rotation_schedule, rotation_setting};
use crate::model::rotation::{
    NewRotationSetting, NewScheduleEntry, RotationSetting, RotationSettingChangeset,
    SETTING_ID, ScheduleEntry,
};

type BoxedScheduleQuery<'a> =
    rotation_schedule::BoxedQuery<'a, Pg, AsSelect<ScheduleEntry, Pg>>;

/// ## Summary
/// Returns the rotation setting, creating the default row on first use.
///
/// ## Errors
/// Returns a database error if the insert or the read fails.
pub async fn get_or_create_setting(conn: &mut DbConnection<'_>) -> QueryResult<RotationSetting> {
    diesel::insert_into(rotation_setting::table)
        .values(&NewRotationSetting::default())
        .on_conflict(rotation_setting::id)
        .do_nothing()
        .execute(conn)
        .await?;

    rotation_setting::table
        .find(SETTING_ID)
        .select(RotationSetting::as_select())
        .first(conn)
        .await
}

/// ## Summary
/// Overwrites the rotation setting with `changes` and returns the stored row.
///
/// ## Errors
/// Returns a database error if the update fails, including `NotFound` when
/// the row has not been created yet.
pub async fn save_setting(
    conn: &mut DbConnection<'_>,
    changes: &RotationSettingChangeset,
) -> QueryResult<RotationSetting> {
    diesel::update(rotation_setting::table.find(SETTING_ID))
        .set(changes)
        .returning(RotationSetting::as_returning())
        .get_result(conn)
        .await
}

/// ## Summary
/// Points the rotation at `item_id` without touching the pending change.
///
/// ## Errors
/// Returns a database error if the update fails.
pub async fn set_current_item(
    conn: &mut DbConnection<'_>,
    item_id: Uuid,
) -> QueryResult<RotationSetting> {
    diesel::update(rotation_setting::table.find(SETTING_ID))
        .set(rotation_setting::current_id.eq(Some(item_id)))
        .returning(RotationSetting::as_returning())
        .get_result(conn)
        .await
}

/// ## Summary
/// Returns a query selecting every schedule entry in application order.
#[must_use]
pub fn all_entries() -> BoxedScheduleQuery<'static> {
    rotation_schedule::table
        .select(ScheduleEntry::as_select())
        .order((
            rotation_schedule::change_at.asc(),
            rotation_schedule::created_at.asc(),
            rotation_schedule::id.asc(),
        ))
        .into_boxed()
}

/// ## Summary
/// Returns a query selecting the entries whose `change_at` is at or before `now`.
#[must_use]
pub fn due_at(now: DateTime<Utc>) -> BoxedScheduleQuery<'static> {
    all_entries().filter(rotation_schedule::change_at.le(now))
}

/// ## Summary
/// Lists every schedule entry in application order.
///
/// ## Errors
/// Returns a database error if the query fails.
pub async fn list_entries(conn: &mut DbConnection<'_>) -> QueryResult<Vec<ScheduleEntry>> {
    all_entries().load(conn).await
}

/// ## Summary
/// Lists the entries that are due at `now`, earliest first.
///
/// ## Errors
/// Returns a database error if the query fails.
pub async fn due_entries(
    conn: &mut DbConnection<'_>,
    now: DateTime<Utc>,
) -> QueryResult<Vec<ScheduleEntry>> {
    due_at(now).load(conn).await
}

/// ## Summary
/// Inserts a batch of entries and returns them as stored.
///
/// ## Errors
/// Returns a database error if the insert fails.
pub async fn insert_entries(
    conn: &mut DbConnection<'_>,
    entries: &[NewScheduleEntry],
) -> QueryResult<Vec<ScheduleEntry>> {
    if entries.is_empty() {
        return Ok(Vec::new());
    }

    diesel::insert_into(rotation_schedule::table)
        .values(entries)
        .returning(ScheduleEntry::as_returning())
        .get_results(conn)
        .await
}

/// ## Summary
/// Deletes the entries with the given IDs, returning the number removed.
///
/// ## Errors
/// Returns a database error if the delete fails.
pub async fn delete_entries(conn: &mut DbConnection<'_>, ids: &[Uuid]) -> QueryResult<usize> {
    if ids.is_empty() {
        return Ok(0);
    }

    diesel::delete(rotation_schedule::table.filter(rotation_schedule::id.eq_any(ids)))
        .execute(conn)
        .await
}

/// ## Summary
/// Deletes every entry scheduled at one of `instants`.
///
/// ## Errors
/// Returns a database error if the delete fails.
pub async fn delete_entries_at(
    conn: &mut DbConnection<'_>,
    instants: &[DateTime<Utc>],
) -> QueryResult<usize> {
    if instants.is_empty() {
        return Ok(0);
    }

    diesel::delete(rotation_schedule::table.filter(rotation_schedule::change_at.eq_any(instants)))
        .execute(conn)
        .await
}

/// ## Summary
/// Deletes one entry, returning the number of rows removed.
///
/// ## Errors
/// Returns a database error if the delete fails.
pub async fn delete_entry(conn: &mut DbConnection<'_>, id: Uuid) -> QueryResult<usize> {
    diesel::delete(rotation_schedule::table.find(id))
        .execute(conn)
        .await
}
