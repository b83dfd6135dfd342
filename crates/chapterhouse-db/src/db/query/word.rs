//! Query functions for word-of-the-day items.

use diesel::helper_types::AsSelect;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::connection::DbConnection;
use crate::db::enums::ItemStatus;
use crate::db::schema::word_of_day;
use crate::model::word::{NewWordOfDay, WordOfDay, WordOfDayChangeset};

type BoxedQuery<'a, T> = word_of_day::BoxedQuery<'a, Pg, AsSelect<T, Pg>>;

/// ## Summary
/// Returns a query selecting every item, newest first.
#[must_use]
pub fn all() -> BoxedQuery<'static, WordOfDay> {
    word_of_day::table
        .select(WordOfDay::as_select())
        .order((word_of_day::created_at.desc(), word_of_day::id.desc()))
        .into_boxed()
}

/// ## Summary
/// Returns a query to find an item by ID.
#[must_use]
pub fn by_id(id: Uuid) -> BoxedQuery<'static, WordOfDay> {
    all().filter(word_of_day::id.eq(id))
}

/// ## Summary
/// Returns a query selecting items with the given status, newest first.
#[must_use]
pub fn by_status(status: ItemStatus) -> BoxedQuery<'static, WordOfDay> {
    all().filter(word_of_day::status.eq(status))
}

/// ## Summary
/// Lists items, optionally restricted to one status.
///
/// ## Errors
/// Returns a database error if the query fails.
pub async fn list_words(
    conn: &mut DbConnection<'_>,
    status: Option<ItemStatus>,
) -> QueryResult<Vec<WordOfDay>> {
    match status {
        Some(status) => by_status(status).load(conn).await,
        None => all().load(conn).await,
    }
}

/// ## Summary
/// Retrieves an item by ID.
///
/// ## Errors
/// Returns a database error if the query fails.
pub async fn get_word(conn: &mut DbConnection<'_>, id: Uuid) -> QueryResult<Option<WordOfDay>> {
    by_id(id).first(conn).await.optional()
}

/// ## Summary
/// Checks whether an item with the given ID exists.
///
/// ## Errors
/// Returns a database error if the query fails.
pub async fn word_exists(conn: &mut DbConnection<'_>, id: Uuid) -> QueryResult<bool> {
    diesel::select(diesel::dsl::exists(word_of_day::table.find(id)))
        .get_result(conn)
        .await
}

/// ## Summary
/// Retrieves the most recently created published item.
///
/// ## Errors
/// Returns a database error if the query fails.
pub async fn latest_published(conn: &mut DbConnection<'_>) -> QueryResult<Option<WordOfDay>> {
    by_status(ItemStatus::Published)
        .first(conn)
        .await
        .optional()
}

/// ## Summary
/// Lists the IDs of all published items, oldest first.
///
/// ## Errors
/// Returns a database error if the query fails.
pub async fn published_ids(conn: &mut DbConnection<'_>) -> QueryResult<Vec<Uuid>> {
    word_of_day::table
        .filter(word_of_day::status.eq(ItemStatus::Published))
        .order((word_of_day::created_at.asc(), word_of_day::id.asc()))
        .select(word_of_day::id)
        .load(conn)
        .await
}

/// ## Summary
/// Inserts a new item and returns the inserted record.
///
/// ## Errors
/// Returns a database error if the insert fails.
pub async fn create_word(
    conn: &mut DbConnection<'_>,
    new_word: &NewWordOfDay<'_>,
) -> QueryResult<WordOfDay> {
    diesel::insert_into(word_of_day::table)
        .values(new_word)
        .returning(WordOfDay::as_returning())
        .get_result(conn)
        .await
}

/// ## Summary
/// Replaces an item's editable fields. Returns `None` if no such item exists.
///
/// ## Errors
/// Returns a database error if the update fails.
pub async fn update_word(
    conn: &mut DbConnection<'_>,
    id: Uuid,
    changes: &WordOfDayChangeset<'_>,
) -> QueryResult<Option<WordOfDay>> {
    diesel::update(word_of_day::table.find(id))
        .set(changes)
        .returning(WordOfDay::as_returning())
        .get_result(conn)
        .await
        .optional()
}

/// ## Summary
/// Deletes an item, returning the number of rows removed.
///
/// Foreign keys clear the item from the rotation setting and drop schedule
/// entries that target it.
///
/// ## Errors
/// Returns a database error if the delete fails.
pub async fn delete_word(conn: &mut DbConnection<'_>, id: Uuid) -> QueryResult<usize> {
    diesel::delete(word_of_day::table.find(id))
        .execute(conn)
        .await
}
