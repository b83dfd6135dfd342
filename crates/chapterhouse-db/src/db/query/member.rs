//! Query functions for directory members.

use diesel::helper_types::AsSelect;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::connection::DbConnection;
use crate::db::schema::member;
use crate::model::member::{Member, MemberChangeset, NewMember};

type BoxedQuery<'a, T> = member::BoxedQuery<'a, Pg, AsSelect<T, Pg>>;

/// ## Summary
/// Returns a query selecting every member in collection order
/// (`created_at`, then `id`).
#[must_use]
pub fn all() -> BoxedQuery<'static, Member> {
    member::table
        .select(Member::as_select())
        .order((member::created_at.asc(), member::id.asc()))
        .into_boxed()
}

/// ## Summary
/// Returns a query to find a member by ID.
#[must_use]
pub fn by_id(id: Uuid) -> BoxedQuery<'static, Member> {
    all().filter(member::id.eq(id))
}

/// ## Summary
/// Loads the whole member collection in collection order.
///
/// ## Errors
/// Returns a database error if the query fails.
pub async fn list_members(conn: &mut DbConnection<'_>) -> QueryResult<Vec<Member>> {
    all().load(conn).await
}

/// ## Summary
/// Loads one page of members in collection order.
///
/// ## Errors
/// Returns a database error if the query fails.
pub async fn list_members_page(
    conn: &mut DbConnection<'_>,
    offset: i64,
    limit: i64,
) -> QueryResult<Vec<Member>> {
    all().offset(offset).limit(limit).load(conn).await
}

/// ## Summary
/// Counts all members.
///
/// ## Errors
/// Returns a database error if the query fails.
pub async fn count_members(conn: &mut DbConnection<'_>) -> QueryResult<i64> {
    member::table.count().get_result(conn).await
}

/// ## Summary
/// Retrieves a member by ID.
///
/// ## Errors
/// Returns a database error if the query fails.
pub async fn get_member(conn: &mut DbConnection<'_>, id: Uuid) -> QueryResult<Option<Member>> {
    by_id(id).first(conn).await.optional()
}

/// ## Summary
/// Inserts a new member and returns the inserted record.
///
/// ## Errors
/// Returns a database error if the insert fails.
pub async fn create_member(
    conn: &mut DbConnection<'_>,
    new_member: &NewMember<'_>,
) -> QueryResult<Member> {
    diesel::insert_into(member::table)
        .values(new_member)
        .returning(Member::as_returning())
        .get_result(conn)
        .await
}

/// ## Summary
/// Replaces a member's editable fields. Returns `None` if no such member exists.
///
/// ## Errors
/// Returns a database error if the update fails.
pub async fn update_member(
    conn: &mut DbConnection<'_>,
    id: Uuid,
    changes: &MemberChangeset<'_>,
) -> QueryResult<Option<Member>> {
    diesel::update(member::table.find(id))
        .set(changes)
        .returning(Member::as_returning())
        .get_result(conn)
        .await
        .optional()
}

/// ## Summary
/// Clears the spiritual parent of every member that points at `parent_id`.
///
/// ## Errors
/// Returns a database error if the update fails.
pub async fn detach_children(conn: &mut DbConnection<'_>, parent_id: Uuid) -> QueryResult<usize> {
    diesel::update(member::table.filter(member::spiritual_parent_id.eq(parent_id)))
        .set(member::spiritual_parent_id.eq(None::<Uuid>))
        .execute(conn)
        .await
}

/// ## Summary
/// Deletes a member, returning the number of rows removed.
///
/// ## Errors
/// Returns a database error if the delete fails.
pub async fn delete_member(conn: &mut DbConnection<'_>, id: Uuid) -> QueryResult<usize> {
    diesel::delete(member::table.find(id)).execute(conn).await
}
