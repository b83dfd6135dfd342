//! Member directory maintenance.

use chapterhouse_core::util::pagination::{PageRequest, Pagination};
use chapterhouse_db::db::connection::DbConnection;
use chapterhouse_db::db::query::member as member_query;
use chapterhouse_db::model::member::{Member, MemberChangeset, NewMember};
use diesel_async::AsyncConnection;
use diesel_async::scoped_futures::ScopedFutureExt;
use serde::Serialize;
use uuid::Uuid;

use crate::error::{ServiceError, ServiceResult};

/// Editable member fields, as submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberInput {
    pub full_name: String,
    pub email: Option<String>,
    pub church: Option<String>,
    pub membership_category: Option<String>,
    pub age_group: Option<String>,
    pub spiritual_parent: Option<Uuid>,
}

impl MemberInput {
    /// ## Summary
    /// Trims every text field and turns blank optional fields into `None`.
    ///
    /// ## Errors
    /// Returns `ValidationError` if `full_name` is blank.
    pub fn normalized(self) -> ServiceResult<Self> {
        let full_name = self.full_name.trim().to_string();
        if full_name.is_empty() {
            return Err(ServiceError::ValidationError(
                "fullName must not be blank".to_string(),
            ));
        }

        Ok(Self {
            full_name,
            email: non_blank(self.email),
            church: non_blank(self.church),
            membership_category: non_blank(self.membership_category),
            age_group: non_blank(self.age_group),
            spiritual_parent: self.spiritual_parent,
        })
    }

    fn changeset(&self) -> MemberChangeset<'_> {
        MemberChangeset {
            full_name: &self.full_name,
            email: self.email.as_deref(),
            church: self.church.as_deref(),
            membership_category: self.membership_category.as_deref(),
            age_group: self.age_group.as_deref(),
            spiritual_parent_id: self.spiritual_parent,
        }
    }
}

pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberPage {
    pub members: Vec<Member>,
    pub pagination: Pagination,
}

/// ## Summary
/// Lists one page of members in collection order.
///
/// ## Errors
/// Returns a database error if a query fails.
#[tracing::instrument(skip(conn))]
pub async fn list_members(
    conn: &mut DbConnection<'_>,
    page: PageRequest,
) -> ServiceResult<MemberPage> {
    let total = member_query::count_members(conn).await?;
    let members = member_query::list_members_page(
        conn,
        i64::try_from(page.offset()).unwrap_or(i64::MAX),
        i64::try_from(page.limit()).unwrap_or(i64::MAX),
    )
    .await?;

    Ok(MemberPage {
        members,
        pagination: page.pagination(usize::try_from(total).unwrap_or_default()),
    })
}

/// ## Errors
/// Returns `NotFound` if no member has this id, or a database error.
#[tracing::instrument(skip(conn))]
pub async fn get_member(conn: &mut DbConnection<'_>, id: Uuid) -> ServiceResult<Member> {
    member_query::get_member(conn, id)
        .await?
        .ok_or_else(|| ServiceError::not_found("member", id))
}

/// ## Summary
/// Creates a member after validating its fields and spiritual parent.
///
/// ## Errors
/// Returns `ValidationError` for a blank name, `NotFound` for an unknown
/// spiritual parent, or a database error.
#[tracing::instrument(skip(conn))]
pub async fn create_member(
    conn: &mut DbConnection<'_>,
    input: MemberInput,
) -> ServiceResult<Member> {
    let input = input.normalized()?;
    let id = Uuid::now_v7();
    ensure_parent(conn, id, input.spiritual_parent).await?;

    let new_member = NewMember {
        id,
        full_name: &input.full_name,
        email: input.email.as_deref(),
        church: input.church.as_deref(),
        membership_category: input.membership_category.as_deref(),
        age_group: input.age_group.as_deref(),
        spiritual_parent_id: input.spiritual_parent,
    };
    let created = member_query::create_member(conn, &new_member).await?;

    tracing::info!(member = %created.id, "Member created");
    Ok(created)
}

/// ## Summary
/// Replaces every editable field of a member.
///
/// ## Errors
/// Returns `ValidationError` for a blank name or a self reference,
/// `NotFound` for an unknown member or spiritual parent, or a database error.
#[tracing::instrument(skip(conn))]
pub async fn update_member(
    conn: &mut DbConnection<'_>,
    id: Uuid,
    input: MemberInput,
) -> ServiceResult<Member> {
    let input = input.normalized()?;
    ensure_parent(conn, id, input.spiritual_parent).await?;

    let updated = member_query::update_member(conn, id, &input.changeset())
        .await?
        .ok_or_else(|| ServiceError::not_found("member", id))?;

    tracing::info!(member = %id, "Member updated");
    Ok(updated)
}

async fn ensure_parent(
    conn: &mut DbConnection<'_>,
    id: Uuid,
    parent: Option<Uuid>,
) -> ServiceResult<()> {
    let Some(parent) = parent else {
        return Ok(());
    };
    if parent == id {
        return Err(ServiceError::ValidationError(
            "a member cannot be their own spiritual parent".to_string(),
        ));
    }
    if member_query::get_member(conn, parent).await?.is_none() {
        return Err(ServiceError::not_found("spiritual parent", parent));
    }
    Ok(())
}

/// ## Summary
/// Deletes a member. Its direct children lose their spiritual parent.
///
/// ## Errors
/// Returns `NotFound` if no member has this id, or a database error.
#[tracing::instrument(skip(conn))]
pub async fn delete_member(conn: &mut DbConnection<'_>, id: Uuid) -> ServiceResult<()> {
    let detached = conn
        .transaction::<_, ServiceError, _>(move |tx| {
            async move {
                let detached = member_query::detach_children(tx, id).await?;
                match member_query::delete_member(tx, id).await? {
                    0 => Err(ServiceError::not_found("member", id)),
                    _ => Ok(detached),
                }
            }
            .scope_boxed()
        })
        .await?;

    tracing::info!(member = %id, detached, "Member deleted");
    Ok(())
}
