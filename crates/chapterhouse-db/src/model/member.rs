use chrono::{DateTime, Utc};
use diesel::{pg::Pg, prelude::*};
use serde::Serialize;
use uuid::Uuid;

use crate::db::schema;

/// Directory member. `spiritual_parent_id` is an unchecked reference to
/// another member.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable, Serialize)]
#[diesel(table_name = schema::member)]
#[diesel(check_for_backend(Pg))]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: Uuid,
    pub full_name: String,
    pub email: Option<String>,
    pub church: Option<String>,
    pub membership_category: Option<String>,
    pub age_group: Option<String>,
    #[serde(rename = "spiritualParent")]
    pub spiritual_parent_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::member)]
pub struct NewMember<'a> {
    pub id: Uuid,
    pub full_name: &'a str,
    pub email: Option<&'a str>,
    pub church: Option<&'a str>,
    pub membership_category: Option<&'a str>,
    pub age_group: Option<&'a str>,
    pub spiritual_parent_id: Option<Uuid>,
}

/// Full replacement of a member's editable fields; `None` clears a column.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = schema::member)]
#[diesel(treat_none_as_null = true)]
pub struct MemberChangeset<'a> {
    pub full_name: &'a str,
    pub email: Option<&'a str>,
    pub church: Option<&'a str>,
    pub membership_category: Option<&'a str>,
    pub age_group: Option<&'a str>,
    pub spiritual_parent_id: Option<Uuid>,
}
