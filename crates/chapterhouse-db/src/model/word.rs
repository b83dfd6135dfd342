use chrono::{DateTime, Utc};
use diesel::{pg::Pg, prelude::*};
use serde::Serialize;
use uuid::Uuid;

use crate::db::{enums::ItemStatus, schema};

#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable, Serialize)]
#[diesel(table_name = schema::word_of_day)]
#[diesel(check_for_backend(Pg))]
#[serde(rename_all = "camelCase")]
pub struct WordOfDay {
    pub id: Uuid,
    pub title: String,
    pub text: String,
    pub attribution: Option<String>,
    pub status: ItemStatus,
    pub tags: Vec<String>,
    #[serde(rename = "date")]
    pub display_date: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::word_of_day)]
pub struct NewWordOfDay<'a> {
    pub id: Uuid,
    pub title: &'a str,
    pub text: &'a str,
    pub attribution: Option<&'a str>,
    pub status: ItemStatus,
    pub tags: Vec<String>,
    pub display_date: Option<&'a str>,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = schema::word_of_day)]
#[diesel(treat_none_as_null = true)]
pub struct WordOfDayChangeset<'a> {
    pub title: &'a str,
    pub text: &'a str,
    pub attribution: Option<&'a str>,
    pub status: ItemStatus,
    pub tags: Vec<String>,
    pub display_date: Option<&'a str>,
}
