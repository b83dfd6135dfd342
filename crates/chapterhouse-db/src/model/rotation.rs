use chrono::{DateTime, Utc};
use diesel::{pg::Pg, prelude::*};
use serde::Serialize;
use uuid::Uuid;

use crate::db::{enums::RotationMode, schema};

/// Primary key of the only `rotation_setting` row.
pub const SETTING_ID: i16 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = schema::rotation_setting)]
#[diesel(check_for_backend(Pg))]
pub struct RotationSetting {
    pub id: i16,
    pub current_id: Option<Uuid>,
    pub mode: RotationMode,
    pub next_change_at: Option<DateTime<Utc>>,
    pub scheduled_id: Option<Uuid>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::rotation_setting)]
pub struct NewRotationSetting {
    pub id: i16,
    pub mode: RotationMode,
}

impl Default for NewRotationSetting {
    fn default() -> Self {
        Self {
            id: SETTING_ID,
            mode: RotationMode::default(),
        }
    }
}

/// Whole-row write of the singleton; `None` clears a column.
#[derive(Debug, Clone, PartialEq, Eq, AsChangeset)]
#[diesel(table_name = schema::rotation_setting)]
#[diesel(treat_none_as_null = true)]
pub struct RotationSettingChangeset {
    pub current_id: Option<Uuid>,
    pub mode: RotationMode,
    pub next_change_at: Option<DateTime<Utc>>,
    pub scheduled_id: Option<Uuid>,
}

/// Calendar-driven change waiting in `rotation_schedule`.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable, Serialize)]
#[diesel(table_name = schema::rotation_schedule)]
#[diesel(check_for_backend(Pg))]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    pub id: Uuid,
    pub mode: RotationMode,
    pub change_at: DateTime<Utc>,
    pub scheduled_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::rotation_schedule)]
pub struct NewScheduleEntry {
    pub id: Uuid,
    pub mode: RotationMode,
    pub change_at: DateTime<Utc>,
    pub scheduled_id: Option<Uuid>,
}
