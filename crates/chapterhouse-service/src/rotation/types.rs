use chapterhouse_db::db::enums::RotationMode;
use chapterhouse_db::model::rotation::ScheduleEntry;
use chapterhouse_db::model::word::WordOfDay;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::state::RotationSummary;

pub const FALLBACK_TITLE: &str = "Word of the Day";
pub const FALLBACK_TEXT: &str =
    "Trust in the LORD with all your heart, and lean not on your own understanding.";
pub const FALLBACK_ATTRIBUTION: &str = "Proverbs 3:5";

/// The item on display plus the rotation summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentWord {
    /// `None` only for the built-in quote.
    pub id: Option<Uuid>,
    pub title: String,
    pub text: String,
    pub attribution: Option<String>,
    pub date: Option<String>,
    pub tags: Vec<String>,
    /// Set when no stored item could be resolved.
    pub fallback: bool,
    pub setting: RotationSummary,
}

impl CurrentWord {
    #[must_use]
    pub fn from_item(item: WordOfDay, setting: RotationSummary) -> Self {
        Self {
            id: Some(item.id),
            title: item.title,
            text: item.text,
            attribution: item.attribution,
            date: item.display_date,
            tags: item.tags,
            fallback: false,
            setting,
        }
    }

    #[must_use]
    pub fn fallback(setting: RotationSummary) -> Self {
        Self {
            id: None,
            title: FALLBACK_TITLE.to_string(),
            text: FALLBACK_TEXT.to_string(),
            attribution: Some(FALLBACK_ATTRIBUTION.to_string()),
            date: None,
            tags: Vec::new(),
            fallback: true,
            setting,
        }
    }
}

/// A change to the setting's own pending change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleChange {
    pub mode: RotationMode,
    pub change_at: Option<DateTime<Utc>>,
    pub scheduled_id: Option<Uuid>,
}

/// Calendar picks sharing one time of day and one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarSchedule {
    pub dates: Vec<String>,
    pub time: String,
    pub mode: RotationMode,
    pub scheduled_id: Option<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarScheduleResult {
    pub created: Vec<ScheduleEntry>,
    pub skipped: Vec<String>,
}
