//! Word-of-the-day rotation.
//!
//! The rotator is lazy: a due change is only applied when somebody asks for
//! the current item. Two sources of changes exist, the setting's own pending
//! change and calendar entries in `rotation_schedule`.

mod calendar;
mod service;
mod state;
mod types;

pub use calendar::{ResolvedDates, parse_time, parse_timezone, resolve_dates};
pub use service::{
    add_calendar_schedule, delete_schedule_entry, get_current, list_schedule, schedule_change,
    set_current, upsert_calendar_schedule,
};
pub use state::{
    ChangeTarget, PendingChange, Phase, PhaseKind, RotationState, RotationSummary, Transition,
    apply_due_changes, needs_published, stored_changeset,
};
pub use types::{
    CalendarSchedule, CalendarScheduleResult, CurrentWord, FALLBACK_ATTRIBUTION, FALLBACK_TEXT,
    FALLBACK_TITLE, ScheduleChange,
};
