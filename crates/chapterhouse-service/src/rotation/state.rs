//! Pure rotation state machine.
//!
//! Nothing here touches the database; the service loads a setting and the
//! due entries, runs [`apply_due_changes`], then writes back whatever changed.

use chapterhouse_db::db::enums::RotationMode;
use chapterhouse_db::model::rotation::{RotationSetting, RotationSettingChangeset, ScheduleEntry};
use chrono::{DateTime, Utc};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;
use uuid::Uuid;

/// What a change resolves to once it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeTarget {
    Random,
    Fixed(Uuid),
}

impl ChangeTarget {
    /// `None` for a fixed change without an item, which can never apply.
    #[must_use]
    pub const fn from_parts(mode: RotationMode, scheduled_id: Option<Uuid>) -> Option<Self> {
        match (mode, scheduled_id) {
            (RotationMode::Random, _) => Some(Self::Random),
            (RotationMode::Fixed, Some(id)) => Some(Self::Fixed(id)),
            (RotationMode::Fixed, None) => None,
        }
    }

    #[must_use]
    pub const fn mode(self) -> RotationMode {
        match self {
            Self::Random => RotationMode::Random,
            Self::Fixed(_) => RotationMode::Fixed,
        }
    }

    #[must_use]
    pub const fn scheduled_id(self) -> Option<Uuid> {
        match self {
            Self::Random => None,
            Self::Fixed(id) => Some(id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingChange {
    pub at: DateTime<Utc>,
    pub target: ChangeTarget,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Steady,
    Scheduled(PendingChange),
}

/// In-memory view of the rotation setting.
///
/// `mode` and `scheduled_id` are what an admin last asked for. While
/// `Scheduled`, they always agree with the pending target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationState {
    pub current: Option<Uuid>,
    pub mode: RotationMode,
    pub scheduled_id: Option<Uuid>,
    pub phase: Phase,
}

impl RotationState {
    /// Reads a stored setting. A pending change with an unusable target
    /// loads as `Steady`.
    #[must_use]
    pub fn from_setting(setting: &RotationSetting) -> Self {
        let target = ChangeTarget::from_parts(setting.mode, setting.scheduled_id);
        let phase = match (setting.next_change_at, target) {
            (Some(at), Some(target)) => Phase::Scheduled(PendingChange { at, target }),
            _ => Phase::Steady,
        };
        let scheduled_id = match setting.mode {
            RotationMode::Fixed => setting.scheduled_id,
            RotationMode::Random => None,
        };

        Self {
            current: setting.current_id,
            mode: setting.mode,
            scheduled_id,
            phase,
        }
    }

    /// Records a new target; with `at` unset no change is pending.
    pub fn schedule(&mut self, target: ChangeTarget, at: Option<DateTime<Utc>>) {
        self.mode = target.mode();
        self.scheduled_id = target.scheduled_id();
        self.phase = match at {
            Some(at) => Phase::Scheduled(PendingChange { at, target }),
            None => Phase::Steady,
        };
    }

    #[must_use]
    pub const fn next_change_at(&self) -> Option<DateTime<Utc>> {
        match self.phase {
            Phase::Steady => None,
            Phase::Scheduled(pending) => Some(pending.at),
        }
    }

    #[must_use]
    pub fn to_changeset(&self) -> RotationSettingChangeset {
        RotationSettingChangeset {
            current_id: self.current,
            mode: self.mode,
            next_change_at: self.next_change_at(),
            scheduled_id: self.scheduled_id,
        }
    }

    #[must_use]
    pub fn summary(&self, now: DateTime<Utc>) -> RotationSummary {
        let phase = match self.phase {
            Phase::Steady => PhaseKind::Steady,
            Phase::Scheduled(pending) if pending.at <= now => PhaseKind::Due,
            Phase::Scheduled(_) => PhaseKind::Scheduled,
        };

        RotationSummary {
            mode: self.mode,
            next_change_at: self.next_change_at(),
            scheduled_id: self.scheduled_id,
            phase,
        }
    }
}

/// The stored row as a changeset, for comparing against a new state.
#[must_use]
pub fn stored_changeset(setting: &RotationSetting) -> RotationSettingChangeset {
    RotationSettingChangeset {
        current_id: setting.current_id,
        mode: setting.mode,
        next_change_at: setting.next_change_at,
        scheduled_id: setting.scheduled_id,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseKind {
    Steady,
    Scheduled,
    Due,
}

/// Admin-facing description of the rotation setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RotationSummary {
    pub mode: RotationMode,
    pub next_change_at: Option<DateTime<Utc>>,
    pub scheduled_id: Option<Uuid>,
    pub phase: PhaseKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: RotationState,
    /// Entries to delete, whether or not they had an effect.
    pub consumed: Vec<Uuid>,
    pub applied: usize,
}

/// Whether running the transition at `now` may need the published ids.
#[must_use]
pub fn needs_published(
    state: &RotationState,
    entries: &[ScheduleEntry],
    now: DateTime<Utc>,
) -> bool {
    let pending_random = matches!(
        state.phase,
        Phase::Scheduled(PendingChange { at, target: ChangeTarget::Random }) if at <= now
    );
    pending_random
        || entries
            .iter()
            .any(|entry| entry.change_at <= now && entry.mode == RotationMode::Random)
}

/// ## Summary
/// Applies every change due at `now` to `state`.
///
/// Due schedule entries go first, earliest `change_at` first, and the last
/// one applied wins. The setting's own pending change goes after them. A
/// random pick with no published items keeps the current item.
pub fn apply_due_changes<R: Rng + ?Sized>(
    state: &RotationState,
    entries: &[ScheduleEntry],
    now: DateTime<Utc>,
    published: &[Uuid],
    rng: &mut R,
) -> Transition {
    let mut due: Vec<&ScheduleEntry> = entries
        .iter()
        .filter(|entry| entry.change_at <= now)
        .collect();
    due.sort_by_key(|entry| entry.change_at);

    let mut next = *state;
    let mut consumed = Vec::with_capacity(due.len());
    let mut applied = 0;

    for entry in due {
        consumed.push(entry.id);
        match ChangeTarget::from_parts(entry.mode, entry.scheduled_id) {
            Some(target) => {
                next.current = resolve(target, next.current, published, rng);
                applied += 1;
            }
            None => {
                tracing::warn!(entry = %entry.id, "Dropping fixed schedule entry without an item");
            }
        }
    }

    if let Phase::Scheduled(pending) = next.phase
        && pending.at <= now
    {
        next.current = resolve(pending.target, next.current, published, rng);
        next.phase = Phase::Steady;
        next.scheduled_id = None;
        applied += 1;
    }

    Transition {
        state: next,
        consumed,
        applied,
    }
}

fn resolve<R: Rng + ?Sized>(
    target: ChangeTarget,
    current: Option<Uuid>,
    published: &[Uuid],
    rng: &mut R,
) -> Option<Uuid> {
    match target {
        ChangeTarget::Fixed(id) => Some(id),
        ChangeTarget::Random => published.choose(rng).copied().or(current),
    }
}
