//! Turning calendar picks into schedule instants.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{ServiceError, ServiceResult};

const TIME_FORMATS: [&str; 2] = ["%H:%M:%S", "%H:%M"];
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Instants resolved from a set of calendar dates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedDates {
    /// Unique instants in the order their dates were given.
    pub instants: Vec<DateTime<Utc>>,
    /// Raw inputs that did not name a valid local date and time.
    pub skipped: Vec<String>,
}

/// ## Summary
/// Parses a wall-clock time given as `HH:MM` or `HH:MM:SS`.
///
/// ## Errors
/// Returns `ValidationError` for anything else.
pub fn parse_time(raw: &str) -> ServiceResult<NaiveTime> {
    let raw = raw.trim();
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(raw, format).ok())
        .ok_or_else(|| {
            ServiceError::ValidationError(format!("time must be HH:MM or HH:MM:SS: '{raw}'"))
        })
}

/// ## Summary
/// Parses an IANA zone name such as `Asia/Manila`.
///
/// ## Errors
/// Returns `InvalidConfiguration` for an unknown zone.
pub fn parse_timezone(name: &str) -> ServiceResult<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|err| {
            ServiceError::InvalidConfiguration(format!("unknown timezone '{name}': {err}"))
        })
}

/// ## Summary
/// Combines each `YYYY-MM-DD` date with `time` in `zone`.
///
/// Unparseable dates and local times that do not exist in `zone` end up in
/// `skipped`. An ambiguous local time resolves to its earlier instant.
#[must_use]
pub fn resolve_dates(dates: &[String], time: NaiveTime, zone: Tz) -> ResolvedDates {
    let mut resolved = ResolvedDates::default();
    let mut seen = HashSet::new();

    for raw in dates {
        let instant = NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
            .ok()
            .and_then(|date| zone.from_local_datetime(&date.and_time(time)).earliest())
            .map(|local| local.with_timezone(&Utc));

        match instant {
            Some(instant) => {
                if seen.insert(instant) {
                    resolved.instants.push(instant);
                }
            }
            None => resolved.skipped.push(raw.clone()),
        }
    }

    resolved
}
