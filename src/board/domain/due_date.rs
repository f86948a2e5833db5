//! Due-date classification relative to the current time.

use chrono::{DateTime, NaiveDate, Utc};
use std::fmt;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Human-facing description of how far away a due date is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueDateLabel {
    /// The due date passed this many days ago.
    Overdue(u32),
    /// Due within the next day's worth of time.
    Today,
    /// Due in one day.
    Tomorrow,
    /// Due in two to seven days.
    InDays(u32),
    /// Due further out than a week.
    On(NaiveDate),
}

impl DueDateLabel {
    /// Classifies `due` relative to `now`.
    ///
    /// Day counts round up, so anything due later today is `Today` and
    /// anything due less than a full day ago is already one day overdue.
    #[must_use]
    pub fn classify(due: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let days = days_until(due, now);
        match days {
            d if d < 0 => Self::Overdue(saturate(d.unsigned_abs())),
            0 => Self::Today,
            1 => Self::Tomorrow,
            2..=7 => Self::InDays(saturate(days.unsigned_abs())),
            _ => Self::On(due.date_naive()),
        }
    }
}

impl fmt::Display for DueDateLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overdue(days) => write!(f, "{days} days overdue"),
            Self::Today => f.write_str("Due today"),
            Self::Tomorrow => f.write_str("Due tomorrow"),
            Self::InDays(days) => write!(f, "Due in {days} days"),
            Self::On(date) => write!(f, "{}", date.format("%b %-d, %Y")),
        }
    }
}

/// Returns `true` when the due date's calendar day is before today.
#[must_use]
pub fn is_overdue(due: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    due.date_naive() < now.date_naive()
}

/// Returns `true` when the task is due within the next two days.
#[must_use]
pub fn is_upcoming(due: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    (0..=2).contains(&days_until(due, now))
}

fn days_until(due: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let millis = (due - now).num_milliseconds();
    // Ceiling division that also holds for negative spans.
    -(-millis).div_euclid(MILLIS_PER_DAY)
}

fn saturate(days: u64) -> u32 {
    u32::try_from(days).unwrap_or(u32::MAX)
}
