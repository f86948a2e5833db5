//! One-shot completion celebration.

use chrono::{DateTime, Duration, Utc};

/// How long the celebration stays visible by default, in milliseconds.
pub const DEFAULT_CELEBRATION_MILLIS: i64 = 2_000;

/// Presentational flag raised when a task is moved into `done`.
///
/// Triggering sets a visible-until deadline; triggering again while visible
/// restarts it. The flag never affects task data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Celebration {
    duration: Duration,
    visible_until: Option<DateTime<Utc>>,
}

impl Celebration {
    /// Creates a hidden celebration with the given display duration.
    #[must_use]
    pub const fn new(duration: Duration) -> Self {
        Self {
            duration,
            visible_until: None,
        }
    }

    /// Shows the celebration from `now` until `now + duration`.
    pub fn trigger(&mut self, now: DateTime<Utc>) {
        self.visible_until = Some(now + self.duration);
    }

    /// Returns `true` while the deadline has not passed.
    #[must_use]
    pub fn is_visible(&self, now: DateTime<Utc>) -> bool {
        self.visible_until.is_some_and(|deadline| now < deadline)
    }

    /// Returns the current deadline, if shown.
    #[must_use]
    pub const fn visible_until(&self) -> Option<DateTime<Utc>> {
        self.visible_until
    }

    /// Clears the flag once its deadline has passed.
    ///
    /// Returns `true` when this call hid the celebration.
    pub fn expire(&mut self, now: DateTime<Utc>) -> bool {
        match self.visible_until {
            Some(deadline) if now >= deadline => {
                self.visible_until = None;
                true
            }
            _ => false,
        }
    }
}

impl Default for Celebration {
    fn default() -> Self {
        Self::new(Duration::milliseconds(DEFAULT_CELEBRATION_MILLIS))
    }
}
