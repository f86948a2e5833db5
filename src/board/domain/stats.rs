//! Summary counters shown above the board.

use super::{Task, TaskStatus};

/// Task counts and completion rate.
///
/// `total` counts every task on the board; the column counts only cover
/// tasks passing the active filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoardStats {
    /// Number of tasks on the board.
    pub total: usize,
    /// Visible in-progress tasks.
    pub in_progress: usize,
    /// Visible finished tasks.
    pub done: usize,
    /// Visible finished tasks as a rounded percentage of all tasks.
    pub completion_rate: u8,
}

impl BoardStats {
    /// Computes statistics from the full collection and its visible subset.
    #[must_use]
    pub fn compute(all: &[Task], visible: &[&Task]) -> Self {
        let total = all.len();
        let count = |status: TaskStatus| {
            visible
                .iter()
                .filter(|task| task.status() == status)
                .count()
        };
        let done = count(TaskStatus::Done);
        Self {
            total,
            in_progress: count(TaskStatus::InProgress),
            done,
            completion_rate: rounded_percentage(done, total),
        }
    }
}

fn rounded_percentage(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    let rate = (part * 200 + whole).div_euclid(whole * 2);
    u8::try_from(rate.min(100)).unwrap_or(100)
}
