//! Shared fixtures for board unit tests.

use crate::board::domain::{
    CategoryId, NewTask, OwnerId, Priority, Task, TaskId, TaskStatus, TaskTitle,
};
use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;
use std::sync::Mutex;
use uuid::Uuid;

/// Clock frozen at a chosen instant that tests can move forward.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().expect("clock lock");
        *now += by;
    }
}

impl Default for FixedClock {
    fn default() -> Self {
        Self::at(noon())
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock lock")
    }
}

/// 2025-03-10 12:00:00 UTC.
pub fn noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub fn owner() -> OwnerId {
    OwnerId::from_uuid(Uuid::from_u128(0x0042))
}

/// Builds a task in `status` at `position`.
pub fn task(title: &str, status: TaskStatus, position: u32) -> Task {
    Task::new(
        NewTask {
            title: TaskTitle::new(title).expect("valid title"),
            description: String::new(),
            status,
            priority: Priority::Medium,
            category_id: None,
            due_date: None,
            position,
            owner_id: owner(),
        },
        &FixedClock::default(),
    )
}

/// Builds a task with a description and category.
pub fn tagged_task(
    title: &str,
    description: &str,
    category_id: Option<CategoryId>,
    status: TaskStatus,
) -> Task {
    Task::new(
        NewTask {
            title: TaskTitle::new(title).expect("valid title"),
            description: description.to_owned(),
            status,
            priority: Priority::Medium,
            category_id,
            due_date: None,
            position: 0,
            owner_id: owner(),
        },
        &FixedClock::default(),
    )
}

/// Returns the titles of a column in position order.
pub fn titles(tasks: &[&Task]) -> Vec<String> {
    tasks
        .iter()
        .map(|task| task.title().as_str().to_owned())
        .collect()
}

pub fn find(tasks: &[Task], id: TaskId) -> &Task {
    tasks
        .iter()
        .find(|task| task.id() == id)
        .expect("task present")
}
