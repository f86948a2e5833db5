//! Shared world state for board drag-and-drop BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskboard::board::{
    adapters::memory::{InMemoryCategoryStore, InMemoryTaskStore},
    domain::{OwnerId, Task, TaskId},
    services::{BoardController, DragOutcome},
};
use uuid::Uuid;

/// Controller type used by the BDD world.
pub type TestController = BoardController<InMemoryTaskStore, InMemoryCategoryStore, DefaultClock>;

/// Scenario world for drag-and-drop behaviour tests.
pub struct BoardDragWorld {
    pub store: InMemoryTaskStore,
    pub controller: TestController,
    pub last_outcome: Option<DragOutcome>,
}

impl BoardDragWorld {
    /// Creates a world with an empty board.
    #[must_use]
    pub fn new() -> Self {
        let store = InMemoryTaskStore::new();
        let controller = BoardController::new(
            Arc::new(store.clone()),
            Arc::new(InMemoryCategoryStore::new()),
            Arc::new(DefaultClock),
            owner(),
        );

        Self {
            store,
            controller,
            last_outcome: None,
        }
    }

    /// Looks up a task on the board by title.
    ///
    /// # Errors
    ///
    /// Returns an error when no task has that title.
    pub fn task_id(&self, title: &str) -> Result<TaskId, eyre::Report> {
        self.controller
            .tasks()
            .iter()
            .find(|task| task.title().as_str() == title)
            .map(Task::id)
            .ok_or_else(|| eyre::eyre!("no task titled {title} on the board"))
    }
}

impl Default for BoardDragWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Owner of every board built by the scenarios.
#[must_use]
pub fn owner() -> OwnerId {
    OwnerId::from_uuid(Uuid::from_u128(0x00b0_a4d0))
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BoardDragWorld {
    BoardDragWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Splits a comma-separated scenario list.
pub fn split_titles(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .map(str::to_owned)
        .collect()
}
