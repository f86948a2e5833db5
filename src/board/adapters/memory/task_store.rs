//! In-memory task store with failure injection.

use async_trait::async_trait;
use mockable::DefaultClock;
use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use crate::board::{
    domain::{Task, TaskId, TaskPatch, TaskStatus},
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
};

/// Store operations that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskStoreOperation {
    /// [`TaskStore::list`].
    List,
    /// [`TaskStore::create`].
    Create,
    /// [`TaskStore::update`].
    Update,
    /// [`TaskStore::update_status_and_position`].
    UpdateStatusAndPosition,
    /// [`TaskStore::delete`].
    Delete,
}

/// Thread-safe in-memory task store.
///
/// Records are kept in insertion order; listings sort by position with
/// ties resolved by insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskStore {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: Vec<Task>,
    failing: HashSet<TaskStoreOperation>,
    position_updates: Vec<(TaskId, TaskStatus, u32)>,
}

/// Error injected by [`InMemoryTaskStore::fail_on`].
#[derive(Debug, Clone, thiserror::Error)]
#[error("injected failure for {0:?}")]
struct InjectedFailure(TaskStoreOperation);

impl InMemoryTaskStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with tasks.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when lock acquisition fails.
    pub fn with_tasks(tasks: impl IntoIterator<Item = Task>) -> TaskStoreResult<Self> {
        let store = Self::new();
        store.write()?.tasks.extend(tasks);
        Ok(store)
    }

    /// Makes every later call of `operation` fail with a persistence error.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when lock acquisition fails.
    pub fn fail_on(&self, operation: TaskStoreOperation) -> TaskStoreResult<()> {
        self.write()?.failing.insert(operation);
        Ok(())
    }

    /// Removes all injected failures.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when lock acquisition fails.
    pub fn clear_failures(&self) -> TaskStoreResult<()> {
        self.write()?.failing.clear();
        Ok(())
    }

    /// Returns every `update_status_and_position` call received, including
    /// failed ones.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when lock acquisition fails.
    pub fn position_updates(&self) -> TaskStoreResult<Vec<(TaskId, TaskStatus, u32)>> {
        Ok(self.read()?.position_updates.clone())
    }

    fn read(&self) -> TaskStoreResult<std::sync::RwLockReadGuard<'_, InMemoryTaskState>> {
        self.state
            .read()
            .map_err(|err| TaskStoreError::persistence(std::io::Error::other(err.to_string())))
    }

    fn write(&self) -> TaskStoreResult<std::sync::RwLockWriteGuard<'_, InMemoryTaskState>> {
        self.state
            .write()
            .map_err(|err| TaskStoreError::persistence(std::io::Error::other(err.to_string())))
    }
}

impl InMemoryTaskState {
    fn check(&self, operation: TaskStoreOperation) -> TaskStoreResult<()> {
        if self.failing.contains(&operation) {
            return Err(TaskStoreError::persistence(InjectedFailure(operation)));
        }
        Ok(())
    }

    fn find_mut(&mut self, id: TaskId) -> TaskStoreResult<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|task| task.id() == id)
            .ok_or(TaskStoreError::NotFound(id))
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn list(&self) -> TaskStoreResult<Vec<Task>> {
        let state = self.read()?;
        state.check(TaskStoreOperation::List)?;
        let mut tasks = state.tasks.clone();
        tasks.sort_by_key(Task::position);
        Ok(tasks)
    }

    async fn create(&self, task: &Task) -> TaskStoreResult<Task> {
        let mut state = self.write()?;
        state.check(TaskStoreOperation::Create)?;
        if state.tasks.iter().any(|existing| existing.id() == task.id()) {
            return Err(TaskStoreError::DuplicateTask(task.id()));
        }
        state.tasks.push(task.clone());
        Ok(task.clone())
    }

    async fn update(&self, id: TaskId, patch: &TaskPatch) -> TaskStoreResult<Task> {
        let mut state = self.write()?;
        state.check(TaskStoreOperation::Update)?;
        let task = state.find_mut(id)?;
        task.apply_patch(patch, &DefaultClock);
        Ok(task.clone())
    }

    async fn update_status_and_position(
        &self,
        id: TaskId,
        status: TaskStatus,
        position: u32,
    ) -> TaskStoreResult<()> {
        let mut state = self.write()?;
        state.position_updates.push((id, status, position));
        state.check(TaskStoreOperation::UpdateStatusAndPosition)?;
        let task = state.find_mut(id)?;
        task.relocate(status, position, &DefaultClock);
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> TaskStoreResult<()> {
        let mut state = self.write()?;
        state.check(TaskStoreOperation::Delete)?;
        let before = state.tasks.len();
        state.tasks.retain(|task| task.id() != id);
        if state.tasks.len() == before {
            return Err(TaskStoreError::NotFound(id));
        }
        Ok(())
    }
}
