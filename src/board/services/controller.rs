//! Board controller: drag orchestration, optimistic updates and reconciliation.
//!
//! The controller owns the single in-memory task collection. Column views,
//! filters and statistics are derived from it on every read. A drag is a
//! two-phase commit: the ordering engine's candidate state is applied
//! locally, then the moved task's placement is persisted. When persistence
//! fails the candidate is discarded by reloading from the stores; the
//! controller never tries to invert a move.

use crate::board::{
    domain::{
        BoardStats, Category, CategoryId, CategoryName, Celebration, DropTarget, MoveInstruction,
        NewTask, OwnerId, Placement, Priority, Task, TaskDomainError, TaskFilter, TaskId,
        TaskPatch, TaskStatus, TaskTitle, ordering,
    },
    ports::{CategoryStore, CategoryStoreError, TaskStore, TaskStoreError},
};
use chrono::{DateTime, Duration, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    title: String,
    description: String,
    status: TaskStatus,
    priority: Priority,
    category_id: Option<CategoryId>,
    due_date: Option<DateTime<Utc>>,
}

impl TaskDraft {
    /// Creates a draft for a medium-priority `todo` task.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            status: TaskStatus::Todo,
            priority: Priority::default(),
            category_id: None,
            due_date: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the starting column.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Tags the task with a category.
    #[must_use]
    pub const fn with_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }
}

/// Service-level errors for board operations.
#[derive(Debug, Error)]
pub enum BoardError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Task store operation failed.
    #[error(transparent)]
    TaskStore(#[from] TaskStoreError),
    /// Category store operation failed.
    #[error(transparent)]
    CategoryStore(#[from] CategoryStoreError),
    /// The category is not one of the owner's categories.
    #[error("category {0} does not belong to this board")]
    UnknownCategory(CategoryId),
}

/// Result type for board operations.
pub type BoardResult<T> = Result<T, BoardError>;

/// What a completed drag did.
#[derive(Debug, Clone)]
pub enum DragOutcome {
    /// Released outside any target, or the task is no longer on the board.
    Ignored,
    /// Dropped where it already was.
    Unchanged,
    /// The new placement was applied and stored.
    Persisted(Placement),
    /// Storing failed; the board was reloaded from the store.
    RolledBack {
        /// Placement that was attempted.
        placement: Placement,
        /// Store failure.
        error: TaskStoreError,
    },
}

/// Confirmation token required to delete a task.
///
/// Dropping the token cancels the deletion.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a deletion only happens once the token is confirmed"]
pub struct PendingDeletion {
    task_id: TaskId,
}

impl PendingDeletion {
    /// Returns the task awaiting deletion.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }
}

/// Board state and orchestration for one owner's session.
pub struct BoardController<T, C, K>
where
    T: TaskStore,
    C: CategoryStore,
    K: Clock + Send + Sync,
{
    task_store: Arc<T>,
    category_store: Arc<C>,
    clock: Arc<K>,
    owner_id: OwnerId,
    tasks: Vec<Task>,
    categories: Vec<Category>,
    filter: TaskFilter,
    active_drag: Option<TaskId>,
    celebration: Celebration,
    loading: bool,
}

impl<T, C, K> BoardController<T, C, K>
where
    T: TaskStore,
    C: CategoryStore,
    K: Clock + Send + Sync,
{
    /// Creates an empty board; call [`Self::load`] to populate it.
    #[must_use]
    pub fn new(task_store: Arc<T>, category_store: Arc<C>, clock: Arc<K>, owner_id: OwnerId) -> Self {
        Self {
            task_store,
            category_store,
            clock,
            owner_id,
            tasks: Vec::new(),
            categories: Vec::new(),
            filter: TaskFilter::new(),
            active_drag: None,
            celebration: Celebration::default(),
            loading: false,
        }
    }

    /// Overrides how long the completion celebration stays visible.
    #[must_use]
    pub const fn with_celebration_duration(mut self, duration: Duration) -> Self {
        self.celebration = Celebration::new(duration);
        self
    }

    /// Returns the board owner.
    #[must_use]
    pub const fn owner_id(&self) -> OwnerId {
        self.owner_id
    }

    /// Returns every task in collection order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the loaded categories ordered by name.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Returns `true` while a reload is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Performs the initial load.
    ///
    /// # Errors
    ///
    /// See [`Self::reload`].
    pub async fn load(&mut self) -> BoardResult<()> {
        self.reload().await
    }

    /// Replaces local state with the stores' authoritative state.
    ///
    /// Seeds the owner's default categories first. On failure the previous
    /// state is kept and the error is logged.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError`] when any store call fails.
    pub async fn reload(&mut self) -> BoardResult<()> {
        self.loading = true;
        let fetched = self.fetch().await;
        self.loading = false;

        match fetched {
            Ok((tasks, categories)) => {
                debug!(
                    task_count = tasks.len(),
                    category_count = categories.len(),
                    "board reloaded"
                );
                self.tasks = tasks;
                self.categories = categories;
                Ok(())
            }
            Err(err) => {
                error!(error = %err, "failed to load board");
                Err(err)
            }
        }
    }

    async fn fetch(&self) -> BoardResult<(Vec<Task>, Vec<Category>)> {
        self.category_store.ensure_defaults(self.owner_id).await?;
        let (tasks, categories) = tokio::try_join!(
            async { self.task_store.list().await.map_err(BoardError::from) },
            async { self.category_store.list().await.map_err(BoardError::from) },
        )?;
        Ok((tasks, categories))
    }

    /// Reloads after a write. A failure is logged by `reload` and leaves the
    /// previous state in place.
    async fn refresh(&mut self) {
        if self.reload().await.is_err() {
            warn!("board state may be stale");
        }
    }

    // ── Drag and drop ──────────────────────────────────────────────────

    /// Starts a drag, returning the task to render as the drag overlay.
    pub fn begin_drag(&mut self, task_id: TaskId) -> Option<&Task> {
        self.active_drag = self
            .tasks
            .iter()
            .any(|task| task.id() == task_id)
            .then_some(task_id);
        self.active_drag()
    }

    /// Returns the task currently being dragged.
    #[must_use]
    pub fn active_drag(&self) -> Option<&Task> {
        let task_id = self.active_drag?;
        self.tasks.iter().find(|task| task.id() == task_id)
    }

    /// Abandons the current drag without moving anything.
    pub const fn cancel_drag(&mut self) {
        self.active_drag = None;
    }

    /// Finishes a drag released over `target`.
    ///
    /// Applies the move locally, then persists the moved task's status and
    /// position with a single store call. If that call fails the board is
    /// reloaded so local state matches the store again.
    pub async fn complete_drag(&mut self, task_id: TaskId, target: Option<DropTarget>) -> DragOutcome {
        self.active_drag = None;
        let Some(target) = target else {
            return DragOutcome::Ignored;
        };

        let planned = MoveInstruction::resolve(&self.tasks, task_id, target)
            .and_then(|instruction| ordering::plan_move(&self.tasks, &instruction));
        let plan = match planned {
            Ok(Some(plan)) => plan,
            Ok(None) => return DragOutcome::Unchanged,
            Err(err) => {
                warn!(%task_id, error = %err, "ignoring drop");
                return DragOutcome::Ignored;
            }
        };

        if plan.completes_task() {
            self.celebration.trigger(self.clock.utc());
        }

        let placement = plan.placement();
        self.tasks = plan.into_tasks();

        match self
            .task_store
            .update_status_and_position(placement.task_id, placement.status, placement.position)
            .await
        {
            Ok(()) => {
                debug!(
                    %task_id,
                    status = %placement.status,
                    position = placement.position,
                    "task placement stored"
                );
                DragOutcome::Persisted(placement)
            }
            Err(error) => {
                error!(%task_id, error = %error, "failed to store task placement; reloading board");
                self.refresh().await;
                DragOutcome::RolledBack { placement, error }
            }
        }
    }

    /// Returns `true` while the completion celebration should be shown.
    #[must_use]
    pub fn celebration_visible(&self) -> bool {
        self.celebration.is_visible(self.clock.utc())
    }

    /// Returns when the celebration hides itself, if it is showing.
    #[must_use]
    pub const fn celebration_deadline(&self) -> Option<DateTime<Utc>> {
        self.celebration.visible_until()
    }

    /// Clears the celebration once its deadline has passed.
    ///
    /// Returns `true` when this call hid it.
    pub fn clear_expired_celebration(&mut self) -> bool {
        self.celebration.expire(self.clock.utc())
    }

    // ── Task CRUD ──────────────────────────────────────────────────────

    /// Creates a task at the end of its column and reloads the board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Domain`] for a blank title,
    /// [`BoardError::UnknownCategory`] for a foreign category and
    /// [`BoardError::TaskStore`] when the store rejects the task.
    pub async fn create_task(&mut self, draft: TaskDraft) -> BoardResult<Task> {
        let TaskDraft {
            title: raw_title,
            description,
            status,
            priority,
            category_id,
            due_date,
        } = draft;

        let title = TaskTitle::new(raw_title)?;
        self.check_category(category_id)?;

        let position = u32::try_from(
            self.tasks
                .iter()
                .filter(|task| task.status() == status)
                .count(),
        )
        .unwrap_or(u32::MAX);
        let task = Task::new(
            NewTask {
                title,
                description,
                status,
                priority,
                category_id,
                due_date,
                position,
                owner_id: self.owner_id,
            },
            &*self.clock,
        );

        let stored = self.task_store.create(&task).await.map_err(|err| {
            error!(task_id = %task.id(), error = %err, "failed to create task");
            BoardError::from(err)
        })?;
        info!(task_id = %stored.id(), status = %stored.status(), "task created");
        self.refresh().await;
        Ok(stored)
    }

    /// Edits a task and reloads the board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::UnknownCategory`] for a foreign category and
    /// [`BoardError::TaskStore`] when the store rejects the edit.
    pub async fn update_task(&mut self, task_id: TaskId, patch: TaskPatch) -> BoardResult<Task> {
        self.check_category(patch.category_id().flatten())?;

        let updated = self.task_store.update(task_id, &patch).await.map_err(|err| {
            error!(%task_id, error = %err, "failed to update task");
            BoardError::from(err)
        })?;
        info!(%task_id, "task updated");
        self.refresh().await;
        Ok(updated)
    }

    /// Asks to delete a task, returning the token that confirms it.
    ///
    /// Returns `None` when the task is not on the board.
    pub fn request_delete(&self, task_id: TaskId) -> Option<PendingDeletion> {
        self.tasks
            .iter()
            .any(|task| task.id() == task_id)
            .then_some(PendingDeletion { task_id })
    }

    /// Deletes a task whose deletion was confirmed.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::TaskStore`] when the store rejects the delete;
    /// the task then stays on the board.
    pub async fn confirm_delete(&mut self, pending: PendingDeletion) -> BoardResult<()> {
        let task_id = pending.task_id;
        self.task_store.delete(task_id).await.map_err(|err| {
            error!(%task_id, error = %err, "failed to delete task");
            BoardError::from(err)
        })?;
        self.tasks.retain(|task| task.id() != task_id);
        info!(%task_id, "task deleted");
        Ok(())
    }

    // ── Categories ─────────────────────────────────────────────────────

    /// Returns the category a task is tagged with.
    ///
    /// A reference to a deleted category resolves to `None`.
    #[must_use]
    pub fn category_of(&self, task: &Task) -> Option<&Category> {
        let category_id = task.category_id()?;
        self.categories
            .iter()
            .find(|category| category.id() == category_id)
    }

    /// Creates a category for the owner and reloads the board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Domain`] for a blank name and
    /// [`BoardError::CategoryStore`] when the name is taken or the store
    /// fails.
    pub async fn create_category(
        &mut self,
        name: impl Into<String>,
        color: impl Into<String>,
        icon: impl Into<String>,
    ) -> BoardResult<Category> {
        let name = CategoryName::new(name)?;
        let category = Category::new(name, color, icon, self.owner_id, &*self.clock);
        let stored = self.category_store.create(&category).await.map_err(|err| {
            error!(error = %err, "failed to create category");
            BoardError::from(err)
        })?;
        self.refresh().await;
        Ok(stored)
    }

    /// Deletes a category and reloads the board.
    ///
    /// Tasks tagged with it are kept and show no category.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::CategoryStore`] when the store fails.
    pub async fn delete_category(&mut self, category_id: CategoryId) -> BoardResult<()> {
        self.category_store.delete(category_id).await.map_err(|err| {
            error!(%category_id, error = %err, "failed to delete category");
            BoardError::from(err)
        })?;
        if self.filter.category() == Some(category_id) {
            self.filter = self.filter.clone().with_category(None);
        }
        self.refresh().await;
        Ok(())
    }

    fn check_category(&self, category_id: Option<CategoryId>) -> BoardResult<()> {
        let Some(category_id) = category_id else {
            return Ok(());
        };
        let owned = self
            .categories
            .iter()
            .any(|category| category.id() == category_id && category.owner_id() == self.owner_id);
        if owned {
            Ok(())
        } else {
            Err(BoardError::UnknownCategory(category_id))
        }
    }

    // ── Filtering and derived views ────────────────────────────────────

    /// Returns the active filter.
    #[must_use]
    pub const fn filter(&self) -> &TaskFilter {
        &self.filter
    }

    /// Sets the live search text.
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.filter = self.filter.clone().with_query(query);
    }

    /// Restricts the board to one category, or clears the restriction.
    pub fn set_category_filter(&mut self, category: Option<CategoryId>) {
        self.filter = self.filter.clone().with_category(category);
    }

    /// Returns the tasks passing the filter, in collection order.
    #[must_use]
    pub fn visible_tasks(&self) -> Vec<&Task> {
        self.filter.apply(&self.tasks)
    }

    /// Returns one column's visible tasks ordered by position.
    #[must_use]
    pub fn column(&self, status: TaskStatus) -> Vec<&Task> {
        ordering::partition(&self.tasks, status)
            .into_iter()
            .filter(|task| self.filter.matches(task))
            .collect()
    }

    /// Returns the board's summary counters.
    #[must_use]
    pub fn stats(&self) -> BoardStats {
        BoardStats::compute(&self.tasks, &self.visible_tasks())
    }

    /// Returns the visible in-progress tasks to prioritize.
    ///
    /// Returns `None` when there are none, which disables the action.
    #[must_use]
    pub fn prioritization_candidates(&self) -> Option<Vec<Task>> {
        let candidates: Vec<Task> = self
            .column(TaskStatus::InProgress)
            .into_iter()
            .cloned()
            .collect();
        (!candidates.is_empty()).then_some(candidates)
    }
}
