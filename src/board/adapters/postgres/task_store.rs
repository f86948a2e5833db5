//! `PostgreSQL` task store.

use super::{
    models::{NewTaskRow, TaskChangeset, TaskRow},
    schema::tasks,
};
use crate::board::{
    domain::{
        CategoryId, OwnerId, PersistedTaskData, Priority, Task, TaskId, TaskPatch, TaskStatus,
        TaskTitle,
    },
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use mockable::{Clock, DefaultClock};
use std::sync::Arc;

/// `PostgreSQL` connection pool type used by board adapters.
pub type BoardPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task store scoped to one owner.
#[derive(Clone)]
pub struct PostgresTaskStore {
    pool: BoardPgPool,
    owner_id: OwnerId,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl PostgresTaskStore {
    /// Creates a store listing the tasks of `owner_id`.
    #[must_use]
    pub fn new(pool: BoardPgPool, owner_id: OwnerId) -> Self {
        Self {
            pool,
            owner_id,
            clock: Arc::new(DefaultClock),
        }
    }

    /// Replaces the clock used to stamp `updated_at`.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        self.clock = clock;
        self
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskStoreError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskStoreError::persistence)?
    }
}

#[async_trait]
impl TaskStore for PostgresTaskStore {
    async fn list(&self) -> TaskStoreResult<Vec<Task>> {
        let owner = self.owner_id.into_inner();
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::user_id.eq(owner))
                .order((tasks::position.asc(), tasks::created_at.asc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskStoreError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn create(&self, task: &Task) -> TaskStoreResult<Task> {
        let task_id = task.id();
        let new_row = to_new_row(task)?;
        self.run_blocking(move |connection| {
            let row = diesel::insert_into(tasks::table)
                .values(&new_row)
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskStoreError::DuplicateTask(task_id)
                    }
                    _ => TaskStoreError::persistence(err),
                })?;
            row_to_task(row)
        })
        .await
    }

    async fn update(&self, id: TaskId, patch: &TaskPatch) -> TaskStoreResult<Task> {
        let changeset = to_changeset(patch, self.clock.utc());
        let owner = self.owner_id.into_inner();
        self.run_blocking(move |connection| {
            let target = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .filter(tasks::user_id.eq(owner));
            let row = diesel::update(target)
                .set(&changeset)
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)
                .optional()
                .map_err(TaskStoreError::persistence)?
                .ok_or(TaskStoreError::NotFound(id))?;
            row_to_task(row)
        })
        .await
    }

    async fn update_status_and_position(
        &self,
        id: TaskId,
        status: TaskStatus,
        position: u32,
    ) -> TaskStoreResult<()> {
        let stored_position = i32::try_from(position).map_err(TaskStoreError::persistence)?;
        let updated_at = self.clock.utc();
        let owner = self.owner_id.into_inner();
        self.run_blocking(move |connection| {
            let target = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .filter(tasks::user_id.eq(owner));
            let affected = diesel::update(target)
                .set((
                    tasks::status.eq(status.as_str()),
                    tasks::position.eq(stored_position),
                    tasks::updated_at.eq(updated_at),
                ))
                .execute(connection)
                .map_err(TaskStoreError::persistence)?;
            if affected == 0 {
                return Err(TaskStoreError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskStoreResult<()> {
        let owner = self.owner_id.into_inner();
        self.run_blocking(move |connection| {
            let target = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .filter(tasks::user_id.eq(owner));
            let affected = diesel::delete(target)
                .execute(connection)
                .map_err(TaskStoreError::persistence)?;
            if affected == 0 {
                return Err(TaskStoreError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}

fn to_new_row(task: &Task) -> TaskStoreResult<NewTaskRow> {
    Ok(NewTaskRow {
        id: task.id().into_inner(),
        title: task.title().as_str().to_owned(),
        description: task.description().to_owned(),
        status: task.status().as_str().to_owned(),
        priority: task.priority().as_str().to_owned(),
        category_id: task.category_id().map(CategoryId::into_inner),
        due_date: task.due_date(),
        position: i32::try_from(task.position()).map_err(TaskStoreError::persistence)?,
        user_id: task.owner_id().into_inner(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    })
}

fn to_changeset(patch: &TaskPatch, updated_at: DateTime<Utc>) -> TaskChangeset {
    TaskChangeset {
        title: patch.title().map(|title| title.as_str().to_owned()),
        description: patch.description().map(str::to_owned),
        status: patch.status().map(|status| status.as_str().to_owned()),
        priority: patch.priority().map(|priority| priority.as_str().to_owned()),
        category_id: patch
            .category_id()
            .map(|category| category.map(CategoryId::into_inner)),
        due_date: patch.due_date(),
        updated_at,
    }
}

fn row_to_task(row: TaskRow) -> TaskStoreResult<Task> {
    let TaskRow {
        id,
        title,
        description,
        status,
        priority,
        category_id,
        due_date,
        position,
        user_id,
        created_at,
        updated_at,
    } = row;

    let data = PersistedTaskData {
        id: TaskId::from_uuid(id),
        title: TaskTitle::new(title).map_err(TaskStoreError::persistence)?,
        description,
        status: TaskStatus::try_from(status.as_str()).map_err(TaskStoreError::persistence)?,
        priority: Priority::try_from(priority.as_str()).map_err(TaskStoreError::persistence)?,
        category_id: category_id.map(CategoryId::from_uuid),
        due_date,
        position: u32::try_from(position).map_err(TaskStoreError::persistence)?,
        owner_id: OwnerId::from_uuid(user_id),
        created_at,
        updated_at,
    };
    Ok(Task::from_persisted(data))
}
