//! `PostgreSQL` category store.

use super::{
    models::{CategoryRow, NewCategoryRow},
    schema::categories,
    task_store::BoardPgPool,
};
use crate::board::{
    domain::{
        Category, CategoryId, CategoryName, OwnerId, PersistedCategoryData,
        default_categories_for,
    },
    ports::{CategoryStore, CategoryStoreError, CategoryStoreResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use mockable::DefaultClock;

/// `PostgreSQL`-backed category store scoped to one owner.
#[derive(Clone)]
pub struct PostgresCategoryStore {
    pool: BoardPgPool,
    owner_id: OwnerId,
}

impl PostgresCategoryStore {
    /// Creates a store listing the categories of `owner_id`.
    #[must_use]
    pub const fn new(pool: BoardPgPool, owner_id: OwnerId) -> Self {
        Self { pool, owner_id }
    }

    async fn run_blocking<F, T>(&self, f: F) -> CategoryStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> CategoryStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(CategoryStoreError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(CategoryStoreError::persistence)?
    }
}

#[async_trait]
impl CategoryStore for PostgresCategoryStore {
    async fn list(&self) -> CategoryStoreResult<Vec<Category>> {
        let owner = self.owner_id.into_inner();
        self.run_blocking(move |connection| {
            let rows = categories::table
                .filter(categories::user_id.eq(owner))
                .order(categories::name.asc())
                .select(CategoryRow::as_select())
                .load::<CategoryRow>(connection)
                .map_err(CategoryStoreError::persistence)?;
            rows.into_iter().map(row_to_category).collect()
        })
        .await
    }

    async fn ensure_defaults(&self, owner_id: OwnerId) -> CategoryStoreResult<()> {
        let defaults = default_categories_for(owner_id, &DefaultClock)
            .map_err(CategoryStoreError::persistence)?;
        let rows: Vec<NewCategoryRow> = defaults.iter().map(to_new_row).collect();
        self.run_blocking(move |connection| {
            connection
                .transaction::<_, DieselError, _>(|tx| {
                    let existing = categories::table
                        .filter(categories::user_id.eq(owner_id.into_inner()))
                        .select(categories::id)
                        .first::<uuid::Uuid>(tx)
                        .optional()?;
                    if existing.is_none() {
                        diesel::insert_into(categories::table)
                            .values(&rows)
                            .execute(tx)?;
                    }
                    Ok(())
                })
                .map_err(CategoryStoreError::persistence)
        })
        .await
    }

    async fn create(&self, category: &Category) -> CategoryStoreResult<Category> {
        let owner_id = category.owner_id();
        let name = category.name().clone();
        let new_row = to_new_row(category);
        self.run_blocking(move |connection| {
            let row = diesel::insert_into(categories::table)
                .values(&new_row)
                .returning(CategoryRow::as_returning())
                .get_result::<CategoryRow>(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        CategoryStoreError::DuplicateName { owner_id, name }
                    }
                    _ => CategoryStoreError::persistence(err),
                })?;
            row_to_category(row)
        })
        .await
    }

    async fn delete(&self, id: CategoryId) -> CategoryStoreResult<()> {
        let owner = self.owner_id.into_inner();
        self.run_blocking(move |connection| {
            let target = categories::table
                .filter(categories::id.eq(id.into_inner()))
                .filter(categories::user_id.eq(owner));
            let affected = diesel::delete(target)
                .execute(connection)
                .map_err(CategoryStoreError::persistence)?;
            if affected == 0 {
                return Err(CategoryStoreError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}

fn to_new_row(category: &Category) -> NewCategoryRow {
    NewCategoryRow {
        id: category.id().into_inner(),
        name: category.name().as_str().to_owned(),
        color: category.color().to_owned(),
        icon: category.icon().to_owned(),
        user_id: category.owner_id().into_inner(),
        created_at: category.created_at(),
    }
}

fn row_to_category(row: CategoryRow) -> CategoryStoreResult<Category> {
    let data = PersistedCategoryData {
        id: CategoryId::from_uuid(row.id),
        name: CategoryName::new(row.name).map_err(CategoryStoreError::persistence)?,
        color: row.color,
        icon: row.icon,
        owner_id: OwnerId::from_uuid(row.user_id),
        created_at: row.created_at,
    };
    Ok(Category::from_persisted(data))
}
