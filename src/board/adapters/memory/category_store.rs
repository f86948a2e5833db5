//! In-memory category store.

use async_trait::async_trait;
use mockable::DefaultClock;
use std::sync::{Arc, RwLock};

use crate::board::{
    domain::{Category, CategoryId, OwnerId, default_categories_for},
    ports::{CategoryStore, CategoryStoreError, CategoryStoreResult},
};

/// Thread-safe in-memory category store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCategoryStore {
    state: Arc<RwLock<Vec<Category>>>,
}

impl InMemoryCategoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> CategoryStoreError {
    CategoryStoreError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl CategoryStore for InMemoryCategoryStore {
    async fn list(&self) -> CategoryStoreResult<Vec<Category>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut categories = state.clone();
        categories.sort_by(|left, right| left.name().as_str().cmp(right.name().as_str()));
        Ok(categories)
    }

    async fn ensure_defaults(&self, owner_id: OwnerId) -> CategoryStoreResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.iter().any(|category| category.owner_id() == owner_id) {
            return Ok(());
        }
        let defaults =
            default_categories_for(owner_id, &DefaultClock).map_err(CategoryStoreError::persistence)?;
        state.extend(defaults);
        Ok(())
    }

    async fn create(&self, category: &Category) -> CategoryStoreResult<Category> {
        let mut state = self.state.write().map_err(lock_error)?;
        let duplicate = state.iter().any(|existing| {
            existing.owner_id() == category.owner_id() && existing.name() == category.name()
        });
        if duplicate {
            return Err(CategoryStoreError::DuplicateName {
                owner_id: category.owner_id(),
                name: category.name().clone(),
            });
        }
        state.push(category.clone());
        Ok(category.clone())
    }

    async fn delete(&self, id: CategoryId) -> CategoryStoreResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let before = state.len();
        state.retain(|category| category.id() != id);
        if state.len() == before {
            return Err(CategoryStoreError::NotFound(id));
        }
        Ok(())
    }
}
