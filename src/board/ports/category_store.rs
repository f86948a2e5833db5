//! Store port for category persistence.

use crate::board::domain::{Category, CategoryId, CategoryName, OwnerId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for category store operations.
pub type CategoryStoreResult<T> = Result<T, CategoryStoreError>;

/// Category persistence contract.
#[async_trait]
pub trait CategoryStore: Send + Sync {
    /// Returns every category ordered by name ascending.
    async fn list(&self) -> CategoryStoreResult<Vec<Category>>;

    /// Seeds the default category set for an owner.
    ///
    /// Does nothing when the owner already has at least one category, so
    /// repeated calls yield a single default set.
    async fn ensure_defaults(&self, owner_id: OwnerId) -> CategoryStoreResult<()>;

    /// Stores a new category and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`CategoryStoreError::DuplicateName`] when the owner already
    /// has a category with the same name.
    async fn create(&self, category: &Category) -> CategoryStoreResult<Category>;

    /// Deletes a category. Tasks referencing it keep the dangling reference.
    ///
    /// # Errors
    ///
    /// Returns [`CategoryStoreError::NotFound`] when the category does not
    /// exist.
    async fn delete(&self, id: CategoryId) -> CategoryStoreResult<()>;
}

/// Errors returned by category store implementations.
#[derive(Debug, Clone, Error)]
pub enum CategoryStoreError {
    /// The owner already has a category with this name.
    #[error("category '{name}' already exists for owner {owner_id}")]
    DuplicateName {
        /// Owning user.
        owner_id: OwnerId,
        /// Conflicting name.
        name: CategoryName,
    },

    /// The category was not found.
    #[error("category not found: {0}")]
    NotFound(CategoryId),

    /// Network, authorization or server failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl CategoryStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
