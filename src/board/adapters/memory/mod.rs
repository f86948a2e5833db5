//! In-memory adapters for board tests and local runs.

mod category_store;
mod task_store;

pub use category_store::InMemoryCategoryStore;
pub use task_store::{InMemoryTaskStore, TaskStoreOperation};
