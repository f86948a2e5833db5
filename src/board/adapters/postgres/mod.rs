//! `PostgreSQL` adapters for task and category persistence.

mod category_store;
mod models;
mod schema;
mod task_store;

pub use category_store::PostgresCategoryStore;
pub use task_store::{BoardPgPool, PostgresTaskStore};
