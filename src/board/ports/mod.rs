//! Port contracts for the task board.
//!
//! Ports define infrastructure-agnostic interfaces used by board services.

pub mod category_store;
pub mod summarizer;
pub mod task_store;

pub use category_store::{CategoryStore, CategoryStoreError, CategoryStoreResult};
pub use summarizer::{SummarizerError, SummarizerResult, TaskSummarizer, TaskSummary};
pub use task_store::{TaskStore, TaskStoreError, TaskStoreResult};
