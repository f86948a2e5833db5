//! Error types for board domain validation and parsing.

use super::TaskId;
use thiserror::Error;

/// Errors returned while constructing domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The category name is empty after trimming.
    #[error("category name must not be empty")]
    EmptyCategoryName,
}

/// Error returned while parsing task statuses from persistence or drop ids.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task priorities from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParsePriorityError(pub String);

/// Errors returned by the ordering engine.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OrderingError {
    /// The task being moved is not part of the collection.
    #[error("task {0} is not on the board")]
    UnknownTask(TaskId),
}

/// Error returned when a drop identifier names neither a column nor a task.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("drop target '{0}' is neither a column nor a task identifier")]
pub struct ParseDropTargetError(pub String);
