//! Domain model for the task board.
//!
//! Tasks and categories, the ordering engine that turns drag gestures into
//! column positions, and the derived views (filters, statistics, due-date
//! labels) a board presents. Nothing here performs I/O.

mod category;
pub mod celebration;
pub mod due_date;
mod error;
pub mod filter;
mod ids;
pub mod ordering;
mod stats;
mod task;

pub use category::{
    Category, CategoryName, DEFAULT_CATEGORIES, DefaultCategory, PersistedCategoryData,
    default_categories_for,
};
pub use celebration::Celebration;
pub use due_date::DueDateLabel;
pub use error::{
    OrderingError, ParseDropTargetError, ParsePriorityError, ParseTaskStatusError,
    TaskDomainError,
};
pub use filter::TaskFilter;
pub use ids::{CategoryId, OwnerId, TaskId};
pub use ordering::{DropTarget, MoveAnchor, MoveInstruction, MovePlan, Placement};
pub use stats::BoardStats;
pub use task::{NewTask, PersistedTaskData, Priority, Task, TaskPatch, TaskStatus, TaskTitle};
