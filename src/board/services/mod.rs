//! Application services for the task board.

mod controller;
mod prioritize;

pub use controller::{
    BoardController, BoardError, BoardResult, DragOutcome, PendingDeletion, TaskDraft,
};
pub use prioritize::{PrioritizationReport, PrioritizationService};
