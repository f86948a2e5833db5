//! Ordering engine for drag-and-drop moves.
//!
//! Tasks live in one collection; each status column is a derived partition
//! ordered by position. A move either reorders a partition (array-move
//! semantics followed by dense renumbering) or appends the task to another
//! partition. Cross-status moves never insert at an index and never
//! renumber the source partition.

use super::{OrderingError, ParseDropTargetError, Task, TaskId, TaskStatus};
use std::collections::HashMap;
use std::str::FromStr;

/// Where a dragged card was released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropTarget {
    /// Empty area of a status column.
    Column(TaskStatus),
    /// Another card (or the dragged card itself).
    Task(TaskId),
}

impl FromStr for DropTarget {
    type Err = ParseDropTargetError;

    /// Resolves a raw drop identifier: column ids are status strings, card
    /// ids are task UUIDs.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if let Ok(status) = TaskStatus::try_from(value) {
            return Ok(Self::Column(status));
        }
        value
            .parse::<TaskId>()
            .map(Self::Task)
            .map_err(|_| ParseDropTargetError(value.to_owned()))
    }
}

/// Insertion point inside the destination column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveAnchor {
    /// Take the index currently held by this task.
    Task(TaskId),
    /// Go after every other task in the column.
    EndOfColumn,
}

/// A fully resolved move request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveInstruction {
    /// Task being moved.
    pub task_id: TaskId,
    /// Destination column.
    pub target_status: TaskStatus,
    /// Insertion point in the destination column.
    pub anchor: MoveAnchor,
}

impl MoveInstruction {
    /// Resolves a drop target against the current board.
    ///
    /// A column target appends to that column. A card target adopts the
    /// card's column and index. A card that is no longer on the board
    /// falls back to the end of the dragged task's own column.
    ///
    /// # Errors
    ///
    /// Returns [`OrderingError::UnknownTask`] when the dragged task is not
    /// on the board.
    pub fn resolve(
        tasks: &[Task],
        task_id: TaskId,
        target: DropTarget,
    ) -> Result<Self, OrderingError> {
        let moving = find_task(tasks, task_id)?;
        let instruction = match target {
            DropTarget::Column(status) => Self {
                task_id,
                target_status: status,
                anchor: MoveAnchor::EndOfColumn,
            },
            DropTarget::Task(anchor_id) => match tasks.iter().find(|task| task.id() == anchor_id) {
                Some(anchor) => Self {
                    task_id,
                    target_status: anchor.status(),
                    anchor: MoveAnchor::Task(anchor_id),
                },
                None => Self {
                    task_id,
                    target_status: moving.status(),
                    anchor: MoveAnchor::EndOfColumn,
                },
            },
        };
        Ok(instruction)
    }

    /// Returns `true` when the task is dropped back onto itself.
    #[must_use]
    pub fn targets_itself(&self) -> bool {
        self.anchor == MoveAnchor::Task(self.task_id)
    }
}

/// Column and rank assigned to the moved task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Moved task.
    pub task_id: TaskId,
    /// New column.
    pub status: TaskStatus,
    /// New rank within the column.
    pub position: u32,
}

/// Candidate board state produced by a move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovePlan {
    tasks: Vec<Task>,
    placement: Placement,
    previous_status: TaskStatus,
}

impl MovePlan {
    /// Returns the candidate task collection.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Consumes the plan, returning the candidate task collection.
    #[must_use]
    pub fn into_tasks(self) -> Vec<Task> {
        self.tasks
    }

    /// Returns the moved task's new column and rank.
    #[must_use]
    pub const fn placement(&self) -> Placement {
        self.placement
    }

    /// Returns the moved task's column before the move.
    #[must_use]
    pub const fn previous_status(&self) -> TaskStatus {
        self.previous_status
    }

    /// Returns `true` when the move finishes a task that was not done.
    #[must_use]
    pub fn completes_task(&self) -> bool {
        self.previous_status != TaskStatus::Done && self.placement.status == TaskStatus::Done
    }
}

/// Returns the tasks of one column ordered by position.
///
/// Ties keep collection order.
#[must_use]
pub fn partition(tasks: &[Task], status: TaskStatus) -> Vec<&Task> {
    let mut column: Vec<&Task> = tasks.iter().filter(|task| task.status() == status).collect();
    column.sort_by_key(|task| task.position());
    column
}

/// Computes the board state after a move.
///
/// Returns `Ok(None)` when the move changes nothing, including a task
/// dropped onto itself within its own column.
///
/// # Errors
///
/// Returns [`OrderingError::UnknownTask`] when the moved task is not in
/// `tasks`.
pub fn plan_move(
    tasks: &[Task],
    instruction: &MoveInstruction,
) -> Result<Option<MovePlan>, OrderingError> {
    let moving = find_task(tasks, instruction.task_id)?;
    let previous_status = moving.status();

    if instruction.targets_itself() && previous_status == instruction.target_status {
        return Ok(None);
    }

    let column: Vec<TaskId> = partition(tasks, instruction.target_status)
        .into_iter()
        .map(Task::id)
        .collect();

    let plan = if previous_status == instruction.target_status {
        reorder_within(tasks, &column, instruction, previous_status)
    } else {
        append_to(tasks, &column, instruction, previous_status)
    };

    Ok(plan.filter(|candidate| candidate.tasks.as_slice() != tasks))
}

fn reorder_within(
    tasks: &[Task],
    column: &[TaskId],
    instruction: &MoveInstruction,
    previous_status: TaskStatus,
) -> Option<MovePlan> {
    let from = column.iter().position(|id| *id == instruction.task_id)?;
    let last = column.len().saturating_sub(1);
    let to = match instruction.anchor {
        MoveAnchor::Task(anchor_id) => column
            .iter()
            .position(|id| *id == anchor_id)
            .unwrap_or(last),
        MoveAnchor::EndOfColumn => last,
    };

    let reordered = array_move(column, from, to);
    let ranks: HashMap<TaskId, u32> = reordered
        .iter()
        .enumerate()
        .map(|(rank, id)| (*id, to_position(rank)))
        .collect();

    let candidate = tasks
        .iter()
        .cloned()
        .map(|mut task| {
            if let Some(rank) = ranks.get(&task.id()) {
                task.set_placement(instruction.target_status, *rank);
            }
            task
        })
        .collect();

    Some(MovePlan {
        tasks: candidate,
        placement: Placement {
            task_id: instruction.task_id,
            status: instruction.target_status,
            position: to_position(to),
        },
        previous_status,
    })
}

fn append_to(
    tasks: &[Task],
    column: &[TaskId],
    instruction: &MoveInstruction,
    previous_status: TaskStatus,
) -> Option<MovePlan> {
    let position = to_position(column.len());
    let candidate = tasks
        .iter()
        .cloned()
        .map(|mut task| {
            if task.id() == instruction.task_id {
                task.set_placement(instruction.target_status, position);
            }
            task
        })
        .collect();

    Some(MovePlan {
        tasks: candidate,
        placement: Placement {
            task_id: instruction.task_id,
            status: instruction.target_status,
            position,
        },
        previous_status,
    })
}

/// Removes the element at `from` and reinserts it at `to`.
fn array_move(items: &[TaskId], from: usize, to: usize) -> Vec<TaskId> {
    let mut moved = items.to_vec();
    if from < moved.len() {
        let item = moved.remove(from);
        let index = to.min(moved.len());
        moved.insert(index, item);
    }
    moved
}

fn find_task(tasks: &[Task], task_id: TaskId) -> Result<&Task, OrderingError> {
    tasks
        .iter()
        .find(|task| task.id() == task_id)
        .ok_or(OrderingError::UnknownTask(task_id))
}

fn to_position(rank: usize) -> u32 {
    u32::try_from(rank).unwrap_or(u32::MAX)
}
