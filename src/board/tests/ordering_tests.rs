//! Ordering engine tests: reorders, cross-column moves and no-op drops.

use super::support::{find, task, titles};
use crate::board::domain::{
    DropTarget, MoveAnchor, MoveInstruction, OrderingError, Task, TaskId, TaskStatus,
    ordering::{partition, plan_move},
};
use proptest::prelude::*;
use rstest::{fixture, rstest};

/// Todo column `A, B, C` plus one in-progress task `D`.
#[fixture]
fn board() -> Vec<Task> {
    vec![
        task("A", TaskStatus::Todo, 0),
        task("B", TaskStatus::Todo, 1),
        task("C", TaskStatus::Todo, 2),
        task("D", TaskStatus::InProgress, 0),
    ]
}

fn id_of(tasks: &[Task], title: &str) -> TaskId {
    tasks
        .iter()
        .find(|task| task.title().as_str() == title)
        .map(Task::id)
        .expect("task with title")
}

fn dropped(tasks: &[Task], moved: &str, target: DropTarget) -> Option<Vec<Task>> {
    let instruction =
        MoveInstruction::resolve(tasks, id_of(tasks, moved), target).expect("resolvable move");
    plan_move(tasks, &instruction)
        .expect("plannable move")
        .map(crate::board::domain::MovePlan::into_tasks)
}

fn positions(tasks: &[Task], status: TaskStatus) -> Vec<u32> {
    partition(tasks, status)
        .into_iter()
        .map(Task::position)
        .collect()
}

#[rstest]
fn partition_orders_by_position_and_keeps_ties_stable() {
    let tasks = vec![
        task("late", TaskStatus::Todo, 5),
        task("first-tie", TaskStatus::Todo, 1),
        task("other", TaskStatus::Done, 0),
        task("second-tie", TaskStatus::Todo, 1),
    ];

    let column = partition(&tasks, TaskStatus::Todo);

    assert_eq!(titles(&column), ["first-tie", "second-tie", "late"]);
}

#[rstest]
fn dropping_last_card_on_first_reorders_column(board: Vec<Task>) {
    let target = DropTarget::Task(id_of(&board, "A"));

    let moved = dropped(&board, "C", target).expect("order changes");

    assert_eq!(
        titles(&partition(&moved, TaskStatus::Todo)),
        ["C", "A", "B"]
    );
    assert_eq!(positions(&moved, TaskStatus::Todo), [0, 1, 2]);
}

#[rstest]
fn dropping_first_card_on_last_takes_its_index(board: Vec<Task>) {
    let target = DropTarget::Task(id_of(&board, "C"));

    let moved = dropped(&board, "A", target).expect("order changes");

    assert_eq!(
        titles(&partition(&moved, TaskStatus::Todo)),
        ["B", "C", "A"]
    );
}

#[rstest]
fn reorder_renumbers_sparse_positions_densely() {
    let tasks = vec![
        task("A", TaskStatus::Todo, 3),
        task("B", TaskStatus::Todo, 7),
        task("C", TaskStatus::Todo, 20),
    ];
    let target = DropTarget::Task(id_of(&tasks, "B"));

    let moved = dropped(&tasks, "A", target).expect("order changes");

    assert_eq!(
        titles(&partition(&moved, TaskStatus::Todo)),
        ["B", "A", "C"]
    );
    assert_eq!(positions(&moved, TaskStatus::Todo), [0, 1, 2]);
}

#[rstest]
fn reorder_leaves_other_columns_untouched(board: Vec<Task>) {
    let d = id_of(&board, "D");
    let target = DropTarget::Task(id_of(&board, "A"));

    let moved = dropped(&board, "B", target).expect("order changes");

    assert_eq!(find(&moved, d), find(&board, d));
}

#[rstest]
fn dropping_card_on_itself_is_a_no_op(board: Vec<Task>) {
    let b = id_of(&board, "B");

    assert!(dropped(&board, "B", DropTarget::Task(b)).is_none());
}

#[rstest]
fn dropping_last_card_on_own_column_is_a_no_op(board: Vec<Task>) {
    assert!(dropped(&board, "C", DropTarget::Column(TaskStatus::Todo)).is_none());
}

#[rstest]
fn dropping_on_own_column_moves_card_to_end(board: Vec<Task>) {
    let moved =
        dropped(&board, "A", DropTarget::Column(TaskStatus::Todo)).expect("order changes");

    assert_eq!(
        titles(&partition(&moved, TaskStatus::Todo)),
        ["B", "C", "A"]
    );
    assert_eq!(positions(&moved, TaskStatus::Todo), [0, 1, 2]);
}

#[rstest]
fn cross_column_drop_appends_to_destination(board: Vec<Task>) {
    let b = id_of(&board, "B");

    let moved = dropped(&board, "B", DropTarget::Column(TaskStatus::InProgress))
        .expect("status changes");
    let placed = find(&moved, b);

    assert_eq!(placed.status(), TaskStatus::InProgress);
    assert_eq!(placed.position(), 1);
    assert_eq!(
        titles(&partition(&moved, TaskStatus::InProgress)),
        ["D", "B"]
    );
}

#[rstest]
fn cross_column_drop_on_card_appends_rather_than_inserting(board: Vec<Task>) {
    let d = id_of(&board, "D");

    let instruction = MoveInstruction::resolve(&board, id_of(&board, "A"), DropTarget::Task(d))
        .expect("resolvable move");
    let plan = plan_move(&board, &instruction)
        .expect("plannable move")
        .expect("status changes");

    assert_eq!(instruction.target_status, TaskStatus::InProgress);
    assert_eq!(plan.placement().position, 1);
    assert_eq!(plan.previous_status(), TaskStatus::Todo);
    assert_eq!(
        titles(&partition(plan.tasks(), TaskStatus::InProgress)),
        ["D", "A"]
    );
}

#[rstest]
fn cross_column_drop_leaves_source_gap(board: Vec<Task>) {
    let moved = dropped(&board, "A", DropTarget::Column(TaskStatus::Done)).expect("moves");

    assert_eq!(positions(&moved, TaskStatus::Todo), [1, 2]);
}

#[rstest]
fn drop_on_missing_card_falls_back_to_end_of_own_column(board: Vec<Task>) {
    let a = id_of(&board, "A");

    let instruction =
        MoveInstruction::resolve(&board, a, DropTarget::Task(TaskId::new())).expect("resolves");

    assert_eq!(instruction.target_status, TaskStatus::Todo);
    assert_eq!(instruction.anchor, MoveAnchor::EndOfColumn);
}

#[rstest]
fn moving_unknown_task_is_rejected(board: Vec<Task>) {
    let ghost = TaskId::new();

    let result = MoveInstruction::resolve(&board, ghost, DropTarget::Column(TaskStatus::Done));

    assert_eq!(result, Err(OrderingError::UnknownTask(ghost)));
}

#[rstest]
fn round_trip_between_columns_does_not_restore_position(board: Vec<Task>) {
    let a = id_of(&board, "A");

    let away = dropped(&board, "A", DropTarget::Column(TaskStatus::InProgress)).expect("moves");
    let back = dropped(&away, "A", DropTarget::Column(TaskStatus::Todo)).expect("moves");

    assert_eq!(find(&back, a).position(), 2);
    assert_eq!(find(&back, a).status(), TaskStatus::Todo);
}

#[rstest]
#[case::into_done(TaskStatus::Todo, TaskStatus::Done, true)]
#[case::from_in_progress(TaskStatus::InProgress, TaskStatus::Done, true)]
#[case::out_of_done(TaskStatus::Done, TaskStatus::Todo, false)]
#[case::between_open_columns(TaskStatus::Todo, TaskStatus::InProgress, false)]
fn completes_task_only_when_entering_done(
    #[case] from: TaskStatus,
    #[case] to: TaskStatus,
    #[case] completes: bool,
) {
    let moving = task("moving", from, 0);
    let moving_id = moving.id();
    let tasks = vec![moving];
    let instruction =
        MoveInstruction::resolve(&tasks, moving_id, DropTarget::Column(to)).expect("resolves");

    let plan = plan_move(&tasks, &instruction)
        .expect("plannable")
        .expect("status changes");

    assert_eq!(plan.completes_task(), completes);
}

#[rstest]
fn reorder_keeps_timestamps(board: Vec<Task>) {
    let c = id_of(&board, "C");

    let moved = dropped(&board, "C", DropTarget::Task(id_of(&board, "A"))).expect("moves");

    assert_eq!(find(&moved, c).updated_at(), find(&board, c).updated_at());
}

// ── Properties ──────────────────────────────────────────────────────

/// A column size plus a sequence of drops within that column. Each drop
/// names the moved card and either a target card or the column body.
fn reorder_sequences() -> impl Strategy<Value = (usize, Vec<(usize, Option<usize>)>)> {
    (1_usize..7).prop_flat_map(|size| {
        (
            Just(size),
            prop::collection::vec((0..size, prop::option::of(0..size)), 1..40),
        )
    })
}

proptest! {
    #[test]
    fn same_column_reorders_keep_positions_dense(
        (size, drops) in reorder_sequences()
    ) {
        let mut tasks: Vec<Task> = (0..size)
            .map(|index| {
                let position = u32::try_from(index).expect("small column");
                task(&format!("card-{index}"), TaskStatus::Todo, position)
            })
            .collect();
        tasks.push(task("elsewhere", TaskStatus::Done, 0));
        let ids: Vec<TaskId> = tasks.iter().map(Task::id).collect();
        let expected: Vec<u32> = (0..size)
            .map(|index| u32::try_from(index).expect("small column"))
            .collect();

        for (moved, anchor) in drops {
            let moved_id = *ids.get(moved).expect("moved card exists");
            let target = match anchor {
                Some(index) => DropTarget::Task(*ids.get(index).expect("anchor card exists")),
                None => DropTarget::Column(TaskStatus::Todo),
            };
            let instruction =
                MoveInstruction::resolve(&tasks, moved_id, target).expect("resolvable move");
            if let Some(plan) = plan_move(&tasks, &instruction).expect("plannable move") {
                tasks = plan.into_tasks();
            }

            prop_assert_eq!(positions(&tasks, TaskStatus::Todo), expected.clone());
            prop_assert_eq!(positions(&tasks, TaskStatus::Done), vec![0]);
        }
    }
}
