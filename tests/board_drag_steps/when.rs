//! When steps for board drag-and-drop BDD scenarios.

use super::world::{BoardDragWorld, run_async};
use rstest_bdd_macros::when;
use taskboard::board::domain::{DropTarget, TaskStatus};

#[when(r#""{moved}" is dropped onto "{anchor}""#)]
fn dropped_onto_card(
    world: &mut BoardDragWorld,
    moved: String,
    anchor: String,
) -> Result<(), eyre::Report> {
    let moved_id = world.task_id(&moved)?;
    let anchor_id = world.task_id(&anchor)?;

    world.controller.begin_drag(moved_id);
    let outcome = run_async(
        world
            .controller
            .complete_drag(moved_id, Some(DropTarget::Task(anchor_id))),
    );
    world.last_outcome = Some(outcome);
    Ok(())
}

#[when(r#""{moved}" is dropped onto the "{status}" column"#)]
fn dropped_onto_column(
    world: &mut BoardDragWorld,
    moved: String,
    status: String,
) -> Result<(), eyre::Report> {
    let moved_id = world.task_id(&moved)?;
    let column = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))?;

    world.controller.begin_drag(moved_id);
    let outcome = run_async(
        world
            .controller
            .complete_drag(moved_id, Some(DropTarget::Column(column))),
    );
    world.last_outcome = Some(outcome);
    Ok(())
}
