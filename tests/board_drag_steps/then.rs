//! Then steps for board drag-and-drop BDD scenarios.

use super::world::{BoardDragWorld, run_async, split_titles};
use rstest_bdd_macros::then;
use taskboard::board::{
    domain::{Task, TaskStatus},
    ports::TaskStore,
    services::DragOutcome,
};

fn parse_status(status: &str) -> Result<TaskStatus, eyre::Report> {
    TaskStatus::try_from(status).map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))
}

#[then(r#"the "{status}" column reads "{titles}""#)]
fn column_reads(
    world: &BoardDragWorld,
    status: String,
    titles: String,
) -> Result<(), eyre::Report> {
    let expected = split_titles(&titles);
    let actual: Vec<String> = world
        .controller
        .column(parse_status(&status)?)
        .into_iter()
        .map(|task| task.title().as_str().to_owned())
        .collect();

    eyre::ensure!(
        actual == expected,
        "expected column {status} to read {expected:?}, found {actual:?}"
    );
    Ok(())
}

#[then(r#"the "{status}" column has dense positions"#)]
fn column_is_dense(world: &BoardDragWorld, status: String) -> Result<(), eyre::Report> {
    let positions: Vec<u32> = world
        .controller
        .column(parse_status(&status)?)
        .into_iter()
        .map(Task::position)
        .collect();
    let expected: Vec<u32> = (0..u32::try_from(positions.len())?).collect();

    eyre::ensure!(
        positions == expected,
        "expected positions {expected:?}, found {positions:?}"
    );
    Ok(())
}

#[then("no placement was saved")]
fn no_placement_saved(world: &BoardDragWorld) -> Result<(), eyre::Report> {
    let updates = world.store.position_updates()?;
    eyre::ensure!(updates.is_empty(), "unexpected store calls: {updates:?}");
    eyre::ensure!(
        matches!(world.last_outcome, Some(DragOutcome::Unchanged)),
        "expected an unchanged outcome, got {:?}",
        world.last_outcome
    );
    Ok(())
}

#[then(r#""{title}" is in "{status}" at position {position:u32}"#)]
fn task_is_placed(
    world: &BoardDragWorld,
    title: String,
    status: String,
    position: u32,
) -> Result<(), eyre::Report> {
    let task_id = world.task_id(&title)?;
    let expected_status = parse_status(&status)?;
    let task = world
        .controller
        .tasks()
        .iter()
        .find(|task| task.id() == task_id)
        .ok_or_else(|| eyre::eyre!("task {title} disappeared"))?;

    eyre::ensure!(
        task.status() == expected_status && task.position() == position,
        "expected {title} in {expected_status} at {position}, found {} at {}",
        task.status(),
        task.position()
    );
    Ok(())
}

#[then("the completion celebration is showing")]
fn celebration_showing(world: &BoardDragWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(
        world.controller.celebration_visible(),
        "expected the celebration to be visible"
    );
    Ok(())
}

#[then("the move was rolled back")]
fn move_rolled_back(world: &BoardDragWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(
        matches!(world.last_outcome, Some(DragOutcome::RolledBack { .. })),
        "expected a rolled back outcome, got {:?}",
        world.last_outcome
    );
    Ok(())
}

#[then("the board matches the store")]
fn board_matches_store(world: &BoardDragWorld) -> Result<(), eyre::Report> {
    let stored = run_async(world.store.list())?;
    eyre::ensure!(
        world.controller.tasks() == stored.as_slice(),
        "board state diverged from the store"
    );
    Ok(())
}
