//! Given steps for board drag-and-drop BDD scenarios.

use super::world::{BoardDragWorld, owner, run_async, split_titles};
use eyre::WrapErr;
use mockable::DefaultClock;
use rstest_bdd_macros::given;
use taskboard::board::{
    adapters::memory::TaskStoreOperation,
    domain::{NewTask, Priority, Task, TaskStatus, TaskTitle},
    ports::TaskStore,
};

#[given(r#"the "{status}" column holds "{titles}""#)]
fn column_holds(
    world: &mut BoardDragWorld,
    status: String,
    titles: String,
) -> Result<(), eyre::Report> {
    let column = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))?;

    for (index, title) in split_titles(&titles).into_iter().enumerate() {
        let task = Task::new(
            NewTask {
                title: TaskTitle::new(title)?,
                description: String::new(),
                status: column,
                priority: Priority::default(),
                category_id: None,
                due_date: None,
                position: u32::try_from(index)?,
                owner_id: owner(),
            },
            &DefaultClock,
        );
        run_async(world.store.create(&task)).wrap_err("seed task store")?;
    }

    run_async(world.controller.reload()).wrap_err("load board after seeding")?;
    Ok(())
}

#[given("saving placements fails")]
fn saving_placements_fails(world: &mut BoardDragWorld) -> Result<(), eyre::Report> {
    world
        .store
        .fail_on(TaskStoreOperation::UpdateStatusAndPosition)
        .wrap_err("inject placement failure")
}
