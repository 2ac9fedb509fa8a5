//! When steps for task board BDD scenarios.

use super::world::{TaskBoardWorld, run_async};
use rstest_bdd_macros::when;
use taskdeck::task::domain::{TaskDraft, TaskId, TaskPatch};

#[when(r#"the user creates a task titled "{title}" with priority "{priority}""#)]
fn create_task(
    world: &mut TaskBoardWorld,
    title: String,
    priority: String,
) -> Result<(), eyre::Report> {
    let draft = TaskDraft::new(title).with_priority(priority);
    let result = run_async(world.board()?.create(draft));
    world.last_result = Some(result);
    Ok(())
}

#[when(r#"the user toggles completion of "{title}""#)]
fn toggle_task(world: &mut TaskBoardWorld, title: String) -> Result<(), eyre::Report> {
    let id = world.task_id(&title)?;
    let result = run_async(world.board()?.toggle_complete(&id));
    world.last_result = Some(result);
    Ok(())
}

#[when("the user deletes an unknown task")]
fn delete_unknown(world: &mut TaskBoardWorld) -> Result<(), eyre::Report> {
    let result = run_async(world.board()?.delete(&TaskId::new("no-such-task")));
    world.last_result = Some(result);
    Ok(())
}

#[when(r#"the user clears the title of "{title}""#)]
fn clear_title(world: &mut TaskBoardWorld, title: String) -> Result<(), eyre::Report> {
    let id = world.task_id(&title)?;
    let patch = TaskPatch::new().with_title("");
    let result = run_async(world.board()?.update(&id, patch));
    world.last_result = Some(result);
    Ok(())
}
