//! When steps for drag-and-drop BDD scenarios.

use super::world::{DragWorld, run_async};
use rstest_bdd_macros::when;
use taskboard::board::domain::{FilterCriteria, Priority};

#[when(r#"task "{task}" is dragged over {kind} "{target}""#)]
fn drag_over(
    world: &mut DragWorld,
    task: String,
    kind: String,
    target: String,
) -> Result<(), eyre::Report> {
    let task_id = world.task_id(&task)?;
    let over = world.droppable(&kind, &target)?;
    world.workspace.drag_start(task_id)?;
    world.workspace.drag_over(Some(over))?;
    Ok(())
}

#[when(r#"the drag is released over {kind} "{target}""#)]
fn release_over(world: &mut DragWorld, kind: String, target: String) -> Result<(), eyre::Report> {
    let over = world.droppable(&kind, &target)?;
    let finished = run_async(world.workspace.finish_drag(Some(over)))?;
    world.last_drop = Some(finished);
    Ok(())
}

#[when("the drag is released over nothing")]
fn release_over_nothing(world: &mut DragWorld) -> Result<(), eyre::Report> {
    let finished = run_async(world.workspace.finish_drag(None))?;
    world.last_drop = Some(finished);
    Ok(())
}

#[when(r#"the priority filter is set to "{priority}""#)]
fn set_priority_filter(world: &mut DragWorld, priority: String) -> Result<(), eyre::Report> {
    let wanted = Priority::try_from(priority.as_str())?;
    world
        .workspace
        .set_filters(FilterCriteria::default().with_priority(wanted));
    Ok(())
}
