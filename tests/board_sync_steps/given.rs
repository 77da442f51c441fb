//! Given steps for task board synchronisation scenarios.

use super::world::{BoardWorld, parse_status};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskboard::board::domain::{ProjectId, TaskId};

#[given(r#"the server holds task "{task}" in "{status_name}""#)]
fn server_holds_task(
    world: &mut BoardWorld,
    task: String,
    status_name: String,
) -> Result<(), eyre::Report> {
    let status = parse_status(&status_name)?;
    world.server_tasks.push((task, status));
    Ok(())
}

#[given(r#"the board is opened on project "{project}""#)]
fn board_opened(world: &mut BoardWorld, project: String) -> Result<(), eyre::Report> {
    let project_id = ProjectId::new(project).wrap_err("parse project id")?;
    world.seed_server(&project_id)?;
    let commands = world.board.open_project(project_id);
    for command in commands {
        world.resolve(command);
    }
    Ok(())
}

#[given(r#"the server refuses status changes for "{task}""#)]
fn server_refuses(world: &mut BoardWorld, task: String) -> Result<(), eyre::Report> {
    let task_id = TaskId::new(task).wrap_err("parse task id")?;
    world
        .gateway
        .refuse_status_updates_for(task_id)
        .wrap_err("configure refusal")
}

#[given(r#"the server holds only task "{task}" in "{status_name}""#)]
fn server_holds_only(
    world: &mut BoardWorld,
    task: String,
    status_name: String,
) -> Result<(), eyre::Report> {
    let status = parse_status(&status_name)?;
    let project_id = world
        .board
        .project_id()
        .cloned()
        .ok_or_else(|| eyre::eyre!("no project is open in scenario world"))?;
    world.server_tasks = vec![(task, status)];
    world.seed_server(&project_id)
}
