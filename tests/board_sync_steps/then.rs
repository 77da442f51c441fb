//! Then steps for task board synchronisation scenarios.

use super::world::{BoardWorld, parse_status};
use eyre::WrapErr;
use rstest_bdd_macros::then;
use taskboard::board::domain::{BoardCommand, NoticeKind, TaskId};

fn column_ids(world: &BoardWorld, column: &str) -> Result<Vec<String>, eyre::Report> {
    let status = parse_status(column)?;
    let mut ids: Vec<String> = world
        .board
        .columns()
        .ids(status)
        .into_iter()
        .map(str::to_owned)
        .collect();
    ids.sort();
    Ok(ids)
}

#[then(r#"the "{column}" column holds "{tasks}""#)]
fn column_holds(world: &BoardWorld, column: String, tasks: String) -> Result<(), eyre::Report> {
    let mut expected: Vec<String> = tasks.split(',').map(|id| id.trim().to_owned()).collect();
    expected.sort();
    let actual = column_ids(world, &column)?;
    if actual != expected {
        return Err(eyre::eyre!(
            "expected {column} to hold {expected:?}, found {actual:?}"
        ));
    }
    Ok(())
}

#[then(r#"the "{column}" column is empty"#)]
fn column_is_empty(world: &BoardWorld, column: String) -> Result<(), eyre::Report> {
    let actual = column_ids(world, &column)?;
    if !actual.is_empty() {
        return Err(eyre::eyre!("expected {column} to be empty, found {actual:?}"));
    }
    Ok(())
}

#[then(r#"a status update for "{task}" to "{status_name}" is outstanding"#)]
fn update_outstanding(world: &BoardWorld, task: String, status_name: String) -> Result<(), eyre::Report> {
    let status = parse_status(&status_name)?;
    let found = world.outstanding.iter().any(|command| {
        matches!(
            command,
            BoardCommand::UpdateStatus(request)
                if request.task_id.as_str() == task && request.status == status
        )
    });
    if !found {
        return Err(eyre::eyre!(
            "expected an update of {task} to {status}, outstanding: {:?}",
            world.outstanding
        ));
    }
    Ok(())
}

#[then(r#"task "{task}" is not pending"#)]
fn task_not_pending(world: &BoardWorld, task: String) -> Result<(), eyre::Report> {
    let task_id = TaskId::new(task).wrap_err("parse task id")?;
    if world.board.is_pending(&task_id) {
        return Err(eyre::eyre!("expected {task_id} to have no pending change"));
    }
    Ok(())
}

#[then("no notice is shown")]
fn no_notice(world: &BoardWorld) -> Result<(), eyre::Report> {
    let notices: Vec<_> = world.board.notices().collect();
    if !notices.is_empty() {
        return Err(eyre::eyre!("expected no notices, found {notices:?}"));
    }
    Ok(())
}

#[then(r#"a notice says task "{task}" could not be moved"#)]
fn notice_for_move(world: &BoardWorld, task: String) -> Result<(), eyre::Report> {
    let expected = format!("Could not move \"Task {task}\"");
    let found = world.board.notices().any(|notice| {
        notice.kind == NoticeKind::TransitionRejected && notice.message.starts_with(&expected)
    });
    if !found {
        return Err(eyre::eyre!(
            "expected a move failure notice for {task}, found {:?}",
            world.board.notices().collect::<Vec<_>>()
        ));
    }
    Ok(())
}

#[then(r#"task "{task}" is still being dragged"#)]
fn task_still_dragged(world: &BoardWorld, task: String) -> Result<(), eyre::Report> {
    let task_id = TaskId::new(task).wrap_err("parse task id")?;
    if !world.board.is_dragging(&task_id) {
        return Err(eyre::eyre!("expected {task_id} to still be dragged"));
    }
    Ok(())
}

#[then(r#"the server has task "{task}" in "{status_name}""#)]
fn server_has_task(world: &BoardWorld, task: String, status_name: String) -> Result<(), eyre::Report> {
    let expected = parse_status(&status_name)?;
    let task_id = TaskId::new(task).wrap_err("parse task id")?;
    let actual = world.gateway.task_status(&task_id);
    if actual != Some(expected) {
        return Err(eyre::eyre!(
            "expected the server to hold {task_id} in {expected}, found {actual:?}"
        ));
    }
    Ok(())
}
