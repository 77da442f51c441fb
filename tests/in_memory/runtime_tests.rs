//! Board runtime against the in-memory gateway.

use std::sync::Arc;

use rstest::rstest;
use taskboard::board::{
    domain::{BoardConfig, BoardEvent, NewComment, NewTask, NoticeKind, TaskStatus},
    ports::RemoteSyncGateway,
    services::{BoardRuntime, LoadState, TaskBoard},
};

use super::helpers::{PROJECT, loaded_runtime, project_id, seeded_gateway, task_id};

fn drop_on(task: &str, column: Option<&str>) -> [BoardEvent; 2] {
    [
        BoardEvent::DragStarted {
            task_id: task_id(task),
        },
        BoardEvent::DragEnded {
            task_id: task_id(task),
            target: column.map(str::to_owned),
        },
    ]
}

fn drag_to<G>(runtime: &mut BoardRuntime<G>, task: &str, column: Option<&str>)
where
    G: RemoteSyncGateway + 'static,
{
    for event in drop_on(task, column) {
        runtime.dispatch(event);
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn opening_a_project_loads_its_columns() {
    let gateway = seeded_gateway();
    let runtime = loaded_runtime(&gateway).await;
    let board = runtime.board();

    assert_eq!(board.load_state(), &LoadState::Ready);
    assert_eq!(board.columns().ids(TaskStatus::Todo), vec!["t1"]);
    assert_eq!(board.columns().ids(TaskStatus::Done), vec!["t2"]);
    assert_eq!(board.completed_task_count(), 1);
    assert_eq!(runtime.in_flight(), 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn drop_moves_task_optimistically_then_confirms() {
    let gateway = seeded_gateway();
    let mut runtime = loaded_runtime(&gateway).await;

    drag_to(&mut runtime, "t1", Some("IN_PROGRESS"));
    assert_eq!(
        runtime.board().columns().ids(TaskStatus::InProgress),
        vec!["t1"]
    );
    assert!(runtime.board().is_pending(&task_id("t1")));

    runtime.settle().await;

    assert!(!runtime.board().is_pending(&task_id("t1")));
    assert_eq!(
        runtime.board().store().status_of(&task_id("t1")),
        Some(TaskStatus::InProgress)
    );
    assert_eq!(
        gateway.task_status(&task_id("t1")),
        Some(TaskStatus::InProgress)
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn refused_change_rolls_back_and_notifies() {
    let gateway = seeded_gateway();
    gateway
        .refuse_status_updates_for(task_id("t1"))
        .expect("refuse updates");
    let mut runtime = loaded_runtime(&gateway).await;

    drag_to(&mut runtime, "t1", Some("DONE"));
    runtime.settle().await;

    let board = runtime.board_mut();
    assert_eq!(board.store().status_of(&task_id("t1")), Some(TaskStatus::Todo));
    let notices = board.drain_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(
        notices.first().map(|notice| notice.kind),
        Some(NoticeKind::TransitionRejected)
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn observed_mode_keeps_refused_change_visible() {
    let gateway = seeded_gateway();
    gateway
        .refuse_status_updates_for(task_id("t1"))
        .expect("refuse updates");
    let mut runtime = BoardRuntime::new(TaskBoard::new(BoardConfig::observed()), Arc::clone(&gateway));
    runtime.open_project(project_id(PROJECT));
    runtime.settle().await;

    drag_to(&mut runtime, "t1", Some("DONE"));
    runtime.settle().await;

    assert_eq!(
        runtime.board().store().status_of(&task_id("t1")),
        Some(TaskStatus::Done)
    );
    assert_eq!(runtime.board().notices().count(), 1);
}

#[rstest]
#[case::same_column(Some("TODO"))]
#[case::outside_any_column(None)]
#[case::unknown_target(Some("t2"))]
#[tokio::test(flavor = "multi_thread")]
async fn drops_without_status_change_send_nothing(#[case] target: Option<&str>) {
    let gateway = seeded_gateway();
    let mut runtime = loaded_runtime(&gateway).await;

    drag_to(&mut runtime, "t1", target);
    runtime.settle().await;

    assert_eq!(gateway.status_update_count(), 0);
    assert_eq!(
        runtime.board().store().status_of(&task_id("t1")),
        Some(TaskStatus::Todo)
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_fetch_can_be_retried() {
    let gateway = seeded_gateway();
    gateway.set_offline(true).expect("go offline");
    let mut runtime = BoardRuntime::new(TaskBoard::default(), Arc::clone(&gateway));
    runtime.open_project(project_id(PROJECT));
    runtime.settle().await;

    assert!(matches!(
        runtime.board().load_state(),
        LoadState::Failed { .. }
    ));
    assert!(runtime.board().store().is_empty());

    gateway.set_offline(false).expect("go online");
    runtime.retry();
    assert_eq!(runtime.board().load_state(), &LoadState::Loading);
    runtime.settle().await;

    assert_eq!(runtime.board().load_state(), &LoadState::Ready);
    assert_eq!(runtime.board().store().len(), 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn refresh_picks_up_changes_made_elsewhere() {
    let gateway = seeded_gateway();
    let mut runtime = loaded_runtime(&gateway).await;
    gateway
        .set_task_status(&task_id("t2"), TaskStatus::InProgress)
        .expect("server-side change");

    runtime.refresh();
    runtime.settle().await;

    assert_eq!(
        runtime.board().columns().ids(TaskStatus::InProgress),
        vec!["t2"]
    );
    assert_eq!(runtime.board().completed_task_count(), 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_task_appears_in_todo() {
    let gateway = seeded_gateway();
    let mut runtime = loaded_runtime(&gateway).await;

    runtime.create_task(NewTask::new(project_id(PROJECT), "Draft copy").expect("valid task"));
    runtime.settle().await;

    let board = runtime.board();
    assert_eq!(board.store().len(), 3);
    let columns = board.columns();
    let todo = columns.get(TaskStatus::Todo);
    assert!(todo.tasks().iter().any(|task| task.title() == "Draft copy"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn comment_is_attached_after_revalidation() {
    let gateway = seeded_gateway();
    let mut runtime = loaded_runtime(&gateway).await;

    runtime.create_comment(
        NewComment::new(task_id("t1"), "Looks good", "reviewer@example.com")
            .expect("valid comment"),
    );
    runtime.settle().await;

    let comments = runtime
        .board()
        .store()
        .get(&task_id("t1"))
        .map(|task| task.comments().len());
    assert_eq!(comments, Some(1));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleted_task_leaves_the_board() {
    let gateway = seeded_gateway();
    let mut runtime = loaded_runtime(&gateway).await;

    runtime.delete_task(task_id("t2"));
    runtime.settle().await;

    assert!(!runtime.board().store().contains(&task_id("t2")));
    assert_eq!(runtime.board().completed_task_count(), 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_mutation_is_reported() {
    let gateway = seeded_gateway();
    let mut runtime = loaded_runtime(&gateway).await;

    runtime.delete_task(task_id("ghost"));
    runtime.settle().await;

    let notices = runtime.board_mut().drain_notices();
    assert_eq!(
        notices.first().map(|notice| notice.kind),
        Some(NoticeKind::MutationRejected)
    );
    assert_eq!(runtime.board().store().len(), 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn closing_discards_in_flight_resolutions() {
    let gateway = seeded_gateway();
    let mut runtime = loaded_runtime(&gateway).await;

    drag_to(&mut runtime, "t1", Some("DONE"));
    runtime.refresh();
    runtime.close();
    runtime.settle().await;

    let board = runtime.board();
    assert_eq!(board.load_state(), &LoadState::Idle);
    assert!(board.store().is_empty());
    assert!(board.project_id().is_none());
    assert_eq!(board.notices().count(), 0);
}
