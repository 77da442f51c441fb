//! Shared helpers for in-memory integration tests.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use mockable::DefaultClock;
use taskboard::board::{
    adapters::memory::InMemoryRemoteGateway,
    domain::{ProjectDetails, ProjectId, ProjectSummary, Task, TaskId, TaskStatus},
    services::{BoardRuntime, TaskBoard},
};

/// Gateway type used by the integration tests.
pub type TestGateway = InMemoryRemoteGateway<DefaultClock>;

/// Project seeded by [`seeded_gateway`].
pub const PROJECT: &str = "p1";

pub fn task_id(raw: &str) -> TaskId {
    TaskId::new(raw).expect("valid task id")
}

pub fn project_id(raw: &str) -> ProjectId {
    ProjectId::new(raw).expect("valid project id")
}

pub fn project(raw: &str, tasks: &[(&str, TaskStatus)]) -> ProjectDetails {
    ProjectDetails::new(
        ProjectSummary::new(project_id(raw), "Website relaunch"),
        tasks
            .iter()
            .map(|(id, status)| {
                Task::new(
                    task_id(id),
                    format!("Task {id}"),
                    *status,
                    DateTime::<Utc>::UNIX_EPOCH,
                )
            })
            .collect(),
    )
}

/// Creates a gateway holding project `p1` with `t1` in TODO and `t2` in DONE.
pub fn seeded_gateway() -> Arc<TestGateway> {
    let gateway = InMemoryRemoteGateway::new(DefaultClock);
    gateway
        .seed(project(
            PROJECT,
            &[("t1", TaskStatus::Todo), ("t2", TaskStatus::Done)],
        ))
        .expect("seed project");
    Arc::new(gateway)
}

/// Opens `p1` on a fresh runtime and waits for the initial snapshot.
pub async fn loaded_runtime(gateway: &Arc<TestGateway>) -> BoardRuntime<TestGateway> {
    let mut runtime = BoardRuntime::new(TaskBoard::default(), Arc::clone(gateway));
    runtime.open_project(project_id(PROJECT));
    runtime.settle().await;
    runtime
}
