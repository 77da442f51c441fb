//! Shared world state for task board synchronisation scenarios.

use std::sync::Arc;

use chrono::Utc;
use eyre::WrapErr;
use mockable::DefaultClock;
use rstest::fixture;
use taskboard::board::{
    adapters::memory::InMemoryRemoteGateway,
    domain::{
        BoardCommand, BoardDomainError, BoardEvent, ProjectDetails, ProjectId, ProjectSummary,
        Task, TaskId, TaskStatus, TransitionRequest,
    },
    services::{CommandExecutor, TaskBoard},
};

/// Gateway type used by the BDD world.
pub type TestGateway = InMemoryRemoteGateway<DefaultClock>;

/// Scenario world: a board, the requests it has issued that the server has
/// not processed yet, and server answers held back from the board.
pub struct BoardWorld {
    pub board: TaskBoard,
    pub gateway: Arc<TestGateway>,
    pub executor: CommandExecutor<TestGateway>,
    pub server_tasks: Vec<(String, TaskStatus)>,
    pub outstanding: Vec<BoardCommand>,
    pub answers: Vec<(TransitionRequest, BoardEvent)>,
}

impl BoardWorld {
    /// Creates a world with an empty server and no open project.
    #[must_use]
    pub fn new() -> Self {
        let gateway = Arc::new(InMemoryRemoteGateway::new(DefaultClock));
        Self {
            board: TaskBoard::default(),
            executor: CommandExecutor::new(Arc::clone(&gateway)),
            gateway,
            server_tasks: Vec::new(),
            outstanding: Vec::new(),
            answers: Vec::new(),
        }
    }

    /// Seeds the server with the accumulated tasks under `project_id`.
    pub fn seed_server(&self, project_id: &ProjectId) -> Result<(), eyre::Report> {
        let tasks = self
            .server_tasks
            .iter()
            .map(|(id, status)| {
                Ok(Task::new(
                    TaskId::new(id.as_str())?,
                    format!("Task {id}"),
                    *status,
                    Utc::now(),
                ))
            })
            .collect::<Result<Vec<_>, BoardDomainError>>()
            .wrap_err("build server tasks")?;
        self.gateway
            .seed(ProjectDetails::new(
                ProjectSummary::new(project_id.clone(), "Website relaunch"),
                tasks,
            ))
            .wrap_err("seed in-memory gateway")
    }

    /// Removes the outstanding status update of `task` to `status`.
    pub fn take_update(
        &mut self,
        task: &str,
        status: TaskStatus,
    ) -> Result<TransitionRequest, eyre::Report> {
        let position = self
            .outstanding
            .iter()
            .position(|command| {
                matches!(
                    command,
                    BoardCommand::UpdateStatus(request)
                        if request.task_id.as_str() == task && request.status == status
                )
            })
            .ok_or_else(|| eyre::eyre!("no outstanding update of {task} to {status}"))?;
        match self.outstanding.remove(position) {
            BoardCommand::UpdateStatus(request) => Ok(request),
            other => Err(eyre::eyre!("expected a status update, found {other:?}")),
        }
    }

    /// Executes one outstanding command and applies its resolution.
    pub fn resolve(&mut self, command: BoardCommand) {
        let event = run_async(self.executor.execute(command));
        let follow_ups = self.board.handle(event);
        self.outstanding.extend(follow_ups);
    }
}

impl Default for BoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BoardWorld {
    BoardWorld::default()
}

/// Parses a column name used in feature files.
pub fn parse_status(raw: &str) -> Result<TaskStatus, eyre::Report> {
    TaskStatus::try_from(raw).map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
