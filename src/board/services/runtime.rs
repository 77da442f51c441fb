//! Single-owner event loop driving a board against a remote gateway.

use super::{board::TaskBoard, executor::CommandExecutor};
use crate::board::{
    domain::{BoardCommand, BoardEvent, NewComment, NewTask, ProjectId, TaskId},
    ports::RemoteSyncGateway,
};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Owns a [`TaskBoard`] and feeds it UI events and remote resolutions.
///
/// UI events are applied immediately by the caller's task. Commands are
/// spawned onto the tokio runtime and their resolutions are queued on a
/// channel; they are applied one at a time, in arrival order, when the owner
/// calls [`BoardRuntime::next_resolution`] or [`BoardRuntime::settle`].
/// Dropping the runtime abandons in-flight requests.
pub struct BoardRuntime<G>
where
    G: RemoteSyncGateway + 'static,
{
    board: TaskBoard,
    executor: CommandExecutor<G>,
    resolutions_tx: mpsc::UnboundedSender<BoardEvent>,
    resolutions_rx: mpsc::UnboundedReceiver<BoardEvent>,
    in_flight: usize,
}

impl<G> BoardRuntime<G>
where
    G: RemoteSyncGateway + 'static,
{
    /// Creates a runtime around an existing board.
    #[must_use]
    pub fn new(board: TaskBoard, gateway: Arc<G>) -> Self {
        let (resolutions_tx, resolutions_rx) = mpsc::unbounded_channel();
        Self {
            board,
            executor: CommandExecutor::new(gateway),
            resolutions_tx,
            resolutions_rx,
            in_flight: 0,
        }
    }

    /// Returns the board state.
    #[must_use]
    pub const fn board(&self) -> &TaskBoard {
        &self.board
    }

    /// Returns the board state mutably, e.g. to drain notices.
    pub const fn board_mut(&mut self) -> &mut TaskBoard {
        &mut self.board
    }

    /// Returns the number of requests whose resolution has not been applied.
    #[must_use]
    pub const fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Opens a project and starts fetching it.
    pub fn open_project(&mut self, project_id: ProjectId) {
        let commands = self.board.open_project(project_id);
        self.spawn_all(commands);
    }

    /// Closes the board; pending resolutions will be discarded.
    pub fn close(&mut self) {
        self.board.close();
    }

    /// Applies a UI event and issues the requests it causes.
    pub fn dispatch(&mut self, event: BoardEvent) {
        let commands = self.board.handle(event);
        self.spawn_all(commands);
    }

    /// Starts a background revalidation.
    pub fn refresh(&mut self) {
        let commands = self.board.refresh();
        self.spawn_all(commands);
    }

    /// Retries a failed fetch.
    pub fn retry(&mut self) {
        let commands = self.board.retry();
        self.spawn_all(commands);
    }

    /// Requests creation of a task.
    pub fn create_task(&mut self, request: NewTask) {
        let commands = self.board.create_task(request);
        self.spawn_all(commands);
    }

    /// Requests deletion of a task.
    pub fn delete_task(&mut self, task_id: TaskId) {
        let commands = self.board.delete_task(task_id);
        self.spawn_all(commands);
    }

    /// Requests a new comment.
    pub fn create_comment(&mut self, request: NewComment) {
        let commands = self.board.create_comment(request);
        self.spawn_all(commands);
    }

    /// Waits for the next resolution and applies it.
    ///
    /// Returns `false` when nothing is in flight.
    pub async fn next_resolution(&mut self) -> bool {
        if self.in_flight == 0 {
            return false;
        }
        let Some(event) = self.resolutions_rx.recv().await else {
            return false;
        };
        self.in_flight -= 1;
        self.dispatch(event);
        true
    }

    /// Applies resolutions until no request is in flight, including the
    /// revalidations that mutations trigger.
    pub async fn settle(&mut self) {
        while self.next_resolution().await {}
    }

    fn spawn_all(&mut self, commands: Vec<BoardCommand>) {
        for command in commands {
            self.in_flight += 1;
            let executor = self.executor.clone();
            let resolutions = self.resolutions_tx.clone();
            tokio::spawn(async move {
                let ticket = command.ticket();
                let event = executor.execute(command).await;
                if resolutions.send(event).is_err() {
                    tracing::debug!(%ticket, "board runtime dropped before resolution");
                }
            });
        }
    }
}
