//! Turns board commands into gateway calls and resolution events.

use crate::board::{
    domain::{BoardCommand, BoardEvent, MutationKind, RequestTicket, TransitionRequest},
    ports::{GatewayError, RemoteSyncGateway},
};
use std::sync::Arc;

/// Executes [`BoardCommand`]s against a [`RemoteSyncGateway`].
///
/// The executor holds no board state, so any number of commands may be in
/// flight at once; ordering is restored when the resulting events are fed
/// back into the board.
pub struct CommandExecutor<G>
where
    G: RemoteSyncGateway,
{
    gateway: Arc<G>,
}

impl<G> Clone for CommandExecutor<G>
where
    G: RemoteSyncGateway,
{
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
        }
    }
}

impl<G> CommandExecutor<G>
where
    G: RemoteSyncGateway,
{
    /// Creates an executor over the given gateway.
    #[must_use]
    pub const fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Returns the underlying gateway.
    #[must_use]
    pub const fn gateway(&self) -> &Arc<G> {
        &self.gateway
    }

    /// Issues the command and returns the event describing its outcome.
    pub async fn execute(&self, command: BoardCommand) -> BoardEvent {
        match command {
            BoardCommand::FetchProject { ticket, project_id } => {
                match self.gateway.fetch_project_details(&project_id).await {
                    Ok(snapshot) => BoardEvent::SnapshotLoaded { ticket, snapshot },
                    Err(err) => BoardEvent::SnapshotFailed {
                        ticket,
                        reason: describe(&err),
                    },
                }
            }
            BoardCommand::UpdateStatus(request) => self.update_status(request).await,
            BoardCommand::CreateTask { ticket, request } => {
                match self.gateway.create_task(&request).await {
                    Ok(task) => BoardEvent::TaskCreated { ticket, task },
                    Err(err) => rejected(ticket, MutationKind::CreateTask, &err),
                }
            }
            BoardCommand::DeleteTask { ticket, task_id } => {
                match self.gateway.delete_task(&task_id).await {
                    Ok(deleted) => BoardEvent::TaskDeleted {
                        ticket,
                        task_id: deleted,
                    },
                    Err(err) => rejected(ticket, MutationKind::DeleteTask, &err),
                }
            }
            BoardCommand::CreateComment { ticket, request } => {
                match self.gateway.create_comment(&request).await {
                    Ok(comment) => BoardEvent::CommentCreated {
                        ticket,
                        task_id: request.task_id().clone(),
                        comment,
                    },
                    Err(err) => rejected(ticket, MutationKind::CreateComment, &err),
                }
            }
        }
    }

    async fn update_status(&self, request: TransitionRequest) -> BoardEvent {
        let TransitionRequest {
            ticket,
            task_id,
            status,
        } = request;
        match self.gateway.update_task_status(&task_id, status).await {
            Ok(confirmation) if confirmation.task_id == task_id => {
                BoardEvent::TransitionConfirmed {
                    ticket,
                    task_id,
                    status: confirmation.status,
                }
            }
            Ok(confirmation) => {
                tracing::warn!(
                    requested = %task_id,
                    confirmed = %confirmation.task_id,
                    "status confirmation for a different task"
                );
                BoardEvent::TransitionRejected {
                    ticket,
                    task_id,
                    reason: "server confirmed a different task".to_owned(),
                }
            }
            Err(err) => BoardEvent::TransitionRejected {
                ticket,
                task_id,
                reason: describe(&err),
            },
        }
    }
}

fn describe(err: &GatewayError) -> String {
    match err {
        GatewayError::RemoteRejected(reason) | GatewayError::NotFound(reason) => reason.clone(),
        GatewayError::Transport(_) => err.to_string(),
    }
}

fn rejected(ticket: RequestTicket, kind: MutationKind, err: &GatewayError) -> BoardEvent {
    BoardEvent::MutationRejected {
        ticket,
        kind,
        reason: describe(err),
    }
}
