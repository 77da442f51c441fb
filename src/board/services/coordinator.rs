//! Optimistic status transitions and their reconciliation.

use crate::board::domain::{RequestTicket, TaskId, TaskStatus, TaskStore, TransitionRequest};
use std::collections::{BTreeSet, HashMap, hash_map::Entry};

/// How a remote resolution was reconciled with the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// A request was confirmed and the store already matched.
    Settled,
    /// A request was confirmed with a status different from the local one,
    /// which it replaced.
    Corrected(TaskStatus),
    /// The latest request was rejected and the task reverted to its last
    /// confirmed status.
    RolledBack(TaskStatus),
    /// The latest request was rejected and the optimistic status was kept.
    Kept,
    /// A newer request for the same task is in flight; the resolution was
    /// discarded.
    Superseded,
    /// Nothing in flight matches the resolution; it was discarded.
    Stale,
}

impl Resolution {
    /// Returns `true` when the resolution is a failure the user must see.
    #[must_use]
    pub const fn is_surfaced_failure(self) -> bool {
        matches!(self, Self::RolledBack(_) | Self::Kept)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingTransition {
    latest: Option<Requested>,
    earlier: BTreeSet<RequestTicket>,
    baseline: TaskStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Requested {
    ticket: RequestTicket,
    status: TaskStatus,
}

impl PendingTransition {
    const fn awaits_latest(&self) -> bool {
        self.latest.is_some()
    }

    fn is_settled(&self) -> bool {
        self.latest.is_none() && self.earlier.is_empty()
    }

    /// Stops tracking `ticket` and every request issued before it.
    fn retire_through(&mut self, ticket: RequestTicket) {
        self.earlier = self.earlier.split_off(&ticket);
        self.earlier.remove(&ticket);
    }
}

/// Applies status changes optimistically and reconciles server resolutions.
///
/// For each task only the most recently issued request may change the
/// store while it is unresolved. Resolutions of earlier requests are
/// discarded, although a confirmation still moves the rollback baseline
/// because it reflects what the server now holds. Once the latest request
/// has been rejected, a confirmation of an earlier request still in flight
/// is applied to the store.
#[derive(Debug, Clone)]
pub struct StatusTransitionCoordinator {
    epoch: u64,
    rollback_on_rejection: bool,
    pending: HashMap<TaskId, PendingTransition>,
}

impl StatusTransitionCoordinator {
    /// Creates a coordinator for the given project context.
    #[must_use]
    pub fn new(epoch: u64, rollback_on_rejection: bool) -> Self {
        Self {
            epoch,
            rollback_on_rejection,
            pending: HashMap::new(),
        }
    }

    /// Forgets every pending transition and adopts a new project context.
    pub fn reset(&mut self, epoch: u64) {
        self.epoch = epoch;
        self.pending.clear();
    }

    /// Applies a status change locally and returns the request to send.
    ///
    /// Returns `None` when the task is not in the store.
    pub fn begin(
        &mut self,
        store: &mut TaskStore,
        ticket: RequestTicket,
        task_id: TaskId,
        status: TaskStatus,
    ) -> Option<TransitionRequest> {
        let current = store.status_of(&task_id)?;
        store.set_status(&task_id, status);

        let requested = Requested { ticket, status };
        match self.pending.entry(task_id.clone()) {
            Entry::Occupied(mut occupied) => {
                let pending = occupied.get_mut();
                if let Some(previous) = pending.latest.replace(requested) {
                    pending.earlier.insert(previous.ticket);
                }
            }
            Entry::Vacant(vacant) => {
                vacant.insert(PendingTransition {
                    latest: Some(requested),
                    earlier: BTreeSet::new(),
                    baseline: current,
                });
            }
        }
        tracing::debug!(task_id = %task_id, %ticket, from = %current, to = %status, "optimistic status change");

        Some(TransitionRequest {
            ticket,
            task_id,
            status,
        })
    }

    /// Reconciles a server confirmation.
    pub fn confirm(
        &mut self,
        store: &mut TaskStore,
        ticket: RequestTicket,
        task_id: &TaskId,
        status: TaskStatus,
    ) -> Resolution {
        match self.classify(ticket, task_id) {
            Match::Latest => {
                self.pending.remove(task_id);
                apply_confirmed(store, ticket, task_id, status)
            }
            Match::Earlier => {
                let Some(pending) = self.pending.get_mut(task_id) else {
                    return Resolution::Stale;
                };
                pending.retire_through(ticket);
                pending.baseline = status;
                if pending.awaits_latest() {
                    tracing::debug!(task_id = %task_id, %ticket, "discarding superseded confirmation");
                    return Resolution::Superseded;
                }
                if pending.is_settled() {
                    self.pending.remove(task_id);
                }
                apply_confirmed(store, ticket, task_id, status)
            }
            Match::None => {
                tracing::debug!(task_id = %task_id, %ticket, "discarding stale confirmation");
                Resolution::Stale
            }
        }
    }

    /// Reconciles a server rejection or delivery failure.
    pub fn reject(
        &mut self,
        store: &mut TaskStore,
        ticket: RequestTicket,
        task_id: &TaskId,
    ) -> Resolution {
        match self.classify(ticket, task_id) {
            Match::Latest => {
                let Some(pending) = self.pending.get_mut(task_id) else {
                    return Resolution::Stale;
                };
                pending.latest = None;
                let baseline = pending.baseline;
                if pending.is_settled() {
                    self.pending.remove(task_id);
                }
                if self.rollback_on_rejection {
                    store.set_status(task_id, baseline);
                    tracing::debug!(task_id = %task_id, %ticket, to = %baseline, "rolled back rejected status change");
                    Resolution::RolledBack(baseline)
                } else {
                    Resolution::Kept
                }
            }
            Match::Earlier => {
                let settled = self.pending.get_mut(task_id).is_some_and(|pending| {
                    pending.earlier.remove(&ticket);
                    pending.is_settled()
                });
                if settled {
                    self.pending.remove(task_id);
                }
                tracing::debug!(task_id = %task_id, %ticket, "discarding superseded rejection");
                Resolution::Superseded
            }
            Match::None => {
                tracing::debug!(task_id = %task_id, %ticket, "discarding stale rejection");
                Resolution::Stale
            }
        }
    }

    /// Adopts a freshly loaded snapshot as the confirmed baseline.
    ///
    /// Requests still in flight stay tracked; those for tasks missing from
    /// the snapshot are dropped so their late resolutions become stale.
    pub fn reconcile_snapshot(&mut self, store: &TaskStore) {
        self.pending.retain(|task_id, pending| {
            store.status_of(task_id).is_some_and(|status| {
                pending.baseline = status;
                true
            })
        });
    }

    /// Drops any pending transition for a deleted task.
    pub fn forget(&mut self, task_id: &TaskId) {
        self.pending.remove(task_id);
    }

    /// Returns `true` while a status change for the task is unconfirmed.
    #[must_use]
    pub fn is_pending(&self, task_id: &TaskId) -> bool {
        self.pending
            .get(task_id)
            .is_some_and(PendingTransition::awaits_latest)
    }

    /// Returns the most recently requested status for an unconfirmed task.
    #[must_use]
    pub fn requested_status(&self, task_id: &TaskId) -> Option<TaskStatus> {
        self.pending
            .get(task_id)
            .and_then(|pending| pending.latest)
            .map(|latest| latest.status)
    }

    /// Returns the number of unconfirmed status changes.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending
            .values()
            .filter(|pending| pending.awaits_latest())
            .count()
    }

    fn classify(&self, ticket: RequestTicket, task_id: &TaskId) -> Match {
        if ticket.epoch != self.epoch {
            return Match::None;
        }
        let Some(pending) = self.pending.get(task_id) else {
            return Match::None;
        };
        if pending.latest.is_some_and(|latest| latest.ticket == ticket) {
            Match::Latest
        } else if pending.earlier.contains(&ticket) {
            Match::Earlier
        } else {
            Match::None
        }
    }
}

fn apply_confirmed(
    store: &mut TaskStore,
    ticket: RequestTicket,
    task_id: &TaskId,
    status: TaskStatus,
) -> Resolution {
    if store.set_status(task_id, status) {
        tracing::debug!(task_id = %task_id, %ticket, %status, "server status differs, corrected");
        Resolution::Corrected(status)
    } else {
        Resolution::Settled
    }
}

enum Match {
    Latest,
    Earlier,
    None,
}
