//! Persistence of optimistic status changes.

use super::drag::PendingStatusChange;
use super::store::{TaskStore, WeakTaskStore};
use crate::board::{
    domain::{Task, TaskId},
    ports::{TaskGateway, TaskGatewayError},
};
use crate::config::ReconcilePolicy;
use std::collections::{BTreeSet, HashMap};
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tracing::{debug, info, warn};

/// How a reconciliation ended when the task API accepted the change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// The authoritative task replaced the optimistic one in the store.
    Applied(Task),
    /// A newer change for the same task was issued; the response was dropped.
    Superseded(Task),
    /// The store's owner went away; the response was dropped.
    Detached(Task),
}

impl ReconcileOutcome {
    /// Returns the authoritative task sent by the task API.
    #[must_use]
    pub const fn task(&self) -> &Task {
        match self {
            Self::Applied(task) | Self::Superseded(task) | Self::Detached(task) => task,
        }
    }
}

/// Failure to persist a status change.
#[derive(Debug, Clone, Error)]
pub enum ReconcileError {
    /// The task API did not accept the change. The change is not retried.
    #[error("status change for task {task_id} failed")]
    Failed {
        /// Task whose change failed.
        task_id: TaskId,
        /// Whether the store was restored to the pre-drop task.
        rolled_back: bool,
        /// Underlying gateway failure.
        #[source]
        source: TaskGatewayError,
    },
}

/// Result type for reconciliation.
pub type ReconcileResult = Result<ReconcileOutcome, ReconcileError>;

/// Sequence numbers issued for one task. `live` holds the numbers whose
/// request was sent or may still be sent.
#[derive(Debug, Default)]
struct TaskSequences {
    issued: u64,
    live: BTreeSet<u64>,
}

/// Issues monotonically increasing per-task sequence numbers.
#[derive(Debug, Default)]
struct Sequencer {
    tasks: Mutex<HashMap<TaskId, TaskSequences>>,
}

impl Sequencer {
    fn lock(&self) -> MutexGuard<'_, HashMap<TaskId, TaskSequences>> {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn issue(self: &Arc<Self>, task_id: &TaskId) -> SequenceTicket {
        let mut tasks = self.lock();
        let entry = tasks.entry(task_id.clone()).or_default();
        entry.issued += 1;
        entry.live.insert(entry.issued);
        SequenceTicket {
            sequencer: Arc::clone(self),
            task_id: task_id.clone(),
            sequence: entry.issued,
            sent: false,
        }
    }

    fn is_latest(&self, task_id: &TaskId, sequence: u64) -> bool {
        self.lock()
            .get(task_id)
            .and_then(|entry| entry.live.last().copied())
            .is_none_or(|latest| latest == sequence)
    }

    /// Forgets a number whose request was never sent.
    fn withdraw(&self, task_id: &TaskId, sequence: u64) {
        if let Some(entry) = self.lock().get_mut(task_id) {
            entry.live.remove(&sequence);
        }
    }

    /// Forgets numbers older than a completed request.
    fn settle(&self, task_id: &TaskId, sequence: u64) {
        if let Some(entry) = self.lock().get_mut(task_id) {
            entry.live.retain(|live| *live >= sequence);
        }
    }
}

/// A sequence number held by one reconciliation future. Dropping the ticket
/// before the request is sent withdraws the number.
#[derive(Debug)]
struct SequenceTicket {
    sequencer: Arc<Sequencer>,
    task_id: TaskId,
    sequence: u64,
    sent: bool,
}

impl SequenceTicket {
    const fn mark_sent(&mut self) -> u64 {
        self.sent = true;
        self.sequence
    }
}

impl Drop for SequenceTicket {
    fn drop(&mut self) {
        if self.sent {
            self.sequencer.settle(&self.task_id, self.sequence);
        } else {
            debug!(task_id = %self.task_id, sequence = self.sequence, "unsent status change withdrawn");
            self.sequencer.withdraw(&self.task_id, self.sequence);
        }
    }
}

/// Sends status changes to the task API and folds the answers into the
/// store.
pub struct ReconciliationClient<G>
where
    G: TaskGateway + 'static,
{
    gateway: Arc<G>,
    store: WeakTaskStore,
    policy: ReconcilePolicy,
    sequencer: Arc<Sequencer>,
}

impl<G> Clone for ReconciliationClient<G>
where
    G: TaskGateway + 'static,
{
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            store: self.store.clone(),
            policy: self.policy,
            sequencer: Arc::clone(&self.sequencer),
        }
    }
}

impl<G> ReconciliationClient<G>
where
    G: TaskGateway + 'static,
{
    /// Creates a client writing into `store`.
    ///
    /// Only a weak handle to the store is kept, so responses arriving after
    /// the store was dropped are discarded.
    #[must_use]
    pub fn new(gateway: Arc<G>, store: &TaskStore, policy: ReconcilePolicy) -> Self {
        Self {
            gateway,
            store: store.downgrade(),
            policy,
            sequencer: Arc::new(Sequencer::default()),
        }
    }

    /// Returns the active policy.
    #[must_use]
    pub const fn policy(&self) -> ReconcilePolicy {
        self.policy
    }

    /// Issues the status change in `change`.
    ///
    /// The sequence number is taken when this method is called, so call it in
    /// drop order. The returned future owns everything it needs and can be
    /// spawned; it performs exactly one gateway call. Dropping the future
    /// before it is first polled withdraws its sequence number, so it never
    /// supersedes a change that was actually sent.
    pub fn reconcile(
        &self,
        change: PendingStatusChange,
    ) -> impl Future<Output = ReconcileResult> + Send + 'static {
        let ticket = self.sequencer.issue(change.task_id());
        let client = self.clone();
        async move { client.complete(change, ticket).await }
    }

    async fn complete(self, change: PendingStatusChange, mut ticket: SequenceTicket) -> ReconcileResult {
        let sequence = ticket.mark_sent();
        let task_id = change.task_id().clone();
        info!(
            task_id = %task_id,
            status = %change.status(),
            sequence,
            "persisting status change"
        );
        let response = self.gateway.update_status(&task_id, change.status()).await;
        match response {
            Ok(task) => Ok(self.apply(task, sequence)),
            Err(source) => Err(self.fail(&change, sequence, source)),
        }
    }

    fn apply(&self, task: Task, sequence: u64) -> ReconcileOutcome {
        let Some(store) = self.store.upgrade() else {
            debug!(task_id = %task.id(), "store dropped before response arrived");
            return ReconcileOutcome::Detached(task);
        };
        if self.policy.discard_stale_responses && !self.sequencer.is_latest(task.id(), sequence) {
            debug!(task_id = %task.id(), sequence, "discarding stale status response");
            return ReconcileOutcome::Superseded(task);
        }
        store.update(task.clone());
        debug!(task_id = %task.id(), status = %task.status(), "status change reconciled");
        ReconcileOutcome::Applied(task)
    }

    fn fail(
        &self,
        change: &PendingStatusChange,
        sequence: u64,
        source: TaskGatewayError,
    ) -> ReconcileError {
        let task_id = change.task_id().clone();
        let rolled_back = self.policy.rollback_on_failure
            && self.sequencer.is_latest(&task_id, sequence)
            && self.store.upgrade().is_some_and(|store| {
                store.update_if(change.optimistic(), change.previous().clone())
            });
        warn!(
            task_id = %task_id,
            status = %change.status(),
            rolled_back,
            error = %source,
            "status change failed"
        );
        ReconcileError::Failed {
            task_id,
            rolled_back,
            source,
        }
    }
}
