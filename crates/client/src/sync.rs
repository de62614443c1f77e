//! Background execution of store calls.
//!
//! The UI never awaits the network. It hands mutations to a [`Dispatcher`],
//! which runs each one as a Tokio task and reports back over an unbounded
//! channel of [`SyncEvent`]s that the UI drains between frames.
//!
//! Guarantees:
//!
//! - Every job, whether a mutation or a plain refresh, ends with exactly one
//!   [`SyncEvent::Refreshed`]. A mutation is followed by a refresh even when
//!   it failed.
//! - Each refresh carries a ticket drawn from a monotonically increasing
//!   counter when its list request starts. Consumers drop refreshes whose
//!   ticket is older than the last one they applied.
//! - Mutations on the same task id run one after another in submission
//!   order. Mutations on different tasks, and creates, run concurrently.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use corkboard_protocol::{NewTask, TaskId, TaskPatch};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::store::{FetchedTasks, TaskStore, validate_records};

/// The kind of a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    /// `create`
    Create,
    /// `update`
    Update,
    /// `delete`
    Delete,
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        })
    }
}

/// Completion events delivered to the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    /// A mutation finished.
    Mutated {
        /// What was attempted.
        op: MutationKind,
        /// The task concerned; `None` for creates.
        id: Option<TaskId>,
        /// Whether the store accepted it.
        ok: bool,
    },
    /// A list request finished.
    Refreshed {
        /// Ordering ticket taken when the request started.
        ticket: u64,
        /// The validated task list, or `None` if the request failed.
        tasks: Option<FetchedTasks>,
    },
}

enum Mutation {
    Create(NewTask),
    Update(TaskId, TaskPatch),
    Delete(TaskId),
}

impl Mutation {
    fn kind(&self) -> MutationKind {
        match self {
            Self::Create(_) => MutationKind::Create,
            Self::Update(..) => MutationKind::Update,
            Self::Delete(_) => MutationKind::Delete,
        }
    }

    fn id(&self) -> Option<&TaskId> {
        match self {
            Self::Create(_) => None,
            Self::Update(id, _) | Self::Delete(id) => Some(id),
        }
    }
}

/// State shared between the dispatcher and its jobs.
struct Shared {
    store: Arc<dyn TaskStore>,
    events: mpsc::UnboundedSender<SyncEvent>,
    tickets: AtomicU64,
    in_flight: AtomicUsize,
}

impl Shared {
    fn emit(&self, event: SyncEvent) {
        if self.events.send(event).is_err() {
            debug!("sync event dropped, receiver closed");
        }
    }

    async fn refresh(&self) {
        let ticket = self.tickets.fetch_add(1, Ordering::SeqCst) + 1;
        let tasks = match self.store.list().await {
            Ok(batch) => {
                let fetched = validate_records(batch);
                debug!(
                    ticket,
                    count = fetched.tasks.len(),
                    rejected = fetched.rejected,
                    "refreshed tasks"
                );
                Some(fetched)
            }
            Err(e) => {
                warn!(ticket, error = %e, "failed to fetch tasks");
                None
            }
        };
        self.emit(SyncEvent::Refreshed { ticket, tasks });
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }

    async fn mutate(&self, mutation: Mutation) {
        let op = mutation.kind();
        let result = match &mutation {
            Mutation::Create(fields) => self.store.create(fields).await,
            Mutation::Update(id, patch) => self.store.update(id, patch).await,
            Mutation::Delete(id) => self.store.delete(id).await,
        };

        let id = mutation.id().cloned();
        match &result {
            Ok(()) => info!(%op, id = ?id, "mutation applied"),
            Err(e) => warn!(%op, id = ?id, error = %e, "mutation failed"),
        }
        self.emit(SyncEvent::Mutated {
            op,
            id,
            ok: result.is_ok(),
        });
    }
}

/// Runs store calls in the background.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use corkboard_client::{Dispatcher, MemoryStore, SyncEvent};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let (dispatcher, mut events) = Dispatcher::new(Arc::new(MemoryStore::new()));
/// dispatcher.refresh();
///
/// match events.recv().await {
///     Some(SyncEvent::Refreshed { ticket, tasks }) => {
///         assert_eq!(ticket, 1);
///         assert!(tasks.unwrap().tasks.is_empty());
///     }
///     other => panic!("unexpected event: {other:?}"),
/// }
/// # }
/// ```
pub struct Dispatcher {
    shared: Arc<Shared>,
    tails: HashMap<TaskId, JoinHandle<()>>,
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("in_flight", &self.pending())
            .field("queued_tasks", &self.tails.len())
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    /// Creates a dispatcher and the receiving end of its event channel.
    #[must_use]
    pub fn new(store: Arc<dyn TaskStore>) -> (Self, mpsc::UnboundedReceiver<SyncEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        let shared = Arc::new(Shared {
            store,
            events,
            tickets: AtomicU64::new(0),
            in_flight: AtomicUsize::new(0),
        });
        let dispatcher = Self {
            shared,
            tails: HashMap::new(),
        };
        (dispatcher, rx)
    }

    /// Returns the number of jobs whose final refresh has not been delivered.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.shared.in_flight.load(Ordering::SeqCst)
    }

    /// Fetches the task list without mutating anything.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn refresh(&self) {
        let shared = Arc::clone(&self.shared);
        shared.in_flight.fetch_add(1, Ordering::SeqCst);
        tokio::spawn(async move { shared.refresh().await });
    }

    /// Creates a task, then refreshes.
    pub fn create(&mut self, fields: NewTask) {
        self.submit(Mutation::Create(fields));
    }

    /// Updates a task, then refreshes.
    pub fn update(&mut self, id: TaskId, patch: TaskPatch) {
        self.submit(Mutation::Update(id, patch));
    }

    /// Deletes a task, then refreshes.
    pub fn delete(&mut self, id: TaskId) {
        self.submit(Mutation::Delete(id));
    }

    fn submit(&mut self, mutation: Mutation) {
        self.tails.retain(|_, job| !job.is_finished());

        let id = mutation.id().cloned();
        let previous = id.as_ref().and_then(|id| self.tails.remove(id));
        if previous.is_some() {
            debug!(id = ?id, "queueing behind earlier request for the same task");
        }

        let shared = Arc::clone(&self.shared);
        shared.in_flight.fetch_add(1, Ordering::SeqCst);
        let job = tokio::spawn(async move {
            if let Some(previous) = previous {
                // A panicked predecessor must not block its successors.
                let _ = previous.await;
            }
            shared.mutate(mutation).await;
            shared.refresh().await;
        });

        if let Some(id) = id {
            self.tails.insert(id, job);
        }
    }
}
