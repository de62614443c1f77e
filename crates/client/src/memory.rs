//! In-memory task store.
//!
//! [`MemoryStore`] keeps raw records in a vector and journals every call it
//! receives. It drives the dispatcher and the UI in tests and can be seeded
//! with records the HTTP API would reject, such as unknown statuses.
//!
//! Calls can be slowed down one at a time with [`MemoryStore::delay_next`]
//! to force responses to complete out of order, and made to fail with
//! [`MemoryStore::set_failing`].

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use corkboard_protocol::{NewTask, RecordBatch, TaskId, TaskPatch, TaskRecord};
use reqwest::StatusCode;

use crate::error::{ClientError, Result};
use crate::store::TaskStore;

/// A call received by a [`MemoryStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    /// `list()`
    List,
    /// `create(fields)`
    Create(NewTask),
    /// `update(id, patch)`
    Update(TaskId, TaskPatch),
    /// `delete(id)`
    Delete(TaskId),
}

impl StoreCall {
    /// Returns `true` for create, update and delete.
    #[must_use]
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Self::List)
    }
}

/// A task store backed by a vector.
///
/// # Examples
///
/// ```
/// use corkboard_client::{MemoryStore, StoreCall, TaskStore};
/// use corkboard_protocol::NewTask;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> corkboard_client::Result<()> {
/// let store = MemoryStore::new();
/// store.create(&NewTask { title: "Write docs".into(), ..NewTask::default() }).await?;
///
/// let batch = store.list().await?;
/// assert_eq!(batch.records[0].title, "Write docs");
/// assert_eq!(store.calls().len(), 2);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Vec<TaskRecord>>,
    next_id: AtomicU64,
    calls: Mutex<Vec<StoreCall>>,
    delays: Mutex<VecDeque<Duration>>,
    failing: AtomicBool,
}

impl MemoryStore {
    /// Creates an empty store. The first created task gets id `1`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the given records.
    ///
    /// Created tasks get ids above the largest numeric id seeded.
    #[must_use]
    pub fn with_records(records: Vec<TaskRecord>) -> Self {
        let max_id = records
            .iter()
            .filter_map(|r| r.id.as_str().parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        Self {
            records: Mutex::new(records),
            next_id: AtomicU64::new(max_id),
            ..Self::default()
        }
    }

    /// Returns a copy of the stored records.
    #[must_use]
    pub fn records(&self) -> Vec<TaskRecord> {
        lock(&self.records).clone()
    }

    /// Returns every call received so far, in arrival order.
    #[must_use]
    pub fn calls(&self) -> Vec<StoreCall> {
        lock(&self.calls).clone()
    }

    /// Returns only the create, update and delete calls.
    #[must_use]
    pub fn mutations(&self) -> Vec<StoreCall> {
        lock(&self.calls)
            .iter()
            .filter(|call| call.is_mutation())
            .cloned()
            .collect()
    }

    /// Delays the next call that has not started yet.
    ///
    /// Queued delays are consumed one per call, in call order.
    pub fn delay_next(&self, delay: Duration) {
        lock(&self.delays).push_back(delay);
    }

    /// Makes every subsequent call fail with a 500 status (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    async fn enter(&self, call: StoreCall) -> Result<()> {
        let delay = lock(&self.delays).pop_front();
        lock(&self.calls).push(call);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(ClientError::Status {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: String::new(),
            });
        }
        Ok(())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

fn not_found() -> ClientError {
    ClientError::Status {
        status: StatusCode::NOT_FOUND,
        body: String::new(),
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn list(&self) -> Result<RecordBatch> {
        self.enter(StoreCall::List).await?;
        Ok(RecordBatch::from(self.records()))
    }

    async fn create(&self, fields: &NewTask) -> Result<()> {
        self.enter(StoreCall::Create(fields.clone())).await?;
        let id = TaskId::from(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let record = TaskRecord::from(fields.clone().into_task(id));
        lock(&self.records).push(record);
        Ok(())
    }

    async fn update(&self, id: &TaskId, patch: &TaskPatch) -> Result<()> {
        self.enter(StoreCall::Update(id.clone(), patch.clone()))
            .await?;
        let mut records = lock(&self.records);
        let record = records
            .iter_mut()
            .find(|r| &r.id == id)
            .ok_or_else(not_found)?;
        record.apply(patch);
        Ok(())
    }

    async fn delete(&self, id: &TaskId) -> Result<()> {
        self.enter(StoreCall::Delete(id.clone())).await?;
        let mut records = lock(&self.records);
        let before = records.len();
        records.retain(|r| &r.id != id);
        if records.len() == before {
            return Err(not_found());
        }
        Ok(())
    }
}
