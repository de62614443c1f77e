//! The task store seam.
//!
//! [`TaskStore`] is the four-operation contract the rest of the application
//! talks to. [`TaskClient`](crate::TaskClient) implements it over HTTP and
//! [`MemoryStore`](crate::MemoryStore) in memory.
//!
//! Listing returns a [`RecordBatch`] of raw records; [`validate_records`] is
//! where malformed elements and records with an unknown status or priority
//! are dropped and logged before anything reaches the board.

use async_trait::async_trait;
use corkboard_protocol::{NewTask, RecordBatch, Task, TaskId, TaskPatch};
use tracing::warn;

use crate::error::Result;

/// CRUD access to the task collection.
///
/// No implementation caches: every `list` reflects the store at call time.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Returns every task currently stored, in store order.
    async fn list(&self) -> Result<RecordBatch>;

    /// Stores a new task. The id is assigned by the store.
    async fn create(&self, fields: &NewTask) -> Result<()>;

    /// Overwrites the fields present in `patch`.
    async fn update(&self, id: &TaskId, patch: &TaskPatch) -> Result<()>;

    /// Removes a task.
    async fn delete(&self, id: &TaskId) -> Result<()>;
}

/// Tasks that passed validation, plus how many records were dropped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FetchedTasks {
    /// Valid tasks, in store order.
    pub tasks: Vec<Task>,
    /// Number of list elements dropped: malformed elements plus records
    /// with an unknown status or priority.
    pub rejected: usize,
}

/// Converts raw records into tasks, logging and dropping invalid ones.
///
/// # Examples
///
/// ```
/// use corkboard_client::validate_records;
/// use corkboard_protocol::TaskRecord;
///
/// let batch = TaskRecord::list_from_json(
///     br#"[{"id": 1, "status": "todo", "priority": "Low"},
///          {"id": 2, "status": "archived", "priority": "Low"},
///          {"status": "todo"}]"#,
/// ).unwrap();
///
/// let fetched = validate_records(batch);
/// assert_eq!(fetched.tasks.len(), 1);
/// assert_eq!(fetched.rejected, 2);
/// ```
#[must_use]
pub fn validate_records(batch: RecordBatch) -> FetchedTasks {
    let mut fetched = FetchedTasks::default();
    for (index, e) in &batch.malformed {
        warn!(index, error = %e, "dropping malformed task record");
        fetched.rejected += 1;
    }
    for record in batch.records {
        let id = record.id.clone();
        match Task::try_from(record) {
            Ok(task) => fetched.tasks.push(task),
            Err(e) => {
                warn!(%id, error = %e, "dropping task record");
                fetched.rejected += 1;
            }
        }
    }
    fetched
}
