//! Task API client for corkboard.
//!
//! This crate connects the board to the REST task API.
//!
//! # Overview
//!
//! The crate provides:
//!
//! - [`TaskStore`]: The create/update/delete/list contract
//! - [`TaskClient`]: The HTTP implementation over `reqwest`
//! - [`MemoryStore`]: An in-memory implementation that journals its calls
//! - [`validate_records`]: The boundary where unknown statuses are dropped
//! - [`Dispatcher`] and [`SyncEvent`]: Background execution with completion events
//! - [`ClientError`]: Error types for task API operations
//!
//! # Failure Model
//!
//! Nothing here retries. Failed mutations and failed list requests are logged
//! through `tracing`; a failed list is reported to the UI as "no data" so the
//! board is left as it was.
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use corkboard_client::{Dispatcher, SyncEvent, TaskClient};
//! use corkboard_protocol::{Status, TaskId, TaskPatch};
//!
//! # async fn example() -> corkboard_client::Result<()> {
//! let client = TaskClient::new("http://localhost:3000/api/tasks/", None)?;
//! let (mut dispatcher, mut events) = Dispatcher::new(Arc::new(client));
//!
//! dispatcher.update(TaskId::from(1), TaskPatch::status_only(Status::Done));
//!
//! while let Some(event) = events.recv().await {
//!     if let SyncEvent::Refreshed { tasks: Some(fetched), .. } = event {
//!         println!("{} tasks on the board", fetched.tasks.len());
//!         break;
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod http;
pub mod memory;
pub mod store;
pub mod sync;

pub use error::{ClientError, Result};
pub use http::TaskClient;
pub use memory::{MemoryStore, StoreCall};
pub use store::{FetchedTasks, TaskStore, validate_records};
pub use sync::{Dispatcher, MutationKind, SyncEvent};
