//! Shared protocol types for the corkboard application.
//!
//! This crate defines the core types used across all corkboard components,
//! including tasks, the Kanban board structure, messages, and error types.
//!
//! # Overview
//!
//! The crate is organized into the following modules:
//!
//! - [`task`]: Task identifiers, statuses, priorities, wire records and request bodies
//! - [`board`]: Board columns and the `KanbanBoard` view
//! - [`message`]: TUI event messages
//! - [`error`]: Error types for protocol operations
//!
//! # Examples
//!
//! Validating a fetched record and placing it on the board:
//!
//! ```
//! use corkboard_protocol::{KanbanBoard, Status, Task, TaskId, TaskRecord};
//!
//! let batch = TaskRecord::list_from_json(
//!     br#"[{"id": 1, "title": "Fix bug", "status": "todo", "priority": "High"}]"#,
//! ).unwrap();
//!
//! let tasks: Vec<Task> = batch
//!     .records
//!     .into_iter()
//!     .filter_map(|record| Task::try_from(record).ok())
//!     .collect();
//!
//! let mut board = KanbanBoard::new();
//! board.rebuild(tasks);
//!
//! // Optimistic move on drop; the record keeps the server's status.
//! let id = TaskId::from(1);
//! board.move_card(&id, Status::Done);
//! assert_eq!(board.placement(&id), Some(Status::Done));
//! assert_eq!(board.record(&id).unwrap().status, Status::Todo);
//! ```

pub mod board;
pub mod error;
pub mod message;
pub mod task;

// Re-export primary types at crate root for convenience
pub use board::{KanbanBoard, Lane};
pub use error::{ProtocolError, Result};
pub use message::Message;
pub use task::{NewTask, Priority, RecordBatch, Status, Task, TaskId, TaskPatch, TaskRecord};
