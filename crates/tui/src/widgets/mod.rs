//! Widget components for the corkboard TUI.
//!
//! This module provides reusable rendering functions for the Kanban board UI,
//! organized into focused submodules for each visual component.
//!
//! # Overview
//!
//! The widget system follows a functional rendering approach where each widget
//! is a pure function that renders state to a buffer. This enables easy testing
//! and composition.
//!
//! # Modules
//!
//! - [`board`]: Renders the five columns and maps screen positions to cards
//! - [`lane`]: Renders individual columns with their card lists
//! - [`task_card`]: Renders task cards with a priority-colored border
//! - [`modal`]: Renders the create/edit form
//! - [`help`]: Renders the keybinding overlay
//!
//! # Color Coding
//!
//! Card borders follow the task's [`Priority`](corkboard_protocol::Priority):
//!
//! | Priority | Color |
//! |----------|-------|
//! | `Low` | Green (`Color::Green`) |
//! | `Medium` | Yellow (`Color::Yellow`) |
//! | `High` | Red (`Color::Red`) |
//!
//! # Example
//!
//! ```
//! use corkboard_config::Config;
//! use corkboard_protocol::{KanbanBoard, Priority, Status, Task, TaskId};
//! use corkboard_tui::widgets::{self, BoardView};
//! use ratatui::buffer::Buffer;
//! use ratatui::layout::Rect;
//!
//! let mut board = KanbanBoard::new();
//! board.rebuild([Task {
//!     id: TaskId::from(1),
//!     title: "Example".into(),
//!     description: "A sample task".into(),
//!     assigned_to: "Persona1".into(),
//!     priority: Priority::Medium,
//!     status: Status::Todo,
//!     end_date: String::new(),
//! }]);
//! let config = Config::default();
//!
//! let area = Rect::new(0, 0, 100, 24);
//! let mut buf = Buffer::empty(area);
//!
//! widgets::render_board(&BoardView::new(&board, &config), area, &mut buf);
//! ```

pub mod board;
pub mod help;
pub mod lane;
pub mod modal;
pub mod task_card;

// Re-export primary rendering functions for convenience
pub use board::{BoardView, card_at, column_at, lane_areas, render_board};
pub use help::render_help_overlay;
pub use lane::{LanePosition, render_lane};
pub use modal::render_modal;
pub use task_card::render_task_card;

#[cfg(test)]
mod tests;
