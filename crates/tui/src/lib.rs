//! Terminal UI for corkboard.
//!
//! This crate provides a Ratatui-based Kanban board over the task API:
//! five status columns, drag-and-drop between them, and a form for
//! creating, editing and deleting tasks.
//!
//! # Overview
//!
//! The crate is organized into the following modules:
//!
//! - [`app`]: Main application struct and run loop
//! - [`state`]: Session state (board, selection, modal, drag, appearance)
//! - [`drag`]: Drag-and-drop gesture controller
//! - [`modal`]: Create/edit form state
//! - [`theme`]: Color palettes for the themes and backdrops
//! - [`widgets`]: Rendering functions
//! - [`terminal`]: Terminal setup, teardown, and panic handling
//! - [`event`]: Event handling and key mappings
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use corkboard_client::TaskClient;
//! use corkboard_config::Config;
//! use corkboard_tui::{App, terminal};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     let client = TaskClient::new(&config.api_url, config.request_timeout())?;
//!
//!     terminal::install_panic_hook();
//!     let mut terminal = terminal::setup_terminal()?;
//!
//!     let mut app = App::new(config, Arc::new(client));
//!     let result = app.run(&mut terminal).await;
//!
//!     terminal::restore_terminal(&mut terminal)?;
//!     result
//! }
//! ```

pub mod app;
pub mod drag;
pub mod event;
pub mod layout;
pub mod modal;
pub mod state;
pub mod terminal;
pub mod theme;
pub mod widgets;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export primary types at crate root for convenience
pub use app::App;
pub use state::{AppState, Focus};
