//! Configuration management for the corkboard application.
//!
//! This crate handles loading, validating, and persisting configuration
//! from multiple sources (files, environment variables, defaults).
//!
//! # Overview
//!
//! The crate is organized into the following modules:
//!
//! - [`config`]: Core configuration struct, loading and validation
//! - [`person`]: Assignable people with flexible parsing
//! - [`appearance`]: Theme and backdrop settings
//! - [`persistence`]: Config file discovery, reading and writing
//! - [`error`]: Error types for configuration operations
//!
//! # Configuration Sources (Priority)
//!
//! Configuration is loaded from multiple sources with the following priority
//! (highest to lowest):
//!
//! 1. Command-line flags (applied by the binary)
//! 2. Environment variables (`CORKBOARD_API_URL`, `CORKBOARD_THEME`)
//! 3. Local config (`./corkboard.json5` or `./corkboard.json`)
//! 4. User config (`<config_dir>/corkboard/config.json5` or `config.json`)
//! 5. Built-in defaults
//!
//! # File Format
//!
//! ```json5
//! {
//!   api_url: "http://localhost:3000/api/tasks/",
//!   theme: "dark",
//!   backdrop: "cork",
//!   people: [
//!     // Short format: name only, default avatar
//!     "Persona1",
//!     // Full format with an avatar badge
//!     { name: "Persona2", avatar: "▲" },
//!   ],
//!   request_timeout_secs: 10,
//! }
//! ```
//!
//! # Examples
//!
//! ```no_run
//! use corkboard_config::Config;
//!
//! # fn example() -> corkboard_config::Result<()> {
//! let mut config = Config::load()?;
//! config.apply_env()?;
//! config.validate()?;
//!
//! println!("Talking to {}", config.api_url);
//! # Ok(())
//! # }
//! ```

pub mod appearance;
pub mod config;
pub mod error;
pub mod person;
pub mod persistence;

// Re-export primary types at crate root for convenience
pub use appearance::{Backdrop, Theme};
pub use config::{Config, DEFAULT_API_URL};
pub use error::{ConfigError, Result};
pub use person::{DEFAULT_AVATAR, Person};
