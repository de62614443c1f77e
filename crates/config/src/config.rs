//! Core configuration struct and loading logic.
//!
//! This module provides the main [`Config`] struct which aggregates all
//! configuration options for the corkboard application.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::appearance::{Backdrop, Theme};
use crate::error::{ConfigError, Result};
use crate::person::{DEFAULT_AVATAR, Person};
use crate::persistence::{find_config_file, read_config_file, write_config_file};

/// Base URL of the task API when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:3000/api/tasks/";

/// Environment variable overriding [`Config::api_url`].
pub const ENV_API_URL: &str = "CORKBOARD_API_URL";

/// Environment variable overriding [`Config::theme`].
pub const ENV_THEME: &str = "CORKBOARD_THEME";

/// The main configuration struct for the corkboard application.
///
/// # Examples
///
/// ```
/// use corkboard_config::{Config, Theme};
///
/// let config = Config::default();
/// assert_eq!(config.api_url, "http://localhost:3000/api/tasks/");
/// assert_eq!(config.theme, Theme::Light);
/// assert_eq!(config.people.len(), 3);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the task collection. Task ids are appended to it.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Initial palette.
    #[serde(default)]
    pub theme: Theme,

    /// Initial backdrop.
    #[serde(default)]
    pub backdrop: Backdrop,

    /// People offered in the assignee field, in cycling order.
    #[serde(default = "Person::defaults")]
    pub people: Vec<Person>,

    /// Per-request timeout. Requests never time out when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            theme: Theme::default(),
            backdrop: Backdrop::default(),
            people: Person::defaults(),
            request_timeout_secs: None,
        }
    }
}

impl Config {
    /// Loads configuration from the default file locations.
    ///
    /// Searches for configuration files in the following order:
    ///
    /// 1. Local: `./corkboard.json5` or `./corkboard.json`
    /// 2. User: `<config_dir>/corkboard/config.json5` or `config.json`
    ///
    /// If no configuration file is found, returns a default configuration.
    /// Environment overrides are not applied here; see [`Config::apply_env`].
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file is found but cannot be
    /// read, parsed or validated.
    pub fn load() -> Result<Self> {
        match find_config_file() {
            Some(path) => Self::load_from(path),
            None => Ok(Self::default()),
        }
    }

    /// Loads configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use corkboard_config::Config;
    ///
    /// # fn example() -> corkboard_config::Result<()> {
    /// let config = Config::load_from("team-board.json5")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let config: Config = read_config_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Saves the configuration to a file as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        write_config_file(path, self)
    }

    /// Applies `CORKBOARD_API_URL` and `CORKBOARD_THEME` from the process
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns an error if `CORKBOARD_THEME` names an unknown theme.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Applies environment overrides using a custom lookup.
    ///
    /// Empty values are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the theme override names an unknown theme.
    ///
    /// # Examples
    ///
    /// ```
    /// use corkboard_config::{Config, Theme};
    ///
    /// let mut config = Config::default();
    /// config
    ///     .apply_env_from(|key| match key {
    ///         "CORKBOARD_THEME" => Some("dark".to_string()),
    ///         _ => None,
    ///     })
    ///     .unwrap();
    /// assert_eq!(config.theme, Theme::Dark);
    /// ```
    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        let lookup = |key| lookup(key).filter(|value: &String| !value.trim().is_empty());

        if let Some(url) = lookup(ENV_API_URL) {
            self.api_url = url;
        }
        if let Some(theme) = lookup(ENV_THEME) {
            self.theme = theme.parse()?;
        }
        Ok(())
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `api_url` does not parse, or is not an `http`/`https` URL
    /// - `people` is empty
    /// - `request_timeout_secs` is zero
    ///
    /// # Examples
    ///
    /// ```
    /// use corkboard_config::Config;
    ///
    /// let mut config = Config::default();
    /// config.api_url = "not a url".to_string();
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.api_url).map_err(|source| ConfigError::InvalidApiUrl {
            url: self.api_url.clone(),
            source,
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme {
                scheme: url.scheme().to_string(),
            });
        }

        if self.people.is_empty() {
            return Err(ConfigError::NoPeople);
        }

        if self.request_timeout_secs == Some(0) {
            return Err(ConfigError::InvalidTimeout);
        }

        Ok(())
    }

    /// Returns the request timeout, if one is configured.
    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Returns the avatar badge for an assignee name.
    ///
    /// Unknown names get [`DEFAULT_AVATAR`].
    ///
    /// # Examples
    ///
    /// ```
    /// use corkboard_config::{Config, DEFAULT_AVATAR};
    ///
    /// let config = Config::default();
    /// assert_eq!(config.avatar_for("Persona1"), "◆");
    /// assert_eq!(config.avatar_for("Somebody"), DEFAULT_AVATAR);
    /// ```
    #[must_use]
    pub fn avatar_for(&self, assignee: &str) -> &str {
        self.people
            .iter()
            .find(|person| person.name() == assignee)
            .map_or(DEFAULT_AVATAR, Person::badge)
    }
}
