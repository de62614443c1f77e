//! corkboard - a terminal Kanban board over a REST task API.
//!
//! This is the main binary: it resolves the configuration, sets up file
//! logging, and runs the TUI until the user quits.

use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Context;
use clap::Parser;
use corkboard_client::TaskClient;
use corkboard_config::{Config, Theme, persistence};
use corkboard_tui::{App, terminal};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "CORKBOARD_LOG";

/// A terminal Kanban board over a REST task API
#[derive(Parser, Debug)]
#[command(name = "corkboard", version, about, long_about = None)]
struct Cli {
    /// Base URL of the task collection
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Config file to use instead of the default locations
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Initial theme (light or dark)
    #[arg(long, value_name = "THEME")]
    theme: Option<Theme>,

    /// Log file [default: <data_dir>/corkboard/corkboard.log]
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// Resolves the configuration: file, then environment, then flags.
    fn load_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path)
                .with_context(|| format!("loading config from {}", path.display()))?,
            None => Config::load().context("loading config")?,
        };
        config.apply_env()?;

        if let Some(url) = &self.api_url {
            config.api_url.clone_from(url);
        }
        if let Some(theme) = self.theme {
            config.theme = theme;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Sends `tracing` output to a file; the terminal belongs to the TUI.
fn init_logging(path: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    let path = match path {
        Some(path) => path,
        None => persistence::default_log_path()?,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating log directory {}", parent.display()))?;
    }
    let file = File::options()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(path)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Configuration errors end the process before the terminal is touched
    let config = cli.load_config()?;
    let log_path = init_logging(cli.log_file.clone())?;
    info!(api_url = %config.api_url, log = %log_path.display(), "starting corkboard");

    let client = TaskClient::new(&config.api_url, config.request_timeout())?;

    // Install panic hook to restore terminal on panic
    terminal::install_panic_hook();
    let mut terminal = terminal::setup_terminal()?;

    let mut app = App::new(config, Arc::new(client));
    let result = app.run(&mut terminal).await;

    // Always restore terminal, even if app.run() failed
    terminal::restore_terminal(&mut terminal)?;

    result
}
