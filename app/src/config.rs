//! Command-line and environment configuration for the `todo` shell.

use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use todo_core::{Filter, TodoId};

pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

#[derive(Debug, Parser)]
#[command(name = "todo", version, about = "Browse todos from a read-only REST service")]
pub struct Cli {
    #[command(flatten)]
    pub config: Config,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Args)]
pub struct Config {
    /// Base URL of the todo service.
    #[arg(long, env = "TODO_API_URL", default_value = DEFAULT_BASE_URL, global = true)]
    pub base_url: String,

    /// Per-request timeout in milliseconds.
    #[arg(long, env = "TODO_TIMEOUT_MS", default_value_t = 10_000, global = true)]
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Interactive list/detail browser (default).
    Browse,
    /// Print the list once.
    List {
        /// all, open or completed
        #[arg(long, short, default_value = "all")]
        filter: Filter,
    },
    /// Print a single todo.
    Show { id: TodoId },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid config value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.base_url.trim();
        if url.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "base_url",
                reason: "must not be empty".to_string(),
            });
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "base_url",
                reason: format!("`{url}` must start with http:// or https://"),
            });
        }
        if self.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout_ms",
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
