//! Logging setup for the `sxi` binary using `tracing-subscriber`.
//!
//! The library only emits `tracing` events; installing a subscriber is left to
//! the binary (or to whoever embeds the index).
//!
//! # Log Levels
//!
//! - `error`: rejected updates
//! - `warn`: skipped duplicate artifacts
//! - `info`: build summaries
//! - `debug`: one event per indexed document or artifact
//! - `trace`: one event per recorded node and skipped envelope
//!
//! Logs go to stderr so query output on stdout stays machine-readable.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// Filter used when nothing else asks for more
const DEFAULT_FILTER: &str = "warn";

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Compact single-line format.
    #[default]
    Compact,
    /// JSON format for machine parsing.
    Json,
}

/// Configuration for logging behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// `EnvFilter` directive, e.g. `info` or `scenario_index=trace`
    pub filter: String,
    pub format: LogFormat,
    pub with_ansi: bool,
}

impl LogConfig {
    /// Resolve the filter from, in order: `-v` count, `RUST_LOG`, the config file.
    ///
    /// - 1 (`-v`): info
    /// - 2 (`-vv`): debug
    /// - 3+ (`-vvv`): trace
    pub fn resolve(
        verbosity: u8,
        env_filter: Option<String>,
        configured: Option<&str>,
        format: LogFormat,
    ) -> Self {
        let filter = match verbosity {
            0 => env_filter
                .filter(|f| !f.trim().is_empty())
                .or_else(|| configured.map(str::to_string))
                .unwrap_or_else(|| DEFAULT_FILTER.to_string()),
            1 => "info".to_string(),
            2 => "debug".to_string(),
            _ => "trace".to_string(),
        };
        Self {
            filter,
            format,
            with_ansi: format == LogFormat::Compact,
        }
    }
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(config: &LogConfig) -> Result<()> {
    let filter = EnvFilter::try_new(&config.filter)
        .with_context(|| format!("Invalid log filter '{}'", config.filter))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    match config.format {
        LogFormat::Compact => builder.compact().with_ansi(config.with_ansi).try_init(),
        LogFormat::Json => builder.json().with_ansi(false).try_init(),
    }
    .map_err(|e| anyhow!("Failed to install log subscriber: {}", e))
}
