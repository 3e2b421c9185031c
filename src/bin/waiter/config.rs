//! Waiter configuration

use std::{path::PathBuf, time::Duration};

use clap::{Parser, ValueEnum};

/// Output format for log lines written to stderr.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable single-line logs
    #[default]
    Compact,

    /// One JSON object per line
    Json,
}

/// Waiter configuration
#[derive(Debug, Parser)]
#[command(
    name = "waiter",
    about = "Look at a menu and price and suggest options",
    long_about = None
)]
pub struct WaiterArgs {
    /// Input file including the target price and menu (`.yml`/`.yaml` for fixtures)
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    pub file: PathBuf,

    /// ISO currency code for text menus
    #[arg(short, long, env = "WAITER_CURRENCY", default_value = "USD")]
    pub currency: String,

    /// Stop searching after this many milliseconds
    #[arg(short, long = "timeout-ms", env = "WAITER_TIMEOUT_MS")]
    pub timeout_ms: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log format
    #[arg(long, value_enum, env = "WAITER_LOG_FORMAT", default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

impl WaiterArgs {
    /// Search timeout, if one was configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}
