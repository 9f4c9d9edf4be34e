//! Tracing initialization shared by binaries and tests
//!
//! Libraries in this workspace only emit `tracing` events. Installing a
//! subscriber is the job of whoever owns `main` (or a test that wants output).

use std::str::FromStr;

use tracing_subscriber::{fmt, EnvFilter};

/// Minimum level for the default filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            other => Err(format!("unknown log level: {}", other)),
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Logging configuration options
#[derive(Debug, Clone)]
pub struct LogOptions {
    /// Used when `RUST_LOG` is unset
    pub level: LogLevel,
    /// Include module targets in each line
    pub with_target: bool,
    /// Write to stderr instead of stdout
    pub stderr: bool,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            with_target: false,
            stderr: true,
        }
    }
}

impl LogOptions {
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }
}

/// Install the global fmt subscriber.
///
/// Returns `false` when a subscriber was already installed; the call is then
/// a no-op.
pub fn init_logging(options: LogOptions) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(options.level.as_str()));

    let builder = fmt().with_env_filter(filter).with_target(options.with_target);

    let installed = if options.stderr {
        builder.with_writer(std::io::stderr).try_init()
    } else {
        builder.try_init()
    };
    installed.is_ok()
}

/// Format an error with its cause chain on one line
pub fn format_error(error: &dyn std::error::Error) -> String {
    const MAX_DEPTH: usize = 10;

    let mut out = error.to_string();
    let mut source = error.source();
    let mut depth = 0;
    while let Some(cause) = source {
        if depth >= MAX_DEPTH {
            break;
        }
        out.push_str(" Caused by: ");
        out.push_str(&cause.to_string());
        source = cause.source();
        depth += 1;
    }
    out
}
