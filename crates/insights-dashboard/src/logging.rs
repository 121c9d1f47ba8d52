#![forbid(unsafe_code)]

//! File-backed tracing for the dashboard.
//!
//! The terminal belongs to the UI, so tracing output only goes to a log file
//! when one is configured.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the tracing filter directive.
pub const LOG_FILTER_ENV: &str = "RETAIL_INSIGHTS_LOG";

const DEFAULT_FILTER: &str = "info";

/// Build a filter from a directive, falling back to `info` when the
/// directive is missing or invalid.
pub fn filter_from(directive: Option<String>) -> EnvFilter {
    directive
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Install a global subscriber appending to `path`.
///
/// Fails if the file cannot be opened or a global subscriber is already set.
pub fn init(path: &Path) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter_from(std::env::var(LOG_FILTER_ENV).ok()))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(io::Error::other)
}
