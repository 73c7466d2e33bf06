//! `tracing` subscriber setup for the binary.
//!
//! Level precedence: an explicit override (`--log-level` or
//! `DESKPILOT_LOG`), then `[logging] level` from the config file, then
//! `info`. Output goes to stderr so stdout stays clean for `--json` output
//! and screenshot bytes.

use std::error::Error;

use tracing_subscriber::EnvFilter;

use crate::infrastructure::storage::config::LoggingConfig;

/// The filter directive that wins under the precedence rules.
pub fn effective_level<'a>(override_level: Option<&'a str>, config: &'a LoggingConfig) -> &'a str {
    override_level
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .unwrap_or(config.level.as_str())
}

/// Installs the global subscriber.
///
/// An unparsable directive falls back to `info` instead of failing.
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing(override_level: Option<&str>, config: &LoggingConfig) -> Result<(), Box<dyn Error + Send + Sync>> {
    let level = effective_level(override_level, config);
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
