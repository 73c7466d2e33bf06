//! TOML-based configuration for deskpilot.
//!
//! Default location:
//! - Windows:  `%APPDATA%\deskpilot\config.toml`
//! - Linux:    `$XDG_CONFIG_HOME/deskpilot/config.toml` (or `~/.config/...`)
//! - macOS:    `~/Library/Application Support/deskpilot/config.toml`
//!
//! ```toml
//! [logging]
//! level = "debug"
//! json = false
//!
//! [pointer]
//! drag_steps = 20
//! drag_duration_ms = 500
//! scroll_amount = 3
//!
//! [keyboard]
//! type_interval_ms = 10
//!
//! [capture]
//! default_format = "png"
//! ```
//!
//! # Serde default values
//!
//! Every field carries `#[serde(default = ...)]`, so a file that sets only
//! one key still parses and a missing file behaves like an empty one.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::capture::ImageFormat;
use crate::application::pointer::{DragOptions, DEFAULT_SCROLL_AMOUNT};

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    #[error("I/O error accessing config at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub pointer: PointerConfig,
    #[serde(default)]
    pub keyboard: KeyboardConfig,
    #[serde(default)]
    pub capture: CaptureConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// `tracing` filter directive: `"error"`, `"info"`, `"deskpilot=debug"`, ...
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Emit one JSON object per event instead of human-readable lines.
    #[serde(default)]
    pub json: bool,
}

/// Defaults for drags and scrolling.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PointerConfig {
    #[serde(default = "default_drag_steps")]
    pub drag_steps: u32,
    /// `0` jumps straight to the drag target.
    #[serde(default)]
    pub drag_duration_ms: u64,
    /// Wheel clicks for `scroll_up` / `scroll_down` without an amount.
    #[serde(default = "default_scroll_amount")]
    pub scroll_amount: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct KeyboardConfig {
    /// Pause between typed characters.
    #[serde(default)]
    pub type_interval_ms: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CaptureConfig {
    /// Used when a screenshot path has no recognised extension.
    #[serde(default)]
    pub default_format: ImageFormat,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_log_level() -> String {
    "info".to_string()
}
fn default_drag_steps() -> u32 {
    DragOptions::default().steps
}
fn default_scroll_amount() -> i32 {
    DEFAULT_SCROLL_AMOUNT
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            drag_steps: default_drag_steps(),
            drag_duration_ms: 0,
            scroll_amount: default_scroll_amount(),
        }
    }
}

impl PointerConfig {
    /// Drag options with this config's pacing and the default button.
    pub fn drag_options(&self) -> DragOptions {
        DragOptions::default()
            .with_steps(self.drag_steps)
            .with_duration(Duration::from_millis(self.drag_duration_ms))
    }
}

impl KeyboardConfig {
    pub fn type_interval(&self) -> Duration {
        Duration::from_millis(self.type_interval_ms)
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Resolves the default path of the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when the platform config base
/// directory cannot be determined from the environment.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    platform_config_dir()
        .map(|dir| dir.join("config.toml"))
        .ok_or(ConfigError::NoPlatformConfigDir)
}

/// Loads `AppConfig` from `path`, returning `AppConfig::default()` if the
/// file does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(source) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Writes `config` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system failures or
/// [`ConfigError::Serialize`] if serialization fails.
pub fn save_config(config: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("deskpilot"))
    }

    #[cfg(target_os = "linux")]
    {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("deskpilot"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| PathBuf::from(h).join("Library").join("Application Support").join("deskpilot"))
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
