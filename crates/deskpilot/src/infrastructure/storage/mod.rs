//! Storage infrastructure: configuration file persistence.
//!
//! The `config` sub-module reads the TOML settings file from the
//! platform-appropriate directory (or an explicit path), fills anything
//! missing with defaults, and can write the result back.

pub mod config;
