//! Storage infrastructure: configuration file loading.
//!
//! The `config` sub-module reads the TOML configuration file from the
//! platform-appropriate directory and supplies defaults when it does not exist
//! yet (first run).  Configuration is read once at startup and never written
//! back by the server.

pub mod config;
