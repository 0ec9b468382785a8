//! TOML-based configuration for the server.
//!
//! Reads `ServerConfig` from the platform-appropriate config file:
//! - Windows:  `%APPDATA%\TouchPadServer\config.toml`
//! - Linux:    `$XDG_CONFIG_HOME/touchpad-server/config.toml`
//!   (falling back to `~/.config/touchpad-server/config.toml`)
//! - macOS:    `~/Library/Application Support/TouchPadServer/config.toml`
//!
//! Any key may be left out; missing keys take the built-in values, so an
//! absent or empty file runs the server with defaults.  Example:
//!
//! ```toml
//! [server]
//! log_level = "debug"
//!
//! [network]
//! port = 42069
//! bind_address = "0.0.0.0"
//!
//! [cursor]
//! gap_scan_limit = 600
//!
//! [firewall]
//! manage_rule = true
//! rule_name = "Touch Pad Server"
//!
//! # Replaces monitor enumeration when present.
//! [[layout.monitors]]
//! x = 0
//! y = 0
//! width = 1920
//! height = 1080
//! ```

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use touchpad_core::{ScreenRect, DEFAULT_GAP_SCAN_LIMIT};

use crate::infrastructure::network::{DEFAULT_MAX_DATAGRAM_SIZE, DEFAULT_PORT};

/// Why the configuration could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Neither the OS config directory nor `HOME` is known.
    #[error("no config directory for this user")]
    NoPlatformConfigDir,

    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    Parse(#[from] toml::de::Error),

    /// `bind_address` is not an IP address.
    #[error("invalid bind address {0:?}")]
    InvalidBindAddress(String),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level server configuration, one field per TOML table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub server: GeneralConfig,
    pub network: NetworkConfig,
    pub cursor: CursorConfig,
    pub firewall: FirewallConfig,
    pub layout: LayoutConfig,
}

/// `[server]`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneralConfig {
    /// `tracing` filter used when `RUST_LOG` is unset: a level such as
    /// `"debug"` or a full directive string.
    pub log_level: String,
}

/// `[network]`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NetworkConfig {
    /// UDP port for command datagrams.
    pub port: u16,
    /// IP address to bind to.  `"0.0.0.0"` binds all interfaces.
    pub bind_address: String,
    /// Receive buffer size in bytes.
    pub max_datagram_size: usize,
}

/// `[cursor]`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CursorConfig {
    /// Maximum gap width, in pixels, scanned before clamping.
    pub gap_scan_limit: u32,
}

/// `[firewall]`, honoured on Windows only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FirewallConfig {
    /// Whether the server checks for and adds the inbound rule at startup.
    pub manage_rule: bool,
    /// Display name of the rule.
    pub rule_name: String,
}

/// `[layout]`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LayoutConfig {
    /// When non-empty, used instead of asking the OS for monitors.
    pub monitors: Vec<ScreenRect>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind_address: Ipv4Addr::UNSPECIFIED.to_string(),
            max_datagram_size: DEFAULT_MAX_DATAGRAM_SIZE,
        }
    }
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            gap_scan_limit: DEFAULT_GAP_SCAN_LIMIT,
        }
    }
}

impl Default for FirewallConfig {
    fn default() -> Self {
        Self {
            manage_rule: true,
            rule_name: "Touch Pad Server".to_string(),
        }
    }
}

impl NetworkConfig {
    /// Combines `bind_address` and `port` into a socket address.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBindAddress`] if `bind_address` is not
    /// an IPv4 or IPv6 address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self
            .bind_address
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddress(self.bind_address.clone()))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

// ── Config loading ────────────────────────────────────────────────────────────

/// Where [`load_config`] looks: `config.toml` in the per-user directory.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if the directory's
/// environment variable is unset.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    platform_config_dir()
        .map(|dir| dir.join("config.toml"))
        .ok_or(ConfigError::NoPlatformConfigDir)
}

/// Loads the config from [`config_file_path`].
///
/// # Errors
///
/// As for [`load_config_from`], plus [`ConfigError::NoPlatformConfigDir`].
pub fn load_config() -> Result<ServerConfig, ConfigError> {
    load_config_from(&config_file_path()?)
}

/// Loads the config from `path`; a file that does not exist yields defaults.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] if the file exists but cannot be read and
/// [`ConfigError::Parse`] if it is not valid TOML for this schema.
pub fn load_config_from(path: &Path) -> Result<ServerConfig, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(ServerConfig::default()),
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    Ok(toml::from_str(&content)?)
}

#[cfg(target_os = "windows")]
fn platform_config_dir() -> Option<PathBuf> {
    let appdata = PathBuf::from(std::env::var_os("APPDATA")?);
    Some(appdata.join("TouchPadServer"))
}

#[cfg(target_os = "macos")]
fn platform_config_dir() -> Option<PathBuf> {
    let home = PathBuf::from(std::env::var_os("HOME")?);
    Some(home.join("Library/Application Support/TouchPadServer"))
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn platform_config_dir() -> Option<PathBuf> {
    let base = match std::env::var_os("XDG_CONFIG_HOME") {
        Some(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
        _ => PathBuf::from(std::env::var_os("HOME")?).join(".config"),
    };
    Some(base.join("touchpad-server"))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
