//! Touch Pad Server entry point.
//!
//! Receives touchpad commands from a phone over UDP and replays them as local
//! mouse and keyboard input, steering the cursor across gaps between
//! monitors that do not touch on the virtual desktop.
//!
//! # Usage
//!
//! ```text
//! touchpad-server [OPTIONS]
//!
//! Options:
//!   --config <PATH>           Config file [default: platform config dir]
//!   --port <PORT>             UDP listening port [default: 42069]
//!   --bind <ADDR>             IP address to bind [default: 0.0.0.0]
//!   --log-level <FILTER>      Log filter when RUST_LOG is unset [default: info]
//!   --gap-scan-limit <PX>     Widest gap crossed before clamping [default: 600]
//!   --no-firewall             Skip the Windows firewall rule check
//! ```
//!
//! Each option can also be set with a `TOUCHPAD_*` environment variable.
//! Command-line values override the config file, which overrides defaults.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ load_config()               -- TOML config (defaults on first run)
//!  └─ ensure_inbound_rule()       -- Windows firewall, non-fatal
//!  └─ resolve_layout()            -- configured or enumerated monitors
//!  └─ start_command_listener()    -- UDP receive thread
//!  └─ command loop
//!       parse() -> CommandDispatcher::dispatch() -> InputInjector
//! ```

use std::path::PathBuf;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use anyhow::Context;
use clap::Parser;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use touchpad_core::{parse, BoundaryCorrector};
use touchpad_server::application::{dispatch_command::CommandDispatcher, resolve_layout};
use touchpad_server::infrastructure::{
    firewall::{ensure_inbound_rule, RuleStatus},
    input_injection::native_injector,
    network::{bind_command_socket, start_command_listener},
    screen_info::NativeMonitorEnumerator,
    storage::config::{load_config, load_config_from, ConfigError, ServerConfig},
};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Touch Pad Server.
///
/// Options left unset fall back to the config file, then to built-in defaults.
#[derive(Debug, Parser)]
#[command(
    name = "touchpad-server",
    about = "Turns a phone into a touchpad for this computer",
    version
)]
struct Cli {
    /// Path to the TOML config file.
    #[arg(long, env = "TOUCHPAD_CONFIG")]
    config: Option<PathBuf>,

    /// UDP port to listen on.
    #[arg(long, env = "TOUCHPAD_PORT")]
    port: Option<u16>,

    /// IP address to bind the command socket to.
    ///
    /// Use `0.0.0.0` to accept commands on every interface.
    #[arg(long, env = "TOUCHPAD_BIND")]
    bind: Option<String>,

    /// `tracing` filter used when `RUST_LOG` is not set.
    #[arg(long, env = "TOUCHPAD_LOG_LEVEL")]
    log_level: Option<String>,

    /// Widest gap between monitors, in pixels, that a drag may cross.
    #[arg(long, env = "TOUCHPAD_GAP_SCAN_LIMIT")]
    gap_scan_limit: Option<u32>,

    /// Do not check or add the Windows firewall rule.
    #[arg(long, env = "TOUCHPAD_NO_FIREWALL")]
    no_firewall: bool,
}

impl Cli {
    /// Loads the config file named by `--config`, or the default one.
    ///
    /// A missing platform config directory is treated like a missing file.
    fn load_config(&self) -> anyhow::Result<ServerConfig> {
        match &self.config {
            Some(path) => load_config_from(path)
                .with_context(|| format!("failed to load config from {}", path.display())),
            None => match load_config() {
                Err(ConfigError::NoPlatformConfigDir) => Ok(ServerConfig::default()),
                other => other.context("failed to load config"),
            },
        }
    }

    /// Overlays the options given on the command line onto `config`.
    fn apply_to(&self, config: &mut ServerConfig) {
        if let Some(port) = self.port {
            config.network.port = port;
        }
        if let Some(bind) = &self.bind {
            config.network.bind_address = bind.clone();
        }
        if let Some(level) = &self.log_level {
            config.server.log_level = level.clone();
        }
        if let Some(limit) = self.gap_scan_limit {
            config.cursor.gap_scan_limit = limit;
        }
        if self.no_firewall {
            config.firewall.manage_rule = false;
        }
    }
}

/// `RUST_LOG` wins; otherwise the configured level; otherwise `info`.
fn log_filter(configured: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(configured))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = cli.load_config()?;
    cli.apply_to(&mut config);

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(&config.server.log_level))
        .init();

    info!("Touch Pad Server {} starting", env!("CARGO_PKG_VERSION"));

    let bind_addr = config
        .network
        .socket_addr()
        .context("invalid [network] settings")?;

    // ── Firewall ──────────────────────────────────────────────────────────────
    if config.firewall.manage_rule {
        match ensure_inbound_rule(&config.firewall.rule_name, bind_addr.port()) {
            Ok(RuleStatus::Added) => info!("inbound firewall rule added"),
            Ok(_) => {}
            Err(e) => warn!("firewall rule not provisioned, commands may be blocked: {e}"),
        }
    }

    // ── Monitor layout ────────────────────────────────────────────────────────
    let enumerator = NativeMonitorEnumerator::new();
    let (layout, source) = resolve_layout::resolve_layout(&config.layout.monitors, &enumerator);
    info!(
        "using {} monitor(s) from {source:?} source; virtual desktop {:?}",
        layout.monitors().len(),
        layout.bounds()
    );

    let corrector = BoundaryCorrector::with_scan_limit(Arc::new(layout), config.cursor.gap_scan_limit);
    let injector = native_injector().context("failed to initialise input injection")?;
    let dispatcher = CommandDispatcher::new(injector, corrector);

    // ── Transport ─────────────────────────────────────────────────────────────
    let socket = bind_command_socket(bind_addr)
        .with_context(|| format!("cannot listen on UDP {bind_addr}"))?;

    let running = Arc::new(AtomicBool::new(true));
    let mut commands = start_command_listener(
        socket,
        config.network.max_datagram_size,
        Arc::clone(&running),
    )?;

    // ── Ctrl-C handler ────────────────────────────────────────────────────────
    let running_clone = Arc::clone(&running);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("shutdown signal received");
                running_clone.store(false, Ordering::Relaxed);
            }
            Err(e) => error!("failed to listen for Ctrl+C signal: {e}"),
        }
    });

    // ── Command loop ──────────────────────────────────────────────────────────
    info!("ready; waiting for the phone on UDP {bind_addr}");

    // The channel closes once the receive thread sees `running` cleared.
    while let Some(datagram) = commands.recv().await {
        let command = parse(&datagram.text);
        debug!("{} -> {command}", datagram.source);

        match dispatcher.dispatch(&command) {
            Ok(Some(landed)) => debug!("cursor now at {landed}"),
            Ok(None) => {}
            Err(e) => error!("failed to execute {command}: {e}"),
        }
    }

    info!("Touch Pad Server stopped");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
