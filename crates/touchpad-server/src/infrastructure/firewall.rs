//! Inbound firewall rule provisioning.
//!
//! On Windows the phone's datagrams are silently dropped unless an inbound
//! rule allows UDP on the listening port.  At startup the server asks
//! `netsh advfirewall` whether a rule with the configured name exists and adds
//! one if not.  Adding a rule needs Administrator rights; failure is reported
//! to the caller, which logs it and carries on.
//!
//! On other platforms [`ensure_inbound_rule`] does nothing.

use std::process::{Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use thiserror::Error;

/// How long a single `netsh` invocation may take before it is killed.
pub const NETSH_TIMEOUT: Duration = Duration::from_secs(5);

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Error type for firewall rule provisioning.
#[derive(Debug, Error)]
pub enum FirewallError {
    /// `netsh` could not be started or waited on.
    #[error("failed to run netsh: {0}")]
    Spawn(#[source] std::io::Error),

    /// `netsh` did not finish in time and was killed.
    #[error("netsh did not finish within {0:?}")]
    TimedOut(Duration),

    /// `netsh` ran but refused to add the rule.
    #[error("netsh could not add rule {name:?} (exit status {status}); re-run as Administrator")]
    AddRejected { name: String, status: String },
}

/// Outcome of [`ensure_inbound_rule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleStatus {
    /// A rule with the configured name was already present.
    AlreadyPresent,
    /// The rule was missing and has been added.
    Added,
    /// Nothing to do on this platform.
    NotApplicable,
}

/// Arguments for `netsh` that query a rule by name.
pub fn show_rule_args(name: &str) -> Vec<String> {
    vec![
        "advfirewall".to_string(),
        "firewall".to_string(),
        "show".to_string(),
        "rule".to_string(),
        format!("name={name}"),
    ]
}

/// Arguments for `netsh` that add an inbound UDP allow rule for `port`.
pub fn add_rule_args(name: &str, port: u16) -> Vec<String> {
    vec![
        "advfirewall".to_string(),
        "firewall".to_string(),
        "add".to_string(),
        "rule".to_string(),
        format!("name={name}"),
        "dir=in".to_string(),
        "action=allow".to_string(),
        "protocol=UDP".to_string(),
        format!("localport={port}"),
    ]
}

/// Makes sure an inbound rule named `name` allows UDP on `port`.
///
/// # Errors
///
/// Returns [`FirewallError::Spawn`] if `netsh` cannot be run,
/// [`FirewallError::TimedOut`] if it hangs past [`NETSH_TIMEOUT`], and
/// [`FirewallError::AddRejected`] if adding the rule fails (usually missing
/// Administrator rights).
#[cfg(target_os = "windows")]
pub fn ensure_inbound_rule(name: &str, port: u16) -> Result<RuleStatus, FirewallError> {
    use tracing::{debug, info};

    debug!("checking firewall rule {name:?}");
    let shown = run_netsh(&show_rule_args(name))?;
    if shown.success() {
        info!("firewall rule {name:?} already exists");
        return Ok(RuleStatus::AlreadyPresent);
    }

    info!("firewall rule {name:?} not found; adding inbound UDP rule for port {port}");
    let added = run_netsh(&add_rule_args(name, port))?;
    if !added.success() {
        return Err(FirewallError::AddRejected {
            name: name.to_string(),
            status: added.to_string(),
        });
    }
    info!("firewall rule {name:?} added");
    Ok(RuleStatus::Added)
}

/// No firewall provisioning outside Windows.
#[cfg(not(target_os = "windows"))]
pub fn ensure_inbound_rule(name: &str, port: u16) -> Result<RuleStatus, FirewallError> {
    tracing::debug!("firewall rule {name:?} for port {port} not managed on this platform");
    Ok(RuleStatus::NotApplicable)
}

#[cfg(target_os = "windows")]
fn run_netsh(args: &[String]) -> Result<ExitStatus, FirewallError> {
    run_with_timeout(Command::new("netsh").args(args), NETSH_TIMEOUT)
}

/// Runs `command` with its output discarded, killing it after `timeout`.
///
/// # Errors
///
/// Returns [`FirewallError::Spawn`] if the process cannot be started or
/// polled, and [`FirewallError::TimedOut`] if it was still running at the
/// deadline.
pub fn run_with_timeout(
    command: &mut Command,
    timeout: Duration,
) -> Result<ExitStatus, FirewallError> {
    let mut child = command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(FirewallError::Spawn)?;

    let deadline = Instant::now() + timeout;
    loop {
        if let Some(status) = child.try_wait().map_err(FirewallError::Spawn)? {
            return Ok(status);
        }
        if Instant::now() >= deadline {
            // The child may have exited since the poll; kill errors are ignored.
            let _ = child.kill();
            let _ = child.wait();
            return Err(FirewallError::TimedOut(timeout));
        }
        std::thread::sleep(POLL_INTERVAL);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
