//! Resolves the monitor rectangles the boundary corrector works with.
//!
//! The layout is decided once at startup and never changes afterwards (no
//! hot-plug handling).  An explicit list from the config file wins; otherwise
//! the platform is asked.  If neither yields a monitor the server still runs
//! with an empty layout, in which case relative moves are passed through
//! uncorrected.

use thiserror::Error;
use touchpad_core::{MonitorLayout, ScreenRect};
use tracing::{info, warn};

/// Error type for monitor enumeration.
#[derive(Debug, Error)]
pub enum MonitorEnumerationError {
    /// The platform API call to enumerate monitors failed.
    #[error("platform API error while enumerating monitors: {0}")]
    Platform(String),
    /// No enumeration back-end exists for this OS.
    #[error("monitor enumeration is not supported on {0}")]
    Unsupported(&'static str),
}

/// Trait for enumerating monitors on the current platform.
pub trait MonitorEnumerator: Send + Sync {
    /// Returns one rectangle per connected monitor in virtual desktop
    /// coordinates.  Order carries no meaning.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorEnumerationError`] if the OS query fails.
    fn enumerate_monitors(&self) -> Result<Vec<ScreenRect>, MonitorEnumerationError>;
}

/// Where the resolved layout came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutSource {
    Configured,
    Enumerated,
    /// Enumeration failed or found nothing; the layout is empty.
    Unavailable,
}

/// Builds the [`MonitorLayout`] for this run.
///
/// Never fails: an enumeration error degrades to an empty layout with a
/// warning.
pub fn resolve_layout(
    configured: &[ScreenRect],
    enumerator: &dyn MonitorEnumerator,
) -> (MonitorLayout, LayoutSource) {
    if !configured.is_empty() {
        let layout = MonitorLayout::new(configured.to_vec());
        info!(
            "using {} monitor(s) from config, bounds {:?}",
            layout.monitors().len(),
            layout.bounds()
        );
        return (layout, LayoutSource::Configured);
    }

    match enumerator.enumerate_monitors() {
        Ok(monitors) if !monitors.is_empty() => {
            let layout = MonitorLayout::new(monitors);
            for (i, m) in layout.monitors().iter().enumerate() {
                info!("monitor {i}: {}x{} at ({}, {})", m.width, m.height, m.x, m.y);
            }
            info!("desktop bounds {:?}", layout.bounds());
            (layout, LayoutSource::Enumerated)
        }
        Ok(_) => {
            warn!("no monitors reported; cursor moves will not be corrected");
            (MonitorLayout::default(), LayoutSource::Unavailable)
        }
        Err(e) => {
            warn!("{e}; cursor moves will not be corrected");
            (MonitorLayout::default(), LayoutSource::Unavailable)
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
