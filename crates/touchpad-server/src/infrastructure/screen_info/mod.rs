//! Platform-specific monitor enumeration.
//!
//! Detects the connected monitors and their placement on the virtual desktop
//! so the boundary corrector knows where the gaps are.
//!
//! # Platform implementations
//!
//! Each platform implements [`MonitorEnumerator`]; the correct one is
//! selected at compile time via `#[cfg(target_os = ...)]` and re-exported as
//! `NativeMonitorEnumerator`:
//!
//! | Module    | OS      | API used                                  |
//! |-----------|---------|-------------------------------------------|
//! | `windows` | Windows | `EnumDisplayMonitors` + `GetMonitorInfoW` |
//! | `linux`   | Linux   | RandR `XRRGetMonitors`                    |
//!
//! A [`MockMonitorEnumerator`] is always compiled (not guarded by `#[cfg]`) so
//! tests on any platform can use it without a physical display.

use touchpad_core::ScreenRect;

pub use crate::application::resolve_layout::{MonitorEnumerationError, MonitorEnumerator};

// ── Windows implementation ────────────────────────────────────────────────────

#[cfg(target_os = "windows")]
pub mod windows;

#[cfg(target_os = "windows")]
pub use self::windows::WindowsMonitorEnumerator as NativeMonitorEnumerator;

// ── Linux implementation ──────────────────────────────────────────────────────

#[cfg(target_os = "linux")]
pub mod linux;

#[cfg(target_os = "linux")]
pub use self::linux::XRandrMonitorEnumerator as NativeMonitorEnumerator;

// ── Fallback ──────────────────────────────────────────────────────────────────

/// Enumerator for platforms without a native back-end; always fails.
#[cfg(not(any(target_os = "windows", target_os = "linux")))]
#[derive(Debug, Default)]
pub struct NativeMonitorEnumerator;

#[cfg(not(any(target_os = "windows", target_os = "linux")))]
impl NativeMonitorEnumerator {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(not(any(target_os = "windows", target_os = "linux")))]
impl MonitorEnumerator for NativeMonitorEnumerator {
    fn enumerate_monitors(&self) -> Result<Vec<ScreenRect>, MonitorEnumerationError> {
        Err(MonitorEnumerationError::Unsupported(std::env::consts::OS))
    }
}

// ── Mock implementation (always compiled for tests) ───────────────────────────

/// A mock enumerator that returns a fixed list of monitors.
///
/// # Example
///
/// ```ignore
/// let enumerator = MockMonitorEnumerator::gapped_pair();
/// let (layout, _) = resolve_layout(&[], &enumerator);
/// assert_eq!(layout.monitors().len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockMonitorEnumerator {
    /// The fixed list of monitors that this enumerator will always return.
    pub monitors: Vec<ScreenRect>,
}

impl MockMonitorEnumerator {
    /// A single 1920×1080 monitor at the origin.
    pub fn single_1080p() -> Self {
        Self {
            monitors: vec![ScreenRect::new(0, 0, 1920, 1080)],
        }
    }

    /// Two 1920×1080 monitors with a 580 px dead zone between them
    /// (x = 1920 to x = 2500).
    pub fn gapped_pair() -> Self {
        Self {
            monitors: vec![
                ScreenRect::new(0, 0, 1920, 1080),
                ScreenRect::new(2500, 0, 1920, 1080),
            ],
        }
    }
}

impl MonitorEnumerator for MockMonitorEnumerator {
    /// Returns the monitors provided at construction time (never fails).
    fn enumerate_monitors(&self) -> Result<Vec<ScreenRect>, MonitorEnumerationError> {
        Ok(self.monitors.clone())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use touchpad_core::{MonitorLayout, Point, PointClass};

    #[test]
    fn test_mock_enumerator_single_1080p_returns_one_monitor() {
        // Arrange
        let enumerator = MockMonitorEnumerator::single_1080p();

        // Act
        let monitors = enumerator.enumerate_monitors().expect("enumerate");

        // Assert
        assert_eq!(monitors, vec![ScreenRect::new(0, 0, 1920, 1080)]);
    }

    #[test]
    fn test_mock_enumerator_gapped_pair_has_dead_zone() {
        // Arrange
        let enumerator = MockMonitorEnumerator::gapped_pair();

        // Act
        let layout = MonitorLayout::new(enumerator.enumerate_monitors().expect("enumerate"));

        // Assert
        assert_eq!(layout.classify(Point::new(2200, 500)), PointClass::InGap);
        assert_eq!(layout.bounds(), ScreenRect::new(0, 0, 4420, 1080));
    }

    #[test]
    fn test_native_enumerator_does_not_panic() {
        // The result depends on the machine; only the absence of a panic is
        // asserted here.
        let _ = NativeMonitorEnumerator::new().enumerate_monitors();
    }
}
