//! Linux monitor enumeration via the X11 RandR extension.
//!
//! On a typical multi-monitor X11 desktop every monitor is a CRTC region of
//! one large X screen.  Plain Xlib only reports the screen size, which would
//! hide the gaps entirely, so `XRRGetMonitors` is used to list the active
//! monitors with their root-window offsets.
//!
//! If RandR reports nothing (very old servers, some nested X servers) the
//! whole default screen is reported as a single monitor.

use touchpad_core::ScreenRect;
use x11::{xlib, xrandr};

use super::{MonitorEnumerationError, MonitorEnumerator};

/// Linux X11 implementation of [`MonitorEnumerator`].
pub struct XRandrMonitorEnumerator;

impl XRandrMonitorEnumerator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for XRandrMonitorEnumerator {
    fn default() -> Self {
        Self::new()
    }
}

impl MonitorEnumerator for XRandrMonitorEnumerator {
    fn enumerate_monitors(&self) -> Result<Vec<ScreenRect>, MonitorEnumerationError> {
        // SAFETY: a null name makes Xlib read the DISPLAY environment variable.
        let display = unsafe { xlib::XOpenDisplay(std::ptr::null()) };
        if display.is_null() {
            let display_env = std::env::var("DISPLAY").unwrap_or_else(|_| "<unset>".to_string());
            return Err(MonitorEnumerationError::Platform(format!(
                "XOpenDisplay failed; DISPLAY={display_env}"
            )));
        }

        // SAFETY: `display` is a valid connection until XCloseDisplay below.
        let mut monitors = unsafe { randr_monitors(display) };
        if monitors.is_empty() {
            // SAFETY: as above.
            monitors = unsafe { default_screen(display) };
        }

        // SAFETY: `display` was opened above and is not used after this.
        unsafe { xlib::XCloseDisplay(display) };

        if monitors.is_empty() {
            return Err(MonitorEnumerationError::Platform(
                "X11 reported zero monitors".to_string(),
            ));
        }
        Ok(monitors)
    }
}

/// Lists active RandR monitors.
///
/// # Safety
///
/// `display` must be a valid, open connection.
unsafe fn randr_monitors(display: *mut xlib::Display) -> Vec<ScreenRect> {
    let root = xlib::XDefaultRootWindow(display);
    let mut count = 0;
    let infos = xrandr::XRRGetMonitors(display, root, xlib::True, &mut count);
    if infos.is_null() {
        return Vec::new();
    }

    let slice = std::slice::from_raw_parts(infos, count.max(0) as usize);
    let monitors = slice
        .iter()
        .map(|m| ScreenRect::new(m.x, m.y, m.width.max(0) as u32, m.height.max(0) as u32))
        .collect();

    xrandr::XRRFreeMonitors(infos);
    monitors
}

/// Reports the whole default screen as one monitor.
///
/// # Safety
///
/// `display` must be a valid, open connection.
unsafe fn default_screen(display: *mut xlib::Display) -> Vec<ScreenRect> {
    let screen = xlib::XDefaultScreen(display);
    let width = xlib::XDisplayWidth(display, screen).max(0) as u32;
    let height = xlib::XDisplayHeight(display, screen).max(0) as u32;
    vec![ScreenRect::new(0, 0, width, height)]
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    /// Smoke-test: if a DISPLAY is available this must succeed and return at
    /// least one monitor.  If DISPLAY is unset the error is expected.
    #[test]
    fn test_xrandr_monitor_enumerator_smoke() {
        let result = XRandrMonitorEnumerator::new().enumerate_monitors();

        if std::env::var("DISPLAY").is_err() {
            assert!(result.is_err(), "enumerate must fail when DISPLAY is not set");
        } else if let Ok(monitors) = result {
            assert!(!monitors.is_empty(), "must return at least one monitor");
        }
    }
}
