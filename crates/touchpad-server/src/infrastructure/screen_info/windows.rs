//! Windows monitor enumeration via `EnumDisplayMonitors` / `GetMonitorInfoW`.
//!
//! `rcMonitor` is already in virtual desktop coordinates, the same space
//! `SetCursorPos` uses, so no translation is needed.

use touchpad_core::ScreenRect;
use windows::{
    Win32::Foundation::{BOOL, LPARAM, RECT},
    Win32::Graphics::Gdi::{EnumDisplayMonitors, GetMonitorInfoW, HDC, HMONITOR, MONITORINFO},
};

use super::{MonitorEnumerationError, MonitorEnumerator};

/// Windows implementation of [`MonitorEnumerator`] using Win32 APIs.
pub struct WindowsMonitorEnumerator;

impl WindowsMonitorEnumerator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WindowsMonitorEnumerator {
    fn default() -> Self {
        Self::new()
    }
}

impl MonitorEnumerator for WindowsMonitorEnumerator {
    fn enumerate_monitors(&self) -> Result<Vec<ScreenRect>, MonitorEnumerationError> {
        let mut monitors: Vec<ScreenRect> = Vec::new();

        // SAFETY: `lpfnenum` is a valid function pointer with the correct signature.
        // `dwdata` is a raw pointer to `monitors` which outlives this call.
        // The callback is synchronous and called only within `EnumDisplayMonitors`.
        // `HDC::default()` (null) means enumerate all monitors on the virtual desktop.
        let ok = unsafe {
            EnumDisplayMonitors(
                HDC::default(),
                None,
                Some(monitor_enum_proc),
                LPARAM(&mut monitors as *mut Vec<ScreenRect> as isize),
            )
        };

        if !ok.as_bool() {
            return Err(MonitorEnumerationError::Platform(format!(
                "EnumDisplayMonitors failed: {}",
                windows::core::Error::from_win32()
            )));
        }

        Ok(monitors)
    }
}

/// Win32 monitor enumeration callback.
///
/// # Safety
///
/// Called by Win32 inside `EnumDisplayMonitors`. `lparam` must be a valid
/// pointer to `Vec<ScreenRect>` for the duration of the enumeration call.
unsafe extern "system" fn monitor_enum_proc(
    hmonitor: HMONITOR,
    _hdc: HDC,
    _lprc_clip: *mut RECT,
    lparam: LPARAM,
) -> BOOL {
    let monitors = &mut *(lparam.0 as *mut Vec<ScreenRect>);

    let mut info = MONITORINFO {
        cbSize: std::mem::size_of::<MONITORINFO>() as u32,
        ..Default::default()
    };

    // SAFETY: `hmonitor` is a valid handle provided by Win32.
    if GetMonitorInfoW(hmonitor, &mut info).as_bool() {
        monitors.push(rect_to_screen(&info.rcMonitor));
    }

    BOOL(1) // continue enumeration
}

fn rect_to_screen(rc: &RECT) -> ScreenRect {
    ScreenRect::new(
        rc.left,
        rc.top,
        rc.right.saturating_sub(rc.left).max(0) as u32,
        rc.bottom.saturating_sub(rc.top).max(0) as u32,
    )
}

// ── Tests ─────────────────────────────────────────────────────────────────────
