//! Linux X11 input injection via the XTest extension.
//!
//! # What is XTest? (for beginners)
//!
//! XTest is an X11 protocol extension that lets a process synthesize keyboard
//! and mouse events as if the user had physically interacted with the hardware.
//! The receiving application cannot distinguish them from physical input.
//!
//! The functions used here are:
//! - `XTestFakeMotionEvent(display, screen, x, y, delay)` – warp the cursor to
//!   absolute root-window coordinates.
//! - `XTestFakeButtonEvent(display, button, is_press, delay)` – press or
//!   release a mouse button.
//! - `XTestFakeKeyEvent(display, keycode, is_press, delay)` – press or release
//!   a key.
//!
//! # Key code translation
//!
//! `XTestFakeKeyEvent` takes a server keycode, not a KeySym:
//! ```text
//! HID Usage ID → X11 KeySym → XKeysymToKeycode(display, keysym) → X11 keycode
//! ```
//!
//! # Mouse wheel via button events
//!
//! X11 has no wheel API.  Each wheel notch is a press+release of button 4
//! (up) or button 5 (down).
//!
//! # Thread safety
//!
//! Xlib connections are not thread-safe.  The display pointer lives behind a
//! `Mutex` and is only used while the lock is held.

use std::os::raw::{c_int, c_uint};
use std::sync::{Mutex, PoisonError};

use touchpad_core::{keymap::KeyMapper, HidKeyCode, Point};
use x11::{xlib, xtest};

use crate::application::dispatch_command::{InjectionError, InputInjector, MouseButton};

// ── X11 constants ─────────────────────────────────────────────────────────────

/// `CurrentTime`: deliver the synthesized event immediately.
const NO_DELAY: std::os::raw::c_ulong = 0;

/// Screen `-1` means "the screen the pointer is currently on".
const SCREEN_DEFAULT: c_int = -1;

const BUTTON_LEFT: c_uint = 1;
const BUTTON_RIGHT: c_uint = 3;
const BUTTON_WHEEL_UP: c_uint = 4;
const BUTTON_WHEEL_DOWN: c_uint = 5;

/// Upper bound on wheel clicks synthesized for a single command.
const MAX_WHEEL_CLICKS: u32 = 100;

struct DisplayHandle(*mut xlib::Display);

// SAFETY: the pointer is only dereferenced by Xlib calls made while the
// owning `Mutex` is locked, so it is never used from two threads at once.
unsafe impl Send for DisplayHandle {}

/// Linux X11/XTest input injector.
pub struct LinuxXTestInjector {
    display: Mutex<DisplayHandle>,
}

impl LinuxXTestInjector {
    /// Connects to the X display named by `DISPLAY` and checks for XTest.
    ///
    /// # Errors
    ///
    /// Returns `InjectionError::Platform` if the display cannot be opened or
    /// the server lacks the XTest extension.
    pub fn new() -> Result<Self, InjectionError> {
        // SAFETY: a null name makes Xlib read the DISPLAY environment variable.
        let display = unsafe { xlib::XOpenDisplay(std::ptr::null()) };
        if display.is_null() {
            let display_env = std::env::var("DISPLAY").unwrap_or_else(|_| "<unset>".to_string());
            return Err(InjectionError::Platform(format!(
                "XOpenDisplay failed; DISPLAY={display_env}"
            )));
        }

        let (mut event_base, mut error_base, mut major, mut minor) = (0, 0, 0, 0);
        // SAFETY: `display` is a valid connection and all out-pointers are live.
        let has_xtest = unsafe {
            xtest::XTestQueryExtension(
                display,
                &mut event_base,
                &mut error_base,
                &mut major,
                &mut minor,
            )
        };
        if has_xtest == xlib::False {
            // SAFETY: `display` was opened above and is not used afterwards.
            unsafe { xlib::XCloseDisplay(display) };
            return Err(InjectionError::Platform(
                "X server does not support the XTest extension".to_string(),
            ));
        }

        Ok(Self {
            display: Mutex::new(DisplayHandle(display)),
        })
    }

    /// Runs `f` with the locked display, then flushes the output buffer so the
    /// event reaches the server immediately.
    fn with_display<T>(&self, f: impl FnOnce(*mut xlib::Display) -> T) -> T {
        let guard = self.display.lock().unwrap_or_else(PoisonError::into_inner);
        let result = f(guard.0);
        // SAFETY: `guard.0` is a valid connection for the lifetime of `self`.
        unsafe { xlib::XFlush(guard.0) };
        result
    }

    fn fake_button(&self, button: c_uint, pressed: bool) -> Result<(), InjectionError> {
        let ok = self.with_display(|display| {
            // SAFETY: `display` is valid while the lock is held.
            unsafe { xtest::XTestFakeButtonEvent(display, button, pressed as c_int, NO_DELAY) }
        });
        check(ok, "XTestFakeButtonEvent")
    }

    fn fake_key(&self, key: HidKeyCode, pressed: bool) -> Result<(), InjectionError> {
        let keysym = KeyMapper::hid_to_x11_keysym(key);
        let ok = self.with_display(|display| {
            // SAFETY: `display` is valid while the lock is held.
            let keycode = unsafe { xlib::XKeysymToKeycode(display, keysym.into()) };
            if keycode == 0 {
                return None;
            }
            // SAFETY: as above.
            Some(unsafe {
                xtest::XTestFakeKeyEvent(display, keycode.into(), pressed as c_int, NO_DELAY)
            })
        });
        match ok {
            Some(ok) => check(ok, "XTestFakeKeyEvent"),
            None => Err(InjectionError::Platform(format!(
                "no keycode is mapped to {key:?} (keysym {keysym:#x})"
            ))),
        }
    }
}

impl Drop for LinuxXTestInjector {
    fn drop(&mut self) {
        let handle = self.display.get_mut().unwrap_or_else(PoisonError::into_inner);
        // SAFETY: the connection was opened in `new` and is closed exactly once.
        unsafe { xlib::XCloseDisplay(handle.0) };
    }
}

impl InputInjector for LinuxXTestInjector {
    fn cursor_position(&self) -> Result<Point, InjectionError> {
        let (mut root_x, mut root_y) = (0, 0);
        let found = self.with_display(|display| {
            let (mut root_return, mut child_return) = (0, 0);
            let (mut win_x, mut win_y, mut mask) = (0, 0, 0);
            // SAFETY: `display` is valid while the lock is held and every
            // out-pointer refers to a live local.
            unsafe {
                xlib::XQueryPointer(
                    display,
                    xlib::XDefaultRootWindow(display),
                    &mut root_return,
                    &mut child_return,
                    &mut root_x,
                    &mut root_y,
                    &mut win_x,
                    &mut win_y,
                    &mut mask,
                )
            }
        });
        check(found, "XQueryPointer")?;
        Ok(Point::new(root_x, root_y))
    }

    fn move_cursor_to(&self, target: Point) -> Result<(), InjectionError> {
        let ok = self.with_display(|display| {
            // SAFETY: `display` is valid while the lock is held.
            unsafe {
                xtest::XTestFakeMotionEvent(display, SCREEN_DEFAULT, target.x, target.y, NO_DELAY)
            }
        });
        check(ok, "XTestFakeMotionEvent")
    }

    fn press_button(&self, button: MouseButton) -> Result<(), InjectionError> {
        self.fake_button(x_button(button), true)
    }

    fn release_button(&self, button: MouseButton) -> Result<(), InjectionError> {
        self.fake_button(x_button(button), false)
    }

    fn scroll(&self, amount: i32) -> Result<(), InjectionError> {
        let (button, clicks) = wheel_clicks(amount);
        for _ in 0..clicks {
            self.fake_button(button, true)?;
            self.fake_button(button, false)?;
        }
        Ok(())
    }

    fn press_key(&self, key: HidKeyCode) -> Result<(), InjectionError> {
        self.fake_key(key, true)
    }

    fn release_key(&self, key: HidKeyCode) -> Result<(), InjectionError> {
        self.fake_key(key, false)
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn x_button(button: MouseButton) -> c_uint {
    match button {
        MouseButton::Left => BUTTON_LEFT,
        MouseButton::Right => BUTTON_RIGHT,
    }
}

/// Maps protocol notches (positive = down) to a wheel button and click count.
fn wheel_clicks(amount: i32) -> (c_uint, u32) {
    let button = if amount < 0 {
        BUTTON_WHEEL_UP
    } else {
        BUTTON_WHEEL_DOWN
    };
    (button, amount.unsigned_abs().min(MAX_WHEEL_CLICKS))
}

fn check(status: c_int, call: &str) -> Result<(), InjectionError> {
    if status == xlib::False {
        return Err(InjectionError::Platform(format!("{call} failed")));
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wheel_clicks_positive_scrolls_down() {
        assert_eq!(wheel_clicks(3), (BUTTON_WHEEL_DOWN, 3));
    }

    #[test]
    fn test_wheel_clicks_negative_scrolls_up() {
        assert_eq!(wheel_clicks(-2), (BUTTON_WHEEL_UP, 2));
    }

    #[test]
    fn test_wheel_clicks_zero_sends_nothing() {
        assert_eq!(wheel_clicks(0).1, 0);
    }

    #[test]
    fn test_wheel_clicks_are_capped() {
        assert_eq!(wheel_clicks(i32::MIN), (BUTTON_WHEEL_UP, MAX_WHEEL_CLICKS));
    }

    #[test]
    fn test_x_button_numbers() {
        assert_eq!(x_button(MouseButton::Left), 1);
        assert_eq!(x_button(MouseButton::Right), 3);
    }

    /// Smoke-test: with a DISPLAY the injector must connect and report a
    /// cursor position; without one construction must fail cleanly.
    #[test]
    fn test_linux_xtest_injector_smoke() {
        let result = LinuxXTestInjector::new();
        if std::env::var("DISPLAY").is_err() {
            assert!(result.is_err(), "construction must fail without DISPLAY");
            return;
        }
        if let Ok(injector) = result {
            assert!(injector.cursor_position().is_ok());
        }
    }
}
