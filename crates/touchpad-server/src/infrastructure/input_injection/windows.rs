//! Windows input injection via `SetCursorPos` and the `SendInput` API.
//!
//! Cursor warps use `SetCursorPos`, which takes virtual desktop pixels
//! directly, so monitors at negative coordinates need no normalisation.
//! Buttons, wheel motion and keys go through `SendInput`.

#![cfg(target_os = "windows")]

use touchpad_core::{keymap::KeyMapper, HidKeyCode, Point};
use windows::Win32::Foundation::POINT;
use windows::Win32::UI::Input::KeyboardAndMouse::{
    SendInput, INPUT, INPUT_0, INPUT_KEYBOARD, INPUT_MOUSE, KEYBDINPUT, KEYBD_EVENT_FLAGS,
    KEYEVENTF_KEYUP, MOUSEEVENTF_LEFTDOWN, MOUSEEVENTF_LEFTUP, MOUSEEVENTF_RIGHTDOWN,
    MOUSEEVENTF_RIGHTUP, MOUSEEVENTF_WHEEL, MOUSEINPUT, MOUSE_EVENT_FLAGS, VIRTUAL_KEY,
};
use windows::Win32::UI::WindowsAndMessaging::{GetCursorPos, SetCursorPos};

use crate::application::dispatch_command::{InjectionError, InputInjector, MouseButton};

/// One wheel notch in `SendInput` units.
const WHEEL_DELTA: i32 = 120;

/// Windows implementation of [`InputInjector`].
pub struct WindowsInputInjector;

impl WindowsInputInjector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WindowsInputInjector {
    fn default() -> Self {
        Self::new()
    }
}

impl InputInjector for WindowsInputInjector {
    fn cursor_position(&self) -> Result<Point, InjectionError> {
        let mut pos = POINT::default();
        // SAFETY: `pos` is a valid, writable POINT on the stack.
        unsafe { GetCursorPos(&mut pos) }
            .map_err(|e| InjectionError::Platform(format!("GetCursorPos failed: {e}")))?;
        Ok(Point::new(pos.x, pos.y))
    }

    fn move_cursor_to(&self, target: Point) -> Result<(), InjectionError> {
        // SAFETY: SetCursorPos has no pointer arguments.
        unsafe { SetCursorPos(target.x, target.y) }
            .map_err(|e| InjectionError::Platform(format!("SetCursorPos failed: {e}")))
    }

    fn press_button(&self, button: MouseButton) -> Result<(), InjectionError> {
        let flags = match button {
            MouseButton::Left => MOUSEEVENTF_LEFTDOWN,
            MouseButton::Right => MOUSEEVENTF_RIGHTDOWN,
        };
        send_mouse(flags, 0)
    }

    fn release_button(&self, button: MouseButton) -> Result<(), InjectionError> {
        let flags = match button {
            MouseButton::Left => MOUSEEVENTF_LEFTUP,
            MouseButton::Right => MOUSEEVENTF_RIGHTUP,
        };
        send_mouse(flags, 0)
    }

    fn scroll(&self, amount: i32) -> Result<(), InjectionError> {
        send_mouse(MOUSEEVENTF_WHEEL, wheel_data(amount))
    }

    fn press_key(&self, key: HidKeyCode) -> Result<(), InjectionError> {
        send_key(KeyMapper::hid_to_windows_vk(key), false)
    }

    fn release_key(&self, key: HidKeyCode) -> Result<(), InjectionError> {
        send_key(KeyMapper::hid_to_windows_vk(key), true)
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Converts protocol notches (positive = down) to `mouseData`.
///
/// Windows treats a positive wheel delta as "away from the user" (up), so the
/// sign is flipped.
fn wheel_data(amount: i32) -> u32 {
    amount.saturating_mul(WHEEL_DELTA).saturating_neg() as u32
}

fn send_mouse(flags: MOUSE_EVENT_FLAGS, mouse_data: u32) -> Result<(), InjectionError> {
    let input = INPUT {
        r#type: INPUT_MOUSE,
        Anonymous: INPUT_0 {
            mi: MOUSEINPUT {
                dx: 0,
                dy: 0,
                mouseData: mouse_data,
                dwFlags: flags,
                time: 0,
                dwExtraInfo: 0,
            },
        },
    };
    send(input)
}

fn send_key(vk: u16, key_up: bool) -> Result<(), InjectionError> {
    let flags = if key_up {
        KEYEVENTF_KEYUP
    } else {
        KEYBD_EVENT_FLAGS::default()
    };

    let input = INPUT {
        r#type: INPUT_KEYBOARD,
        Anonymous: INPUT_0 {
            ki: KEYBDINPUT {
                wVk: VIRTUAL_KEY(vk),
                wScan: 0,
                dwFlags: flags,
                time: 0,
                dwExtraInfo: 0,
            },
        },
    };
    send(input)
}

fn send(input: INPUT) -> Result<(), InjectionError> {
    // SAFETY: `input` is a fully initialised INPUT structure on the stack.
    let inserted = unsafe { SendInput(&[input], std::mem::size_of::<INPUT>() as i32) };
    if inserted == 0 {
        return Err(InjectionError::Platform(format!(
            "SendInput was blocked: {}",
            windows::core::Error::from_win32()
        )));
    }
    Ok(())
}
