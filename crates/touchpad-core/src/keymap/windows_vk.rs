//! HID Usage ID to Windows Virtual Key (VK) code translation.
//!
//! Reference: Windows Virtual-Key Codes (winuser.h).
//!
//! The generic `VK_CONTROL`/`VK_SHIFT`/`VK_MENU` codes are used rather than
//! the left/right specific ones; `SendInput` accepts either and applications
//! see the same shortcut.

use super::hid::HidKeyCode;

pub const VK_TAB: u16 = 0x09;
pub const VK_SHIFT: u16 = 0x10;
pub const VK_CONTROL: u16 = 0x11;
pub const VK_MENU: u16 = 0x12;
pub const VK_T: u16 = 0x54;
pub const VK_W: u16 = 0x57;

/// Translates a HID Usage ID to a Windows Virtual Key code.
pub fn hid_to_vk(hid: HidKeyCode) -> u16 {
    match hid {
        HidKeyCode::KeyT => VK_T,
        HidKeyCode::KeyW => VK_W,
        HidKeyCode::Tab => VK_TAB,
        HidKeyCode::LeftControl => VK_CONTROL,
        HidKeyCode::LeftShift => VK_SHIFT,
        HidKeyCode::LeftAlt => VK_MENU,
    }
}
