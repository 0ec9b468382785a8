//! HID Usage ID to X11 KeySym translation.
//!
//! Reference: X11 keysymdef.h.  XTest takes hardware keycodes, so the server
//! resolves these KeySyms with `XKeysymToKeycode` against the live keyboard
//! mapping before injecting.

use super::hid::HidKeyCode;

pub const XK_TAB: u32 = 0xFF09;
pub const XK_SHIFT_L: u32 = 0xFFE1;
pub const XK_CONTROL_L: u32 = 0xFFE3;
pub const XK_ALT_L: u32 = 0xFFE9;
/// Lowercase letter KeySyms equal their ASCII values.
pub const XK_T: u32 = 0x0074;
pub const XK_W: u32 = 0x0077;

/// Translates a HID Usage ID to an X11 KeySym.
pub fn hid_to_keysym(hid: HidKeyCode) -> u32 {
    match hid {
        HidKeyCode::KeyT => XK_T,
        HidKeyCode::KeyW => XK_W,
        HidKeyCode::Tab => XK_TAB,
        HidKeyCode::LeftControl => XK_CONTROL_L,
        HidKeyCode::LeftShift => XK_SHIFT_L,
        HidKeyCode::LeftAlt => XK_ALT_L,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_map_to_lowercase_ascii() {
        assert_eq!(hid_to_keysym(HidKeyCode::KeyT), b't' as u32);
        assert_eq!(hid_to_keysym(HidKeyCode::KeyW), b'w' as u32);
    }

    #[test]
    fn test_modifiers_map_to_left_keysyms() {
        assert_eq!(hid_to_keysym(HidKeyCode::LeftControl), 0xFFE3);
        assert_eq!(hid_to_keysym(HidKeyCode::LeftShift), 0xFFE1);
    }
}
