//! USB HID Usage IDs (page 0x07, Keyboard/Keypad page).
//!
//! This is the platform-neutral key representation used by keyboard chords.
//! Injector back-ends translate to OS-native codes at the last moment.
//!
//! Reference: USB HID Usage Tables 1.3, Section 10 (Keyboard/Keypad page 0x07).
//!
//! Only the keys that the command protocol can emit are listed.  HID codes
//! describe physical key positions, not characters, so `KeyT` is the key that
//! carries "T" on a US layout.

/// USB HID Usage ID for keyboard keys (page 0x07).
///
/// The numeric value of each variant is its HID Usage ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum HidKeyCode {
    KeyT = 0x17,
    KeyW = 0x1A,
    Tab = 0x2B,
    LeftControl = 0xE0,
    LeftShift = 0xE1,
    LeftAlt = 0xE2,
}

impl HidKeyCode {
    /// Returns the HID Usage ID.
    pub fn usage_id(self) -> u16 {
        self as u16
    }

    /// Returns `true` for Ctrl, Shift and Alt.
    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            HidKeyCode::LeftControl | HidKeyCode::LeftShift | HidKeyCode::LeftAlt
        )
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
