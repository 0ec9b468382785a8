//! The fixed table of wire verbs.
//!
//! | Verb             | Parameters | Effect                         |
//! |------------------|------------|--------------------------------|
//! | `left_click`     | –          | primary button click           |
//! | `right_click`    | –          | secondary button click         |
//! | `mouse_down`     | –          | press and hold primary button  |
//! | `mouse_up`       | –          | release primary button         |
//! | `drag`           | `dx,dy`    | relative cursor move           |
//! | `scrollX`        | `amount`   | horizontal scroll              |
//! | `scrollY`        | `amount`   | vertical scroll                |
//! | `ctrl_tab`       | –          | chord Ctrl+Tab                 |
//! | `ctrl_shift_tab` | –          | chord Ctrl+Shift+Tab           |
//! | `alt_tab`        | –          | chord Alt+Tab                  |
//! | `ctrl_t`         | –          | chord Ctrl+T                   |
//! | `ctrl_w`         | –          | chord Ctrl+W                   |
//!
//! Verbs are case-sensitive, exactly as the phone app sends them.

use crate::keymap::hid::HidKeyCode;

/// A recognised protocol verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    LeftClick,
    RightClick,
    MouseDown,
    MouseUp,
    Drag,
    ScrollX,
    ScrollY,
    CtrlTab,
    CtrlShiftTab,
    AltTab,
    CtrlT,
    CtrlW,
}

impl Verb {
    /// Every verb, in wire-table order.
    pub const ALL: [Verb; 12] = [
        Verb::LeftClick,
        Verb::RightClick,
        Verb::MouseDown,
        Verb::MouseUp,
        Verb::Drag,
        Verb::ScrollX,
        Verb::ScrollY,
        Verb::CtrlTab,
        Verb::CtrlShiftTab,
        Verb::AltTab,
        Verb::CtrlT,
        Verb::CtrlW,
    ];

    /// Looks up the verb spelled exactly as `token`.
    pub fn from_token(token: &str) -> Option<Verb> {
        Verb::ALL.into_iter().find(|verb| verb.as_str() == token)
    }

    /// The verb as it appears on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Verb::LeftClick => "left_click",
            Verb::RightClick => "right_click",
            Verb::MouseDown => "mouse_down",
            Verb::MouseUp => "mouse_up",
            Verb::Drag => "drag",
            Verb::ScrollX => "scrollX",
            Verb::ScrollY => "scrollY",
            Verb::CtrlTab => "ctrl_tab",
            Verb::CtrlShiftTab => "ctrl_shift_tab",
            Verb::AltTab => "alt_tab",
            Verb::CtrlT => "ctrl_t",
            Verb::CtrlW => "ctrl_w",
        }
    }

    /// Number of numeric parameters the verb requires.
    pub fn arity(self) -> usize {
        match self {
            Verb::Drag => 2,
            Verb::ScrollX | Verb::ScrollY => 1,
            _ => 0,
        }
    }

    /// Keys of the chord this verb presses, modifiers first.
    ///
    /// Returns `None` for verbs that are not keyboard chords.
    pub fn chord_keys(self) -> Option<&'static [HidKeyCode]> {
        use HidKeyCode::*;
        match self {
            Verb::CtrlTab => Some(&[LeftControl, Tab]),
            Verb::CtrlShiftTab => Some(&[LeftControl, LeftShift, Tab]),
            Verb::AltTab => Some(&[LeftAlt, Tab]),
            Verb::CtrlT => Some(&[LeftControl, KeyT]),
            Verb::CtrlW => Some(&[LeftControl, KeyW]),
            _ => None,
        }
    }
}

impl std::fmt::Display for Verb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
