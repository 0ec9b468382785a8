//! Parsing of one datagram of text into a typed [`Command`].
//!
//! # Grammar
//!
//! ```text
//! line   = verb [ whitespace params ]
//! params = param *( "," param )
//! ```
//!
//! The parser is deliberately forgiving because the sender gets no reply and
//! the receive loop must never stop:
//!
//! - Leading and trailing whitespace is ignored.
//! - Each parameter is trimmed and parsed as an `i32`; anything unparsable
//!   (`abc`, `1.5`, `99999999999`) becomes `0`.
//! - Trailing empty parameters (`drag 5,`) are dropped before counting.
//! - A verb with too few parameters yields [`Command::Incomplete`].
//! - An unrecognised verb yields [`Command::Unknown`].

use crate::keymap::hid::HidKeyCode;

use super::verb::Verb;

/// A decoded device command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Press and release the primary button.
    LeftClick,
    /// Press and release the secondary button.
    RightClick,
    /// Press and hold the primary button (start of a drag gesture).
    ButtonDown,
    /// Release the primary button.
    ButtonUp,
    /// Move the cursor by a relative offset; subject to gap correction.
    MoveRelative { dx: i32, dy: i32 },
    /// Wheel motion; negative scrolls up, positive scrolls down.
    ScrollVertical { amount: i32 },
    /// Horizontal wheel motion; negative scrolls left, positive right.
    ScrollHorizontal { amount: i32 },
    /// Press `keys` in order, then release them in reverse order.
    KeyCombo { keys: Vec<HidKeyCode> },
    /// A known verb that arrived with fewer parameters than it needs.
    Incomplete { verb: Verb, received: usize },
    /// Anything else; carries the trimmed input for diagnostics.
    Unknown { raw: String },
}

impl Command {
    /// Returns `true` if executing this command moves the cursor, and
    /// therefore needs boundary correction.
    pub fn moves_cursor(&self) -> bool {
        matches!(self, Command::MoveRelative { .. })
    }

    /// Returns `true` if dispatching this command has no device effect.
    pub fn is_inert(&self) -> bool {
        match self {
            Command::MoveRelative { dx, dy } => *dx == 0 && *dy == 0,
            Command::KeyCombo { keys } => keys.is_empty(),
            Command::Incomplete { .. } | Command::Unknown { .. } => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::LeftClick => f.write_str("left click"),
            Command::RightClick => f.write_str("right click"),
            Command::ButtonDown => f.write_str("button down"),
            Command::ButtonUp => f.write_str("button up"),
            Command::MoveRelative { dx, dy } => write!(f, "move by ({dx}, {dy})"),
            Command::ScrollVertical { amount } => write!(f, "vertical scroll {amount}"),
            Command::ScrollHorizontal { amount } => write!(f, "horizontal scroll {amount}"),
            Command::KeyCombo { keys } => {
                f.write_str("chord ")?;
                for (i, key) in keys.iter().enumerate() {
                    if i > 0 {
                        f.write_str("+")?;
                    }
                    write!(f, "{key:?}")?;
                }
                Ok(())
            }
            Command::Incomplete { verb, received } => write!(
                f,
                "incomplete {verb} ({received} of {} parameters)",
                verb.arity()
            ),
            Command::Unknown { raw } => write!(f, "unknown {raw:?}"),
        }
    }
}

/// Parses one line of protocol text.
///
/// Never fails; see the module documentation for how malformed input degrades.
pub fn parse(raw: &str) -> Command {
    let line = raw.trim();

    let (verb_token, remainder) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim_start()),
        None => (line, ""),
    };

    let Some(verb) = Verb::from_token(verb_token) else {
        return Command::Unknown {
            raw: line.to_string(),
        };
    };

    let params = split_params(remainder);
    if params.len() < verb.arity() {
        return Command::Incomplete {
            verb,
            received: params.len(),
        };
    }

    match verb {
        Verb::LeftClick => Command::LeftClick,
        Verb::RightClick => Command::RightClick,
        Verb::MouseDown => Command::ButtonDown,
        Verb::MouseUp => Command::ButtonUp,
        Verb::Drag => Command::MoveRelative {
            dx: tolerant_int(params[0]),
            dy: tolerant_int(params[1]),
        },
        Verb::ScrollX => Command::ScrollHorizontal {
            amount: tolerant_int(params[0]),
        },
        Verb::ScrollY => Command::ScrollVertical {
            amount: tolerant_int(params[0]),
        },
        Verb::CtrlTab | Verb::CtrlShiftTab | Verb::AltTab | Verb::CtrlT | Verb::CtrlW => {
            Command::KeyCombo {
                keys: verb.chord_keys().unwrap_or_default().to_vec(),
            }
        }
    }
}

/// Splits the parameter remainder on commas, trimming each token.
fn split_params(remainder: &str) -> Vec<&str> {
    if remainder.is_empty() {
        return Vec::new();
    }

    let mut params: Vec<&str> = remainder.split(',').map(str::trim).collect();
    while params.last().is_some_and(|p| p.is_empty()) {
        params.pop();
    }
    params
}

/// Parses `token` as an `i32`, yielding `0` on any failure.
fn tolerant_int(token: &str) -> i32 {
    token.parse().unwrap_or(0)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── verbs without parameters ──────────────────────────────────────────────

    #[test]
    fn test_parse_left_click() {
        assert_eq!(parse("left_click"), Command::LeftClick);
    }

    #[test]
    fn test_parse_trims_surrounding_whitespace_and_newline() {
        assert_eq!(parse("  right_click \r\n"), Command::RightClick);
    }

    #[test]
    fn test_parse_mouse_down_and_up() {
        assert_eq!(parse("mouse_down"), Command::ButtonDown);
        assert_eq!(parse("mouse_up"), Command::ButtonUp);
    }

    #[test]
    fn test_parse_ignores_extra_parameters_on_parameterless_verbs() {
        assert_eq!(parse("left_click 1,2"), Command::LeftClick);
    }

    // ── drag ──────────────────────────────────────────────────────────────────

    #[test]
    fn test_parse_drag_with_two_integers() {
        assert_eq!(parse("drag 12,-7"), Command::MoveRelative { dx: 12, dy: -7 });
    }

    #[test]
    fn test_parse_drag_with_malformed_first_field_degrades_to_zero() {
        assert_eq!(parse("drag abc,50"), Command::MoveRelative { dx: 0, dy: 50 });
    }

    #[test]
    fn test_parse_drag_with_spaces_around_parameters() {
        assert_eq!(parse("drag  3 , 4"), Command::MoveRelative { dx: 3, dy: 4 });
    }

    #[test]
    fn test_parse_drag_with_overflowing_number_degrades_to_zero() {
        assert_eq!(
            parse("drag 99999999999,+8"),
            Command::MoveRelative { dx: 0, dy: 8 }
        );
    }

    #[test]
    fn test_parse_drag_with_empty_leading_field_degrades_to_zero() {
        assert_eq!(parse("drag ,5"), Command::MoveRelative { dx: 0, dy: 5 });
    }

    #[test]
    fn test_parse_drag_with_one_parameter_is_incomplete() {
        assert_eq!(
            parse("drag 5"),
            Command::Incomplete {
                verb: Verb::Drag,
                received: 1
            }
        );
    }

    #[test]
    fn test_parse_drag_trailing_comma_is_incomplete() {
        assert_eq!(
            parse("drag 5,"),
            Command::Incomplete {
                verb: Verb::Drag,
                received: 1
            }
        );
    }

    #[test]
    fn test_parse_bare_drag_is_incomplete() {
        assert_eq!(
            parse("drag"),
            Command::Incomplete {
                verb: Verb::Drag,
                received: 0
            }
        );
    }

    // ── scroll ────────────────────────────────────────────────────────────────

    #[test]
    fn test_parse_scroll_y() {
        assert_eq!(parse("scrollY 10"), Command::ScrollVertical { amount: 10 });
    }

    #[test]
    fn test_parse_scroll_x_negative() {
        assert_eq!(parse("scrollX -3"), Command::ScrollHorizontal { amount: -3 });
    }

    #[test]
    fn test_parse_scroll_with_garbage_amount_is_zero() {
        assert_eq!(parse("scrollY 1.5"), Command::ScrollVertical { amount: 0 });
    }

    #[test]
    fn test_parse_scroll_without_amount_is_incomplete() {
        assert_eq!(
            parse("scrollX"),
            Command::Incomplete {
                verb: Verb::ScrollX,
                received: 0
            }
        );
    }

    // ── chords ────────────────────────────────────────────────────────────────

    #[test]
    fn test_parse_ctrl_shift_tab_chord() {
        assert_eq!(
            parse("ctrl_shift_tab"),
            Command::KeyCombo {
                keys: vec![HidKeyCode::LeftControl, HidKeyCode::LeftShift, HidKeyCode::Tab]
            }
        );
    }

    #[test]
    fn test_parse_alt_tab_chord() {
        assert_eq!(
            parse("alt_tab"),
            Command::KeyCombo {
                keys: vec![HidKeyCode::LeftAlt, HidKeyCode::Tab]
            }
        );
    }

    // ── unknown ───────────────────────────────────────────────────────────────

    #[test]
    fn test_parse_unknown_verb_keeps_raw_text() {
        assert_eq!(
            parse(" foo bar "),
            Command::Unknown {
                raw: "foo bar".to_string()
            }
        );
    }

    #[test]
    fn test_parse_empty_line_is_unknown() {
        assert_eq!(parse("   "), Command::Unknown { raw: String::new() });
    }

    // ── helpers ───────────────────────────────────────────────────────────────

    #[test]
    fn test_moves_cursor_only_for_relative_moves() {
        assert!(Command::MoveRelative { dx: 1, dy: 0 }.moves_cursor());
        assert!(!Command::ScrollVertical { amount: 10 }.moves_cursor());
        assert!(!Command::LeftClick.moves_cursor());
    }

    #[test]
    fn test_is_inert_for_zero_move_and_unknown() {
        assert!(Command::MoveRelative { dx: 0, dy: 0 }.is_inert());
        assert!(parse("foo").is_inert());
        assert!(parse("drag 1").is_inert());
        assert!(!parse("drag 0,1").is_inert());
        assert!(!parse("mouse_up").is_inert());
    }

    #[test]
    fn test_display_renders_readable_descriptions() {
        assert_eq!(parse("drag 5,-2").to_string(), "move by (5, -2)");
        assert_eq!(parse("ctrl_t").to_string(), "chord LeftControl+KeyT");
        assert_eq!(parse("scrollX").to_string(), "incomplete scrollX (0 of 1 parameters)");
    }
}
