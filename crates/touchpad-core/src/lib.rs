//! # touchpad-core
//!
//! Shared library for Touch Pad Server containing the monitor layout model,
//! the gap-crossing cursor corrector, the text command protocol, and key code
//! translation tables.
//!
//! It has zero dependencies on OS APIs, UI frameworks, or network sockets.
//!
//! # Architecture overview (for beginners)
//!
//! Touch Pad Server lets a phone act as a touchpad for a desktop computer.
//! The phone sends short text commands (`drag 12,-4`, `left_click`, ...) in
//! UDP datagrams and the server replays them as real pointer and keyboard
//! input.
//!
//! Some multi-monitor desktops have monitors that do not line up edge to edge.
//! The bounding box of all monitors then contains "gaps": coordinates that are
//! inside the virtual desktop but on no physical screen.  A cursor warped into
//! a gap becomes invisible and unreachable.  This crate decides where a move
//! must really land so that never happens.
//!
//! - **`domain`** – Pure geometry.  [`MonitorLayout`] classifies points as on a
//!   monitor, in a gap, or outside the desktop, and [`BoundaryCorrector`] casts
//!   a ray along the direction of travel to find the first reachable pixel on
//!   the far side of a gap.
//!
//! - **`protocol`** – The wire grammar.  [`parse`] turns one datagram of text
//!   into a typed [`Command`], degrading malformed numbers to `0` instead of
//!   failing.
//!
//! - **`keymap`** – USB HID key codes used by keyboard chords, plus their
//!   Windows Virtual Key and X11 KeySym equivalents.

pub mod domain;
pub mod keymap;
pub mod protocol;

// Re-export the most-used types at the crate root so callers can write
// `touchpad_core::MonitorLayout` instead of `touchpad_core::domain::layout::MonitorLayout`.
pub use domain::correction::{BoundaryCorrector, Correction, DEFAULT_GAP_SCAN_LIMIT};
pub use domain::geometry::{Point, ScreenRect};
pub use domain::layout::{MonitorLayout, PointClass};
pub use keymap::hid::HidKeyCode;
pub use protocol::command::{parse, Command};
pub use protocol::verb::Verb;
