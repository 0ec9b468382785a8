//! CommandDispatcher: executes parsed protocol commands as device input.
//!
//! This use case sits at the application layer and delegates to an
//! [`InputInjector`] trait object for OS-level event injection.
//! The platform-specific implementations are in the infrastructure layer.
//!
//! # Effect table
//!
//! | Command              | Injector calls                                         |
//! |----------------------|--------------------------------------------------------|
//! | `MoveRelative`       | `cursor_position`, then `move_cursor_to(corrected)`    |
//! | `LeftClick`          | press + release `Left`                                 |
//! | `RightClick`         | press + release `Right`                                |
//! | `ButtonDown` / `Up`  | press / release `Left` only (drag gestures)            |
//! | `ScrollVertical`     | `scroll(amount)`                                       |
//! | `ScrollHorizontal`   | press Shift, `scroll(amount)`, release Shift           |
//! | `KeyCombo`           | press each key in order, release in reverse order      |
//! | `Incomplete/Unknown` | none                                                   |
//!
//! Multi-call sequences always run their release half, even if an earlier call
//! failed, so a failed click never leaves a button or modifier held.

use std::sync::Arc;

use thiserror::Error;
use touchpad_core::{BoundaryCorrector, Command, Correction, HidKeyCode, Point};
use tracing::{debug, trace, warn};

/// Error type for input injection operations.
#[derive(Debug, Error)]
pub enum InjectionError {
    #[error("platform error: {0}")]
    Platform(String),
    #[error("input injection is not supported on {0}")]
    Unsupported(&'static str),
}

/// Error type for a dispatched command.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The live cursor position could not be read before a relative move.
    #[error("could not read cursor position: {0}")]
    CursorQuery(#[source] InjectionError),
    /// One of the injector calls making up the command failed.
    #[error("{action} failed: {source}")]
    Injection {
        action: &'static str,
        #[source]
        source: InjectionError,
    },
}

/// Mouse buttons the protocol can press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
}

/// Platform-agnostic input injection trait.
///
/// Each supported OS provides an implementation in the infrastructure layer.
/// All coordinates are virtual desktop pixels.
#[cfg_attr(test, mockall::automock)]
pub trait InputInjector: Send + Sync {
    /// Returns the live cursor position.
    fn cursor_position(&self) -> Result<Point, InjectionError>;

    /// Warps the cursor to an absolute position.
    fn move_cursor_to(&self, target: Point) -> Result<(), InjectionError>;

    /// Presses and holds a mouse button.
    fn press_button(&self, button: MouseButton) -> Result<(), InjectionError>;

    /// Releases a mouse button.
    fn release_button(&self, button: MouseButton) -> Result<(), InjectionError>;

    /// Turns the vertical wheel by `amount` notches; positive scrolls down.
    fn scroll(&self, amount: i32) -> Result<(), InjectionError>;

    /// Emulates a key press (key-down event).
    fn press_key(&self, key: HidKeyCode) -> Result<(), InjectionError>;

    /// Emulates a key release (key-up event).
    fn release_key(&self, key: HidKeyCode) -> Result<(), InjectionError>;
}

/// The Dispatch Command use case.
///
/// Stateless between calls; the only state that spans commands is the
/// button-held state inside the injector (`ButtonDown` without `ButtonUp`
/// keeps the button held, which is how drags work).
pub struct CommandDispatcher {
    injector: Arc<dyn InputInjector>,
    corrector: BoundaryCorrector,
}

impl CommandDispatcher {
    /// Creates a new use case with the given injector and corrector.
    pub fn new(injector: Arc<dyn InputInjector>, corrector: BoundaryCorrector) -> Self {
        Self {
            injector,
            corrector,
        }
    }

    /// Returns the corrector used for relative moves.
    pub fn corrector(&self) -> &BoundaryCorrector {
        &self.corrector
    }

    /// Executes `command`, reading the cursor position from the injector when
    /// (and only when) the command moves the cursor.
    ///
    /// Returns the point the cursor was moved to, if any.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError`] if the cursor query or an injector call fails.
    pub fn dispatch(&self, command: &Command) -> Result<Option<Point>, DispatchError> {
        if command.moves_cursor() && !command.is_inert() {
            let current = self
                .injector
                .cursor_position()
                .map_err(DispatchError::CursorQuery)?;
            return self.dispatch_at(command, current);
        }
        self.dispatch_at(command, Point::default())
    }

    /// Executes `command` with an explicitly supplied cursor position.
    ///
    /// `current` is only consulted for `MoveRelative`.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError`] if an injector call fails.  For multi-call
    /// sequences the first failure is returned after the sequence completes.
    pub fn dispatch_at(
        &self,
        command: &Command,
        current: Point,
    ) -> Result<Option<Point>, DispatchError> {
        match command {
            Command::MoveRelative { dx, dy } => self.move_relative(current, *dx, *dy),
            Command::LeftClick => self.click(MouseButton::Left).map(|_| None),
            Command::RightClick => self.click(MouseButton::Right).map(|_| None),
            Command::ButtonDown => {
                injected("press button", self.injector.press_button(MouseButton::Left))
                    .map(|_| None)
            }
            Command::ButtonUp => {
                injected("release button", self.injector.release_button(MouseButton::Left))
                    .map(|_| None)
            }
            Command::ScrollVertical { amount } => {
                injected("scroll", self.injector.scroll(*amount)).map(|_| None)
            }
            Command::ScrollHorizontal { amount } => {
                self.scroll_horizontal(*amount).map(|_| None)
            }
            Command::KeyCombo { keys } => self.chord(keys).map(|_| None),
            Command::Incomplete { .. } => {
                debug!("ignoring {command}");
                Ok(None)
            }
            Command::Unknown { raw } => {
                warn!("unrecognized command {raw:?}");
                Ok(None)
            }
        }
    }

    fn move_relative(
        &self,
        current: Point,
        dx: i32,
        dy: i32,
    ) -> Result<Option<Point>, DispatchError> {
        if dx == 0 && dy == 0 {
            return Ok(None);
        }

        let requested = current.offset(dx, dy);
        let (target, correction) = self.corrector.correct_with_kind(current, requested);
        if correction != Correction::Unchanged {
            debug!("move from {current} to {requested} corrected to {target} ({correction:?})");
        }

        injected("move cursor", self.injector.move_cursor_to(target))?;
        Ok(Some(target))
    }

    fn click(&self, button: MouseButton) -> Result<(), DispatchError> {
        let mut outcome = Ok(());
        keep_first(&mut outcome, injected("press button", self.injector.press_button(button)));
        keep_first(
            &mut outcome,
            injected("release button", self.injector.release_button(button)),
        );
        outcome
    }

    /// Shift is held around the wheel motion; releasing it early would turn
    /// the motion back into a vertical scroll.
    fn scroll_horizontal(&self, amount: i32) -> Result<(), DispatchError> {
        let mut outcome = Ok(());
        keep_first(
            &mut outcome,
            injected("press key", self.injector.press_key(HidKeyCode::LeftShift)),
        );
        keep_first(&mut outcome, injected("scroll", self.injector.scroll(amount)));
        keep_first(
            &mut outcome,
            injected("release key", self.injector.release_key(HidKeyCode::LeftShift)),
        );
        outcome
    }

    fn chord(&self, keys: &[HidKeyCode]) -> Result<(), DispatchError> {
        let mut outcome = Ok(());
        let mut held = Vec::with_capacity(keys.len());

        for &key in keys {
            match injected("press key", self.injector.press_key(key)) {
                Ok(()) => held.push(key),
                Err(e) => {
                    keep_first(&mut outcome, Err(e));
                    break;
                }
            }
        }

        for &key in held.iter().rev() {
            keep_first(&mut outcome, injected("release key", self.injector.release_key(key)));
        }

        trace!("chord {keys:?} released {} keys", held.len());
        outcome
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn injected(action: &'static str, result: Result<(), InjectionError>) -> Result<(), DispatchError> {
    result.map_err(|source| DispatchError::Injection { action, source })
}

/// Stores `next` in `outcome` unless `outcome` already holds an error.
fn keep_first(outcome: &mut Result<(), DispatchError>, next: Result<(), DispatchError>) {
    if outcome.is_ok() {
        *outcome = next;
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
