//! Recording input injector for tests.
//!
//! # Why a recording injector?
//!
//! The real injectors (`WindowsInputInjector`, `LinuxXTestInjector`) make OS
//! API calls that need a desktop session and actually move the cursor on the
//! test machine.  `MockInputInjector` replaces them with an in-memory log:
//! every call is appended to `events` in order, and `move_cursor_to` updates
//! the simulated cursor so that consecutive relative moves build on each
//! other the way they do on a real desktop.
//!
//! # Usage in tests
//!
//! ```ignore
//! let injector = Arc::new(MockInputInjector::at(Point::new(100, 100)));
//! let dispatcher = CommandDispatcher::new(injector.clone(), corrector);
//!
//! dispatcher.dispatch(&parse("left_click")).unwrap();
//!
//! assert_eq!(
//!     injector.events(),
//!     vec![
//!         InjectedEvent::ButtonDown(MouseButton::Left),
//!         InjectedEvent::ButtonUp(MouseButton::Left),
//!     ]
//! );
//! ```
//!
//! # `should_fail` flag
//!
//! Set `should_fail = true` to make every method return
//! `InjectionError::Platform`, simulating a broken OS back-end.

use std::sync::{Mutex, PoisonError};

use touchpad_core::{HidKeyCode, Point};

use crate::application::dispatch_command::{InjectionError, InputInjector, MouseButton};

/// One recorded injector call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InjectedEvent {
    MoveTo(Point),
    ButtonDown(MouseButton),
    ButtonUp(MouseButton),
    Scroll(i32),
    KeyDown(HidKeyCode),
    KeyUp(HidKeyCode),
}

/// An injector that records all calls without performing OS API calls.
#[derive(Debug, Default)]
pub struct MockInputInjector {
    /// Every successful call, in order.
    pub events: Mutex<Vec<InjectedEvent>>,
    /// The simulated cursor position.
    pub cursor: Mutex<Point>,
    /// When `true`, every method immediately returns an error.
    pub should_fail: bool,
}

impl MockInputInjector {
    /// Creates an injector with the cursor at the origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an injector with the cursor at `position`.
    pub fn at(position: Point) -> Self {
        Self {
            cursor: Mutex::new(position),
            ..Self::default()
        }
    }

    /// Returns a snapshot of the recorded calls.
    pub fn events(&self) -> Vec<InjectedEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, event: InjectedEvent) -> Result<(), InjectionError> {
        if self.should_fail {
            return Err(InjectionError::Platform("mock failure".into()));
        }
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
        Ok(())
    }
}

impl InputInjector for MockInputInjector {
    fn cursor_position(&self) -> Result<Point, InjectionError> {
        if self.should_fail {
            return Err(InjectionError::Platform("mock failure".into()));
        }
        Ok(*self.cursor.lock().unwrap_or_else(PoisonError::into_inner))
    }

    fn move_cursor_to(&self, target: Point) -> Result<(), InjectionError> {
        self.record(InjectedEvent::MoveTo(target))?;
        *self.cursor.lock().unwrap_or_else(PoisonError::into_inner) = target;
        Ok(())
    }

    fn press_button(&self, button: MouseButton) -> Result<(), InjectionError> {
        self.record(InjectedEvent::ButtonDown(button))
    }

    fn release_button(&self, button: MouseButton) -> Result<(), InjectionError> {
        self.record(InjectedEvent::ButtonUp(button))
    }

    fn scroll(&self, amount: i32) -> Result<(), InjectionError> {
        self.record(InjectedEvent::Scroll(amount))
    }

    fn press_key(&self, key: HidKeyCode) -> Result<(), InjectionError> {
        self.record(InjectedEvent::KeyDown(key))
    }

    fn release_key(&self, key: HidKeyCode) -> Result<(), InjectionError> {
        self.record(InjectedEvent::KeyUp(key))
    }
}
