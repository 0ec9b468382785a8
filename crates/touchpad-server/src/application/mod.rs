//! Application layer use cases for the server.
//!
//! - **`dispatch_command`** – Turns a parsed [`Command`](touchpad_core::Command)
//!   into calls on an [`InputInjector`](dispatch_command::InputInjector),
//!   routing relative moves through the boundary corrector.  The actual OS
//!   calls are made by an injector implementation supplied at construction.
//!
//! - **`resolve_layout`** – Decides which monitor rectangles the corrector
//!   works with: an explicit list from the config file, or whatever the
//!   platform [`MonitorEnumerator`](resolve_layout::MonitorEnumerator) reports.

pub mod dispatch_command;
pub mod resolve_layout;
