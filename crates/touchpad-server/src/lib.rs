//! touchpad-server library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does touchpad-server do? (for beginners)
//!
//! A phone app sends one short text command per UDP datagram (`drag 8,-3`,
//! `left_click`, `scrollY 2`, `ctrl_tab`, ...).  The server:
//!
//! 1. Resolves the monitor layout once at startup, either from the config file
//!    or by asking the OS (`EnumDisplayMonitors` on Windows, RandR on Linux).
//! 2. Binds a UDP socket and receives datagrams on a dedicated thread.
//! 3. Parses each datagram with [`touchpad_core::parse`].
//! 4. Dispatches the resulting command through the
//!    [`CommandDispatcher`](application::dispatch_command::CommandDispatcher),
//!    which asks the [`BoundaryCorrector`](touchpad_core::BoundaryCorrector)
//!    where relative moves must land.
//! 5. Calls the platform input API (`SendInput` on Windows, XTest on Linux)
//!    to inject the event as if it came from a physical device.

/// Application layer: use cases for the server.
pub mod application;

/// Infrastructure layer: OS adapters, network, configuration, and firewall.
pub mod infrastructure;
