//! Infrastructure layer for the server.
//!
//! Contains OS-facing adapters: input injection APIs, the UDP listener,
//! monitor enumeration, the TOML config file, and firewall provisioning.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `touchpad_core`, but MUST NOT be imported by the `application` layer.
//!
//! # Sub-modules
//!
//! - **`input_injection`** – OS-specific implementations of `InputInjector`.
//!   The correct implementation is selected at compile time using
//!   `#[cfg(target_os)]`.  A recording `MockInputInjector` is also provided.
//!
//! - **`network`** – Binds the command socket and runs the blocking receive
//!   loop on a dedicated thread, forwarding datagrams over a channel.
//!
//! - **`screen_info`** – OS-specific monitor enumeration.  On Windows it calls
//!   `EnumDisplayMonitors`; on Linux it queries the RandR extension.
//!
//! - **`storage`** – Loads `ServerConfig` from the platform config directory.
//!
//! - **`firewall`** – Makes sure an inbound UDP rule exists for the listening
//!   port (Windows only).

pub mod firewall;
pub mod input_injection;
pub mod network;
pub mod screen_info;
pub mod storage;
