//! Platform-specific input injection implementations.
//!
//! The correct implementation is selected at compile time via
//! `#[cfg(target_os = ...)]` and constructed by [`native_injector`].

use std::sync::Arc;

use crate::application::dispatch_command::{InjectionError, InputInjector};

pub mod mock;

#[cfg(target_os = "windows")]
pub mod windows;

#[cfg(target_os = "linux")]
pub mod linux;

/// Creates the injector for the OS this binary was built for.
///
/// # Errors
///
/// Returns [`InjectionError::Platform`] if the back-end cannot be initialised
/// (for example no X display on Linux), or [`InjectionError::Unsupported`] on
/// platforms without a back-end.
pub fn native_injector() -> Result<Arc<dyn InputInjector>, InjectionError> {
    #[cfg(target_os = "windows")]
    return Ok(Arc::new(self::windows::WindowsInputInjector::new()));

    #[cfg(target_os = "linux")]
    return Ok(Arc::new(self::linux::LinuxXTestInjector::new()?));

    #[cfg(not(any(target_os = "windows", target_os = "linux")))]
    return Err(InjectionError::Unsupported(std::env::consts::OS));
}
