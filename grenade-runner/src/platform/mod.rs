//! Native backends for the current platform.
//!
//! On Windows the runner uses a named kernel mutex, `EnumWindows` and a real
//! Win32 window. Elsewhere it falls back to a file lock and a headless host
//! that cannot open windows, so only the secondary path can succeed there.

#[cfg(not(windows))]
mod headless;
#[cfg(windows)]
pub mod win32;

#[cfg(not(windows))]
pub use headless::{HeadlessHost, HeadlessWindow, NoDesktop};

use crate::config::RunnerConfig;
use crate::runner::Runner;

/// Runner wired to the backends of the current platform.
#[cfg(windows)]
pub type NativeRunner = Runner<win32::MutexLock, win32::Desktop, win32::Desktop, win32::Win32Host>;

/// Runner wired to the backends of the current platform.
#[cfg(not(windows))]
pub type NativeRunner = Runner<crate::lock::FileLock, NoDesktop, NoDesktop, HeadlessHost>;

/// Builds the runner for the current platform.
#[cfg(windows)]
pub fn runner(config: RunnerConfig) -> NativeRunner {
    let host = win32::Win32Host::new(config.identity.window_class.clone());
    Runner::new(config, win32::MutexLock, win32::Desktop, win32::Desktop, host)
}

/// Builds the runner for the current platform.
#[cfg(not(windows))]
pub fn runner(config: RunnerConfig) -> NativeRunner {
    Runner::new(
        config,
        crate::lock::FileLock::new(),
        NoDesktop,
        NoDesktop,
        HeadlessHost,
    )
}
