//! Native runner for the Grenade Helper desktop application.
//!
//! This crate owns everything that happens before the embedded Flutter engine
//! takes over and after it finishes:
//!
//! - Enforcing a single running instance through a system-wide named lock
//! - Asking the running instance to show itself when the app is launched again
//! - Attaching a console, entering a COM apartment and creating the window
//! - Forwarding command-line arguments to the Dart entrypoint
//! - Running the native message loop and tearing everything down
//!
//! # Example
//!
//! ```no_run
//! use grenade_runner::{RunnerConfig, platform};
//!
//! let status = platform::runner(RunnerConfig::default()).run(std::env::args_os());
//! std::process::exit(status.code().into());
//! ```
//!
//! # Single-instance protocol
//!
//! The first process to create the named lock becomes the primary instance.
//! A later launch observes that the lock already exists, enumerates top-level
//! windows looking for the exact class name and title of the primary's window,
//! posts it `WM_SHOW_ME` and exits with success. The post is fire-and-forget:
//! nothing is retried and no reply is awaited.
//!
//! The guard itself is written against the [`NamedLock`], [`WindowLocator`]
//! and [`WindowMessenger`] traits, so any backend (or a test fake) can be
//! plugged in. [`platform`] provides the native ones.
//!
//! # Logging
//!
//! This crate uses the [`log`](https://docs.rs/log) facade. The
//! `grenade-helper` binary installs `env_logger`.

// Internal implementation modules
mod startup;

// Public API modules
pub mod config;
pub mod constants;
pub mod guard;
pub mod lock;
pub mod models;
pub mod platform;
pub mod project;
pub mod runner;
pub mod windowing;

// Re-exported public API
pub use config::RunnerConfig;
pub use guard::SingleInstanceGuard;
pub use lock::{FileLock, LockAcquisition, NamedLock};
pub use models::{
    AppIdentity, ExitStatus, InstanceRole, Point, RunnerError, Size, WindowHandle, WindowProbe,
    WindowQuery, WindowSpec,
};
pub use project::{DartProject, entrypoint_arguments};
pub use runner::Runner;
pub use startup::{AppWindow, Host, run_primary};
pub use windowing::{WindowLocator, WindowMessenger, first_match};

/// A specialized `Result` type for runner operations.
pub type Result<T> = std::result::Result<T, RunnerError>;
