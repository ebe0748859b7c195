use std::ffi::OsString;

use log::{error, info};

use crate::config::RunnerConfig;
use crate::guard::SingleInstanceGuard;
use crate::lock::NamedLock;
use crate::models::{ExitStatus, InstanceRole};
use crate::startup::{Host, run_primary};
use crate::windowing::{WindowLocator, WindowMessenger};

/// Ties the single-instance guard to the primary startup sequence.
///
/// # Example
///
/// ```ignore
/// let status = grenade_runner::platform::runner(RunnerConfig::default())
///     .run(std::env::args_os());
/// std::process::exit(status.code().into());
/// ```
pub struct Runner<L, W, M, H> {
    config: RunnerConfig,
    lock: L,
    locator: W,
    messenger: M,
    host: H,
}

impl<L, W, M, H> Runner<L, W, M, H>
where
    L: NamedLock,
    W: WindowLocator,
    M: WindowMessenger,
    H: Host,
{
    pub fn new(config: RunnerConfig, lock: L, locator: W, messenger: M, host: H) -> Self {
        Self {
            config,
            lock,
            locator,
            messenger,
            host,
        }
    }

    /// Runs the process to completion and returns its exit status.
    ///
    /// `args` is the full argument vector, program name first.
    pub fn run<I, S>(self, args: I) -> ExitStatus
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let guard = SingleInstanceGuard::new(self.config.identity.clone());

        match guard.acquire_or_notify(&self.lock, &self.locator, &self.messenger) {
            Ok(InstanceRole::Primary(lock)) => run_primary(&self.host, &self.config, lock, args),
            Ok(InstanceRole::Secondary { notified }) => {
                info!("Exiting secondary instance (primary notified: {notified})");
                ExitStatus::Success
            }
            Err(e) => {
                error!("{e}");
                ExitStatus::Failure
            }
        }
    }
}
