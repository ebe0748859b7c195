pub mod logging;

use std::process::ExitCode;

use grenade_runner::{RunnerConfig, platform};
use log::{info, warn};

use crate::logging::init_logging;

/// Runs the native runner for this process and returns its exit code.
pub fn run() -> ExitCode {
    if let Err(e) = init_logging() {
        eprintln!("{e:#}");
    }

    info!("grenade-helper {} starting", env!("CARGO_PKG_VERSION"));
    if !cfg!(windows) {
        warn!("Native windows are only available on Windows");
    }

    platform::runner(RunnerConfig::default())
        .run(std::env::args_os())
        .into()
}
