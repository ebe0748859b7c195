use anyhow::Context;
use env_logger::Env;

/// Environment variable holding the log filter, e.g. `debug` or
/// `grenade_runner=trace`.
pub const LOG_ENV: &str = "GRENADE_HELPER_LOG";

const DEFAULT_FILTER: &str = "info";

/// Installs `env_logger`, filtered by [`LOG_ENV`] (default `info`).
pub fn init_logging() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().filter_or(LOG_ENV, DEFAULT_FILTER))
        .format_timestamp_millis()
        .try_init()
        .context("failed to install logger")
}
