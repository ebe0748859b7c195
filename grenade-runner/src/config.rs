use std::path::PathBuf;

use crate::constants::project;
use crate::models::{AppIdentity, WindowSpec};

/// Everything the runner needs to know about the application it hosts.
///
/// The defaults are the production identifiers. Tests and alternative builds
/// can override individual fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    pub identity: AppIdentity,
    pub window: WindowSpec,
    /// Directory holding the engine's assets, ICU data and AOT library.
    pub data_dir: PathBuf,
}

impl RunnerConfig {
    pub fn with_identity(mut self, identity: AppIdentity) -> Self {
        self.identity = identity;
        self
    }

    pub fn with_window(mut self, window: WindowSpec) -> Self {
        self.window = window;
        self
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            identity: AppIdentity::default(),
            window: WindowSpec::default(),
            data_dir: PathBuf::from(project::DATA_DIR),
        }
    }
}
