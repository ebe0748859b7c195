//! Engine project descriptor and command-line forwarding.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::constants::project;

/// Describes where the embedded engine finds its assets and what arguments
/// the Dart entrypoint receives.
///
/// Paths are relative to the executable's directory unless the data
/// directory given to [`DartProject::new`] is absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DartProject {
    assets_path: PathBuf,
    icu_data_path: PathBuf,
    aot_library_path: PathBuf,
    dart_entrypoint_arguments: Vec<String>,
}

impl DartProject {
    /// Builds the standard layout under `data_dir`.
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref();
        Self {
            assets_path: data_dir.join(project::ASSETS_DIR),
            icu_data_path: data_dir.join(project::ICU_DATA_FILE),
            aot_library_path: data_dir.join(project::AOT_LIBRARY_FILE),
            dart_entrypoint_arguments: Vec::new(),
        }
    }

    pub fn assets_path(&self) -> &Path {
        &self.assets_path
    }

    pub fn icu_data_path(&self) -> &Path {
        &self.icu_data_path
    }

    pub fn aot_library_path(&self) -> &Path {
        &self.aot_library_path
    }

    pub fn dart_entrypoint_arguments(&self) -> &[String] {
        &self.dart_entrypoint_arguments
    }

    pub fn set_dart_entrypoint_arguments(&mut self, arguments: Vec<String>) {
        self.dart_entrypoint_arguments = arguments;
    }
}

impl Default for DartProject {
    fn default() -> Self {
        Self::new(project::DATA_DIR)
    }
}

/// Converts a full process argument vector into entrypoint arguments.
///
/// The first element (the program name) is dropped. Every other argument is
/// kept in order; arguments that are not valid Unicode are converted lossily
/// so the count never changes.
pub fn entrypoint_arguments<I, S>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    args.into_iter()
        .skip(1)
        .map(|arg| arg.into().to_string_lossy().into_owned())
        .collect()
}
