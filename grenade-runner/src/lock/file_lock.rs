use fs2::FileExt;
use log::debug;
use std::fs::File;
use std::path::{Path, PathBuf};

use crate::Result;
use crate::lock::{LockAcquisition, NamedLock};
use crate::models::RunnerError;

/// Named lock backed by an exclusive advisory lock on a file.
///
/// Used where no named kernel mutex exists. Lock files live in the local data
/// directory, falling back to the temp directory.
#[derive(Debug, Clone)]
pub struct FileLock {
    dir: PathBuf,
}

impl FileLock {
    pub fn new() -> Self {
        Self::in_dir(dirs::data_local_dir().unwrap_or(std::env::temp_dir()))
    }

    /// Places lock files in `dir` instead of the default location.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the lock file used for `name`.
    ///
    /// Namespace prefixes such as `Global\` are dropped and any character that
    /// is not safe in a file name is replaced with `_`.
    pub fn lock_path(&self, name: &str) -> PathBuf {
        let bare = name
            .strip_prefix(r"Global\")
            .or_else(|| name.strip_prefix(r"Local\"))
            .unwrap_or(name);

        let mut file_name: String = bare
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        file_name.push_str(".lock");

        self.dir.join(file_name)
    }
}

impl Default for FileLock {
    fn default() -> Self {
        Self::new()
    }
}

impl NamedLock for FileLock {
    type Handle = FileLockHandle;

    fn acquire(&self, name: &str) -> Result<LockAcquisition<FileLockHandle>> {
        let lock_path = self.lock_path(name);
        let lock_create = |reason: String| RunnerError::LockCreate {
            name: name.to_string(),
            reason,
        };

        std::fs::create_dir_all(&self.dir)
            .map_err(|e| lock_create(format!("{}: {e}", self.dir.display())))?;

        let file = File::create(&lock_path)
            .map_err(|e| lock_create(format!("{}: {e}", lock_path.display())))?;

        match file.try_lock_exclusive() {
            Ok(()) => {
                debug!("Acquired lock file {}", lock_path.display());
                Ok(LockAcquisition::Created(FileLockHandle {
                    file,
                    path: lock_path,
                    owned: true,
                }))
            }
            Err(e) if e.raw_os_error() == fs2::lock_contended_error().raw_os_error() => {
                debug!("Lock file {} is held elsewhere", lock_path.display());
                Ok(LockAcquisition::AlreadyHeld(FileLockHandle {
                    file,
                    path: lock_path,
                    owned: false,
                }))
            }
            Err(e) => Err(lock_create(format!("{}: {e}", lock_path.display()))),
        }
    }
}

/// Open lock file. The exclusive lock, if owned, is dropped with the handle.
#[derive(Debug)]
pub struct FileLockHandle {
    file: File,
    path: PathBuf,
    owned: bool,
}

impl FileLockHandle {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_owner(&self) -> bool {
        self.owned
    }
}

impl Drop for FileLockHandle {
    fn drop(&mut self) {
        if self.owned {
            let _ = FileExt::unlock(&self.file);
            debug!("Released lock file {}", self.path.display());
        }
    }
}
