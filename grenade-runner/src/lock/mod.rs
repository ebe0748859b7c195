//! Cross-process named locks.
//!
//! A named lock is used purely as an ownership claim between independent
//! processes: the first process to create it becomes the primary instance and
//! every later one observes that it already exists. Releasing happens when the
//! handle is dropped, so each handle is released exactly once.

mod file_lock;

pub use file_lock::{FileLock, FileLockHandle};

use crate::Result;

/// Result of creating or opening a named lock.
#[derive(Debug)]
pub enum LockAcquisition<H> {
    /// This call created the lock; the caller owns it.
    Created(H),
    /// The lock already existed; another process owns it.
    AlreadyHeld(H),
}

impl<H> LockAcquisition<H> {
    pub fn is_created(&self) -> bool {
        matches!(self, LockAcquisition::Created(_))
    }

    pub fn into_handle(self) -> H {
        match self {
            LockAcquisition::Created(handle) | LockAcquisition::AlreadyHeld(handle) => handle,
        }
    }
}

/// A primitive that can claim a system-wide name.
pub trait NamedLock {
    /// Open handle to the lock object. Dropping it releases the lock.
    type Handle;

    /// Creates or opens the lock identified by `name`.
    ///
    /// # Errors
    ///
    /// Returns `RunnerError::LockCreate` if the object could not be created or
    /// opened at all. An existing lock is not an error.
    fn acquire(&self, name: &str) -> Result<LockAcquisition<Self::Handle>>;
}

impl<L: NamedLock + ?Sized> NamedLock for &L {
    type Handle = L::Handle;

    fn acquire(&self, name: &str) -> Result<LockAcquisition<Self::Handle>> {
        (**self).acquire(name)
    }
}
