//! Single-instance enforcement.
//!
//! The first process to create the named lock becomes the primary instance and
//! keeps the lock for its whole lifetime. Any later launch finds the lock
//! already present, asks the primary's window to show itself, releases its own
//! handle and reports [`InstanceRole::Secondary`] so the caller can exit.
//!
//! The notification is a single posted message. There is no acknowledgment,
//! no timeout and no retry; if the primary has not created its window yet, the
//! secondary exits without notifying anyone.

use log::{debug, info, warn};

use crate::Result;
use crate::constants::messages::WM_SHOW_ME;
use crate::lock::{LockAcquisition, NamedLock};
use crate::models::{AppIdentity, InstanceRole};
use crate::windowing::{WindowLocator, WindowMessenger};

/// Decides whether this process is the primary instance.
#[derive(Debug, Clone)]
pub struct SingleInstanceGuard {
    identity: AppIdentity,
}

impl SingleInstanceGuard {
    pub fn new(identity: AppIdentity) -> Self {
        Self { identity }
    }

    /// Claims the named lock, or notifies the existing primary instance.
    ///
    /// On [`InstanceRole::Primary`] the returned handle holds the lock; drop it
    /// at shutdown. On [`InstanceRole::Secondary`] the handle has already been
    /// released and `notified` tells whether the primary's window was found
    /// and the show request posted.
    ///
    /// # Errors
    ///
    /// Returns `RunnerError::LockCreate` if the lock object could not be
    /// created or opened. A failed notification is not an error.
    pub fn acquire_or_notify<L, W, M>(
        &self,
        lock: &L,
        locator: &W,
        messenger: &M,
    ) -> Result<InstanceRole<L::Handle>>
    where
        L: NamedLock + ?Sized,
        W: WindowLocator + ?Sized,
        M: WindowMessenger + ?Sized,
    {
        let handle = match lock.acquire(&self.identity.lock_name)? {
            LockAcquisition::Created(handle) => {
                info!("Acquired single-instance lock {}", self.identity.lock_name);
                return Ok(InstanceRole::Primary(handle));
            }
            LockAcquisition::AlreadyHeld(handle) => handle,
        };

        info!("Another instance is already running");
        let notified = self.notify_primary(locator, messenger);

        drop(handle);
        debug!("Released single-instance lock handle");

        Ok(InstanceRole::Secondary { notified })
    }

    fn notify_primary<W, M>(&self, locator: &W, messenger: &M) -> bool
    where
        W: WindowLocator + ?Sized,
        M: WindowMessenger + ?Sized,
    {
        let query = self.identity.window_query();
        let Some(window) = locator.find_window(&query) else {
            debug!(
                "No window with class {:?} and title {:?}",
                query.class_name, query.title
            );
            return false;
        };

        match messenger.post_message(window, WM_SHOW_ME) {
            Ok(()) => {
                debug!("Posted show request to window {window}");
                true
            }
            Err(e) => {
                warn!("Failed to notify primary instance: {e}");
                false
            }
        }
    }
}

impl Default for SingleInstanceGuard {
    fn default() -> Self {
        Self::new(AppIdentity::default())
    }
}
