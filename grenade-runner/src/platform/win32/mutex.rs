use log::debug;
use windows::Win32::Foundation::{CloseHandle, ERROR_ALREADY_EXISTS, GetLastError, HANDLE};
use windows::Win32::System::Threading::CreateMutexW;
use windows::core::PCWSTR;

use super::to_wide;
use crate::Result;
use crate::lock::{LockAcquisition, NamedLock};
use crate::models::RunnerError;

/// Named lock backed by a Win32 named mutex.
///
/// Names prefixed with `Global\` are visible across all sessions.
#[derive(Debug, Clone, Copy, Default)]
pub struct MutexLock;

impl NamedLock for MutexLock {
    type Handle = MutexHandle;

    fn acquire(&self, name: &str) -> Result<LockAcquisition<MutexHandle>> {
        let wide_name = to_wide(name);

        // SAFETY: `wide_name` is NUL-terminated and outlives the call.
        let handle = unsafe { CreateMutexW(None, true, PCWSTR(wide_name.as_ptr())) }.map_err(
            |e| RunnerError::LockCreate {
                name: name.to_string(),
                reason: e.to_string(),
            },
        )?;

        // Nothing may run between CreateMutexW and this read of the last error.
        let already_exists = unsafe { GetLastError() } == ERROR_ALREADY_EXISTS;
        let handle = MutexHandle(handle);

        if already_exists {
            debug!("Mutex {name} already exists");
            Ok(LockAcquisition::AlreadyHeld(handle))
        } else {
            debug!("Created mutex {name}");
            Ok(LockAcquisition::Created(handle))
        }
    }
}

/// Open handle to a named mutex, closed on drop.
#[derive(Debug)]
pub struct MutexHandle(HANDLE);

impl Drop for MutexHandle {
    fn drop(&mut self) {
        // SAFETY: the handle came from CreateMutexW and is closed only here.
        unsafe {
            let _ = CloseHandle(self.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unique_name(tag: &str) -> String {
        format!(r"Local\GrenadeRunnerTest_{tag}_{}", std::process::id())
    }

    #[test]
    fn first_acquire_creates_and_second_sees_it() {
        let name = unique_name("exists");

        let first = MutexLock.acquire(&name).unwrap();
        assert!(first.is_created());

        let second = MutexLock.acquire(&name).unwrap();
        assert!(!second.is_created());
    }

    #[test]
    fn closing_every_handle_frees_the_name() {
        let name = unique_name("freed");

        let first = MutexLock.acquire(&name).unwrap();
        drop(first);

        assert!(MutexLock.acquire(&name).unwrap().is_created());
    }
}
