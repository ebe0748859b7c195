use log::{debug, warn};
use windows::Win32::System::Com::{COINIT_APARTMENTTHREADED, CoInitializeEx, CoUninitialize};
use windows::Win32::System::Console::{ATTACH_PARENT_PROCESS, AllocConsole, AttachConsole};
use windows::Win32::System::Diagnostics::Debug::IsDebuggerPresent;
use windows::Win32::UI::WindowsAndMessaging::{DispatchMessageW, GetMessageW, MSG, TranslateMessage};

use super::window::NativeWindow;
use crate::Result;
use crate::models::{RunnerError, WindowSpec};
use crate::project::DartProject;
use crate::startup::Host;

/// Win32 process environment for the primary instance.
#[derive(Debug, Clone)]
pub struct Win32Host {
    window_class: String,
}

impl Win32Host {
    /// `window_class` is registered for the application window; secondary
    /// instances search for it.
    pub fn new(window_class: impl Into<String>) -> Self {
        Self {
            window_class: window_class.into(),
        }
    }
}

/// Single-threaded COM apartment of the calling thread.
#[derive(Debug)]
pub struct ComApartment {
    initialized: bool,
}

impl Drop for ComApartment {
    fn drop(&mut self) {
        if self.initialized {
            // SAFETY: balanced with the successful CoInitializeEx.
            unsafe { CoUninitialize() };
            debug!("COM uninitialized");
        }
    }
}

impl Host for Win32Host {
    type Apartment = ComApartment;
    type Window = NativeWindow;

    fn attach_console(&self) -> bool {
        // SAFETY: none of these calls take pointers.
        unsafe {
            if AttachConsole(ATTACH_PARENT_PROCESS).is_ok() {
                return true;
            }
            if !IsDebuggerPresent().as_bool() {
                return false;
            }
            match AllocConsole() {
                Ok(()) => true,
                Err(e) => {
                    debug!("AllocConsole failed: {e}");
                    false
                }
            }
        }
    }

    fn initialize_com(&self) -> ComApartment {
        // SAFETY: no reserved pointer is passed.
        let hr = unsafe { CoInitializeEx(None, COINIT_APARTMENTTHREADED) };
        if hr.is_err() {
            warn!(
                "CoInitializeEx failed: {}",
                windows::core::Error::from(hr)
            );
        }
        ComApartment {
            initialized: hr.is_ok(),
        }
    }

    fn create_window(&self, project: DartProject, spec: &WindowSpec) -> Result<NativeWindow> {
        NativeWindow::create(project, &self.window_class, spec)
    }

    fn run_message_loop(&self) -> Result<()> {
        let mut msg = MSG::default();
        loop {
            // SAFETY: `msg` is a valid out-parameter for the whole loop.
            let ret = unsafe { GetMessageW(&mut msg, None, 0, 0) };
            match ret.0 {
                0 => {
                    debug!("Received WM_QUIT");
                    return Ok(());
                }
                -1 => {
                    return Err(RunnerError::MessageLoop(
                        windows::core::Error::from_win32().to_string(),
                    ));
                }
                _ => unsafe {
                    let _ = TranslateMessage(&msg);
                    DispatchMessageW(&msg);
                },
            }
        }
    }
}
