//! In-memory stand-ins for the native lock, desktop and host.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use grenade_runner::{
    AppWindow, DartProject, Host, LockAcquisition, NamedLock, RunnerError, WindowHandle,
    WindowLocator, WindowMessenger, WindowProbe, WindowQuery, WindowSpec, first_match,
};

/// Ordered record of side effects, shared between fakes.
#[derive(Debug, Clone, Default)]
pub struct Events(Arc<Mutex<Vec<String>>>);

impl Events {
    pub fn push(&self, event: impl Into<String>) {
        self.0.lock().unwrap().push(event.into());
    }

    pub fn all(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self, event: &str) -> usize {
        self.0.lock().unwrap().iter().filter(|e| *e == event).count()
    }
}

/// Named locks living in one shared table, like kernel objects in a session.
#[derive(Debug, Clone, Default)]
pub struct FakeLocks {
    held: Arc<Mutex<HashSet<String>>>,
    events: Events,
    fail: bool,
}

impl FakeLocks {
    pub fn new(events: Events) -> Self {
        Self {
            events,
            ..Self::default()
        }
    }

    pub fn failing(events: Events) -> Self {
        Self {
            fail: true,
            ..Self::new(events)
        }
    }

    pub fn is_held(&self, name: &str) -> bool {
        self.held.lock().unwrap().contains(name)
    }
}

#[derive(Debug)]
pub struct FakeLockHandle {
    name: String,
    owner: bool,
    held: Arc<Mutex<HashSet<String>>>,
    events: Events,
}

impl Drop for FakeLockHandle {
    fn drop(&mut self) {
        if self.owner {
            self.held.lock().unwrap().remove(&self.name);
            self.events.push("lock_released");
        } else {
            self.events.push("lock_closed");
        }
    }
}

impl NamedLock for FakeLocks {
    type Handle = FakeLockHandle;

    fn acquire(&self, name: &str) -> grenade_runner::Result<LockAcquisition<FakeLockHandle>> {
        if self.fail {
            return Err(RunnerError::LockCreate {
                name: name.to_string(),
                reason: "out of handles".to_string(),
            });
        }

        let created = self.held.lock().unwrap().insert(name.to_string());
        let handle = FakeLockHandle {
            name: name.to_string(),
            owner: created,
            held: Arc::clone(&self.held),
            events: self.events.clone(),
        };

        Ok(if created {
            LockAcquisition::Created(handle)
        } else {
            LockAcquisition::AlreadyHeld(handle)
        })
    }
}

/// Top-level windows of the session plus every message posted to them.
#[derive(Debug, Default)]
pub struct FakeDesktop {
    windows: Mutex<Vec<WindowProbe>>,
    posted: Mutex<Vec<(WindowHandle, u32)>>,
    fail_posts: bool,
}

impl FakeDesktop {
    pub fn with_windows(windows: Vec<WindowProbe>) -> Self {
        Self {
            windows: Mutex::new(windows),
            ..Self::default()
        }
    }

    pub fn rejecting_posts(windows: Vec<WindowProbe>) -> Self {
        Self {
            fail_posts: true,
            ..Self::with_windows(windows)
        }
    }

    pub fn open(&self, probe: WindowProbe) {
        self.windows.lock().unwrap().push(probe);
    }

    pub fn window_count(&self) -> usize {
        self.windows.lock().unwrap().len()
    }

    pub fn posted(&self) -> Vec<(WindowHandle, u32)> {
        self.posted.lock().unwrap().clone()
    }
}

impl WindowLocator for FakeDesktop {
    fn find_window(&self, query: &WindowQuery) -> Option<WindowHandle> {
        first_match(self.windows.lock().unwrap().clone(), query)
    }
}

impl WindowMessenger for FakeDesktop {
    fn post_message(&self, window: WindowHandle, message: u32) -> grenade_runner::Result<()> {
        if self.fail_posts {
            return Err(RunnerError::PostMessage {
                window,
                message,
                reason: "queue full".to_string(),
            });
        }
        self.posted.lock().unwrap().push((window, message));
        Ok(())
    }
}

/// Host that records every startup step instead of touching the OS.
#[derive(Debug)]
pub struct FakeHost {
    pub events: Events,
    pub desktop: Option<Arc<FakeDesktop>>,
    pub window_class: String,
    pub fail_window: bool,
    pub fail_loop: bool,
    pub console_available: bool,
    pub project: Mutex<Option<DartProject>>,
    next_handle: Mutex<isize>,
}

impl FakeHost {
    pub fn new(events: Events) -> Self {
        Self {
            events,
            desktop: None,
            window_class: "FLUTTER_RUNNER_WIN32_WINDOW".to_string(),
            fail_window: false,
            fail_loop: false,
            console_available: false,
            project: Mutex::new(None),
            next_handle: Mutex::new(0x100),
        }
    }

    /// Windows created by this host become visible on `desktop`.
    pub fn on_desktop(mut self, desktop: Arc<FakeDesktop>) -> Self {
        self.desktop = Some(desktop);
        self
    }

    pub fn project(&self) -> Option<DartProject> {
        self.project.lock().unwrap().clone()
    }
}

pub struct FakeApartment(Events);

impl Drop for FakeApartment {
    fn drop(&mut self) {
        self.0.push("com_uninit");
    }
}

pub struct FakeWindow {
    pub handle: WindowHandle,
    events: Events,
}

impl AppWindow for FakeWindow {
    fn set_quit_on_close(&mut self, quit_on_close: bool) {
        self.events.push(format!("quit_on_close={quit_on_close}"));
    }
}

impl Drop for FakeWindow {
    fn drop(&mut self) {
        self.events.push("window_destroyed");
    }
}

impl Host for FakeHost {
    type Apartment = FakeApartment;
    type Window = FakeWindow;

    fn attach_console(&self) -> bool {
        self.events.push("console");
        self.console_available
    }

    fn initialize_com(&self) -> FakeApartment {
        self.events.push("com_init");
        FakeApartment(self.events.clone())
    }

    fn create_window(
        &self,
        project: DartProject,
        spec: &WindowSpec,
    ) -> grenade_runner::Result<FakeWindow> {
        *self.project.lock().unwrap() = Some(project);

        if self.fail_window {
            self.events.push("window_failed");
            return Err(RunnerError::WindowCreate {
                title: spec.title.clone(),
                reason: "no desktop".to_string(),
            });
        }

        let handle = {
            let mut next = self.next_handle.lock().unwrap();
            *next += 1;
            WindowHandle(*next)
        };
        if let Some(desktop) = &self.desktop {
            desktop.open(WindowProbe::new(
                handle,
                Some(&self.window_class),
                Some(&spec.title),
            ));
        }
        self.events.push("window_created");

        Ok(FakeWindow {
            handle,
            events: self.events.clone(),
        })
    }

    fn run_message_loop(&self) -> grenade_runner::Result<()> {
        self.events.push("message_loop");
        if self.fail_loop {
            return Err(RunnerError::MessageLoop("invalid message".to_string()));
        }
        Ok(())
    }
}
