use log::debug;

use crate::Result;
use crate::models::{RunnerError, WindowHandle, WindowQuery, WindowSpec};
use crate::project::DartProject;
use crate::startup::{AppWindow, Host};
use crate::windowing::{WindowLocator, WindowMessenger};

/// A desktop with no native top-level windows.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDesktop;

impl WindowLocator for NoDesktop {
    fn find_window(&self, _query: &WindowQuery) -> Option<WindowHandle> {
        None
    }
}

impl WindowMessenger for NoDesktop {
    fn post_message(&self, _window: WindowHandle, _message: u32) -> Result<()> {
        Err(RunnerError::Unsupported("window messages"))
    }
}

/// Host without a native windowing system.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessHost;

/// Never constructed: the headless host cannot create windows.
#[derive(Debug)]
pub enum HeadlessWindow {}

impl AppWindow for HeadlessWindow {
    fn set_quit_on_close(&mut self, _quit_on_close: bool) {
        match *self {}
    }
}

impl Host for HeadlessHost {
    type Apartment = ();
    type Window = HeadlessWindow;

    fn attach_console(&self) -> bool {
        // Standard streams are already inherited.
        true
    }

    fn initialize_com(&self) {
        debug!("No COM on this platform");
    }

    fn create_window(&self, _project: DartProject, _spec: &WindowSpec) -> Result<HeadlessWindow> {
        Err(RunnerError::Unsupported("native application windows"))
    }

    fn run_message_loop(&self) -> Result<()> {
        Err(RunnerError::Unsupported("native message loop"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_desktop_finds_nothing() {
        let query = WindowQuery::new("FLUTTER_RUNNER_WIN32_WINDOW", "Grenade Helper");
        assert_eq!(NoDesktop.find_window(&query), None);
    }

    #[test]
    fn headless_host_cannot_create_windows() {
        let result = HeadlessHost.create_window(DartProject::default(), &WindowSpec::default());
        assert!(matches!(result, Err(RunnerError::Unsupported(_))));
    }
}
