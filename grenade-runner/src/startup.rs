//! Startup sequence of the primary instance.
//!
//! Once the guard has made this process the primary, the runner prepares the
//! process environment, builds the engine window and pumps native messages
//! until a quit request arrives. The environment itself (console, COM, the
//! engine window, the message loop) is supplied by a [`Host`].

use log::{debug, error, info};

use crate::Result;
use crate::config::RunnerConfig;
use crate::models::{ExitStatus, WindowSpec};
use crate::project::{DartProject, entrypoint_arguments};

/// The application window hosting the engine view.
pub trait AppWindow {
    /// When enabled, closing the window ends the message loop.
    fn set_quit_on_close(&mut self, quit_on_close: bool);
}

/// Process environment and windowing services used by the primary instance.
pub trait Host {
    /// Keeps the COM apartment alive; dropping it uninitializes COM.
    type Apartment;
    type Window: AppWindow;

    /// Attaches to the parent console, or creates one when a debugger is
    /// present. Returns whether a console is now available.
    fn attach_console(&self) -> bool;

    /// Enters a single-threaded COM apartment for the calling thread.
    fn initialize_com(&self) -> Self::Apartment;

    /// Creates the application window for `project` and shows it.
    fn create_window(&self, project: DartProject, spec: &WindowSpec) -> Result<Self::Window>;

    /// Retrieves and dispatches messages until a quit message is received.
    fn run_message_loop(&self) -> Result<()>;
}

impl<T: Host + ?Sized> Host for &T {
    type Apartment = T::Apartment;
    type Window = T::Window;

    fn attach_console(&self) -> bool {
        (**self).attach_console()
    }

    fn initialize_com(&self) -> Self::Apartment {
        (**self).initialize_com()
    }

    fn create_window(&self, project: DartProject, spec: &WindowSpec) -> Result<Self::Window> {
        (**self).create_window(project, spec)
    }

    fn run_message_loop(&self) -> Result<()> {
        (**self).run_message_loop()
    }
}

/// Runs the primary instance to completion.
///
/// `lock` is the single-instance handle won by the guard. It is released after
/// COM is torn down, on every return path.
pub fn run_primary<H, L, I, S>(host: &H, config: &RunnerConfig, lock: L, args: I) -> ExitStatus
where
    H: Host + ?Sized,
    I: IntoIterator<Item = S>,
    S: Into<std::ffi::OsString>,
{
    if host.attach_console() {
        debug!("Console attached");
    }

    let apartment = host.initialize_com();

    let mut project = DartProject::new(&config.data_dir);
    project.set_dart_entrypoint_arguments(entrypoint_arguments(args));
    debug!(
        "Dart entrypoint arguments: {:?}",
        project.dart_entrypoint_arguments()
    );

    let status = match host.create_window(project, &config.window) {
        Ok(mut window) => {
            window.set_quit_on_close(true);
            info!("Window {:?} created", config.window.title);

            let status = match host.run_message_loop() {
                Ok(()) => ExitStatus::Success,
                Err(e) => {
                    error!("{e}");
                    ExitStatus::Failure
                }
            };
            drop(window);
            status
        }
        Err(e) => {
            error!("{e}");
            ExitStatus::Failure
        }
    };

    drop(apartment);
    drop(lock);
    debug!("Released single-instance lock");

    status
}
