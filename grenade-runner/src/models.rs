use std::fmt;
use std::process::ExitCode;

use thiserror::Error;

use crate::constants::{exit_code, geometry, identity};

/// The names that tie the primary and secondary instances together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppIdentity {
    /// Name of the cross-process lock object.
    pub lock_name: String,
    /// Native class name of the primary's top-level window.
    pub window_class: String,
    /// Title of the primary's top-level window.
    pub window_title: String,
}

impl AppIdentity {
    pub fn new(
        lock_name: impl Into<String>,
        window_class: impl Into<String>,
        window_title: impl Into<String>,
    ) -> Self {
        Self {
            lock_name: lock_name.into(),
            window_class: window_class.into(),
            window_title: window_title.into(),
        }
    }

    /// The query a secondary instance uses to find the primary's window.
    pub fn window_query(&self) -> WindowQuery {
        WindowQuery::new(&self.window_class, &self.window_title)
    }
}

impl Default for AppIdentity {
    fn default() -> Self {
        Self::new(
            identity::LOCK_NAME,
            identity::WINDOW_CLASS,
            identity::WINDOW_TITLE,
        )
    }
}

/// Opaque, platform-neutral handle to a native top-level window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle(pub isize);

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Exact-match criteria for locating a top-level window.
///
/// Both the class name and the title must be equal, byte for byte, to the
/// candidate's values. There is no case folding or trimming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowQuery {
    pub class_name: String,
    pub title: String,
}

impl WindowQuery {
    pub fn new(class_name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            title: title.into(),
        }
    }

    /// Returns whether a window with the given class name and title matches.
    ///
    /// `None` stands for a failed read and never matches.
    pub fn matches(&self, class_name: Option<&str>, title: Option<&str>) -> bool {
        match (class_name, title) {
            (Some(class_name), Some(title)) => class_name == self.class_name && title == self.title,
            _ => false,
        }
    }
}

/// One enumerated top-level window, as read by a locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowProbe {
    pub handle: WindowHandle,
    /// `None` when the class name could not be read.
    pub class_name: Option<String>,
    /// `None` when the title could not be read.
    pub title: Option<String>,
}

impl WindowProbe {
    pub fn new(handle: WindowHandle, class_name: Option<&str>, title: Option<&str>) -> Self {
        Self {
            handle,
            class_name: class_name.map(str::to_owned),
            title: title.map(str::to_owned),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Title and initial placement of the application window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowSpec {
    pub title: String,
    pub origin: Point,
    pub size: Size,
}

impl Default for WindowSpec {
    fn default() -> Self {
        Self {
            title: identity::WINDOW_TITLE.to_string(),
            origin: Point::new(geometry::ORIGIN_X, geometry::ORIGIN_Y),
            size: Size::new(geometry::WIDTH, geometry::HEIGHT),
        }
    }
}

/// Outcome of the single-instance check.
#[derive(Debug)]
pub enum InstanceRole<H> {
    /// This process owns the lock. The handle must be kept alive until
    /// shutdown; dropping it releases the lock.
    Primary(H),
    /// Another process owns the lock. The handle has already been released.
    Secondary {
        /// Whether a matching window was found and the notification posted.
        notified: bool,
    },
}

impl<H> InstanceRole<H> {
    pub fn is_primary(&self) -> bool {
        matches!(self, InstanceRole::Primary(_))
    }
}

/// Final status of the runner, mapped onto the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
}

impl ExitStatus {
    pub fn code(self) -> u8 {
        match self {
            ExitStatus::Success => exit_code::SUCCESS,
            ExitStatus::Failure => exit_code::FAILURE,
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status.code())
    }
}

/// Errors that can occur while starting or running the native runner.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// The named lock object could not be created or opened at all.
    #[error("failed to create named lock `{name}`: {reason}")]
    LockCreate { name: String, reason: String },

    /// The application window could not be created.
    #[error("failed to create window `{title}`: {reason}")]
    WindowCreate { title: String, reason: String },

    /// A window message could not be posted.
    #[error("failed to post message {message:#x} to window {window}: {reason}")]
    PostMessage {
        window: WindowHandle,
        message: u32,
        reason: String,
    },

    /// Message retrieval reported an error.
    #[error("message loop failed: {0}")]
    MessageLoop(String),

    /// The operation has no implementation on this platform.
    #[error("not supported on this platform: {0}")]
    Unsupported(&'static str),

    /// A Win32 call failed.
    #[cfg(windows)]
    #[error("Win32 error: {0}")]
    Win32(#[from] windows::core::Error),
}
