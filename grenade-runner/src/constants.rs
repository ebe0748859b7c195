//! Fixed identifiers and numeric values shared by both instances.
//!
//! The lock name, window class and window title must match exactly between
//! the primary and any later launch. Renaming the application means updating
//! all three together.

/// Names identifying the running application across processes.
pub mod identity {
    pub const LOCK_NAME: &str = r"Global\GrenadeHelper_SingleInstance_Mutex";
    pub const WINDOW_CLASS: &str = "FLUTTER_RUNNER_WIN32_WINDOW";
    pub const WINDOW_TITLE: &str = "Grenade Helper";
}

/// Initial window placement, in physical pixels.
pub mod geometry {
    pub const ORIGIN_X: i32 = 10;
    pub const ORIGIN_Y: i32 = 10;
    pub const WIDTH: u32 = 1280;
    pub const HEIGHT: u32 = 720;
}

/// Custom window messages.
pub mod messages {
    /// `WM_APP`, the start of the application-private message range.
    pub const WM_APP: u32 = 0x8000;

    /// Asks the primary window to restore itself and take the foreground.
    pub const WM_SHOW_ME: u32 = WM_APP + 1;
}

/// Bounded text reads during window enumeration.
pub mod text {
    /// Buffer length in UTF-16 units, terminator included.
    pub const BUFFER_LEN: usize = 256;
}

/// Engine project layout, relative to the executable directory.
pub mod project {
    pub const DATA_DIR: &str = "data";
    pub const ASSETS_DIR: &str = "flutter_assets";
    pub const ICU_DATA_FILE: &str = "icudtl.dat";
    pub const AOT_LIBRARY_FILE: &str = "app.so";
}

/// Process exit codes.
pub mod exit_code {
    pub const SUCCESS: u8 = 0;
    pub const FAILURE: u8 = 1;
}
