//! Win32 backends: named mutex, window enumeration, COM, console and the
//! native application window.
#![allow(unsafe_code)]

mod desktop;
mod host;
mod mutex;
mod window;

pub use desktop::Desktop;
pub use host::{ComApartment, Win32Host};
pub use mutex::{MutexHandle, MutexLock};
pub use window::NativeWindow;

use std::ffi::c_void;

use windows::Win32::Foundation::HWND;

use crate::models::WindowHandle;

/// Encodes `s` as a NUL-terminated UTF-16 string.
pub(crate) fn to_wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

pub(crate) fn to_window_handle(hwnd: HWND) -> WindowHandle {
    WindowHandle(hwnd.0 as isize)
}

pub(crate) fn to_hwnd(window: WindowHandle) -> HWND {
    HWND(window.0 as *mut c_void)
}
