use windows::Win32::Foundation::{BOOL, FALSE, HWND, LPARAM, TRUE, WPARAM};
use windows::Win32::UI::WindowsAndMessaging::{
    EnumWindows, GetClassNameW, GetWindowTextW, PostMessageW,
};

use super::{to_hwnd, to_window_handle};
use crate::Result;
use crate::constants::text;
use crate::models::{RunnerError, WindowHandle, WindowQuery};
use crate::windowing::{WindowLocator, WindowMessenger, decode_window_text};

/// The interactive desktop of the current session.
#[derive(Debug, Clone, Copy, Default)]
pub struct Desktop;

struct Search<'a> {
    query: &'a WindowQuery,
    found: Option<HWND>,
}

fn read_text(read: impl FnOnce(&mut [u16]) -> i32) -> Option<String> {
    let mut buffer = [0u16; text::BUFFER_LEN];
    let len = read(&mut buffer);
    decode_window_text(&buffer, usize::try_from(len).unwrap_or(0))
}

unsafe extern "system" fn match_window(hwnd: HWND, lparam: LPARAM) -> BOOL {
    // SAFETY: `lparam` is the `Search` passed by `find_window`, alive for the
    // whole enumeration.
    let search = unsafe { &mut *(lparam.0 as *mut Search<'_>) };

    let Some(class_name) = read_text(|buf| unsafe { GetClassNameW(hwnd, buf) }) else {
        return TRUE;
    };
    let Some(title) = read_text(|buf| unsafe { GetWindowTextW(hwnd, buf) }) else {
        return TRUE;
    };

    if search.query.matches(Some(&class_name), Some(&title)) {
        search.found = Some(hwnd);
        return FALSE;
    }
    TRUE
}

impl WindowLocator for Desktop {
    fn find_window(&self, query: &WindowQuery) -> Option<WindowHandle> {
        let mut search = Search { query, found: None };

        // EnumWindows reports failure when the callback stops it early, so
        // the result says nothing about whether a window was found.
        // SAFETY: `search` outlives the enumeration.
        let _ = unsafe {
            EnumWindows(
                Some(match_window),
                LPARAM(&mut search as *mut Search<'_> as isize),
            )
        };

        search.found.map(to_window_handle)
    }
}

impl WindowMessenger for Desktop {
    fn post_message(&self, window: WindowHandle, message: u32) -> Result<()> {
        // SAFETY: posting to a stale handle fails cleanly.
        unsafe { PostMessageW(to_hwnd(window), message, WPARAM(0), LPARAM(0)) }.map_err(|e| {
            RunnerError::PostMessage {
                window,
                message,
                reason: e.to_string(),
            }
        })
    }
}
