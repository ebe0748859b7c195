use std::sync::atomic::{AtomicBool, Ordering};

use log::debug;
use windows::Win32::Foundation::{
    ERROR_CLASS_ALREADY_EXISTS, HINSTANCE, HWND, LPARAM, LRESULT, WPARAM,
};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::WindowsAndMessaging::{
    CS_HREDRAW, CS_VREDRAW, CreateWindowExW, DefWindowProcW, DestroyWindow, IDC_ARROW, IsIconic,
    IsWindow, IsWindowVisible, LoadCursorW, PostQuitMessage, RegisterClassW, SW_RESTORE,
    SetForegroundWindow, ShowWindow, WINDOW_EX_STYLE, WM_DESTROY, WNDCLASSW, WS_OVERLAPPEDWINDOW,
    WS_VISIBLE,
};
use windows::core::PCWSTR;

use super::to_wide;
use crate::Result;
use crate::constants::messages::WM_SHOW_ME;
use crate::models::{RunnerError, WindowSpec};
use crate::project::DartProject;
use crate::startup::AppWindow;

// One application window per process.
static QUIT_ON_CLOSE: AtomicBool = AtomicBool::new(false);

/// Top-level window that hosts the engine view.
#[derive(Debug)]
pub struct NativeWindow {
    hwnd: HWND,
}

impl NativeWindow {
    pub(crate) fn create(project: DartProject, class_name: &str, spec: &WindowSpec) -> Result<Self> {
        let window_create = |e: windows::core::Error| RunnerError::WindowCreate {
            title: spec.title.clone(),
            reason: e.to_string(),
        };

        let class_wide = to_wide(class_name);
        let title_wide = to_wide(&spec.title);

        // SAFETY: the class and title buffers stay alive until CreateWindowExW
        // returns, and `window_proc` matches WNDPROC.
        unsafe {
            let instance: HINSTANCE = GetModuleHandleW(None).map_err(window_create)?.into();

            let class = WNDCLASSW {
                style: CS_HREDRAW | CS_VREDRAW,
                lpfnWndProc: Some(window_proc),
                hInstance: instance,
                hCursor: LoadCursorW(None, IDC_ARROW).map_err(window_create)?,
                lpszClassName: PCWSTR(class_wide.as_ptr()),
                ..Default::default()
            };

            if RegisterClassW(&class) == 0 {
                let e = windows::core::Error::from_win32();
                if e.code() != ERROR_CLASS_ALREADY_EXISTS.to_hresult() {
                    return Err(window_create(e));
                }
            }

            let hwnd = CreateWindowExW(
                WINDOW_EX_STYLE::default(),
                PCWSTR(class_wide.as_ptr()),
                PCWSTR(title_wide.as_ptr()),
                WS_OVERLAPPEDWINDOW | WS_VISIBLE,
                spec.origin.x,
                spec.origin.y,
                i32::try_from(spec.size.width).unwrap_or(i32::MAX),
                i32::try_from(spec.size.height).unwrap_or(i32::MAX),
                None,
                None,
                instance,
                None,
            )
            .map_err(window_create)?;

            debug!(
                "Created window {:?} for assets at {}",
                spec.title,
                project.assets_path().display()
            );

            Ok(Self { hwnd })
        }
    }

}

impl AppWindow for NativeWindow {
    fn set_quit_on_close(&mut self, quit_on_close: bool) {
        QUIT_ON_CLOSE.store(quit_on_close, Ordering::Relaxed);
    }
}

impl Drop for NativeWindow {
    fn drop(&mut self) {
        QUIT_ON_CLOSE.store(false, Ordering::Relaxed);
        // SAFETY: IsWindow tolerates handles that were already destroyed.
        unsafe {
            if IsWindow(self.hwnd).as_bool() {
                let _ = DestroyWindow(self.hwnd);
            }
        }
    }
}

extern "system" fn window_proc(hwnd: HWND, message: u32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    match message {
        WM_SHOW_ME => {
            debug!("Show request from another instance");
            // SAFETY: `hwnd` is the window this procedure was called for.
            unsafe {
                if IsIconic(hwnd).as_bool() || !IsWindowVisible(hwnd).as_bool() {
                    let _ = ShowWindow(hwnd, SW_RESTORE);
                }
                let _ = SetForegroundWindow(hwnd);
            }
            LRESULT(0)
        }
        WM_DESTROY => {
            if QUIT_ON_CLOSE.load(Ordering::Relaxed) {
                // SAFETY: no arguments beyond the exit code.
                unsafe { PostQuitMessage(0) };
            }
            LRESULT(0)
        }
        // SAFETY: forwards the arguments Windows passed in.
        _ => unsafe { DefWindowProcW(hwnd, message, wparam, lparam) },
    }
}
