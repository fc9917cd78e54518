#![cfg(target_os = "windows")]

use windows::Win32::{
    Foundation::{BOOL, FALSE, HWND, LPARAM, RECT, TRUE, WPARAM},
    System::Threading::{AttachThreadInput, GetCurrentThreadId},
    UI::WindowsAndMessaging::{
        EnumWindows, GetForegroundWindow, GetWindowRect, GetWindowTextLengthW, GetWindowTextW,
        GetWindowThreadProcessId, IsIconic, IsWindow, IsWindowVisible, IsZoomed, MoveWindow,
        PostMessageW, SetForegroundWindow, ShowWindow, SW_MAXIMIZE, SW_MINIMIZE, SW_RESTORE,
        WM_CLOSE,
    },
};

use super::WindowDriver;
use crate::desktop::types::{Placement, WindowHandle, WindowInfo, WindowRect};
use crate::error::{ControlError, Result};

/// Win32 window driver.
///
/// Every call works on raw HWND values; nothing is cached between calls, so
/// a handle that closed in the meantime surfaces as an error from the call
/// that uses it.
#[derive(Debug, Default)]
pub struct Win32Windows;

impl Win32Windows {
    pub fn new() -> Self {
        Self
    }
}

fn to_hwnd(handle: WindowHandle) -> HWND {
    HWND(handle.0 as isize as *mut core::ffi::c_void)
}

fn to_handle(hwnd: HWND) -> WindowHandle {
    WindowHandle(hwnd.0 as isize as i64)
}

fn read_title(hwnd: HWND) -> String {
    let len = unsafe { GetWindowTextLengthW(hwnd) };
    if len <= 0 {
        return String::new();
    }
    let mut buf = vec![0u16; (len + 1) as usize];
    let copied = unsafe { GetWindowTextW(hwnd, &mut buf) };
    if copied <= 0 {
        return String::new();
    }
    String::from_utf16_lossy(&buf[..copied as usize])
}

fn ensure_window(handle: WindowHandle) -> Result<HWND> {
    let hwnd = to_hwnd(handle);
    if unsafe { IsWindow(hwnd) }.as_bool() {
        Ok(hwnd)
    } else {
        Err(ControlError::NotFound(format!("Window {} not found", handle)))
    }
}

fn read_info(hwnd: HWND) -> Result<WindowInfo> {
    let mut rect = RECT::default();
    unsafe { GetWindowRect(hwnd, &mut rect) }
        .map_err(|e| ControlError::driver("get window rect", e))?;

    let mut pid: u32 = 0;
    unsafe { GetWindowThreadProcessId(hwnd, Some(&mut pid)) };

    Ok(WindowInfo {
        handle: to_handle(hwnd),
        title: read_title(hwnd),
        pid,
        rect: WindowRect {
            left: rect.left,
            top: rect.top,
            right: rect.right,
            bottom: rect.bottom,
        },
        minimized: unsafe { IsIconic(hwnd) }.as_bool(),
        maximized: unsafe { IsZoomed(hwnd) }.as_bool(),
    })
}

/// EnumWindows callback collecting visible, titled top-level windows.
/// Always continues; the caller picks matches from the finished list.
unsafe extern "system" fn collect_visible(hwnd: HWND, lparam: LPARAM) -> BOOL {
    let handles = unsafe { &mut *(lparam.0 as *mut Vec<HWND>) };

    if unsafe { IsWindowVisible(hwnd) }.as_bool() && unsafe { GetWindowTextLengthW(hwnd) } > 0 {
        handles.push(hwnd);
    }

    TRUE
}

impl WindowDriver for Win32Windows {
    fn list_windows(&self) -> Result<Vec<WindowInfo>> {
        let mut handles: Vec<HWND> = Vec::with_capacity(64);
        unsafe {
            EnumWindows(
                Some(collect_visible),
                LPARAM(&mut handles as *mut Vec<HWND> as isize),
            )
        }
        .map_err(|e| ControlError::driver("enumerate windows", e))?;

        // Windows that vanish mid-enumeration are skipped
        Ok(handles
            .into_iter()
            .filter_map(|hwnd| read_info(hwnd).ok())
            .filter(|info| !info.title.is_empty())
            .collect())
    }

    fn window_info(&self, handle: WindowHandle) -> Result<WindowInfo> {
        read_info(ensure_window(handle)?)
    }

    fn foreground_window(&self) -> Result<Option<WindowInfo>> {
        let hwnd = unsafe { GetForegroundWindow() };
        if hwnd.0.is_null() {
            return Ok(None);
        }
        read_info(hwnd).map(Some)
    }

    fn set_foreground(&self, handle: WindowHandle) -> Result<()> {
        let hwnd = ensure_window(handle)?;
        if unsafe { SetForegroundWindow(hwnd) }.as_bool() {
            Ok(())
        } else {
            Err(ControlError::Driver(format!(
                "SetForegroundWindow refused for window {}",
                handle
            )))
        }
    }

    fn force_foreground(&self, handle: WindowHandle) -> Result<()> {
        let hwnd = ensure_window(handle)?;

        unsafe {
            let foreground_thread = GetWindowThreadProcessId(GetForegroundWindow(), None);
            let target_thread = GetWindowThreadProcessId(hwnd, None);
            let current_thread = GetCurrentThreadId();

            // Share input state with the foreground thread so the focus
            // change counts as coming from the active input queue
            let attach_to = if foreground_thread != 0 { foreground_thread } else { target_thread };
            let attached = attach_to != current_thread
                && AttachThreadInput(current_thread, attach_to, TRUE).as_bool();

            let focused = SetForegroundWindow(hwnd).as_bool();

            if attached {
                let _ = AttachThreadInput(current_thread, attach_to, FALSE);
            }

            if focused {
                Ok(())
            } else {
                Err(ControlError::Driver(format!(
                    "Could not bring window {} to the foreground",
                    handle
                )))
            }
        }
    }

    fn set_placement(&self, handle: WindowHandle, placement: Placement) -> Result<()> {
        let hwnd = ensure_window(handle)?;
        let command = match placement {
            Placement::Minimize => SW_MINIMIZE,
            Placement::Maximize => SW_MAXIMIZE,
            Placement::Restore => SW_RESTORE,
        };
        // ShowWindow reports the previous visibility, not success
        let _ = unsafe { ShowWindow(hwnd, command) };
        Ok(())
    }

    fn set_rect(&self, handle: WindowHandle, rect: WindowRect) -> Result<()> {
        let hwnd = ensure_window(handle)?;
        unsafe {
            MoveWindow(
                hwnd,
                rect.left,
                rect.top,
                rect.width(),
                rect.height(),
                TRUE,
            )
        }
        .map_err(|e| ControlError::driver("move window", e))
    }

    fn close(&self, handle: WindowHandle) -> Result<()> {
        let hwnd = ensure_window(handle)?;
        unsafe { PostMessageW(hwnd, WM_CLOSE, WPARAM(0), LPARAM(0)) }
            .map_err(|e| ControlError::driver("close window", e))
    }
}
