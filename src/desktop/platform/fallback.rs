#![cfg(not(target_os = "windows"))]

use xcap::Window;

use super::WindowDriver;
use crate::desktop::types::{Placement, WindowHandle, WindowInfo, WindowRect};
use crate::error::{ControlError, Result};

/// Read-only window driver for macOS and Linux.
///
/// Enumeration comes from xcap; focus, placement and close requests have no
/// portable API and report `Unsupported`.
#[derive(Debug, Default)]
pub struct XcapWindows;

impl XcapWindows {
    pub fn new() -> Self {
        Self
    }

    fn all() -> Result<Vec<Window>> {
        Window::all().map_err(|e| ControlError::driver("get windows", e))
    }
}

fn to_info(window: &Window) -> WindowInfo {
    WindowInfo {
        handle: WindowHandle(i64::from(window.id())),
        title: window.title().to_string(),
        pid: 0,
        rect: WindowRect::from_origin_size(
            window.x(),
            window.y(),
            window.width() as i32,
            window.height() as i32,
        ),
        minimized: window.is_minimized(),
        maximized: window.is_maximized(),
    }
}

/// Every titled window, minimized ones included
fn titled(windows: impl IntoIterator<Item = WindowInfo>) -> Vec<WindowInfo> {
    windows.into_iter().filter(|w| !w.title.is_empty()).collect()
}

/// First listed window that is not minimized
fn first_shown(windows: Vec<WindowInfo>) -> Option<WindowInfo> {
    windows.into_iter().find(|w| !w.minimized)
}

impl WindowDriver for XcapWindows {
    fn list_windows(&self) -> Result<Vec<WindowInfo>> {
        Ok(titled(Self::all()?.iter().map(to_info)))
    }

    fn window_info(&self, handle: WindowHandle) -> Result<WindowInfo> {
        Self::all()?
            .iter()
            .find(|w| i64::from(w.id()) == handle.0)
            .map(to_info)
            .ok_or_else(|| ControlError::NotFound(format!("Window {} not found", handle)))
    }

    fn foreground_window(&self) -> Result<Option<WindowInfo>> {
        // No focus query in xcap; the first shown window stands in for it
        Ok(first_shown(self.list_windows()?))
    }

    fn set_foreground(&self, _handle: WindowHandle) -> Result<()> {
        Err(ControlError::Unsupported("Window focus"))
    }

    fn force_foreground(&self, _handle: WindowHandle) -> Result<()> {
        Err(ControlError::Unsupported("Window focus"))
    }

    fn set_placement(&self, _handle: WindowHandle, _placement: Placement) -> Result<()> {
        Err(ControlError::Unsupported("Window placement"))
    }

    fn set_rect(&self, _handle: WindowHandle, _rect: WindowRect) -> Result<()> {
        Err(ControlError::Unsupported("Window move/resize"))
    }

    fn close(&self, _handle: WindowHandle) -> Result<()> {
        Err(ControlError::Unsupported("Window close"))
    }
}
