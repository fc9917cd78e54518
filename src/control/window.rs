//! Window reference resolution and the window operations built on it.

use std::thread;
use std::time::{Duration, Instant};

use crate::desktop::{Placement, WindowDriver, WindowHandle, WindowInfo, WindowRect};
use crate::error::{ControlError, Result};

/// How a caller names a window
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowRef {
    Handle(WindowHandle),
    /// Case-insensitive title substring
    Title(String),
}

impl WindowRef {
    /// Build a reference from the `{hwnd?, title?}` request shape.
    /// A non-zero handle wins over a title; an empty title counts as absent.
    pub fn from_parts(hwnd: Option<i64>, title: Option<&str>) -> Result<Self> {
        match (hwnd.filter(|h| *h != 0), title.filter(|t| !t.is_empty())) {
            (Some(h), _) => Ok(WindowRef::Handle(WindowHandle(h))),
            (None, Some(t)) => Ok(WindowRef::Title(t.to_string())),
            (None, None) => Err(ControlError::invalid("Either 'hwnd' or 'title' is required")),
        }
    }
}

/// First window whose title contains `needle`, ignoring case, in the order
/// the driver enumerated them.
pub fn first_title_match(windows: Vec<WindowInfo>, needle: &str) -> Option<WindowInfo> {
    let needle = needle.to_lowercase();
    windows
        .into_iter()
        .find(|w| !w.title.is_empty() && w.title.to_lowercase().contains(&needle))
}

pub struct WindowResolver<'a> {
    driver: &'a dyn WindowDriver,
    poll_interval: Duration,
}

impl<'a> WindowResolver<'a> {
    pub fn new(driver: &'a dyn WindowDriver, poll_interval: Duration) -> Self {
        Self {
            driver,
            poll_interval,
        }
    }

    /// One full enumeration pass, first match wins
    pub fn find_by_title(&self, needle: &str) -> Result<Option<WindowInfo>> {
        Ok(first_title_match(self.driver.list_windows()?, needle))
    }

    /// Handles pass through unchecked; a stale one fails in the call that uses it.
    pub fn resolve(&self, window: &WindowRef) -> Result<WindowHandle> {
        match window {
            WindowRef::Handle(handle) => Ok(*handle),
            WindowRef::Title(title) => self
                .find_by_title(title)?
                .map(|info| info.handle)
                .ok_or_else(ControlError::window_not_found),
        }
    }

    /// Poll title resolution until a window appears or `timeout` elapses.
    /// The first poll is immediate.
    pub fn wait_for_window(&self, title: &str, timeout: Duration) -> Result<WindowInfo> {
        // A timeout past the end of the clock waits without a deadline
        let deadline = Instant::now().checked_add(timeout);

        loop {
            match self.find_by_title(title) {
                Ok(Some(info)) => return Ok(info),
                Ok(None) => {}
                // Enumeration hiccups count as "not there yet"
                Err(e) => tracing::debug!("Window enumeration failed while waiting: {}", e),
            }

            let pause = match deadline {
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        break;
                    }
                    self.poll_interval.min(deadline - now)
                }
                None => self.poll_interval,
            };
            thread::sleep(pause);
        }

        Err(ControlError::Timeout(format!(
            "Window '{}' not found within {}s",
            title,
            timeout.as_secs_f64()
        )))
    }

    /// Bring a window to the foreground, restoring it first if minimized.
    ///
    /// The direct request is tried first; if the OS refuses, the
    /// thread-input-attached request is tried before giving up. A refusal
    /// of both is reported as `FocusDenied`.
    pub fn focus(&self, window: &WindowRef) -> Result<WindowHandle> {
        let handle = self.resolve(window)?;

        if self.driver.window_info(handle)?.minimized {
            self.driver.set_placement(handle, Placement::Restore)?;
        }

        if let Err(direct) = self.driver.set_foreground(handle) {
            tracing::debug!("Direct focus of {} refused ({}), attaching thread input", handle, direct);
            self.driver.force_foreground(handle).map_err(|e| match e {
                ControlError::Driver(msg) => ControlError::FocusDenied(msg),
                other => other,
            })?;
        }
        Ok(handle)
    }

    pub fn set_placement(&self, window: &WindowRef, placement: Placement) -> Result<WindowHandle> {
        let handle = self.resolve(window)?;
        self.driver.set_placement(handle, placement)?;
        Ok(handle)
    }

    pub fn close(&self, window: &WindowRef) -> Result<WindowHandle> {
        let handle = self.resolve(window)?;
        self.driver.close(handle)?;
        Ok(handle)
    }

    /// Move keeping the current size
    pub fn move_window(&self, handle: WindowHandle, x: i32, y: i32) -> Result<()> {
        let rect = self.driver.window_info(handle)?.rect;
        self.driver
            .set_rect(handle, WindowRect::from_origin_size(x, y, rect.width(), rect.height()))
    }

    /// Resize keeping the current position
    pub fn resize_window(&self, handle: WindowHandle, width: i32, height: i32) -> Result<()> {
        if width <= 0 || height <= 0 {
            return Err(ControlError::invalid("Width and height must be positive"));
        }
        let rect = self.driver.window_info(handle)?.rect;
        self.driver
            .set_rect(handle, WindowRect::from_origin_size(rect.left, rect.top, width, height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::desktop::VirtualDesktop;

    fn resolver(desktop: &VirtualDesktop) -> WindowResolver<'_> {
        WindowResolver::new(desktop, Duration::from_millis(20))
    }

    #[test]
    fn test_window_ref_precedence() {
        assert_eq!(
            WindowRef::from_parts(Some(42), Some("Notepad")).unwrap(),
            WindowRef::Handle(WindowHandle(42))
        );
        assert_eq!(
            WindowRef::from_parts(Some(0), Some("Notepad")).unwrap(),
            WindowRef::Title("Notepad".into())
        );
        assert!(WindowRef::from_parts(None, Some("")).is_err());
    }

    #[test]
    fn test_title_match_is_case_insensitive() {
        let desktop = VirtualDesktop::new();
        let handle = desktop.add_window("Untitled - Notepad");
        let found = resolver(&desktop)
            .resolve(&WindowRef::Title("NOTEPAD".into()))
            .unwrap();
        assert_eq!(found, handle);
    }

    #[test]
    fn test_no_match_is_not_found() {
        let desktop = VirtualDesktop::new();
        desktop.add_window("Calculator");
        let err = resolver(&desktop)
            .resolve(&WindowRef::Title("Notepad".into()))
            .unwrap_err();
        assert_eq!(err, ControlError::window_not_found());
    }

    #[test]
    fn test_first_match_in_enumeration_order_wins() {
        let desktop = VirtualDesktop::new();
        let first = desktop.add_window("Report.docx - Word");
        desktop.add_window("Notes.docx - Word");
        let found = resolver(&desktop).resolve(&WindowRef::Title("word".into())).unwrap();
        assert_eq!(found, first);
    }

    #[test]
    fn test_hidden_windows_never_match() {
        let desktop = VirtualDesktop::new();
        desktop.add_hidden_window("Secret Notepad");
        assert!(resolver(&desktop).find_by_title("notepad").unwrap().is_none());
    }

    #[test]
    fn test_handles_are_not_checked() {
        let desktop = VirtualDesktop::new();
        let handle = WindowHandle(999);
        assert_eq!(resolver(&desktop).resolve(&WindowRef::Handle(handle)).unwrap(), handle);
    }

    #[test]
    fn test_wait_returns_existing_window_immediately() {
        let desktop = VirtualDesktop::new();
        desktop.add_window("Notepad");
        let started = Instant::now();
        let info = resolver(&desktop)
            .wait_for_window("notepad", Duration::from_secs(5))
            .unwrap();
        assert_eq!(info.title, "Notepad");
        assert!(started.elapsed() < Duration::from_millis(20));
    }

    #[test]
    fn test_wait_times_out() {
        let desktop = VirtualDesktop::new();
        let started = Instant::now();
        let err = resolver(&desktop)
            .wait_for_window("X", Duration::from_millis(100))
            .unwrap_err();
        assert!(started.elapsed() >= Duration::from_millis(100));
        assert_eq!(err.to_string(), "Window 'X' not found within 0.1s");
    }

    #[test]
    fn test_wait_sees_window_that_appears_later() {
        let desktop = std::sync::Arc::new(VirtualDesktop::new());
        let opener = {
            let desktop = desktop.clone();
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(60));
                desktop.add_window("Late Arrival");
            })
        };
        let info = WindowResolver::new(&*desktop, Duration::from_millis(20))
            .wait_for_window("late", Duration::from_secs(2))
            .unwrap();
        opener.join().unwrap();
        assert_eq!(info.title, "Late Arrival");
    }

    #[test]
    fn test_wait_with_unbounded_timeout() {
        let desktop = std::sync::Arc::new(VirtualDesktop::new());
        let opener = {
            let desktop = desktop.clone();
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(40));
                desktop.add_window("Slow Start");
            })
        };
        let info = WindowResolver::new(&*desktop, Duration::from_millis(20))
            .wait_for_window("slow", Duration::MAX)
            .unwrap();
        opener.join().unwrap();
        assert_eq!(info.title, "Slow Start");
    }

    #[test]
    fn test_focus_falls_back_when_direct_request_refused() {
        let desktop = VirtualDesktop::new();
        let handle = desktop.add_window("Target");
        desktop.deny_direct_focus(true);

        resolver(&desktop).focus(&WindowRef::Handle(handle)).unwrap();
        assert_eq!(desktop.foreground(), Some(handle));
    }

    #[test]
    fn test_focus_fails_when_both_attempts_refused() {
        let desktop = VirtualDesktop::new();
        desktop.add_window("Target");
        desktop.deny_direct_focus(true);
        desktop.deny_forced_focus(true);

        let err = resolver(&desktop).focus(&WindowRef::Title("target".into())).unwrap_err();
        assert!(matches!(err, ControlError::FocusDenied(_)));
        assert_eq!(desktop.foreground(), None);
    }

    #[test]
    fn test_focus_restores_minimized_window() {
        let desktop = VirtualDesktop::new();
        let handle = desktop.add_window("Target");
        desktop.set_placement(handle, Placement::Minimize).unwrap();

        resolver(&desktop).focus(&WindowRef::Handle(handle)).unwrap();
        assert!(!desktop.window_info(handle).unwrap().minimized);
    }

    #[test]
    fn test_move_keeps_size_and_resize_keeps_origin() {
        let desktop = VirtualDesktop::new();
        let handle = desktop.add_window("Target");
        let r = resolver(&desktop);

        r.move_window(handle, 10, 20).unwrap();
        let rect = desktop.window_info(handle).unwrap().rect;
        assert_eq!((rect.left, rect.top, rect.width(), rect.height()), (10, 20, 800, 600));

        r.resize_window(handle, 300, 200).unwrap();
        let rect = desktop.window_info(handle).unwrap().rect;
        assert_eq!((rect.left, rect.top, rect.width(), rect.height()), (10, 20, 300, 200));
    }
}
