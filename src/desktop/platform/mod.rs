use std::sync::Arc;

use image::RgbaImage;

use super::keys::Key;
use super::types::{
    Direction, MouseButton, Placement, Point, Region, Rgb, WindowHandle, WindowInfo, WindowRect,
};
use crate::error::Result;

#[cfg(target_os = "windows")]
pub mod windows;

#[cfg(not(target_os = "windows"))]
pub mod fallback;

/// Cursor and keyboard injection
pub trait InputDriver: Send + Sync {
    /// Current cursor position
    fn position(&self) -> Result<Point>;

    /// Move the cursor to absolute screen coordinates, instantly
    fn move_to(&self, x: i32, y: i32) -> Result<()>;

    fn button(&self, button: MouseButton, direction: Direction) -> Result<()>;

    /// Scroll the wheel at the current position. Positive scrolls up.
    fn scroll(&self, clicks: i32) -> Result<()>;

    fn key(&self, key: Key, direction: Direction) -> Result<()>;

    /// Enter a text string (unicode allowed)
    fn text(&self, text: &str) -> Result<()>;
}

/// Screen capture
pub trait DisplayDriver: Send + Sync {
    /// Primary screen dimensions
    fn screen_size(&self) -> Result<(u32, u32)>;

    /// Capture the primary screen, or a region of it
    fn capture(&self, region: Option<Region>) -> Result<RgbaImage>;

    /// Color at a screen coordinate
    fn pixel(&self, x: i32, y: i32) -> Result<Rgb> {
        let image = self.capture(Some(Region {
            x,
            y,
            width: 1,
            height: 1,
        }))?;
        let px = image.get_pixel(0, 0);
        Ok(Rgb {
            r: px[0],
            g: px[1],
            b: px[2],
        })
    }
}

/// System clipboard
pub trait ClipboardDriver: Send + Sync {
    /// Clipboard text, `None` when the clipboard holds no text
    fn get_text(&self) -> Result<Option<String>>;

    fn set_text(&self, text: &str) -> Result<()>;

    fn clear(&self) -> Result<()>;

    /// Clipboard image, `None` when the clipboard holds no image
    fn get_image(&self) -> Result<Option<RgbaImage>>;
}

/// Top-level window enumeration and management
pub trait WindowDriver: Send + Sync {
    /// Visible top-level windows with non-empty titles, in platform
    /// enumeration order (top-most Z-order first on Windows)
    fn list_windows(&self) -> Result<Vec<WindowInfo>>;

    fn window_info(&self, handle: WindowHandle) -> Result<WindowInfo>;

    fn foreground_window(&self) -> Result<Option<WindowInfo>>;

    /// Direct foreground request. Fails when the OS refuses to hand over focus.
    fn set_foreground(&self, handle: WindowHandle) -> Result<()>;

    /// Foreground request with the caller's input queue attached to the
    /// current foreground thread, used when the direct request is refused
    fn force_foreground(&self, handle: WindowHandle) -> Result<()>;

    fn set_placement(&self, handle: WindowHandle, placement: Placement) -> Result<()>;

    fn set_rect(&self, handle: WindowHandle, rect: WindowRect) -> Result<()>;

    /// Ask the window to close (asynchronous on every platform)
    fn close(&self, handle: WindowHandle) -> Result<()>;
}

/// The four capability sets the server is built on.
#[derive(Clone)]
pub struct Drivers {
    pub input: Arc<dyn InputDriver>,
    pub display: Arc<dyn DisplayDriver>,
    pub clipboard: Arc<dyn ClipboardDriver>,
    pub windows: Arc<dyn WindowDriver>,
}

impl Drivers {
    /// Drivers backed by the real operating system
    pub fn native() -> Self {
        Self {
            input: Arc::new(super::input::EnigoInput::new()),
            display: Arc::new(super::screenshot::XcapDisplay::new()),
            clipboard: Arc::new(super::clipboard::SystemClipboard::new()),
            windows: create_window_driver(),
        }
    }

    /// All four capabilities served by one in-memory desktop
    pub fn from_virtual(desktop: Arc<super::virtual_desktop::VirtualDesktop>) -> Self {
        Self {
            input: desktop.clone(),
            display: desktop.clone(),
            clipboard: desktop.clone(),
            windows: desktop,
        }
    }
}

/// Create the platform-specific window driver
pub fn create_window_driver() -> Arc<dyn WindowDriver> {
    #[cfg(target_os = "windows")]
    {
        Arc::new(windows::Win32Windows::new())
    }

    #[cfg(not(target_os = "windows"))]
    {
        Arc::new(fallback::XcapWindows::new())
    }
}
