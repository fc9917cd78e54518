//! In-memory desktop implementing every driver capability.
//!
//! Backs the server in `DRIVER=virtual` (dry-run) mode and the test suite.
//! The screen is a deterministic gradient, input is recorded as an event log,
//! and windows live in a table kept in enumeration order.

use image::{Rgba, RgbaImage};
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use super::keys::Key;
use super::platform::{ClipboardDriver, DisplayDriver, InputDriver, WindowDriver};
use super::screenshot::crop;
use super::types::{
    Direction, MouseButton, Placement, Point, Region, Rgb, WindowHandle, WindowInfo, WindowRect,
};
use crate::error::{ControlError, Result};

/// Input events kept in the log; older ones are dropped first
const EVENT_LOG_CAPACITY: usize = 4096;

/// One recorded input event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Move(Point),
    Button(MouseButton, Direction),
    Scroll(i32),
    Key(Key, Direction),
    Text(String),
    /// Primary-modifier+V while the clipboard held this text
    Paste(String),
}

#[derive(Debug, Clone)]
struct VirtualWindow {
    info: WindowInfo,
    visible: bool,
}

#[derive(Debug)]
struct DesktopState {
    width: u32,
    height: u32,
    cursor: Point,
    held_keys: Vec<Key>,
    events: VecDeque<InputEvent>,
    clipboard_text: Option<String>,
    clipboard_image: Option<RgbaImage>,
    windows: Vec<VirtualWindow>,
    foreground: Option<WindowHandle>,
    deny_direct_focus: bool,
    deny_forced_focus: bool,
    next_handle: i64,
}

impl DesktopState {
    fn record(&mut self, event: InputEvent) {
        if self.events.len() == EVENT_LOG_CAPACITY {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }
}

pub struct VirtualDesktop {
    state: Mutex<DesktopState>,
}

impl VirtualDesktop {
    pub fn new() -> Self {
        Self::with_screen(1920, 1080)
    }

    pub fn with_screen(width: u32, height: u32) -> Self {
        Self {
            state: Mutex::new(DesktopState {
                width,
                height,
                cursor: Point::new(width as i32 / 2, height as i32 / 2),
                held_keys: Vec::new(),
                events: VecDeque::with_capacity(64),
                clipboard_text: None,
                clipboard_image: None,
                windows: Vec::new(),
                foreground: None,
                deny_direct_focus: false,
                deny_forced_focus: false,
                next_handle: 0x1000,
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, DesktopState> {
        // A panicking test thread must not wedge the whole desktop
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Color of the synthetic screen at a coordinate
    pub fn color_at(x: u32, y: u32) -> Rgb {
        Rgb {
            r: (x % 256) as u8,
            g: (y % 256) as u8,
            b: 128,
        }
    }

    // ============ Window table ============

    /// Append a visible window at the end of the enumeration order
    pub fn add_window(&self, title: &str) -> WindowHandle {
        self.insert_window(title, true)
    }

    pub fn add_hidden_window(&self, title: &str) -> WindowHandle {
        self.insert_window(title, false)
    }

    fn insert_window(&self, title: &str, visible: bool) -> WindowHandle {
        let mut state = self.state();
        let handle = WindowHandle(state.next_handle);
        state.next_handle += 0x10;
        let count = state.windows.len();
        let offset = count as i32 * 30;
        state.windows.push(VirtualWindow {
            info: WindowInfo {
                handle,
                title: title.to_string(),
                pid: 4000 + count as u32,
                rect: WindowRect::from_origin_size(100 + offset, 100 + offset, 800, 600),
                minimized: false,
                maximized: false,
            },
            visible,
        });
        handle
    }

    pub fn remove_window(&self, handle: WindowHandle) {
        let mut state = self.state();
        state.windows.retain(|w| w.info.handle != handle);
        if state.foreground == Some(handle) {
            state.foreground = None;
        }
    }

    /// Make direct foreground requests fail, as a focus-stealing guard would
    pub fn deny_direct_focus(&self, deny: bool) {
        self.state().deny_direct_focus = deny;
    }

    /// Make the thread-input fallback fail as well
    pub fn deny_forced_focus(&self, deny: bool) {
        self.state().deny_forced_focus = deny;
    }

    pub fn foreground(&self) -> Option<WindowHandle> {
        self.state().foreground
    }

    // ============ Inspection ============

    pub fn cursor(&self) -> Point {
        self.state().cursor
    }

    pub fn events(&self) -> Vec<InputEvent> {
        self.state().events.iter().cloned().collect()
    }

    /// Everything typed or pasted, in order
    pub fn typed_text(&self) -> String {
        self.state()
            .events
            .iter()
            .filter_map(|e| match e {
                InputEvent::Text(t) | InputEvent::Paste(t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn held_keys(&self) -> Vec<Key> {
        self.state().held_keys.clone()
    }

    pub fn clipboard_text(&self) -> Option<String> {
        self.state().clipboard_text.clone()
    }

    pub fn set_clipboard_image(&self, image: RgbaImage) {
        let mut state = self.state();
        state.clipboard_text = None;
        state.clipboard_image = Some(image);
    }

    fn window_mut(state: &mut DesktopState, handle: WindowHandle) -> Result<&mut VirtualWindow> {
        state
            .windows
            .iter_mut()
            .find(|w| w.info.handle == handle)
            .ok_or_else(|| ControlError::NotFound(format!("Window {} not found", handle)))
    }
}

impl Default for VirtualDesktop {
    fn default() -> Self {
        Self::new()
    }
}

impl InputDriver for VirtualDesktop {
    fn position(&self) -> Result<Point> {
        Ok(self.state().cursor)
    }

    fn move_to(&self, x: i32, y: i32) -> Result<()> {
        let mut state = self.state();
        let point = Point::new(
            x.clamp(0, state.width as i32 - 1),
            y.clamp(0, state.height as i32 - 1),
        );
        state.cursor = point;
        state.record(InputEvent::Move(point));
        Ok(())
    }

    fn button(&self, button: MouseButton, direction: Direction) -> Result<()> {
        self.state().record(InputEvent::Button(button, direction));
        Ok(())
    }

    fn scroll(&self, clicks: i32) -> Result<()> {
        self.state().record(InputEvent::Scroll(clicks));
        Ok(())
    }

    fn key(&self, key: Key, direction: Direction) -> Result<()> {
        let mut state = self.state();
        match direction {
            Direction::Press => {
                if !state.held_keys.contains(&key) {
                    state.held_keys.push(key);
                }
            }
            Direction::Release => state.held_keys.retain(|k| *k != key),
            Direction::Click => {}
        }
        state.record(InputEvent::Key(key, direction));

        let pastes = matches!(key, Key::Char('v') | Key::Char('V'))
            && direction != Direction::Release
            && state.held_keys.contains(&Key::primary_modifier());
        if pastes {
            if let Some(text) = state.clipboard_text.clone() {
                state.record(InputEvent::Paste(text));
            }
        }
        Ok(())
    }

    fn text(&self, text: &str) -> Result<()> {
        self.state().record(InputEvent::Text(text.to_string()));
        Ok(())
    }
}

impl DisplayDriver for VirtualDesktop {
    fn screen_size(&self) -> Result<(u32, u32)> {
        let state = self.state();
        Ok((state.width, state.height))
    }

    fn capture(&self, region: Option<Region>) -> Result<RgbaImage> {
        let (width, height) = self.screen_size()?;
        let frame = RgbaImage::from_fn(width, height, |x, y| {
            let c = Self::color_at(x, y);
            Rgba([c.r, c.g, c.b, 255])
        });
        match region {
            Some(region) => crop(&frame, region),
            None => Ok(frame),
        }
    }

    fn pixel(&self, x: i32, y: i32) -> Result<Rgb> {
        let (width, height) = self.screen_size()?;
        if x < 0 || y < 0 || x as u32 >= width || y as u32 >= height {
            return Err(ControlError::invalid(format!(
                "Pixel ({}, {}) is outside the screen",
                x, y
            )));
        }
        Ok(Self::color_at(x as u32, y as u32))
    }
}

impl ClipboardDriver for VirtualDesktop {
    fn get_text(&self) -> Result<Option<String>> {
        Ok(self.state().clipboard_text.clone())
    }

    fn set_text(&self, text: &str) -> Result<()> {
        let mut state = self.state();
        state.clipboard_text = Some(text.to_string());
        state.clipboard_image = None;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut state = self.state();
        state.clipboard_text = None;
        state.clipboard_image = None;
        Ok(())
    }

    fn get_image(&self) -> Result<Option<RgbaImage>> {
        Ok(self.state().clipboard_image.clone())
    }
}

impl WindowDriver for VirtualDesktop {
    fn list_windows(&self) -> Result<Vec<WindowInfo>> {
        Ok(self
            .state()
            .windows
            .iter()
            .filter(|w| w.visible && !w.info.title.is_empty())
            .map(|w| w.info.clone())
            .collect())
    }

    fn window_info(&self, handle: WindowHandle) -> Result<WindowInfo> {
        let mut state = self.state();
        Ok(Self::window_mut(&mut state, handle)?.info.clone())
    }

    fn foreground_window(&self) -> Result<Option<WindowInfo>> {
        let mut state = self.state();
        match state.foreground {
            Some(handle) => Ok(Some(Self::window_mut(&mut state, handle)?.info.clone())),
            None => Ok(None),
        }
    }

    fn set_foreground(&self, handle: WindowHandle) -> Result<()> {
        let mut state = self.state();
        Self::window_mut(&mut state, handle)?;
        if state.deny_direct_focus {
            return Err(ControlError::Driver(format!(
                "SetForegroundWindow refused for window {}",
                handle
            )));
        }
        state.foreground = Some(handle);
        Ok(())
    }

    fn force_foreground(&self, handle: WindowHandle) -> Result<()> {
        let mut state = self.state();
        Self::window_mut(&mut state, handle)?;
        if state.deny_forced_focus {
            return Err(ControlError::Driver(format!(
                "Could not bring window {} to the foreground",
                handle
            )));
        }
        state.foreground = Some(handle);
        Ok(())
    }

    fn set_placement(&self, handle: WindowHandle, placement: Placement) -> Result<()> {
        let mut state = self.state();
        let window = Self::window_mut(&mut state, handle)?;
        let (minimized, maximized) = match placement {
            Placement::Minimize => (true, false),
            Placement::Maximize => (false, true),
            Placement::Restore => (false, false),
        };
        window.info.minimized = minimized;
        window.info.maximized = maximized;
        Ok(())
    }

    fn set_rect(&self, handle: WindowHandle, rect: WindowRect) -> Result<()> {
        let mut state = self.state();
        Self::window_mut(&mut state, handle)?.info.rect = rect;
        Ok(())
    }

    fn close(&self, handle: WindowHandle) -> Result<()> {
        {
            let mut state = self.state();
            Self::window_mut(&mut state, handle)?;
        }
        self.remove_window(handle);
        Ok(())
    }
}
