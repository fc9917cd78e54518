use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ControlError;

/// Opaque platform identifier for a top-level window
/// - Windows: the HWND value
/// - elsewhere: the compositor/xcap window id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowHandle(pub i64);

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Screen coordinate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Window bounding rectangle in screen coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl WindowRect {
    pub fn from_origin_size(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            left: x,
            top: y,
            right: x + width,
            bottom: y + height,
        }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }
}

/// Point-in-time window snapshot. Never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowInfo {
    pub handle: WindowHandle,
    pub title: String,
    pub pid: u32,
    pub rect: WindowRect,
    pub minimized: bool,
    pub maximized: bool,
}

/// Show-state change requested through the window driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Minimize,
    Maximize,
    Restore,
}

/// Capture rectangle, origin at the top-left of the primary screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Mouse button types
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
}

impl FromStr for MouseButton {
    type Err = ControlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "left" | "primary" => Ok(MouseButton::Left),
            "right" | "secondary" => Ok(MouseButton::Right),
            "middle" => Ok(MouseButton::Middle),
            other => Err(ControlError::invalid(format!("Unknown mouse button: {}", other))),
        }
    }
}

/// Press, release, or a full press+release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Press,
    Release,
    Click,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_dimensions() {
        let rect = WindowRect::from_origin_size(10, 20, 300, 200);
        assert_eq!(rect.right, 310);
        assert_eq!(rect.bottom, 220);
        assert_eq!(rect.width(), 300);
        assert_eq!(rect.height(), 200);
    }

    #[test]
    fn test_mouse_button_parsing() {
        assert_eq!("LEFT".parse::<MouseButton>(), Ok(MouseButton::Left));
        assert_eq!("right".parse::<MouseButton>(), Ok(MouseButton::Right));
        assert!("thumb".parse::<MouseButton>().is_err());
    }
}
