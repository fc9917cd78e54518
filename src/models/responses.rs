use serde::Serialize;

use crate::batch::ActionResult;
use crate::desktop::{WindowInfo, WindowRect};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    /// Seconds since startup
    pub uptime: f64,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

#[derive(Debug, Serialize)]
pub struct ScreenSizeResponse {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Serialize)]
pub struct PositionResponse {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Serialize)]
pub struct ImageResponse {
    pub success: bool,
    pub image: String,
    pub format: &'static str,
}

#[derive(Debug, Serialize)]
pub struct PathResponse {
    pub success: bool,
    pub path: String,
}

/// Rectangle with derived width and height, as sent to callers
#[derive(Debug, Clone, Serialize)]
pub struct RectJson {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub width: i32,
    pub height: i32,
}

impl From<WindowRect> for RectJson {
    fn from(rect: WindowRect) -> Self {
        Self {
            left: rect.left,
            top: rect.top,
            right: rect.right,
            bottom: rect.bottom,
            width: rect.width(),
            height: rect.height(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WindowJson {
    pub hwnd: i64,
    pub title: String,
    pub pid: u32,
    pub rect: RectJson,
    pub minimized: bool,
    pub maximized: bool,
}

impl From<WindowInfo> for WindowJson {
    fn from(info: WindowInfo) -> Self {
        Self {
            hwnd: info.handle.0,
            title: info.title,
            pid: info.pid,
            rect: info.rect.into(),
            minimized: info.minimized,
            maximized: info.maximized,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WindowListResponse {
    pub success: bool,
    pub windows: Vec<WindowJson>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct ActiveWindowResponse {
    pub success: bool,
    pub window: Option<WindowJson>,
}

#[derive(Debug, Serialize)]
pub struct FindWindowResponse {
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hwnd: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rect: Option<RectJson>,
}

impl FindWindowResponse {
    pub fn missing() -> Self {
        Self {
            found: false,
            hwnd: None,
            title: None,
            rect: None,
        }
    }
}

impl From<WindowInfo> for FindWindowResponse {
    fn from(info: WindowInfo) -> Self {
        Self {
            found: true,
            hwnd: Some(info.handle.0),
            title: Some(info.title),
            rect: Some(info.rect.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WindowHandleResponse {
    pub success: bool,
    pub hwnd: i64,
}

#[derive(Debug, Serialize)]
pub struct WaitWindowResponse {
    pub success: bool,
    pub hwnd: i64,
    pub title: String,
}

#[derive(Debug, Serialize)]
pub struct ClipboardTextResponse {
    pub success: bool,
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub success: bool,
    pub results: Vec<ActionResult>,
}
