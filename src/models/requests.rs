use serde::Deserialize;

// ============ Mouse ============

#[derive(Debug, Clone, Deserialize)]
pub struct ClickRequest {
    pub x: Option<i32>,
    pub y: Option<i32>,
    #[serde(default = "default_button")]
    pub button: String,
    #[serde(default = "default_clicks")]
    pub clicks: u32,
}

/// Optional target point for compound clicks
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PointerRequest {
    pub x: Option<i32>,
    pub y: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MoveRequest {
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
    /// Glide time in seconds
    #[serde(default)]
    pub duration: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MoveRelativeRequest {
    #[serde(default)]
    pub dx: i32,
    #[serde(default)]
    pub dy: i32,
    #[serde(default)]
    pub duration: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DragRequest {
    #[serde(default)]
    pub start_x: i32,
    #[serde(default)]
    pub start_y: i32,
    #[serde(default)]
    pub end_x: i32,
    #[serde(default)]
    pub end_y: i32,
    #[serde(default = "default_drag_duration")]
    pub duration: f64,
    #[serde(default = "default_button")]
    pub button: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScrollRequest {
    /// Positive scrolls up, negative down
    #[serde(default)]
    pub clicks: i32,
    pub x: Option<i32>,
    pub y: Option<i32>,
}

fn default_button() -> String {
    "left".to_string()
}
fn default_clicks() -> u32 {
    1
}
fn default_drag_duration() -> f64 {
    0.2
}

// ============ Keyboard ============

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TypeRequest {
    #[serde(default)]
    pub text: String,
    /// Seconds between characters
    #[serde(default)]
    pub interval: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TextRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KeyRequest {
    pub key: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HotkeyRequest {
    #[serde(default)]
    pub keys: Vec<String>,
}

// ============ Screen ============

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScreenshotQuery {
    pub quality: Option<u8>,
    pub format: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegionRequest {
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
    #[serde(default = "default_region_size")]
    pub width: u32,
    #[serde(default = "default_region_size")]
    pub height: u32,
    pub quality: Option<u8>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScreenshotFileRequest {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PixelQuery {
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
}

fn default_region_size() -> u32 {
    500
}

// ============ Windows ============

/// A window named by handle or by title substring
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WindowTarget {
    pub hwnd: Option<i64>,
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WindowMoveRequest {
    #[serde(default)]
    pub hwnd: i64,
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WindowResizeRequest {
    #[serde(default)]
    pub hwnd: i64,
    #[serde(default = "default_window_width")]
    pub width: i32,
    #[serde(default = "default_window_height")]
    pub height: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FindWindowQuery {
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WaitWindowRequest {
    #[serde(default)]
    pub title: String,
    /// Seconds
    #[serde(default = "default_wait_timeout")]
    pub timeout: f64,
}

fn default_window_width() -> i32 {
    800
}
fn default_window_height() -> i32 {
    600
}
fn default_wait_timeout() -> f64 {
    10.0
}

// ============ Combo ============

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClickAndTypeRequest {
    pub x: Option<i32>,
    pub y: Option<i32>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub interval: f64,
    #[serde(default)]
    pub clear_first: bool,
}

/// Batch body. Steps stay raw JSON so each one can fail on its own.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BatchRequest {
    #[serde(default)]
    pub actions: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SleepRequest {
    #[serde(default = "default_sleep_ms")]
    pub ms: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScreenshotRequest {
    pub quality: Option<u8>,
}

fn default_sleep_ms() -> u64 {
    100
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_click_defaults() {
        let req: ClickRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(req.button, "left");
        assert_eq!(req.clicks, 1);
        assert!(req.x.is_none() && req.y.is_none());
    }

    #[test]
    fn test_route_defaults() {
        let drag: DragRequest = serde_json::from_value(json!({"end_x": 5})).unwrap();
        assert_eq!(drag.duration, 0.2);
        assert_eq!(drag.start_x, 0);

        let region: RegionRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!((region.width, region.height), (500, 500));

        let resize: WindowResizeRequest = serde_json::from_value(json!({"hwnd": 1})).unwrap();
        assert_eq!((resize.width, resize.height), (800, 600));

        let wait: WaitWindowRequest = serde_json::from_value(json!({"title": "x"})).unwrap();
        assert_eq!(wait.timeout, 10.0);
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let sleep: SleepRequest =
            serde_json::from_value(json!({"type": "sleep", "ms": 50})).unwrap();
        assert_eq!(sleep.ms, 50);
    }
}
