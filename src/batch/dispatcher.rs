use serde_json::{json, Map, Value};
use std::thread;
use std::time::Duration;

use super::action::Action;
use crate::config::Config;
use crate::control::{keyboard, mouse, screen, WindowRef, WindowResolver};
use crate::desktop::keys::parse_keys;
use crate::desktop::{Drivers, MouseButton};
use crate::error::Result;

/// Result data of one action, flattened into its response object
pub type ActionData = Map<String, Value>;

/// Maps one named action onto the driver calls that carry it out.
///
/// Shared by the single-action routes and the batch interpreter, so both
/// report identical data and errors for the same action.
#[derive(Clone)]
pub struct Dispatcher {
    drivers: Drivers,
    screenshot_quality: u8,
    window_poll_interval: Duration,
}

impl Dispatcher {
    pub fn new(drivers: Drivers, config: &Config) -> Self {
        Self {
            drivers,
            screenshot_quality: config.screenshot_quality,
            window_poll_interval: config.window_poll_interval,
        }
    }

    pub fn drivers(&self) -> &Drivers {
        &self.drivers
    }

    pub fn screenshot_quality(&self) -> u8 {
        self.screenshot_quality
    }

    pub fn resolver(&self) -> WindowResolver<'_> {
        WindowResolver::new(self.drivers.windows.as_ref(), self.window_poll_interval)
    }

    /// Run one action to completion. Blocks for glides, typing intervals
    /// and sleeps.
    pub fn execute(&self, action: Action) -> Result<ActionData> {
        tracing::debug!("Executing action: {}", action.kind().as_str());

        let input = self.drivers.input.as_ref();

        match action {
            Action::Click(p) => {
                let button: MouseButton = p.button.parse()?;
                mouse::click(input, p.x, p.y, button, p.clicks)?;
                Ok(ActionData::new())
            }
            Action::DoubleClick(p) => {
                mouse::double_click(input, p.x, p.y)?;
                Ok(ActionData::new())
            }
            Action::RightClick(p) => {
                mouse::right_click(input, p.x, p.y)?;
                Ok(ActionData::new())
            }
            Action::Move(p) => {
                let target = mouse::move_to(input, p.x, p.y, mouse::seconds(p.duration)?)?;
                Ok(data(json!({"x": target.x, "y": target.y})))
            }
            Action::Scroll(p) => {
                mouse::scroll(input, p.clicks, p.x, p.y)?;
                Ok(ActionData::new())
            }
            Action::Type(p) => {
                keyboard::type_text(input, &p.text, mouse::seconds(p.interval)?)?;
                Ok(ActionData::new())
            }
            Action::WriteInstant(p) => {
                keyboard::write_instant(input, self.drivers.clipboard.as_ref(), &p.text)?;
                Ok(ActionData::new())
            }
            Action::Press(p) => {
                keyboard::press(input, p.key.parse()?)?;
                Ok(ActionData::new())
            }
            Action::Hotkey(p) => {
                keyboard::hotkey(input, &parse_keys(&p.keys)?)?;
                Ok(ActionData::new())
            }
            Action::KeyDown(p) => {
                keyboard::key_down(input, p.key.parse()?)?;
                Ok(ActionData::new())
            }
            Action::KeyUp(p) => {
                keyboard::key_up(input, p.key.parse()?)?;
                Ok(ActionData::new())
            }
            Action::Sleep(p) => {
                thread::sleep(Duration::from_millis(p.ms));
                Ok(data(json!({"slept_ms": p.ms})))
            }
            Action::Screenshot(p) => {
                let quality = p.quality.unwrap_or(self.screenshot_quality).clamp(1, 100);
                let image = screen::capture_base64(self.drivers.display.as_ref(), None, quality)?;
                Ok(data(json!({"image": image})))
            }
            Action::Focus(p) => {
                let window = WindowRef::from_parts(p.hwnd, p.title.as_deref())?;
                let handle = self.resolver().focus(&window)?;
                Ok(data(json!({"hwnd": handle.0})))
            }
        }
    }
}

fn data(value: Value) -> ActionData {
    match value {
        Value::Object(map) => map,
        _ => ActionData::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::desktop::{Direction, InputEvent, Point, VirtualDesktop};
    use crate::error::ControlError;
    use crate::models::{ClickRequest, KeyRequest, SleepRequest, WindowTarget};
    use std::sync::Arc;

    fn dispatcher() -> (Arc<VirtualDesktop>, Dispatcher) {
        let desktop = Arc::new(VirtualDesktop::new());
        let config = Config {
            window_poll_interval: Duration::from_millis(10),
            ..Config::default()
        };
        let dispatcher = Dispatcher::new(Drivers::from_virtual(desktop.clone()), &config);
        (desktop, dispatcher)
    }

    #[test]
    fn test_click_moves_then_clicks() {
        let (desktop, dispatcher) = dispatcher();
        let data = dispatcher
            .execute(Action::Click(ClickRequest {
                x: Some(100),
                y: Some(200),
                button: "right".into(),
                clicks: 1,
            }))
            .unwrap();

        assert!(data.is_empty());
        assert_eq!(desktop.cursor(), Point::new(100, 200));
        assert_eq!(
            desktop.events().last(),
            Some(&InputEvent::Button(MouseButton::Right, Direction::Click))
        );
    }

    #[test]
    fn test_bad_button_is_invalid_input() {
        let (_, dispatcher) = dispatcher();
        let err = dispatcher
            .execute(Action::Click(ClickRequest {
                x: None,
                y: None,
                button: "thumb".into(),
                clicks: 1,
            }))
            .unwrap_err();
        assert!(matches!(err, ControlError::InvalidInput(_)));
    }

    #[test]
    fn test_sleep_reports_duration() {
        let (_, dispatcher) = dispatcher();
        let started = std::time::Instant::now();
        let data = dispatcher.execute(Action::Sleep(SleepRequest { ms: 30 })).unwrap();
        assert!(started.elapsed() >= Duration::from_millis(30));
        assert_eq!(data.get("slept_ms"), Some(&json!(30)));
    }

    #[test]
    fn test_key_down_holds_until_key_up() {
        let (desktop, dispatcher) = dispatcher();
        dispatcher
            .execute(Action::KeyDown(KeyRequest { key: "shift".into() }))
            .unwrap();
        assert_eq!(desktop.held_keys(), vec![crate::desktop::Key::Shift]);
        dispatcher
            .execute(Action::KeyUp(KeyRequest { key: "shift".into() }))
            .unwrap();
        assert!(desktop.held_keys().is_empty());
    }

    #[test]
    fn test_focus_by_title_reports_handle() {
        let (desktop, dispatcher) = dispatcher();
        let handle = desktop.add_window("Untitled - Notepad");
        let data = dispatcher
            .execute(Action::Focus(WindowTarget {
                hwnd: None,
                title: Some("notepad".into()),
            }))
            .unwrap();
        assert_eq!(data.get("hwnd"), Some(&json!(handle.0)));
        assert_eq!(desktop.foreground(), Some(handle));
    }

    #[test]
    fn test_focus_without_target_is_invalid() {
        let (_, dispatcher) = dispatcher();
        let err = dispatcher.execute(Action::Focus(WindowTarget::default())).unwrap_err();
        assert!(matches!(err, ControlError::InvalidInput(_)));
    }
}
