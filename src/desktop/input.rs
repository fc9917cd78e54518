//! Cross-platform mouse and keyboard input using enigo

use enigo::{Axis, Button, Coordinate, Enigo, Keyboard, Mouse, Settings};

use super::keys::Key;
use super::platform::InputDriver;
use super::types::{Direction, MouseButton, Point};
use crate::error::{ControlError, Result};

/// Input driver backed by enigo.
///
/// A fresh `Enigo` is created for each call so the driver stays `Send + Sync`
/// without holding a platform connection across requests.
#[derive(Debug, Default)]
pub struct EnigoInput;

impl EnigoInput {
    pub fn new() -> Self {
        Self
    }

    fn connect() -> Result<Enigo> {
        Enigo::new(&Settings::default())
            .map_err(|e| ControlError::driver("create input controller", e))
    }
}

impl InputDriver for EnigoInput {
    fn position(&self) -> Result<Point> {
        let (x, y) = Self::connect()?
            .location()
            .map_err(|e| ControlError::driver("read mouse position", e))?;
        Ok(Point::new(x, y))
    }

    fn move_to(&self, x: i32, y: i32) -> Result<()> {
        Self::connect()?
            .move_mouse(x, y, Coordinate::Abs)
            .map_err(|e| ControlError::driver("move mouse", e))
    }

    fn button(&self, button: MouseButton, direction: Direction) -> Result<()> {
        Self::connect()?
            .button(to_enigo_button(button), to_enigo_direction(direction))
            .map_err(|e| ControlError::driver("click", e))
    }

    fn scroll(&self, clicks: i32) -> Result<()> {
        if clicks == 0 {
            return Ok(());
        }
        // enigo scrolls down for positive lengths
        Self::connect()?
            .scroll(-clicks, Axis::Vertical)
            .map_err(|e| ControlError::driver("scroll", e))
    }

    fn key(&self, key: Key, direction: Direction) -> Result<()> {
        Self::connect()?
            .key(to_enigo_key(key), to_enigo_direction(direction))
            .map_err(|e| ControlError::driver(&format!("press key {}", key), e))
    }

    fn text(&self, text: &str) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        Self::connect()?
            .text(text)
            .map_err(|e| ControlError::driver("type text", e))
    }
}

fn to_enigo_button(button: MouseButton) -> Button {
    match button {
        MouseButton::Left => Button::Left,
        MouseButton::Right => Button::Right,
        MouseButton::Middle => Button::Middle,
    }
}

fn to_enigo_direction(direction: Direction) -> enigo::Direction {
    match direction {
        Direction::Press => enigo::Direction::Press,
        Direction::Release => enigo::Direction::Release,
        Direction::Click => enigo::Direction::Click,
    }
}

fn to_enigo_key(key: Key) -> enigo::Key {
    match key {
        Key::Char(c) => enigo::Key::Unicode(c),

        // Function keys
        Key::F(1) => enigo::Key::F1,
        Key::F(2) => enigo::Key::F2,
        Key::F(3) => enigo::Key::F3,
        Key::F(4) => enigo::Key::F4,
        Key::F(5) => enigo::Key::F5,
        Key::F(6) => enigo::Key::F6,
        Key::F(7) => enigo::Key::F7,
        Key::F(8) => enigo::Key::F8,
        Key::F(9) => enigo::Key::F9,
        Key::F(10) => enigo::Key::F10,
        Key::F(11) => enigo::Key::F11,
        Key::F(_) => enigo::Key::F12,

        // Modifiers
        Key::Control => enigo::Key::Control,
        Key::Alt => enigo::Key::Alt,
        Key::Shift => enigo::Key::Shift,
        Key::Meta => enigo::Key::Meta,

        // Navigation
        Key::Up => enigo::Key::UpArrow,
        Key::Down => enigo::Key::DownArrow,
        Key::Left => enigo::Key::LeftArrow,
        Key::Right => enigo::Key::RightArrow,
        Key::Home => enigo::Key::Home,
        Key::End => enigo::Key::End,
        Key::PageUp => enigo::Key::PageUp,
        Key::PageDown => enigo::Key::PageDown,

        // Editing
        Key::Backspace => enigo::Key::Backspace,
        Key::Delete => enigo::Key::Delete,
        Key::Enter => enigo::Key::Return,
        Key::Tab => enigo::Key::Tab,
        Key::Escape => enigo::Key::Escape,
        Key::Space => enigo::Key::Space,
        Key::CapsLock => enigo::Key::CapsLock,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(to_enigo_key(Key::Enter), enigo::Key::Return);
        assert_eq!(to_enigo_key(Key::Char('q')), enigo::Key::Unicode('q'));
        assert_eq!(to_enigo_key(Key::F(7)), enigo::Key::F7);
    }

    #[test]
    fn test_button_mapping() {
        assert_eq!(to_enigo_button(MouseButton::Right), Button::Right);
        assert_eq!(to_enigo_direction(Direction::Press), enigo::Direction::Press);
    }
}
