//! Key names accepted by the keyboard routes.
//!
//! Names follow the common automation vocabulary (`enter`, `ctrl`, `pgdn`,
//! `f5`, ...). Any single character is typed as itself.

use std::fmt;
use std::str::FromStr;

use crate::error::ControlError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Printable character, sent as unicode
    Char(char),

    // Function keys (F1-F12)
    F(u8),

    // Modifiers
    Control,
    Alt,
    Shift,
    Meta, // Windows key / Command key

    // Navigation
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,

    // Editing
    Backspace,
    Delete,
    Enter,
    Tab,
    Escape,
    Space,
    CapsLock,
}

impl Key {
    /// The modifier used for paste/select-all shortcuts on this platform
    pub fn primary_modifier() -> Self {
        if cfg!(target_os = "macos") {
            Key::Meta
        } else {
            Key::Control
        }
    }
}

impl FromStr for Key {
    type Err = ControlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Ok(if c == ' ' { Key::Space } else { Key::Char(c) });
        }

        let lower = s.to_lowercase();
        if let Some(n) = lower.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
            if (1..=12).contains(&n) {
                return Ok(Key::F(n));
            }
        }

        let key = match lower.as_str() {
            "ctrl" | "control" | "ctrlleft" | "ctrlright" => Key::Control,
            "alt" | "option" | "altleft" | "altright" => Key::Alt,
            "shift" | "shiftleft" | "shiftright" => Key::Shift,
            "meta" | "win" | "winleft" | "winright" | "cmd" | "command" | "super" => Key::Meta,
            "up" => Key::Up,
            "down" => Key::Down,
            "left" => Key::Left,
            "right" => Key::Right,
            "home" => Key::Home,
            "end" => Key::End,
            "pageup" | "pgup" => Key::PageUp,
            "pagedown" | "pgdn" => Key::PageDown,
            "backspace" | "bs" => Key::Backspace,
            "delete" | "del" => Key::Delete,
            "enter" | "return" => Key::Enter,
            "tab" => Key::Tab,
            "escape" | "esc" => Key::Escape,
            "space" => Key::Space,
            "capslock" => Key::CapsLock,
            _ => return Err(ControlError::invalid(format!("Unknown key: {}", s))),
        };
        Ok(key)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(c) => write!(f, "{}", c),
            Key::F(n) => write!(f, "f{}", n),
            other => write!(f, "{}", format!("{:?}", other).to_lowercase()),
        }
    }
}

/// Parse an ordered list of key names, failing on the first unknown one.
pub fn parse_keys<S: AsRef<str>>(names: &[S]) -> Result<Vec<Key>, ControlError> {
    names.iter().map(|n| n.as_ref().parse()).collect()
}
