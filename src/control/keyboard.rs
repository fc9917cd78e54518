use std::thread;
use std::time::Duration;

use crate::desktop::{ClipboardDriver, Direction, InputDriver, Key};
use crate::error::{ControlError, Result};

/// How long the pasted text stays on the clipboard before the previous
/// contents are put back
const PASTE_SETTLE: Duration = Duration::from_millis(50);

/// Type text. With a non-zero interval the characters are sent one at a time
/// with that pause between them.
pub fn type_text(input: &dyn InputDriver, text: &str, interval: Duration) -> Result<()> {
    if interval.is_zero() {
        return input.text(text);
    }

    let mut buf = [0u8; 4];
    for (i, ch) in text.chars().enumerate() {
        if i > 0 {
            thread::sleep(interval);
        }
        input.text(ch.encode_utf8(&mut buf))?;
    }
    Ok(())
}

pub fn press(input: &dyn InputDriver, key: Key) -> Result<()> {
    input.key(key, Direction::Click)
}

pub fn key_down(input: &dyn InputDriver, key: Key) -> Result<()> {
    input.key(key, Direction::Press)
}

pub fn key_up(input: &dyn InputDriver, key: Key) -> Result<()> {
    input.key(key, Direction::Release)
}

/// Press every key in order, then release them in reverse.
///
/// If a press fails, the keys already held are released before the error is
/// returned so no modifier is left stuck.
pub fn hotkey(input: &dyn InputDriver, keys: &[Key]) -> Result<()> {
    if keys.is_empty() {
        return Err(ControlError::invalid("Hotkey requires at least one key"));
    }

    let mut held = Vec::with_capacity(keys.len());
    let mut outcome = Ok(());
    for key in keys {
        match input.key(*key, Direction::Press) {
            Ok(()) => held.push(*key),
            Err(e) => {
                outcome = Err(e);
                break;
            }
        }
    }

    for key in held.iter().rev() {
        let released = input.key(*key, Direction::Release);
        if outcome.is_ok() {
            outcome = released;
        }
    }
    outcome
}

/// Paste `text` through the clipboard, then put the previous clipboard text
/// back (or clear it if there was none).
///
/// Known race: the clipboard is OS-wide and unlocked. A second paste landing
/// inside the settle window sees this call's text as the "previous" value
/// and restores it, losing the original contents.
pub fn write_instant(input: &dyn InputDriver, clipboard: &dyn ClipboardDriver, text: &str) -> Result<()> {
    let previous = clipboard.get_text()?;
    clipboard.set_text(text)?;

    let pasted = hotkey(input, &[Key::primary_modifier(), Key::Char('v')]);
    thread::sleep(PASTE_SETTLE);

    let restored = match previous {
        Some(old) => clipboard.set_text(&old),
        None => clipboard.clear(),
    };
    pasted.and(restored)
}
