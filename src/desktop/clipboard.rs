//! System clipboard access using arboard

use arboard::Clipboard;
use image::RgbaImage;

use super::platform::ClipboardDriver;
use crate::error::{ControlError, Result};

/// Clipboard driver backed by the OS clipboard.
///
/// The clipboard handle is opened per call; the OS clipboard is a
/// process-wide resource and holding it open would block other applications.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl SystemClipboard {
    pub fn new() -> Self {
        Self
    }

    fn open() -> Result<Clipboard> {
        Clipboard::new().map_err(|e| ControlError::driver("open clipboard", e))
    }
}

impl ClipboardDriver for SystemClipboard {
    fn get_text(&self) -> Result<Option<String>> {
        match Self::open()?.get_text() {
            Ok(text) => Ok(Some(text)),
            Err(arboard::Error::ContentNotAvailable) => Ok(None),
            Err(e) => Err(ControlError::driver("read clipboard", e)),
        }
    }

    fn set_text(&self, text: &str) -> Result<()> {
        Self::open()?
            .set_text(text)
            .map_err(|e| ControlError::driver("write clipboard", e))
    }

    fn clear(&self) -> Result<()> {
        Self::open()?
            .clear()
            .map_err(|e| ControlError::driver("clear clipboard", e))
    }

    fn get_image(&self) -> Result<Option<RgbaImage>> {
        let data = match Self::open()?.get_image() {
            Ok(data) => data,
            Err(arboard::Error::ContentNotAvailable) => return Ok(None),
            Err(e) => return Err(ControlError::driver("read clipboard image", e)),
        };

        let image = RgbaImage::from_raw(data.width as u32, data.height as u32, data.bytes.into_owned())
            .ok_or_else(|| ControlError::Driver("Clipboard image has an invalid size".to_string()))?;
        Ok(Some(image))
    }
}
