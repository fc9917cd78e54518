use std::path::Path;

use crate::desktop::screenshot::{save_png, to_jpeg_base64};
use crate::desktop::{DisplayDriver, Region};
use crate::error::Result;

/// Capture the screen (or a region) as base64 JPEG
pub fn capture_base64(display: &dyn DisplayDriver, region: Option<Region>, quality: u8) -> Result<String> {
    let image = display.capture(region)?;
    to_jpeg_base64(&image, quality)
}

/// Capture the full screen to a PNG file
pub fn capture_to_file(display: &dyn DisplayDriver, path: &Path) -> Result<()> {
    let image = display.capture(None)?;
    save_png(&image, path)
}
