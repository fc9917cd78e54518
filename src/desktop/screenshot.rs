//! Cross-platform screenshot capture using xcap
//!
//! Also holds the image encoders shared by the screenshot and clipboard routes.

use base64::Engine;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ImageEncoder, RgbaImage};
use std::io::Cursor;
use std::path::Path;
use xcap::Monitor;

use super::platform::DisplayDriver;
use super::types::Region;
use crate::error::{ControlError, Result};

/// Display driver backed by the primary monitor
#[derive(Debug, Default)]
pub struct XcapDisplay;

impl XcapDisplay {
    pub fn new() -> Self {
        Self
    }

    fn primary_monitor() -> Result<Monitor> {
        let monitors = Monitor::all().map_err(|e| ControlError::driver("get monitors", e))?;

        monitors
            .into_iter()
            .find(|m| m.is_primary())
            .ok_or_else(|| ControlError::Driver("No primary monitor found".to_string()))
    }
}

impl DisplayDriver for XcapDisplay {
    fn screen_size(&self) -> Result<(u32, u32)> {
        let primary = Self::primary_monitor()?;
        Ok((primary.width(), primary.height()))
    }

    fn capture(&self, region: Option<Region>) -> Result<RgbaImage> {
        let primary = Self::primary_monitor()?;
        let image = primary
            .capture_image()
            .map_err(|e| ControlError::driver("capture screen", e))?;

        match region {
            None => Ok(image),
            // Region coordinates are global; the capture starts at the monitor origin
            Some(region) => crop(
                &image,
                Region {
                    x: region.x - primary.x(),
                    y: region.y - primary.y(),
                    ..region
                },
            ),
        }
    }
}

/// Cut a region out of a captured frame, clipped to the frame bounds.
pub fn crop(image: &RgbaImage, region: Region) -> Result<RgbaImage> {
    if region.width == 0 || region.height == 0 {
        return Err(ControlError::invalid("Region width and height must be positive"));
    }

    let (frame_w, frame_h) = image.dimensions();
    let left = region.x.max(0) as u32;
    let top = region.y.max(0) as u32;
    let right = (i64::from(region.x) + i64::from(region.width)).min(i64::from(frame_w));
    let bottom = (i64::from(region.y) + i64::from(region.height)).min(i64::from(frame_h));

    if left >= frame_w || top >= frame_h || right <= i64::from(left) || bottom <= i64::from(top) {
        return Err(ControlError::invalid(format!(
            "Region ({}, {}, {}x{}) is outside the screen",
            region.x, region.y, region.width, region.height
        )));
    }

    let width = right as u32 - left;
    let height = bottom as u32 - top;
    Ok(image::imageops::crop_imm(image, left, top, width, height).to_image())
}

/// Encode as JPEG at the given quality (1-100) and base64 the bytes
pub fn to_jpeg_base64(image: &RgbaImage, quality: u8) -> Result<String> {
    // JPEG has no alpha channel
    let rgb = DynamicImage::ImageRgba8(image.clone()).to_rgb8();

    let mut buffer = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100))
        .write_image(
            rgb.as_raw(),
            rgb.width(),
            rgb.height(),
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| ControlError::Internal(format!("Failed to encode JPEG: {}", e)))?;

    Ok(base64::engine::general_purpose::STANDARD.encode(buffer.into_inner()))
}

/// Encode as PNG and base64 the bytes
pub fn to_png_base64(image: &RgbaImage) -> Result<String> {
    let mut buffer = Cursor::new(Vec::new());
    PngEncoder::new(&mut buffer)
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|e| ControlError::Internal(format!("Failed to encode PNG: {}", e)))?;

    Ok(base64::engine::general_purpose::STANDARD.encode(buffer.into_inner()))
}

/// Write the image to disk as PNG
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<()> {
    image
        .save_with_format(path, image::ImageFormat::Png)
        .map_err(|e| ControlError::Driver(format!("Failed to save screenshot to {}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn frame() -> RgbaImage {
        RgbaImage::from_fn(100, 50, |x, _| Rgba([x as u8, 0, 0, 255]))
    }

    #[test]
    fn test_crop_inside() {
        let out = crop(&frame(), Region { x: 10, y: 5, width: 20, height: 10 }).unwrap();
        assert_eq!(out.dimensions(), (20, 10));
        assert_eq!(out.get_pixel(0, 0)[0], 10);
    }

    #[test]
    fn test_crop_clips_to_frame() {
        let out = crop(&frame(), Region { x: 90, y: 40, width: 50, height: 50 }).unwrap();
        assert_eq!(out.dimensions(), (10, 10));
    }

    #[test]
    fn test_crop_outside_fails() {
        assert!(crop(&frame(), Region { x: 200, y: 0, width: 5, height: 5 }).is_err());
        assert!(crop(&frame(), Region { x: 0, y: 0, width: 0, height: 5 }).is_err());
    }

    #[test]
    fn test_jpeg_is_base64_jpeg() {
        use base64::Engine;
        let encoded = to_jpeg_base64(&frame(), 85).unwrap();
        let bytes = base64::engine::general_purpose::STANDARD.decode(encoded).unwrap();
        // JPEG SOI marker
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_png_is_base64_png() {
        use base64::Engine;
        let encoded = to_png_base64(&frame()).unwrap();
        let bytes = base64::engine::general_purpose::STANDARD.decode(encoded).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
    }
}
