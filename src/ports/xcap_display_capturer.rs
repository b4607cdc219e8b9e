use crate::core::interfaces::ports::DisplayCapturer;
use crate::core::models::Bitmap;
use crate::errors::CaptureError;
use crate::global_constants::LOG_TAG_CAPTURE;

/// Full-display framebuffer grabs via `xcap`, with no external tool
/// involvement. Used only for no-compositor-mode overlay backgrounds.
pub struct XcapDisplayCapturer;

impl XcapDisplayCapturer {
    pub fn initialize() -> Self {
        log::debug!("{} initializing xcap display capturer", LOG_TAG_CAPTURE);
        Self
    }

    fn find_primary_monitor() -> Result<xcap::Monitor, CaptureError> {
        let monitors = xcap::Monitor::all()
            .map_err(|e| CaptureError::DisplayUnavailable(e.to_string()))?;

        if monitors.is_empty() {
            return Err(CaptureError::DisplayUnavailable(
                "no monitors detected".to_string(),
            ));
        }

        let primary = monitors
            .iter()
            .position(|monitor| monitor.is_primary().unwrap_or(false))
            .unwrap_or(0);

        Ok(monitors.into_iter().nth(primary).expect("index in bounds"))
    }

    fn convert_image_to_bitmap(image: xcap::image::RgbaImage) -> Bitmap {
        let width = image.width();
        let height = image.height();

        log::info!(
            "{} grabbed {}x{} full-display background",
            LOG_TAG_CAPTURE,
            width,
            height
        );

        Bitmap::from_rgba(width, height, image.into_raw())
    }
}

impl DisplayCapturer for XcapDisplayCapturer {
    fn capture_primary_display(&self) -> Result<Bitmap, CaptureError> {
        let monitor = Self::find_primary_monitor()?;

        let image = monitor
            .capture_image()
            .map_err(|e| CaptureError::DisplayUnavailable(e.to_string()))?;

        Ok(Self::convert_image_to_bitmap(image))
    }

    fn primary_display_geometry(&self) -> Result<(i32, i32, u32, u32), CaptureError> {
        let monitor = Self::find_primary_monitor()?;

        Ok((
            monitor.x().unwrap_or(0),
            monitor.y().unwrap_or(0),
            monitor.width().unwrap_or(1920),
            monitor.height().unwrap_or(1080),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_image_to_bitmap_keeps_dimensions() {
        let width = 64u32;
        let height = 16u32;
        let raw = vec![200u8; (width * height * 4) as usize];
        let image = xcap::image::RgbaImage::from_raw(width, height, raw).unwrap();

        let bitmap = XcapDisplayCapturer::convert_image_to_bitmap(image);

        assert_eq!(bitmap.width, width);
        assert_eq!(bitmap.height, height);
    }
}
