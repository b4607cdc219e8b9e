use std::path::Path;

use anyhow::{Context, Result};
use iced::widget::image;

use crate::global_constants::LOG_TAG_CAPTURE;

/// An in-memory RGBA image with a cached iced handle for rendering.
///
/// Captured pixels are never transformed; the bitmap is only scaled for
/// preview and written back out as-is.
#[derive(Clone)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    pub image_handle: image::Handle,
    raw_rgba: Vec<u8>,
}

impl std::fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bitmap")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

impl Bitmap {
    pub fn from_rgba(width: u32, height: u32, raw_rgba: Vec<u8>) -> Self {
        log::debug!(
            "{} building bitmap {}x{} ({} bytes)",
            LOG_TAG_CAPTURE,
            width,
            height,
            raw_rgba.len()
        );

        Self {
            width,
            height,
            image_handle: image::Handle::from_rgba(width, height, raw_rgba.clone()),
            raw_rgba,
        }
    }

    pub fn load_png(path: &Path) -> Result<Self> {
        let decoded = ::image::open(path)
            .with_context(|| format!("failed to decode image at {}", path.display()))?
            .to_rgba8();

        let (width, height) = decoded.dimensions();
        Ok(Self::from_rgba(width, height, decoded.into_raw()))
    }

    pub fn save_png(&self, path: &Path) -> Result<()> {
        let buffer =
            ::image::RgbaImage::from_raw(self.width, self.height, self.raw_rgba.clone())
                .context("bitmap byte length does not match its dimensions")?;

        buffer
            .save(path)
            .with_context(|| format!("failed to write image to {}", path.display()))?;

        log::info!(
            "{} wrote {}x{} image to {}",
            LOG_TAG_CAPTURE,
            self.width,
            self.height,
            path.display()
        );
        Ok(())
    }

    pub fn rgba_bytes(&self) -> &[u8] {
        &self.raw_rgba
    }

    /// Preview dimensions with the longest edge capped at `max_edge`,
    /// aspect ratio preserved. Images already within the cap keep their
    /// native size.
    pub fn preview_size(&self, max_edge: f32) -> (f32, f32) {
        let width = self.width as f32;
        let height = self.height as f32;
        let longest = width.max(height);

        if longest <= max_edge {
            return (width, height);
        }

        let scale = max_edge / longest;
        (width * scale, height * scale)
    }
}
