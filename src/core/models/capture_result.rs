use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use chrono::{DateTime, Local};

use crate::core::models::Bitmap;
use crate::global_constants::LOG_TAG_CAPTURE;

/// One finished capture, handed off to the review overlay which then owns
/// both the pixels and the backing file exclusively.
///
/// Construction requires the file to exist on disk; a capture tool's zero
/// exit code alone is never taken as evidence of success.
#[derive(Clone)]
pub struct CaptureResult {
    pub bitmap: Bitmap,
    pub file_path: PathBuf,
    pub created_at: DateTime<Local>,
}

impl std::fmt::Debug for CaptureResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureResult")
            .field("bitmap", &self.bitmap)
            .field("file_path", &self.file_path)
            .field("created_at", &self.created_at)
            .finish()
    }
}

impl CaptureResult {
    pub fn from_capture_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            bail!("capture file {} does not exist", path.display());
        }

        let bitmap = Bitmap::load_png(path)?;

        log::info!(
            "{} capture ready: {}x{} at {}",
            LOG_TAG_CAPTURE,
            bitmap.width,
            bitmap.height,
            path.display()
        );

        Ok(Self {
            bitmap,
            file_path: path.to_path_buf(),
            created_at: Local::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_capture_file_requires_existing_file() {
        let dir = tempfile::tempdir().unwrap();

        let result = CaptureResult::from_capture_file(&dir.path().join("missing.png"));

        assert!(result.is_err());
    }

    #[test]
    fn test_from_capture_file_loads_pixels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shot.png");
        Bitmap::from_rgba(6, 2, vec![128u8; 6 * 2 * 4])
            .save_png(&path)
            .unwrap();

        let capture = CaptureResult::from_capture_file(&path).unwrap();

        assert_eq!(capture.bitmap.width, 6);
        assert_eq!(capture.bitmap.height, 2);
        assert_eq!(capture.file_path, path);
    }
}
