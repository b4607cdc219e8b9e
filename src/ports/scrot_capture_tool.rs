use std::path::Path;
use std::process::Command;

use crate::core::interfaces::ports::CaptureTool;
use crate::core::models::Region;
use crate::errors::CaptureError;
use crate::global_constants::{LOG_TAG_CAPTURE, SCROT_BINARY};

/// Region capture via `scrot -a x,y,w,h <dest>`.
pub struct ScrotCaptureTool;

impl ScrotCaptureTool {
    pub fn initialize() -> Self {
        log::debug!("{} initializing scrot capture tool", LOG_TAG_CAPTURE);
        Self
    }
}

impl CaptureTool for ScrotCaptureTool {
    fn capture_region(&self, region: &Region, dest: &Path) -> Result<(), CaptureError> {
        let geometry = region.to_string();
        log::info!(
            "{} capturing region {} to {}",
            LOG_TAG_CAPTURE,
            geometry,
            dest.display()
        );

        let output = Command::new(SCROT_BINARY)
            .arg("-a")
            .arg(&geometry)
            .arg(dest)
            .output()
            .map_err(|e| {
                CaptureError::ToolFailed(format!("failed to run {}: {}", SCROT_BINARY, e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CaptureError::ToolFailed(format!(
                "{} exited with {:?}: {}",
                SCROT_BINARY,
                output.status.code(),
                stderr.trim()
            )));
        }

        // A zero exit code alone is not trusted.
        if !dest.exists() {
            return Err(CaptureError::ToolFailed(format!(
                "{} reported success but {} does not exist",
                SCROT_BINARY,
                dest.display()
            )));
        }

        Ok(())
    }
}
