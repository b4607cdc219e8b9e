use std::path::Path;

use crate::core::models::Region;
use crate::errors::CaptureError;

/// Captures a screen region directly into `dest`.
///
/// Implementations must verify the destination file exists after the tool
/// reports success; a zero exit code alone is not sufficient evidence.
pub trait CaptureTool: Send + Sync {
    fn capture_region(&self, region: &Region, dest: &Path) -> Result<(), CaptureError>;
}
