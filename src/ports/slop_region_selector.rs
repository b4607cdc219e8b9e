use std::process::Command;

use crate::core::interfaces::ports::RegionSelector;
use crate::core::models::Region;
use crate::errors::AcquireError;
use crate::global_constants::{LOG_TAG_REGION, SLOP_BINARY, SLOP_FORMAT};

/// Interactive region selection via `slop`.
///
/// `slop -f %x,%y,%w,%h` blocks until the user drags out a rectangle or
/// aborts, then prints the geometry on stdout.
pub struct SlopRegionSelector;

impl SlopRegionSelector {
    pub fn initialize() -> Self {
        log::debug!("{} initializing slop region selector", LOG_TAG_REGION);
        Self
    }

    /// slop exits 1 with a cancellation notice on stderr when the user
    /// aborts the selection; every other failure is a tool error.
    fn is_cancellation(exit_code: Option<i32>, stderr: &str) -> bool {
        exit_code == Some(1) && stderr.to_lowercase().contains("cancel")
    }
}

impl RegionSelector for SlopRegionSelector {
    fn select_region(&self) -> Result<Region, AcquireError> {
        log::info!("{} launching {} for region selection", LOG_TAG_REGION, SLOP_BINARY);

        let output = Command::new(SLOP_BINARY)
            .args(["-f", SLOP_FORMAT])
            .output()
            .map_err(|e| {
                AcquireError::ToolFailed(format!("failed to run {}: {}", SLOP_BINARY, e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if Self::is_cancellation(output.status.code(), &stderr) {
                log::info!("{} selection cancelled by user", LOG_TAG_REGION);
                return Err(AcquireError::Cancelled);
            }
            return Err(AcquireError::ToolFailed(format!(
                "{} exited with {:?}: {}",
                SLOP_BINARY,
                output.status.code(),
                stderr.trim()
            )));
        }

        let raw = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Region::parse(&raw).map_err(|e| {
            AcquireError::ToolFailed(format!(
                "unparseable {} output {:?}: {}",
                SLOP_BINARY, raw, e
            ))
        })
    }
}
