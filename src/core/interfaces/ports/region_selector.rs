use crate::core::models::Region;
use crate::errors::AcquireError;

/// Interactive region selection. Blocks the calling task until the user
/// finishes or cancels; run it inside a `Task::future`, never on the UI
/// thread.
pub trait RegionSelector: Send + Sync {
    fn select_region(&self) -> Result<Region, AcquireError>;
}
