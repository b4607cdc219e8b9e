use crate::core::models::Bitmap;
use crate::errors::CaptureError;

/// Reads the primary display's current framebuffer in-process, used only in
/// no-compositor mode to give the overlay a background a compositor would
/// otherwise provide live.
pub trait DisplayCapturer: Send + Sync {
    fn capture_primary_display(&self) -> Result<Bitmap, CaptureError>;

    /// Primary display origin and size as (x, y, width, height), used to
    /// size the full-screen review window.
    fn primary_display_geometry(&self) -> Result<(i32, i32, u32, u32), CaptureError>;
}
