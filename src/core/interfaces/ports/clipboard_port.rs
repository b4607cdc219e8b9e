use anyhow::Result;

use crate::core::models::Bitmap;

/// System clipboard access for the overlay's terminal actions.
pub trait ClipboardPort: Send + Sync {
    fn place_text(&self, text: &str) -> Result<()>;

    fn place_image(&self, bitmap: &Bitmap) -> Result<()>;
}
