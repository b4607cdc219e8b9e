use std::borrow::Cow;

use anyhow::{Context, Result};

use crate::core::interfaces::ports::ClipboardPort;
use crate::core::models::Bitmap;
use crate::global_constants::LOG_TAG_CLIPBOARD;

/// System clipboard via `arboard`.
///
/// A fresh `arboard::Clipboard` is opened per call; the handle is not
/// `Sync` and terminal actions are rare one-shots anyway.
pub struct ArboardClipboard;

impl ArboardClipboard {
    pub fn initialize() -> Self {
        log::debug!("{} initializing arboard clipboard", LOG_TAG_CLIPBOARD);
        Self
    }
}

impl ClipboardPort for ArboardClipboard {
    fn place_text(&self, text: &str) -> Result<()> {
        let mut clipboard = arboard::Clipboard::new().context("failed to open clipboard")?;
        clipboard
            .set_text(text.to_string())
            .context("failed to place text on clipboard")?;

        log::info!(
            "{} placed {} chars of text on clipboard",
            LOG_TAG_CLIPBOARD,
            text.len()
        );
        Ok(())
    }

    fn place_image(&self, bitmap: &Bitmap) -> Result<()> {
        let mut clipboard = arboard::Clipboard::new().context("failed to open clipboard")?;

        let image_data = arboard::ImageData {
            width: bitmap.width as usize,
            height: bitmap.height as usize,
            bytes: Cow::Borrowed(bitmap.rgba_bytes()),
        };
        clipboard
            .set_image(image_data)
            .context("failed to place image on clipboard")?;

        log::info!(
            "{} placed {}x{} image on clipboard",
            LOG_TAG_CLIPBOARD,
            bitmap.width,
            bitmap.height
        );
        Ok(())
    }
}
