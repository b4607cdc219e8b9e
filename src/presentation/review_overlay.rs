use std::fs;
use std::path::{Path, PathBuf};

use iced::widget::{button, canvas, column, container, image, stack, text};
use iced::{mouse, Alignment, Background, Border, Color, Element, Length, Point, Rectangle, Shadow};

use crate::core::interfaces::ports::ClipboardPort;
use crate::core::models::{Bitmap, CaptureResult};
use crate::global_constants::{
    BUTTON_COPY_CUSTOM, BUTTON_COPY_IMAGE, BUTTON_SAVE, DIM_LAYER_OPACITY, LOG_TAG_OVERLAY,
    PREVIEW_MAX_EDGE, SHORTCUT_HINT_COPY_CUSTOM, SHORTCUT_HINT_COPY_IMAGE, SHORTCUT_HINT_SAVE,
    WARNING_CUSTOM_STRING_UNSET,
};
use crate::presentation::outlined_label::outlined_label;
use crate::utils;

/// The transient full-screen review surface shown after a capture.
///
/// It holds the session's one `CaptureResult` for its entire lifetime and
/// owns cleanup of the backing file. Exactly one terminal action runs per
/// overlay; anything after the first is a no-op.
pub struct ReviewOverlay {
    capture: CaptureResult,
    background: Option<Bitmap>,
    screenshot_folder: PathBuf,
    custom_string: String,
    finished: bool,
}

/// The four mutually exclusive ways a review ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAction {
    CopyImage,
    CopyCustomString,
    SaveToFolder,
    Cancel,
}

#[derive(Debug, Clone, Copy)]
pub enum ReviewOverlayMessage {
    ActionRequested(ReviewAction),
}

/// What a terminal action left behind for the workflow to surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewAftermath {
    pub warning: Option<String>,
}

impl ReviewOverlay {
    pub fn build(
        capture: CaptureResult,
        background: Option<Bitmap>,
        screenshot_folder: PathBuf,
        custom_string: String,
    ) -> Self {
        log::debug!(
            "{} building overlay for {} (background: {})",
            LOG_TAG_OVERLAY,
            capture.file_path.display(),
            background.is_some()
        );

        Self {
            capture,
            background,
            screenshot_folder,
            custom_string,
            finished: false,
        }
    }

    /// Runs one terminal action. Returns `None` when a previous action
    /// already finished this overlay (shortcut and button firing in the
    /// same gesture, or any later stray call).
    pub fn execute(
        &mut self,
        action: ReviewAction,
        clipboard: &dyn ClipboardPort,
    ) -> Option<ReviewAftermath> {
        if self.finished {
            log::debug!(
                "{} ignoring {:?}, overlay already finished",
                LOG_TAG_OVERLAY,
                action
            );
            return None;
        }
        self.finished = true;

        log::info!("{} executing terminal action {:?}", LOG_TAG_OVERLAY, action);

        let warning = match action {
            ReviewAction::CopyImage => self.perform_copy_image(clipboard),
            ReviewAction::CopyCustomString => self.perform_copy_custom_string(clipboard),
            ReviewAction::SaveToFolder => {
                let save_path = utils::timestamped_screenshot_path(&self.screenshot_folder);
                self.perform_save(&save_path)
            }
            ReviewAction::Cancel => {
                self.remove_backing_file();
                None
            }
        };

        Some(ReviewAftermath { warning })
    }

    fn perform_copy_image(&self, clipboard: &dyn ClipboardPort) -> Option<String> {
        if let Err(e) = clipboard.place_image(&self.capture.bitmap) {
            log::error!("{} failed to copy image: {:#}", LOG_TAG_OVERLAY, e);
        }
        self.remove_backing_file();
        None
    }

    fn perform_copy_custom_string(&self, clipboard: &dyn ClipboardPort) -> Option<String> {
        // The path is about to go on the clipboard, so the file must exist
        // at least momentarily even if something already removed it.
        if !self.capture.file_path.exists() {
            if let Err(e) = self.capture.bitmap.save_png(&self.capture.file_path) {
                log::error!("{} failed to rewrite backing file: {:#}", LOG_TAG_OVERLAY, e);
            }
        }

        let path_text = self.capture.file_path.display().to_string();
        let (clipboard_text, warning) = if self.custom_string.is_empty() {
            log::warn!("{} {}", LOG_TAG_OVERLAY, WARNING_CUSTOM_STRING_UNSET);
            (path_text, Some(WARNING_CUSTOM_STRING_UNSET.to_string()))
        } else {
            (format!("{} {}", self.custom_string, path_text), None)
        };

        if let Err(e) = clipboard.place_text(&clipboard_text) {
            log::error!("{} failed to copy text: {:#}", LOG_TAG_OVERLAY, e);
        }
        self.remove_backing_file();
        warning
    }

    fn perform_save(&self, save_path: &Path) -> Option<String> {
        if save_path == self.capture.file_path {
            // Same-second save into the capture folder; the file is
            // already exactly where it should end up.
            log::info!(
                "{} capture already at {}, keeping it",
                LOG_TAG_OVERLAY,
                save_path.display()
            );
            return None;
        }

        match self.capture.bitmap.save_png(save_path) {
            Ok(()) => {
                self.remove_backing_file();
                None
            }
            Err(e) => {
                log::error!("{} failed to save capture: {:#}", LOG_TAG_OVERLAY, e);
                Some(format!("failed to save screenshot: {}", e))
            }
        }
    }

    fn remove_backing_file(&self) {
        if !self.capture.file_path.exists() {
            return;
        }
        match fs::remove_file(&self.capture.file_path) {
            Ok(()) => log::debug!(
                "{} removed backing file {}",
                LOG_TAG_OVERLAY,
                self.capture.file_path.display()
            ),
            Err(e) => log::warn!(
                "{} failed to remove {}: {}",
                LOG_TAG_OVERLAY,
                self.capture.file_path.display(),
                e
            ),
        }
    }

    pub fn render_ui(&self) -> Element<'_, ReviewOverlayMessage> {
        let mut layers: Vec<Element<'_, ReviewOverlayMessage>> = Vec::new();

        // Only no-compositor mode paints a background; otherwise the live
        // desktop shows through the translucent window.
        if let Some(background) = &self.background {
            layers.push(
                image(background.image_handle.clone())
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .content_fit(iced::ContentFit::Cover)
                    .into(),
            );
        }

        // Dim layer; also the keyboard-shortcut surface (see the canvas
        // Program below).
        layers.push(canvas(self).width(Length::Fill).height(Length::Fill).into());

        let (preview_width, preview_height) = self.capture.bitmap.preview_size(PREVIEW_MAX_EDGE);
        let preview = image(self.capture.bitmap.image_handle.clone())
            .width(Length::Fixed(preview_width))
            .height(Length::Fixed(preview_height));

        let actions = column![
            self.action_button(BUTTON_COPY_IMAGE, ReviewAction::CopyImage),
            outlined_label(SHORTCUT_HINT_COPY_IMAGE),
            self.action_button(BUTTON_SAVE, ReviewAction::SaveToFolder),
            outlined_label(SHORTCUT_HINT_SAVE),
            self.action_button(BUTTON_COPY_CUSTOM, ReviewAction::CopyCustomString),
            outlined_label(SHORTCUT_HINT_COPY_CUSTOM),
        ]
        .spacing(6)
        .align_x(Alignment::Center);

        let content = container(
            column![preview, actions]
                .spacing(20)
                .align_x(Alignment::Center),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill);

        layers.push(content.into());

        container(stack(layers))
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn action_button<'a>(
        &self,
        label: &'a str,
        action: ReviewAction,
    ) -> Element<'a, ReviewOverlayMessage> {
        button(text(label).size(15))
            .padding([10, 24])
            .width(Length::Fixed(220.0))
            .style(|theme, status| action_button_style(theme, status))
            .on_press(ReviewOverlayMessage::ActionRequested(action))
            .into()
    }

    #[cfg(test)]
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

/// Character comparison is case-insensitive; Caps Lock changes the reported
/// character but not the shortcut.
fn shortcut_action(
    key: iced::keyboard::Key<&str>,
    modifiers: iced::keyboard::Modifiers,
) -> Option<ReviewAction> {
    match key {
        iced::keyboard::Key::Named(iced::keyboard::key::Named::Escape) => {
            Some(ReviewAction::Cancel)
        }
        iced::keyboard::Key::Character(c) if modifiers.control() => {
            match c.to_lowercase().as_str() {
                "c" => Some(ReviewAction::CopyImage),
                "s" => Some(ReviewAction::SaveToFolder),
                "x" => Some(ReviewAction::CopyCustomString),
                _ => None,
            }
        }
        _ => None,
    }
}

fn action_button_style(_theme: &iced::Theme, status: button::Status) -> button::Style {
    let background = match status {
        button::Status::Hovered => Color::from_rgba(0.35, 0.35, 0.35, 0.95),
        button::Status::Pressed => Color::from_rgba(0.15, 0.15, 0.15, 0.95),
        _ => Color::from_rgba(0.25, 0.25, 0.25, 0.9),
    };

    button::Style {
        background: Some(Background::Color(background)),
        text_color: Color::WHITE,
        border: Border {
            color: Color::from_rgba(0.6, 0.6, 0.6, 0.9),
            width: 1.0,
            radius: 6.0.into(),
        },
        shadow: Shadow::default(),
        snap: false,
    }
}

impl canvas::Program<ReviewOverlayMessage> for ReviewOverlay {
    type State = ();

    fn update(
        &self,
        _state: &mut Self::State,
        event: &iced::Event,
        _bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Option<canvas::Action<ReviewOverlayMessage>> {
        match event {
            iced::Event::Keyboard(iced::keyboard::Event::KeyPressed { key, modifiers, .. }) => {
                shortcut_action(key.as_ref(), *modifiers).map(|action| {
                    canvas::Action::publish(ReviewOverlayMessage::ActionRequested(action))
                })
            }
            _ => None,
        }
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        _theme: &iced::Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry<iced::Renderer>> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());
        frame.fill_rectangle(
            Point::ORIGIN,
            bounds.size(),
            Color::from_rgba(0.0, 0.0, 0.0, DIM_LAYER_OPACITY),
        );
        vec![frame.into_geometry()]
    }
}
