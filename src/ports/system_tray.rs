use tray_icon::menu::{Menu, MenuEvent, MenuItem};
use tray_icon::{Icon, TrayIcon, TrayIconBuilder};

use crate::global_constants::{
    LOG_TAG_SYSTEM_TRAY, TRAY_ID_CAPTURE, TRAY_ID_CAPTURE_PREVIOUS, TRAY_ID_QUIT,
    TRAY_ITEM_CAPTURE, TRAY_ITEM_CAPTURE_PREVIOUS, TRAY_ITEM_QUIT, TRAY_TOOLTIP,
};

pub struct SystemTray {
    _tray_icon: TrayIcon,
    _menu: Menu,
    _capture_item: MenuItem,
    _capture_previous_item: MenuItem,
    _quit_item: MenuItem,
}

#[derive(Debug, Clone)]
pub enum TrayEvent {
    Capture,
    CaptureWithPreviousRegion,
    Quit,
}

impl SystemTray {
    pub fn build() -> anyhow::Result<Self> {
        log::info!("{} initializing system tray", LOG_TAG_SYSTEM_TRAY);

        let icon = build_tray_icon()?;

        let menu = Menu::new();
        let capture_item = MenuItem::with_id(TRAY_ID_CAPTURE, TRAY_ITEM_CAPTURE, true, None);
        let capture_previous_item = MenuItem::with_id(
            TRAY_ID_CAPTURE_PREVIOUS,
            TRAY_ITEM_CAPTURE_PREVIOUS,
            true,
            None,
        );
        let quit_item = MenuItem::with_id(TRAY_ID_QUIT, TRAY_ITEM_QUIT, true, None);

        menu.append(&capture_item)?;
        menu.append(&capture_previous_item)?;
        menu.append(&quit_item)?;

        let tray_icon = TrayIconBuilder::new()
            .with_menu(Box::new(menu.clone()))
            .with_tooltip(TRAY_TOOLTIP)
            .with_icon(icon)
            .build()?;

        log::info!("{} system tray initialized successfully", LOG_TAG_SYSTEM_TRAY);

        Ok(Self {
            _tray_icon: tray_icon,
            _menu: menu,
            _capture_item: capture_item,
            _capture_previous_item: capture_previous_item,
            _quit_item: quit_item,
        })
    }

    pub fn poll_events() -> Option<TrayEvent> {
        if let Ok(event) = MenuEvent::receiver().try_recv() {
            log::debug!("{} received menu event: {:?}", LOG_TAG_SYSTEM_TRAY, event.id);
            return TrayEvent::from_menu_event(&event);
        }
        None
    }
}

impl TrayEvent {
    fn from_menu_event(event: &MenuEvent) -> Option<Self> {
        match event.id.0.as_str() {
            TRAY_ID_CAPTURE => Some(TrayEvent::Capture),
            TRAY_ID_CAPTURE_PREVIOUS => Some(TrayEvent::CaptureWithPreviousRegion),
            TRAY_ID_QUIT => Some(TrayEvent::Quit),
            other => {
                log::warn!("{} unknown menu event: {}", LOG_TAG_SYSTEM_TRAY, other);
                None
            }
        }
    }
}

/// Generated glyph, a light square on a dark field. No image asset is
/// bundled.
fn build_tray_icon() -> anyhow::Result<Icon> {
    const SIZE: u32 = 32;
    const BORDER: u32 = 6;

    let mut rgba = Vec::with_capacity((SIZE * SIZE * 4) as usize);
    for y in 0..SIZE {
        for x in 0..SIZE {
            let inside = x >= BORDER && x < SIZE - BORDER && y >= BORDER && y < SIZE - BORDER;
            if inside {
                rgba.extend_from_slice(&[235, 235, 235, 255]);
            } else {
                rgba.extend_from_slice(&[40, 40, 40, 255]);
            }
        }
    }

    Ok(Icon::from_rgba(rgba, SIZE, SIZE)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tray_event_variants_are_cloneable() {
        let capture = TrayEvent::Capture;
        let previous = TrayEvent::CaptureWithPreviousRegion;
        let quit = TrayEvent::Quit;

        let _ = capture.clone();
        let _ = previous.clone();
        let _ = quit.clone();
    }

    #[test]
    fn test_tray_event_debug_names_variant() {
        let debug_str = format!("{:?}", TrayEvent::CaptureWithPreviousRegion);

        assert!(debug_str.contains("CaptureWithPreviousRegion"));
    }

    #[test]
    fn test_generated_icon_has_expected_dimensions() {
        // Icon::from_rgba validates the byte length against 32x32.
        assert!(build_tray_icon().is_ok());
    }
}
