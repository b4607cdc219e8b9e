mod arboard_clipboard;
mod scrot_capture_tool;
mod slop_region_selector;
pub mod system_tray;
mod xcap_display_capturer;

pub use arboard_clipboard::ArboardClipboard;
pub use scrot_capture_tool::ScrotCaptureTool;
pub use slop_region_selector::SlopRegionSelector;
pub use system_tray::{SystemTray, TrayEvent};
pub use xcap_display_capturer::XcapDisplayCapturer;
