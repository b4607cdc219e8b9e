mod capture_tool;
mod clipboard_port;
mod display_capturer;
mod region_selector;

pub use capture_tool::CaptureTool;
pub use clipboard_port::ClipboardPort;
pub use display_capturer::DisplayCapturer;
pub use region_selector::RegionSelector;
