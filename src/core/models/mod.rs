mod app_config;
mod bitmap;
mod capture_result;
mod region;
mod session_mode;

pub use app_config::AppConfig;
pub use bitmap::Bitmap;
pub use capture_result::CaptureResult;
pub use region::Region;
pub use session_mode::SessionMode;
