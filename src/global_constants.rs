#![allow(dead_code)]

pub const APPLICATION_NAME: &str = "quicksnip";
pub const APPLICATION_TITLE: &str = "Quicksnip";

pub const CONFIG_DIR_NAME: &str = "quicksnip";
pub const CONFIG_FILE_NAME: &str = "config.json";
pub const SCREENSHOT_DIR_NAME: &str = "screenshots";

pub const SCREENSHOT_FILE_PREFIX: &str = "screenshot_";
pub const SCREENSHOT_FILE_EXTENSION: &str = "png";
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

pub const SLOP_BINARY: &str = "slop";
pub const SLOP_FORMAT: &str = "%x,%y,%w,%h";
pub const SCROT_BINARY: &str = "scrot";

pub const ONE_SHOT_FLAG: &str = "--screenshot";

pub const LOG_TAG_APP: &str = "[APP]";
pub const LOG_TAG_CONFIG: &str = "[CONFIG]";
pub const LOG_TAG_WORKFLOW: &str = "[WORKFLOW]";
pub const LOG_TAG_OVERLAY: &str = "[OVERLAY]";
pub const LOG_TAG_REGION: &str = "[REGION]";
pub const LOG_TAG_CAPTURE: &str = "[CAPTURE]";
pub const LOG_TAG_CLIPBOARD: &str = "[CLIPBOARD]";
pub const LOG_TAG_SYSTEM_TRAY: &str = "[SYSTEM_TRAY]";
pub const LOG_TAG_INSTANCE: &str = "[INSTANCE]";

pub const TRAY_TOOLTIP: &str = "Quicksnip";
pub const TRAY_ITEM_CAPTURE: &str = "Take Screenshot";
pub const TRAY_ITEM_CAPTURE_PREVIOUS: &str = "Take Screenshot (Previous Region)";
pub const TRAY_ITEM_QUIT: &str = "Quit";

pub const TRAY_ID_CAPTURE: &str = "capture";
pub const TRAY_ID_CAPTURE_PREVIOUS: &str = "capture-previous";
pub const TRAY_ID_QUIT: &str = "quit";

pub const BUTTON_COPY_IMAGE: &str = "Image to Clipboard";
pub const BUTTON_COPY_CUSTOM: &str = "Custom to Clipboard";
pub const BUTTON_SAVE: &str = "Save to Folder";

pub const SHORTCUT_HINT_COPY_IMAGE: &str = "CTRL + C";
pub const SHORTCUT_HINT_COPY_CUSTOM: &str = "CTRL + X";
pub const SHORTCUT_HINT_SAVE: &str = "CTRL + S";

pub const PREVIEW_MAX_EDGE: f32 = 300.0;
pub const DIM_LAYER_OPACITY: f32 = 0.3;

pub const WARNING_CUSTOM_STRING_UNSET: &str =
    "custom string is not configured; copied file path only";
pub const NOTICE_NO_PREVIOUS_REGION: &str = "no previous region saved; select one first";
