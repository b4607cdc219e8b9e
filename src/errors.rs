//! Typed errors for the capture workflow.
//!
//! Every variant is `Clone` so results can ride inside iced messages between
//! the background tasks and the workflow state machine.

use thiserror::Error;

/// Failures while obtaining a capture region, either interactively or from
/// the persisted previous selection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AcquireError {
    /// The user aborted the interactive selection.
    #[error("region selection was cancelled")]
    Cancelled,

    /// The selection tool exited non-zero or produced unparseable output.
    #[error("region selection tool failed: {0}")]
    ToolFailed(String),

    /// No region has been saved from a previous capture.
    #[error("no region saved from a previous capture")]
    NoSavedRegion,

    /// The persisted region string could not be parsed back into a region.
    #[error("saved region coordinates are malformed: {0}")]
    MalformedSavedRegion(String),
}

/// Failures while producing the captured image.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    /// The capture tool exited non-zero, or reported success without
    /// producing the destination file.
    #[error("screen capture tool failed: {0}")]
    ToolFailed(String),

    /// The display subsystem could not be read for a full-display grab.
    #[error("display unavailable: {0}")]
    DisplayUnavailable(String),
}

/// Failures in the configuration store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("config key missing: {0}")]
    KeyMissing(String),

    #[error("config file unreadable: {0}")]
    Unreadable(String),
}

/// Malformed region strings, from tool output or the config file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegionParseError {
    #[error("expected 4 comma-separated fields, found {0}")]
    WrongFieldCount(usize),

    #[error("field {field:?} is not a valid number")]
    InvalidNumber { field: String },

    #[error("region width and height must be greater than zero")]
    EmptySize,
}
