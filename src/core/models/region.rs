use std::fmt;

use crate::errors::RegionParseError;
use crate::global_constants::LOG_TAG_REGION;

/// A user-selected rectangular subarea of the display, in monitor-space
/// pixel coordinates. Immutable once constructed; width and height are
/// always greater than zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Result<Self, RegionParseError> {
        if width == 0 || height == 0 {
            return Err(RegionParseError::EmptySize);
        }
        Ok(Self {
            x,
            y,
            width,
            height,
        })
    }

    /// Parses the comma-joined `x,y,w,h` form used both by the selection
    /// tool's output and the persisted config value.
    pub fn parse(raw: &str) -> Result<Self, RegionParseError> {
        let fields: Vec<&str> = raw.trim().split(',').map(str::trim).collect();
        if fields.len() != 4 {
            return Err(RegionParseError::WrongFieldCount(fields.len()));
        }

        let x = parse_field::<i32>(fields[0])?;
        let y = parse_field::<i32>(fields[1])?;
        let width = parse_field::<u32>(fields[2])?;
        let height = parse_field::<u32>(fields[3])?;

        log::debug!(
            "{} parsed region {},{} {}x{}",
            LOG_TAG_REGION,
            x,
            y,
            width,
            height
        );

        Self::new(x, y, width, height)
    }
}

fn parse_field<T: std::str::FromStr>(field: &str) -> Result<T, RegionParseError> {
    field.parse().map_err(|_| RegionParseError::InvalidNumber {
        field: field.to_string(),
    })
}

impl fmt::Display for Region {
    /// The same `x,y,w,h` form `parse` accepts, also used as the capture
    /// tool's geometry argument.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.x, self.y, self.width, self.height)
    }
}
