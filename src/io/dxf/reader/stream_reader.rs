//! DXF stream reader trait and common types

use crate::error::Result;
use crate::types::{Handle, Vector3};
use encoding_rs::Encoding;

/// A DXF code/value pair
///
/// The value is kept exactly as it appeared in the file so pairs the model
/// does not interpret can be written back unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct DxfCodePair {
    /// The DXF group code
    pub code: i32,

    /// Value text, without the line terminator
    pub value_string: String,
}

impl DxfCodePair {
    /// Create a new code/value pair
    pub fn new(code: i32, value_string: impl Into<String>) -> Self {
        Self {
            code,
            value_string: value_string.into(),
        }
    }

    /// `true` for a `0` pair with the given value (`SECTION`, `ENDSEC`, ...)
    pub fn is_marker(&self, value: &str) -> bool {
        self.code == 0 && self.value_string.trim() == value
    }

    /// Get value as string
    pub fn as_string(&self) -> &str {
        &self.value_string
    }

    /// Get value as i16
    pub fn as_i16(&self) -> Option<i16> {
        self.value_string.trim().parse::<i16>().ok()
    }

    /// Get value as double
    pub fn as_double(&self) -> Option<f64> {
        self.value_string.trim().parse::<f64>().ok()
    }

    /// Get value as handle (hex string)
    pub fn as_handle(&self) -> Option<Handle> {
        Handle::from_hex(&self.value_string)
    }

    /// `true` for group codes that carry an object handle
    pub fn is_handle_code(&self) -> bool {
        matches!(self.code, 5 | 105)
    }
}

/// Trait for reading DXF code/value pairs from a stream
pub trait DxfStreamReader {
    /// Read the next code/value pair
    fn read_pair(&mut self) -> Result<Option<DxfCodePair>>;

    /// Push a pair back to be read again on next read_pair call
    fn push_back(&mut self, pair: DxfCodePair);

    /// Reset the reader to the beginning
    fn reset(&mut self) -> Result<()>;

    /// Fallback encoding for lines that are not valid UTF-8
    fn set_encoding(&mut self, encoding: &'static Encoding);
}

/// Helper for reading points from the x/y/z codes of one coordinate group
///
/// `base` is the x code (10, 11, ...); y and z follow at +10 and +20.
pub struct PointReader {
    base: i32,
    x: Option<f64>,
    y: Option<f64>,
    z: Option<f64>,
}

impl PointReader {
    /// Create a point reader for the group starting at `base`
    pub fn new(base: i32) -> Self {
        Self {
            base,
            x: None,
            y: None,
            z: None,
        }
    }

    /// Take the pair if it belongs to this group
    ///
    /// Returns `Ok(false)` for pairs of other codes and an error when a
    /// coordinate value is not a number.
    pub fn add_coordinate(&mut self, pair: &DxfCodePair) -> Result<bool> {
        let slot = match pair.code {
            c if c == self.base => &mut self.x,
            c if c == self.base + 10 => &mut self.y,
            c if c == self.base + 20 => &mut self.z,
            _ => return Ok(false),
        };
        let value = pair.as_double().ok_or_else(|| {
            crate::error::EtchError::Parse(format!(
                "Invalid coordinate for code {}: '{}'",
                pair.code, pair.value_string
            ))
        })?;
        *slot = Some(value);
        Ok(true)
    }

    /// Check if we have a complete point
    pub fn is_complete(&self) -> bool {
        self.x.is_some() && self.y.is_some()
    }

    /// Get the point (z = 0 if not provided)
    pub fn get_point(&self) -> Option<Vector3> {
        if let (Some(x), Some(y)) = (self.x, self.y) {
            Some(Vector3::new(x, y, self.z.unwrap_or(0.0)))
        } else {
            None
        }
    }
}
