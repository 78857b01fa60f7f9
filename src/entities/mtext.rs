//! Multiline text entity

use super::{Entity, EntityCommon};
use crate::types::Vector3;

/// Which point of the text box the insertion point refers to (group code 71)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttachmentPoint {
    #[default]
    TopLeft,
    TopCenter,
    TopRight,
    MiddleLeft,
    MiddleCenter,
    MiddleRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl AttachmentPoint {
    pub fn from_value(value: i16) -> Self {
        match value {
            2 => AttachmentPoint::TopCenter,
            3 => AttachmentPoint::TopRight,
            4 => AttachmentPoint::MiddleLeft,
            5 => AttachmentPoint::MiddleCenter,
            6 => AttachmentPoint::MiddleRight,
            7 => AttachmentPoint::BottomLeft,
            8 => AttachmentPoint::BottomCenter,
            9 => AttachmentPoint::BottomRight,
            _ => AttachmentPoint::TopLeft,
        }
    }

    pub fn value(&self) -> i16 {
        *self as i16 + 1
    }
}

/// Multiline text; the value keeps its inline formatting codes
#[derive(Debug, Clone, PartialEq)]
pub struct MText {
    pub common: EntityCommon,
    /// Text content, chunks joined in file order
    pub value: String,
    pub insertion_point: Vector3,
    /// Nominal character height
    pub height: f64,
    /// Reference rectangle width
    pub rectangle_width: f64,
    /// Rotation in radians
    pub rotation: f64,
    pub attachment_point: AttachmentPoint,
}

impl MText {
    pub fn new() -> Self {
        MText {
            common: EntityCommon::new(),
            value: String::new(),
            insertion_point: Vector3::ZERO,
            height: 1.0,
            rectangle_width: 0.0,
            rotation: 0.0,
            attachment_point: AttachmentPoint::TopLeft,
        }
    }

    pub fn with_value(value: impl Into<String>, insertion_point: Vector3, height: f64) -> Self {
        MText {
            value: value.into(),
            insertion_point,
            height,
            ..Self::new()
        }
    }
}

impl Default for MText {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for MText {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn entity_type(&self) -> &str {
        "MTEXT"
    }
}
