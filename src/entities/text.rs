//! Single-line text entity

use super::{Entity, EntityCommon};
use crate::types::Vector3;

#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub common: EntityCommon,
    pub value: String,
    /// First alignment point (group code 10)
    pub insertion_point: Vector3,
    /// Second alignment point (group code 11), present for justified text
    pub alignment_point: Option<Vector3>,
    pub height: f64,
    /// Rotation in degrees
    pub rotation: f64,
    /// Group code 72
    pub horizontal_alignment: i16,
    /// Group code 73
    pub vertical_alignment: i16,
}

impl Text {
    pub fn new() -> Self {
        Text {
            common: EntityCommon::new(),
            value: String::new(),
            insertion_point: Vector3::ZERO,
            alignment_point: None,
            height: 1.0,
            rotation: 0.0,
            horizontal_alignment: 0,
            vertical_alignment: 0,
        }
    }

    pub fn with_value(value: impl Into<String>, insertion_point: Vector3, height: f64) -> Self {
        Text {
            value: value.into(),
            insertion_point,
            height,
            ..Self::new()
        }
    }

    /// Where the text visually anchors
    ///
    /// Justified text is placed by its second alignment point; left-aligned
    /// baseline text by its insertion point.
    pub fn position(&self) -> Vector3 {
        let justified = self.horizontal_alignment != 0 || self.vertical_alignment != 0;
        match self.alignment_point {
            Some(point) if justified => point,
            _ => self.insertion_point,
        }
    }
}

impl Default for Text {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for Text {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn entity_type(&self) -> &str {
        "TEXT"
    }
}
