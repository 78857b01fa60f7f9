//! Entities carried through as raw code pairs.
//!
//! Circles, arcs, polylines, dimensions and every other entity kind the
//! etcher never looks at are read into this type. Layer and color are still
//! parsed so the document can report them; everything is written back from
//! the raw pairs.

use crate::entities::{Entity, EntityCommon};

#[derive(Debug, Clone, PartialEq)]
pub struct UnknownEntity {
    /// Common entity data, including the raw pairs.
    pub common: EntityCommon,
    /// The DXF type name as it appeared in the file (e.g. `"CIRCLE"`).
    pub dxf_name: String,
}

impl UnknownEntity {
    pub fn new(dxf_name: impl Into<String>) -> Self {
        Self {
            common: EntityCommon::new(),
            dxf_name: dxf_name.into(),
        }
    }
}

impl Entity for UnknownEntity {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn entity_type(&self) -> &str {
        &self.dxf_name
    }
}
