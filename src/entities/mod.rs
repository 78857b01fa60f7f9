//! Drawing entities
//!
//! Only the entity kinds the etcher reads are modeled: `LINE`, `MTEXT` and
//! `TEXT`. Everything else is an [`UnknownEntity`]. Entities read from a file
//! keep their original code pairs so they can be written back unchanged apart
//! from the layer and color the etcher edits.

use crate::io::dxf::DxfCodePair;
use crate::types::{Color, Handle};

pub mod line;
pub mod mtext;
pub mod text;
pub mod unknown_entity;

pub use line::Line;
pub use mtext::{AttachmentPoint, MText};
pub use text::Text;
pub use unknown_entity::UnknownEntity;

/// Base trait for all entities
pub trait Entity {
    /// Shared entity data
    fn common(&self) -> &EntityCommon;

    /// Mutable shared entity data
    fn common_mut(&mut self) -> &mut EntityCommon;

    /// DXF type name (`LINE`, `MTEXT`, ...)
    fn entity_type(&self) -> &str;

    fn handle(&self) -> Handle {
        self.common().handle
    }

    fn set_handle(&mut self, handle: Handle) {
        self.common_mut().handle = handle;
    }

    fn layer(&self) -> &str {
        &self.common().layer
    }

    fn set_layer(&mut self, layer: String) {
        self.common_mut().layer = layer;
    }

    fn color(&self) -> Color {
        self.common().color
    }

    fn set_color(&mut self, color: Color) {
        self.common_mut().color = color;
    }
}

/// Data every entity carries
#[derive(Debug, Clone, PartialEq)]
pub struct EntityCommon {
    /// Unique handle
    pub handle: Handle,
    /// Owning block record (model space for top-level entities)
    pub owner: Handle,
    /// Layer name
    pub layer: String,
    /// Line type name; empty means ByLayer
    pub line_type: String,
    pub color: Color,
    /// Entity lives in paper space (group code 67)
    pub paper_space: bool,
    /// Code pairs as read, without the leading `0` pair; empty for entities
    /// created in memory
    pub raw: Vec<DxfCodePair>,
}

impl EntityCommon {
    /// Create new common entity data with defaults
    pub fn new() -> Self {
        EntityCommon {
            handle: Handle::NULL,
            owner: Handle::NULL,
            layer: "0".to_string(),
            line_type: String::new(),
            color: Color::ByLayer,
            paper_space: false,
            raw: Vec::new(),
        }
    }

    /// Create with a specific layer
    pub fn with_layer(layer: impl Into<String>) -> Self {
        EntityCommon {
            layer: layer.into(),
            ..Self::new()
        }
    }

    /// Line type name, with an empty name reported as `BYLAYER`
    pub fn effective_line_type(&self) -> &str {
        if self.line_type.is_empty() {
            "BYLAYER"
        } else {
            &self.line_type
        }
    }
}

impl Default for EntityCommon {
    fn default() -> Self {
        Self::new()
    }
}

/// Any entity held by a document
#[derive(Debug, Clone, PartialEq)]
pub enum EntityType {
    Line(Line),
    MText(MText),
    Text(Text),
    Unknown(UnknownEntity),
}

impl EntityType {
    pub fn as_entity(&self) -> &dyn Entity {
        match self {
            EntityType::Line(e) => e,
            EntityType::MText(e) => e,
            EntityType::Text(e) => e,
            EntityType::Unknown(e) => e,
        }
    }

    pub fn as_entity_mut(&mut self) -> &mut dyn Entity {
        match self {
            EntityType::Line(e) => e,
            EntityType::MText(e) => e,
            EntityType::Text(e) => e,
            EntityType::Unknown(e) => e,
        }
    }

    pub fn common(&self) -> &EntityCommon {
        self.as_entity().common()
    }

    pub fn common_mut(&mut self) -> &mut EntityCommon {
        self.as_entity_mut().common_mut()
    }

    pub fn handle(&self) -> Handle {
        self.common().handle
    }
}

impl From<Line> for EntityType {
    fn from(line: Line) -> Self {
        EntityType::Line(line)
    }
}

impl From<MText> for EntityType {
    fn from(mtext: MText) -> Self {
        EntityType::MText(mtext)
    }
}

impl From<Text> for EntityType {
    fn from(text: Text) -> Self {
        EntityType::Text(text)
    }
}

impl From<UnknownEntity> for EntityType {
    fn from(entity: UnknownEntity) -> Self {
        EntityType::Unknown(entity)
    }
}
