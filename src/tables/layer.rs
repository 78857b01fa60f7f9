//! Layer table entry

use super::TableEntry;
use crate::config::LayerStyle;
use crate::types::{Color, Handle};

/// A layer table entry
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    /// Unique handle
    pub handle: Handle,
    /// Layer name
    pub name: String,
    /// Layer color
    pub color: Color,
    /// Line type name
    pub line_type: String,
    /// Layer was created in memory and has no record in the file yet
    pub created: bool,
}

impl Layer {
    /// Create a new layer with default settings
    pub fn new(name: impl Into<String>) -> Self {
        Layer {
            handle: Handle::NULL,
            name: name.into(),
            color: Color::WHITE,
            line_type: "CONTINUOUS".to_string(),
            created: false,
        }
    }

    /// Create a layer with a specific color
    pub fn with_color(name: impl Into<String>, color: Color) -> Self {
        Layer {
            color,
            ..Self::new(name)
        }
    }

    /// A layer to be added for `style`
    pub fn created_from(style: &LayerStyle, handle: Handle) -> Self {
        Layer {
            handle,
            created: true,
            ..Self::with_color(style.name.clone(), style.color)
        }
    }
}

impl TableEntry for Layer {
    fn handle(&self) -> Handle {
        self.handle
    }

    fn name(&self) -> &str {
        &self.name
    }
}
