//! The seam between the bend engine and whatever holds the drawing
//!
//! The extractor, generator and classifier only ever see [`DrawingLine`] and
//! [`Annotation`] records. Anything that can list those and accept new lines
//! can be etched; [`CadDocument`](crate::document::CadDocument) is the DXF
//! backed implementation.

use crate::config::LayerStyle;
use crate::error::Result;
use crate::geometry::Segment;
use crate::types::{Color, Handle, Vector2};

/// A straight line as the drawing stores it
#[derive(Debug, Clone, PartialEq)]
pub struct DrawingLine {
    /// Entity handle in the drawing
    pub handle: Handle,
    pub segment: Segment,
    /// Layer name
    pub layer: String,
    /// Line type name (`BYLAYER` when the entity does not set one)
    pub line_type: String,
}

impl DrawingLine {
    pub fn new(
        handle: Handle,
        segment: Segment,
        layer: impl Into<String>,
        line_type: impl Into<String>,
    ) -> Self {
        DrawingLine {
            handle,
            segment,
            layer: layer.into(),
            line_type: line_type.into(),
        }
    }
}

/// A piece of free text placed in the drawing
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    /// Entity handle in the drawing
    pub handle: Handle,
    /// Text content
    pub value: String,
    /// Insertion point
    pub position: Vector2,
    /// Rotation angle
    pub rotation: f64,
    /// Text height, also the unit of the matching distance
    pub height: f64,
}

impl Annotation {
    pub fn new(handle: Handle, value: impl Into<String>, position: Vector2, height: f64) -> Self {
        Annotation {
            handle,
            value: value.into(),
            position,
            rotation: 0.0,
            height,
        }
    }
}

/// Operations the etcher needs from a drawing
pub trait Drawing {
    /// All straight lines, in drawing order
    fn lines(&self) -> Vec<DrawingLine>;

    /// All text annotations, in drawing order
    fn annotations(&self) -> Vec<Annotation>;

    /// Add a new line on `layer` and return its handle
    fn add_line(&mut self, segment: Segment, layer: &LayerStyle) -> Handle;

    /// Move an existing entity onto `layer`
    fn set_layer(&mut self, handle: Handle, layer: &LayerStyle) -> Result<()>;

    /// Change the color of an existing entity
    fn set_color(&mut self, handle: Handle, color: Color) -> Result<()>;
}
