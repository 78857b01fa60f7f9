//! In-memory DXF drawing

use crate::config::LayerStyle;
use crate::drawing::{Annotation, Drawing, DrawingLine};
use crate::entities::{Entity, EntityType, Line};
use crate::error::{EtchError, Result};
use crate::geometry::Segment;
use crate::io::dxf::DxfCodePair;
use crate::notification::{NotificationCollection, NotificationType};
use crate::tables::{Layer, Table};
use crate::types::{Color, DxfVersion, Handle};
use encoding_rs::Encoding;
use indexmap::IndexMap;

/// A top-level section of the file, in file order
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentSection {
    /// A section kept as code pairs, without its `SECTION`/name/`ENDSEC` pairs
    Raw { name: String, pairs: Vec<DxfCodePair> },
    /// Where the modeled entities are written
    Entities,
}

/// A drawing read from (or to be written to) a DXF file
#[derive(Debug, Clone)]
pub struct CadDocument {
    /// `$ACADVER`
    pub version: DxfVersion,
    /// `$DWGCODEPAGE`
    pub code_page: Option<String>,
    /// Text encoding for pre-2007 drawings; `None` is UTF-8
    pub encoding: Option<&'static Encoding>,
    pub sections: Vec<DocumentSection>,
    /// Layers from the file plus layers created while etching
    pub layers: Table<Layer>,
    /// Handle of the LAYER table record
    pub layer_table_handle: Handle,
    /// Handle of the `*Model_Space` block record; owner of new entities
    pub model_space: Handle,
    /// Notifications collected during the last read and etch
    pub notifications: NotificationCollection,
    /// Entities in drawing order, keyed by handle
    entities: IndexMap<Handle, EntityType>,
    next_handle: u64,
    handles_in_file: bool,
}

impl CadDocument {
    /// Create a new empty document
    pub fn new() -> Self {
        CadDocument {
            version: DxfVersion::Unknown,
            code_page: None,
            encoding: None,
            sections: vec![DocumentSection::Entities],
            layers: Table::new(),
            layer_table_handle: Handle::NULL,
            model_space: Handle::NULL,
            notifications: NotificationCollection::new(),
            entities: IndexMap::new(),
            next_handle: 1,
            handles_in_file: false,
        }
    }

    /// Create a document with a specific version
    pub fn with_version(version: DxfVersion) -> Self {
        CadDocument {
            version,
            ..Self::new()
        }
    }

    /// Allocate a new unique handle
    pub fn allocate_handle(&mut self) -> Handle {
        let handle = Handle::new(self.next_handle);
        self.next_handle = self.next_handle.saturating_add(1);
        handle
    }

    /// Get the next handle value (without allocating)
    pub fn next_handle(&self) -> u64 {
        self.next_handle
    }

    /// Note a handle that exists in the file so new handles never collide
    ///
    /// A handle with no successor is reported and does not move the next
    /// handle.
    pub(crate) fn observe_handle(&mut self, handle: Handle) {
        if handle.is_null() {
            return;
        }
        self.handles_in_file = true;
        match handle.value().checked_add(1) {
            Some(next) if next > self.next_handle => self.next_handle = next,
            Some(_) => {}
            None => self.notifications.notify(
                NotificationType::Warning,
                format!("Handle {} is out of range", handle),
            ),
        }
    }

    /// Raise the next handle to `$HANDSEED`
    pub(crate) fn observe_handle_seed(&mut self, seed: Handle) {
        if seed.value() > self.next_handle {
            self.next_handle = seed.value();
        }
    }

    /// Whether written entities and table records carry group code 5
    pub fn writes_handles(&self) -> bool {
        self.handles_in_file || self.version.has_subclass_markers()
    }

    /// Add an entity, allocating a handle if it has none
    pub fn add_entity(&mut self, mut entity: EntityType) -> Handle {
        if entity.handle().is_null() || self.entities.contains_key(&entity.handle()) {
            let handle = self.allocate_handle();
            entity.as_entity_mut().set_handle(handle);
        }
        let handle = entity.handle();
        self.entities.insert(handle, entity);
        handle
    }

    /// Take ownership of the entities read from a file
    ///
    /// Handles are allocated only after every section has been read, so that
    /// entities without a handle never receive one that a later section uses.
    pub(crate) fn resolve_entities(&mut self, entities: Vec<EntityType>) {
        for entity in entities {
            let handle = entity.handle();
            if !handle.is_null() && self.entities.contains_key(&handle) {
                self.notifications.notify(
                    NotificationType::Warning,
                    format!("Duplicate entity handle {}", handle),
                );
            }
            self.add_entity(entity);
        }
    }

    /// Get an entity by handle
    pub fn get_entity(&self, handle: Handle) -> Option<&EntityType> {
        self.entities.get(&handle)
    }

    /// Get a mutable entity by handle
    pub fn get_entity_mut(&mut self, handle: Handle) -> Option<&mut EntityType> {
        self.entities.get_mut(&handle)
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Iterate over all entities in drawing order
    pub fn entities(&self) -> impl Iterator<Item = &EntityType> {
        self.entities.values()
    }

    /// Layers created in memory, in creation order
    pub fn created_layers(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter().filter(|l| l.created)
    }

    /// Make sure a layer named after `style` exists
    ///
    /// A layer already in the drawing keeps its own color and line type.
    /// Returns `true` when the layer had to be created.
    pub fn ensure_layer(&mut self, style: &LayerStyle) -> bool {
        if self.layers.contains(&style.name) {
            return false;
        }
        if self.layer_table_handle.is_null() && self.writes_handles() {
            self.layer_table_handle = self.allocate_handle();
        }
        let handle = self.allocate_handle();
        // contains() was checked above
        let _ = self.layers.add(Layer::created_from(style, handle));
        log::debug!("created layer {} ({})", style.name, style.color);
        true
    }

    fn entity_mut_or_err(&mut self, handle: Handle) -> Result<&mut EntityType> {
        self.entities
            .get_mut(&handle)
            .ok_or(EtchError::EntityNotFound(handle.value()))
    }

    /// Model-space entities; bends are never read from paper space
    fn model_entities(&self) -> impl Iterator<Item = &EntityType> {
        self.entities.values().filter(|e| !e.common().paper_space)
    }
}

impl Default for CadDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl Drawing for CadDocument {
    fn lines(&self) -> Vec<DrawingLine> {
        self.model_entities()
            .filter_map(|e| match e {
                EntityType::Line(line) => Some(DrawingLine::new(
                    line.common.handle,
                    line.segment(),
                    line.common.layer.clone(),
                    line.common.effective_line_type(),
                )),
                _ => None,
            })
            .collect()
    }

    fn annotations(&self) -> Vec<Annotation> {
        self.model_entities()
            .filter_map(|e| match e {
                EntityType::MText(mtext) => Some(Annotation {
                    handle: mtext.common.handle,
                    value: mtext.value.clone(),
                    position: mtext.insertion_point.to_vector2(),
                    rotation: mtext.rotation.to_degrees(),
                    height: mtext.height,
                }),
                EntityType::Text(text) => Some(Annotation {
                    handle: text.common.handle,
                    value: text.value.clone(),
                    position: text.position().to_vector2(),
                    rotation: text.rotation,
                    height: text.height,
                }),
                _ => None,
            })
            .collect()
    }

    fn add_line(&mut self, segment: Segment, layer: &LayerStyle) -> Handle {
        self.ensure_layer(layer);
        let mut line = Line::from_segment(&segment);
        line.common.layer = layer.name.clone();
        line.common.owner = self.model_space;
        self.add_entity(line.into())
    }

    fn set_layer(&mut self, handle: Handle, layer: &LayerStyle) -> Result<()> {
        self.ensure_layer(layer);
        let entity = self.entity_mut_or_err(handle)?;
        entity.as_entity_mut().set_layer(layer.name.clone());
        Ok(())
    }

    fn set_color(&mut self, handle: Handle, color: Color) -> Result<()> {
        let entity = self.entity_mut_or_err(handle)?;
        entity.as_entity_mut().set_color(color);
        Ok(())
    }
}
