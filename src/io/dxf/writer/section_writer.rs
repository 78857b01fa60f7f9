//! DXF section writers
//!
//! Raw sections go back out as they were read, with two edits: `$HANDSEED`
//! in the HEADER follows the document's next handle, and layers created in
//! memory get records in the LAYER table. Entities read from the file are
//! written from their raw pairs with the layer and color replaced; entities
//! created in memory are written from the model.

use super::stream_writer::{DxfStreamWriter, DxfStreamWriterExt};
use crate::document::{CadDocument, DocumentSection};
use crate::entities::{Entity, EntityCommon, EntityType, Line, MText, Text};
use crate::error::Result;
use crate::io::dxf::DxfCodePair;
use crate::tables::Layer;
use crate::types::{Color, Handle};

/// Longest MTEXT value chunk per group code
const MTEXT_CHUNK: usize = 250;

/// Writes all DXF sections
pub struct SectionWriter<'a, W: DxfStreamWriter> {
    writer: &'a mut W,
    layers_written: bool,
}

impl<'a, W: DxfStreamWriter> SectionWriter<'a, W> {
    /// Create a new section writer
    pub fn new(writer: &'a mut W) -> Self {
        Self {
            writer,
            layers_written: false,
        }
    }

    /// Write every section of `document` followed by `EOF`
    pub fn write_document(&mut self, document: &CadDocument) -> Result<()> {
        self.layers_written = document.created_layers().next().is_none();

        for section in &document.sections {
            match section {
                DocumentSection::Raw { name, pairs } => match name.as_str() {
                    "HEADER" => self.write_header(pairs, document)?,
                    "CLASSES" => self.write_raw_section(name, pairs)?,
                    "TABLES" => self.write_tables(pairs, document)?,
                    _ => {
                        self.write_pending_tables(document)?;
                        self.write_raw_section(name, pairs)?;
                    }
                },
                DocumentSection::Entities => {
                    self.write_pending_tables(document)?;
                    self.write_entities(document)?;
                }
            }
        }

        self.writer.write_eof()
    }

    fn write_raw_section(&mut self, name: &str, pairs: &[DxfCodePair]) -> Result<()> {
        self.writer.write_section_start(name)?;
        for pair in pairs {
            self.writer.write_pair(pair)?;
        }
        self.writer.write_section_end()
    }

    /// Write the HEADER section with `$HANDSEED` brought up to date
    fn write_header(&mut self, pairs: &[DxfCodePair], document: &CadDocument) -> Result<()> {
        self.writer.write_section_start("HEADER")?;
        let mut after_seed = false;
        for pair in pairs {
            let seed = Handle::new(document.next_handle());
            if after_seed && pair.code == 5 && pair.as_handle() != Some(seed) {
                self.writer.write_handle(5, seed)?;
            } else {
                self.writer.write_pair(pair)?;
            }
            after_seed = pair.code == 9 && pair.value_string.trim() == "$HANDSEED";
        }
        self.writer.write_section_end()
    }

    /// Write the TABLES section, adding records for created layers
    fn write_tables(&mut self, pairs: &[DxfCodePair], document: &CadDocument) -> Result<()> {
        let created: Vec<&Layer> = document.created_layers().collect();

        self.writer.write_section_start("TABLES")?;

        let mut after_table = false;
        let mut in_layer_table = false;
        let mut in_layer_header = false;

        for pair in pairs {
            if in_layer_table && pair.is_marker("ENDTAB") {
                for layer in &created {
                    self.write_layer(layer, document)?;
                }
                in_layer_table = false;
                self.layers_written = true;
            }
            if in_layer_header && pair.code == 0 {
                in_layer_header = false;
            }

            match pair.as_i16() {
                // Entry count of the LAYER table
                Some(count) if in_layer_header && pair.code == 70 && !created.is_empty() => {
                    self.writer.write_i16(70, count.saturating_add(created.len() as i16))?;
                }
                _ => self.writer.write_pair(pair)?,
            }

            if after_table && pair.code == 2 && pair.value_string.trim() == "LAYER" {
                in_layer_table = true;
                in_layer_header = true;
            }
            after_table = pair.is_marker("TABLE");
        }

        if !self.layers_written {
            self.write_layer_table(&created, document)?;
        }
        self.writer.write_section_end()
    }

    /// A TABLES section for drawings that had none, written before the first
    /// section that must follow it
    fn write_pending_tables(&mut self, document: &CadDocument) -> Result<()> {
        if self.layers_written {
            return Ok(());
        }
        let created: Vec<&Layer> = document.created_layers().collect();
        self.writer.write_section_start("TABLES")?;
        self.write_layer_table(&created, document)?;
        self.writer.write_section_end()
    }

    fn write_layer_table(&mut self, layers: &[&Layer], document: &CadDocument) -> Result<()> {
        let subclass = document.version.has_subclass_markers();

        self.writer.write_string(0, "TABLE")?;
        self.writer.write_string(2, "LAYER")?;
        if document.writes_handles() && !document.layer_table_handle.is_null() {
            self.writer.write_handle(5, document.layer_table_handle)?;
        }
        if subclass {
            self.writer.write_string(330, "0")?;
            self.writer.write_subclass("AcDbSymbolTable")?;
        }
        self.writer.write_i16(70, layers.len() as i16)?;
        for layer in layers {
            self.write_layer(layer, document)?;
        }
        self.writer.write_string(0, "ENDTAB")?;
        self.layers_written = true;
        Ok(())
    }

    fn write_layer(&mut self, layer: &Layer, document: &CadDocument) -> Result<()> {
        self.writer.write_string(0, "LAYER")?;
        if document.writes_handles() {
            self.writer.write_handle(5, layer.handle)?;
        }
        if document.version.has_subclass_markers() {
            if !document.layer_table_handle.is_null() {
                self.writer.write_handle(330, document.layer_table_handle)?;
            }
            self.writer.write_subclass("AcDbSymbolTableRecord")?;
            self.writer.write_subclass("AcDbLayerTableRecord")?;
        }
        self.writer.write_string(2, &layer.name)?;
        self.writer.write_i16(70, 0)?;
        self.writer.write_color(62, layer.color)?;
        self.writer.write_string(6, &layer.line_type)?;
        Ok(())
    }

    /// Write the ENTITIES section
    fn write_entities(&mut self, document: &CadDocument) -> Result<()> {
        self.writer.write_section_start("ENTITIES")?;
        for entity in document.entities() {
            if !entity.common().raw.is_empty() {
                self.write_raw_entity(entity.as_entity())?;
                continue;
            }
            match entity {
                EntityType::Line(line) => self.write_line(line, document)?,
                EntityType::MText(mtext) => self.write_mtext(mtext, document)?,
                EntityType::Text(text) => self.write_text(text, document)?,
                EntityType::Unknown(unknown) => {
                    log::warn!("{} {} has no data to write", unknown.dxf_name, unknown.common.handle);
                }
            }
        }
        self.writer.write_section_end()
    }

    /// Write an entity from its raw pairs, with the current layer and color
    fn write_raw_entity(&mut self, entity: &dyn Entity) -> Result<()> {
        let common = entity.common();
        let has_color = common.raw.iter().any(|p| p.code == 62);
        let mut layer_done = false;
        let mut color_done = false;

        self.writer.write_string(0, entity.entity_type())?;

        // No layer pair means layer 0
        if !common.raw.iter().any(|p| p.code == 8) && common.layer != "0" {
            self.writer.write_string(8, &common.layer)?;
            if !has_color && common.color != Color::ByLayer {
                self.writer.write_color(62, common.color)?;
            }
            layer_done = true;
        }

        for pair in &common.raw {
            match pair.code {
                8 if !layer_done => {
                    if pair.value_string.trim() == common.layer {
                        self.writer.write_pair(pair)?;
                    } else {
                        self.writer.write_string(8, &common.layer)?;
                    }
                    if !has_color && common.color != Color::ByLayer {
                        self.writer.write_color(62, common.color)?;
                    }
                    layer_done = true;
                }
                62 if !color_done => {
                    if pair.as_i16().map(Color::from_index) == Some(common.color) {
                        self.writer.write_pair(pair)?;
                    } else {
                        self.writer.write_color(62, common.color)?;
                    }
                    color_done = true;
                }
                _ => self.writer.write_pair(pair)?,
            }
        }
        Ok(())
    }

    fn write_common_entity_data(&mut self, common: &EntityCommon, document: &CadDocument) -> Result<()> {
        if document.writes_handles() {
            self.writer.write_handle(5, common.handle)?;
        }
        if document.version.has_subclass_markers() {
            if !common.owner.is_null() {
                self.writer.write_handle(330, common.owner)?;
            }
            self.writer.write_subclass("AcDbEntity")?;
        }
        if common.paper_space {
            self.writer.write_i16(67, 1)?;
        }
        self.writer.write_string(8, &common.layer)?;
        if !common.line_type.is_empty() {
            self.writer.write_string(6, &common.line_type)?;
        }
        if common.color != Color::ByLayer {
            self.writer.write_color(62, common.color)?;
        }
        Ok(())
    }

    /// Write LINE entity
    fn write_line(&mut self, line: &Line, document: &CadDocument) -> Result<()> {
        self.writer.write_string(0, "LINE")?;
        self.write_common_entity_data(&line.common, document)?;
        if document.version.has_subclass_markers() {
            self.writer.write_subclass("AcDbLine")?;
        }
        if line.thickness != 0.0 {
            self.writer.write_double(39, line.thickness)?;
        }
        self.writer.write_point3d(10, line.start)?;
        self.writer.write_point3d(11, line.end)?;
        Ok(())
    }

    /// Write MTEXT entity
    fn write_mtext(&mut self, mtext: &MText, document: &CadDocument) -> Result<()> {
        self.writer.write_string(0, "MTEXT")?;
        self.write_common_entity_data(&mtext.common, document)?;
        if document.version.has_subclass_markers() {
            self.writer.write_subclass("AcDbMText")?;
        }
        self.writer.write_point3d(10, mtext.insertion_point)?;
        self.writer.write_double(40, mtext.height)?;
        self.writer.write_double(41, mtext.rectangle_width)?;
        self.writer.write_i16(71, mtext.attachment_point.value())?;

        let chars: Vec<char> = mtext.value.chars().collect();
        let mut chunks: Vec<String> = chars.chunks(MTEXT_CHUNK).map(|c| c.iter().collect()).collect();
        let last = chunks.pop().unwrap_or_default();
        for chunk in &chunks {
            self.writer.write_string(3, chunk)?;
        }
        self.writer.write_string(1, &last)?;

        if mtext.rotation != 0.0 {
            self.writer.write_double(50, mtext.rotation)?;
        }
        Ok(())
    }

    /// Write TEXT entity
    fn write_text(&mut self, text: &Text, document: &CadDocument) -> Result<()> {
        let subclass = document.version.has_subclass_markers();

        self.writer.write_string(0, "TEXT")?;
        self.write_common_entity_data(&text.common, document)?;
        if subclass {
            self.writer.write_subclass("AcDbText")?;
        }
        self.writer.write_point3d(10, text.insertion_point)?;
        self.writer.write_double(40, text.height)?;
        self.writer.write_string(1, &text.value)?;
        if text.rotation != 0.0 {
            self.writer.write_double(50, text.rotation)?;
        }
        if text.horizontal_alignment != 0 {
            self.writer.write_i16(72, text.horizontal_alignment)?;
        }
        if let Some(point) = text.alignment_point {
            self.writer.write_point3d(11, point)?;
        }
        if subclass {
            self.writer.write_subclass("AcDbText")?;
        }
        if text.vertical_alignment != 0 {
            self.writer.write_i16(73, text.vertical_alignment)?;
        }
        Ok(())
    }
}
