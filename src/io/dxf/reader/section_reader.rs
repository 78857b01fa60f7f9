//! Section-level DXF reading
//!
//! The ENTITIES section is parsed into the entity model. Every other section
//! is kept as raw pairs; [`index_header`] and [`index_tables`] pull out the few
//! values the document needs from them.

use super::stream_reader::{DxfCodePair, DxfStreamReader, PointReader};
use crate::document::CadDocument;
use crate::entities::{
    AttachmentPoint, EntityCommon, EntityType, Line, MText, Text, UnknownEntity,
};
use crate::error::{EtchError, Result};
use crate::notification::NotificationType;
use crate::tables::Layer;
use crate::types::{Color, Handle};
use indexmap::IndexMap;

/// Reads the body of one section (everything after its name pair)
pub(super) struct SectionReader<'a> {
    reader: &'a mut dyn DxfStreamReader,
    failsafe: bool,
}

impl<'a> SectionReader<'a> {
    pub fn new(reader: &'a mut dyn DxfStreamReader, failsafe: bool) -> Self {
        Self { reader, failsafe }
    }

    fn next_required(&mut self) -> Result<DxfCodePair> {
        self.reader
            .read_pair()?
            .ok_or_else(|| EtchError::Parse("Unexpected end of file inside a section".to_string()))
    }

    /// Collect every pair up to, not including, `ENDSEC`
    pub fn read_raw(&mut self) -> Result<Vec<DxfCodePair>> {
        let mut pairs = Vec::new();
        loop {
            let pair = self.next_required()?;
            if pair.is_marker("ENDSEC") {
                return Ok(pairs);
            }
            pairs.push(pair);
        }
    }

    /// Read the ENTITIES section
    pub fn read_entities(
        &mut self,
        document: &mut CadDocument,
        entities: &mut Vec<EntityType>,
    ) -> Result<()> {
        let mut passthrough: IndexMap<String, usize> = IndexMap::new();

        loop {
            let pair = self.next_required()?;
            if pair.is_marker("ENDSEC") {
                break;
            }
            if pair.code != 0 {
                // Stray pair between entities
                continue;
            }

            let dxf_name = pair.value_string.trim().to_string();
            let raw = self.read_entity_pairs()?;

            let entity = match read_entity(&dxf_name, raw.clone()) {
                Ok(entity) => entity,
                Err(e) if self.failsafe => {
                    document.notifications.notify(
                        NotificationType::Error,
                        format!("{} {} kept as raw pairs: {}", dxf_name, raw_handle(&raw), e),
                    );
                    EntityType::Unknown(raw_unknown(&dxf_name, raw))
                }
                Err(e) => return Err(e),
            };

            if matches!(entity, EntityType::Unknown(_)) {
                *passthrough.entry(dxf_name).or_insert(0) += 1;
            }
            document.observe_handle(entity.handle());
            entities.push(entity);
        }

        for (name, count) in passthrough {
            document.notifications.notify(
                NotificationType::Passthrough,
                format!("{} {} entities kept as raw pairs", count, name),
            );
        }
        Ok(())
    }

    /// Pairs of the current entity, up to the next `0` pair
    fn read_entity_pairs(&mut self) -> Result<Vec<DxfCodePair>> {
        let mut pairs = Vec::new();
        loop {
            let pair = self.next_required()?;
            if pair.code == 0 {
                self.reader.push_back(pair);
                return Ok(pairs);
            }
            pairs.push(pair);
        }
    }
}

/// Build an entity from its type name and pairs
fn read_entity(dxf_name: &str, raw: Vec<DxfCodePair>) -> Result<EntityType> {
    let entity = match dxf_name {
        "LINE" => EntityType::Line(read_line(&raw)?),
        "MTEXT" => EntityType::MText(read_mtext(&raw)?),
        "TEXT" => EntityType::Text(read_text(&raw)?),
        _ => {
            let mut unknown = UnknownEntity::new(dxf_name);
            for pair in entity_data(&raw) {
                read_common(pair, &mut unknown.common)?;
            }
            EntityType::Unknown(unknown)
        }
    };
    Ok(with_raw(entity, raw))
}

fn with_raw(mut entity: EntityType, raw: Vec<DxfCodePair>) -> EntityType {
    entity.common_mut().raw = raw;
    entity
}

/// Entity pairs without reactor/dictionary groups and extended data
fn entity_data(raw: &[DxfCodePair]) -> impl Iterator<Item = &DxfCodePair> {
    let mut in_group = false;
    raw.iter()
        .take_while(|p| p.code < 1000)
        .filter(move |p| {
            if p.code == 102 {
                in_group = p.value_string.trim_start().starts_with('{');
                return false;
            }
            !in_group
        })
}

fn double(pair: &DxfCodePair) -> Result<f64> {
    pair.as_double().ok_or_else(|| {
        EtchError::Parse(format!(
            "Invalid value for code {}: '{}'",
            pair.code, pair.value_string
        ))
    })
}

fn int16(pair: &DxfCodePair) -> Result<i16> {
    pair.as_i16().ok_or_else(|| {
        EtchError::Parse(format!(
            "Invalid value for code {}: '{}'",
            pair.code, pair.value_string
        ))
    })
}

/// Apply a pair shared by all entities; `Ok(false)` if the code is not one
fn read_common(pair: &DxfCodePair, common: &mut EntityCommon) -> Result<bool> {
    match pair.code {
        5 => common.handle = pair.as_handle().unwrap_or(Handle::NULL),
        330 if common.owner.is_null() => common.owner = pair.as_handle().unwrap_or(Handle::NULL),
        8 => common.layer = pair.value_string.trim().to_string(),
        6 => common.line_type = pair.value_string.trim().to_string(),
        62 => common.color = Color::from_index(int16(pair)?),
        67 => common.paper_space = int16(pair)? == 1,
        _ => return Ok(false),
    }
    Ok(true)
}

/// Read a LINE entity
fn read_line(raw: &[DxfCodePair]) -> Result<Line> {
    let mut line = Line::new();
    let mut start = PointReader::new(10);
    let mut end = PointReader::new(11);

    for pair in entity_data(raw) {
        if read_common(pair, &mut line.common)? {
            continue;
        }
        if start.add_coordinate(pair)? || end.add_coordinate(pair)? {
            continue;
        }
        if pair.code == 39 {
            line.thickness = double(pair)?;
        }
    }

    line.start = start.get_point().unwrap_or_default();
    line.end = end.get_point().unwrap_or_default();
    Ok(line)
}

/// Read an MTEXT entity
fn read_mtext(raw: &[DxfCodePair]) -> Result<MText> {
    let mut mtext = MText::new();
    let mut insertion = PointReader::new(10);
    let mut direction = PointReader::new(11);

    for pair in entity_data(raw) {
        if read_common(pair, &mut mtext.common)? {
            continue;
        }
        if insertion.add_coordinate(pair)? || direction.add_coordinate(pair)? {
            continue;
        }
        match pair.code {
            // Chunks (3) come before the final piece (1)
            1 | 3 => mtext.value.push_str(&pair.value_string),
            40 => mtext.height = double(pair)?,
            41 => mtext.rectangle_width = double(pair)?,
            50 => mtext.rotation = double(pair)?,
            71 => mtext.attachment_point = AttachmentPoint::from_value(int16(pair)?),
            _ => {}
        }
    }

    mtext.insertion_point = insertion.get_point().unwrap_or_default();
    // An x-axis direction vector overrides the rotation angle
    if let Some(dir) = direction.get_point() {
        mtext.rotation = dir.y.atan2(dir.x);
    }
    Ok(mtext)
}

/// Read a TEXT entity
fn read_text(raw: &[DxfCodePair]) -> Result<Text> {
    let mut text = Text::new();
    let mut insertion = PointReader::new(10);
    let mut alignment = PointReader::new(11);

    for pair in entity_data(raw) {
        if read_common(pair, &mut text.common)? {
            continue;
        }
        if insertion.add_coordinate(pair)? || alignment.add_coordinate(pair)? {
            continue;
        }
        match pair.code {
            1 => text.value = pair.value_string.clone(),
            40 => text.height = double(pair)?,
            50 => text.rotation = double(pair)?,
            72 => text.horizontal_alignment = int16(pair)?,
            73 => text.vertical_alignment = int16(pair)?,
            _ => {}
        }
    }

    text.insertion_point = insertion.get_point().unwrap_or_default();
    text.alignment_point = alignment.get_point();
    Ok(text)
}

/// Best-effort handle of an entity that failed to parse, for messages
fn raw_handle(raw: &[DxfCodePair]) -> Handle {
    raw.iter()
        .find(|p| p.code == 5)
        .and_then(|p| p.as_handle())
        .unwrap_or(Handle::NULL)
}

/// An entity that failed to parse, kept with whatever common data is readable
fn raw_unknown(dxf_name: &str, raw: Vec<DxfCodePair>) -> UnknownEntity {
    let mut unknown = UnknownEntity::new(dxf_name);
    for pair in entity_data(&raw) {
        let _ = read_common(pair, &mut unknown.common);
    }
    unknown.common.raw = raw;
    unknown
}

/// Split section pairs into records, each starting at a `0` pair
fn records(pairs: &[DxfCodePair]) -> impl Iterator<Item = &[DxfCodePair]> {
    let starts: Vec<usize> = pairs
        .iter()
        .enumerate()
        .filter(|(_, p)| p.code == 0)
        .map(|(i, _)| i)
        .collect();
    let ends: Vec<usize> = starts.iter().skip(1).copied().chain(std::iter::once(pairs.len())).collect();
    starts.into_iter().zip(ends).map(move |(s, e)| &pairs[s..e])
}

fn value_of(record: &[DxfCodePair], code: i32) -> Option<&str> {
    record
        .iter()
        .find(|p| p.code == code)
        .map(|p| p.value_string.trim())
}

/// Pick `$HANDSEED` out of the HEADER section
pub(super) fn index_header(pairs: &[DxfCodePair], document: &mut CadDocument) {
    let seed = pairs
        .windows(2)
        .find(|w| w[0].code == 9 && w[0].value_string.trim() == "$HANDSEED")
        .and_then(|w| w[1].as_handle());
    if let Some(seed) = seed {
        document.observe_handle_seed(seed);
    }
}

/// Record every handle defined in a raw section
pub(super) fn index_handles(pairs: &[DxfCodePair], document: &mut CadDocument) {
    for pair in pairs.iter().filter(|p| p.is_handle_code()) {
        if let Some(handle) = pair.as_handle() {
            document.observe_handle(handle);
        }
    }
}

/// Index the layer table and the model space block record
pub(super) fn index_tables(pairs: &[DxfCodePair], document: &mut CadDocument) {
    index_handles(pairs, document);

    for record in records(pairs) {
        let handle = value_of(record, 5)
            .and_then(Handle::from_hex)
            .unwrap_or(Handle::NULL);

        match record[0].value_string.trim() {
            "TABLE" if value_of(record, 2) == Some("LAYER") => {
                document.layer_table_handle = handle;
            }
            "LAYER" => {
                let Some(name) = value_of(record, 2) else {
                    continue;
                };
                let mut layer = Layer::new(name);
                layer.handle = handle;
                if let Some(color) = value_of(record, 62).and_then(|v| v.parse::<i16>().ok()) {
                    layer.color = Color::from_index(color);
                }
                if let Some(line_type) = value_of(record, 6) {
                    layer.line_type = line_type.to_string();
                }
                if let Err(e) = document.layers.add(layer) {
                    document.notifications.notify(NotificationType::Warning, e);
                }
            }
            "BLOCK_RECORD" => {
                if value_of(record, 2).is_some_and(|n| n.eq_ignore_ascii_case("*Model_Space")) {
                    document.model_space = handle;
                }
            }
            _ => {}
        }
    }
}
