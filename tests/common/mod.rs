//! Shared test utilities for etch-bend-lines integration tests.
//!
//! [`DrawingBuilder`] writes small ASCII DXF drawings the way AutoCAD lays
//! them out (R2000 with handles and tables, or a bare R12 file), and the
//! helpers below read results back.

#![allow(dead_code)]

use etch_bend_lines::io::dxf::{DxfReader, DxfReaderConfiguration};
use etch_bend_lines::{CadDocument, Drawing, DrawingLine};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

// ===========================================================================
// DXF builders
// ===========================================================================

/// Model space block record handle in R2000 drawings
pub const MODEL_SPACE: &str = "1F";

/// Builds an ASCII DXF drawing from entities
pub struct DrawingBuilder {
    version: &'static str,
    code_page: Option<&'static str>,
    with_tables: bool,
    handles: bool,
    next_handle: u64,
    layers: Vec<(String, i16)>,
    entities: String,
}

impl DrawingBuilder {
    /// AutoCAD 2000 drawing with handles, subclass markers and tables
    pub fn r2000() -> Self {
        DrawingBuilder {
            version: "AC1015",
            code_page: Some("ANSI_1252"),
            with_tables: true,
            handles: true,
            next_handle: 0x20,
            layers: vec![("0".to_string(), 7)],
            entities: String::new(),
        }
    }

    /// R12 drawing with a header and an ENTITIES section only
    pub fn r12() -> Self {
        DrawingBuilder {
            version: "AC1009",
            code_page: None,
            with_tables: false,
            handles: false,
            next_handle: 0x20,
            layers: Vec::new(),
            entities: String::new(),
        }
    }

    pub fn with_layer(mut self, name: &str, color: i16) -> Self {
        self.layers.push((name.to_string(), color));
        self
    }

    fn entity_start(&mut self, name: &str, layer: &str) {
        pair(&mut self.entities, 0, name);
        if self.handles {
            let handle = format!("{:X}", self.next_handle);
            self.next_handle += 1;
            pair(&mut self.entities, 5, &handle);
            pair(&mut self.entities, 330, MODEL_SPACE);
            pair(&mut self.entities, 100, "AcDbEntity");
        }
        pair(&mut self.entities, 8, layer);
    }

    fn subclass(&mut self, marker: &str) {
        if self.handles {
            pair(&mut self.entities, 100, marker);
        }
    }

    fn point(&mut self, code: i32, x: f64, y: f64) {
        pair(&mut self.entities, code, &format!("{:?}", x));
        pair(&mut self.entities, code + 10, &format!("{:?}", y));
        pair(&mut self.entities, code + 20, "0.0");
    }

    /// A LINE on `layer`; an empty `line_type` leaves it ByLayer
    pub fn line(mut self, layer: &str, line_type: &str, x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        self.entity_start("LINE", layer);
        if !line_type.is_empty() {
            pair(&mut self.entities, 6, line_type);
        }
        self.subclass("AcDbLine");
        self.point(10, x1, y1);
        self.point(11, x2, y2);
        self
    }

    /// A bend line drawn with the center line type on layer 0
    pub fn bend(self, x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        self.line("0", "CENTERX2", x1, y1, x2, y2)
    }

    /// An MTEXT note on layer 0
    pub fn mtext(mut self, value: &str, x: f64, y: f64, height: f64) -> Self {
        self.entity_start("MTEXT", "0");
        self.subclass("AcDbMText");
        self.point(10, x, y);
        pair(&mut self.entities, 40, &format!("{:?}", height));
        pair(&mut self.entities, 71, "1");
        pair(&mut self.entities, 1, value);
        self
    }

    /// A left-aligned TEXT note on layer 0
    pub fn text(mut self, value: &str, x: f64, y: f64, height: f64) -> Self {
        self.entity_start("TEXT", "0");
        self.subclass("AcDbText");
        self.point(10, x, y);
        pair(&mut self.entities, 40, &format!("{:?}", height));
        pair(&mut self.entities, 1, value);
        self.subclass("AcDbText");
        self
    }

    /// A CIRCLE, which the etcher never looks at
    pub fn circle(mut self, x: f64, y: f64, radius: f64) -> Self {
        self.entity_start("CIRCLE", "0");
        self.subclass("AcDbCircle");
        self.point(10, x, y);
        pair(&mut self.entities, 40, &format!("{:?}", radius));
        self
    }

    /// Drawing text
    pub fn build(&self) -> String {
        let mut out = String::new();

        section(&mut out, "HEADER", |s| {
            pair(s, 9, "$ACADVER");
            pair(s, 1, self.version);
            if let Some(code_page) = self.code_page {
                pair(s, 9, "$DWGCODEPAGE");
                pair(s, 3, code_page);
            }
            if self.handles {
                pair(s, 9, "$HANDSEED");
                pair(s, 5, &format!("{:X}", self.next_handle));
            }
        });

        if self.with_tables {
            section(&mut out, "TABLES", |s| {
                pair(s, 0, "TABLE");
                pair(s, 2, "LAYER");
                pair(s, 5, "2");
                pair(s, 330, "0");
                pair(s, 100, "AcDbSymbolTable");
                pair(s, 70, &self.layers.len().to_string());
                for (i, (name, color)) in self.layers.iter().enumerate() {
                    pair(s, 0, "LAYER");
                    pair(s, 5, &format!("{:X}", 0x10 + i));
                    pair(s, 330, "2");
                    pair(s, 100, "AcDbSymbolTableRecord");
                    pair(s, 100, "AcDbLayerTableRecord");
                    pair(s, 2, name);
                    pair(s, 70, "0");
                    pair(s, 62, &color.to_string());
                    pair(s, 6, "CONTINUOUS");
                }
                pair(s, 0, "ENDTAB");
                pair(s, 0, "TABLE");
                pair(s, 2, "BLOCK_RECORD");
                pair(s, 5, "1");
                pair(s, 330, "0");
                pair(s, 100, "AcDbSymbolTable");
                pair(s, 70, "1");
                pair(s, 0, "BLOCK_RECORD");
                pair(s, 5, MODEL_SPACE);
                pair(s, 330, "1");
                pair(s, 100, "AcDbSymbolTableRecord");
                pair(s, 100, "AcDbBlockTableRecord");
                pair(s, 2, "*Model_Space");
                pair(s, 0, "ENDTAB");
            });
        }

        section(&mut out, "ENTITIES", |s| s.push_str(&self.entities));
        pair(&mut out, 0, "EOF");
        out
    }

    /// Write the drawing into `dir` and return its path
    pub fn write_to(&self, dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, self.build()).unwrap();
        path
    }
}

/// Append one code/value pair, formatted as AutoCAD writes them
pub fn pair(out: &mut String, code: i32, value: &str) {
    let _ = write!(out, "{:>3}\n{}\n", code, value);
}

fn section(out: &mut String, name: &str, body: impl FnOnce(&mut String)) {
    pair(out, 0, "SECTION");
    pair(out, 2, name);
    body(out);
    pair(out, 0, "ENDSEC");
}

// ===========================================================================
// Read helpers
// ===========================================================================

/// Read a DXF file in failsafe mode.
pub fn read_dxf(path: &Path) -> CadDocument {
    DxfReader::from_file(path)
        .unwrap_or_else(|e| panic!("Cannot open DXF {}: {e:?}", path.display()))
        .with_configuration(DxfReaderConfiguration { failsafe: true })
        .read()
        .unwrap_or_else(|e| panic!("Failed to read DXF {}: {e:?}", path.display()))
}

/// Read DXF text in strict mode.
pub fn read_dxf_str(text: &str) -> CadDocument {
    DxfReader::from_reader(std::io::Cursor::new(text.as_bytes().to_vec()))
        .and_then(|reader| reader.read())
        .unwrap_or_else(|e| panic!("Failed to read DXF: {e:?}"))
}

/// Lines on `layer`, ignoring case
pub fn lines_on(doc: &CadDocument, layer: &str) -> Vec<DrawingLine> {
    doc.lines()
        .into_iter()
        .filter(|l| l.layer.eq_ignore_ascii_case(layer))
        .collect()
}

/// Every code/value pair of a DXF text, values trimmed
pub fn code_pairs(text: &str) -> Vec<(i32, String)> {
    let lines: Vec<&str> = text.lines().collect();
    lines
        .chunks(2)
        .filter(|c| c.len() == 2)
        .map(|c| (c[0].trim().parse().unwrap(), c[1].trim().to_string()))
        .collect()
}

/// Handles defined in a DXF text (group code 5, except `$HANDSEED`)
pub fn defined_handles(text: &str) -> Vec<u64> {
    let pairs = code_pairs(text);
    pairs
        .iter()
        .enumerate()
        .filter(|(i, (code, _))| *code == 5 && (*i == 0 || pairs[i - 1].1 != "$HANDSEED"))
        .map(|(_, (_, value))| u64::from_str_radix(value, 16).unwrap())
        .collect()
}

/// `$HANDSEED` of a DXF text
pub fn handle_seed(text: &str) -> Option<u64> {
    code_pairs(text)
        .windows(2)
        .find(|w| w[0] == (9, "$HANDSEED".to_string()))
        .map(|w| u64::from_str_radix(&w[1].1, 16).unwrap())
}

/// File contents as text; pre-2007 output is decoded as Windows-1252
pub fn read_text(path: &Path) -> String {
    let bytes = std::fs::read(path).unwrap();
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => encoding_rs::WINDOWS_1252.decode(e.as_bytes()).0.into_owned(),
    }
}
