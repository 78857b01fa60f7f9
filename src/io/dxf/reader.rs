//! DXF file reader

mod section_reader;
mod stream_reader;
mod text_reader;

pub use stream_reader::{DxfCodePair, DxfStreamReader};
pub use text_reader::DxfTextReader;

use section_reader::SectionReader;

use crate::document::{CadDocument, DocumentSection};
use crate::entities::EntityType;
use crate::error::{EtchError, Result};
use crate::io::dxf::code_page::document_encoding;
use crate::notification::NotificationType;
use crate::types::DxfVersion;
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

/// Configuration for the DXF reader.
#[derive(Debug, Clone, Default)]
pub struct DxfReaderConfiguration {
    /// When `true`, parse errors within individual entities or sections are
    /// caught and reported as notifications instead of aborting the read.
    /// Entities that fail to parse are kept as raw pairs.
    ///
    /// Default: `false` (strict mode, errors propagate).
    pub failsafe: bool,
}

/// DXF file reader
pub struct DxfReader {
    reader: Box<dyn DxfStreamReader>,
    version: DxfVersion,
    code_page: Option<String>,
    config: DxfReaderConfiguration,
}

impl DxfReader {
    /// Create a new DXF reader from any reader
    pub fn from_reader<R: Read + Seek + 'static>(reader: R) -> Result<Self> {
        let mut buf_reader = BufReader::new(reader);
        if Self::is_binary(&mut buf_reader)? {
            return Err(EtchError::InvalidFormat(
                "binary DXF is not supported".to_string(),
            ));
        }

        Ok(Self {
            reader: Box::new(DxfTextReader::new(buf_reader)),
            version: DxfVersion::Unknown,
            code_page: None,
            config: DxfReaderConfiguration::default(),
        })
    }

    /// Create a new DXF reader from a file path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_reader(File::open(path)?)
    }

    /// Check if a stream contains binary DXF data
    fn is_binary<R: Read + Seek>(reader: &mut R) -> Result<bool> {
        const SENTINEL: &[u8] = b"AutoCAD Binary DXF";
        let mut buffer = vec![0u8; SENTINEL.len()];
        let bytes_read = reader.read(&mut buffer)?;
        reader.seek(SeekFrom::Start(0))?;
        Ok(bytes_read == SENTINEL.len() && buffer == SENTINEL)
    }

    /// Set the reader configuration.
    pub fn with_configuration(mut self, config: DxfReaderConfiguration) -> Self {
        self.config = config;
        self
    }

    /// Read a DXF file and return a CadDocument
    pub fn read(mut self) -> Result<CadDocument> {
        self.read_version()?;

        let mut document = CadDocument::with_version(self.version);
        document.code_page = self.code_page.clone();
        document.encoding = document_encoding(self.version, self.code_page.as_deref());
        document.sections.clear();

        let failsafe = self.config.failsafe;
        let mut entities = Vec::new();

        while let Some(pair) = self.reader.read_pair()? {
            if pair.is_marker("EOF") {
                break;
            }
            if !pair.is_marker("SECTION") {
                continue;
            }
            let name = match self.reader.read_pair()? {
                Some(name_pair) if name_pair.code == 2 => name_pair.value_string.trim().to_string(),
                Some(other) => {
                    self.reader.push_back(other);
                    continue;
                }
                None => break,
            };

            let result = if name == "ENTITIES" {
                self.read_entities_section(&mut document, &mut entities)
            } else {
                self.read_raw_section(&mut document, name.clone())
            };

            if let Err(e) = result {
                if !failsafe {
                    return Err(e);
                }
                document.notifications.notify(
                    NotificationType::Error,
                    format!("Error reading {} section: {}", name, e),
                );
                self.skip_section()?;
            }
        }

        if !document.sections.contains(&DocumentSection::Entities) {
            document.sections.push(DocumentSection::Entities);
        }
        document.resolve_entities(entities);

        log::debug!(
            "read {} entities, {} layers, version {}",
            document.entity_count(),
            document.layers.len(),
            document.version
        );
        Ok(document)
    }

    /// Pre-scan the HEADER section for $ACADVER and $DWGCODEPAGE.
    ///
    /// Pre-2007 drawings get their code page set as the fallback encoding
    /// before the full read starts over from the beginning.
    fn read_version(&mut self) -> Result<()> {
        'sections: while let Some(pair) = self.reader.read_pair()? {
            if !pair.is_marker("SECTION") {
                continue;
            }
            let Some(section_pair) = self.reader.read_pair()? else {
                break;
            };
            if section_pair.code != 2 || section_pair.value_string.trim() != "HEADER" {
                // The header is always the first section when present
                break;
            }
            while let Some(header_pair) = self.reader.read_pair()? {
                if header_pair.is_marker("ENDSEC") {
                    break 'sections;
                }
                if header_pair.code != 9 {
                    continue;
                }
                match header_pair.value_string.trim() {
                    "$ACADVER" => {
                        if let Some(vp) = self.reader.read_pair()? {
                            if vp.code == 1 {
                                self.version = DxfVersion::from_version_string(&vp.value_string);
                            }
                        }
                    }
                    "$DWGCODEPAGE" => {
                        if let Some(cp) = self.reader.read_pair()? {
                            if cp.code == 3 {
                                self.code_page = Some(cp.value_string.trim().to_string());
                            }
                        }
                    }
                    _ => {}
                }
            }
        }

        if let Some(enc) = document_encoding(self.version, self.code_page.as_deref()) {
            self.reader.set_encoding(enc);
        }

        self.reader.reset()
    }

    /// Read the ENTITIES section into `entities`
    fn read_entities_section(
        &mut self,
        document: &mut CadDocument,
        entities: &mut Vec<EntityType>,
    ) -> Result<()> {
        if !document.sections.contains(&DocumentSection::Entities) {
            document.sections.push(DocumentSection::Entities);
        }
        let mut sections = SectionReader::new(self.reader.as_mut(), self.config.failsafe);
        sections.read_entities(document, entities)
    }

    /// Keep any other section as raw pairs, indexing what the document needs
    fn read_raw_section(&mut self, document: &mut CadDocument, name: String) -> Result<()> {
        let mut sections = SectionReader::new(self.reader.as_mut(), self.config.failsafe);
        let pairs = sections.read_raw()?;
        match name.as_str() {
            "HEADER" => section_reader::index_header(&pairs, document),
            "TABLES" => section_reader::index_tables(&pairs, document),
            _ => section_reader::index_handles(&pairs, document),
        }
        document.sections.push(DocumentSection::Raw { name, pairs });
        Ok(())
    }

    /// Skip to the end of the current section
    fn skip_section(&mut self) -> Result<()> {
        while let Some(pair) = self.reader.read_pair()? {
            if pair.is_marker("ENDSEC") {
                break;
            }
        }
        Ok(())
    }
}
