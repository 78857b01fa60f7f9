//! Etching a whole drawing
//!
//! [`Etcher`] ties the extractor, generator and classifier together and
//! applies their results to a [`Drawing`]: bend lines and their notes move
//! to the bend layer, and upward bends get etch lines on the etch layer.

use crate::bend::{BendDirection, BendLineExtractor};
use crate::config::EtchConfiguration;
use crate::document::CadDocument;
use crate::drawing::Drawing;
use crate::error::Result;
use crate::etch::EtchGenerator;
use crate::geometry::Segment;
use crate::io::dxf::{DxfReader, DxfReaderConfiguration, DxfWriter};
use crate::notification::NotificationType;
use crate::part_type::PartType;
use crate::types::{Color, Handle};
use std::fmt;
use std::path::Path;

/// What one etching pass did to a drawing
#[derive(Debug, Clone, PartialEq)]
pub struct EtchReport {
    /// Bend lines found (after the radius filter)
    pub bends: usize,
    pub up: usize,
    pub down: usize,
    pub part_type: PartType,
    /// Etch lines added to the drawing
    pub added: usize,
    /// Existing lines moved onto the etch layer instead of adding a duplicate
    pub reused: usize,
    /// Bend line candidates skipped because they have zero length
    pub degenerate: Vec<Handle>,
}

impl EtchReport {
    /// Whether the pass changed anything in the drawing
    pub fn is_modified(&self) -> bool {
        self.bends > 0
    }
}

impl fmt::Display for EtchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} bends ({} up, {} down), {}, {} etch lines added, {} reused",
            self.bends, self.up, self.down, self.part_type, self.added, self.reused
        )?;
        if !self.degenerate.is_empty() {
            write!(f, ", {} zero-length bend lines skipped", self.degenerate.len())?;
        }
        Ok(())
    }
}

/// Finds bend lines in a drawing and etches the upward ones
#[derive(Debug, Clone)]
pub struct Etcher {
    config: EtchConfiguration,
    extractor: BendLineExtractor,
    generator: EtchGenerator,
}

impl Default for Etcher {
    fn default() -> Self {
        Self::new(EtchConfiguration::default())
    }
}

impl Etcher {
    pub fn new(config: EtchConfiguration) -> Self {
        Etcher {
            extractor: BendLineExtractor::new(&config),
            generator: EtchGenerator::new(&config),
            config,
        }
    }

    pub fn config(&self) -> &EtchConfiguration {
        &self.config
    }

    /// Etch `drawing` in place
    ///
    /// An etch line whose endpoints exactly equal those of a line already on
    /// an etch-like layer is not added; that line is moved to the etch layer
    /// instead. Lines added during this pass count as existing for the rest
    /// of it.
    pub fn etch<D: Drawing + ?Sized>(&self, drawing: &mut D) -> Result<EtchReport> {
        let lines = drawing.lines();
        let annotations = drawing.annotations();

        let degenerate = self.extractor.degenerate_candidates(&lines);
        let bends = self.extractor.extract(&lines, &annotations);

        let bend_layer = &self.config.bend_layer;
        for bend in &bends {
            drawing.set_layer(bend.handle, bend_layer)?;
            drawing.set_color(bend.handle, Color::ByLayer)?;
            if let Some(note) = bend.note {
                drawing.set_layer(note.handle, bend_layer)?;
            }
        }

        let mut existing: Vec<(Handle, Segment)> = lines
            .iter()
            .filter(|line| self.config.is_etch_like_layer(&line.layer))
            .filter(|line| !bends.iter().any(|b| b.handle == line.handle))
            .map(|line| (line.handle, line.segment))
            .collect();

        let etch_layer = self.generator.layer();
        let mut added = 0;
        let mut reused = 0;

        for bend in bends.iter().filter(|b| b.direction == BendDirection::Up) {
            for segment in self.generator.etch_lines(bend) {
                match existing.iter().find(|(_, s)| s.same_endpoints(&segment)) {
                    Some(&(handle, _)) => {
                        drawing.set_layer(handle, etch_layer)?;
                        reused += 1;
                    }
                    None => {
                        let handle = drawing.add_line(segment, etch_layer);
                        existing.push((handle, segment));
                        added += 1;
                    }
                }
            }
        }

        let report = EtchReport {
            bends: bends.len(),
            up: bends.iter().filter(|b| b.direction == BendDirection::Up).count(),
            down: bends.iter().filter(|b| b.direction == BendDirection::Down).count(),
            part_type: PartType::classify(&bends),
            added,
            reused,
            degenerate,
        };
        log::info!("{}", report);
        Ok(report)
    }

    /// Read a DXF file, etch it and write it back in place
    ///
    /// Files without bend lines are left untouched.
    pub fn etch_file<P: AsRef<Path>>(&self, path: P) -> Result<EtchReport> {
        let path = path.as_ref();
        let (document, report) = self.etch_document(path)?;
        if report.is_modified() {
            DxfWriter::new(&document).write_to_file(path)?;
            log::debug!("wrote {}", path.display());
        }
        Ok(report)
    }

    /// Same as [`Etcher::etch_file`] without writing anything
    pub fn check_file<P: AsRef<Path>>(&self, path: P) -> Result<EtchReport> {
        self.etch_document(path.as_ref()).map(|(_, report)| report)
    }

    fn etch_document(&self, path: &Path) -> Result<(CadDocument, EtchReport)> {
        let mut document = DxfReader::from_file(path)?
            .with_configuration(DxfReaderConfiguration { failsafe: true })
            .read()?;

        let report = self.etch(&mut document)?;
        for handle in &report.degenerate {
            document.notifications.notify(
                NotificationType::Skipped,
                format!("zero-length bend line {} in {}", handle, path.display()),
            );
        }
        Ok((document, report))
    }
}
