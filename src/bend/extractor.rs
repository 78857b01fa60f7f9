//! Finding bend lines and matching them to their notes

use super::{Bend, BendNote, NoteGrammar};
use crate::config::EtchConfiguration;
use crate::drawing::{Annotation, DrawingLine};
use crate::geometry::Segment;
use crate::types::Handle;

/// Picks bend lines out of a drawing and reads their notes
///
/// Built from an [`EtchConfiguration`]; holds its own copy of the settings it
/// needs so one extractor can be shared across threads.
#[derive(Debug, Clone)]
pub struct BendLineExtractor {
    max_bend_radius: f64,
    annotation_match_factor: f64,
    center_line_type: String,
    bend_layer: String,
    grammar: NoteGrammar,
}

impl Default for BendLineExtractor {
    fn default() -> Self {
        Self::new(&EtchConfiguration::default())
    }
}

impl BendLineExtractor {
    pub fn new(config: &EtchConfiguration) -> Self {
        BendLineExtractor {
            max_bend_radius: config.max_bend_radius,
            annotation_match_factor: config.annotation_match_factor,
            center_line_type: config.center_line_type.clone(),
            bend_layer: config.bend_layer.name.clone(),
            grammar: NoteGrammar::new(config.sharp_bend_radius),
        }
    }

    pub fn max_bend_radius(&self) -> f64 {
        self.max_bend_radius
    }

    pub fn grammar(&self) -> &NoteGrammar {
        &self.grammar
    }

    /// A line is a bend line if it is drawn with the center line type or sits
    /// on the bend layer
    pub fn is_candidate(&self, line: &DrawingLine) -> bool {
        line.line_type.eq_ignore_ascii_case(&self.center_line_type)
            || line.layer.eq_ignore_ascii_case(&self.bend_layer)
    }

    /// Candidate lines with zero length; these never become bends
    pub fn degenerate_candidates(&self, lines: &[DrawingLine]) -> Vec<Handle> {
        lines
            .iter()
            .filter(|line| self.is_candidate(line) && line.segment.is_degenerate())
            .map(|line| line.handle)
            .collect()
    }

    /// Nearest note within reach of `segment`
    ///
    /// A note is within reach when its distance to the segment is at most
    /// `annotation_match_factor` times its text height. Among those, the
    /// closest wins; on a tie the earlier note wins.
    pub fn find_note<'a, I>(&self, segment: &Segment, notes: I) -> Option<&'a Annotation>
    where
        I: IntoIterator<Item = &'a Annotation>,
    {
        let mut best: Option<(&'a Annotation, f64)> = None;

        for note in notes {
            let distance = segment.distance_to(note.position);
            let reach = self.annotation_match_factor * note.height;
            if !(distance <= reach) {
                continue;
            }
            match best {
                Some((_, best_distance)) if distance >= best_distance => {}
                _ => best = Some((note, distance)),
            }
        }

        best.map(|(note, _)| note)
    }

    /// Build bends from `lines`, assign their notes and drop every bend whose
    /// radius is unknown or above the maximum
    pub fn extract<'a>(&self, lines: &[DrawingLine], annotations: &'a [Annotation]) -> Vec<Bend<'a>> {
        let notes: Vec<(&'a Annotation, BendNote)> = annotations
            .iter()
            .filter_map(|a| self.grammar.parse(&a.value).map(|parsed| (a, parsed)))
            .collect();

        let mut bends = Vec::new();

        for line in lines.iter().filter(|line| self.is_candidate(line)) {
            if line.segment.is_degenerate() {
                log::warn!("skipping zero-length bend line {}", line.handle);
                continue;
            }

            let mut bend = Bend::new(line.handle, line.segment);

            if let Some(note) = self.find_note(&line.segment, notes.iter().map(|(a, _)| *a)) {
                if let Some((_, parsed)) = notes.iter().find(|(a, _)| std::ptr::eq(*a, note)) {
                    bend.assign(note, *parsed);
                }
            }

            log::debug!(
                "bend line {}: {} angle={:?} radius={:?}",
                bend.handle,
                bend.direction,
                bend.angle,
                bend.radius
            );

            if self.accepts_radius(bend.radius) {
                bends.push(bend);
            } else {
                log::debug!("dropping bend line {} (radius {:?})", bend.handle, bend.radius);
            }
        }

        bends
    }

    /// Radius filter: a bend must have a radius no bigger than the maximum
    pub fn accepts_radius(&self, radius: Option<f64>) -> bool {
        radius.is_some_and(|r| r <= self.max_bend_radius)
    }
}
