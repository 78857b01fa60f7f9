//! Bend lines and the notes that describe them

pub mod extractor;
pub mod note;

pub use extractor::BendLineExtractor;
pub use note::{direction_of, BendNote, NoteGrammar};

use crate::drawing::Annotation;
use crate::geometry::Segment;
use crate::types::Handle;
use std::fmt;

/// Which way the flange is folded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BendDirection {
    Up,
    Down,
    #[default]
    Unknown,
}

impl fmt::Display for BendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BendDirection::Up => write!(f, "Up"),
            BendDirection::Down => write!(f, "Down"),
            BendDirection::Unknown => write!(f, "Unknown"),
        }
    }
}

/// A bend line found in a drawing
///
/// The note is borrowed from the drawing's annotation list; the bend never
/// owns it.
#[derive(Debug, Clone, PartialEq)]
pub struct Bend<'a> {
    /// Handle of the line entity this bend was built from
    pub handle: Handle,
    pub segment: Segment,
    /// The bend note matched to this line
    pub note: Option<&'a Annotation>,
    pub direction: BendDirection,
    /// Bend angle in degrees
    pub angle: Option<f64>,
    /// Inside bend radius
    pub radius: Option<f64>,
}

impl<'a> Bend<'a> {
    /// A bend with no note assigned yet
    pub fn new(handle: Handle, segment: Segment) -> Self {
        Bend {
            handle,
            segment,
            note: None,
            direction: BendDirection::Unknown,
            angle: None,
            radius: None,
        }
    }

    /// Builder used by tests and callers that already know the direction
    pub fn with_direction(mut self, direction: BendDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn length(&self) -> f64 {
        self.segment.length()
    }

    pub fn is_vertical(&self) -> bool {
        self.segment.is_vertical()
    }

    pub fn is_horizontal(&self) -> bool {
        self.segment.is_horizontal()
    }

    pub fn slope(&self) -> f64 {
        self.segment.slope()
    }

    pub fn y_intercept(&self) -> f64 {
        self.segment.y_intercept()
    }

    pub fn is_parallel_to(&self, other: &Bend<'_>) -> bool {
        self.segment.is_parallel_to(&other.segment)
    }

    pub fn is_perpendicular_to(&self, other: &Bend<'_>) -> bool {
        self.segment.is_perpendicular_to(&other.segment)
    }

    pub fn is_collinear_to(&self, other: &Bend<'_>) -> bool {
        self.segment.is_collinear_to(&other.segment)
    }

    /// Record the parsed note on this bend
    pub(crate) fn assign(&mut self, note: &'a Annotation, parsed: BendNote) {
        self.note = Some(note);
        self.direction = parsed.direction;
        self.angle = parsed.angle;
        self.radius = parsed.radius;
    }
}
