//! Etch mark geometry for upward bends

use crate::bend::{Bend, BendDirection};
use crate::config::{EtchConfiguration, LayerStyle};
use crate::geometry::Segment;
use crate::types::Vector2;

/// Builds the etch lines drawn over upward bend lines
#[derive(Debug, Clone)]
pub struct EtchGenerator {
    etch_length: f64,
    layer: LayerStyle,
}

impl Default for EtchGenerator {
    fn default() -> Self {
        Self::new(&EtchConfiguration::default())
    }
}

impl EtchGenerator {
    pub fn new(config: &EtchConfiguration) -> Self {
        EtchGenerator {
            etch_length: config.etch_length,
            layer: config.etch_layer.clone(),
        }
    }

    pub fn etch_length(&self) -> f64 {
        self.etch_length
    }

    /// Layer the generated lines belong on
    pub fn layer(&self) -> &LayerStyle {
        &self.layer
    }

    /// Etch lines for `bend`; empty unless the bend goes up
    pub fn etch_lines(&self, bend: &Bend<'_>) -> Vec<Segment> {
        if bend.direction != BendDirection::Up {
            return Vec::new();
        }
        self.marks_for(&bend.segment)
    }

    /// Etch lines for a bend line segment
    ///
    /// Short lines (under three etch lengths) are etched end to end. Longer
    /// vertical lines get an `etch_length` mark at each end. Longer lines in
    /// any other direction get a one unit mark at each end, pointing inward.
    pub fn marks_for(&self, segment: &Segment) -> Vec<Segment> {
        if segment.length() < self.etch_length * 3.0 {
            return vec![*segment];
        }

        if segment.is_vertical() {
            let x = segment.start.x;
            let low = segment.start.y.min(segment.end.y);
            let high = segment.start.y.max(segment.end.y);

            return vec![
                Segment::from_coords(x, low, x, low + self.etch_length),
                Segment::from_coords(x, high, x, high - self.etch_length),
            ];
        }

        // one drawing unit long whatever etch_length is
        let unit = Vector2::from_angle(segment.angle());
        vec![
            Segment::new(segment.start, segment.start + unit),
            Segment::new(segment.end, segment.end - unit),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Handle;

    fn up(segment: Segment) -> Bend<'static> {
        Bend::new(Handle::new(1), segment).with_direction(BendDirection::Up)
    }

    fn assert_close(a: Vector2, b: Vector2) {
        assert!(a.distance(&b) < 1e-9, "{} != {}", a, b);
    }

    #[test]
    fn test_only_up_bends_are_etched() {
        let gen = EtchGenerator::default();
        let seg = Segment::from_coords(0.0, 0.0, 10.0, 0.0);
        let down = Bend::new(Handle::new(1), seg).with_direction(BendDirection::Down);
        let unknown = Bend::new(Handle::new(2), seg);
        assert!(gen.etch_lines(&down).is_empty());
        assert!(gen.etch_lines(&unknown).is_empty());
        assert_eq!(gen.etch_lines(&up(seg)).len(), 2);
    }

    #[test]
    fn test_short_bend_is_etched_full_length() {
        let gen = EtchGenerator::default();
        let seg = Segment::from_coords(0.0, 0.0, 2.0, 0.0);
        assert_eq!(gen.etch_lines(&up(seg)), vec![seg]);

        let vertical = Segment::from_coords(5.0, 3.0, 5.0, 5.0);
        assert_eq!(gen.etch_lines(&up(vertical)), vec![vertical]);
    }

    #[test]
    fn test_exactly_three_lengths_is_split() {
        let gen = EtchGenerator::default();
        let seg = Segment::from_coords(0.0, 0.0, 0.0, 3.0);
        assert_eq!(gen.etch_lines(&up(seg)).len(), 2);
    }

    #[test]
    fn test_vertical_bend_marks_both_ends() {
        let gen = EtchGenerator::default();
        // Drawn top to bottom; marks still run from each end inward.
        let seg = Segment::from_coords(4.0, 10.0, 4.0, 0.0);
        let marks = gen.etch_lines(&up(seg));

        assert_eq!(
            marks,
            vec![
                Segment::from_coords(4.0, 0.0, 4.0, 1.0),
                Segment::from_coords(4.0, 10.0, 4.0, 9.0),
            ]
        );
        assert_eq!(marks[0].length(), 1.0);
        assert_eq!(marks[1].length(), 1.0);
        // 8 units left bare in the middle.
        assert_eq!(marks[1].end.y - marks[0].end.y, 8.0);
    }

    #[test]
    fn test_vertical_marks_scale_with_etch_length() {
        let config = EtchConfiguration::default().with_etch_length(2.5);
        let gen = EtchGenerator::new(&config);
        let marks = gen.etch_lines(&up(Segment::from_coords(0.0, 0.0, 0.0, 10.0)));
        assert_eq!(marks[0], Segment::from_coords(0.0, 0.0, 0.0, 2.5));
        assert_eq!(marks[1], Segment::from_coords(0.0, 10.0, 0.0, 7.5));
    }

    #[test]
    fn test_horizontal_bend_marks_are_one_unit() {
        let config = EtchConfiguration::default().with_etch_length(2.0);
        let gen = EtchGenerator::new(&config);
        let seg = Segment::from_coords(0.0, 5.0, 10.0, 5.0);
        let marks = gen.etch_lines(&up(seg));

        assert_eq!(marks.len(), 2);
        assert_eq!(marks[0].start, seg.start);
        assert_close(marks[0].end, Vector2::new(1.0, 5.0));
        assert_eq!(marks[1].start, seg.end);
        assert_close(marks[1].end, Vector2::new(9.0, 5.0));
    }

    #[test]
    fn test_diagonal_bend_marks_point_inward() {
        let gen = EtchGenerator::default();
        let seg = Segment::from_coords(10.0, 10.0, 0.0, 0.0);
        let marks = gen.etch_lines(&up(seg));

        let step = std::f64::consts::FRAC_1_SQRT_2;
        assert_close(marks[0].end, Vector2::new(10.0 - step, 10.0 - step));
        assert_close(marks[1].end, Vector2::new(step, step));
        assert!((marks[0].length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_layer_comes_from_configuration() {
        let gen = EtchGenerator::default();
        assert_eq!(gen.layer().name, "ETCH");
    }
}
