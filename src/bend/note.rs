//! Bend note grammar
//!
//! A bend note reads like `UP 90° R.03` or `DN 45°R 0.125`. Direction comes
//! from the first keyword found anywhere in the text (`UP` beats `DOWN`/`DN`
//! when both are present). Angle and radius come from the first place in the
//! text where
//!
//! ```text
//! (UP | DOWN | DN) ws* <number> ° ws* R ws* <number>
//! ```
//!
//! parses. A note can carry a direction without dimensions; it is still a
//! match, just one without angle and radius.

use super::BendDirection;
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, digit0, digit1, multispace0},
    combinator::{map_res, opt, recognize, value},
    sequence::{pair, preceded, tuple},
    IResult,
};

/// Structured result of parsing a bend note
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BendNote {
    pub direction: BendDirection,
    /// Bend angle in degrees
    pub angle: Option<f64>,
    /// Inside bend radius
    pub radius: Option<f64>,
}

/// Parser for bend notes, carrying the radius that stands in for SHARP
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoteGrammar {
    sharp_bend_radius: f64,
}

impl Default for NoteGrammar {
    fn default() -> Self {
        NoteGrammar::new(0.0)
    }
}

impl NoteGrammar {
    pub fn new(sharp_bend_radius: f64) -> Self {
        NoteGrammar { sharp_bend_radius }
    }

    pub fn sharp_bend_radius(&self) -> f64 {
        self.sharp_bend_radius
    }

    /// Parse a note; `None` when the text names no direction
    pub fn parse(&self, text: &str) -> Option<BendNote> {
        let normalized = self.normalize(text);
        let direction = direction_of(&normalized)?;

        let dimensions = normalized
            .char_indices()
            .find_map(|(i, _)| dimensions(&normalized[i..]).ok().map(|(_, d)| d));

        Some(BendNote {
            direction,
            angle: dimensions.map(|(angle, _)| angle),
            radius: dimensions.map(|(_, radius)| radius),
        })
    }

    /// Upper-case the text and rewrite the spellings the grammar does not
    /// know about into ones it does
    fn normalize(&self, text: &str) -> String {
        text.replace("\\P", " ")
            .to_uppercase()
            .replace("%%D", "°")
            .replace("\\U+00B0", "°")
            .replace("SHARP", &format!("R{}", self.sharp_bend_radius))
    }
}

/// Direction named by `text`, ignoring case; `UP` wins over `DOWN`/`DN`
pub fn direction_of(text: &str) -> Option<BendDirection> {
    let upper = text.to_uppercase();
    if upper.contains("UP") {
        Some(BendDirection::Up)
    } else if upper.contains("DOWN") || upper.contains("DN") {
        Some(BendDirection::Down)
    } else {
        None
    }
}

fn direction_keyword(input: &str) -> IResult<&str, BendDirection> {
    alt((
        value(BendDirection::Up, tag("UP")),
        value(BendDirection::Down, tag("DOWN")),
        value(BendDirection::Down, tag("DN")),
    ))(input)
}

/// `12`, `12.`, `12.5` or `.5`
fn number(input: &str) -> IResult<&str, f64> {
    map_res(
        alt((
            recognize(pair(digit1, opt(pair(char('.'), digit0)))),
            recognize(pair(char('.'), digit1)),
        )),
        str::parse::<f64>,
    )(input)
}

fn dimensions(input: &str) -> IResult<&str, (f64, f64)> {
    let (rest, (_, angle, _, radius)) = tuple((
        direction_keyword,
        preceded(multispace0, number),
        char('°'),
        preceded(tuple((multispace0, char('R'), multispace0)), number),
    ))(input)?;
    Ok((rest, (angle, radius)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Option<BendNote> {
        NoteGrammar::new(0.0).parse(text)
    }

    #[test]
    fn test_full_note() {
        let note = parse("UP 90° R.03").unwrap();
        assert_eq!(note.direction, BendDirection::Up);
        assert_eq!(note.angle, Some(90.0));
        assert_eq!(note.radius, Some(0.03));
    }

    #[test]
    fn test_down_without_spaces() {
        let note = parse("DOWN45°R0.125").unwrap();
        assert_eq!(note.direction, BendDirection::Down);
        assert_eq!(note.angle, Some(45.0));
        assert_eq!(note.radius, Some(0.125));
    }

    #[test]
    fn test_dn_keyword_and_case() {
        let note = parse("dn 30.5° r 2").unwrap();
        assert_eq!(note.direction, BendDirection::Down);
        assert_eq!(note.angle, Some(30.5));
        assert_eq!(note.radius, Some(2.0));
    }

    #[test]
    fn test_direction_without_dimensions() {
        let note = parse("BEND UP").unwrap();
        assert_eq!(note.direction, BendDirection::Up);
        assert_eq!(note.angle, None);
        assert_eq!(note.radius, None);
    }

    #[test]
    fn test_no_direction_is_no_match() {
        assert_eq!(parse("90° R.03"), None);
        assert_eq!(parse(""), None);
    }

    #[test]
    fn test_up_wins_over_down() {
        let note = parse("DOWN 90° R1 THEN UP").unwrap();
        assert_eq!(note.direction, BendDirection::Up);
        assert_eq!(note.radius, Some(1.0));
    }

    #[test]
    fn test_dimensions_found_after_prefix() {
        let note = parse("NOTE 3: UP 120° R 0.5 TYP").unwrap();
        assert_eq!(note.angle, Some(120.0));
        assert_eq!(note.radius, Some(0.5));
    }

    #[test]
    fn test_sharp_becomes_configured_radius() {
        let note = NoteGrammar::new(0.0).parse("UP 90° SHARP").unwrap();
        assert_eq!(note.radius, Some(0.0));

        let note = NoteGrammar::new(0.001).parse("up 90° sharp").unwrap();
        assert_eq!(note.radius, Some(0.001));
        assert_eq!(note.angle, Some(90.0));
    }

    #[test]
    fn test_sharp_zero_is_not_absent() {
        let sharp = parse("UP 90° SHARP").unwrap();
        let bare = parse("UP").unwrap();
        assert_eq!(sharp.radius, Some(0.0));
        assert_eq!(bare.radius, None);
    }

    #[test]
    fn test_degree_spellings() {
        assert_eq!(parse("UP 90%%d R.06").unwrap().angle, Some(90.0));
        assert_eq!(parse("UP 90\\U+00B0 R.06").unwrap().radius, Some(0.06));
        assert_eq!(parse("UP 90\\PR.06"), Some(BendNote {
            direction: BendDirection::Up,
            angle: None,
            radius: None,
        }));
        assert_eq!(parse("UP 90°\\PR.06").unwrap().radius, Some(0.06));
    }

    #[test]
    fn test_missing_degree_symbol() {
        let note = parse("UP 90 R.03").unwrap();
        assert_eq!(note.angle, None);
        assert_eq!(note.radius, None);
    }

    #[test]
    fn test_number_forms() {
        assert_eq!(number("12").unwrap().1, 12.0);
        assert_eq!(number("12.").unwrap().1, 12.0);
        assert_eq!(number("12.25x").unwrap(), ("x", 12.25));
        assert_eq!(number(".5").unwrap().1, 0.5);
        assert!(number(".").is_err());
        assert!(number("R").is_err());
    }

    #[test]
    fn test_direction_of() {
        assert_eq!(direction_of("Up"), Some(BendDirection::Up));
        assert_eq!(direction_of("down"), Some(BendDirection::Down));
        assert_eq!(direction_of("DN"), Some(BendDirection::Down));
        assert_eq!(direction_of("FLAT"), None);
    }
}
