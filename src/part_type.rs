//! Coarse part shape from the bends of a flat pattern

use crate::bend::{Bend, BendDirection};
use std::fmt;

/// Shape family of a formed sheet-metal part
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartType {
    /// No bends
    Flat,
    /// One bend
    Angle,
    /// Two parallel bends in the same direction
    Channel,
    /// Four bends in the same direction along two perpendicular axes
    Pan,
    /// Two parallel bends in opposite directions
    ZAngle,
    /// Anything else
    Other,
}

impl PartType {
    /// Classify a set of bends
    ///
    /// Rules are tried in order: no bends, same-direction channel and pan,
    /// single bend, two parallel bends, then other. The direction check only
    /// guards the channel and pan rules, so two parallel bends going opposite
    /// ways fall through to `ZAngle`.
    pub fn classify(bends: &[Bend<'_>]) -> PartType {
        if bends.is_empty() {
            return PartType::Flat;
        }

        let has_up = bends.iter().any(|b| b.direction == BendDirection::Up);
        let has_down = bends.iter().any(|b| b.direction == BendDirection::Down);

        if !has_up || !has_down {
            if bends.len() == 2 && bends[0].is_parallel_to(&bends[1]) {
                return PartType::Channel;
            }

            if bends.len() == 4 {
                let groups = slope_groups(bends);
                if groups.len() == 2 && groups[0].is_perpendicular_to(groups[1]) {
                    return PartType::Pan;
                }
            }
        }

        if bends.len() == 1 {
            return PartType::Angle;
        }

        if bends.len() == 2 && bends[0].is_parallel_to(&bends[1]) {
            return PartType::ZAngle;
        }

        PartType::Other
    }
}

/// One representative bend per group of parallel bends, in first-seen order
///
/// Grouping uses the same slope tolerance as the parallel test, and all
/// vertical bends share one group.
fn slope_groups<'b, 'a>(bends: &'b [Bend<'a>]) -> Vec<&'b Bend<'a>> {
    let mut representatives: Vec<&Bend<'a>> = Vec::new();
    for bend in bends {
        if !representatives.iter().any(|r| r.is_parallel_to(bend)) {
            representatives.push(bend);
        }
    }
    representatives
}

impl fmt::Display for PartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PartType::Flat => "Flat",
            PartType::Angle => "Angle",
            PartType::Channel => "Channel",
            PartType::Pan => "Pan",
            PartType::ZAngle => "Z-Angle",
            PartType::Other => "Other",
        };
        f.write_str(name)
    }
}
