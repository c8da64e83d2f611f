//! In/out classification of a court-plane point.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::court::{MatchType, HALF_LENGTH_M};

/// Identity of a court boundary line.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineId {
    LeftSideline,
    RightSideline,
    FarBaseline,
    NearBaseline,
}

/// Verdict for one court point.
///
/// `signed_distance_m` is the margin to the nearest line: positive means
/// inside by that much, negative means outside by that much.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundaryVerdict {
    pub is_in: bool,
    pub signed_distance_m: f64,
    pub nearest_line: LineId,
}

/// Classify a court-plane point against the legal rectangle.
///
/// Pure and deterministic: the nearest line is the one with the smallest
/// unsigned margin, ties resolving to the first of left sideline, right
/// sideline, far baseline, near baseline, in that fixed order.
pub fn classify(court: Point2<f64>, match_type: MatchType) -> BoundaryVerdict {
    let hw = match_type.half_width_m();
    let hl = HALF_LENGTH_M;

    let margins = [
        (LineId::LeftSideline, court.x + hw),
        (LineId::RightSideline, hw - court.x),
        (LineId::FarBaseline, hl - court.y),
        (LineId::NearBaseline, court.y + hl),
    ];

    let is_in = margins.iter().all(|(_, m)| *m >= 0.0);

    let (mut nearest_line, mut nearest) = margins[0];
    for &(line, margin) in &margins[1..] {
        if margin.abs() < nearest.abs() {
            nearest_line = line;
            nearest = margin;
        }
    }

    let signed_distance_m = if is_in { nearest.abs() } else { -nearest.abs() };
    BoundaryVerdict {
        is_in,
        signed_distance_m,
        nearest_line,
    }
}
