//! Standard tennis-court dimensions, in meters.
//!
//! The court frame is centered at the net: `x` spans the width (positive
//! toward the right sideline as seen from the camera), `y` spans the length
//! (positive toward the far baseline). The legal rectangle is
//! `[-half_width, half_width] x [-HALF_LENGTH_M, HALF_LENGTH_M]`.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Singles half-width: center line to singles sideline.
pub const SINGLES_HALF_WIDTH_M: f64 = 4.115;

/// Doubles half-width: center line to doubles sideline.
pub const DOUBLES_HALF_WIDTH_M: f64 = 5.485;

/// Half of the baseline-to-baseline length.
pub const HALF_LENGTH_M: f64 = 11.885;

/// Service line distance from the net.
pub const SERVICE_LINE_M: f64 = 6.40;

/// Net height at the center strap.
pub const NET_HEIGHT_CENTER_M: f64 = 0.914;

/// Net height at the posts.
pub const NET_HEIGHT_POSTS_M: f64 = 1.07;

/// Which court width applies to the in/out call.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    #[default]
    Singles,
    Doubles,
}

impl MatchType {
    /// Half-width of the legal court for this match type.
    pub fn half_width_m(self) -> f64 {
        match self {
            MatchType::Singles => SINGLES_HALF_WIDTH_M,
            MatchType::Doubles => DOUBLES_HALF_WIDTH_M,
        }
    }
}

/// Canonical calibration corners of the singles rectangle, in the fixed
/// order far-left, far-right, near-right, near-left.
///
/// The four-point calibration pairs these positionally with the clicked
/// pixel corners, so pixel points must be supplied in this same order; a
/// swapped order still solves but yields a silently wrong mapping.
pub fn canonical_corners() -> [Point2<f64>; 4] {
    let hw = SINGLES_HALF_WIDTH_M;
    let hl = HALF_LENGTH_M;
    [
        Point2::new(-hw, hl),
        Point2::new(hw, hl),
        Point2::new(hw, -hl),
        Point2::new(-hw, -hl),
    ]
}
