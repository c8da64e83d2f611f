use linecall_core::BoundaryVerdict;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// A detected court contact.
///
/// Produced only by the bounce detector; never mutated after creation and
/// ordered by `frame_index` in any exposed list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounce {
    pub frame_index: u64,
    pub timestamp_s: f64,
    /// Image position of the contact.
    pub pixel: Point2<f64>,
    /// Court-plane position of the contact.
    pub court: Point2<f64>,
    /// The in/out call for this contact.
    pub verdict: BoundaryVerdict,
}
