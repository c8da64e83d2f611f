use linecall_core::CalibrationTransform;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Confidence assigned to synthetically interpolated observations, marking
/// them apart from real detections.
pub const SYNTHETIC_CONFIDENCE: f64 = 0.5;

/// One ball detection. Immutable once created; owned by the session that
/// created it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Frame number; strictly increasing within a session.
    pub frame_index: u64,

    /// `frame_index / fps`, seconds.
    pub timestamp_s: f64,

    /// Detection center in image coordinates.
    pub pixel: Point2<f64>,

    /// Court-plane position, present once a calibration is available and
    /// the pixel lies in its domain.
    pub court: Option<Point2<f64>>,

    /// Detector confidence in `[0, 1]`.
    pub confidence: f64,

    /// Bounding-box width and height, pixels.
    pub bbox_size: (f64, f64),
}

impl Observation {
    /// Build an observation from a raw detection, deriving the timestamp
    /// from the frame rate and the court position from the calibration
    /// when one is supplied.
    pub fn from_detection(
        frame_index: u64,
        fps: f64,
        pixel: Point2<f64>,
        confidence: f64,
        bbox_size: (f64, f64),
        transform: Option<&CalibrationTransform>,
    ) -> Self {
        Self {
            frame_index,
            timestamp_s: frame_index as f64 / fps,
            pixel,
            court: transform.and_then(|t| t.to_court(pixel)),
            confidence,
            bbox_size,
        }
    }
}
