//! Wire shapes exchanged with collaborators.
//!
//! The external detector supplies [`ObservationRecord`]s; reports carry
//! [`BounceRecord`]s and [`TrackingStats`]. Field names are part of the
//! serialization contract and must not change shape.

use serde::{Deserialize, Serialize};

use linecall_track::Bounce;

/// One raw detection as supplied by the external object detector.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObservationRecord {
    pub frame_index: u64,
    pub timestamp_s: f64,
    pub pixel_x: f64,
    pub pixel_y: f64,
    pub confidence: f64,
    pub bbox_w: f64,
    pub bbox_h: f64,
}

/// One bounce with its verdict, as written to reports.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BounceRecord {
    pub frame_index: u64,
    pub timestamp_s: f64,
    pub pixel_x: f64,
    pub pixel_y: f64,
    pub court_x: f64,
    pub court_y: f64,
    pub is_in: bool,
    pub distance_from_line_m: f64,
}

impl BounceRecord {
    pub fn from_bounce(bounce: &Bounce) -> Self {
        Self {
            frame_index: bounce.frame_index,
            timestamp_s: bounce.timestamp_s,
            pixel_x: bounce.pixel.x,
            pixel_y: bounce.pixel.y,
            court_x: bounce.court.x,
            court_y: bounce.court.y,
            is_in: bounce.verdict.is_in,
            distance_from_line_m: bounce.verdict.signed_distance_m,
        }
    }
}

/// Aggregate counters for one processed session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackingStats {
    pub total_detections: usize,
    /// Detections per source frame; zero when the frame count is unknown.
    pub detection_rate: f64,
    pub total_bounces: usize,
    pub bounces_in: usize,
    pub bounces_out: usize,
}

/// Full analysis output for one video.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackingReport {
    pub fps: f64,
    pub total_frames: u64,
    pub stats: TrackingStats,
    pub bounces: Vec<BounceRecord>,
}
