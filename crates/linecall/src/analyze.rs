//! End-to-end helper: observation records in, tracking report out.

use log::info;
use nalgebra::Point2;
use thiserror::Error;

use linecall_core::{CalibrationError, CalibrationRecord};
use linecall_track::{DetectorError, DetectorParams, TrackingSession};

use crate::records::{BounceRecord, ObservationRecord, TrackingReport, TrackingStats};

/// Errors from the end-to-end analysis helpers.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("frame rate must be positive (got {0})")]
    InvalidFps(f64),

    #[error(transparent)]
    Calibration(#[from] CalibrationError),

    #[error(transparent)]
    Detector(#[from] DetectorError),
}

/// Run one full tracking session over pre-extracted detections.
///
/// Records must arrive in increasing frame order; out-of-order entries are
/// ignored with a warning, matching the frame-source contract.
/// `total_frames` only feeds the detection-rate statistic and may be zero
/// when the source length is unknown.
pub fn analyze(
    observations: &[ObservationRecord],
    fps: f64,
    total_frames: u64,
    calibration: CalibrationRecord,
    params: DetectorParams,
) -> Result<TrackingReport, AnalyzeError> {
    if !(fps > 0.0) {
        return Err(AnalyzeError::InvalidFps(fps));
    }
    let transform = calibration.into_transform()?;
    let mut session = TrackingSession::new(fps, params).with_transform(transform);

    for record in observations {
        session.push_detection(
            record.frame_index,
            Point2::new(record.pixel_x, record.pixel_y),
            record.confidence,
            (record.bbox_w, record.bbox_h),
        )?;
    }

    let total_detections = session.observations().len();
    let bounces: Vec<BounceRecord> = session
        .finalize()?
        .iter()
        .map(BounceRecord::from_bounce)
        .collect();

    let bounces_in = bounces.iter().filter(|b| b.is_in).count();
    info!(
        "analyzed {} detection(s): {} bounce(s), {} in / {} out",
        total_detections,
        bounces.len(),
        bounces_in,
        bounces.len() - bounces_in,
    );

    Ok(TrackingReport {
        fps,
        total_frames,
        stats: TrackingStats {
            total_detections,
            detection_rate: if total_frames > 0 {
                total_detections as f64 / total_frames as f64
            } else {
                0.0
            },
            total_bounces: bounces.len(),
            bounces_in,
            bounces_out: bounces.len() - bounces_in,
        },
        bounces,
    })
}
