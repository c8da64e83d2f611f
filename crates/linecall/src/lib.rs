//! Line-calling engine for ball-tracking pipelines.
//!
//! `linecall` turns a stream of 2D ball detections from a fixed camera
//! into a deduplicated list of bounce events with in/out verdicts, given a
//! one-time four-point court calibration. Frame decoding, object
//! detection, and report rendering are collaborators: this crate only
//! consumes and produces structured records.
//!
//! ## Quickstart
//!
//! ```
//! use linecall::records::ObservationRecord;
//! use linecall::{analyze, CalibrationRecord, DetectorParams};
//!
//! let calibration = CalibrationRecord {
//!     // Far-left, far-right, near-right, near-left court corners on
//!     // screen, in that order.
//!     pixel_points: [[420.0, 120.0], [860.0, 120.0], [1160.0, 660.0], [120.0, 660.0]],
//!     court_points: [[-4.115, 11.885], [4.115, 11.885], [4.115, -11.885], [-4.115, -11.885]],
//!     forward_matrix: None,
//!     inverse_matrix: None,
//! };
//!
//! let observations: Vec<ObservationRecord> = Vec::new();
//! let report = analyze(&observations, 30.0, 0, calibration, DetectorParams::default())?;
//! assert_eq!(report.stats.total_bounces, 0);
//! # Ok::<(), linecall::AnalyzeError>(())
//! ```
//!
//! ## API map
//! - `linecall::core`: court geometry, four-point calibration, boundary
//!   classification.
//! - `linecall::track`: observations, the trajectory buffer, the two-pass
//!   bounce detector, and the tracking session.
//! - `linecall::records`: JSON wire shapes for observations, bounces, and
//!   reports.
//! - `linecall::eval`: precision/recall evaluation against hand-labeled
//!   bounces.

pub use linecall_core as core;
pub use linecall_track as track;

mod analyze;
pub mod eval;
pub mod records;

pub use analyze::{analyze, AnalyzeError};
pub use linecall_core::{
    classify, BoundaryVerdict, CalibrationError, CalibrationRecord, CalibrationTransform, LineId,
    MatchType,
};
pub use linecall_track::{
    Bounce, BounceDetector, DetectorError, DetectorParams, Observation, TrackingSession,
    TrajectoryBuffer,
};
