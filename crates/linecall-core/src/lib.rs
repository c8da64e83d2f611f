//! Core geometry for the linecall engine.
//!
//! This crate is intentionally small and purely geometric: standard court
//! dimensions, the one-time four-point perspective calibration between the
//! image plane and the court plane, and the in/out boundary classifier. It
//! knows nothing about video frames, ball detectors, or trajectories.
//!
//! ## Quickstart
//!
//! ```
//! use linecall_core::{classify, CalibrationTransform, MatchType};
//! use nalgebra::Point2;
//!
//! // Four clicked court corners: far-left, far-right, near-right, near-left.
//! let pixels = [
//!     Point2::new(420.0, 120.0),
//!     Point2::new(860.0, 120.0),
//!     Point2::new(1160.0, 660.0),
//!     Point2::new(120.0, 660.0),
//! ];
//! let transform = CalibrationTransform::for_singles_court(pixels)?;
//!
//! let court_pos = transform.to_court(Point2::new(640.0, 400.0)).unwrap();
//! let verdict = classify(court_pos, MatchType::Singles);
//! println!("in: {} ({:.3} m from {:?})", verdict.is_in,
//!          verdict.signed_distance_m, verdict.nearest_line);
//! # Ok::<(), linecall_core::CalibrationError>(())
//! ```

mod boundary;
mod calibration;
pub mod court;
mod error;
mod homography;
mod logger;

pub use boundary::{classify, BoundaryVerdict, LineId};
pub use calibration::{CalibrationRecord, CalibrationTransform};
pub use court::MatchType;
pub use error::CalibrationError;
pub use homography::{estimate_homography, Homography};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
