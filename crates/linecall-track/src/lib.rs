//! Trajectory analysis for the linecall engine: observation buffering,
//! two-pass bounce detection, and the per-video tracking session.
//!
//! ## Quickstart
//!
//! ```
//! use linecall_track::{DetectorParams, TrackingSession};
//! use nalgebra::Point2;
//!
//! let mut session = TrackingSession::new(30.0, DetectorParams::default());
//! session
//!     .push_detection(0, Point2::new(640.0, 320.0), 0.9, (12.0, 12.0))
//!     .unwrap();
//! let bounces = session.finalize().unwrap();
//! assert!(bounces.is_empty());
//! ```
//!
//! The detection pipeline:
//! 1. The external detector hands each ball sighting to
//!    [`TrackingSession::push_detection`].
//! 2. The sliding window flags local maxima of vertical pixel position as
//!    streaming bounces (cheap, real-time).
//! 3. [`TrackingSession::finalize`] interpolates short dropouts in the
//!    full history, re-scans it with a smaller margin, deduplicates
//!    against the streaming output, and seals the session.

mod bounce;
mod buffer;
mod detector;
mod error;
mod observation;
mod params;
mod session;

pub use bounce::Bounce;
pub use buffer::TrajectoryBuffer;
pub use detector::{interpolate, BounceDetector};
pub use error::DetectorError;
pub use observation::{Observation, SYNTHETIC_CONFIDENCE};
pub use params::DetectorParams;
pub use session::TrackingSession;
