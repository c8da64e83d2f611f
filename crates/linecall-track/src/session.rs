use log::warn;
use nalgebra::Point2;

use linecall_core::{CalibrationError, CalibrationTransform};

use crate::bounce::Bounce;
use crate::buffer::TrajectoryBuffer;
use crate::detector::BounceDetector;
use crate::error::DetectorError;
use crate::observation::Observation;
use crate::params::DetectorParams;

/// One video's tracking state: the calibration, the accumulated
/// trajectory, and the bounce detector.
///
/// The lifecycle mirrors the detector's: observations stream in strictly
/// increasing frame order, then [`TrackingSession::finalize`] runs the
/// batch pass exactly once and the bounce list becomes immutable. The
/// streaming bounce list is queryable at any time and is always a valid,
/// if incomplete, answer. A session is single-threaded by construction;
/// parallel videos get independent sessions with nothing shared.
pub struct TrackingSession {
    fps: f64,
    transform: Option<CalibrationTransform>,
    buffer: TrajectoryBuffer,
    detector: BounceDetector,
    last_frame: Option<u64>,
}

impl TrackingSession {
    pub fn new(fps: f64, params: DetectorParams) -> Self {
        Self {
            fps,
            transform: None,
            buffer: TrajectoryBuffer::new(params.sliding_window_len),
            detector: BounceDetector::new(params),
            last_frame: None,
        }
    }

    /// Attach the court calibration. Observations pushed before this call
    /// keep their absent court positions; only the batch pass revisits
    /// them (through interpolation's recomputation).
    pub fn with_transform(mut self, transform: CalibrationTransform) -> Self {
        self.transform = Some(transform);
        self
    }

    pub fn set_transform(&mut self, transform: CalibrationTransform) {
        self.transform = Some(transform);
    }

    /// The calibration, or `NotCalibrated` while none is attached.
    pub fn transform(&self) -> Result<&CalibrationTransform, CalibrationError> {
        self.transform.as_ref().ok_or(CalibrationError::NotCalibrated)
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// All observations pushed so far, in frame order.
    pub fn observations(&self) -> &[Observation] {
        self.buffer.history()
    }

    /// Streaming bounces until [`TrackingSession::finalize`], the merged
    /// final list afterwards.
    pub fn bounces(&self) -> &[Bounce] {
        self.detector.bounces()
    }

    pub fn is_finalized(&self) -> bool {
        self.detector.is_finalized()
    }

    /// Ingest one raw detection from the external object detector.
    ///
    /// The timestamp derives from the frame rate and the court position
    /// from the calibration when one is attached. Returns the bounce the
    /// streaming pass accepted on this push, if any.
    pub fn push_detection(
        &mut self,
        frame_index: u64,
        pixel: Point2<f64>,
        confidence: f64,
        bbox_size: (f64, f64),
    ) -> Result<Option<Bounce>, DetectorError> {
        let obs = Observation::from_detection(
            frame_index,
            self.fps,
            pixel,
            confidence,
            bbox_size,
            self.transform.as_ref(),
        );
        self.push_observation(obs)
    }

    /// Ingest a pre-built observation.
    ///
    /// Out-of-order or duplicated frames are logged and ignored: the frame
    /// source contract is monotonic delivery, and a stale sample must not
    /// corrupt the window.
    pub fn push_observation(&mut self, obs: Observation) -> Result<Option<Bounce>, DetectorError> {
        if self.detector.is_finalized() {
            return Err(DetectorError::AlreadyFinalized);
        }
        if let Some(last) = self.last_frame {
            if obs.frame_index <= last {
                warn!(
                    "ignoring out-of-order detection: frame {} after {}",
                    obs.frame_index, last
                );
                return Ok(None);
            }
        }
        debug_assert!(
            (obs.timestamp_s - obs.frame_index as f64 / self.fps).abs()
                <= 1e-6 * obs.timestamp_s.abs().max(1.0),
            "observation timestamp disagrees with frame_index / fps"
        );
        self.last_frame = Some(obs.frame_index);
        self.buffer.push(obs);
        self.detector.on_push(&self.buffer)
    }

    /// Run interpolation and the batch pass once; afterwards the session
    /// is immutable and [`TrackingSession::bounces`] is the final answer.
    pub fn finalize(&mut self) -> Result<&[Bounce], DetectorError> {
        self.detector.finalize(&self.buffer, self.transform.as_ref())
    }
}
