//! Two-pass bounce detection.
//!
//! A bounce shows up as a local maximum of vertical pixel position: the
//! ball's image coordinate grows while it falls and shrinks after it
//! rebounds. The streaming pass flags such maxima inside a short window as
//! observations arrive; at finalize, the batch pass re-scans the
//! gap-interpolated full history with a smaller amplitude margin and folds
//! in whatever the streaming pass missed. The two passes trade precision
//! against recall: the streaming pass answers in real time, the batch pass
//! sees through short detection dropouts. Deduplication keeps the merged
//! list at most one bounce per cooldown interval.

use log::{debug, info};
use nalgebra::Point2;

use linecall_core::{classify, court, CalibrationTransform};

use crate::bounce::Bounce;
use crate::buffer::TrajectoryBuffer;
use crate::error::DetectorError;
use crate::observation::{Observation, SYNTHETIC_CONFIDENCE};
use crate::params::DetectorParams;

/// Observations examined per candidate window: 3 before, center, 3 after.
const WINDOW_LEN: usize = 7;
const HALF_WINDOW: usize = WINDOW_LEN / 2;

/// Maximum time between consecutive window samples. A larger step means
/// the window straddles a detection dropout and is skipped outright.
const MAX_STEP_S: f64 = 0.5;

/// Streaming + batch bounce detector with a `Streaming` -> `Finalized`
/// lifecycle.
///
/// Until [`BounceDetector::finalize`] the bounce list holds the streaming
/// pass output and is always a valid, if incomplete, answer. After
/// finalize it is the merged, frame-ordered result of both passes, and no
/// further observations are accepted.
pub struct BounceDetector {
    params: DetectorParams,
    bounces: Vec<Bounce>,
    last_bounce_s: Option<f64>,
    finalized: bool,
}

impl BounceDetector {
    pub fn new(params: DetectorParams) -> Self {
        Self {
            params,
            bounces: Vec::new(),
            last_bounce_s: None,
            finalized: false,
        }
    }

    pub fn params(&self) -> &DetectorParams {
        &self.params
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Bounces accepted so far, in frame order.
    pub fn bounces(&self) -> &[Bounce] {
        &self.bounces
    }

    /// Streaming pass: call once per observation pushed into `buffer`.
    ///
    /// Examines the most recent seven observations; note the candidate
    /// center trails the stream head by three samples, so the last few
    /// observations of a session are only ever covered by the batch pass.
    pub fn on_push(&mut self, buffer: &TrajectoryBuffer) -> Result<Option<Bounce>, DetectorError> {
        if self.finalized {
            return Err(DetectorError::AlreadyFinalized);
        }
        let Some(window) = buffer.recent(WINDOW_LEN) else {
            return Ok(None);
        };
        let Some(center) = window_candidate(&window, self.params.stream_margin_px) else {
            return Ok(None);
        };
        if let Some(last) = self.last_bounce_s {
            if center.timestamp_s - last < self.params.cooldown_s {
                return Ok(None);
            }
        }
        let Some(bounce) = self.admit(center) else {
            return Ok(None);
        };
        info!(
            "bounce at frame {} ({:.2}s): ({:.2}, {:.2}) m, {} by {:.3} m",
            bounce.frame_index,
            bounce.timestamp_s,
            bounce.court.x,
            bounce.court.y,
            if bounce.verdict.is_in { "IN" } else { "OUT" },
            bounce.verdict.signed_distance_m,
        );
        self.last_bounce_s = Some(bounce.timestamp_s);
        self.bounces.push(bounce.clone());
        Ok(Some(bounce))
    }

    /// Run the batch pass once and seal the detector.
    ///
    /// Interpolates short gaps in the full history, re-scans the smoothed
    /// trajectory, deduplicates against the streaming output, and sorts the
    /// merged list by frame. Exactly one call is allowed.
    pub fn finalize(
        &mut self,
        buffer: &TrajectoryBuffer,
        transform: Option<&CalibrationTransform>,
    ) -> Result<&[Bounce], DetectorError> {
        if self.finalized {
            return Err(DetectorError::AlreadyFinalized);
        }
        self.finalized = true;

        let trajectory = interpolate(buffer.history(), transform, &self.params);
        let recovered = self.detect_from_trajectory(&trajectory);
        info!(
            "finalized: {} observation(s) ({} after interpolation), {} bounce(s), {} from the batch pass",
            buffer.len(),
            trajectory.len(),
            self.bounces.len(),
            recovered,
        );
        self.bounces.sort_by_key(|b| b.frame_index);
        Ok(&self.bounces)
    }

    // Batch pass: centered window over the interpolated trajectory, with
    // the smaller amplitude margin. Candidates near an already accepted
    // bounce (either pass) are duplicates and are discarded.
    fn detect_from_trajectory(&mut self, trajectory: &[Observation]) -> usize {
        if trajectory.len() < WINDOW_LEN {
            return 0;
        }
        let mut recovered = 0;
        let mut window: Vec<&Observation> = Vec::with_capacity(WINDOW_LEN);
        for i in HALF_WINDOW..trajectory.len() - HALF_WINDOW {
            window.clear();
            window.extend(&trajectory[i - HALF_WINDOW..=i + HALF_WINDOW]);
            let Some(center) = window_candidate(&window, self.params.batch_margin_px) else {
                continue;
            };
            if self
                .bounces
                .iter()
                .any(|b| (b.timestamp_s - center.timestamp_s).abs() < self.params.cooldown_s)
            {
                continue;
            }
            if let Some(bounce) = self.admit(center) {
                debug!(
                    "batch pass recovered a bounce at frame {} ({:.2}s)",
                    bounce.frame_index, bounce.timestamp_s
                );
                self.bounces.push(bounce);
                recovered += 1;
            }
        }
        recovered
    }

    // Court-validity policy and classification, shared by both passes.
    //
    // Rejection is silent by design: a candidate without a court position,
    // or outside the court rectangle expanded by the margin, is mid-air
    // (a serve crossing the frame) or a transform artifact, not an error.
    fn admit(&self, obs: &Observation) -> Option<Bounce> {
        let court_pos = obs.court?;
        let max_x = self.params.match_type.half_width_m() + self.params.court_margin_m;
        let max_y = court::HALF_LENGTH_M + self.params.court_margin_m;
        if court_pos.x.abs() > max_x || court_pos.y.abs() > max_y {
            debug!(
                "dropping candidate at frame {}: ({:.2}, {:.2}) m is far off-court",
                obs.frame_index, court_pos.x, court_pos.y
            );
            return None;
        }
        let verdict = classify(court_pos, self.params.match_type);
        Some(Bounce {
            frame_index: obs.frame_index,
            timestamp_s: obs.timestamp_s,
            pixel: obs.pixel,
            court: court_pos,
            verdict,
        })
    }
}

// The shared window rule: the center qualifies when the window is
// time-continuous and the center's pixel-y exceeds both half averages by
// the amplitude margin.
fn window_candidate<'a>(window: &[&'a Observation], margin_px: f64) -> Option<&'a Observation> {
    debug_assert_eq!(window.len(), WINDOW_LEN);
    for pair in window.windows(2) {
        if pair[1].timestamp_s - pair[0].timestamp_s > MAX_STEP_S {
            return None;
        }
    }
    let center = window[HALF_WINDOW];
    let left_avg = mean_pixel_y(&window[..HALF_WINDOW]);
    let right_avg = mean_pixel_y(&window[HALF_WINDOW + 1..]);
    if center.pixel.y > left_avg + margin_px && center.pixel.y > right_avg + margin_px {
        Some(center)
    } else {
        None
    }
}

fn mean_pixel_y(obs: &[&Observation]) -> f64 {
    obs.iter().map(|o| o.pixel.y).sum::<f64>() / obs.len() as f64
}

/// Fill short detection dropouts in `history` with straight-line
/// observations.
///
/// Gaps of more than `min_gap_frames` and at most `max_gap_frames` frames
/// get one synthetic observation per missing frame: pixel, timestamp, and
/// bounding box linearly interpolated, the court position recomputed
/// through the calibration (tolerating failure as `None`), and confidence
/// fixed at [`SYNTHETIC_CONFIDENCE`]. Shorter gaps are left as-is; longer
/// ones are not trustworthy under a straight-line assumption.
pub fn interpolate(
    history: &[Observation],
    transform: Option<&CalibrationTransform>,
    params: &DetectorParams,
) -> Vec<Observation> {
    let mut out = Vec::with_capacity(history.len());
    for pair in history.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        out.push(a.clone());
        let gap = b.frame_index - a.frame_index;
        if gap <= params.min_gap_frames || gap > params.max_gap_frames {
            continue;
        }
        let span = gap as f64;
        for frame_index in a.frame_index + 1..b.frame_index {
            let t = (frame_index - a.frame_index) as f64 / span;
            let pixel = Point2::new(lerp(a.pixel.x, b.pixel.x, t), lerp(a.pixel.y, b.pixel.y, t));
            out.push(Observation {
                frame_index,
                timestamp_s: lerp(a.timestamp_s, b.timestamp_s, t),
                pixel,
                court: transform.and_then(|tr| tr.to_court(pixel)),
                confidence: SYNTHETIC_CONFIDENCE,
                bbox_size: (
                    lerp(a.bbox_size.0, b.bbox_size.0, t),
                    lerp(a.bbox_size.1, b.bbox_size.1, t),
                ),
            });
        }
    }
    if let Some(last) = history.last() {
        out.push(last.clone());
    }
    out
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}
