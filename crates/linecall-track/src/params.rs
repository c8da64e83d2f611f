use linecall_core::MatchType;
use serde::{Deserialize, Serialize};

/// Tuning knobs for the bounce detector.
///
/// The defaults are tuned for broadcast-style footage at 25-60 fps and are
/// expected to be overridden by callers for unusual camera setups.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DetectorParams {
    /// Sliding-window capacity used by the streaming pass.
    pub sliding_window_len: usize,

    /// Minimum pixel-y amplitude of the window center over both half
    /// averages, streaming pass.
    pub stream_margin_px: f64,

    /// Amplitude margin for the batch pass. Smaller than the streaming
    /// margin because the interpolated trajectory is smoother.
    pub batch_margin_px: f64,

    /// Minimum time between two accepted bounces, seconds. Also the
    /// near-duplicate window when merging the two passes.
    pub cooldown_s: f64,

    /// Tolerance band around the court rectangle, meters per side. A
    /// candidate whose court position falls outside the expanded rectangle
    /// is dropped as mid-air or a transform artifact.
    pub court_margin_m: f64,

    /// Gaps of at most this many frames are left as-is: too short to
    /// matter.
    pub min_gap_frames: u64,

    /// Gaps longer than this are not interpolated: a straight-line fill is
    /// not trustworthy across them.
    pub max_gap_frames: u64,

    /// Court width used for the in/out call.
    #[serde(default)]
    pub match_type: MatchType,
}

impl Default for DetectorParams {
    fn default() -> Self {
        Self {
            sliding_window_len: 60,
            stream_margin_px: 15.0,
            batch_margin_px: 12.0,
            cooldown_s: 0.5,
            court_margin_m: 3.0,
            min_gap_frames: 3,
            max_gap_frames: 15,
            match_type: MatchType::Singles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_type_defaults_to_singles_when_absent() {
        let json = r#"{
            "sliding_window_len": 30,
            "stream_margin_px": 18.0,
            "batch_margin_px": 14.0,
            "cooldown_s": 0.4,
            "court_margin_m": 2.0,
            "min_gap_frames": 3,
            "max_gap_frames": 12
        }"#;
        let params: DetectorParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.match_type, MatchType::Singles);
        assert_eq!(params.sliding_window_len, 30);
    }

    #[test]
    fn match_type_round_trips_as_snake_case() {
        let params = DetectorParams {
            match_type: MatchType::Doubles,
            ..DetectorParams::default()
        };
        let json = serde_json::to_string(&params).unwrap();
        assert!(json.contains(r#""match_type":"doubles""#));
    }
}
