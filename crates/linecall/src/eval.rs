//! Detection quality metrics against hand-labeled bounces.
//!
//! The annotation workflow produces a list of labeled bounce times (with
//! an optional in/out call per label); [`evaluate`] pairs them with the
//! engine's detections and summarizes recall, precision, and how often the
//! in/out call agrees with the label.

use serde::{Deserialize, Serialize};

use crate::records::BounceRecord;

/// Default time window within which a detection and a label are taken to
/// refer to the same physical bounce.
pub const MATCH_WINDOW_S: f64 = 1.0;

/// One hand-labeled bounce. `is_in` is `None` when the label only marks
/// the event, not the call.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroundTruthBounce {
    pub frame_index: u64,
    pub timestamp_s: f64,
    #[serde(default)]
    pub is_in: Option<bool>,
}

/// Precision/recall summary of one session against its labels.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub recall: f64,
    pub precision: f64,
    pub f1: f64,
    /// Share of matched bounces whose in/out call agrees with the label.
    pub judgment_accuracy: f64,
    pub true_positives: usize,
    pub false_negatives: usize,
    pub false_positives: usize,
    /// Labeled bounces no detection matched.
    pub missed: Vec<GroundTruthBounce>,
    /// Detections no label matched.
    pub spurious: Vec<BounceRecord>,
}

/// Greedy first-match pairing in label order: each label claims the first
/// unclaimed detection within `match_window_s`. Deterministic for a given
/// input order.
pub fn evaluate(
    detections: &[BounceRecord],
    labels: &[GroundTruthBounce],
    match_window_s: f64,
) -> Evaluation {
    let mut detection_claimed = vec![false; detections.len()];
    let mut label_matched = vec![false; labels.len()];
    let mut correct_judgments = 0usize;

    for (i, label) in labels.iter().enumerate() {
        for (j, detection) in detections.iter().enumerate() {
            if detection_claimed[j] {
                continue;
            }
            if (label.timestamp_s - detection.timestamp_s).abs() < match_window_s {
                label_matched[i] = true;
                detection_claimed[j] = true;
                if label.is_in == Some(detection.is_in) {
                    correct_judgments += 1;
                }
                break;
            }
        }
    }

    let true_positives = label_matched.iter().filter(|m| **m).count();
    let false_negatives = labels.len() - true_positives;
    let false_positives = detections.len() - true_positives;

    let recall = ratio(true_positives, labels.len());
    let precision = ratio(true_positives, detections.len());
    let f1 = if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    };

    Evaluation {
        recall,
        precision,
        f1,
        judgment_accuracy: ratio(correct_judgments, true_positives),
        true_positives,
        false_negatives,
        false_positives,
        missed: labels
            .iter()
            .zip(&label_matched)
            .filter(|(_, matched)| !**matched)
            .map(|(label, _)| *label)
            .collect(),
        spurious: detections
            .iter()
            .zip(&detection_claimed)
            .filter(|(_, claimed)| !**claimed)
            .map(|(detection, _)| *detection)
            .collect(),
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn detection(timestamp_s: f64, is_in: bool) -> BounceRecord {
        BounceRecord {
            frame_index: (timestamp_s * 30.0) as u64,
            timestamp_s,
            pixel_x: 640.0,
            pixel_y: 480.0,
            court_x: 0.0,
            court_y: 0.0,
            is_in,
            distance_from_line_m: if is_in { 0.5 } else { -0.5 },
        }
    }

    fn label(timestamp_s: f64, is_in: Option<bool>) -> GroundTruthBounce {
        GroundTruthBounce {
            frame_index: (timestamp_s * 30.0) as u64,
            timestamp_s,
            is_in,
        }
    }

    #[test]
    fn known_confusion_yields_the_expected_metrics() {
        // Three labels; the engine found the first two (one call wrong)
        // plus one spurious detection far from any label.
        let detections = [
            detection(2.0, true),
            detection(5.0, true),
            detection(20.0, false),
        ];
        let labels = [
            label(2.1, Some(true)),
            label(5.3, Some(false)),
            label(11.0, Some(true)),
        ];

        let eval = evaluate(&detections, &labels, MATCH_WINDOW_S);
        assert_eq!(eval.true_positives, 2);
        assert_eq!(eval.false_negatives, 1);
        assert_eq!(eval.false_positives, 1);
        assert_relative_eq!(eval.recall, 2.0 / 3.0);
        assert_relative_eq!(eval.precision, 2.0 / 3.0);
        assert_relative_eq!(eval.f1, 2.0 / 3.0);
        assert_relative_eq!(eval.judgment_accuracy, 0.5);
        assert_eq!(eval.missed.len(), 1);
        assert_eq!(eval.missed[0].timestamp_s, 11.0);
        assert_eq!(eval.spurious.len(), 1);
        assert_eq!(eval.spurious[0].timestamp_s, 20.0);
    }

    #[test]
    fn unlabeled_calls_do_not_count_as_correct() {
        let detections = [detection(2.0, true)];
        let labels = [label(2.0, None)];
        let eval = evaluate(&detections, &labels, MATCH_WINDOW_S);
        assert_eq!(eval.true_positives, 1);
        assert_relative_eq!(eval.judgment_accuracy, 0.0);
    }

    #[test]
    fn empty_inputs_produce_zeroed_metrics() {
        let eval = evaluate(&[], &[], MATCH_WINDOW_S);
        assert_relative_eq!(eval.recall, 0.0);
        assert_relative_eq!(eval.precision, 0.0);
        assert_relative_eq!(eval.f1, 0.0);
    }
}
