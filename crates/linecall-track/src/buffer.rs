use std::collections::VecDeque;

use crate::observation::Observation;

/// Sliding window of recent observations plus the full session history.
///
/// The window is bounded with FIFO eviction and serves the low-latency
/// streaming pass; the history is unbounded, never shrinks during a
/// session, and is only read by the batch pass at finalize time.
#[derive(Debug)]
pub struct TrajectoryBuffer {
    window: VecDeque<Observation>,
    capacity: usize,
    history: Vec<Observation>,
}

impl TrajectoryBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            window: VecDeque::with_capacity(capacity),
            capacity,
            history: Vec::new(),
        }
    }

    /// Append an observation. O(1) amortized; evicts the oldest window
    /// entry once the window exceeds capacity.
    pub fn push(&mut self, obs: Observation) {
        if self.window.len() == self.capacity {
            self.window.pop_front();
        }
        self.window.push_back(obs.clone());
        self.history.push(obs);
    }

    /// The most recent `n` observations in frame order, or `None` while
    /// fewer have been pushed.
    pub fn recent(&self, n: usize) -> Option<Vec<&Observation>> {
        if self.window.len() < n {
            return None;
        }
        Some(self.window.iter().skip(self.window.len() - n).collect())
    }

    pub fn window_len(&self) -> usize {
        self.window.len()
    }

    pub fn history(&self) -> &[Observation] {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point2;

    fn obs(frame_index: u64) -> Observation {
        Observation {
            frame_index,
            timestamp_s: frame_index as f64 / 30.0,
            pixel: Point2::new(640.0, 360.0),
            court: None,
            confidence: 0.9,
            bbox_size: (12.0, 12.0),
        }
    }

    #[test]
    fn window_evicts_fifo_but_history_keeps_everything() {
        let mut buffer = TrajectoryBuffer::new(4);
        for f in 0..10 {
            buffer.push(obs(f));
        }
        assert_eq!(buffer.window_len(), 4);
        assert_eq!(buffer.len(), 10);

        let recent = buffer.recent(4).unwrap();
        let frames: Vec<u64> = recent.iter().map(|o| o.frame_index).collect();
        assert_eq!(frames, vec![6, 7, 8, 9]);
        assert_eq!(buffer.history()[0].frame_index, 0);
    }

    #[test]
    fn recent_is_none_until_enough_observations() {
        let mut buffer = TrajectoryBuffer::new(8);
        for f in 0..5 {
            assert!(buffer.recent(7).is_none());
            buffer.push(obs(f));
        }
        buffer.push(obs(5));
        buffer.push(obs(6));
        assert_eq!(buffer.recent(7).unwrap().len(), 7);
    }
}
