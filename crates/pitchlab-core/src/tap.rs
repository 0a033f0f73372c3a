use crate::constants::TAP_WINDOW;
use crate::rate::compute_tap_bpm;
use smallvec::SmallVec;

/// Sliding window of the most recent tap timestamps (ms).
#[derive(Clone, Debug, Default)]
pub struct TapBuffer {
    taps: SmallVec<[f64; TAP_WINDOW]>,
}

impl TapBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a tap; the oldest entry is evicted once the window is full.
    pub fn push(&mut self, timestamp_ms: f64) {
        if self.taps.len() == TAP_WINDOW {
            self.taps.remove(0);
        }
        self.taps.push(timestamp_ms);
    }

    pub fn bpm(&self) -> Option<f64> {
        compute_tap_bpm(&self.taps)
    }

    pub fn clear(&mut self) {
        self.taps.clear();
    }

    pub fn len(&self) -> usize {
        self.taps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taps.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.taps
    }
}
