//! Panel-side turntable state.
//!
//! Every mutating call returns the rate the panel should dispatch. Changes
//! to the persisted part of the state raise a flag the panel drains with
//! [`ControlSurface::take_snapshot`] to write storage.

use crate::constants::PITCH_NUDGE_PERCENT;
use crate::rate::{clamp_pitch, current_bpm};
use crate::state::{PitchState, Rpm};
use crate::tap::TapBuffer;

#[derive(Clone, Debug, Default)]
pub struct ControlSurface {
    state: PitchState,
    taps: TapBuffer,
    tap_bpm: Option<f64>,
    dirty: bool,
}

impl ControlSurface {
    pub fn new(state: PitchState) -> Self {
        Self {
            state,
            ..Self::default()
        }
    }

    /// Restore from a stored JSON blob; damage or absence yields defaults.
    pub fn from_storage(stored: Option<&str>) -> Self {
        Self::new(PitchState::load_or_default(stored))
    }

    pub fn state(&self) -> &PitchState {
        &self.state
    }

    pub fn tap_bpm(&self) -> Option<f64> {
        self.tap_bpm
    }

    pub fn taps(&self) -> &TapBuffer {
        &self.taps
    }

    pub fn effective_rate(&self) -> f64 {
        self.state.effective_rate()
    }

    pub fn current_bpm(&self) -> Option<f64> {
        current_bpm(self.state.base_bpm, self.effective_rate())
    }

    pub fn set_pitch(&mut self, pitch: f64) -> f64 {
        self.state.pitch = clamp_pitch(pitch, self.state.pitch);
        self.dirty = true;
        self.effective_rate()
    }

    pub fn nudge_pitch(&mut self, steps: f64) -> f64 {
        self.set_pitch(self.state.pitch + steps * PITCH_NUDGE_PERCENT)
    }

    /// Quartz lock: pitch back to 0 %, RPM pair untouched.
    pub fn quartz(&mut self) -> f64 {
        self.set_pitch(0.0)
    }

    /// Changing either platter speed leaves the pitch fader alone.
    pub fn set_rpm(&mut self, rpm_orig: Rpm, rpm_play: Rpm) -> f64 {
        self.state.rpm_orig = rpm_orig;
        self.state.rpm_play = rpm_play;
        self.dirty = true;
        self.effective_rate()
    }

    pub fn set_rpm_orig(&mut self, rpm: Rpm) -> f64 {
        self.set_rpm(rpm, self.state.rpm_play)
    }

    pub fn set_rpm_play(&mut self, rpm: Rpm) -> f64 {
        self.set_rpm(self.state.rpm_orig, rpm)
    }

    pub fn tap(&mut self, timestamp_ms: f64) -> Option<f64> {
        self.taps.push(timestamp_ms);
        self.tap_bpm = self.taps.bpm();
        self.tap_bpm
    }

    pub fn reset_taps(&mut self) {
        self.taps.clear();
        self.tap_bpm = None;
    }

    /// "Set BPM": keep the tapped tempo as the reference. No-op without one.
    pub fn promote_tap_bpm(&mut self) -> Option<f64> {
        let bpm = self.tap_bpm?;
        self.state.base_bpm = Some(bpm);
        self.dirty = true;
        Some(bpm)
    }

    /// Back to a neutral deck. The returned rate is exactly 1.0.
    pub fn full_reset(&mut self) -> f64 {
        self.state = PitchState::default();
        self.reset_taps();
        self.dirty = true;
        1.0
    }

    pub fn take_snapshot(&mut self) -> Option<PitchState> {
        std::mem::take(&mut self.dirty).then(|| self.state.clone())
    }
}
