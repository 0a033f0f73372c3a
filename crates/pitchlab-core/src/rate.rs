//! Pure rate math: pitch fader + RPM pair to a playback multiplier.
//!
//! Nothing in here touches the browser; every context (panel, relay,
//! frame agent) calls into these helpers so the numbers agree everywhere.

use crate::constants::{
    MS_PER_MINUTE, PITCH_MAX, PITCH_MIN, PLAYBACK_RATE_MAX, PLAYBACK_RATE_MIN, TAP_BPM_MAX,
};

/// Clamp a pitch percentage to the fader range.
///
/// Non-finite input falls back to `last_valid` so a bad slider read never
/// turns into a NaN rate downstream.
#[inline]
pub fn clamp_pitch(pitch: f64, last_valid: f64) -> f64 {
    if !pitch.is_finite() {
        return last_valid.clamp(PITCH_MIN, PITCH_MAX);
    }
    pitch.clamp(PITCH_MIN, PITCH_MAX)
}

/// `(1 + pitch/100) * (rpm_play / rpm_orig)`
#[inline]
pub fn compute_rate(pitch_percent: f64, rpm_orig: f64, rpm_play: f64) -> f64 {
    let pitch_factor = 1.0 + pitch_percent / 100.0;
    let rpm_factor = rpm_play / rpm_orig;
    pitch_factor * rpm_factor
}

/// BPM from a run of tap timestamps (milliseconds, oldest first).
///
/// Needs at least two taps. Results that are non-finite, not positive or
/// above the tap ceiling are rejected.
pub fn compute_tap_bpm(taps: &[f64]) -> Option<f64> {
    if taps.len() < 2 {
        return None;
    }
    let intervals = taps.windows(2).map(|w| w[1] - w[0]);
    let mean = intervals.sum::<f64>() / (taps.len() - 1) as f64;
    let bpm = MS_PER_MINUTE / mean;
    (bpm.is_finite() && bpm > 0.0 && bpm <= TAP_BPM_MAX).then_some(bpm)
}

/// Browser-safe playbackRate range.
#[inline]
pub fn clamp_playback_rate(rate: f64) -> f64 {
    rate.clamp(PLAYBACK_RATE_MIN, PLAYBACK_RATE_MAX)
}

/// Rate ready for a media element: non-finite input keeps `last_valid`.
#[inline]
pub fn sanitize_rate(rate: f64, last_valid: f64) -> f64 {
    if rate.is_finite() {
        clamp_playback_rate(rate)
    } else {
        clamp_playback_rate(last_valid)
    }
}

/// Displayed tempo: the reference BPM scaled by the effective rate.
#[inline]
pub fn current_bpm(base_bpm: Option<f64>, rate: f64) -> Option<f64> {
    base_bpm.map(|bpm| bpm * rate)
}
