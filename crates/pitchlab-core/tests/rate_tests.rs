// Host-side tests for the rate model and tap tempo.

use pitchlab_core::constants::{PLAYBACK_RATE_MAX, PLAYBACK_RATE_MIN, TAP_WINDOW};
use pitchlab_core::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn clamp_pitch_stays_in_fader_range() {
    let mut last = 0.0;
    for i in -400..=400 {
        let p = i as f64 * 0.1;
        let c = clamp_pitch(p, last);
        assert!((-8.0..=8.0).contains(&c), "pitch {p} clamped to {c}");
        last = c;
    }
}

#[test]
fn clamp_pitch_nan_returns_previous_valid() {
    assert_eq!(clamp_pitch(f64::NAN, 4.25), 4.25);
    assert_eq!(clamp_pitch(f64::NAN, -7.5), -7.5);
}

#[test]
fn equal_rpm_at_zero_pitch_is_unity() {
    assert_eq!(compute_rate(0.0, 33.0, 33.0), 1.0);
    assert_eq!(compute_rate(0.0, 45.0, 45.0), 1.0);
}

#[test]
fn rpm_factor_is_independent_of_pitch() {
    for i in -16..=16 {
        let p = i as f64 * 0.5;
        let expected = compute_rate(p, 33.0, 33.0) * (45.0 / 33.0);
        assert!(approx(compute_rate(p, 33.0, 45.0), expected), "pitch {p}");
    }
}

#[test]
fn max_pitch_at_45_from_33_fits_playback_range() {
    let rate = compute_rate(8.0, 33.0, 45.0);
    assert!((rate - 1.472_727).abs() < 1e-6);
    assert!((PLAYBACK_RATE_MIN..=PLAYBACK_RATE_MAX).contains(&rate));
    assert_eq!(clamp_playback_rate(rate), rate);
}

#[test]
fn rates_below_floor_are_clamped_before_assignment() {
    let rate = compute_rate(-8.0, 45.0, 20.0);
    assert!(rate < 0.5);
    assert_eq!(clamp_playback_rate(rate), 0.5);
    assert_eq!(clamp_playback_rate(2.0), 1.5);
}

#[test]
fn taps_every_500ms_give_120_bpm() {
    let taps: Vec<f64> = (0..6).map(|i| 1_000.0 + i as f64 * 500.0).collect();
    assert_eq!(compute_tap_bpm(&taps), Some(120.0));
}

#[test]
fn fewer_than_two_taps_give_none() {
    assert_eq!(compute_tap_bpm(&[]), None);
    assert_eq!(compute_tap_bpm(&[42.0]), None);
}

#[test]
fn tap_bpm_outside_bounds_is_rejected() {
    // 100 ms apart -> 600 BPM
    assert_eq!(compute_tap_bpm(&[0.0, 100.0, 200.0]), None);
    // identical timestamps -> infinite
    assert_eq!(compute_tap_bpm(&[5.0, 5.0]), None);
    // clock went backwards -> negative
    assert_eq!(compute_tap_bpm(&[500.0, 0.0]), None);
    // exactly 300 is allowed
    assert_eq!(compute_tap_bpm(&[0.0, 200.0]), Some(300.0));
}

#[test]
fn tap_buffer_keeps_most_recent_six() {
    let mut buf = TapBuffer::new();
    for i in 0..TAP_WINDOW {
        buf.push(i as f64 * 1_000.0);
    }
    assert_eq!(buf.len(), TAP_WINDOW);
    assert_eq!(buf.as_slice()[0], 0.0);

    buf.push(6_000.0);
    assert_eq!(buf.len(), TAP_WINDOW);
    assert_eq!(buf.as_slice()[0], 1_000.0);
    assert_eq!(buf.as_slice()[TAP_WINDOW - 1], 6_000.0);
}

#[test]
fn tap_buffer_window_tracks_tempo_change() {
    let mut buf = TapBuffer::new();
    let mut t = 0.0;
    for _ in 0..6 {
        buf.push(t);
        t += 1_000.0; // 60 BPM
    }
    assert_eq!(buf.bpm(), Some(60.0));
    for _ in 0..6 {
        buf.push(t);
        t += 500.0;
    }
    assert_eq!(buf.bpm(), Some(120.0));
    buf.clear();
    assert!(buf.is_empty());
    assert_eq!(buf.bpm(), None);
}
