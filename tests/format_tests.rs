// Host-side tests for readout formatting.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod format {
    include!("../src/format.rs");
}

use format::*;

#[test]
fn pitch_has_explicit_sign() {
    assert_eq!(format_pitch(0.0), "+0.00%");
    assert_eq!(format_pitch(2.5), "+2.50%");
    assert_eq!(format_pitch(-8.0), "-8.00%");
}

#[test]
fn rate_readouts() {
    assert_eq!(format_rate(1.0), "1.0000x");
    assert_eq!(format_rate(1.472_727_27), "1.4727x");
    let (value, multiplier) = format_widget_rate(1.01);
    assert_eq!(value, "1.01");
    assert_eq!(multiplier, "1.01x");
}

#[test]
fn bpm_unknown_renders_dashes() {
    assert_eq!(format_bpm(None), "--");
    assert_eq!(format_bpm(Some(f64::NAN)), "--");
    assert_eq!(format_bpm(Some(126.0)), "126.0");
}

#[test]
fn rpm_pair() {
    assert_eq!(format_rpm(33, 45), "Orig: 33 • Play: 45");
}

#[test]
fn clock_readout() {
    assert_eq!(format_clock(Some(0.0)), "0:00");
    assert_eq!(format_clock(Some(83.9)), "1:23");
    assert_eq!(format_clock(Some(3_600.0)), "60:00");
    assert_eq!(format_clock(None), "--:--");
    assert_eq!(format_clock(Some(f64::INFINITY)), "--:--");
}

#[test]
fn player_readout() {
    assert_eq!(
        format_player(1.05, Some(83.0), Some(240.0), Some(2)),
        "1.0500x • 1:23 / 4:00 • 2 media"
    );
    assert_eq!(format_player(1.0, None, None, None), "1.0000x • --:-- / --:-- • 1 media");
}
