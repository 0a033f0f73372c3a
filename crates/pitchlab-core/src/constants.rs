// Tuning constants shared by every execution context.

// Pitch fader range, in percent
pub const PITCH_MIN: f64 = -8.0;
pub const PITCH_MAX: f64 = 8.0;
pub const PITCH_NUDGE_PERCENT: f64 = 1.0; // panel −1% / +1% buttons

// Media element playbackRate bounds enforced before assignment
pub const PLAYBACK_RATE_MIN: f64 = 0.5;
pub const PLAYBACK_RATE_MAX: f64 = 1.5;
pub const RATE_NUDGE_STEP: f64 = 0.01; // in-page widget −/+ buttons

// Tap tempo
pub const TAP_WINDOW: usize = 6; // most recent taps kept
pub const TAP_BPM_MAX: f64 = 300.0; // exclusive lower bound is 0
pub const MS_PER_MINUTE: f64 = 60_000.0;

// Persistence
pub const STORAGE_KEY: &str = "pitchlab.state";

// Tabs the panel is allowed to drive
pub const TARGET_URL_PATTERNS: &[&str] = &[
    "*://*.youtube.com/*",
    "*://*.discogs.com/*",
    "*://*.bandcamp.com/*",
];
