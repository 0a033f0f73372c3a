// DOM wiring and styling constants for the browser contexts.
// Kept free of web-sys types so host tests can include this file directly.

// Extension pages
pub const PANEL_PAGE: &str = "ui-panel/index.html"; // opened by the toolbar action

// Panel element ids
pub const ID_PITCH_SLIDER: &str = "pitch-slider";
pub const ID_PITCH_READOUT: &str = "pitch-readout";
pub const ID_RATE_READOUT: &str = "rate-readout";
pub const ID_RPM_ORIG: &str = "rpm-orig";
pub const ID_RPM_PLAY: &str = "rpm-play";
pub const ID_RPM_READOUT: &str = "rpm-readout";
pub const ID_NUDGE_DOWN: &str = "nudge-down";
pub const ID_NUDGE_UP: &str = "nudge-up";
pub const ID_QUARTZ: &str = "quartz";
pub const ID_TAP: &str = "tap";
pub const ID_TAP_RESET: &str = "tap-reset";
pub const ID_TAP_BPM: &str = "tap-bpm";
pub const ID_SET_BPM: &str = "set-bpm";
pub const ID_BASE_BPM: &str = "base-bpm";
pub const ID_CURRENT_BPM: &str = "current-bpm";
pub const ID_FULL_RESET: &str = "full-reset";
pub const ID_QUERY_STATE: &str = "query-state";
pub const ID_PLAYER_READOUT: &str = "player-readout";

pub const PANEL_IDS: &[&str] = &[
    ID_PITCH_SLIDER,
    ID_PITCH_READOUT,
    ID_RATE_READOUT,
    ID_RPM_ORIG,
    ID_RPM_PLAY,
    ID_RPM_READOUT,
    ID_NUDGE_DOWN,
    ID_NUDGE_UP,
    ID_QUARTZ,
    ID_TAP,
    ID_TAP_RESET,
    ID_TAP_BPM,
    ID_SET_BPM,
    ID_BASE_BPM,
    ID_CURRENT_BPM,
    ID_FULL_RESET,
    ID_QUERY_STATE,
    ID_PLAYER_READOUT,
];

// In-page floating widget
pub const WIDGET_ID: &str = "pitchlab-floating-widget";
pub const WIDGET_VALUE_ID: &str = "pitchlab-widget-value";
pub const WIDGET_MULTIPLIER_ID: &str = "pitchlab-widget-multiplier";
pub const WIDGET_MINUS_ID: &str = "pitchlab-widget-minus";
pub const WIDGET_PLUS_ID: &str = "pitchlab-widget-plus";
pub const WIDGET_LABEL: &str = "PitchLab: rate";
pub const WIDGET_STYLE: &str = "position:fixed;bottom:16px;right:16px;z-index:999999;\
background:rgba(0,0,0,0.85);color:#fff;\
font-family:system-ui,-apple-system,BlinkMacSystemFont,sans-serif;font-size:12px;\
padding:6px 10px;border-radius:4px;display:flex;align-items:center;gap:6px;\
box-shadow:0 2px 8px rgba(0,0,0,0.5)";
pub const WIDGET_BUTTON_STYLE: &str = "min-width:20px;border:1px solid #555;background:#222;\
color:#fff;cursor:pointer;border-radius:3px;padding:0 4px";

// Media discovery
pub const MEDIA_SELECTOR: &str = "video, audio";
// discovery order: the first element found answers state queries
pub const MEDIA_TAGS: &[&str] = &["VIDEO", "AUDIO"];
pub const PITCH_PRESERVE_PROPS: &[&str] = &["preservesPitch", "mozPreservesPitch", "webkitPreservesPitch"];
