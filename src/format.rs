// Readout formatting shared by the panel and the in-page widget.

/// `+2.00%` / `-0.50%`
pub fn format_pitch(pitch: f64) -> String {
    let sign = if pitch >= 0.0 { "+" } else { "" };
    format!("{}{:.2}%", sign, pitch)
}

/// Panel multiplier, four decimals: `1.0800x`
pub fn format_rate(rate: f64) -> String {
    format!("{:.4}x", rate)
}

/// Widget pair: bare value and multiplier, two decimals.
pub fn format_widget_rate(rate: f64) -> (String, String) {
    (format!("{:.2}", rate), format!("{:.2}x", rate))
}

pub fn format_bpm(bpm: Option<f64>) -> String {
    match bpm {
        Some(b) if b.is_finite() => format!("{:.1}", b),
        _ => "--".to_string(),
    }
}

pub fn format_rpm(orig: u32, play: u32) -> String {
    format!("Orig: {} • Play: {}", orig, play)
}

/// `m:ss`, or `--:--` while unknown.
pub fn format_clock(seconds: Option<f64>) -> String {
    match seconds {
        Some(s) if s.is_finite() && s >= 0.0 => {
            let total = s.floor() as u64;
            format!("{}:{:02}", total / 60, total % 60)
        }
        _ => "--:--".to_string(),
    }
}

/// Player readout from a frame's state report.
pub fn format_player(
    rate: f64,
    current_time: Option<f64>,
    duration: Option<f64>,
    media_count: Option<usize>,
) -> String {
    format!(
        "{} • {} / {} • {} media",
        format_rate(rate),
        format_clock(current_time),
        format_clock(duration),
        media_count.unwrap_or(1)
    )
}
