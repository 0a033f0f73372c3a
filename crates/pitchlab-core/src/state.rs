//! Persisted turntable state and its JSON codec.
//!
//! The panel stores a single JSON blob under [`STORAGE_KEY`]. Anything
//! unreadable in that blob is replaced by defaults rather than surfaced as
//! an error, so a corrupt store never blocks the panel from loading.
//!
//! [`STORAGE_KEY`]: crate::constants::STORAGE_KEY

use crate::constants::{PITCH_MAX, PITCH_MIN};
use crate::error::Result;
use crate::rate::{clamp_pitch, compute_rate};
use serde::{Deserialize, Serialize};

/// Nominal platter speed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum Rpm {
    #[default]
    Rpm33,
    Rpm45,
}

impl Rpm {
    pub fn value(self) -> f64 {
        match self {
            Rpm::Rpm33 => 33.0,
            Rpm::Rpm45 => 45.0,
        }
    }
}

impl TryFrom<u32> for Rpm {
    type Error = String;

    fn try_from(v: u32) -> std::result::Result<Self, Self::Error> {
        match v {
            33 => Ok(Rpm::Rpm33),
            45 => Ok(Rpm::Rpm45),
            other => Err(format!("unsupported rpm {other}")),
        }
    }
}

impl From<Rpm> for u32 {
    fn from(rpm: Rpm) -> u32 {
        match rpm {
            Rpm::Rpm33 => 33,
            Rpm::Rpm45 => 45,
        }
    }
}

/// User-facing turntable settings, persisted on every change.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PitchState {
    pub pitch: f64,
    pub rpm_orig: Rpm,
    pub rpm_play: Rpm,
    pub base_bpm: Option<f64>,
}

impl Default for PitchState {
    fn default() -> Self {
        Self {
            pitch: 0.0,
            rpm_orig: Rpm::Rpm33,
            rpm_play: Rpm::Rpm33,
            base_bpm: None,
        }
    }
}

impl PitchState {
    pub fn effective_rate(&self) -> f64 {
        compute_rate(self.pitch, self.rpm_orig.value(), self.rpm_play.value())
    }

    /// Pull loaded values back inside their invariants.
    fn normalized(mut self) -> Self {
        self.pitch = clamp_pitch(self.pitch, 0.0);
        debug_assert!((PITCH_MIN..=PITCH_MAX).contains(&self.pitch));
        self.base_bpm = self.base_bpm.filter(|b| b.is_finite() && *b > 0.0);
        self
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let state: PitchState = serde_json::from_str(json)?;
        Ok(state.normalized())
    }

    /// Decode a stored blob, falling back to defaults on absence or damage.
    pub fn load_or_default(stored: Option<&str>) -> Self {
        match stored {
            None => Self::default(),
            Some(json) => Self::from_json(json).unwrap_or_else(|e| {
                log::warn!("[state] discarding stored state: {}", e);
                Self::default()
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_uses_camel_case_and_numeric_rpm() {
        let state = PitchState {
            pitch: 2.5,
            rpm_orig: Rpm::Rpm45,
            rpm_play: Rpm::Rpm33,
            base_bpm: Some(128.0),
        };
        let json = state.to_json().unwrap();
        assert!(json.contains("\"rpmOrig\":45"));
        assert!(json.contains("\"rpmPlay\":33"));
        assert!(json.contains("\"baseBpm\":128"));
    }

    #[test]
    fn load_clamps_pitch_and_drops_bad_bpm() {
        let state = PitchState::from_json(r#"{"pitch":20,"baseBpm":-4}"#).unwrap();
        assert_eq!(state.pitch, 8.0);
        assert_eq!(state.base_bpm, None);
        assert_eq!(state.rpm_orig, Rpm::Rpm33);
    }

    #[test]
    fn load_or_default_survives_garbage() {
        assert_eq!(PitchState::load_or_default(Some("{nope")), PitchState::default());
        assert_eq!(
            PitchState::load_or_default(Some(r#"{"rpmPlay":78}"#)),
            PitchState::default()
        );
        assert_eq!(PitchState::load_or_default(None), PitchState::default());
    }
}
