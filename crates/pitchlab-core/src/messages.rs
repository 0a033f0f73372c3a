//! Message contract exchanged between panel, relay and frame agents.
//!
//! Requests are JSON objects tagged by their `type` field. Responses carry
//! no tag; a state report is told apart from a rate ack by its extra fields.

use crate::error::Result;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    /// Absolute rate. Older panels send `SET_RATE` with a `value` field.
    #[serde(rename = "PITCHLAB_SET_RATE", alias = "SET_RATE")]
    SetRate {
        #[serde(alias = "value")]
        rate: f64,
    },
    #[serde(rename = "PITCHLAB_NUDGE_RATE")]
    NudgeRate { delta: f64 },
    #[serde(rename = "PITCHLAB_GET_STATE")]
    GetState {},
    /// Background relay → content script.
    #[serde(rename = "APPLY_RATE")]
    ApplyRate { value: f64 },
}

impl Request {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Request::SetRate { .. } => "PITCHLAB_SET_RATE",
            Request::NudgeRate { .. } => "PITCHLAB_NUDGE_RATE",
            Request::GetState {} => "PITCHLAB_GET_STATE",
            Request::ApplyRate { .. } => "APPLY_RATE",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateAck {
    pub ok: bool,
    pub rate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_count: Option<usize>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateReport {
    pub ok: bool,
    pub rate: f64,
    pub has_media: bool,
    /// `None` while the element has no known duration (NaN / live stream).
    pub duration: Option<f64>,
    pub current_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_count: Option<usize>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    State(StateReport),
    Rate(RateAck),
}

impl Response {
    pub fn rate(&self) -> f64 {
        match self {
            Response::State(s) => s.rate,
            Response::Rate(r) => r.rate,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
