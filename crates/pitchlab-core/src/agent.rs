//! Per-frame rate owner.
//!
//! Each document context (top page or iframe) runs one [`FrameAgent`]. The
//! agent keeps the last rate it was told, pushes it onto every media element
//! the host can find, and answers the message contract. Access to the page
//! goes through [`MediaHost`] so the same logic runs against the DOM in the
//! browser and against plain structs in tests.

use crate::messages::{RateAck, Request, Response, StateReport};
use crate::rate::sanitize_rate;
use crate::relay::Receiver;

/// One `<video>` or `<audio>` element.
pub trait MediaElement {
    fn playback_rate(&self) -> f64;
    fn set_playback_rate(&self, rate: f64);
    /// Turn off the browser's pitch correction so speed shifts pitch.
    fn disable_pitch_preservation(&self);
    fn duration(&self) -> f64;
    fn current_time(&self) -> f64;
}

/// The document the agent lives in.
pub trait MediaHost {
    type Element: MediaElement;

    /// Every media element currently in the document, in document order.
    fn discover(&self) -> Vec<Self::Element>;

    fn frame_url(&self) -> Option<String> {
        None
    }

    /// Refresh an on-page readout, if the frame has one.
    fn show_rate(&self, _rate: f64) {}
}

pub struct FrameAgent<H: MediaHost> {
    host: H,
    rate: f64,
}

impl<H: MediaHost> FrameAgent<H> {
    pub fn new(host: H) -> Self {
        Self { host, rate: 1.0 }
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Store a new absolute rate and apply it. Returns the media count.
    pub fn set_rate(&mut self, rate: f64) -> usize {
        if !rate.is_finite() {
            log::warn!("[agent] ignoring non-finite rate {}", rate);
        }
        self.rate = sanitize_rate(rate, self.rate);
        self.reapply()
    }

    pub fn nudge(&mut self, delta: f64) -> usize {
        let delta = if delta.is_finite() { delta } else { 0.0 };
        self.set_rate(self.rate + delta)
    }

    /// Rediscover media and push the current rate onto it.
    pub fn reapply(&mut self) -> usize {
        let media = self.host.discover();
        if media.is_empty() {
            log::warn!("[agent] no media element found in this frame");
        }
        for el in &media {
            apply_to_element(el, self.rate);
        }
        self.host.show_rate(self.rate);
        media.len()
    }

    pub fn handle(&mut self, request: &Request) -> Option<Response> {
        let count = match *request {
            Request::SetRate { rate } => self.set_rate(rate),
            Request::ApplyRate { value } => self.set_rate(value),
            Request::NudgeRate { delta } => self.nudge(delta),
            Request::GetState {} => return self.state_report().map(Response::State),
        };
        log::info!("[agent] {} -> rate {:.4} on {} element(s)", request.kind(), self.rate, count);
        (count > 0).then(|| {
            Response::Rate(RateAck {
                ok: true,
                rate: self.rate,
                frame_url: self.host.frame_url(),
                media_count: Some(count),
            })
        })
    }

    /// `None` when this frame has no media, leaving the answer to a sibling.
    fn state_report(&self) -> Option<StateReport> {
        let media = self.host.discover();
        let first = media.first()?;
        Some(StateReport {
            ok: true,
            rate: self.rate,
            has_media: true,
            duration: finite(first.duration()),
            current_time: finite(first.current_time()),
            frame_url: self.host.frame_url(),
            media_count: Some(media.len()),
        })
    }
}

impl<H: MediaHost> Receiver for FrameAgent<H> {
    fn receive(&mut self, request: &Request) -> Option<Response> {
        self.handle(request)
    }
}

fn apply_to_element<E: MediaElement>(el: &E, rate: f64) {
    el.disable_pitch_preservation();
    if el.playback_rate() != rate {
        el.set_playback_rate(rate);
    }
}

#[inline]
fn finite(v: f64) -> Option<f64> {
    v.is_finite().then_some(v)
}
