//! Panel page: the turntable controls.
//!
//! The panel owns the [`ControlSurface`]. Every user action mutates it,
//! persists the changed state, redraws the readouts and pushes the new rate
//! through the relay to the target tab.

use crate::constants::*;
use crate::events::keyboard;
use crate::format::{format_bpm, format_pitch, format_player, format_rate, format_rpm};
use crate::keys::PanelAction;
use crate::{bridge, dom, storage};
use anyhow::anyhow;
use pitchlab_core::{ControlSurface, Relay, Request, Response, Rpm};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

#[derive(Clone)]
struct Panel {
    document: web::Document,
    surface: Rc<RefCell<ControlSurface>>,
    relay: Rc<Relay>,
}

pub fn start() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow!("no document"))?;
    let missing: Vec<&str> = PANEL_IDS
        .iter()
        .copied()
        .filter(|id| document.get_element_by_id(id).is_none())
        .collect();
    if !missing.is_empty() {
        log::warn!("[panel] page is missing controls: {}", missing.join(", "));
    }
    let stored = storage::load();
    let panel = Panel {
        document,
        surface: Rc::new(RefCell::new(ControlSurface::from_storage(stored.as_deref()))),
        relay: Rc::new(Relay::default()),
    };
    panel.render();
    panel.wire();

    // bring the player in line with the restored deck
    let rate = panel.surface.borrow().effective_rate();
    log::info!("[panel] restored state, resyncing rate {:.4}", rate);
    panel.dispatch(rate);
    Ok(())
}

fn parse_rpm(value: &str) -> Option<Rpm> {
    value.trim().parse::<u32>().ok().and_then(|v| Rpm::try_from(v).ok())
}

impl Panel {
    fn wire(&self) {
        let doc = &self.document;

        let p = self.clone();
        dom::add_value_listener(doc, ID_PITCH_SLIDER, "input", move |value| {
            let pitch = value.trim().parse::<f64>().unwrap_or(f64::NAN);
            p.apply(|s| Some(s.set_pitch(pitch)));
        });

        let p = self.clone();
        dom::add_value_listener(doc, ID_RPM_ORIG, "change", move |value| match parse_rpm(&value) {
            Some(rpm) => p.apply(|s| Some(s.set_rpm_orig(rpm))),
            None => {
                log::warn!("[panel] unsupported rpm {:?}", value);
                p.render();
            }
        });

        let p = self.clone();
        dom::add_value_listener(doc, ID_RPM_PLAY, "change", move |value| match parse_rpm(&value) {
            Some(rpm) => p.apply(|s| Some(s.set_rpm_play(rpm))),
            None => {
                log::warn!("[panel] unsupported rpm {:?}", value);
                p.render();
            }
        });

        let buttons = [
            (ID_NUDGE_DOWN, PanelAction::NudgeDown),
            (ID_NUDGE_UP, PanelAction::NudgeUp),
            (ID_QUARTZ, PanelAction::Quartz),
            (ID_TAP, PanelAction::Tap),
            (ID_TAP_RESET, PanelAction::ResetTaps),
            (ID_SET_BPM, PanelAction::SetBpm),
            (ID_FULL_RESET, PanelAction::FullReset),
            (ID_QUERY_STATE, PanelAction::QueryState),
        ];
        for (id, action) in buttons {
            let p = self.clone();
            dom::add_click_listener(doc, id, move || p.run(action));
        }

        let p = self.clone();
        keyboard::wire_panel_keydown(move |action| p.run(action));
    }

    fn run(&self, action: PanelAction) {
        match action {
            PanelAction::NudgeDown => self.apply(|s| Some(s.nudge_pitch(-1.0))),
            PanelAction::NudgeUp => self.apply(|s| Some(s.nudge_pitch(1.0))),
            PanelAction::Quartz => self.apply(|s| Some(s.quartz())),
            PanelAction::Tap => self.apply(|s| {
                s.tap(dom::now_ms());
                None
            }),
            PanelAction::ResetTaps => self.apply(|s| {
                s.reset_taps();
                None
            }),
            PanelAction::SetBpm => self.apply(|s| {
                if s.promote_tap_bpm().is_none() {
                    log::info!("[panel] no tapped tempo to keep");
                }
                None
            }),
            PanelAction::FullReset => self.apply(|s| Some(s.full_reset())),
            PanelAction::QueryState => self.query_state(),
        }
    }

    /// Mutate the surface, then persist, redraw and dispatch as needed.
    fn apply(&self, f: impl FnOnce(&mut ControlSurface) -> Option<f64>) {
        let (rate, snapshot) = {
            let mut surface = self.surface.borrow_mut();
            let rate = f(&mut surface);
            (rate, surface.take_snapshot())
        };
        if let Some(state) = snapshot {
            if let Err(e) = storage::save(&state) {
                log::warn!("[panel] could not persist state: {}", e);
            }
        }
        self.render();
        if let Some(rate) = rate {
            self.dispatch(rate);
        }
    }

    fn dispatch(&self, rate: f64) {
        let relay = self.relay.clone();
        spawn_local(async move {
            bridge::deliver(&relay, Request::SetRate { rate }).await;
        });
    }

    fn query_state(&self) {
        let relay = self.relay.clone();
        let document = self.document.clone();
        spawn_local(async move {
            let text = match bridge::deliver(&relay, Request::GetState {}).await {
                Some(Response::State(report)) => format_player(
                    report.rate,
                    report.current_time,
                    report.duration,
                    report.media_count,
                ),
                Some(Response::Rate(ack)) => format_rate(ack.rate),
                None => "no player answered".to_string(),
            };
            dom::set_text(&document, ID_PLAYER_READOUT, &text);
        });
    }

    fn render(&self) {
        let doc = &self.document;
        let surface = self.surface.borrow();
        let state = surface.state();
        let orig = u32::from(state.rpm_orig);
        let play = u32::from(state.rpm_play);

        dom::set_value(doc, ID_PITCH_SLIDER, &format!("{}", state.pitch));
        dom::set_value(doc, ID_RPM_ORIG, &orig.to_string());
        dom::set_value(doc, ID_RPM_PLAY, &play.to_string());
        dom::set_text(doc, ID_PITCH_READOUT, &format_pitch(state.pitch));
        dom::set_text(doc, ID_RATE_READOUT, &format_rate(surface.effective_rate()));
        dom::set_text(doc, ID_RPM_READOUT, &format_rpm(orig, play));
        dom::set_text(doc, ID_TAP_BPM, &format_bpm(surface.tap_bpm()));
        dom::set_text(doc, ID_BASE_BPM, &format_bpm(state.base_bpm));
        dom::set_text(doc, ID_CURRENT_BPM, &format_bpm(surface.current_bpm()));
    }
}
