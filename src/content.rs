//! Content-script context: one frame agent per document.

use crate::bridge::{self, js_err};
use crate::constants::{MEDIA_SELECTOR, MEDIA_TAGS, PITCH_PRESERVE_PROPS};
use crate::{dom, widget};
use anyhow::anyhow;
use pitchlab_core::constants::RATE_NUDGE_STEP;
use pitchlab_core::{FrameAgent, MediaElement, MediaHost};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

pub struct WebMedia(web::HtmlMediaElement);

impl MediaElement for WebMedia {
    fn playback_rate(&self) -> f64 {
        self.0.playback_rate()
    }

    fn set_playback_rate(&self, rate: f64) {
        self.0.set_playback_rate(rate);
    }

    // vendor-prefixed names for older Gecko/WebKit
    fn disable_pitch_preservation(&self) {
        for prop in PITCH_PRESERVE_PROPS {
            _ = js_sys::Reflect::set(&self.0, &JsValue::from_str(prop), &JsValue::FALSE);
        }
    }

    fn duration(&self) -> f64 {
        self.0.duration()
    }

    fn current_time(&self) -> f64 {
        self.0.current_time()
    }
}

pub struct PageMedia {
    document: web::Document,
}

impl MediaHost for PageMedia {
    type Element = WebMedia;

    /// Videos before audio, each in document order.
    fn discover(&self) -> Vec<WebMedia> {
        MEDIA_TAGS
            .iter()
            .filter_map(|tag| self.document.query_selector_all(&tag.to_ascii_lowercase()).ok())
            .flat_map(|list| (0..list.length()).filter_map(move |i| list.item(i)))
            .filter_map(|n| n.dyn_into::<web::HtmlMediaElement>().ok())
            .map(WebMedia)
            .collect()
    }

    fn frame_url(&self) -> Option<String> {
        self.document.location().and_then(|l| l.href().ok())
    }

    fn show_rate(&self, rate: f64) {
        widget::show_rate(&self.document, rate);
    }
}

type Agent = Rc<RefCell<FrameAgent<PageMedia>>>;

pub fn start() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow!("no document"))?;
    let agent: Agent = Rc::new(RefCell::new(FrameAgent::new(PageMedia {
        document: document.clone(),
    })));

    let count = agent.borrow_mut().reapply();
    if count > 0 {
        attach_widget(&document, &agent);
    }

    wire_messages(agent.clone(), document.clone());
    wire_media_observer(agent.clone(), document.clone())?;
    wire_media_reload(agent, &document);
    log::info!("[content] agent ready, {} media element(s)", count);
    Ok(())
}

fn attach_widget(document: &web::Document, agent: &Agent) {
    if widget::exists(document) {
        return;
    }
    let rate = agent.borrow().rate();
    let agent = agent.clone();
    let nudge = move |direction: f64| {
        agent.borrow_mut().nudge(direction * RATE_NUDGE_STEP);
    };
    if let Err(e) = widget::ensure(document, rate, nudge) {
        log::warn!("[content] widget: {:?}", e);
    }
}

fn wire_messages(agent: Agent, document: web::Document) {
    bridge::add_message_listener(move |request| {
        let response = agent.borrow_mut().handle(&request);
        if response.is_some() {
            attach_widget(&document, &agent);
        }
        response
    });
}

fn node_has_media(node: &web::Node) -> bool {
    let Some(el) = node.dyn_ref::<web::Element>() else {
        return false;
    };
    MEDIA_TAGS.contains(&el.tag_name().as_str())
        || el.query_selector(MEDIA_SELECTOR).ok().flatten().is_some()
}

fn record_adds_media(record: &JsValue) -> bool {
    let Some(record) = record.dyn_ref::<web::MutationRecord>() else {
        return false;
    };
    let added = record.added_nodes();
    (0..added.length())
        .filter_map(|i| added.item(i))
        .any(|n| node_has_media(&n))
}

// Players inserted after load (SPA navigation, lazy embeds) get the rate too.
fn wire_media_observer(agent: Agent, document: web::Document) -> anyhow::Result<()> {
    let doc = document.clone();
    let closure = Closure::wrap(Box::new(
        move |records: js_sys::Array, _observer: web::MutationObserver| {
            if !records.iter().any(|r| record_adds_media(&r)) {
                return;
            }
            let count = agent.borrow_mut().reapply();
            log::info!("[content] media added, reapplied to {} element(s)", count);
            if count > 0 {
                attach_widget(&doc, &agent);
            }
        },
    ) as Box<dyn FnMut(js_sys::Array, web::MutationObserver)>);
    let observer = web::MutationObserver::new(closure.as_ref().unchecked_ref()).map_err(js_err)?;
    let init = web::MutationObserverInit::new();
    init.set_child_list(true);
    init.set_subtree(true);
    observer
        .observe_with_options(&document, &init)
        .map_err(js_err)?;
    closure.forget();
    Ok(())
}

// Loading a new source resets playbackRate to the default.
fn wire_media_reload(agent: Agent, document: &web::Document) {
    let closure = Closure::wrap(Box::new(move |_ev: web::Event| {
        agent.borrow_mut().reapply();
    }) as Box<dyn FnMut(_)>);
    _ = document.add_event_listener_with_callback_and_bool(
        "loadedmetadata",
        closure.as_ref().unchecked_ref(),
        true,
    );
    closure.forget();
}
