#![cfg(target_arch = "wasm32")]
//! Browser glue for pitchlab. One wasm module serves the three extension
//! contexts; each context's loader calls its own `start_*` export.
use wasm_bindgen::prelude::*;

mod background;
mod bridge;
mod constants;
mod content;
mod dom;
mod events;
mod format;
mod keys;
mod panel;
mod storage;
mod widget;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("pitchlab wasm loaded");
    Ok(())
}

fn report(context: &str, result: anyhow::Result<()>) -> Result<(), JsValue> {
    result.map_err(|e| {
        log::error!("[{}] init error: {:?}", context, e);
        JsValue::from_str(&e.to_string())
    })
}

/// Control panel page.
#[wasm_bindgen]
pub fn start_panel() -> Result<(), JsValue> {
    report("panel", panel::start())
}

/// Content script, once per frame.
#[wasm_bindgen]
pub fn start_content() -> Result<(), JsValue> {
    report("content", content::start())
}

/// Background service worker.
#[wasm_bindgen]
pub fn start_background() -> Result<(), JsValue> {
    background::start();
    Ok(())
}
