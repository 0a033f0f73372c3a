//! Thin bindings over the promise-returning `chrome.*` extension APIs.
//!
//! Values cross the JS boundary as JSON so the core's serde types are the
//! single definition of the message contract.

use anyhow::anyhow;
use js_sys::{Function, Promise, JSON};
use pitchlab_core::{PitchLabError, Relay, Request, Response, TabInfo};
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["chrome", "tabs"], js_name = query)]
    fn tabs_query(query_info: &JsValue) -> Result<Promise, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "tabs"], js_name = sendMessage)]
    fn tabs_send_message(tab_id: i32, message: &JsValue) -> Result<Promise, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "tabs"], js_name = create)]
    fn tabs_create(create_properties: &JsValue) -> Result<Promise, JsValue>;

    #[wasm_bindgen(js_namespace = ["chrome", "runtime"], js_name = getURL)]
    fn runtime_get_url(path: &str) -> String;

    #[wasm_bindgen(js_namespace = ["chrome", "runtime", "onMessage"], js_name = addListener)]
    fn on_message_add_listener(listener: &Function);

    #[wasm_bindgen(js_namespace = ["chrome", "action", "onClicked"], js_name = addListener)]
    fn on_action_clicked_add_listener(listener: &Function);
}

#[derive(Serialize)]
struct UrlQuery<'a> {
    url: &'a [&'a str],
}

#[derive(Serialize)]
struct CreateTab {
    url: String,
}

#[inline]
pub fn js_err(e: JsValue) -> anyhow::Error {
    anyhow!("{:?}", e)
}

pub fn to_js<T: Serialize>(value: &T) -> anyhow::Result<JsValue> {
    let json = serde_json::to_string(value)?;
    JSON::parse(&json).map_err(js_err)
}

pub fn from_js<T: DeserializeOwned>(value: &JsValue) -> anyhow::Result<T> {
    if value.is_undefined() || value.is_null() {
        return Err(anyhow!("empty value"));
    }
    let json: String = JSON::stringify(value)
        .map_err(js_err)?
        .as_string()
        .ok_or_else(|| anyhow!("value is not JSON-serializable"))?;
    Ok(serde_json::from_str(&json)?)
}

/// Tabs whose URL matches any of `patterns`, in Chrome's order.
pub async fn query_tabs(patterns: &[&str]) -> anyhow::Result<Vec<TabInfo>> {
    let query = to_js(&UrlQuery { url: patterns })?;
    let tabs = JsFuture::from(tabs_query(&query).map_err(js_err)?)
        .await
        .map_err(js_err)?;
    from_js(&tabs)
}

/// Deliver to every frame of `tab_id`; `Ok(None)` when no frame answered.
pub async fn send_to_tab(tab_id: i32, request: &Request) -> pitchlab_core::Result<Option<Response>> {
    let message = to_js(request).map_err(|e| PitchLabError::Delivery(e.to_string()))?;
    let promise =
        tabs_send_message(tab_id, &message).map_err(|e| PitchLabError::Delivery(format!("{:?}", e)))?;
    let reply = JsFuture::from(promise)
        .await
        .map_err(|e| PitchLabError::Delivery(format!("{:?}", e)))?;
    if reply.is_undefined() || reply.is_null() {
        return Ok(None);
    }
    from_js(&reply)
        .map(Some)
        .map_err(|e| PitchLabError::Delivery(e.to_string()))
}

/// Resolve the target tab through `relay` and send `request` to it.
///
/// Best effort: every failure is logged by the relay and reads as `None`.
pub async fn deliver(relay: &Relay, request: Request) -> Option<Response> {
    let tabs = match query_tabs(relay.patterns()).await {
        Ok(tabs) => tabs,
        Err(e) => {
            log::warn!("[relay] tab query failed: {:?}", e);
            return None;
        }
    };
    let outcome = match relay.select_target(&tabs) {
        Ok(tab_id) => send_to_tab(tab_id, &request).await,
        Err(e) => Err(e),
    };
    let response = outcome.as_ref().ok().cloned().flatten();
    relay.report_delivery(outcome);
    response
}

pub fn open_extension_page(path: &str) {
    let url = runtime_get_url(path);
    let props = match to_js(&CreateTab { url }) {
        Ok(p) => p,
        Err(e) => {
            log::error!("[bg] tab props: {:?}", e);
            return;
        }
    };
    if let Err(e) = tabs_create(&props) {
        log::warn!("[bg] tabs.create failed: {:?}", e);
    }
}

/// Register a runtime message listener.
///
/// Messages that are not part of the contract are ignored. A handler that
/// returns `None` leaves `sendResponse` uncalled so another frame may answer.
pub fn add_message_listener(mut handler: impl FnMut(Request) -> Option<Response> + 'static) {
    let closure = Closure::wrap(Box::new(
        move |message: JsValue, _sender: JsValue, send_response: Function| -> JsValue {
            let request: Request = match from_js(&message) {
                Ok(r) => r,
                Err(e) => {
                    log::debug!("ignoring message: {:?}", e);
                    return JsValue::FALSE;
                }
            };
            if let Some(response) = handler(request) {
                match to_js(&response) {
                    Ok(js) => {
                        _ = send_response.call1(&JsValue::NULL, &js);
                    }
                    Err(e) => log::error!("response encode failed: {:?}", e),
                }
            }
            JsValue::FALSE
        },
    ) as Box<dyn FnMut(JsValue, JsValue, Function) -> JsValue>);
    on_message_add_listener(closure.as_ref().unchecked_ref());
    closure.forget();
}

pub fn on_action_clicked(mut handler: impl FnMut() + 'static) {
    let closure = Closure::wrap(Box::new(move |_tab: JsValue| handler()) as Box<dyn FnMut(JsValue)>);
    on_action_clicked_add_listener(closure.as_ref().unchecked_ref());
    closure.forget();
}
