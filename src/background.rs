//! Background service worker: toolbar action and the `SET_RATE` relay.

use crate::bridge;
use crate::constants::PANEL_PAGE;
use pitchlab_core::Relay;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;

pub fn start() {
    bridge::on_action_clicked(|| bridge::open_extension_page(PANEL_PAGE));

    let relay = Rc::new(Relay::default());
    bridge::add_message_listener(move |request| {
        let forwarded = relay.forward(&request)?;
        log::info!("[bg] forwarding {:?}", forwarded);
        let relay = relay.clone();
        spawn_local(async move {
            bridge::deliver(&relay, forwarded).await;
        });
        // the panel does not wait on the relay
        None
    });
    log::info!("[bg] service worker started");
}
