use crate::keys::{action_for_key, PanelAction};
use wasm_bindgen::JsCast;
use web_sys as web;

// Keys typed into the fader or the RPM selects belong to those controls.
fn targets_form_control(ev: &web::KeyboardEvent) -> bool {
    ev.target().is_some_and(|t| {
        t.dyn_ref::<web::HtmlInputElement>().is_some()
            || t.dyn_ref::<web::HtmlSelectElement>().is_some()
    })
}

pub fn handle_panel_keydown(ev: &web::KeyboardEvent, on_action: &mut impl FnMut(PanelAction)) {
    if ev.repeat() || targets_form_control(ev) {
        return;
    }
    if let Some(action) = action_for_key(&ev.key(), ev.shift_key()) {
        log::debug!("[keys] {:?}", action);
        on_action(action);
        ev.prevent_default();
    }
}

pub fn wire_panel_keydown(mut on_action: impl FnMut(PanelAction) + 'static) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_panel_keydown(&ev, &mut on_action);
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
