use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    } else {
        log::warn!("missing #{}", element_id);
    }
}

/// Listen for `event` on an input-like element and hand over its value.
pub fn add_value_listener(
    document: &web::Document,
    element_id: &str,
    event: &str,
    mut handler: impl FnMut(String) + 'static,
) {
    let Some(el) = document.get_element_by_id(element_id) else {
        log::warn!("missing #{}", element_id);
        return;
    };
    let source = el.clone();
    let closure = Closure::wrap(Box::new(move || {
        if let Some(value) = element_value(&source) {
            handler(value);
        }
    }) as Box<dyn FnMut()>);
    _ = el.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

pub fn element_value(el: &web::Element) -> Option<String> {
    if let Some(input) = el.dyn_ref::<web::HtmlInputElement>() {
        return Some(input.value());
    }
    el.dyn_ref::<web::HtmlSelectElement>().map(|s| s.value())
}

pub fn set_value(document: &web::Document, element_id: &str, value: &str) {
    let Some(el) = document.get_element_by_id(element_id) else {
        return;
    };
    if let Some(input) = el.dyn_ref::<web::HtmlInputElement>() {
        input.set_value(value);
    } else if let Some(select) = el.dyn_ref::<web::HtmlSelectElement>() {
        select.set_value(value);
    }
}

/// Write text only when it differs, so DOM observers see no churn.
pub fn set_text(document: &web::Document, element_id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(element_id) {
        if el.text_content().as_deref() != Some(text) {
            el.set_text_content(Some(text));
        }
    }
}

/// Milliseconds from the page's monotonic clock.
pub fn now_ms() -> f64 {
    web::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}
