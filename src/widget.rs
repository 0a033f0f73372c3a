use crate::constants::{
    WIDGET_BUTTON_STYLE, WIDGET_ID, WIDGET_LABEL, WIDGET_MINUS_ID, WIDGET_MULTIPLIER_ID,
    WIDGET_PLUS_ID, WIDGET_STYLE, WIDGET_VALUE_ID,
};
use crate::dom;
use crate::format::format_widget_rate;
use web_sys as web;

#[inline]
pub fn exists(document: &web::Document) -> bool {
    document.get_element_by_id(WIDGET_ID).is_some()
}

fn span(document: &web::Document, id: Option<&str>, text: &str) -> anyhow::Result<web::Element> {
    let el = document.create_element("span").map_err(crate::bridge::js_err)?;
    if let Some(id) = id {
        el.set_id(id);
    }
    el.set_text_content(Some(text));
    Ok(el)
}

fn button(document: &web::Document, id: &str, text: &str) -> anyhow::Result<web::Element> {
    let el = document.create_element("button").map_err(crate::bridge::js_err)?;
    el.set_id(id);
    el.set_text_content(Some(text));
    _ = el.set_attribute("style", WIDGET_BUTTON_STYLE);
    Ok(el)
}

/// Build the floating rate widget once per document.
///
/// `on_nudge` receives -1 or +1 from the −/+ buttons.
pub fn ensure(
    document: &web::Document,
    rate: f64,
    on_nudge: impl Fn(f64) + Clone + 'static,
) -> anyhow::Result<()> {
    if exists(document) {
        return Ok(());
    }
    let Some(body) = document.body() else {
        return Ok(());
    };
    let container = document.create_element("div").map_err(crate::bridge::js_err)?;
    container.set_id(WIDGET_ID);
    _ = container.set_attribute("style", WIDGET_STYLE);

    let (value, multiplier) = format_widget_rate(rate);
    let parts = [
        span(document, None, WIDGET_LABEL)?,
        button(document, WIDGET_MINUS_ID, "−")?,
        span(document, Some(WIDGET_VALUE_ID), &value)?,
        button(document, WIDGET_PLUS_ID, "+")?,
        span(document, Some(WIDGET_MULTIPLIER_ID), &multiplier)?,
    ];
    for part in &parts {
        container.append_child(part).map_err(crate::bridge::js_err)?;
    }
    body.append_child(&container).map_err(crate::bridge::js_err)?;

    let down = on_nudge.clone();
    dom::add_click_listener(document, WIDGET_MINUS_ID, move || down(-1.0));
    dom::add_click_listener(document, WIDGET_PLUS_ID, move || on_nudge(1.0));
    log::info!("[content] widget attached");
    Ok(())
}

pub fn show_rate(document: &web::Document, rate: f64) {
    let (value, multiplier) = format_widget_rate(rate);
    dom::set_text(document, WIDGET_VALUE_ID, &value);
    dom::set_text(document, WIDGET_MULTIPLIER_ID, &multiplier);
}
