//! Browser entry points.
//!
//! The page loads the WASM bundle and calls `initChat` / `initFilterSearch`
//! with the same config objects the templates already render. `initChat`
//! throws on missing markup; `initFilterSearch` degrades to a no-op.

use crate::config::{ChatConfig, SearchConfig};
use crate::infrastructure::dom::browser::BrowserDom;
use crate::infrastructure::dom::Dom;
use crate::infrastructure::http::fetch::FetchClient;
use crate::shared::errors::WidgetError;
use crate::widgets::chat::ChatWidget;
use crate::widgets::filter_search::FilterSearchWidget;
use gloo_timers::callback::Interval;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

#[wasm_bindgen(js_name = initChat)]
pub fn init_chat(config: JsValue) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let config: ChatConfig = serde_wasm_bindgen::from_value(config)
        .map_err(|err| JsValue::from_str(&format!("invalid chat config: {err}")))?;
    let dom = BrowserDom::new().map_err(to_js)?;
    let widget = ChatWidget::new(config.clone(), dom.clone(), FetchClient).map_err(to_js)?;

    if let Some(form) = dom.element_by_id(&config.form_id) {
        let w = widget.clone();
        listen(&form, "submit", move |event| {
            event.prevent_default();
            let w = w.clone();
            spawn_local(async move { w.submit().await });
        })?;
    }
    if let Some(input) = dom.element_by_id(&config.image_input_id) {
        let w = widget.clone();
        listen(&input, "change", move |_| w.select_attachment())?;
    }

    // setInterval semantics: every tick spawns its own poll. In-flight
    // requests are never awaited or aborted, and the leaked timer runs
    // for the page lifetime.
    let millis = widget.poll_interval().as_millis() as u32;
    Interval::new(millis, move || {
        let w = widget.clone();
        spawn_local(async move { w.poll().await });
    })
    .forget();

    Ok(())
}

#[wasm_bindgen(js_name = initFilterSearch)]
pub fn init_filter_search(config: JsValue) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let config: SearchConfig = serde_wasm_bindgen::from_value(config)
        .map_err(|err| JsValue::from_str(&format!("invalid search config: {err}")))?;
    let dom = BrowserDom::new().map_err(to_js)?;
    let widget = FilterSearchWidget::new(config.clone(), dom.clone(), FetchClient);
    if !widget.is_active() {
        return Ok(());
    }

    if let Some(el) = dom.element_by_id(&config.category_select_id) {
        let w = widget.clone();
        listen(&el, "change", move |_| {
            let w = w.clone();
            spawn_local(async move { w.on_category_changed().await });
        })?;
    }
    if let Some(el) = dom.element_by_id(&config.subcategory_select_id) {
        let w = widget.clone();
        listen(&el, "change", move |_| {
            let w = w.clone();
            spawn_local(async move { w.on_subcategory_changed().await });
        })?;
    }
    if let Some(el) = dom.element_by_id(&config.city_select_id) {
        let w = widget.clone();
        listen(&el, "change", move |_| {
            let w = w.clone();
            spawn_local(async move { w.on_city_changed().await });
        })?;
    }

    spawn_local(async move { widget.fetch_and_render().await });
    Ok(())
}

fn listen(
    el: &Element,
    event: &str,
    handler: impl FnMut(web_sys::Event) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
    el.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn to_js(err: WidgetError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
