//! `web-sys` implementation of [`Dom`] bound to the live document.

use super::Dom;
use crate::domain::models::SelectOption;
use crate::shared::errors::{Result, WidgetError};
use crate::shared::utils::cookie_value;
use wasm_bindgen::{JsCast, UnwrapThrowExt};
use web_sys::{
    Document, Element, FormData, HtmlDocument, HtmlFormElement, HtmlInputElement,
    HtmlOptionElement, HtmlSelectElement,
};

#[derive(Clone)]
pub struct BrowserDom {
    document: Document,
}

impl BrowserDom {
    pub fn new() -> Result<Self> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| WidgetError::Configuration(vec!["document".to_string()]))?;
        Ok(Self { document })
    }
}

impl Dom for BrowserDom {
    type Element = Element;
    type Form = FormData;

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn value(&self, el: &Element) -> String {
        if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
            select.value()
        } else {
            el.text_content().unwrap_or_default()
        }
    }

    fn set_value(&self, el: &Element, value: &str) {
        if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        } else if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
            select.set_value(value);
        }
    }

    fn set_text(&self, el: &Element, text: &str) {
        el.set_text_content(Some(text));
    }

    fn set_disabled(&self, el: &Element, disabled: bool) {
        if disabled {
            let _ = el.set_attribute("disabled", "disabled");
        } else {
            let _ = el.remove_attribute("disabled");
        }
    }

    fn set_hidden(&self, el: &Element, hidden: bool) {
        let class_list = el.class_list();
        let _ = if hidden {
            class_list.add_1("hidden")
        } else {
            class_list.remove_1("hidden")
        };
    }

    fn clear_children(&self, el: &Element) {
        el.set_inner_html("");
    }

    fn append_html(&self, el: &Element, html: &str) {
        let Ok(holder) = self.document.create_element("div") else {
            return;
        };
        holder.set_inner_html(html);
        if let Some(node) = holder.first_element_child() {
            let _ = el.append_child(&node);
        }
    }

    fn query_child(&self, el: &Element, selector: &str) -> Option<Element> {
        el.query_selector(selector).ok().flatten()
    }

    fn scroll_to_bottom(&self, el: &Element) {
        el.set_scroll_top(el.scroll_height());
    }

    fn selected_file_name(&self, el: &Element) -> Option<String> {
        let input = el.dyn_ref::<HtmlInputElement>()?;
        input.files()?.get(0).map(|file| file.name())
    }

    fn clear_file(&self, el: &Element) {
        if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
            input.set_value("");
        }
    }

    fn options(&self, el: &Element) -> Vec<SelectOption> {
        let Some(select) = el.dyn_ref::<HtmlSelectElement>() else {
            return Vec::new();
        };
        let collection = select.options();
        let mut options = Vec::with_capacity(collection.length() as usize);
        for index in 0..collection.length() {
            let Some(item) = collection.item(index) else {
                continue;
            };
            let Ok(option) = item.dyn_into::<HtmlOptionElement>() else {
                continue;
            };
            options.push(SelectOption {
                value: option.value(),
                label: option.text(),
                category: option.get_attribute("data-category"),
            });
        }
        options
    }

    fn append_option(&self, el: &Element, option: &SelectOption) {
        let Ok(node) = self.document.create_element("option") else {
            return;
        };
        node.set_text_content(Some(&option.label));
        let _ = node.set_attribute("value", &option.value);
        if let Some(category) = &option.category {
            let _ = node.set_attribute("data-category", category);
        }
        let _ = el.append_child(&node);
    }

    fn form_payload(&self, form: &Element) -> FormData {
        // FormData::new only fails outside a browsing context.
        form.dyn_ref::<HtmlFormElement>()
            .and_then(|form| FormData::new_with_form(form).ok())
            .or_else(|| FormData::new().ok())
            .unwrap_throw()
    }

    fn form_field_value(&self, form: &Element, name: &str) -> Option<String> {
        let selector = format!("input[name='{name}']");
        let input = form.query_selector(&selector).ok().flatten()?;
        input.dyn_ref::<HtmlInputElement>().map(HtmlInputElement::value)
    }

    fn cookie(&self, name: &str) -> Option<String> {
        let raw = self.document.dyn_ref::<HtmlDocument>()?.cookie().ok()?;
        cookie_value(&raw, name)
    }
}
