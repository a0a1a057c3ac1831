//! In-memory [`Dom`] implementation backing the native build.
//!
//! Records every mutation the controllers make (appended fragments,
//! rebuilt options, scroll calls) so tests can assert on them without a
//! rendering environment.

use super::Dom;
use crate::domain::models::SelectOption;
use crate::shared::utils::cookie_value;
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

/// Multipart payload snapshot produced by [`FakeDom::form_payload`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FakeForm {
    pub fields: BTreeMap<String, String>,
    pub file: Option<String>,
}

#[derive(Debug, Default)]
struct FakeElement {
    value: String,
    text: String,
    disabled: bool,
    hidden: bool,
    fragments: Vec<String>,
    options: Vec<SelectOption>,
    file: Option<String>,
    fields: BTreeMap<String, String>,
    scrolls: u32,
}

#[derive(Debug, Default)]
struct FakeDomState {
    elements: HashMap<String, FakeElement>,
    // (parent id, selector) -> child id
    children: HashMap<(String, String), String>,
    cookies: String,
}

/// Clones share the same underlying document, like handles to one page.
#[derive(Debug, Clone, Default)]
pub struct FakeDom {
    state: Rc<RefCell<FakeDomState>>,
}

impl FakeDom {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_element(&self, id: &str) -> String {
        self.state
            .borrow_mut()
            .elements
            .entry(id.to_string())
            .or_default();
        id.to_string()
    }

    /// Register `child` as the node `query_child(parent, selector)` finds.
    pub fn link_child(&self, parent: &str, selector: &str, child: &str) {
        self.add_element(child);
        self.state
            .borrow_mut()
            .children
            .insert((parent.to_string(), selector.to_string()), child.to_string());
    }

    pub fn set_cookies(&self, raw: &str) {
        self.state.borrow_mut().cookies = raw.to_string();
    }

    pub fn set_file(&self, id: &str, name: Option<&str>) {
        self.with_element(id, |el| el.file = name.map(str::to_string));
    }

    pub fn set_form_field(&self, id: &str, name: &str, value: &str) {
        self.with_element(id, |el| {
            el.fields.insert(name.to_string(), value.to_string());
        });
    }

    pub fn set_select_options(&self, id: &str, options: Vec<SelectOption>) {
        self.with_element(id, |el| el.options = options);
    }

    pub fn value_of(&self, id: &str) -> String {
        self.with_element(id, |el| el.value.clone()).unwrap_or_default()
    }

    pub fn text_of(&self, id: &str) -> String {
        self.with_element(id, |el| el.text.clone()).unwrap_or_default()
    }

    pub fn is_disabled(&self, id: &str) -> bool {
        self.with_element(id, |el| el.disabled).unwrap_or_default()
    }

    pub fn is_hidden(&self, id: &str) -> bool {
        self.with_element(id, |el| el.hidden).unwrap_or_default()
    }

    pub fn fragments_of(&self, id: &str) -> Vec<String> {
        self.with_element(id, |el| el.fragments.clone()).unwrap_or_default()
    }

    pub fn options_of(&self, id: &str) -> Vec<SelectOption> {
        self.with_element(id, |el| el.options.clone()).unwrap_or_default()
    }

    pub fn file_of(&self, id: &str) -> Option<String> {
        self.with_element(id, |el| el.file.clone()).flatten()
    }

    pub fn scrolls_of(&self, id: &str) -> u32 {
        self.with_element(id, |el| el.scrolls).unwrap_or_default()
    }

    fn with_element<R>(&self, id: &str, f: impl FnOnce(&mut FakeElement) -> R) -> Option<R> {
        self.state.borrow_mut().elements.get_mut(id).map(f)
    }
}

impl Dom for FakeDom {
    type Element = String;
    type Form = FakeForm;

    fn element_by_id(&self, id: &str) -> Option<String> {
        self.state
            .borrow()
            .elements
            .contains_key(id)
            .then(|| id.to_string())
    }

    fn value(&self, el: &String) -> String {
        self.value_of(el)
    }

    fn set_value(&self, el: &String, value: &str) {
        self.with_element(el, |e| e.value = value.to_string());
    }

    fn set_text(&self, el: &String, text: &str) {
        self.with_element(el, |e| e.text = text.to_string());
    }

    fn set_disabled(&self, el: &String, disabled: bool) {
        self.with_element(el, |e| e.disabled = disabled);
    }

    fn set_hidden(&self, el: &String, hidden: bool) {
        self.with_element(el, |e| e.hidden = hidden);
    }

    fn clear_children(&self, el: &String) {
        self.with_element(el, |e| {
            e.fragments.clear();
            e.options.clear();
        });
    }

    fn append_html(&self, el: &String, html: &str) {
        self.with_element(el, |e| e.fragments.push(html.to_string()));
    }

    fn query_child(&self, el: &String, selector: &str) -> Option<String> {
        self.state
            .borrow()
            .children
            .get(&(el.clone(), selector.to_string()))
            .cloned()
    }

    fn scroll_to_bottom(&self, el: &String) {
        self.with_element(el, |e| e.scrolls += 1);
    }

    fn selected_file_name(&self, el: &String) -> Option<String> {
        self.file_of(el)
    }

    fn clear_file(&self, el: &String) {
        self.with_element(el, |e| e.file = None);
    }

    fn options(&self, el: &String) -> Vec<SelectOption> {
        self.options_of(el)
    }

    fn append_option(&self, el: &String, option: &SelectOption) {
        self.with_element(el, |e| e.options.push(option.clone()));
    }

    fn form_payload(&self, form: &String) -> FakeForm {
        self.with_element(form, |e| FakeForm {
            fields: e.fields.clone(),
            file: e.file.clone(),
        })
        .unwrap_or_default()
    }

    fn form_field_value(&self, form: &String, name: &str) -> Option<String> {
        self.with_element(form, |e| e.fields.get(name).cloned()).flatten()
    }

    fn cookie(&self, name: &str) -> Option<String> {
        cookie_value(&self.state.borrow().cookies, name)
    }
}
