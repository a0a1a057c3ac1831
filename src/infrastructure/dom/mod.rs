//! The DOM as a capability boundary.
//!
//! The widgets never touch `web-sys` directly; everything they need from
//! the page goes through this trait. The browser build implements it over
//! the live document, the native build over an in-memory element map so the
//! controllers run under plain `cargo test`.

use crate::domain::models::SelectOption;

#[cfg(target_arch = "wasm32")]
pub mod browser;
#[cfg(not(target_arch = "wasm32"))]
pub mod fake;

pub trait Dom: Clone {
    /// Handle to a resolved element. Cheap to clone.
    type Element: Clone;
    /// Multipart payload source handed to the HTTP client
    /// (`web_sys::FormData` in the browser).
    type Form;

    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    /// Current value of an input or select control.
    fn value(&self, el: &Self::Element) -> String;
    fn set_value(&self, el: &Self::Element, value: &str);
    fn set_text(&self, el: &Self::Element, text: &str);
    fn set_disabled(&self, el: &Self::Element, disabled: bool);
    /// Toggle the `hidden` class.
    fn set_hidden(&self, el: &Self::Element, hidden: bool);

    fn clear_children(&self, el: &Self::Element);
    /// Parse an HTML string and append the first resulting element.
    /// Trailing top-level siblings are dropped.
    fn append_html(&self, el: &Self::Element, html: &str);
    fn query_child(&self, el: &Self::Element, selector: &str) -> Option<Self::Element>;
    fn scroll_to_bottom(&self, el: &Self::Element);

    /// Display name of the file selected in a file input, if any.
    fn selected_file_name(&self, el: &Self::Element) -> Option<String>;
    fn clear_file(&self, el: &Self::Element);

    /// All options of a select control, in document order.
    fn options(&self, el: &Self::Element) -> Vec<SelectOption>;
    fn append_option(&self, el: &Self::Element, option: &SelectOption);

    /// Snapshot a form's fields into a multipart payload.
    fn form_payload(&self, form: &Self::Element) -> Self::Form;
    /// Value of a named input inside a form (hidden CSRF field lookup).
    fn form_field_value(&self, form: &Self::Element, name: &str) -> Option<String>;

    /// Named cookie, URL-decoded.
    fn cookie(&self, name: &str) -> Option<String>;
}
