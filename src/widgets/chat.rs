//! Chat panel controller: composer, send, poll, fragment rendering.
//!
//! The widget owns a forward-only message cursor and drives the composer
//! through a `Idle -> Sending -> Idle` cycle around each send. Polling is
//! background refresh: every failure mode is swallowed so a flaky
//! connection never disturbs someone reading the conversation.

use crate::config::ChatConfig;
use crate::domain::models::{ComposedMessage, PollResponse, SendResponse};
use crate::infrastructure::dom::Dom;
use crate::infrastructure::http::HttpClient;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use crate::shared::errors::{Result, WidgetError};

/// Delay between poll ticks when the page does not override it.
pub const DEFAULT_POLL_INTERVAL_MS: u32 = 6000;

/// Selector of the scrolling list's inner content container. Fragments
/// land here, not on the scroll box itself.
const MESSAGE_CONTAINER_SELECTOR: &str = ".space-y-3";

const CSRF_FIELD: &str = "csrfmiddlewaretoken";
const CSRF_COOKIE: &str = "csrftoken";

const MSG_EMPTY_COMPOSER: &str = "Please type a message or attach an image.";
const MSG_CSRF_REJECTED: &str = "403 Forbidden (CSRF). Refresh the page and try again.";
const MSG_SEND_FAILED: &str = "Could not send message.";
const MSG_NETWORK: &str = "Network error. Please try again.";
const LABEL_SEND: &str = "Send";
const LABEL_SENDING: &str = "Sending...";

#[derive(Clone)]
struct ChatElements<E: Clone> {
    chat_box: E,
    form: E,
    send_btn: E,
    error_box: E,
    upload_hint: E,
    image_input: E,
    content_input: E,
}

#[derive(Clone)]
pub struct ChatWidget<D: Dom, H> {
    dom: D,
    http: H,
    els: ChatElements<D::Element>,
    send_url: String,
    poll_url: String,
    cursor: Rc<Cell<i64>>,
    sending: Rc<Cell<bool>>,
    poll_interval: Duration,
}

fn resolve<D: Dom>(dom: &D, id: &str, name: &str, missing: &mut Vec<String>) -> Option<D::Element> {
    let el = dom.element_by_id(id);
    if el.is_none() {
        missing.push(name.to_string());
    }
    el
}

impl<D: Dom, H: HttpClient<D::Form>> ChatWidget<D, H> {
    /// Resolve every reference up front and fail with the complete list of
    /// missing names; a partially wired chat is worse than none.
    pub fn new(config: ChatConfig, dom: D, http: H) -> Result<Self> {
        let mut missing = Vec::new();
        let chat_box = resolve(&dom, &config.chat_box_id, "chatBox", &mut missing);
        let form = resolve(&dom, &config.form_id, "form", &mut missing);
        let send_btn = resolve(&dom, &config.send_btn_id, "sendBtn", &mut missing);
        let error_box = resolve(&dom, &config.error_box_id, "errorBox", &mut missing);
        let upload_hint = resolve(&dom, &config.upload_hint_id, "uploadHint", &mut missing);
        let image_input = resolve(&dom, &config.image_input_id, "imageInput", &mut missing);
        let content_input = resolve(&dom, &config.content_input_id, "contentInput", &mut missing);
        if config.send_url.is_empty() {
            missing.push("sendUrl".to_string());
        }
        if config.poll_url.is_empty() {
            missing.push("pollUrl".to_string());
        }

        let (
            Some(chat_box),
            Some(form),
            Some(send_btn),
            Some(error_box),
            Some(upload_hint),
            Some(image_input),
            Some(content_input),
            true,
        ) = (
            chat_box,
            form,
            send_btn,
            error_box,
            upload_hint,
            image_input,
            content_input,
            missing.is_empty(),
        )
        else {
            tracing::error!(operation = "chat_init", missing = ?missing, "chat widget init failed");
            return Err(WidgetError::Configuration(missing));
        };

        let widget = Self {
            dom,
            http,
            els: ChatElements {
                chat_box,
                form,
                send_btn,
                error_box,
                upload_hint,
                image_input,
                content_input,
            },
            send_url: config.send_url,
            poll_url: config.poll_url,
            cursor: Rc::new(Cell::new(config.last_id)),
            sending: Rc::new(Cell::new(false)),
            poll_interval: Duration::from_millis(
                u64::from(config.poll_interval.unwrap_or(DEFAULT_POLL_INTERVAL_MS)),
            ),
        };
        widget.dom.scroll_to_bottom(&widget.els.chat_box);
        Ok(widget)
    }

    /// Highest message id already rendered.
    pub fn last_seen_id(&self) -> i64 {
        self.cursor.get()
    }

    pub fn is_sending(&self) -> bool {
        self.sending.get()
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// File-input change handler. Pure UI: reveal or clear the upload hint.
    pub fn select_attachment(&self) {
        match self.dom.selected_file_name(&self.els.image_input) {
            Some(name) => {
                self.dom.set_hidden(&self.els.upload_hint, false);
                self.dom.set_text(&self.els.upload_hint, &format!("Selected: {name}"));
            }
            None => {
                self.dom.set_hidden(&self.els.upload_hint, true);
                self.dom.set_text(&self.els.upload_hint, "");
            }
        }
    }

    /// Form submit handler.
    pub async fn submit(&self) {
        self.clear_error();

        let message = ComposedMessage::new(
            &self.dom.value(&self.els.content_input),
            self.dom.selected_file_name(&self.els.image_input),
        );
        if message.is_empty() {
            self.show_error(MSG_EMPTY_COMPOSER);
            return;
        }

        let form = self.dom.form_payload(&self.els.form);

        self.sending.set(true);
        self.dom.set_disabled(&self.els.send_btn, true);
        self.dom.set_text(&self.els.send_btn, LABEL_SENDING);

        if let Err(user_message) = self.send(form).await {
            self.show_error(&user_message);
        }

        // Restore runs on every path out of the request.
        self.sending.set(false);
        self.dom.set_disabled(&self.els.send_btn, false);
        self.dom.set_text(&self.els.send_btn, LABEL_SEND);
    }

    /// Issue the send; `Err` carries the user-visible message.
    async fn send(&self, form: D::Form) -> std::result::Result<(), String> {
        let headers = [
            ("X-CSRFToken", self.csrf_token()),
            ("X-Requested-With", "XMLHttpRequest".to_string()),
        ];
        let response = match self.http.post_form(&self.send_url, &headers, form).await {
            Ok(response) => response,
            Err(err) => {
                tracing::error!(operation = "chat_send", error = %err, "send request failed");
                return Err(MSG_NETWORK.to_string());
            }
        };

        let data: Option<SendResponse> = response.json();

        // Field errors win over the status line: a 400 with a usable error
        // map reads better than "Request failed (400)".
        if let Some(errors) = data.as_ref().and_then(|data| data.errors.as_ref()) {
            let formatted = errors.format();
            return Err(if formatted.is_empty() {
                MSG_SEND_FAILED.to_string()
            } else {
                formatted
            });
        }

        if !response.is_success() {
            tracing::warn!(operation = "chat_send", status = response.status, "send rejected");
            return Err(if response.status == 403 {
                MSG_CSRF_REJECTED.to_string()
            } else {
                format!("Request failed ({}). Please try again.", response.status)
            });
        }

        let Some(data) = data else {
            return Err(MSG_SEND_FAILED.to_string());
        };
        if !data.ok {
            return Err(MSG_SEND_FAILED.to_string());
        }

        if let Some(html) = &data.html {
            self.append_fragment(html);
        }
        if let Some(id) = data.message_id {
            self.advance_cursor(id);
        }
        self.reset_composer();
        self.dom.scroll_to_bottom(&self.els.chat_box);
        Ok(())
    }

    /// Timer tick: fetch messages newer than the cursor. Failures of every
    /// kind stay silent; background refresh must not disturb the page.
    pub async fn poll(&self) {
        let url = format!("{}?after_id={}", self.poll_url, self.cursor.get());
        let headers = [("X-Requested-With", "XMLHttpRequest".to_string())];
        let response = match self.http.get(&url, &headers).await {
            Ok(response) => response,
            Err(err) => {
                tracing::debug!(operation = "chat_poll", error = %err, "poll failed");
                return;
            }
        };
        if !response.is_success() {
            tracing::debug!(operation = "chat_poll", status = response.status, "poll rejected");
            return;
        }
        let Some(data) = response.json::<PollResponse>() else {
            return;
        };
        if !data.ok || data.html_chunks.is_empty() {
            return;
        }

        for chunk in &data.html_chunks {
            self.append_fragment(chunk);
        }
        if let Some(id) = data.last_id {
            self.advance_cursor(id);
        }
        self.dom.scroll_to_bottom(&self.els.chat_box);
    }

    /// Append one server-rendered fragment to the message list. No inner
    /// container, no append.
    pub fn append_fragment(&self, html: &str) {
        let Some(container) = self
            .dom
            .query_child(&self.els.chat_box, MESSAGE_CONTAINER_SELECTOR)
        else {
            return;
        };
        self.dom.append_html(&container, html);
    }

    fn advance_cursor(&self, id: i64) {
        if id > self.cursor.get() {
            self.cursor.set(id);
        }
    }

    fn csrf_token(&self) -> String {
        self.dom
            .form_field_value(&self.els.form, CSRF_FIELD)
            .filter(|token| !token.is_empty())
            .or_else(|| self.dom.cookie(CSRF_COOKIE))
            .unwrap_or_default()
    }

    fn reset_composer(&self) {
        self.dom.set_value(&self.els.content_input, "");
        self.dom.clear_file(&self.els.image_input);
        self.dom.set_hidden(&self.els.upload_hint, true);
        self.dom.set_text(&self.els.upload_hint, "");
    }

    fn show_error(&self, message: &str) {
        self.dom.set_text(&self.els.error_box, message);
        self.dom.set_hidden(&self.els.error_box, false);
    }

    fn clear_error(&self) {
        self.dom.set_text(&self.els.error_box, "");
        self.dom.set_hidden(&self.els.error_box, true);
    }
}
