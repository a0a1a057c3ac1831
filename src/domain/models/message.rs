use serde::Deserialize;
use std::collections::BTreeMap;

/// Pseudo-field the backend uses for errors not tied to a single field.
pub const NON_FIELD_ERRORS: &str = "__all__";

/// What the user has composed but not yet sent: trimmed text plus at most
/// one attached image, identified by its display name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ComposedMessage {
    pub text: String,
    pub attachment: Option<String>,
}

impl ComposedMessage {
    pub fn new(text: &str, attachment: Option<String>) -> Self {
        Self {
            text: text.trim().to_string(),
            attachment,
        }
    }

    /// An empty composition is rejected before any network call.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.attachment.is_none()
    }
}

/// Field-level validation errors from the backend:
/// `{ field: ["msg", ...], __all__: ["msg", ...] }`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct FieldErrors(pub BTreeMap<String, Vec<String>>);

impl FieldErrors {
    /// Render as `"field: message"` pairs joined with `" • "`.
    /// Messages under the catch-all pseudo-field are left unqualified.
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        for (field, messages) in &self.0 {
            for message in messages {
                if field == NON_FIELD_ERRORS {
                    parts.push(message.clone());
                } else {
                    parts.push(format!("{field}: {message}"));
                }
            }
        }
        parts.join(" • ")
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(|messages| messages.is_empty())
    }
}

/// Body of a successful or failed send: `{ok, html, message_id}` on
/// success, `{ok: false, errors: {...}}` on validation failure.
#[derive(Debug, Clone, Deserialize)]
pub struct SendResponse {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub html: Option<String>,
    #[serde(default)]
    pub message_id: Option<i64>,
    #[serde(default)]
    pub errors: Option<FieldErrors>,
}

/// Body of a poll: zero or more rendered fragments plus the id of the
/// newest message they cover.
#[derive(Debug, Clone, Deserialize)]
pub struct PollResponse {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub html_chunks: Vec<String>,
    #[serde(default)]
    pub last_id: Option<i64>,
}
