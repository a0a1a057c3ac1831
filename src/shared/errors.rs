use thiserror::Error;

#[derive(Debug, Error)]
pub enum WidgetError {
    /// Required DOM references or endpoint URLs absent at construction.
    /// Carries every missing logical name, not just the first.
    #[error("widget init failed. Missing: {}", .0.join(", "))]
    Configuration(Vec<String>),

    #[error("{0}")]
    Validation(String),

    /// Field-level errors returned by the backend form validation.
    #[error("{0}")]
    ServerValidation(String),

    #[error("request failed with status {status}")]
    Http { status: u16 },

    #[error("network error: {0}")]
    Network(String),
}

pub type Result<T> = std::result::Result<T, WidgetError>;
