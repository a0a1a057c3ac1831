pub mod chat;
pub mod filter_search;

pub use chat::{ChatWidget, DEFAULT_POLL_INTERVAL_MS};
pub use filter_search::FilterSearchWidget;
