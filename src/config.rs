//! Widget configuration passed in from the page.
//!
//! The templates render one plain object per widget and hand it to the
//! matching `init*` entry point; keys arrive camelCased. Every field
//! defaults so deserialization never fails — missing references are
//! reported by the widget constructors, which know the full picture.

use serde::Deserialize;

/// Chat panel binding: element ids, endpoints, initial cursor.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChatConfig {
    pub chat_box_id: String,
    pub form_id: String,
    pub send_btn_id: String,
    pub error_box_id: String,
    pub upload_hint_id: String,
    pub image_input_id: String,
    pub content_input_id: String,
    pub send_url: String,
    pub poll_url: String,
    /// Highest message id already rendered by the server.
    pub last_id: i64,
    /// Poll delay in milliseconds; `None` means the widget default.
    pub poll_interval: Option<u32>,
}

/// Search panel binding. Element ids default to the ones the find-service
/// template renders, so pages normally pass only the two URLs.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchConfig {
    pub category_select_id: String,
    pub subcategory_select_id: String,
    pub city_select_id: String,
    pub results_meta_id: String,
    pub results_grid_id: String,
    pub api_url: String,
    pub profile_base_url: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            category_select_id: "categorySelect".to_string(),
            subcategory_select_id: "subcategorySelect".to_string(),
            city_select_id: "citySelect".to_string(),
            results_meta_id: "resultsMeta".to_string(),
            results_grid_id: "resultsGrid".to_string(),
            api_url: String::new(),
            profile_base_url: String::new(),
        }
    }
}
