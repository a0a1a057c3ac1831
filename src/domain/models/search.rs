use serde::Deserialize;

/// One entry of the subcategory catalog, captured from the select control
/// at startup. `category` comes from the option's `data-category`
/// attribute; the default "all subcategories" option carries none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub category: Option<String>,
}

impl SelectOption {
    pub fn new(value: &str, label: &str, category: Option<&str>) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
            category: category.map(str::to_string),
        }
    }
}

/// One tradesperson row from the search API. The backend sends empty
/// strings rather than nulls for absent fields.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchResult {
    pub profile_id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub business_name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub province: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub image: String,
}

/// `{count, results}` — `count` is the total match count, which may exceed
/// the number of returned rows.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub results: Vec<SearchResult>,
}
