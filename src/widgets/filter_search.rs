//! Faceted trades-search controller: three cascading selects driving a
//! results grid.
//!
//! The subcategory option set is captured once at startup as an immutable
//! catalog and filtered back into the control whenever the category
//! changes. Missing markup degrades the widget to inert instead of
//! failing the page; search is an enhancement, not a requirement.

use crate::config::SearchConfig;
use crate::domain::models::{SearchResponse, SearchResult, SelectOption};
use crate::infrastructure::dom::Dom;
use crate::infrastructure::http::HttpClient;
use crate::shared::utils::escape_html;

const MSG_SEARCHING: &str = "Searching…";
const MSG_LOAD_FAILED: &str = "Could not load results.";
const MSG_NETWORK: &str = "Network error loading results.";

const DEFAULT_OPTION_LABEL: &str = "All subcategories";
const NAME_FALLBACK: &str = "Tradesperson";

const NO_RESULTS_HTML: &str = concat!(
    r#"<div class="col-span-full bg-white border border-slate-200 rounded-2xl p-6 text-slate-600">"#,
    r#"<div class="font-extrabold text-slate-800 mb-1">No tradespeople found</div>"#,
    "Try removing the city or subcategory filter.",
    "</div>"
);

#[derive(Clone)]
struct SearchParts<E: Clone> {
    category: E,
    subcategory: E,
    city: E,
    meta: E,
    grid: E,
    search_url: String,
    profile_base_url: String,
    default_option: SelectOption,
    // Full unfiltered option set, captured once and never mutated.
    catalog: Vec<SelectOption>,
}

#[derive(Clone)]
pub struct FilterSearchWidget<D: Dom, H> {
    dom: D,
    http: H,
    parts: Option<SearchParts<D::Element>>,
}

impl<D: Dom, H: HttpClient<D::Form>> FilterSearchWidget<D, H> {
    /// Construction never fails: missing references log a warning and the
    /// widget goes inert. On success the subcategory catalog is captured
    /// and one filtering pass runs, preserving any pre-selected value so
    /// deep links with `?category=` keep their state. The initial fetch is
    /// the caller's to spawn.
    pub fn new(config: SearchConfig, dom: D, http: H) -> Self {
        let mut missing = Vec::new();
        let category = lookup(&dom, &config.category_select_id, "category", &mut missing);
        let subcategory = lookup(
            &dom,
            &config.subcategory_select_id,
            "subcategory",
            &mut missing,
        );
        let city = lookup(&dom, &config.city_select_id, "city", &mut missing);
        let meta = lookup(&dom, &config.results_meta_id, "meta", &mut missing);
        let grid = lookup(&dom, &config.results_grid_id, "grid", &mut missing);
        if config.api_url.is_empty() {
            missing.push("apiUrl".to_string());
        }
        if config.profile_base_url.is_empty() {
            missing.push("profileBaseUrl".to_string());
        }

        let (Some(category), Some(subcategory), Some(city), Some(meta), Some(grid), true) =
            (category, subcategory, city, meta, grid, missing.is_empty())
        else {
            tracing::warn!(operation = "trades_search", missing = ?missing, "search widget disabled");
            return Self {
                dom,
                http,
                parts: None,
            };
        };

        let all_options = dom.options(&subcategory);
        let default_option = all_options
            .iter()
            .find(|option| option.value.is_empty())
            .cloned()
            .unwrap_or_else(|| SelectOption::new("", DEFAULT_OPTION_LABEL, None));
        let catalog = all_options
            .into_iter()
            .filter(|option| !option.value.is_empty())
            .collect();

        let widget = Self {
            dom,
            http,
            parts: Some(SearchParts {
                category,
                subcategory,
                city,
                meta,
                grid,
                search_url: config.api_url,
                profile_base_url: config.profile_base_url,
                default_option,
                catalog,
            }),
        };
        widget.rebuild_subcategory_options(true);
        widget
    }

    pub fn is_active(&self) -> bool {
        self.parts.is_some()
    }

    /// Category change always resets the subcategory; a stale subcategory
    /// from another category must never reach the query.
    pub async fn on_category_changed(&self) {
        if self.parts.is_none() {
            return;
        }
        self.rebuild_subcategory_options(false);
        self.fetch_and_render().await;
    }

    pub async fn on_subcategory_changed(&self) {
        self.fetch_and_render().await;
    }

    pub async fn on_city_changed(&self) {
        self.fetch_and_render().await;
    }

    /// Clear and refill the subcategory control from the catalog. With no
    /// category selected the control is disabled and forced empty; with
    /// one selected only its subcategories appear, and the previous value
    /// survives only when `preserve_selection` holds and it still exists.
    pub fn rebuild_subcategory_options(&self, preserve_selection: bool) {
        let Some(parts) = &self.parts else {
            return;
        };
        let category = self.dom.value(&parts.category);
        let previous = self.dom.value(&parts.subcategory);

        self.dom.clear_children(&parts.subcategory);
        self.dom.append_option(&parts.subcategory, &parts.default_option);

        if category.is_empty() {
            self.dom.set_disabled(&parts.subcategory, true);
            self.dom.set_value(&parts.subcategory, "");
            return;
        }

        self.dom.set_disabled(&parts.subcategory, false);
        for option in parts
            .catalog
            .iter()
            .filter(|option| option.category.as_deref() == Some(category.as_str()))
        {
            self.dom.append_option(&parts.subcategory, option);
        }

        let keep = preserve_selection
            && !previous.is_empty()
            && parts.catalog.iter().any(|option| {
                option.value == previous && option.category.as_deref() == Some(category.as_str())
            });
        self.dom
            .set_value(&parts.subcategory, if keep { previous.as_str() } else { "" });
    }

    /// Only non-empty selections are emitted, in category/subcategory/city
    /// order.
    pub fn build_query_string(&self) -> String {
        let Some(parts) = &self.parts else {
            return String::new();
        };
        let mut pairs = Vec::new();
        for (key, el) in [
            ("category", &parts.category),
            ("subcategory", &parts.subcategory),
            ("city", &parts.city),
        ] {
            let value = self.dom.value(el);
            if !value.is_empty() {
                pairs.push(format!("{key}={}", urlencoding::encode(&value)));
            }
        }
        pairs.join("&")
    }

    pub async fn fetch_and_render(&self) {
        let Some(parts) = &self.parts else {
            return;
        };
        self.dom.set_text(&parts.meta, MSG_SEARCHING);
        self.dom.clear_children(&parts.grid);

        let query = self.build_query_string();
        let url = if query.is_empty() {
            parts.search_url.clone()
        } else {
            format!("{}?{}", parts.search_url, query)
        };

        let response = match self.http.get(&url, &[]).await {
            Ok(response) => response,
            Err(err) => {
                tracing::error!(operation = "trades_search", error = %err, "search request failed");
                self.dom.set_text(&parts.meta, MSG_NETWORK);
                return;
            }
        };
        if !response.is_success() {
            tracing::warn!(operation = "trades_search", status = response.status, "search rejected");
            self.dom.set_text(&parts.meta, MSG_LOAD_FAILED);
            return;
        }
        let Some(data) = response.json::<SearchResponse>() else {
            tracing::error!(operation = "trades_search", "search response was not valid JSON");
            self.dom.set_text(&parts.meta, MSG_NETWORK);
            return;
        };

        // The server-reported total, not the number of rendered cards.
        self.dom
            .set_text(&parts.meta, &format!("{} tradesperson(s) found", data.count));

        if data.results.is_empty() {
            self.dom.append_html(&parts.grid, NO_RESULTS_HTML);
            return;
        }
        for result in &data.results {
            self.dom
                .append_html(&parts.grid, &card_html(&parts.profile_base_url, result));
        }
    }
}

fn lookup<D: Dom>(dom: &D, id: &str, name: &str, missing: &mut Vec<String>) -> Option<D::Element> {
    let el = dom.element_by_id(id);
    if el.is_none() {
        missing.push(name.to_string());
    }
    el
}

/// One clickable result card. Everything user-supplied is escaped before
/// it touches markup.
fn card_html(profile_base_url: &str, result: &SearchResult) -> String {
    let avatar = if result.image.is_empty() {
        concat!(
            r#"<div class="w-12 h-12 rounded-full bg-slate-200 flex items-center "#,
            r#"justify-center text-slate-600 text-xs">No Img</div>"#
        )
        .to_string()
    } else {
        format!(
            r#"<img src="{}" class="w-12 h-12 rounded-full object-cover border border-emerald-200" />"#,
            escape_html(&result.image)
        )
    };

    let name = if result.name.is_empty() {
        NAME_FALLBACK.to_string()
    } else {
        escape_html(&result.name)
    };

    let mut location = escape_html(&result.city);
    if !result.province.is_empty() {
        location.push_str(", ");
        location.push_str(&escape_html(&result.province));
    }

    let summary = result.summary.trim();
    let summary_line = if summary.is_empty() {
        String::new()
    } else {
        format!(
            r#"<p class="text-sm text-slate-600 mt-2 line-clamp-3">{}</p>"#,
            escape_html(summary)
        )
    };

    let profile_url = format!("{}{}/", profile_base_url, result.profile_id);

    format!(
        concat!(
            r#"<a href="{url}" class="block bg-white border border-slate-200 rounded-2xl p-5 "#,
            r#"hover:border-emerald-300 hover:shadow-sm transition">"#,
            r#"<div class="flex items-center gap-4">{avatar}<div class="min-w-0">"#,
            r#"<div class="font-extrabold text-slate-800 truncate">{name}</div>"#,
            r#"<div class="text-sm text-slate-500 truncate">{business}</div>"#,
            r#"<div class="text-xs text-slate-500 mt-1">{location}</div>"#,
            "</div></div>{summary}</a>"
        ),
        url = profile_url,
        avatar = avatar,
        name = name,
        business = escape_html(&result.business_name),
        location = location,
        summary = summary_line,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::dom::fake::FakeDom;
    use crate::infrastructure::http::fake::FakeHttp;
    use futures::executor::block_on;

    const ELEMENT_IDS: [&str; 5] = [
        "categorySelect",
        "subcategorySelect",
        "citySelect",
        "resultsMeta",
        "resultsGrid",
    ];

    fn config() -> SearchConfig {
        SearchConfig {
            api_url: "/api/find-service/".to_string(),
            profile_base_url: "/profiles/".to_string(),
            ..SearchConfig::default()
        }
    }

    fn seed_options(dom: &FakeDom) {
        dom.set_select_options(
            "subcategorySelect",
            vec![
                SelectOption::new("", "All subcategories", None),
                SelectOption::new("S1", "Pipe fitting", Some("C1")),
                SelectOption::new("S2", "Rewiring", Some("C2")),
                SelectOption::new("S3", "Drain cleaning", Some("C1")),
            ],
        );
    }

    fn fixture() -> (FakeDom, FakeHttp, FilterSearchWidget<FakeDom, FakeHttp>) {
        let dom = FakeDom::new();
        for id in ELEMENT_IDS {
            dom.add_element(id);
        }
        seed_options(&dom);
        let http = FakeHttp::new();
        let widget = FilterSearchWidget::new(config(), dom.clone(), http.clone());
        (dom, http, widget)
    }

    fn select(dom: &FakeDom, id: &str, value: &str) {
        dom.set_value(&id.to_string(), value);
    }

    fn result_json(profile_id: i64, name: &str) -> String {
        format!(
            r#"{{"profile_id": {profile_id}, "name": "{name}", "business_name": "", "city": "Toronto", "province": "", "summary": "", "image": ""}}"#
        )
    }

    #[test]
    fn test_missing_elements_leave_the_widget_inert() {
        let dom = FakeDom::new();
        dom.add_element("categorySelect");
        let http = FakeHttp::new();
        let widget = FilterSearchWidget::new(config(), dom.clone(), http.clone());

        assert!(!widget.is_active());

        block_on(widget.fetch_and_render());
        block_on(widget.on_category_changed());
        widget.rebuild_subcategory_options(true);

        assert_eq!(http.request_count(), 0);
        assert_eq!(widget.build_query_string(), "");
    }

    #[test]
    fn test_missing_urls_leave_the_widget_inert() {
        let dom = FakeDom::new();
        for id in ELEMENT_IDS {
            dom.add_element(id);
        }
        let widget = FilterSearchWidget::new(
            SearchConfig::default(),
            dom.clone(),
            FakeHttp::new(),
        );
        assert!(!widget.is_active());
    }

    #[test]
    fn test_construction_disables_subcategory_without_category() {
        let (dom, _http, _widget) = fixture();
        let options = dom.options_of("subcategorySelect");
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].value, "");
        assert!(dom.is_disabled("subcategorySelect"));
        assert_eq!(dom.value_of("subcategorySelect"), "");
    }

    #[test]
    fn test_construction_preserves_deep_linked_selection() {
        let dom = FakeDom::new();
        for id in ELEMENT_IDS {
            dom.add_element(id);
        }
        seed_options(&dom);
        select(&dom, "categorySelect", "C1");
        select(&dom, "subcategorySelect", "S1");

        let widget = FilterSearchWidget::new(config(), dom.clone(), FakeHttp::new());
        assert!(widget.is_active());

        let values: Vec<String> = dom
            .options_of("subcategorySelect")
            .iter()
            .map(|option| option.value.clone())
            .collect();
        assert_eq!(values, vec!["", "S1", "S3"]);
        assert_eq!(dom.value_of("subcategorySelect"), "S1");
        assert!(!dom.is_disabled("subcategorySelect"));
    }

    #[test]
    fn test_deep_linked_subcategory_from_other_category_is_dropped() {
        let dom = FakeDom::new();
        for id in ELEMENT_IDS {
            dom.add_element(id);
        }
        seed_options(&dom);
        select(&dom, "categorySelect", "C1");
        select(&dom, "subcategorySelect", "S2");

        let _widget = FilterSearchWidget::new(config(), dom.clone(), FakeHttp::new());
        assert_eq!(dom.value_of("subcategorySelect"), "");
    }

    #[test]
    fn test_category_change_resets_subcategory() {
        let (dom, http, widget) = fixture();
        select(&dom, "categorySelect", "C1");
        widget.rebuild_subcategory_options(false);
        select(&dom, "subcategorySelect", "S1");

        select(&dom, "categorySelect", "C2");
        http.enqueue(200, r#"{"count": 0, "results": []}"#);
        block_on(widget.on_category_changed());

        let options = dom.options_of("subcategorySelect");
        let values: Vec<String> = options.iter().map(|o| o.value.clone()).collect();
        assert_eq!(values, vec!["", "S2"]);
        assert_eq!(dom.value_of("subcategorySelect"), "");
        assert!(!dom.is_disabled("subcategorySelect"));
    }

    #[test]
    fn test_build_query_string_skips_empty_selections() {
        let (dom, _http, widget) = fixture();
        select(&dom, "categorySelect", "C1");
        select(&dom, "citySelect", "Toronto");

        assert_eq!(widget.build_query_string(), "category=C1&city=Toronto");
    }

    #[test]
    fn test_build_query_string_percent_encodes_values() {
        let (dom, _http, widget) = fixture();
        select(&dom, "citySelect", "St. John's");

        assert_eq!(widget.build_query_string(), "city=St.%20John%27s");
    }

    #[test]
    fn test_fetch_renders_cards_in_server_order() {
        let (dom, http, widget) = fixture();
        http.enqueue(
            200,
            &format!(
                r#"{{"count": 2, "results": [{}, {}]}}"#,
                result_json(7, "Ada Smith"),
                result_json(8, "Bo Jones"),
            ),
        );

        block_on(widget.fetch_and_render());

        assert_eq!(dom.text_of("resultsMeta"), "2 tradesperson(s) found");
        let cards = dom.fragments_of("resultsGrid");
        assert_eq!(cards.len(), 2);
        assert!(cards[0].contains("Ada Smith"));
        assert!(cards[0].contains(r#"href="/profiles/7/""#));
        assert!(cards[1].contains("Bo Jones"));
        assert_eq!(http.requests()[0].url, "/api/find-service/");
    }

    #[test]
    fn test_fetch_includes_active_filters_in_url() {
        let (dom, http, widget) = fixture();
        select(&dom, "categorySelect", "C1");
        http.enqueue(200, r#"{"count": 0, "results": []}"#);

        block_on(widget.fetch_and_render());

        assert_eq!(http.requests()[0].url, "/api/find-service/?category=C1");
    }

    #[test]
    fn test_meta_reports_server_count_not_rendered_cards() {
        let (dom, http, widget) = fixture();
        http.enqueue(
            200,
            &format!(r#"{{"count": 37, "results": [{}]}}"#, result_json(7, "Ada")),
        );

        block_on(widget.fetch_and_render());

        assert_eq!(dom.text_of("resultsMeta"), "37 tradesperson(s) found");
        assert_eq!(dom.fragments_of("resultsGrid").len(), 1);
    }

    #[test]
    fn test_empty_results_render_one_placeholder_card() {
        let (dom, http, widget) = fixture();
        http.enqueue(200, r#"{"count": 0, "results": []}"#);

        block_on(widget.fetch_and_render());

        let cards = dom.fragments_of("resultsGrid");
        assert_eq!(cards.len(), 1);
        assert!(cards[0].contains("No tradespeople found"));
        assert!(!cards[0].contains("<a href"));
    }

    #[test]
    fn test_http_error_shows_load_failure() {
        let (dom, http, widget) = fixture();
        http.enqueue(500, "");

        block_on(widget.fetch_and_render());

        assert_eq!(dom.text_of("resultsMeta"), MSG_LOAD_FAILED);
        assert!(dom.fragments_of("resultsGrid").is_empty());
    }

    #[test]
    fn test_network_error_shows_network_message() {
        let (dom, http, widget) = fixture();
        http.enqueue_network_error("dns failure");

        block_on(widget.fetch_and_render());

        assert_eq!(dom.text_of("resultsMeta"), MSG_NETWORK);
        assert!(dom.fragments_of("resultsGrid").is_empty());
    }

    #[test]
    fn test_malformed_body_counts_as_network_error() {
        let (dom, http, widget) = fixture();
        http.enqueue(200, "<html>gateway error</html>");

        block_on(widget.fetch_and_render());

        assert_eq!(dom.text_of("resultsMeta"), MSG_NETWORK);
    }

    #[test]
    fn test_refetch_clears_previous_cards_first() {
        let (dom, http, widget) = fixture();
        http.enqueue(
            200,
            &format!(r#"{{"count": 1, "results": [{}]}}"#, result_json(7, "Ada")),
        );
        block_on(widget.fetch_and_render());
        assert_eq!(dom.fragments_of("resultsGrid").len(), 1);

        http.enqueue(200, r#"{"count": 0, "results": []}"#);
        block_on(widget.fetch_and_render());

        let cards = dom.fragments_of("resultsGrid");
        assert_eq!(cards.len(), 1);
        assert!(cards[0].contains("No tradespeople found"));
    }

    #[test]
    fn test_card_escapes_user_supplied_markup() {
        let result = SearchResult {
            profile_id: 7,
            name: "<script>alert(1)</script>".to_string(),
            business_name: "Bo & Sons".to_string(),
            city: "Toronto".to_string(),
            province: "ON".to_string(),
            summary: "\"Best\" <b>plumber</b>".to_string(),
            image: String::new(),
        };

        let html = card_html("/profiles/", &result);

        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("Bo &amp; Sons"));
        assert!(html.contains("&quot;Best&quot; &lt;b&gt;plumber&lt;/b&gt;"));
    }

    #[test]
    fn test_card_name_falls_back_when_absent() {
        let result = SearchResult {
            profile_id: 7,
            name: String::new(),
            business_name: String::new(),
            city: "Toronto".to_string(),
            province: String::new(),
            summary: String::new(),
            image: String::new(),
        };

        let html = card_html("/profiles/", &result);

        assert!(html.contains("Tradesperson"));
        assert!(html.contains("Toronto"));
        // No province, no comma; no summary, no summary paragraph.
        assert!(!html.contains("Toronto,"));
        assert!(!html.contains("line-clamp-3"));
        assert!(html.contains("No Img"));
    }

    #[test]
    fn test_card_appends_province_after_comma() {
        let result = SearchResult {
            profile_id: 7,
            name: "Ada".to_string(),
            business_name: String::new(),
            city: "Toronto".to_string(),
            province: "ON".to_string(),
            summary: String::new(),
            image: "/media/ada.jpg".to_string(),
        };

        let html = card_html("/profiles/", &result);

        assert!(html.contains("Toronto, ON"));
        assert!(html.contains(r#"<img src="/media/ada.jpg""#));
        assert!(!html.contains("No Img"));
    }
}
