//! Pagination controls for navigating through a list result

use fleetdeck_core::{ListQuery, ListResult};
use serde_json::Value;

use super::escape_html;

/// Render prev/next controls and the page indicator.
///
/// Page links are plain `GET` navigations carrying the full encoded
/// query; boundary buttons render disabled instead of linking.
#[must_use]
pub fn render_pagination(base_path: &str, query: &ListQuery, result: &ListResult<Value>) -> String {
    let current = result.page;
    let total_pages = result.total_pages;
    let has_prev = current > 1;
    let has_next = current < total_pages;

    let mut html = String::from("<div class=\"pagination\">\n");

    if has_prev {
        html.push_str(&page_link(base_path, query, current - 1, "Previous"));
    } else {
        html.push_str("  <span class=\"pagination-btn disabled\">Previous</span>\n");
    }

    html.push_str(&format!(
        "  <span class=\"pagination-info\">Page {} of {} ({} total)</span>\n",
        current,
        total_pages.max(1),
        result.total
    ));

    if has_next {
        html.push_str(&page_link(base_path, query, current + 1, "Next"));
    } else {
        html.push_str("  <span class=\"pagination-btn disabled\">Next</span>\n");
    }

    html.push_str("</div>\n");
    html
}

fn page_link(base_path: &str, query: &ListQuery, page: u32, label: &str) -> String {
    let encoded = query.clone().with_page(page).encode();
    format!(
        "  <a class=\"pagination-btn\" href=\"{}?{}\">{}</a>\n",
        escape_html(base_path),
        escape_html(&encoded),
        label
    )
}
