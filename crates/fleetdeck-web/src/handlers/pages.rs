//! Page handlers: server-rendered resource list pages
//!
//! The URL query string is the whole table state. A request decodes it,
//! fetches the page from the backend (fail-open), and renders markup; the
//! browser's back button and shareable links fall out for free.

use crate::components::{escape_html, pagination::render_pagination, table::render_table};
use crate::extractors::ListQueryParams;
use crate::resources::{RESOURCES, ResourceDef, resource};
use crate::state::AppState;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use fleetdeck_core::ListQuery;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

/// Flash notice carried across the post-mutation redirect.
///
/// Both fields deserialize as raw strings: flash parameters live in a
/// user-editable URL, and a mangled `ok=` must degrade to an error-styled
/// notice, never a 400 on the list page.
#[derive(Debug, Default, Deserialize)]
pub struct Flash {
    /// Notice message, shown once.
    pub notice: Option<String>,
    /// Whether the notice is a success; anything but `"true"` is not.
    pub ok: Option<String>,
}

/// Dashboard root: the first resource is the landing table.
pub async fn index() -> Redirect {
    Redirect::to("/r/trucks")
}

/// Liveness endpoint.
pub async fn health() -> &'static str {
    "ok"
}

/// A resource's list page.
pub async fn list_page(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    ListQueryParams(raw): ListQueryParams,
    Query(flash): Query<Flash>,
) -> Response {
    let Some(def) = resource(&name) else {
        return (StatusCode::NOT_FOUND, Html(not_found_page(&name))).into_response();
    };

    let mut query = raw.retain_filters(def.filter_keys);
    if !def.date_filtered {
        query.date_from = None;
        query.date_to = None;
    }

    debug!(resource = def.name, query = %query.encode(), "rendering list page");
    let result = state.api_client.fetch_list(def.name, &query).await;

    let mut body = String::new();
    body.push_str(&render_flash(&flash));
    body.push_str(&render_filter_form(def, &query));
    body.push_str(&render_table(def, &query, &result));
    if !result.is_empty() {
        body.push_str(&render_pagination(&format!("/r/{}", def.name), &query, &result));
    }

    Html(layout(def.title, &body)).into_response()
}

fn not_found_page(name: &str) -> String {
    layout(
        "Not found",
        &format!(
            "<div class=\"empty-state\">Unknown resource: {}</div>",
            escape_html(name)
        ),
    )
}

fn render_flash(flash: &Flash) -> String {
    match flash.notice {
        Some(ref message) if !message.is_empty() => {
            let class = if flash.ok.as_deref() == Some("true") {
                "notice notice-success"
            } else {
                "notice notice-error"
            };
            format!("<div class=\"{class}\">{}</div>\n", escape_html(message))
        }
        _ => String::new(),
    }
}

/// The filter form: a plain GET back to the same path, which is the
/// non-debounced Apply path. Reset is a bare link to the unfiltered URL.
fn render_filter_form(def: &ResourceDef, query: &ListQuery) -> String {
    let mut html = format!(
        "<form class=\"filter-form\" method=\"get\" action=\"/r/{}\">\n",
        def.name
    );

    html.push_str(&format!(
        "  <input type=\"text\" name=\"search\" placeholder=\"Search...\" value=\"{}\">\n",
        escape_html(query.search.as_deref().unwrap_or(""))
    ));

    for key in def.filter_keys {
        let value = query.filters.get(*key).map(String::as_str).unwrap_or("");
        html.push_str(&format!(
            "  <input type=\"text\" name=\"{key}\" placeholder=\"{key}\" value=\"{}\">\n",
            escape_html(value)
        ));
    }

    if def.date_filtered {
        html.push_str(&format!(
            "  <input type=\"date\" name=\"dateFrom\" value=\"{}\">\n",
            escape_html(query.date_from.as_deref().unwrap_or(""))
        ));
        html.push_str(&format!(
            "  <input type=\"date\" name=\"dateTo\" value=\"{}\">\n",
            escape_html(query.date_to.as_deref().unwrap_or(""))
        ));
    }

    html.push_str("  <select name=\"limit\">\n");
    for size in fleetdeck_core::PAGE_SIZE_CHOICES {
        let selected = if size == query.page_size { " selected" } else { "" };
        html.push_str(&format!("    <option value=\"{size}\"{selected}>{size}</option>\n"));
    }
    html.push_str("  </select>\n");

    html.push_str("  <button type=\"submit\" class=\"btn\">Apply</button>\n");
    html.push_str(&format!(
        "  <a class=\"btn btn-link\" href=\"/r/{}\">Reset</a>\n",
        def.name
    ));
    html.push_str("</form>\n");
    html
}

/// Inlined stylesheet; the dashboard serves no separate static assets.
const STYLES: &str = concat!(
    "body{margin:0;font-family:sans-serif;color:#1a202c}",
    ".topbar{padding:12px 20px;background:#1a202c;color:#fff;font-weight:bold}",
    ".shell{display:flex}",
    ".sidebar{width:180px;padding:16px;display:flex;flex-direction:column;gap:6px}",
    ".sidebar a{color:#2b6cb0;text-decoration:none}",
    ".content{flex:1;padding:16px 24px}",
    ".filter-form{display:flex;gap:8px;margin-bottom:12px;flex-wrap:wrap}",
    ".resource-table{border-collapse:collapse;width:100%}",
    ".resource-table th,.resource-table td{border-bottom:1px solid #e2e8f0;",
    "padding:6px 10px;text-align:left}",
    ".pagination{display:flex;gap:12px;align-items:center;margin-top:12px}",
    ".pagination-btn.disabled{color:#a0aec0}",
    ".notice{padding:8px 12px;margin-bottom:12px;border-radius:4px}",
    ".notice-success{background:#c6f6d5}",
    ".notice-error{background:#fed7d7}",
    ".empty-state{padding:24px;color:#718096}",
    ".btn-danger{color:#c53030}",
);

/// Shared page shell with the resource navigation.
fn layout(title: &str, body: &str) -> String {
    let mut nav = String::new();
    for def in RESOURCES {
        nav.push_str(&format!(
            "      <a href=\"/r/{}\">{}</a>\n",
            def.name, def.title
        ));
    }

    let title = escape_html(title);
    format!(
        concat!(
            "<!DOCTYPE html>\n<html>\n<head>\n",
            "  <meta charset=\"utf-8\">\n",
            "  <title>{title} - FleetDeck</title>\n",
            "  <style>{STYLES}</style>\n",
            "</head>\n<body>\n",
            "  <header class=\"topbar\">FleetDeck</header>\n",
            "  <div class=\"shell\">\n",
            "    <nav class=\"sidebar\">\n{nav}    </nav>\n",
            "    <main class=\"content\">\n",
            "      <h2>{title}</h2>\n{body}",
            "    </main>\n",
            "  </div>\n",
            "</body>\n</html>\n"
        ),
        title = title,
        STYLES = STYLES,
        nav = nav,
        body = body
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flash_renders_success_class() {
        let flash = Flash {
            notice: Some("Saved".to_string()),
            ok: Some("true".to_string()),
        };

        let html = render_flash(&flash);

        assert!(html.contains("notice-success"));
        assert!(html.contains("Saved"));
    }

    #[test]
    fn test_flash_mangled_ok_degrades_to_error_style() {
        let flash = Flash {
            notice: Some("Saved".to_string()),
            ok: Some("weird".to_string()),
        };

        assert!(render_flash(&flash).contains("notice-error"));
    }

    #[test]
    fn test_flash_empty_renders_nothing() {
        assert_eq!(render_flash(&Flash::default()), String::new());
    }

    #[test]
    fn test_filter_form_round_trips_current_values() {
        let def = resource("orders").unwrap_or(&RESOURCES[0]);
        let query = ListQuery::new()
            .with_search("anvil")
            .with_filter("status", "open")
            .with_date_range("2024-01-01", "");

        let html = render_filter_form(def, &query);

        assert!(html.contains("value=\"anvil\""));
        assert!(html.contains("name=\"status\" placeholder=\"status\" value=\"open\""));
        assert!(html.contains("name=\"dateFrom\" value=\"2024-01-01\""));
        assert!(html.contains("Reset"));
    }

    #[test]
    fn test_layout_links_every_resource() {
        let html = layout("Trucks", "<p>body</p>");

        for def in RESOURCES {
            assert!(html.contains(&format!("/r/{}", def.name)));
        }
    }

    #[test]
    fn test_layout_inlines_styles_without_asset_links() {
        let html = layout("Trucks", "<p>body</p>");

        assert!(html.contains("<style>"));
        // No external asset references; nothing serves them.
        assert!(!html.contains("href=\"/static/"));
    }
}
