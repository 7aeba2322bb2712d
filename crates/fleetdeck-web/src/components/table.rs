//! Resource table component
//!
//! A pure function of the fetched page plus the resource's static column
//! definitions. The one UX-relevant conditional here is the empty state:
//! "no matches" when filters are active is a different message from a
//! resource that has no rows at all.

use crate::resources::ResourceDef;
use fleetdeck_core::{ListQuery, ListResult};
use serde_json::Value;

use super::escape_html;

/// Render the table for one fetched page.
#[must_use]
pub fn render_table(def: &ResourceDef, query: &ListQuery, result: &ListResult<Value>) -> String {
    if result.is_empty() {
        return render_empty_state(query);
    }

    let mut html = String::from("<table class=\"resource-table\">\n  <thead>\n    <tr>\n");
    for column in def.columns {
        html.push_str(&format!("      <th>{}</th>\n", escape_html(column.label)));
    }
    html.push_str("      <th>Actions</th>\n    </tr>\n  </thead>\n  <tbody>\n");

    for row in &result.items {
        html.push_str(&render_row(def, query, row, result.items.len()));
    }

    html.push_str("  </tbody>\n</table>\n");
    html
}

/// Distinct empty states: filtered-empty vs. truly empty resource.
fn render_empty_state(query: &ListQuery) -> String {
    let message = if query.is_filtered() {
        "No results match the current filters."
    } else {
        "Nothing here yet."
    };
    format!("<div class=\"empty-state\">{message}</div>\n")
}

fn render_row(def: &ResourceDef, query: &ListQuery, row: &Value, rows_on_page: usize) -> String {
    let id = row_id(row);
    let mut html = String::from("    <tr>\n");
    for column in def.columns {
        html.push_str(&format!(
            "      <td>{}</td>\n",
            escape_html(&cell_text(row, column.key))
        ));
    }
    html.push_str(&format!(
        "      <td>{}</td>\n    </tr>\n",
        render_actions(def, query, &id, rows_on_page)
    ));
    html
}

/// Per-row delete form; the current query and row count ride along as
/// hidden fields so the action handler can refresh the right page.
fn render_actions(def: &ResourceDef, query: &ListQuery, id: &str, rows_on_page: usize) -> String {
    let encoded = escape_html(&query.encode());
    format!(
        concat!(
            "<form class=\"row-action\" method=\"post\" action=\"/r/{resource}/{id}/delete\">",
            "<input type=\"hidden\" name=\"_list_query\" value=\"{query}\">",
            "<input type=\"hidden\" name=\"_page_rows\" value=\"{rows}\">",
            "<button type=\"submit\" class=\"btn btn-sm btn-danger\">Delete</button>",
            "</form>"
        ),
        resource = def.name,
        id = escape_html(id),
        query = encoded,
        rows = rows_on_page,
    )
}

/// A row's identifier as a string; backend rows carry `id` or `_id`.
#[must_use]
pub fn row_id(row: &Value) -> String {
    for key in ["id", "_id"] {
        match row.get(key) {
            Some(Value::String(s)) => return s.clone(),
            Some(Value::Number(n)) => return n.to_string(),
            _ => {}
        }
    }
    String::new()
}

/// Human-readable cell text for a JSON field.
fn cell_text(row: &Value, key: &str) -> String {
    match row.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::resources::resource;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn trucks() -> &'static ResourceDef {
        resource("trucks").unwrap()
    }

    #[test]
    fn test_renders_rows_and_headers() {
        let result = ListResult::new(
            vec![json!({"id": "t1", "plate": "AB-123", "model": "Volvo", "capacity": 12, "status": "active"})],
            1,
            1,
            10,
        );

        let html = render_table(trucks(), &ListQuery::new(), &result);

        assert!(html.contains("<th>Plate</th>"));
        assert!(html.contains("<td>AB-123</td>"));
        assert!(html.contains("<td>12</td>"));
        assert!(html.contains("/r/trucks/t1/delete"));
    }

    #[test]
    fn test_filtered_empty_state_message() {
        let query = ListQuery::new().with_search("nothing");
        let result = ListResult::empty(10);

        let html = render_table(trucks(), &query, &result);

        assert!(html.contains("No results match the current filters."));
    }

    #[test]
    fn test_unfiltered_empty_state_message() {
        let html = render_table(trucks(), &ListQuery::new(), &ListResult::empty(10));

        assert!(html.contains("Nothing here yet."));
    }

    #[test]
    fn test_cell_values_are_escaped() {
        let result = ListResult::new(
            vec![json!({"id": "t1", "plate": "<script>alert(1)</script>"})],
            1,
            1,
            10,
        );

        let html = render_table(trucks(), &ListQuery::new(), &result);

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_row_id_variants() {
        assert_eq!(row_id(&json!({"id": "abc"})), "abc");
        assert_eq!(row_id(&json!({"id": 42})), "42");
        assert_eq!(row_id(&json!({"_id": "mongo"})), "mongo");
        assert_eq!(row_id(&json!({"name": "no id"})), "");
    }
}
