//! Stateless HTML components for the dashboard
//!
//! Pure functions from fetched data to markup; no network access and no
//! state of their own.

pub mod pagination;
pub mod table;

/// Escape a string for safe interpolation into HTML text or attributes.
#[must_use]
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
