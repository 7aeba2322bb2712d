//! The list-query contract: canonical pagination/search/filter parameters
//!
//! Every paginated resource table speaks the same query shape to the
//! backend: `page`, `limit`, `search`, free-form filter keys, and an
//! optional date range. The URL query string is the durable form of this
//! state (back button and shareable links), so encoding is canonical:
//! only non-empty fields are emitted and `page=1` is omitted.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Default page size when none is requested.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Allowed page sizes. Anything else falls back to [`DEFAULT_PAGE_SIZE`]
/// so a hand-edited URL can never request an unbounded fetch.
pub const PAGE_SIZE_CHOICES: [u32; 4] = [5, 10, 20, 50];

/// Query keys with fixed meaning; never treated as resource filters.
const RESERVED_KEYS: [&str; 5] = ["page", "limit", "search", "dateFrom", "dateTo"];

/// Canonical pagination/search/filter parameters for one page of a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    /// Page number, 1-based.
    pub page: u32,

    /// Items per page, restricted to [`PAGE_SIZE_CHOICES`].
    pub page_size: u32,

    /// Free-text search term; trimmed, never empty.
    pub search: Option<String>,

    /// Resource-specific filters in insertion order; values never empty.
    pub filters: IndexMap<String, String>,

    /// Inclusive start of the date range (ISO-8601 date, backend-validated).
    pub date_from: Option<String>,

    /// Inclusive end of the date range (ISO-8601 date, backend-validated).
    pub date_to: Option<String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            search: None,
            filters: IndexMap::new(),
            date_from: None,
            date_to: None,
        }
    }
}

/// Trim a raw string value, mapping whitespace-only to `None`.
fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Snap a requested page size onto the allow-list.
#[must_use]
pub fn clamp_page_size(requested: u32) -> u32 {
    if PAGE_SIZE_CHOICES.contains(&requested) {
        requested
    } else {
        DEFAULT_PAGE_SIZE
    }
}

impl ListQuery {
    /// Query for the first page with all defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search term (trimmed; empty clears it).
    #[must_use]
    pub fn with_search(mut self, search: &str) -> Self {
        self.search = non_empty(search);
        self
    }

    /// Set a filter value (empty removes the key).
    #[must_use]
    pub fn with_filter(mut self, key: &str, value: &str) -> Self {
        match non_empty(value) {
            Some(v) => {
                self.filters.insert(key.to_string(), v);
            }
            None => {
                self.filters.shift_remove(key);
            }
        }
        self
    }

    /// Set the page number (floored to 1).
    #[must_use]
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// Set the page size, snapped to the allow-list.
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = clamp_page_size(page_size);
        self
    }

    /// Set the date range (empty strings clear the bounds).
    #[must_use]
    pub fn with_date_range(mut self, from: &str, to: &str) -> Self {
        self.date_from = non_empty(from);
        self.date_to = non_empty(to);
        self
    }

    /// Whether any search, filter, or date bound is active.
    ///
    /// Drives the empty-state distinction: "no matches for these filters"
    /// vs. "this resource has no rows at all".
    #[must_use]
    pub fn is_filtered(&self) -> bool {
        self.search.is_some()
            || !self.filters.is_empty()
            || self.date_from.is_some()
            || self.date_to.is_some()
    }

    /// The same query repositioned on page 1.
    #[must_use]
    pub fn on_first_page(&self) -> Self {
        let mut query = self.clone();
        query.page = 1;
        query
    }

    /// Encode into the canonical URL query string.
    ///
    /// Emits only non-empty fields, percent-encoded, in a fixed order:
    /// `search`, filters (insertion order), `dateFrom`, `dateTo`, `limit`,
    /// `page`. `page` is omitted when it equals 1 (shortest-URL convention).
    #[must_use]
    pub fn encode(&self) -> String {
        let mut pairs = Vec::new();

        if let Some(ref search) = self.search {
            pairs.push(format!("search={}", urlencoding::encode(search)));
        }
        for (key, value) in &self.filters {
            pairs.push(format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            ));
        }
        if let Some(ref from) = self.date_from {
            pairs.push(format!("dateFrom={}", urlencoding::encode(from)));
        }
        if let Some(ref to) = self.date_to {
            pairs.push(format!("dateTo={}", urlencoding::encode(to)));
        }
        pairs.push(format!("limit={}", self.page_size));
        if self.page > 1 {
            pairs.push(format!("page={}", self.page));
        }

        pairs.join("&")
    }

    /// Decode from raw key/value pairs.
    ///
    /// Missing numerics default (`page`=1, `limit`=[`DEFAULT_PAGE_SIZE`]);
    /// unparseable numerics fall back to the same defaults rather than
    /// failing, since dashboard URLs are user-editable. Any non-reserved
    /// key with a non-empty value becomes a filter; a later duplicate key
    /// wins. Present-but-empty values are treated as absent.
    pub fn decode<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut query = Self::default();

        for (key, value) in pairs {
            let (key, value) = (key.as_ref(), value.as_ref());
            match key {
                "page" => {
                    query.page = value.trim().parse().map_or(1, |p: u32| p.max(1));
                }
                "limit" => {
                    query.page_size = value
                        .trim()
                        .parse()
                        .map_or(DEFAULT_PAGE_SIZE, clamp_page_size);
                }
                "search" => query.search = non_empty(value),
                "dateFrom" => query.date_from = non_empty(value),
                "dateTo" => query.date_to = non_empty(value),
                _ => {
                    if let Some(v) = non_empty(value) {
                        query.filters.insert(key.to_string(), v);
                    }
                }
            }
        }

        query
    }

    /// Decode from a raw query string (the part after `?`).
    #[must_use]
    pub fn decode_str(raw: &str) -> Self {
        let pairs = raw.split('&').filter(|s| !s.is_empty()).map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (
                urlencoding::decode(key).map_or_else(|_| key.to_string(), |k| k.into_owned()),
                urlencoding::decode(value).map_or_else(|_| value.to_string(), |v| v.into_owned()),
            )
        });
        Self::decode(pairs)
    }

    /// Keep only the filters whose keys appear in `allowed`.
    ///
    /// The decoder accepts any non-reserved key; resource tables restrict
    /// to their declared filter keys here, which is what makes unknown
    /// parameters forward-compatible no-ops.
    #[must_use]
    pub fn retain_filters(mut self, allowed: &[&str]) -> Self {
        self.filters.retain(|key, _| allowed.contains(&key.as_str()));
        self
    }
}
