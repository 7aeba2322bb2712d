//! Core data types for FleetDeck

use crate::query::DEFAULT_PAGE_SIZE;
use serde::{Deserialize, Serialize};

/// One fetched page of a resource.
///
/// Held only in transient render state; discarded and re-fetched on the
/// next query change or mutation-triggered refresh. The backend is the
/// single source of truth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListResult<T> {
    /// The rows on this page; never more than `page_size` of them.
    pub items: Vec<T>,

    /// Total rows matching the query across all pages.
    pub total: u64,

    /// Page number this result corresponds to, 1-based.
    pub page: u32,

    /// Page size the result was fetched with.
    pub page_size: u32,

    /// Total pages: `ceil(total / page_size)`; 0 when `total` is 0.
    pub total_pages: u32,
}

impl<T> ListResult<T> {
    /// Build a result, deriving `total_pages` from `total` and `page_size`.
    #[must_use]
    pub fn new(items: Vec<T>, total: u64, page: u32, page_size: u32) -> Self {
        Self {
            items,
            total,
            page,
            page_size,
            total_pages: total_pages(total, page_size),
        }
    }

    /// The safe empty result substituted on any list-fetch failure.
    ///
    /// Fail-open read path: an empty-but-renderable page beats a crash.
    #[must_use]
    pub const fn empty(page_size: u32) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page: 1,
            page_size,
            total_pages: 0,
        }
    }

    /// Whether this page holds no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for ListResult<T> {
    fn default() -> Self {
        Self::empty(DEFAULT_PAGE_SIZE)
    }
}

/// `ceil(total / page_size)`, with 0 total giving 0 pages.
#[must_use]
pub fn total_pages(total: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    let pages = total.div_ceil(u64::from(page_size));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Severity of a user-visible notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    /// Transient confirmation of a successful action.
    Success,
    /// An action failed; the user should retry or correct input.
    Error,
}

/// A transient user-visible notice (the toast equivalent).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Severity.
    pub level: NoticeLevel,
    /// Message text, shown verbatim.
    pub message: String,
}

impl Notice {
    /// A success notice.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    /// An error notice.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(total_pages(95, 10), 10);
        assert_eq!(total_pages(100, 10), 10);
        assert_eq!(total_pages(101, 10), 11);
        assert_eq!(total_pages(1, 50), 1);
    }

    #[test]
    fn test_total_pages_zero_total_is_zero() {
        assert_eq!(total_pages(0, 10), 0);
    }

    #[test]
    fn test_empty_result_shape() {
        let result: ListResult<String> = ListResult::empty(20);

        assert!(result.is_empty());
        assert_eq!(result.total, 0);
        assert_eq!(result.page, 1);
        assert_eq!(result.page_size, 20);
        assert_eq!(result.total_pages, 0);
    }

    #[test]
    fn test_new_derives_total_pages() {
        let result = ListResult::new(vec!["a", "b"], 12, 2, 10);

        assert_eq!(result.total_pages, 2);
        assert_eq!(result.page, 2);
    }

    #[test]
    fn test_notice_constructors() {
        assert_eq!(Notice::success("Saved").level, NoticeLevel::Success);
        assert_eq!(Notice::error("Nope").message, "Nope");
    }
}
