//! List-query extractor for incoming page requests
//!
//! The URL query string is the durable form of table state, so the list
//! page simply decodes it back into a [`ListQuery`]. Decoding is lenient:
//! dashboard URLs are user-editable and a mangled `page=` must render the
//! first page, never a 400.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use fleetdeck_core::ListQuery;
use std::convert::Infallible;

/// Extractor wrapping the decoded [`ListQuery`].
///
/// The decoded filters still carry any non-reserved parameter; handlers
/// restrict them to the resource's declared filter keys with
/// [`ListQuery::retain_filters`], which is what makes unknown parameters
/// forward-compatible no-ops.
#[derive(Debug, Clone)]
pub struct ListQueryParams(pub ListQuery);

#[async_trait]
impl<S> FromRequestParts<S> for ListQueryParams
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts.uri.query().unwrap_or_default();
        Ok(Self(ListQuery::decode_str(raw)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::http::{Request, Uri};
    use pretty_assertions::assert_eq;

    fn parts_with_query(query: &str) -> Parts {
        let uri: Uri = format!("http://example.com/r/trucks?{query}").parse().unwrap();
        let request = Request::builder().uri(uri).body(()).unwrap();
        let (parts, ()) = request.into_parts();
        parts
    }

    #[tokio::test]
    async fn test_extractor_decodes_full_query() {
        let mut parts = parts_with_query("search=truck-7&limit=10&status=active&page=2");

        let ListQueryParams(query) = ListQueryParams::from_request_parts(&mut parts, &())
            .await
            .unwrap();

        assert_eq!(query.page, 2);
        assert_eq!(query.page_size, 10);
        assert_eq!(query.search.as_deref(), Some("truck-7"));
        assert_eq!(query.filters.get("status").map(String::as_str), Some("active"));
    }

    #[tokio::test]
    async fn test_extractor_defaults_on_empty_query() {
        let mut parts = parts_with_query("");

        let ListQueryParams(query) = ListQueryParams::from_request_parts(&mut parts, &())
            .await
            .unwrap();

        assert_eq!(query, ListQuery::new());
    }

    #[tokio::test]
    async fn test_extractor_never_rejects_garbage_numerics() {
        let mut parts = parts_with_query("page=minus-one&limit=9999999");

        let ListQueryParams(query) = ListQueryParams::from_request_parts(&mut parts, &())
            .await
            .unwrap();

        assert_eq!(query.page, 1);
        assert_eq!(query.page_size, fleetdeck_core::DEFAULT_PAGE_SIZE);
    }
}
