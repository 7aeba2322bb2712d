//! HTTP client for communicating with the FleetDeck backend API
//!
//! All resource tables go through the same conventional REST surface:
//! `GET /{resource}` with the encoded list query, `POST /{resource}`,
//! `PATCH /{resource}/{id}`, `DELETE /{resource}/{id}`. The backend is
//! opaque; the client normalizes its failures into the workspace error
//! taxonomy and keeps the read path fail-open.

use crate::session::Session;
use fleetdeck_core::config::BackendConfig;
use fleetdeck_core::types::total_pages;
use fleetdeck_core::{Error, ListQuery, ListResult, Result};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::warn;

/// API client for making HTTP requests to the backend
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: Option<Session>,
}

impl ApiClient {
    /// Create a new API client
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            session: None,
        }
    }

    /// Create a client from backend configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn from_config(config: &BackendConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Configuration {
                message: format!("failed to build HTTP client: {e}"),
            })?;

        let mut api = Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session: None,
        };
        if let Some(ref token) = config.api_token {
            api.session = Some(Session::from_token(token.clone()));
        }
        Ok(api)
    }

    /// Attach the active session's credential to subsequent requests
    #[must_use]
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    /// Build a request with the bearer credential attached when a session
    /// is present; without one the request proceeds unauthenticated and
    /// the backend is expected to reject it with 401.
    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let mut request = self.client.request(method, url);
        if let Some(ref session) = self.session {
            request = request.bearer_auth(session.bearer());
        }
        request
    }

    /// Fetch one page of a resource, failing open.
    ///
    /// Any failure (transport, non-2xx, auth, malformed body) is logged
    /// and substituted with the safe empty result so the page always has
    /// a renderable state. Auth failures are logged distinctly but not
    /// surfaced differently.
    pub async fn fetch_list(&self, resource: &str, query: &ListQuery) -> ListResult<Value> {
        match self.list(resource, query).await {
            Ok(result) => result,
            Err(e) if e.is_authentication() => {
                warn!(resource, error = %e, "list fetch rejected as unauthenticated, serving empty page");
                ListResult::empty(query.page_size)
            }
            Err(e) => {
                warn!(resource, error = %e, "list fetch failed, serving empty page");
                ListResult::empty(query.page_size)
            }
        }
    }

    /// Fetch one page of a resource
    ///
    /// The backend envelope is `{ {resource}: [..], total, page, limit,
    /// totalPages }`; the items array is looked up under the resource key
    /// with `items`/`data` fallbacks.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the backend answers non-2xx,
    /// or the response body cannot be parsed.
    pub async fn list(&self, resource: &str, query: &ListQuery) -> Result<ListResult<Value>> {
        let mut url = format!("{}/{resource}", self.base_url);
        let encoded = query.encode();
        if !encoded.is_empty() {
            url.push('?');
            url.push_str(&encoded);
        }

        let response = self
            .request(Method::GET, &url)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(error_from_response(status, response).await);
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| Error::Other(format!("failed to parse list response: {e}")))?;

        Ok(list_result_from_body(&body, resource, query))
    }

    /// Create a new row in a resource
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects the
    /// payload.
    pub async fn create(&self, resource: &str, payload: &Value) -> Result<Value> {
        let url = format!("{}/{resource}", self.base_url);
        let response = self
            .request(Method::POST, &url)
            .json(payload)
            .send()
            .await
            .map_err(transport_error)?;

        created_or_updated(response).await
    }

    /// Create a new row with an attached file, sent as multipart form data
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects the
    /// payload.
    pub async fn create_multipart(
        &self,
        resource: &str,
        fields: Vec<(String, String)>,
        file_field: &str,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<Value> {
        let mut form = Form::new().part(
            file_field.to_string(),
            Part::bytes(bytes).file_name(filename.to_string()),
        );
        for (key, value) in fields {
            form = form.text(key, value);
        }

        let url = format!("{}/{resource}", self.base_url);
        let response = self
            .request(Method::POST, &url)
            .multipart(form)
            .send()
            .await
            .map_err(transport_error)?;

        created_or_updated(response).await
    }

    /// Update an existing row
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects the
    /// payload.
    pub async fn update(&self, resource: &str, id: &str, payload: &Value) -> Result<Value> {
        let url = format!("{}/{resource}/{}", self.base_url, urlencoding::encode(id));
        let response = self
            .request(Method::PATCH, &url)
            .json(payload)
            .send()
            .await
            .map_err(transport_error)?;

        created_or_updated(response).await
    }

    /// Delete a row
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend refuses the
    /// deletion.
    pub async fn delete(&self, resource: &str, id: &str) -> Result<()> {
        let url = format!("{}/{resource}/{}", self.base_url, urlencoding::encode(id));
        let response = self
            .request(Method::DELETE, &url)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(error_from_response(status, response).await)
        }
    }
}

/// Map a send-level reqwest failure onto the error taxonomy.
fn transport_error(err: reqwest::Error) -> Error {
    Error::Unreachable(err.to_string())
}

/// Accept a 2xx mutation response, tolerating empty bodies (201/204).
async fn created_or_updated(response: reqwest::Response) -> Result<Value> {
    let status = response.status();
    if !status.is_success() {
        return Err(error_from_response(status, response).await);
    }

    let text = response
        .text()
        .await
        .map_err(|e| Error::Other(format!("failed to read response body: {e}")))?;
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&text)
        .map_err(|e| Error::Other(format!("failed to parse mutation response: {e}")))
}

/// Normalize a non-2xx response: extract the backend-provided message from
/// the JSON body when present, else fall back to the status reason. 401
/// maps to the distinct authentication variant.
async fn error_from_response(status: StatusCode, response: reqwest::Response) -> Error {
    let body = response.text().await.unwrap_or_default();
    let message = backend_message(&body)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());

    if status == StatusCode::UNAUTHORIZED {
        Error::Authentication(message)
    } else {
        Error::Api {
            status: status.as_u16(),
            message,
        }
    }
}

/// Pull a human-readable message out of a backend error body.
fn backend_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    for key in ["message", "error"] {
        if let Some(message) = value.get(key).and_then(Value::as_str) {
            if !message.is_empty() {
                return Some(message.to_string());
            }
        }
    }
    None
}

/// Assemble a `ListResult` from the backend envelope, tolerating partial
/// or oddly shaped bodies by falling back to the requested query values.
fn list_result_from_body(body: &Value, resource: &str, query: &ListQuery) -> ListResult<Value> {
    let mut items = [resource, "items", "data"]
        .iter()
        .find_map(|key| body.get(*key).and_then(Value::as_array))
        .cloned()
        .unwrap_or_default();

    let total = body
        .get("total")
        .and_then(Value::as_u64)
        .unwrap_or(items.len() as u64);
    let page = body
        .get("page")
        .and_then(Value::as_u64)
        .and_then(|p| u32::try_from(p).ok())
        .unwrap_or(query.page);
    let page_size = body
        .get("limit")
        .and_then(Value::as_u64)
        .and_then(|l| u32::try_from(l).ok())
        .unwrap_or(query.page_size);
    let pages = body
        .get("totalPages")
        .and_then(Value::as_u64)
        .and_then(|t| u32::try_from(t).ok())
        .unwrap_or_else(|| total_pages(total, page_size));

    // A page never carries more rows than its page size, whatever the
    // backend sent.
    items.truncate(page_size as usize);

    ListResult {
        items,
        total,
        page,
        page_size,
        total_pages: pages,
    }
}
