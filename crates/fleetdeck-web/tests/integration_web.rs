//! Integration tests for the dashboard HTTP surface
//!
//! The app is exercised with `tower::ServiceExt::oneshot` against a mock
//! backend, so the whole decode -> fetch -> render pipeline runs.

#![allow(clippy::unwrap_used, clippy::panic, missing_docs)]

use axum::Router;
use axum::body::Body;
use fleetdeck_core::config::{BackendConfig, Config, LoggingConfig, WebServerConfig};
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn app_for(backend_url: &str) -> Router {
    let config = Config {
        backend: BackendConfig {
            base_url: backend_url.to_string(),
            timeout_secs: 5,
            api_token: Some("test-token".to_string()),
        },
        webserver: WebServerConfig::default(),
        logging: LoggingConfig::default(),
    };
    fleetdeck_web::build_app(config).unwrap_or_else(|e| panic!("app should build: {e}"))
}

async fn get_body(app: Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8_lossy(&bytes).into_owned())
}

#[tokio::test]
async fn list_page_renders_backend_rows() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/trucks"))
        .and(query_param("search", "volvo"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "trucks": [
                {"id": "t1", "plate": "AB-123", "model": "Volvo FH", "capacity": 12, "status": "active"}
            ],
            "total": 1,
            "page": 1,
            "limit": 10,
            "totalPages": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = get_body(app_for(&server.uri()), "/r/trucks?search=volvo").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("AB-123"));
    assert!(body.contains("Volvo FH"));
    assert!(body.contains("Page 1 of 1"));
}

#[tokio::test]
async fn backend_failure_renders_empty_state_not_a_crash() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/orders"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let (status, body) = get_body(app_for(&server.uri()), "/r/orders?status=open").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No results match the current filters."));
}

#[tokio::test]
async fn unreachable_backend_still_renders() {
    let (status, body) = get_body(app_for("http://127.0.0.1:1"), "/r/drivers").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Nothing here yet."));
}

#[tokio::test]
async fn unknown_resource_is_not_found() {
    let server = MockServer::start().await;

    let (status, body) = get_body(app_for(&server.uri()), "/r/spaceships").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Unknown resource"));
}

#[tokio::test]
async fn undeclared_filter_keys_are_not_forwarded() {
    let server = MockServer::start().await;

    // The backend would reject an unexpected parameter; assert the exact
    // query the dashboard sends.
    Mock::given(method("GET"))
        .and(path("/users"))
        .and(query_param("role", "admin"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "users": [], "total": 0, "page": 1, "limit": 10, "totalPages": 0
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (status, _) = get_body(
        app_for(&server.uri()),
        "/r/users?role=admin&totally_unknown=1",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let received = &server.received_requests().await.unwrap()[0];
    assert!(!received.url.query().unwrap_or_default().contains("totally_unknown"));
}

#[tokio::test]
async fn delete_emptying_last_page_redirects_to_previous_page() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/trucks/t9"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let app = app_for(&server.uri());
    // Page 3 of 3, one row left on it.
    let form = "_list_query=limit%3D10%26page%3D3&_page_rows=1";
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/r/trucks/t9/delete")
                .header("content-type", "application/x-www-form-urlencoded")
                .body(Body::from(form))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(location.starts_with("/r/trucks?"), "location was {location}");
    assert!(location.contains("page=2"), "location was {location}");
    assert!(location.contains("ok=true"));
}

#[tokio::test]
async fn delete_mid_page_stays_on_same_page() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/trucks/t4"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let app = app_for(&server.uri());
    let form = "_list_query=limit%3D10%26page%3D2&_page_rows=5";
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/r/trucks/t4/delete")
                .header("content-type", "application/x-www-form-urlencoded")
                .body(Body::from(form))
                .unwrap(),
        )
        .await
        .unwrap();

    let location = response
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(location.contains("page=2"), "location was {location}");
}

#[tokio::test]
async fn failed_create_redirects_with_backend_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/drivers"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({"message": "Name is required"})),
        )
        .mount(&server)
        .await;

    let app = app_for(&server.uri());
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/r/drivers")
                .header("content-type", "application/x-www-form-urlencoded")
                .body(Body::from("name=&_list_query=limit%3D10"))
                .unwrap(),
        )
        .await
        .unwrap();

    let location = response
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(location.contains("notice=Name%20is%20required"), "location was {location}");
    assert!(location.contains("ok=false"));
}

#[tokio::test]
async fn mangled_flash_params_never_reject_the_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/trucks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "trucks": [], "total": 0, "page": 1, "limit": 10, "totalPages": 0
        })))
        .mount(&server)
        .await;

    // A hand-edited ok= value styles the notice as an error, nothing more.
    let (status, body) = get_body(
        app_for(&server.uri()),
        "/r/trucks?notice=Saved&ok=weird",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("notice-error"));
    assert!(body.contains("Saved"));
}

#[tokio::test]
async fn health_endpoint_is_up() {
    let server = MockServer::start().await;

    let (status, body) = get_body(app_for(&server.uri()), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}
