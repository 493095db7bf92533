//! Tests for the full application router: path normalization, CORS and the
//! static UI fallback.

mod common;

use axum::body::{Body, to_bytes};
use axum::http::{Request, Response, StatusCode, header};
use serde_json::{Value, json};
use snaplink::routes::app_router;
use snaplink::state::AppState;
use tower::ServiceExt;

async fn send(state: AppState, static_dir: Option<&str>, request: Request<Body>) -> Response<Body> {
    app_router(state, static_dir).oneshot(request).await.unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_text(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn test_state() -> AppState {
    common::create_test_state(Some(common::TEST_BASE_URL))
}

#[tokio::test]
async fn test_trailing_slash_is_trimmed() {
    let response = send(test_state(), None, get("/links/")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let request = Request::builder()
        .uri("/links")
        .header(header::ORIGIN, "https://ui.example")
        .body(Body::empty())
        .unwrap();

    let response = send(test_state(), None, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

#[tokio::test]
async fn test_cors_preflight_for_shorten() {
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/shorten")
        .header(header::ORIGIN, "https://ui.example")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();

    let response = send(test_state(), None, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_METHODS)
    );
}

#[tokio::test]
async fn test_unknown_path_without_static_dir() {
    let response = send(test_state(), None, get("/dashboard")).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_static_dir_serves_index_for_unknown_paths() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>snaplink ui</h1>").unwrap();
    let static_dir = dir.path().to_str().unwrap();

    for path in ["/", "/some/page"] {
        let response = send(test_state(), Some(static_dir), get(path)).await;

        assert_eq!(response.status(), StatusCode::OK, "path {path}");
        assert!(body_text(response).await.contains("snaplink ui"));
    }
}

#[tokio::test]
async fn test_api_routes_take_precedence_over_static_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>snaplink ui</h1>").unwrap();
    let static_dir = dir.path().to_str().unwrap();

    let response = send(test_state(), Some(static_dir), get("/links")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("application/json")
    );

    let response = send(test_state(), Some(static_dir), get("/r/nope123")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body, json!({ "error": "Not found" }));
}

#[tokio::test]
async fn test_short_url_from_request_authority() {
    let request = Request::builder()
        .method("POST")
        .uri("http://sho.rt:4000/shorten")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "url": "https://example.com" }).to_string()))
        .unwrap();

    let response = send(common::create_test_state(None), None, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
    let code = body["code"].as_str().unwrap();
    assert_eq!(body["short"], format!("http://sho.rt:4000/r/{code}"));
}
