mod common;

use axum::{
    Router,
    routing::{get, post},
};
use axum_test::TestServer;
use backlink_report::api::handlers::{analyze_screenshot_handler, screenshot_handler};
use backlink_report::config::ScreenshotResponseMode;
use serde_json::json;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn screenshot_server(
    api_url: &str,
    mode: ScreenshotResponseMode,
) -> (TestServer, tempfile::TempDir) {
    let (state, dir) = common::create_test_state(api_url, mode).await;
    let app = Router::new()
        .route("/api/analyze/screenshot", post(analyze_screenshot_handler))
        .route("/api/screenshot/{filename}", get(screenshot_handler))
        .with_state(state);
    (TestServer::new(app).unwrap(), dir)
}

#[tokio::test]
async fn test_screenshot_bytes_mode_returns_jpeg_attachment() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::upstream_body()))
        .mount(&mock)
        .await;

    let (server, _dir) = screenshot_server(&mock.uri(), ScreenshotResponseMode::Bytes).await;

    let response = server
        .post("/api/analyze/screenshot")
        .json(&json!({ "target": "example.com" }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.header("content-type"), "image/jpeg");
    assert_eq!(
        response.header("content-disposition"),
        "attachment; filename=\"seo_report_example.com.jpg\""
    );

    let bytes = response.as_bytes();
    assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
}

#[tokio::test]
async fn test_screenshot_validation_skips_upstream() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::upstream_body()))
        .expect(0)
        .mount(&mock)
        .await;

    let (server, _dir) = screenshot_server(&mock.uri(), ScreenshotResponseMode::Bytes).await;

    let response = server.post("/api/analyze/screenshot").json(&json!({})).await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_screenshot_url_mode_roundtrip() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::upstream_body()))
        .mount(&mock)
        .await;

    let (server, _dir) = screenshot_server(&mock.uri(), ScreenshotResponseMode::Url).await;

    let response = server
        .post("/api/analyze/screenshot")
        .json(&json!({ "target": "example.com" }))
        .await;

    response.assert_status_ok();

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["status"], "success");
    assert_eq!(body["target"], "example.com");

    let url = body["screenshot_url"].as_str().unwrap();
    assert!(url.starts_with("/api/screenshot/seo_report_example.com_"));
    assert!(url.ends_with(".jpg"));

    let image = server.get(url).await;
    image.assert_status_ok();
    assert_eq!(image.header("content-type"), "image/jpeg");
    assert_eq!(&image.as_bytes()[..2], &[0xFF, 0xD8]);
}

#[tokio::test]
async fn test_screenshot_fetch_traversal_is_rejected() {
    let mock = MockServer::start().await;
    let (server, _dir) = screenshot_server(&mock.uri(), ScreenshotResponseMode::Url).await;

    let response = server.get("/api/screenshot/..%2F..%2Fetc%2Fpasswd.jpg").await;

    response.assert_status_bad_request();
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["code"],
        "validation_error"
    );
}

#[tokio::test]
async fn test_screenshot_fetch_unknown_name_is_404() {
    let mock = MockServer::start().await;
    let (server, _dir) = screenshot_server(&mock.uri(), ScreenshotResponseMode::Url).await;

    let response = server
        .get("/api/screenshot/seo_report_example.com_20250601123000_a1b2c3.jpg")
        .await;

    response.assert_status_not_found();
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["code"],
        "not_found"
    );
}

#[tokio::test]
async fn test_screenshot_upstream_failure_renders_nothing() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock)
        .await;

    let (server, dir) = screenshot_server(&mock.uri(), ScreenshotResponseMode::Url).await;

    let response = server
        .post("/api/analyze/screenshot")
        .json(&json!({ "target": "example.com" }))
        .await;

    response.assert_status_internal_server_error();

    let stored = std::fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(stored, 0);
}
