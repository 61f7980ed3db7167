mod common;

use std::time::Duration;

use backlink_report::infrastructure::seobserver::SeoObserverClient;
use backlink_report::prelude::{MetricsSnapshot, MetricsSource, UpstreamError};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(api_url: &str) -> SeoObserverClient {
    SeoObserverClient::with_endpoint(api_url, "test-key-123456", Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_fetch_sends_key_and_item_payload() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/backlinks/metrics.json"))
        .and(header("X-SEObserver-key", "test-key-123456"))
        .and(body_json(json!([{
            "item_type": "domain",
            "item_value": "example.com"
        }])))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::upstream_body()))
        .expect(1)
        .mount(&mock)
        .await;

    let client = client(&format!("{}/backlinks/metrics.json", mock.uri()));
    let snapshot = client.fetch("example.com").await.unwrap();

    assert_eq!(
        snapshot,
        MetricsSnapshot {
            referring_domains: 120,
            backlinks: 4500,
            active_domains: 80,
            dofollow_domains: 95,
        }
    );
}

#[tokio::test]
async fn test_fetch_tolerates_string_and_null_counters() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "RefDomains": "120",
                "ExtBackLinks": null,
                "RefDomainTypeLive": 80.0
            }]
        })))
        .mount(&mock)
        .await;

    let snapshot = client(&mock.uri()).fetch("example.com").await.unwrap();

    assert_eq!(snapshot.referring_domains, 120);
    assert_eq!(snapshot.backlinks, 0);
    assert_eq!(snapshot.active_domains, 80);
    assert_eq!(snapshot.dofollow_domains, 0);
}

#[tokio::test]
async fn test_fetch_non_success_is_rejected_with_body() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
        .mount(&mock)
        .await;

    let err = client(&mock.uri()).fetch("example.com").await.unwrap_err();

    assert_eq!(
        err,
        UpstreamError::Rejected {
            status: 429,
            body: "quota exceeded".to_string(),
        }
    );
}

#[tokio::test]
async fn test_fetch_empty_data_is_malformed() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .mount(&mock)
        .await;

    let err = client(&mock.uri()).fetch("example.com").await.unwrap_err();
    assert!(matches!(err, UpstreamError::Malformed(_)));
}

#[tokio::test]
async fn test_fetch_non_json_body_is_malformed() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&mock)
        .await;

    let err = client(&mock.uri()).fetch("example.com").await.unwrap_err();
    assert!(matches!(err, UpstreamError::Malformed(_)));
}

#[tokio::test]
async fn test_fetch_connection_refused_is_unreachable() {
    // Port from a server that has already shut down. A dedicated (non-pooled)
    // server is required: pooled servers from `MockServer::start` keep their
    // port open after drop.
    let mock = MockServer::builder().start().await;
    let uri = mock.uri();
    drop(mock);

    let err = client(&uri).fetch("example.com").await.unwrap_err();
    assert!(matches!(err, UpstreamError::Unreachable(_)));
}
