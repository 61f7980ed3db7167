//! HTTP client for the SEObserver backlink metrics API.
//!
//! One POST per analysis: an array payload with a single
//! `{item_type, item_value}` object, the API key in the `X-SEObserver-key`
//! header, and a fixed timeout. The response body is decoded in a single
//! typed deserialization step; all default-to-zero coercion lives here so
//! the rest of the pipeline only ever sees a [`MetricsSnapshot`].

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;

use crate::config::Config;
use crate::domain::metrics::MetricsSnapshot;
use crate::domain::source::{MetricsSource, UpstreamError};

/// Header carrying the SEObserver API key.
const API_KEY_HEADER: &str = "X-SEObserver-key";

/// Client for the SEObserver metrics endpoint.
pub struct SeoObserverClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl SeoObserverClient {
    /// Builds a client with the configured endpoint, key, and timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.upstream_timeout_seconds))
            .build()?;

        Ok(Self {
            http,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Builds a client against an arbitrary endpoint. Used by tests to point
    /// at a mock server.
    pub fn with_endpoint(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            api_url: api_url.into(),
            api_key: api_key.into(),
        })
    }
}

#[async_trait]
impl MetricsSource for SeoObserverClient {
    async fn fetch(&self, domain: &str) -> Result<MetricsSnapshot, UpstreamError> {
        let payload = json!([{
            "item_type": "domain",
            "item_value": domain,
        }]);

        let response = self
            .http
            .post(&self.api_url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| UpstreamError::Unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: MetricsEnvelope = response
            .json()
            .await
            .map_err(|e| UpstreamError::Malformed(format!("undecodable response body: {e}")))?;

        let row = envelope
            .data
            .into_iter()
            .next()
            .ok_or_else(|| UpstreamError::Malformed("response contained no data entries".into()))?;

        tracing::debug!(domain, "fetched backlink metrics");

        row.into_snapshot()
    }
}

/// Top-level response shape: `{ "data": [ ... ] }`.
#[derive(Debug, Deserialize)]
struct MetricsEnvelope {
    #[serde(default)]
    data: Vec<BacklinkRow>,
}

/// One entry of the upstream `data` list, with only the fields we consume.
///
/// Fields are kept as raw JSON values because the upstream is loose about
/// representation: integers, floats, numeric strings, and nulls all occur.
#[derive(Debug, Default, Deserialize)]
struct BacklinkRow {
    #[serde(rename = "RefDomains")]
    ref_domains: Option<Value>,
    #[serde(rename = "ExtBackLinks")]
    ext_backlinks: Option<Value>,
    #[serde(rename = "RefDomainTypeLive")]
    ref_domain_type_live: Option<Value>,
    #[serde(rename = "RefDomainTypeFollow")]
    ref_domain_type_follow: Option<Value>,
}

impl BacklinkRow {
    /// Maps the raw row into the canonical snapshot, coercing each field.
    fn into_snapshot(self) -> Result<MetricsSnapshot, UpstreamError> {
        Ok(MetricsSnapshot {
            referring_domains: coerce_count("RefDomains", self.ref_domains)?,
            backlinks: coerce_count("ExtBackLinks", self.ext_backlinks)?,
            active_domains: coerce_count("RefDomainTypeLive", self.ref_domain_type_live)?,
            dofollow_domains: coerce_count("RefDomainTypeFollow", self.ref_domain_type_follow)?,
        })
    }
}

/// Resolves a raw upstream value to a non-negative counter.
///
/// Absent and null values become 0. Integral floats and numeric strings are
/// accepted; anything negative or non-numeric is a malformed response, not a
/// silent fallback.
fn coerce_count(field: &str, value: Option<Value>) -> Result<u64, UpstreamError> {
    let malformed = |repr: &dyn std::fmt::Display| {
        UpstreamError::Malformed(format!(
            "field {field} is not a non-negative integer: {repr}"
        ))
    };

    match value {
        None | Some(Value::Null) => Ok(0),
        Some(Value::Number(n)) => {
            if let Some(v) = n.as_u64() {
                Ok(v)
            } else if let Some(f) = n.as_f64() {
                if f >= 0.0 && f.fract() == 0.0 {
                    Ok(f as u64)
                } else {
                    Err(malformed(&n))
                }
            } else {
                Err(malformed(&n))
            }
        }
        Some(Value::String(s)) => s
            .trim()
            .parse::<u64>()
            .map_err(|_| malformed(&format!("\"{s}\""))),
        Some(other) => Err(malformed(&other)),
    }
}
