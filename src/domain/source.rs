//! Seam between the analysis pipeline and the upstream metrics provider.

use async_trait::async_trait;

use crate::domain::metrics::MetricsSnapshot;

/// Failure modes of a metrics fetch, distinguishable by the caller.
///
/// These replace exception-style control flow: a handler can branch on the
/// variant (and the carried upstream status) without inspecting messages.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UpstreamError {
    /// The request never produced an HTTP response (DNS, connect, timeout).
    #[error("upstream unreachable: {0}")]
    Unreachable(String),

    /// The upstream answered with a non-success status.
    #[error("upstream rejected the request with status {status}")]
    Rejected { status: u16, body: String },

    /// The upstream answered 200 but the body was not usable: undecodable
    /// JSON, a missing or empty `data` list, or a field that cannot be
    /// coerced to a non-negative integer.
    #[error("upstream response malformed: {0}")]
    Malformed(String),
}

/// A provider of backlink metrics for a domain.
///
/// The production implementation is
/// [`crate::infrastructure::seobserver::SeoObserverClient`]; tests use the
/// generated mock.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MetricsSource: Send + Sync {
    /// Fetches the metrics snapshot for `domain`.
    ///
    /// `domain` must be non-empty and trimmed; callers validate before
    /// calling. Exactly one upstream request is issued, with no retries.
    async fn fetch(&self, domain: &str) -> Result<MetricsSnapshot, UpstreamError>;
}
