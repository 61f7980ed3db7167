//! The four canonical backlink counters derived from one upstream query.

use serde::Serialize;

/// Normalized backlink metrics for a single domain.
///
/// Built fresh per request from the first entry of the upstream `data` list.
/// Fields default to 0 when the upstream omits them; they are never negative
/// and never null. The snapshot is immutable once constructed and is not
/// persisted anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    /// Number of distinct domains linking to the target (`RefDomains`).
    pub referring_domains: u64,
    /// Total external backlinks (`ExtBackLinks`).
    pub backlinks: u64,
    /// Referring domains that currently resolve (`RefDomainTypeLive`).
    pub active_domains: u64,
    /// Referring domains with dofollow links (`RefDomainTypeFollow`).
    pub dofollow_domains: u64,
}
