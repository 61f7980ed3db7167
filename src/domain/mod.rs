//! Core domain types: the metrics snapshot and the upstream source seam.

pub mod metrics;
pub mod source;
