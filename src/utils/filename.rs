//! Screenshot filename generation and validation.
//!
//! Stored images live in a single flat directory, so every name the service
//! generates or accepts must be a plain basename. Validation is a whitelist:
//! anything that is not obviously a generated report name is rejected, which
//! closes off path traversal through the retrieval endpoint.

use rand::{Rng, distr::Alphanumeric};

/// Extension of every stored report image.
pub const REPORT_EXTENSION: &str = ".jpg";

/// Maximum accepted filename length; generated names are well under this.
const MAX_FILENAME_LEN: usize = 128;

/// Reduces a domain to characters safe inside a filename.
///
/// Alphanumerics, `-`, and single `.` are kept; everything else becomes
/// `_`. Consecutive dots are broken up so the result can never contain
/// `..`. An empty input falls back to `"domain"`.
pub fn sanitize_domain(domain: &str) -> String {
    let mut sanitized = String::with_capacity(domain.len());
    let mut prev_dot = false;

    for c in domain.chars() {
        if c.is_ascii_alphanumeric() || c == '-' {
            sanitized.push(c);
            prev_dot = false;
        } else if c == '.' && !prev_dot {
            sanitized.push('.');
            prev_dot = true;
        } else {
            sanitized.push('_');
            prev_dot = false;
        }
    }

    if sanitized.is_empty() {
        "domain".to_string()
    } else {
        sanitized
    }
}

/// Builds a unique stored-report filename for `domain`.
///
/// Shape: `seo_report_<domain>_<utc stamp>_<random>.jpg`. The random suffix
/// keeps concurrent requests for the same domain from colliding.
pub fn report_filename(domain: &str) -> String {
    let stamp = chrono::Utc::now().format("%Y%m%d%H%M%S");
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(char::from)
        .collect();

    format!(
        "seo_report_{}_{}_{}{}",
        sanitize_domain(domain),
        stamp,
        suffix.to_lowercase(),
        REPORT_EXTENSION
    )
}

/// Checks that `filename` is a servable report basename.
///
/// Rules:
/// - non-empty, at most [`MAX_FILENAME_LEN`] characters
/// - ends with `.jpg`
/// - contains no path separators and no `..`
/// - starts with an alphanumeric; remaining characters are alphanumerics,
///   `.`, `_`, or `-`
pub fn is_safe_report_filename(filename: &str) -> bool {
    if filename.is_empty() || filename.len() > MAX_FILENAME_LEN {
        return false;
    }
    if !filename.ends_with(REPORT_EXTENSION) {
        return false;
    }
    if filename.contains('/') || filename.contains('\\') || filename.contains("..") {
        return false;
    }

    let mut chars = filename.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphanumeric() => {}
        _ => return false,
    }

    chars.all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-')
}
