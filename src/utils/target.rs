//! Analysis target normalization.

use serde_json::json;

use crate::error::AppError;

/// Longest accepted target; DNS caps hostnames at 253 characters.
const MAX_TARGET_LEN: usize = 253;

/// Resolves the `target` field of an analysis request to a usable domain.
///
/// The field is optional at the JSON level so that an absent value produces
/// the same 400 response as an empty one, instead of a deserialization
/// rejection. The returned string is trimmed and non-empty; validation
/// happens before any upstream call.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if the target is absent, empty after
/// trimming, longer than [`MAX_TARGET_LEN`], or contains whitespace or
/// control characters.
pub fn normalize_target(target: Option<&str>) -> Result<String, AppError> {
    let target = target
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            AppError::bad_request(
                "The target parameter is required",
                json!({ "field": "target" }),
            )
        })?;

    if target.len() > MAX_TARGET_LEN {
        return Err(AppError::bad_request(
            "The target parameter is too long",
            json!({ "field": "target", "max_length": MAX_TARGET_LEN }),
        ));
    }

    if target.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(AppError::bad_request(
            "The target parameter must be a single domain name",
            json!({ "field": "target" }),
        ));
    }

    Ok(target.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_domain() {
        assert_eq!(normalize_target(Some("example.com")).unwrap(), "example.com");
    }

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(
            normalize_target(Some("  example.com\n")).unwrap(),
            "example.com"
        );
    }

    #[test]
    fn test_absent_is_rejected() {
        let err = normalize_target(None).unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[test]
    fn test_empty_is_rejected() {
        assert!(normalize_target(Some("")).is_err());
        assert!(normalize_target(Some("   ")).is_err());
    }

    #[test]
    fn test_interior_whitespace_is_rejected() {
        assert!(normalize_target(Some("exam ple.com")).is_err());
        assert!(normalize_target(Some("example.com\u{0}")).is_err());
    }

    #[test]
    fn test_overlong_is_rejected() {
        let long = "a".repeat(300);
        assert!(normalize_target(Some(&long)).is_err());
    }
}
