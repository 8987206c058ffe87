use std::sync::LazyLock;

use regex::Regex;

use super::AppError;

/// Sentinel version that tracks the newest published image.
pub const LATEST_VERSION: &str = "latest";

static DOMAIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(?:[_A-Za-z0-9](?:[_A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+",
        r"[A-Za-z](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?$",
    ))
    .expect("domain pattern is valid")
});

static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^v[0-9]+(?:\.[0-9]+){0,2}$").expect("version pattern is valid"));

/// Validates a fully-qualified domain name.
///
/// Checks:
/// - At least two labels separated by dots
/// - Each label is 1-63 alphanumerics, hyphens or underscores
/// - No label starts or ends with a hyphen
/// - The final label starts with a letter
pub fn validate_domain(domain: &str) -> Result<(), AppError> {
    if DOMAIN_RE.is_match(domain) {
        Ok(())
    } else {
        Err(AppError::InvalidDomain(domain.to_string()))
    }
}

/// Validates a release tag of the form `v<major>[.<minor>[.<patch>]]`.
pub fn validate_version(version: &str) -> Result<(), AppError> {
    if VERSION_RE.is_match(version) {
        Ok(())
    } else {
        Err(AppError::InvalidVersion(version.to_string()))
    }
}

/// Like [`validate_version`], but also accepts the `latest` sentinel.
pub fn validate_server_version(version: &str) -> Result<(), AppError> {
    if version == LATEST_VERSION { Ok(()) } else { validate_version(version) }
}
