//! Storm version gate.

use semver::Version;

use crate::error::StatsError;

/// Oldest Storm release whose UI API supports the stats report.
pub const MIN_STORM_VERSION: &str = "0.9.2-incubating";

/// Parse a Storm version string.
///
/// Accepts a leading `v` and two-component versions like `0.9`.
pub fn parse_version(raw: &str) -> Result<Version, StatsError> {
    let trimmed = raw.trim().trim_start_matches('v');

    if let Ok(version) = Version::parse(trimmed) {
        return Ok(version);
    }

    // Two-component release trains predate the patch field
    let padded = format!("{trimmed}.0");
    Version::parse(&padded).map_err(|_| StatsError::InvalidVersion(raw.to_string()))
}

/// Gate an invocation on the cluster's Storm version.
///
/// Pre-release suffixes order below their release, so `0.9.2-incubating`
/// itself passes while `0.9.1` is refused.
pub fn ensure_supported(found: &str) -> Result<(), StatsError> {
    let minimum = parse_version(MIN_STORM_VERSION)?;
    let version = parse_version(found)?;

    if version < minimum {
        return Err(StatsError::VersionUnsupported {
            found: found.to_string(),
            minimum: MIN_STORM_VERSION.to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_too_old_is_refused() {
        let err = ensure_supported("0.9.1").unwrap_err();
        assert!(matches!(err, StatsError::VersionUnsupported { .. }));
    }

    #[test]
    fn test_minimum_version_passes() {
        assert!(ensure_supported("0.9.2-incubating").is_ok());
    }

    #[test]
    fn test_newer_versions_pass() {
        assert!(ensure_supported("0.9.2").is_ok());
        assert!(ensure_supported("1.2.3").is_ok());
        assert!(ensure_supported("2.4.0").is_ok());
    }

    #[test]
    fn test_two_component_version() {
        // 0.9 reads as 0.9.0, which predates the minimum
        let err = ensure_supported("0.9").unwrap_err();
        assert!(matches!(err, StatsError::VersionUnsupported { .. }));
        assert!(ensure_supported("1.0").is_ok());
    }

    #[test]
    fn test_leading_v_is_accepted() {
        assert!(ensure_supported("v1.0.0").is_ok());
    }

    #[test]
    fn test_invalid_version() {
        let err = ensure_supported("not-a-version").unwrap_err();
        assert!(matches!(err, StatsError::InvalidVersion(_)));
    }

    #[test]
    fn test_prerelease_orders_below_release() {
        let incubating = parse_version("0.9.2-incubating").unwrap();
        let release = parse_version("0.9.2").unwrap();
        assert!(incubating < release);
    }
}
