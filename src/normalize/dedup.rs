use std::collections::HashSet;

use tracing::debug;

use crate::config::NormalizeConfig;
use crate::model::VulnerabilityRecord;

/// Drops excluded and mismatched results and keeps one result per id.
///
/// Walks `results` once, in order. A result is dropped when its fixed
/// location is the exclude sentinel, or when it carries a known package
/// type that differs from the type expected for `project_type`. Either
/// way its id counts as decided, and only the first occurrence of an id
/// is ever considered.
///
/// The type check drops genuine findings whose alias happened to match an
/// advisory from another ecosystem. Collapsing distinct ids that describe
/// the same finding is not attempted.
///
/// # Example
///
/// ```
/// use depalias::{dedup, NormalizeConfig, VulnerabilityResult};
///
/// let results = vec![
///     VulnerabilityResult::new("CVE-2024-0001", "requests").with_type("pypi"),
///     VulnerabilityResult::new("CVE-2024-0001", "requests").with_type("pypi"),
///     VulnerabilityResult::new("CVE-2024-0002", "requests").with_type("npm"),
/// ];
///
/// let kept = dedup("python", &results, &NormalizeConfig::default());
/// assert_eq!(kept.len(), 1);
/// assert_eq!(kept[0].id, "CVE-2024-0001");
/// ```
pub fn dedup<'a, R: VulnerabilityRecord>(
    project_type: &str,
    results: &'a [R],
    config: &NormalizeConfig,
) -> Vec<&'a R> {
    let expected_type = config.expected_type(project_type);
    let mut decided: HashSet<&'a str> = HashSet::new();
    let mut kept = Vec::new();

    for result in results {
        let id = result.id();

        if result.fixed_location() == Some(config.exclude_version.as_str()) {
            debug!(id, "Dropping result with excluded fix version");
            decided.insert(id);
            continue;
        }

        if let (Some(package_type), Some(expected)) = (
            result.package_type().filter(|t| !t.is_empty()),
            expected_type,
        ) {
            if config.is_known_type(package_type) && package_type != expected {
                debug!(id, package_type, expected, "Dropping result with mismatched package type");
                decided.insert(id);
            }
        }

        if decided.insert(id) {
            kept.push(result);
        }
    }

    debug!(
        project_type,
        total = results.len(),
        kept = kept.len(),
        "Deduplicated results"
    );

    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::VulnerabilityResult;

    fn ids<'a>(results: &[&'a VulnerabilityResult]) -> Vec<&'a str> {
        results.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_sentinel_is_always_excluded() {
        let config = NormalizeConfig::default();
        let results = vec![
            VulnerabilityResult::new("CVE-1", "openssl").with_fixed_location(config.exclude_version.clone()),
            VulnerabilityResult::new("CVE-2", "openssl").with_fixed_location("1.1.1t"),
        ];

        let kept = dedup("python", &results, &config);
        assert_eq!(ids(&kept), vec!["CVE-2"]);
    }

    #[test]
    fn test_sentinel_decision_suppresses_later_duplicates() {
        let config = NormalizeConfig::default();
        let results = vec![
            VulnerabilityResult::new("CVE-1", "openssl").with_fixed_location(config.exclude_version.clone()),
            VulnerabilityResult::new("CVE-1", "openssl").with_fixed_location("1.1.1t"),
        ];

        assert!(dedup("python", &results, &config).is_empty());
    }

    #[test]
    fn test_type_mismatch_is_excluded() {
        let config = NormalizeConfig::default();
        let results = vec![
            VulnerabilityResult::new("CVE-1", "requests").with_type("npm"),
            VulnerabilityResult::new("CVE-2", "requests").with_type("pypi"),
        ];

        let kept = dedup("python", &results, &config);
        assert_eq!(ids(&kept), vec!["CVE-2"]);
    }

    #[test]
    fn test_type_mismatch_drops_genuine_cross_ecosystem_hit() {
        // A pypi package whose alias matched an npm advisory of the same
        // name loses the finding even if the advisory really applies.
        let config = NormalizeConfig::default();
        let results = vec![VulnerabilityResult::new("GHSA-xxxx", "node-requests").with_type("npm")];

        assert!(dedup("python", &results, &config).is_empty());
    }

    #[test]
    fn test_type_check_needs_known_type_and_expected_type() {
        let config = NormalizeConfig::default();
        let results = vec![
            VulnerabilityResult::new("CVE-1", "widget").with_type("made-up"),
            VulnerabilityResult::new("CVE-2", "widget"),
            VulnerabilityResult::new("CVE-3", "widget").with_type(""),
        ];

        assert_eq!(ids(&dedup("python", &results, &config)), vec!["CVE-1", "CVE-2", "CVE-3"]);

        let typed = vec![VulnerabilityResult::new("CVE-4", "widget").with_type("npm")];
        assert_eq!(ids(&dedup("cobol", &typed, &config)), vec!["CVE-4"]);
    }

    #[test]
    fn test_single_emission_per_id() {
        let config = NormalizeConfig::default();
        let results = vec![
            VulnerabilityResult::new("CVE-1", "flask").with_vendor("pallets"),
            VulnerabilityResult::new("CVE-2", "flask"),
            VulnerabilityResult::new("CVE-1", "flask").with_vendor("palletsprojects"),
        ];

        let kept = dedup("python", &results, &config);
        assert_eq!(ids(&kept), vec!["CVE-1", "CVE-2"]);
        assert_eq!(kept[0].package_issue.affected_location.vendor.as_deref(), Some("pallets"));
    }

    #[test]
    fn test_first_occurrence_decides() {
        let config = NormalizeConfig::default();
        let results = vec![
            VulnerabilityResult::new("CVE-1", "requests").with_type("npm"),
            VulnerabilityResult::new("CVE-1", "requests").with_type("pypi"),
        ];

        assert!(dedup("python", &results, &config).is_empty());
    }

    #[test]
    fn test_custom_sentinel() {
        let mut config = NormalizeConfig::default();
        config.exclude_version = "0.0.0-excluded".to_string();
        let results = vec![
            VulnerabilityResult::new("CVE-1", "zlib").with_fixed_location("0.0.0-excluded"),
            VulnerabilityResult::new("CVE-2", "zlib").with_fixed_location("99.99.99"),
        ];

        assert_eq!(ids(&dedup("python", &results, &config)), vec!["CVE-2"]);
    }
}
