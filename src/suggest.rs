//! Fix-version suggestions across dealiased results.
//!
//! Several advisories often hit the same canonical package with different
//! fixed versions. [`suggest_version`] picks the highest of them so one
//! upgrade clears every finding, and [`best_fixed_location`] decides
//! whether that suggestion should replace a result's own fixed version.

use indexmap::IndexMap;
use semver::Version;

use crate::model::VulnerabilityRecord;
use crate::normalize::DealiasTable;

/// Highest fixed version per dealiased package.
///
/// Results are grouped by their full package string after mapping it
/// through `dealiased`. Results without a fixed location don't contribute.
pub fn suggest_version<R: VulnerabilityRecord>(
    results: &[R],
    dealiased: &DealiasTable,
) -> IndexMap<String, String> {
    let mut fixes: IndexMap<String, Vec<&str>> = IndexMap::new();

    for result in results {
        let Some(fixed) = result.fixed_location().filter(|f| !f.is_empty()) else {
            continue;
        };
        let full_package = result.full_package();
        let canonical = dealiased.get(full_package.as_str()).cloned().unwrap_or(full_package);
        fixes.entry(canonical).or_default().push(fixed);
    }

    fixes
        .into_iter()
        .filter_map(|(package, versions)| {
            max_version(&versions).map(|version| (package, version.to_string()))
        })
        .collect()
}

/// Chooses between a suggested fix version and the result's own.
///
/// The suggestion wins when the result has no fixed version, or when both
/// share a major component. The no-fix placeholder is never returned.
pub fn best_fixed_location(
    suggested: Option<&str>,
    original: Option<&str>,
    fix_placeholder: &str,
) -> String {
    let suggested = suggested.filter(|s| !s.is_empty());
    let original = original.filter(|o| !o.is_empty());

    match (suggested, original) {
        (Some(suggested), None) if suggested != fix_placeholder => {
            return suggested.to_string();
        }
        (Some(suggested), Some(original)) => {
            if suggested == fix_placeholder {
                return String::new();
            }
            if major_component(suggested) == major_component(original) {
                return suggested.to_string();
            }
        }
        _ => {}
    }

    match original {
        Some(original) if original != fix_placeholder => original.to_string(),
        _ => String::new(),
    }
}

pub fn max_version<'a>(versions: &[&'a str]) -> Option<&'a str> {
    versions
        .iter()
        .copied()
        .reduce(|best, candidate| if is_newer(candidate, best) { candidate } else { best })
}

pub fn is_newer(candidate: &str, current: &str) -> bool {
    // Try semver comparison first
    if let (Some(candidate_ver), Some(current_ver)) = (parse_lenient(candidate), parse_lenient(current)) {
        return candidate_ver > current_ver;
    }

    // Fall back to string comparison for non-semver versions
    candidate > current
}

/// Parses `1`, `1.2` and `v1.2.3` style versions by padding to three parts.
fn parse_lenient(version: &str) -> Option<Version> {
    let trimmed = version.trim().trim_start_matches('v');
    if let Ok(parsed) = Version::parse(trimmed) {
        return Some(parsed);
    }

    let split_at = trimmed.find(['-', '+']).unwrap_or(trimmed.len());
    let (core, rest) = trimmed.split_at(split_at);
    let parts = core.split('.').count();
    if core.is_empty() || parts >= 3 {
        return None;
    }

    let padded = format!("{}{}{}", core, ".0".repeat(3 - parts), rest);
    Version::parse(&padded).ok()
}

fn major_component(version: &str) -> &str {
    version.split('.').next().unwrap_or(version)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::VulnerabilityResult;

    #[test]
    fn test_is_newer_semver() {
        assert!(is_newer("2.0.0", "1.9.9"));
        assert!(is_newer("1.10.0", "1.9.0"));
        assert!(!is_newer("1.0.0", "1.0.0"));
        assert!(is_newer("v2.1", "2.0.5"));
        assert!(is_newer("1.0.0", "1.0.0-rc.1"));
    }

    #[test]
    fn test_is_newer_non_semver_falls_back_to_string_order() {
        assert!(is_newer("1.1.1t", "1.1.1n"));
        assert!(!is_newer("1.1.1a", "1.1.1n"));
    }

    #[test]
    fn test_parse_lenient() {
        assert_eq!(parse_lenient("1"), Some(Version::new(1, 0, 0)));
        assert_eq!(parse_lenient("1.2"), Some(Version::new(1, 2, 0)));
        assert_eq!(parse_lenient("v3.4.5"), Some(Version::new(3, 4, 5)));
        assert!(parse_lenient("1.2-beta").is_some());
        assert_eq!(parse_lenient("1.2.3.4"), None);
        assert_eq!(parse_lenient(""), None);
    }

    #[test]
    fn test_max_version() {
        assert_eq!(max_version(&["1.2.0", "1.10.0", "1.9.3"]), Some("1.10.0"));
        assert_eq!(max_version(&[]), None);
    }

    #[test]
    fn test_suggest_version_groups_by_dealiased_package() {
        let results = vec![
            VulnerabilityResult::new("CVE-1", "spring_framework")
                .with_vendor("pivotal")
                .with_fixed_location("5.3.18"),
            VulnerabilityResult::new("CVE-2", "spring-core")
                .with_vendor("org.springframework")
                .with_fixed_location("5.3.20"),
            VulnerabilityResult::new("CVE-3", "spring_framework").with_vendor("vmware"),
            VulnerabilityResult::new("CVE-4", "lodash").with_fixed_location("4.17.21"),
        ];

        let mut dealiased = DealiasTable::new();
        dealiased.insert(
            "pivotal:spring_framework".to_string(),
            "org.springframework:spring-core".to_string(),
        );

        let suggestions = suggest_version(&results, &dealiased);

        assert_eq!(suggestions.len(), 2);
        assert_eq!(
            suggestions.get("org.springframework:spring-core").map(String::as_str),
            Some("5.3.20")
        );
        assert_eq!(suggestions.get("lodash").map(String::as_str), Some("4.17.21"));
        assert!(!suggestions.contains_key("vmware:spring_framework"));
    }

    #[test]
    fn test_best_fixed_location() {
        let placeholder = "99.99.9";

        assert_eq!(best_fixed_location(Some("2.1.0"), None, placeholder), "2.1.0");
        assert_eq!(best_fixed_location(Some(placeholder), None, placeholder), "");
        assert_eq!(best_fixed_location(Some(placeholder), Some("2.0.0"), placeholder), "");
        assert_eq!(best_fixed_location(Some("2.3.0"), Some("2.1.0"), placeholder), "2.3.0");
        assert_eq!(best_fixed_location(Some("3.0.0"), Some("2.1.0"), placeholder), "2.1.0");
        assert_eq!(best_fixed_location(None, Some(placeholder), placeholder), "");
        assert_eq!(best_fixed_location(None, Some("1.0.1"), placeholder), "1.0.1");
        assert_eq!(best_fixed_location(None, None, placeholder), "");
    }
}
