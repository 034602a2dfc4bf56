use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Read access to a vulnerability hit.
///
/// The dealiaser and deduplicator only ever read these fields, so callers
/// holding their own result type can implement this instead of converting
/// to [`VulnerabilityResult`].
pub trait VulnerabilityRecord {
    fn id(&self) -> &str;

    fn affected_vendor(&self) -> Option<&str>;

    fn affected_package(&self) -> &str;

    fn fixed_location(&self) -> Option<&str>;

    /// Package type tag such as `npm` or `deb`.
    fn package_type(&self) -> Option<&str>;

    /// `vendor:package` when the advisory names a vendor, else the package.
    fn full_package(&self) -> String {
        match self.affected_vendor().filter(|v| !v.is_empty()) {
            Some(vendor) => format!("{}:{}", vendor, self.affected_package()),
            None => self.affected_package().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffectedLocation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    pub package: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageIssue {
    pub affected_location: AffectedLocation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VulnerabilityResult {
    pub id: String,
    pub package_issue: PackageIssue,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub package_type: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl VulnerabilityResult {
    pub fn new(id: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            package_issue: PackageIssue {
                affected_location: AffectedLocation {
                    vendor: None,
                    package: package.into(),
                    version: None,
                },
                fixed_location: None,
            },
            package_type: None,
            extra: BTreeMap::new(),
        }
    }

    pub fn with_vendor(mut self, vendor: impl Into<String>) -> Self {
        self.package_issue.affected_location.vendor = Some(vendor.into());
        self
    }

    pub fn with_fixed_location(mut self, fixed: impl Into<String>) -> Self {
        self.package_issue.fixed_location = Some(fixed.into());
        self
    }

    pub fn with_type(mut self, package_type: impl Into<String>) -> Self {
        self.package_type = Some(package_type.into());
        self
    }
}

impl VulnerabilityRecord for VulnerabilityResult {
    fn id(&self) -> &str {
        &self.id
    }

    fn affected_vendor(&self) -> Option<&str> {
        self.package_issue.affected_location.vendor.as_deref()
    }

    fn affected_package(&self) -> &str {
        &self.package_issue.affected_location.package
    }

    fn fixed_location(&self) -> Option<&str> {
        self.package_issue.fixed_location.as_deref()
    }

    fn package_type(&self) -> Option<&str> {
        self.package_type.as_deref()
    }
}
