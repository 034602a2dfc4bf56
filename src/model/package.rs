use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageIdentity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub purl: String,
    /// Fields carried through unchanged, e.g. `version`.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl PackageIdentity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            vendor: None,
            name: name.into(),
            purl: String::new(),
            extra: BTreeMap::new(),
        }
    }

    pub fn with_vendor(mut self, vendor: impl Into<String>) -> Self {
        self.vendor = Some(vendor.into());
        self
    }

    pub fn with_purl(mut self, purl: impl Into<String>) -> Self {
        self.purl = purl.into();
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Vendor if present and non-empty.
    pub fn vendor(&self) -> Option<&str> {
        self.vendor.as_deref().filter(|v| !v.is_empty())
    }

    /// Copies this identity with the name replaced and, when given, the vendor.
    pub fn with_alias(&self, vendor: Option<&str>, name: &str) -> Self {
        let mut variant = self.clone();
        if let Some(vendor) = vendor {
            variant.vendor = Some(vendor.to_string());
        }
        variant.name = name.to_string();
        variant
    }

    /// `vendor:name`, or the bare name without a vendor.
    pub fn full_name(&self) -> String {
        match self.vendor() {
            Some(vendor) => format!("{}:{}", vendor, self.name),
            None => self.name.clone(),
        }
    }

    /// `vendor:name` with an empty vendor segment when there is none.
    ///
    /// This is the key shape used by alias tables, which is why the
    /// dealiaser also probes for `":" + name`.
    pub fn alias_key(&self) -> String {
        format!("{}:{}", self.vendor().unwrap_or_default(), self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_alias_keeps_extra_fields() {
        let package = PackageIdentity::new("spring-core")
            .with_vendor("org.springframework")
            .with_extra("version", "5.3.0");

        let variant = package.with_alias(Some("springframework"), "spring");

        assert_eq!(variant.vendor.as_deref(), Some("springframework"));
        assert_eq!(variant.name, "spring");
        assert_eq!(variant.extra.get("version"), Some(&Value::from("5.3.0")));
        assert_eq!(package.name, "spring-core");
    }

    #[test]
    fn test_with_alias_without_vendor_keeps_original() {
        let package = PackageIdentity::new("lodash").with_vendor("npm");
        let variant = package.with_alias(None, "lodash.js");
        assert_eq!(variant.vendor.as_deref(), Some("npm"));
    }

    #[test]
    fn test_full_name_and_alias_key() {
        let vendored = PackageIdentity::new("widget").with_vendor("acme");
        assert_eq!(vendored.full_name(), "acme:widget");
        assert_eq!(vendored.alias_key(), "acme:widget");

        let bare = PackageIdentity::new("widget").with_vendor("");
        assert_eq!(bare.full_name(), "widget");
        assert_eq!(bare.alias_key(), ":widget");
    }

    #[test]
    fn test_deserialize_flattens_extra() {
        let package: PackageIdentity = serde_json::from_str(
            r#"{"name": "requests", "purl": "pkg:pypi/requests@2.0.0", "version": "2.0.0"}"#,
        )
        .unwrap();

        assert_eq!(package.vendor, None);
        assert_eq!(package.purl, "pkg:pypi/requests@2.0.0");
        assert_eq!(package.extra.get("version"), Some(&Value::from("2.0.0")));
    }
}
