//! Package URL parsing.
//!
//! Only the package type and qualifiers matter for alias generation, so
//! [`parse`] reduces a [`packageurl::PackageUrl`] to a [`ParsedPurl`].

use std::collections::BTreeMap;
use std::str::FromStr;

use packageurl::PackageUrl;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPurl {
    pub package_type: String,
    pub qualifiers: BTreeMap<String, String>,
}

impl ParsedPurl {
    pub fn qualifier(&self, key: &str) -> Option<&str> {
        self.qualifiers
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}

pub fn parse(purl: &str) -> Result<ParsedPurl> {
    let parsed = PackageUrl::from_str(purl).map_err(|e| Error::InvalidPurl {
        purl: purl.to_string(),
        reason: e.to_string(),
    })?;

    let qualifiers = parsed
        .qualifiers()
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    Ok(ParsedPurl {
        package_type: parsed.ty().to_string(),
        qualifiers,
    })
}

/// Second `:`-separated segment of a purl that failed to parse.
pub fn fallback_vendor(purl: &str) -> Option<&str> {
    purl.split(':').nth(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_type_and_qualifiers() {
        let parsed = parse("pkg:deb/debian/openssl@1.1.1n-0+deb11u3?arch=amd64&distro=debian-11")
            .unwrap();

        assert_eq!(parsed.package_type, "deb");
        assert_eq!(parsed.qualifier("distro"), Some("debian-11"));
        assert_eq!(parsed.qualifier("arch"), Some("amd64"));
        assert_eq!(parsed.qualifier("distro_name"), None);
    }

    #[test]
    fn test_parse_plain_purl() {
        let parsed = parse("pkg:npm/pg-promise@10.0.0").unwrap();
        assert_eq!(parsed.package_type, "npm");
        assert!(parsed.qualifiers.is_empty());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = parse("not a purl").unwrap_err();
        assert!(matches!(err, Error::InvalidPurl { .. }));
    }

    #[test]
    fn test_fallback_vendor() {
        assert_eq!(fallback_vendor("cpe:acme:widget"), Some("acme"));
        assert_eq!(fallback_vendor("nocolon"), None);
    }
}
