use indexmap::{IndexMap, IndexSet};
use tracing::debug;

use crate::model::VulnerabilityRecord;

/// Canonical identity key to the alias strings that resolve to it.
pub type PackageAliasTable = IndexMap<String, IndexSet<String>>;

/// Lowercase `vendor:name` to a direct replacement.
pub type PurlAliasTable = IndexMap<String, String>;

/// Observed `vendor:name` (or bare name) to its canonical replacement.
pub type DealiasTable = IndexMap<String, String>;

/// Maps each result's reported package back onto a canonical identity.
///
/// The purl alias table is consulted first with the lowercased full
/// package string. Otherwise the package alias table is scanned in
/// insertion order and the first entry whose aliases contain the full
/// package string (or `":" + name`) wins, provided the entry is not the
/// package itself. Results with no match are left out.
///
/// Returns an empty table when `package_aliases` is empty.
///
/// # Example
///
/// ```
/// use depalias::{dealias, PackageAliasTable, PurlAliasTable, VulnerabilityResult};
///
/// let results = vec![VulnerabilityResult::new("CVE-2024-0001", "widget").with_vendor("acme")];
///
/// let mut package_aliases = PackageAliasTable::new();
/// package_aliases.insert("acme-corp:widget".into(), ["acme:widget".to_string()].into_iter().collect());
///
/// let mut purl_aliases = PurlAliasTable::new();
/// purl_aliases.insert("acme:widget".into(), "widget-upstream".into());
///
/// let table = dealias(&results, &package_aliases, &purl_aliases);
/// assert_eq!(table.get("acme:widget").map(String::as_str), Some("widget-upstream"));
/// ```
pub fn dealias<R: VulnerabilityRecord>(
    results: &[R],
    package_aliases: &PackageAliasTable,
    purl_aliases: &PurlAliasTable,
) -> DealiasTable {
    let mut table = DealiasTable::new();
    if package_aliases.is_empty() {
        return table;
    }

    for result in results {
        let full_package = result.full_package();

        if let Some(replacement) = purl_aliases
            .get(full_package.to_lowercase().as_str())
            .filter(|r| !r.is_empty())
        {
            debug!(package = %full_package, replacement = %replacement, "Purl alias hit");
            table.insert(full_package, replacement.clone());
            continue;
        }

        let bare = format!(":{}", result.affected_package());
        let canonical = package_aliases.iter().find(|&(key, aliases)| {
            (aliases.contains(full_package.as_str()) || aliases.contains(bare.as_str()))
                && key.as_str() != full_package.as_str()
        });

        if let Some((key, _)) = canonical {
            debug!(package = %full_package, canonical = %key, "Package alias hit");
            table.insert(full_package, key.clone());
        }
    }

    table
}
