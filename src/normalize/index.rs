use serde::{Deserialize, Serialize};
use tracing::debug;

use super::dealias::{PackageAliasTable, PurlAliasTable};
use super::variations::generate_variations;
use crate::config::NormalizeConfig;
use crate::model::PackageIdentity;

/// Alias tables aggregated from the variations of many packages.
///
/// Each package contributes one `package_aliases` entry keyed by its own
/// `vendor:name` (empty vendor when absent) holding the `vendor:name` of
/// every variation. When the package has a purl, every lowercased
/// variation full name (bare name without a vendor) also points at that
/// purl in `purl_aliases`; the first package to claim a key keeps it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasIndex {
    pub package_aliases: PackageAliasTable,
    pub purl_aliases: PurlAliasTable,
}

impl AliasIndex {
    pub fn build<'a>(
        packages: impl IntoIterator<Item = &'a PackageIdentity>,
        config: &NormalizeConfig,
    ) -> Self {
        let mut index = Self::default();
        for package in packages {
            index.add(package, config);
        }
        debug!(
            packages = index.package_aliases.len(),
            purl_aliases = index.purl_aliases.len(),
            "Built alias index"
        );
        index
    }

    pub fn add(&mut self, package: &PackageIdentity, config: &NormalizeConfig) {
        let aliases = self.package_aliases.entry(package.alias_key()).or_default();

        for variation in generate_variations(package, config) {
            if !package.purl.is_empty() {
                self.purl_aliases
                    .entry(variation.full_name().to_lowercase())
                    .or_insert_with(|| package.purl.clone());
            }
            aliases.insert(variation.alias_key());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.package_aliases.is_empty()
    }
}
