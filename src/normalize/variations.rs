use indexmap::IndexSet;
use tracing::{debug, trace};

use super::ecosystem::Ecosystem;
use crate::config::NormalizeConfig;
use crate::model::PackageIdentity;
use crate::purl;

/// Suffixes that advisories usually drop from artifact names.
pub const COMMON_SUFFIXES: [&str; 20] = [
    "-core",
    ".core",
    "-client-core",
    "-classic",
    "-api",
    "-complete",
    "-full",
    "-all",
    "-ex",
    "-server",
    ".js",
    "-handler",
    "apache-",
    "-web",
    "-broker",
    "-netty",
    "-plugin",
    "-web-console",
    "-main",
    "-war",
];

const REVERSE_DOMAIN_PREFIXES: [&str; 4] = ["org.", "io.", "com.", "net."];

/// Candidate vendor and name strings for one package.
///
/// Both sets keep discovery order, so variations come out in the same
/// order for the same input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasSets {
    pub vendors: IndexSet<String>,
    pub names: IndexSet<String>,
}

impl AliasSets {
    pub(crate) fn add_vendor(&mut self, vendor: impl Into<String>) {
        let vendor = vendor.into();
        if !vendor.is_empty() {
            self.vendors.insert(vendor);
        }
    }

    pub(crate) fn add_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !name.is_empty() {
            self.names.insert(name);
        }
    }

    /// Number of variations [`AliasSets::variations`] produces.
    pub fn variation_count(&self) -> usize {
        if self.vendors.is_empty() {
            self.names.len()
        } else {
            self.vendors.len() * self.names.len()
        }
    }

    /// Every vendor × name combination as a copy of `identity`.
    ///
    /// Without vendor aliases, one copy per name with the vendor unchanged.
    pub fn variations(&self, identity: &PackageIdentity) -> Vec<PackageIdentity> {
        if self.vendors.is_empty() {
            return self
                .names
                .iter()
                .map(|name| identity.with_alias(None, name))
                .collect();
        }

        self.vendors
            .iter()
            .flat_map(|vendor| {
                self.names
                    .iter()
                    .map(move |name| identity.with_alias(Some(vendor), name))
            })
            .collect()
    }
}

/// Facts about the package taken from its purl.
#[derive(Debug, Default)]
struct PurlFacts {
    package_type: String,
    distro: Option<String>,
}

/// Builds the vendor and name alias sets for a package.
///
/// # Example
///
/// ```
/// use depalias::{generate_aliases, NormalizeConfig, PackageIdentity};
///
/// let package = PackageIdentity::new("spring-core")
///     .with_vendor("org.springframework")
///     .with_purl("pkg:maven/org.springframework/spring-core@5.3.0");
/// let aliases = generate_aliases(&package, &NormalizeConfig::default());
///
/// assert!(aliases.vendors.contains("springframework"));
/// assert!(aliases.names.contains("spring"));
/// ```
pub fn generate_aliases(identity: &PackageIdentity, config: &NormalizeConfig) -> AliasSets {
    let name = identity.name.as_str();
    let vendor = identity.vendor();
    let ecosystem = Ecosystem::from_purl(&identity.purl);
    let mut aliases = AliasSets::default();

    aliases.names.insert(name.to_string());
    aliases.add_name(name.to_lowercase());
    aliases.add_name(name.replace('-', "_"));

    let facts = read_purl(identity, &mut aliases);
    let os_package = config.is_os_type(&facts.package_type);

    if let Some(vendor) = vendor {
        aliases.add_vendor(vendor);
        aliases.add_vendor(vendor.to_lowercase());
        if let Some(short) = short_vendor(vendor, name) {
            aliases.add_vendor(short);
        }
    }

    ecosystem.add_registry_vendors(name, vendor, &mut aliases);

    if !os_package {
        aliases.add_name(format!("package_{}", name));
        if ecosystem != Ecosystem::Golang {
            aliases.add_vendor(format!("get{}", name));
            aliases.add_vendor(format!("{}_project", name));
        }
        apply_vendor_table(name, vendor, config, &mut aliases);
    }

    // Ubuntu names packages differently enough that this over-matches there
    if name.contains('/') {
        if let Some(distro) = facts.distro.as_deref() {
            if !distro.contains("ubuntu") {
                if let Some(last) = name.rsplit('/').next() {
                    aliases.add_name(last);
                }
            }
        }
    }

    ecosystem.add_ecosystem_aliases(name, vendor, &mut aliases);

    if os_package {
        add_os_aliases(name, &mut aliases);
    } else {
        strip_common_suffixes(name, &mut aliases);
        apply_package_table(name, config, &mut aliases);
    }

    debug!(
        package = %identity.full_name(),
        ecosystem = %ecosystem,
        vendors = aliases.vendors.len(),
        names = aliases.names.len(),
        "Generated package aliases"
    );

    aliases
}

/// Expands a package into every plausible advisory identity.
///
/// # Example
///
/// ```
/// use depalias::{generate_variations, NormalizeConfig, PackageIdentity};
///
/// let package = PackageIdentity::new("pg-promise").with_purl("pkg:npm/pg-promise@10.0.0");
/// let variations = generate_variations(&package, &NormalizeConfig::default());
///
/// assert!(variations.iter().any(|v| v.name == "pg"));
/// ```
pub fn generate_variations(
    identity: &PackageIdentity,
    config: &NormalizeConfig,
) -> Vec<PackageIdentity> {
    generate_aliases(identity, config).variations(identity)
}

fn read_purl(identity: &PackageIdentity, aliases: &mut AliasSets) -> PurlFacts {
    if identity.purl.is_empty() {
        return PurlFacts::default();
    }

    let name = identity.name.as_str();
    match purl::parse(&identity.purl) {
        Ok(parsed) => {
            if let Some(distro_name) = parsed.qualifier("distro_name") {
                aliases.add_name(format!("{}/{}", distro_name, name));
            }
            let distro = parsed.qualifier("distro").map(str::to_string);
            if let Some(distro) = distro.as_deref() {
                aliases.add_name(format!("{}/{}", distro, name));
            }
            PurlFacts {
                package_type: parsed.package_type,
                distro,
            }
        }
        Err(e) => {
            debug!(error = %e, "Falling back to colon split for vendor alias");
            if let Some(vendor) = purl::fallback_vendor(&identity.purl) {
                aliases.add_vendor(vendor);
            }
            PurlFacts::default()
        }
    }
}

/// `org.apache` becomes `apache`, unless the segment is short or is the name.
fn short_vendor<'a>(vendor: &'a str, name: &str) -> Option<&'a str> {
    if !REVERSE_DOMAIN_PREFIXES
        .iter()
        .any(|prefix| vendor.starts_with(prefix))
    {
        return None;
    }

    let segment = vendor.split('.').nth(1)?;
    (segment.chars().count() > 3 && segment != name).then_some(segment)
}

fn apply_vendor_table(
    name: &str,
    vendor: Option<&str>,
    config: &NormalizeConfig,
    aliases: &mut AliasSets,
) {
    for (key, value) in &config.vendor_alias {
        match vendor {
            Some(vendor) if vendor.starts_with(key.as_str()) || key.starts_with(vendor) => {
                trace!(vendor, key = %key, "Vendor alias table hit");
                aliases.add_vendor(key.as_str());
                aliases.add_vendor(value.as_str());
            }
            _ if name == key => aliases.add_vendor(value.as_str()),
            _ => {}
        }
    }
}

fn strip_common_suffixes(name: &str, aliases: &mut AliasSets) {
    for suffix in COMMON_SUFFIXES {
        if name.ends_with(suffix) {
            aliases.add_name(name.replace(suffix, ""));
        }
    }
}

fn apply_package_table(name: &str, config: &NormalizeConfig, aliases: &mut AliasSets) {
    for (key, value) in &config.package_alias {
        if name.starts_with(key.as_str()) || key.starts_with(name) || value.starts_with(name) {
            trace!(name, key = %key, "Package alias table hit");
            aliases.add_name(key.as_str());
            aliases.add_name(value.as_str());
        }
    }
}

fn add_os_aliases(name: &str, aliases: &mut AliasSets) {
    if name.contains("lib") {
        aliases.add_name(name.replace("lib", ""));
    } else {
        aliases.add_name(format!("lib{}", name));
    }
    if !name.contains("-bin") {
        aliases.add_name(format!("{}-bin", name));
    }
}
