use super::variations::AliasSets;

/// Language ecosystem selected from the purl prefix.
///
/// Each variant owns the alias rules specific to its registry. Purls that
/// fail to parse still select an ecosystem, since only the prefix is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ecosystem {
    Pypi,
    Npm,
    Crates,
    Composer,
    Nuget,
    Gem,
    Hex,
    Pub,
    Github,
    Golang,
    Other,
}

const PURL_PREFIXES: [(&str, Ecosystem); 13] = [
    ("pkg:pypi", Ecosystem::Pypi),
    ("pkg:npm", Ecosystem::Npm),
    ("pkg:crates", Ecosystem::Crates),
    ("pkg:composer", Ecosystem::Composer),
    ("pkg:nuget", Ecosystem::Nuget),
    ("pkg:gem", Ecosystem::Gem),
    ("pkg:rubygems", Ecosystem::Gem),
    ("pkg:hex", Ecosystem::Hex),
    ("pkg:elixir", Ecosystem::Hex),
    ("pkg:pub", Ecosystem::Pub),
    ("pkg:dart", Ecosystem::Pub),
    ("pkg:github", Ecosystem::Github),
    ("pkg:golang", Ecosystem::Golang),
];

/// Top-level Go standard library packages that third-party modules shadow.
const GO_STDLIB_ROOTS: [&str; 4] = ["net", "crypto", "http", "text"];

impl Ecosystem {
    pub fn from_purl(purl: &str) -> Self {
        PURL_PREFIXES
            .iter()
            .find(|(prefix, _)| purl.starts_with(prefix))
            .map(|(_, ecosystem)| *ecosystem)
            .unwrap_or(Ecosystem::Other)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Ecosystem::Pypi => "pypi",
            Ecosystem::Npm => "npm",
            Ecosystem::Crates => "crates",
            Ecosystem::Composer => "composer",
            Ecosystem::Nuget => "nuget",
            Ecosystem::Gem => "gem",
            Ecosystem::Hex => "hex",
            Ecosystem::Pub => "pub",
            Ecosystem::Github => "github",
            Ecosystem::Golang => "golang",
            Ecosystem::Other => "other",
        }
    }

    /// Vendor aliases that apply before the generic language rules.
    pub(crate) fn add_registry_vendors(
        &self,
        name: &str,
        vendor: Option<&str>,
        aliases: &mut AliasSets,
    ) {
        match self {
            // Advisories for these registries are often filed with vendor == name
            Ecosystem::Pypi | Ecosystem::Composer => aliases.add_vendor(name),
            Ecosystem::Golang => {
                let vendor_is_golang = vendor.is_some_and(|v| v.contains("golang"));
                if !name.starts_with("go")
                    && !vendor_is_golang
                    && !GO_STDLIB_ROOTS.contains(&name)
                {
                    aliases.add_vendor("golang");
                }
            }
            _ => {}
        }
    }

    /// Registry naming conventions: prefixes, suffixes and dotted segments.
    pub(crate) fn add_ecosystem_aliases(
        &self,
        name: &str,
        vendor: Option<&str>,
        aliases: &mut AliasSets,
    ) {
        match self {
            Ecosystem::Pypi => {
                if !name.starts_with("python-") {
                    aliases.add_name(format!("python-{}", name));
                    aliases.add_name(format!("python-{}_project", name));
                }
                aliases.add_vendor("pip");
                aliases.add_vendor("python");
                aliases.add_vendor(format!("python-{}", name));
                aliases.add_vendor(format!("{}project", name));
            }
            Ecosystem::Npm => {
                if !name.starts_with("node-") {
                    aliases.add_name(format!("node-{}", name));
                }
                // pg-promise advisories are filed under pg
                if name.ends_with("-promise") {
                    aliases.add_name(name.replace("-promise", ""));
                }
            }
            Ecosystem::Crates => {
                if !name.starts_with("rust-") {
                    aliases.add_name(format!("rust-{}", name));
                }
            }
            Ecosystem::Composer => {
                if !name.starts_with("php-") {
                    aliases.add_name(format!("php-{}", name));
                }
            }
            Ecosystem::Nuget => {
                aliases.add_vendor("nuget");
                if let Some(first) = name.split('.').next() {
                    aliases.add_vendor(first);
                    aliases.add_vendor(first.to_lowercase());
                }
                if let Some(last) = name.rsplit('.').next() {
                    // Must not match Microsoft Windows itself
                    if !last.to_lowercase().contains("windows") {
                        aliases.add_name(last);
                        aliases.add_name(last.to_lowercase());
                    }
                }
                if name.to_lowercase().starts_with("system") {
                    aliases.add_vendor("microsoft");
                }
            }
            Ecosystem::Gem => {
                aliases.add_vendor("gem");
                aliases.add_vendor("rubygems");
                aliases.add_vendor("rubyonrails");
            }
            Ecosystem::Hex => {
                aliases.add_vendor("hex");
                aliases.add_vendor("elixir");
            }
            Ecosystem::Pub => {
                aliases.add_vendor("pub");
                aliases.add_vendor("dart");
            }
            Ecosystem::Github => {
                aliases.add_vendor("github actions");
                if let Some(vendor) = vendor {
                    aliases.add_name(format!("{}/{}", vendor, name));
                }
            }
            Ecosystem::Golang | Ecosystem::Other => {}
        }
    }
}

impl std::fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aliases_for(ecosystem: Ecosystem, name: &str, vendor: Option<&str>) -> AliasSets {
        let mut aliases = AliasSets::default();
        ecosystem.add_registry_vendors(name, vendor, &mut aliases);
        ecosystem.add_ecosystem_aliases(name, vendor, &mut aliases);
        aliases
    }

    #[test]
    fn test_from_purl() {
        assert_eq!(Ecosystem::from_purl("pkg:pypi/django@4.0"), Ecosystem::Pypi);
        assert_eq!(Ecosystem::from_purl("pkg:npm/%40babel/core"), Ecosystem::Npm);
        assert_eq!(Ecosystem::from_purl("pkg:rubygems/rails"), Ecosystem::Gem);
        assert_eq!(Ecosystem::from_purl("pkg:gem/rails"), Ecosystem::Gem);
        assert_eq!(Ecosystem::from_purl("pkg:elixir/phoenix"), Ecosystem::Hex);
        assert_eq!(Ecosystem::from_purl("pkg:dart/http"), Ecosystem::Pub);
        assert_eq!(Ecosystem::from_purl("pkg:golang/golang.org/x/net"), Ecosystem::Golang);
        assert_eq!(Ecosystem::from_purl("pkg:maven/org.apache/commons"), Ecosystem::Other);
        assert_eq!(Ecosystem::from_purl(""), Ecosystem::Other);
    }

    #[test]
    fn test_pypi_rules() {
        let aliases = aliases_for(Ecosystem::Pypi, "requests", None);
        for vendor in ["requests", "pip", "python", "python-requests", "requestsproject"] {
            assert!(aliases.vendors.contains(vendor), "missing vendor {vendor}");
        }
        assert!(aliases.names.contains("python-requests"));
        assert!(aliases.names.contains("python-requests_project"));
    }

    #[test]
    fn test_pypi_python_prefix_not_doubled() {
        let aliases = aliases_for(Ecosystem::Pypi, "python-ldap", None);
        assert!(!aliases.names.contains("python-python-ldap"));
    }

    #[test]
    fn test_npm_promise_suffix() {
        let aliases = aliases_for(Ecosystem::Npm, "pg-promise", None);
        assert!(aliases.names.contains("pg"));
        assert!(aliases.names.contains("node-pg-promise"));
        assert!(aliases.vendors.is_empty());
    }

    #[test]
    fn test_crates_and_composer_prefixes() {
        let crates = aliases_for(Ecosystem::Crates, "hyper", None);
        assert!(crates.names.contains("rust-hyper"));

        let already = aliases_for(Ecosystem::Crates, "rust-crypto", None);
        assert!(already.names.is_empty());

        let composer = aliases_for(Ecosystem::Composer, "guzzle", None);
        assert!(composer.names.contains("php-guzzle"));
        assert!(composer.vendors.contains("guzzle"));
    }

    #[test]
    fn test_nuget_segments() {
        let aliases = aliases_for(Ecosystem::Nuget, "System.Text.Json", None);
        assert!(aliases.vendors.contains("nuget"));
        assert!(aliases.vendors.contains("System"));
        assert!(aliases.vendors.contains("system"));
        assert!(aliases.vendors.contains("microsoft"));
        assert!(aliases.names.contains("Json"));
        assert!(aliases.names.contains("json"));
    }

    #[test]
    fn test_nuget_skips_windows_segment() {
        let aliases = aliases_for(Ecosystem::Nuget, "Microsoft.Windows.Compatibility.Windows", None);
        assert!(!aliases.names.contains("Windows"));
        assert!(!aliases.names.contains("windows"));
        assert!(aliases.vendors.contains("Microsoft"));
        assert!(aliases.vendors.contains("microsoft"));

        let aliases = aliases_for(Ecosystem::Nuget, "Acme.Windows", None);
        assert!(!aliases.names.contains("Windows"));
        assert!(aliases.vendors.contains("acme"));
        assert!(!aliases.vendors.contains("microsoft"));
    }

    #[test]
    fn test_golang_vendor() {
        let aliases = aliases_for(Ecosystem::Golang, "gin", Some("github.com/gin-gonic"));
        assert!(aliases.vendors.contains("golang"));

        for (name, vendor) in [
            ("gopkg", None),
            ("net", None),
            ("crypto", None),
            ("x", Some("golang.org")),
        ] {
            let aliases = aliases_for(Ecosystem::Golang, name, vendor);
            assert!(!aliases.vendors.contains("golang"), "{name} should not alias golang");
        }
    }

    #[test]
    fn test_registry_vendor_sets() {
        let gem = aliases_for(Ecosystem::Gem, "rails", None);
        assert!(gem.vendors.contains("rubyonrails"));

        let hex = aliases_for(Ecosystem::Hex, "phoenix", None);
        assert!(hex.vendors.contains("elixir"));

        let dart = aliases_for(Ecosystem::Pub, "http", None);
        assert!(dart.vendors.contains("dart"));
    }

    #[test]
    fn test_github_actions() {
        let aliases = aliases_for(Ecosystem::Github, "checkout", Some("actions"));
        assert!(aliases.names.contains("actions/checkout"));
        assert!(aliases.vendors.contains("github actions"));
    }
}
