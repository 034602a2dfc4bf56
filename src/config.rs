//! Configuration file handling.
//!
//! This module provides loading and saving of depalias configuration from
//! a TOML file, including the alias and package-type tables the
//! normalisation layer is driven by.
//!
//! # Configuration Location
//!
//! The configuration file is stored at:
//! - Linux: `~/.config/depalias/config.toml`
//! - macOS: `~/Library/Application Support/depalias/config.toml`
//! - Windows: `%APPDATA%\depalias\config.toml`
//!
//! # Example Configuration
//!
//! ```toml
//! default_format = "table"
//!
//! [normalize]
//! os_pkg_types = ["deb", "apk", "rpm"]
//! exclude_version = "99.99.99"
//!
//! [normalize.lang_pkg_types]
//! python = "pypi"
//! javascript = "npm"
//!
//! [normalize.vendor_alias]
//! "org.springframework" = "pivotal"
//!
//! [normalize.package_alias]
//! "struts2-core" = "struts"
//! ```
//!
//! Tables given in the file replace the built-in table of the same name
//! entirely; omitted tables keep their defaults.

use anyhow::{Context, Result};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application configuration.
///
/// # Example
///
/// ```no_run
/// use depalias::Config;
///
/// // Load from file (or use defaults if file doesn't exist)
/// let config = Config::load().unwrap();
///
/// println!("Default format: {}", config.default_format);
/// println!("OS package types: {:?}", config.normalize.os_pkg_types);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default output format when no `--format` flag is provided.
    ///
    /// Valid values: "table", "json"
    /// Default: "table"
    pub default_format: String,

    /// Tables driving alias generation, dealiasing and dedup.
    pub normalize: NormalizeConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_format: "table".to_string(),
            normalize: NormalizeConfig::default(),
        }
    }
}

/// Read-only tables injected into the normalisation entry points.
///
/// Map iteration order is the order entries appear in the file (or in the
/// built-in defaults). The alias rules that scan these tables depend on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeConfig {
    /// Fixed-location marker meaning the finding does not apply.
    pub exclude_version: String,

    /// Fixed-location marker meaning no fix exists.
    pub fix_placeholder_version: String,

    /// Package types whose packages come from an OS distribution.
    pub os_pkg_types: IndexSet<String>,

    /// Package types the vulnerability database knows about.
    pub known_pkg_types: IndexSet<String>,

    /// Project type (e.g. `python`) to the package type its results must carry.
    pub lang_pkg_types: IndexMap<String, String>,

    /// Vendor prefix to the vendor name advisories use.
    pub vendor_alias: IndexMap<String, String>,

    /// Package name to the name advisories use.
    pub package_alias: IndexMap<String, String>,
}

impl NormalizeConfig {
    pub fn is_os_type(&self, package_type: &str) -> bool {
        self.os_pkg_types.contains(package_type)
    }

    pub fn is_known_type(&self, package_type: &str) -> bool {
        self.known_pkg_types.contains(package_type)
    }

    /// Package type results for `project_type` are expected to carry.
    pub fn expected_type(&self, project_type: &str) -> Option<&str> {
        self.lang_pkg_types
            .get(project_type)
            .map(String::as_str)
            .filter(|t| !t.is_empty())
    }
}

fn owned_set(items: &[&str]) -> IndexSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn owned_map(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            os_pkg_types: owned_set(&[
                "deb", "apk", "rpm", "swid", "alpm", "docker", "oci", "container", "generic",
                "qpkg", "buildroot", "coreos", "ebuild",
            ]),
            known_pkg_types: owned_set(&[
                "composer", "maven", "npm", "nuget", "pypi", "gem", "rubygems", "golang",
                "cargo", "crates", "pub", "hex", "github", "conan", "swift", "cocoapods",
                "hackage", "clojars", "deb", "apk", "rpm", "alpm", "ebuild", "generic",
            ]),
            lang_pkg_types: owned_map(&[
                ("python", "pypi"),
                ("java", "maven"),
                ("jar", "maven"),
                ("jvm", "maven"),
                ("groovy", "maven"),
                ("kotlin", "maven"),
                ("scala", "maven"),
                ("go", "golang"),
                ("golang", "golang"),
                ("javascript", "npm"),
                ("js", "npm"),
                ("nodejs", "npm"),
                ("typescript", "npm"),
                ("ts", "npm"),
                ("php", "composer"),
                ("ruby", "gem"),
                ("rust", "cargo"),
                ("dotnet", "nuget"),
                ("csharp", "nuget"),
                ("dart", "pub"),
                ("elixir", "hex"),
                ("github", "github"),
                ("cpp", "conan"),
                ("swift", "swift"),
                ("haskell", "hackage"),
                ("clojure", "clojars"),
            ]),
            vendor_alias: owned_map(&[
                ("org.apache.tomcat", "apache"),
                ("org.apache.solr", "apache"),
                ("org.apache.activemq", "apache"),
                ("org.apache.cxf", "apache"),
                ("org.apache.struts", "apache"),
                ("commons-io", "apache"),
                ("commons-collections", "apache"),
                ("io.undertow", "redhat"),
                ("io.vertx", "eclipse"),
                ("org.jboss", "redhat"),
                ("org.hibernate", "redhat"),
                ("org.springframework", "pivotal"),
                ("com.fasterxml.jackson.core", "fasterxml"),
                ("io.netty", "netty"),
                ("org.eclipse.jetty", "eclipse"),
                ("ch.qos.logback", "qos"),
            ]),
            package_alias: owned_map(&[
                ("struts2-core", "struts"),
                ("struts2-rest-plugin", "struts"),
                ("jackson-databind", "jackson"),
                ("tomcat-catalina", "tomcat"),
                ("tomcat-embed-core", "tomcat"),
                ("spring-core", "spring_framework"),
                ("spring-webmvc", "spring_framework"),
                ("spring-security-core", "spring_security"),
                ("log4j-core", "log4j"),
                ("mongodb-driver", "mongodb"),
                ("hibernate-validator", "hibernate_validator"),
                ("activemq-client", "activemq"),
                ("netty-codec-http", "netty"),
                ("jetty-server", "jetty"),
            ]),
            exclude_version: "99.99.99".to_string(),
            fix_placeholder_version: "99.99.9".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from the config file.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if !path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Loads configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Saves the configuration to the config file.
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Returns the path to the configuration file.
    ///
    /// # Example
    ///
    /// ```
    /// use depalias::Config;
    ///
    /// let path = Config::config_path();
    /// assert!(path.ends_with("depalias/config.toml"));
    /// ```
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("depalias")
            .join("config.toml")
    }

    /// Generates a string containing the default configuration.
    pub fn generate_default_config() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}
