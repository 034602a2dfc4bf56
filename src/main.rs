use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use depalias::{
    config::Config,
    normalize::{dealias, dedup, generate_variations, AliasIndex},
    output::{print_json, print_mapping, print_results, print_variations, OutputFormat},
    suggest::suggest_version,
    PackageIdentity, VulnerabilityResult,
};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

mod exit_codes {
    pub const SUCCESS: u8 = 0;
    pub const ERROR: u8 = 1;
}

#[derive(Parser)]
#[command(name = "depalias")]
#[command(
    author,
    version,
    about = "Resolve package identities between manifests and vulnerability advisories"
)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides this)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the alias variations of a single package
    Variations {
        /// Package name
        #[arg(short, long)]
        name: String,

        /// Package vendor or namespace
        #[arg(long)]
        vendor: Option<String>,

        /// Package URL, e.g. pkg:npm/pg-promise@10.0.0
        #[arg(short, long)]
        purl: Option<String>,

        /// Output format (table, json)
        #[arg(short, long)]
        format: Option<String>,
    },

    /// Build an alias index from a JSON array of packages
    Index {
        /// JSON file with the scanned packages
        #[arg(long)]
        packages: PathBuf,

        /// Write the index to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Map the packages reported by results back to scanned identities
    Dealias {
        /// JSON file with vulnerability results
        #[arg(short, long)]
        results: PathBuf,

        #[command(flatten)]
        aliases: AliasArgs,

        /// Output format (table, json)
        #[arg(short, long)]
        format: Option<String>,
    },

    /// Drop excluded, mismatched and repeated results
    Dedup {
        /// Project type of the scan, e.g. python or java
        #[arg(short = 't', long)]
        project_type: String,

        /// JSON file with vulnerability results
        #[arg(short, long)]
        results: PathBuf,

        /// Output format (table, json)
        #[arg(short, long)]
        format: Option<String>,
    },

    /// Suggest one fix version per dealiased package
    Suggest {
        /// JSON file with vulnerability results
        #[arg(short, long)]
        results: PathBuf,

        #[command(flatten)]
        aliases: AliasArgs,

        /// Output format (table, json)
        #[arg(short, long)]
        format: Option<String>,
    },

    /// Show or create config file
    Config {
        /// Generate default config file
        #[arg(long)]
        init: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

#[derive(clap::Args)]
struct AliasArgs {
    /// Alias index JSON produced by `depalias index`
    #[arg(long, conflicts_with = "packages")]
    aliases: Option<PathBuf>,

    /// JSON array of scanned packages to build the alias index from
    #[arg(long)]
    packages: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(exit_codes::ERROR)
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<u8> {
    let config = Config::load().unwrap_or_else(|e| {
        tracing::warn!("Ignoring unreadable config: {:#}", e);
        Config::default()
    });

    match cli.command {
        Commands::Variations {
            name,
            vendor,
            purl,
            format,
        } => {
            let mut package = PackageIdentity::new(name);
            if let Some(vendor) = vendor {
                package = package.with_vendor(vendor);
            }
            if let Some(purl) = purl {
                package = package.with_purl(purl);
            }

            let variations = generate_variations(&package, &config.normalize);
            print_variations(&variations, output_format(format, &config)?)?;
        }
        Commands::Index { packages, output } => {
            let packages: Vec<PackageIdentity> = read_json(&packages)?;
            let index = AliasIndex::build(&packages, &config.normalize);

            match output {
                Some(path) => {
                    let json = serde_json::to_string_pretty(&index)?;
                    std::fs::write(&path, json)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!("Alias index written to: {}", path.display());
                }
                None => print_json(&index)?,
            }
        }
        Commands::Dealias {
            results,
            aliases,
            format,
        } => {
            let results: Vec<VulnerabilityResult> = read_json(&results)?;
            let index = load_alias_index(&aliases, &config)?;
            let table = dealias(&results, &index.package_aliases, &index.purl_aliases);
            print_mapping(&table, ("Reported", "Canonical"), output_format(format, &config)?)?;
        }
        Commands::Dedup {
            project_type,
            results,
            format,
        } => {
            let results: Vec<VulnerabilityResult> = read_json(&results)?;
            let kept = dedup(&project_type, &results, &config.normalize);
            print_results(&kept, output_format(format, &config)?)?;
        }
        Commands::Suggest {
            results,
            aliases,
            format,
        } => {
            let results: Vec<VulnerabilityResult> = read_json(&results)?;
            let index = load_alias_index(&aliases, &config)?;
            let table = dealias(&results, &index.package_aliases, &index.purl_aliases);
            let suggestions = suggest_version(&results, &table);
            print_mapping(&suggestions, ("Package", "Suggested Fix"), output_format(format, &config)?)?;
        }
        Commands::Config { init, path } => handle_config(init, path)?,
    }

    Ok(exit_codes::SUCCESS)
}

fn output_format(flag: Option<String>, config: &Config) -> Result<OutputFormat> {
    let format = flag.unwrap_or_else(|| config.default_format.clone());
    OutputFormat::from_str(&format).map_err(|e| anyhow::anyhow!(e))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Without alias data dealiasing is skipped, which an empty index achieves.
fn load_alias_index(args: &AliasArgs, config: &Config) -> Result<AliasIndex> {
    if let Some(path) = &args.aliases {
        return read_json(path);
    }
    if let Some(path) = &args.packages {
        let packages: Vec<PackageIdentity> = read_json(path)?;
        return Ok(AliasIndex::build(&packages, &config.normalize));
    }
    Ok(AliasIndex::default())
}

fn handle_config(init: bool, show_path: bool) -> Result<()> {
    let config_path = Config::config_path();

    if show_path {
        println!("{}", config_path.display());
        return Ok(());
    }

    if init {
        if config_path.exists() {
            println!("Config file already exists at: {}", config_path.display());
            return Ok(());
        }

        let config = Config::default();
        config.save()?;
        println!("Created config file at: {}", config_path.display());
        return Ok(());
    }

    // Show current config
    if config_path.exists() {
        let content = std::fs::read_to_string(&config_path)?;
        println!("Config file: {}", config_path.display());
        println!();
        println!("{}", content);
    } else {
        println!("No config file found.");
        println!("Run 'depalias config --init' to create one.");
        println!();
        println!("Default configuration:");
        println!("{}", Config::generate_default_config());
    }

    Ok(())
}
