mod cli;
mod json;

pub use cli::{print_mapping_table, print_results_table, print_variations_table};
pub use json::print_json;

use crate::model::{PackageIdentity, VulnerabilityResult};
use anyhow::Result;
use indexmap::IndexMap;

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable table format
    Table,
    /// JSON format for programmatic use
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use 'table' or 'json'", s)),
        }
    }
}

pub fn print_variations(variations: &[PackageIdentity], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => print_variations_table(variations),
        OutputFormat::Json => print_json(variations),
    }
}

/// Prints a string-to-string table such as a dealias table or fix suggestions.
pub fn print_mapping(
    mapping: &IndexMap<String, String>,
    headers: (&str, &str),
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Table => print_mapping_table(mapping, headers),
        OutputFormat::Json => print_json(mapping),
    }
}

pub fn print_results(results: &[&VulnerabilityResult], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => print_results_table(results),
        OutputFormat::Json => print_json(results),
    }
}
