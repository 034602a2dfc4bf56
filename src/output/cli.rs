use crate::model::{PackageIdentity, VulnerabilityRecord, VulnerabilityResult};
use anyhow::Result;
use indexmap::IndexMap;
use tabled::{builder::Builder, settings::Style, Table, Tabled};

#[derive(Tabled)]
struct VariationRow {
    #[tabled(rename = "Vendor")]
    vendor: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Purl")]
    purl: String,
}

#[derive(Tabled)]
struct ResultRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Package")]
    package: String,
    #[tabled(rename = "Type")]
    package_type: String,
    #[tabled(rename = "Fixed In")]
    fixed_in: String,
}

pub fn print_variations_table(variations: &[PackageIdentity]) -> Result<()> {
    if variations.is_empty() {
        println!("No variations generated.");
        return Ok(());
    }

    println!("Generated {} variations:", variations.len());
    println!();

    let rows: Vec<VariationRow> = variations
        .iter()
        .map(|v| VariationRow {
            vendor: dash_if_empty(v.vendor().unwrap_or_default()),
            name: truncate(&v.name, 50),
            purl: dash_if_empty(&truncate(&v.purl, 60)),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{}", table);
    Ok(())
}

pub fn print_mapping_table(mapping: &IndexMap<String, String>, headers: (&str, &str)) -> Result<()> {
    if mapping.is_empty() {
        println!("No entries.");
        return Ok(());
    }

    let mut builder = Builder::default();
    builder.push_record([headers.0.to_string(), headers.1.to_string()]);
    for (key, value) in mapping {
        builder.push_record([truncate(key, 60), truncate(value, 60)]);
    }

    let table = builder.build().with(Style::rounded()).to_string();
    println!("{}", table);
    Ok(())
}

pub fn print_results_table(results: &[&VulnerabilityResult]) -> Result<()> {
    if results.is_empty() {
        println!("No results left after dedup.");
        return Ok(());
    }

    println!("Kept {} results:", results.len());
    println!();

    let rows: Vec<ResultRow> = results
        .iter()
        .map(|r| ResultRow {
            id: r.id.clone(),
            package: truncate(&r.full_package(), 50),
            package_type: dash_if_empty(r.package_type().unwrap_or_default()),
            fixed_in: dash_if_empty(r.fixed_location().unwrap_or_default()),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{}", table);
    Ok(())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}

fn dash_if_empty(s: &str) -> String {
    if s.is_empty() {
        "-".to_string()
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("org.springframework:spring-core", 10), "org.spr...");
        assert_eq!(truncate("ünïcödé-name", 8), "ünïcö...");
    }

    #[test]
    fn test_dash_if_empty() {
        assert_eq!(dash_if_empty(""), "-");
        assert_eq!(dash_if_empty("npm"), "npm");
    }
}
