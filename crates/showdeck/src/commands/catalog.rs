use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;

use crate::catalog::{Catalog, DEFAULT_DECK};
use crate::config::Config;

pub fn run(file: Option<PathBuf>, json: bool, dump_default: bool) -> Result<()> {
    if dump_default {
        print!("{DEFAULT_DECK}");
        return Ok(());
    }

    let config = Config::load_or_default();
    let (catalog, path) = crate::cli::load_catalog(file, &config)?;

    if json {
        let out =
            serde_json::to_string_pretty(&catalog).context("Failed to serialize catalog")?;
        println!("{out}");
        return Ok(());
    }

    let source = path
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "built-in deck".to_string());
    println!("{} {}", catalog.title().bold(), format!("({source})").dimmed());
    println!();
    for line in listing(&catalog) {
        println!("{line}");
    }

    let warnings = catalog.validate();
    if !warnings.is_empty() {
        println!();
        for warning in warnings {
            println!("{} {warning}", "warning:".yellow().bold());
        }
    }
    Ok(())
}

/// One line per slide: position, id, type and title.
fn listing(catalog: &Catalog) -> Vec<String> {
    catalog
        .slides
        .iter()
        .enumerate()
        .map(|(index, slide)| {
            format!(
                "  {:>2}  {:<6} {:<20} {}",
                (index + 1).to_string().bold(),
                format!("#{}", slide.id).dimmed(),
                slide.content.kind().cyan(),
                slide.title()
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_follows_catalog_order() {
        colored::control::set_override(false);
        let catalog = Catalog::embedded().unwrap();
        let lines = listing(&catalog);
        assert_eq!(lines.len(), 9);
        assert!(lines[0].contains("cover"));
        assert!(lines[8].contains("partnership"));
    }

    #[test]
    fn test_embedded_catalog_serializes_to_json() {
        let catalog = Catalog::embedded().unwrap();
        let json = serde_json::to_value(&catalog).unwrap();
        let slides = json["slides"].as_array().unwrap();
        assert_eq!(slides.len(), 9);
        assert_eq!(slides[0]["type"], "cover");
        assert!(slides[0]["bgGradient"].is_string());
    }
}
