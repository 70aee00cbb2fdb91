use anyhow::Result;
use colored::Colorize;

use crate::cli::ConfigCommands;
use crate::config::Config;

pub fn run(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => show(),
        ConfigCommands::Set { key, value } => set(&key, &value),
    }
}

fn show() -> Result<()> {
    let path = Config::path()?;
    let config = if path.exists() {
        Config::load_from(&path)?
    } else {
        Config::default()
    };

    println!("{} {}", "Config file:".bold(), path.display());
    if !path.exists() {
        println!("{}", "(not created yet, showing defaults)".dimmed());
    }
    println!();
    println!("  {:<40} {}", "defaults.windowed", config.windowed());
    println!(
        "  {:<40} {}",
        "defaults.start_slide",
        config.start_slide().unwrap_or(1)
    );
    println!(
        "  {:<40} {}",
        "defaults.catalog",
        config
            .catalog()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(built-in deck)".dimmed().to_string())
    );
    println!(
        "  {:<40} {}",
        "defaults.assets",
        config
            .assets()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(catalog directory)".dimmed().to_string())
    );
    println!(
        "  {:<40} {}",
        "images.timeout_secs",
        config.image_timeout().as_secs()
    );
    println!(
        "  {:<40} {}",
        "presentation.reset_modal_on_navigate",
        config.reset_modal_on_navigate()
    );
    Ok(())
}

fn set(key: &str, value: &str) -> Result<()> {
    let path = Config::path()?;
    let mut config = if path.exists() {
        Config::load_from(&path)?
    } else {
        Config::default()
    };
    config.set(key, value)?;
    let saved = config.save()?;
    log::debug!("Wrote {}", saved.display());
    println!("{} {key} = {value}", "Set".green().bold());
    Ok(())
}
