use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;

use crate::core::Config;

fn target_path(matches: &clap::ArgMatches) -> Result<PathBuf> {
    match matches.get_one::<PathBuf>("config") {
        Some(path) => Ok(path.clone()),
        None => Config::get_config_path(),
    }
}

pub fn execute(matches: &clap::ArgMatches) -> Result<()> {
    let path = target_path(matches)?;

    if matches.get_flag("init") {
        return init_config(&path, matches.get_flag("force"));
    }

    show_config(&path)
}

/// Write a config file holding the defaults
fn init_config(path: &PathBuf, force: bool) -> Result<()> {
    if path.exists() && !force {
        println!(
            "{} {}",
            "Config already exists:".yellow(),
            path.display().to_string().white()
        );
        println!("{}", "Use --force to overwrite it with the defaults.".dimmed());
        return Ok(());
    }

    Config::default()
        .save_to(path)
        .with_context(|| format!("Failed to write {:?}", path))?;

    println!(
        "{} {}",
        "✓ Config written to".green(),
        path.display().to_string().white().bold()
    );
    Ok(())
}

/// Print the effective configuration as JSON
fn show_config(path: &PathBuf) -> Result<()> {
    let config = Config::load_from(path)?;
    let source = if path.exists() {
        path.display().to_string()
    } else {
        "built-in defaults".to_string()
    };

    println!("{} {}", "Source:".cyan(), source.white());
    println!(
        "{}",
        serde_json::to_string_pretty(&config).context("Failed to serialize config")?
    );
    Ok(())
}
