//! Config commands (edit `~/.emozion/config.toml`).

use anyhow::{Context, Result};
use std::path::Path;

use emozion::config::Config;

/// Write a default config file
pub fn config_init_command(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        println!(
            "Config already exists at {} (use --force to overwrite)",
            config_path.display()
        );
        return Ok(());
    }

    Config::default().save_to_file(config_path)?;
    println!("Created {}", config_path.display());
    Ok(())
}

/// Print the current settings as TOML
pub fn config_show_command(config_path: &Path) -> Result<()> {
    let config = Config::load_from(config_path)?;
    let toml = toml::to_string_pretty(&config).context("Failed to serialize config")?;

    println!("# {}", config_path.display());
    print!("{}", toml);
    Ok(())
}

/// Change one setting and save
pub fn config_set_command(config_path: &Path, key: &str, value: &str) -> Result<()> {
    let mut config = Config::load_from(config_path)?;
    config.settings.set(key, value)?;
    config.save_to_file(config_path)?;

    println!("Set {} = {}", key, value);
    Ok(())
}
