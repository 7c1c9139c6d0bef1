//! `config` subcommands

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;

use crate::config::{Config, config_path};

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Write a config file with the default settings
    Init {
        /// Base URL of the holiday plans API
        #[arg(long)]
        api_url: Option<String>,
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
    /// Print the effective configuration
    Show,
}

/// `config_file` is the `--config` override, if any. `effective` resolves
/// the running configuration and is only called by `show`, so `init` can
/// replace a file that no longer parses.
pub fn handle_config_command(
    config_file: Option<PathBuf>,
    command: ConfigCommands,
    effective: impl FnOnce() -> Result<Config>,
) -> Result<()> {
    let path = config_file.unwrap_or_else(config_path);
    match command {
        ConfigCommands::Init { api_url, force } => {
            let mut fresh = Config::default();
            if let Some(url) = api_url {
                fresh.api.base_url = url;
            }
            fresh.write_to(&path, force)?;
            println!(
                "{} Wrote config to {}",
                "✓".green(),
                path.display().to_string().cyan()
            );
        }
        ConfigCommands::Show => {
            let config = effective()?;
            let status = if path.exists() { "" } else { " (not found, using defaults)" };
            println!("{} {}{}", "Config file:".bold(), path.display(), status.dimmed());
            println!("{} {}", "State database:".bold(), config.state_db_path().display());
            println!();
            let rendered = toml::to_string_pretty(&config).context("Failed to serialize config")?;
            println!("{}", rendered.trim_end());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;

    #[test]
    fn test_init_force_replaces_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api\nbase_url = ").unwrap();
        assert!(Config::load(Some(&path)).is_err());

        let init = ConfigCommands::Init {
            api_url: Some("https://hr.example.com".to_string()),
            force: true,
        };
        handle_config_command(Some(path.clone()), init, || bail!("config does not parse"))
            .unwrap();

        let written = Config::load(Some(&path)).unwrap();
        assert_eq!(written.api.base_url, "https://hr.example.com");
    }

    #[test]
    fn test_init_without_force_keeps_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api\nbase_url = ").unwrap();

        let init = ConfigCommands::Init {
            api_url: None,
            force: false,
        };
        let err = handle_config_command(Some(path.clone()), init, || Ok(Config::default()))
            .unwrap_err();
        assert!(err.to_string().contains("--force"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[api\nbase_url = ");
    }

    #[test]
    fn test_show_reports_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let result = handle_config_command(Some(path), ConfigCommands::Show, || {
            bail!("config does not parse")
        });
        assert!(result.is_err());
    }
}
