//! Config command - configuration management

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use gethooks_core::config::{Entry, FilterConfig};
use gethooks_core::{FilterLists, WindowsHookTable};
use std::path::PathBuf;
use tracing::info;

/// Config command arguments
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Generate an example configuration file
    Generate {
        /// Output file path
        #[arg(short, long, default_value = "gethooks.toml")]
        output: PathBuf,
    },

    /// Validate a configuration file and build its lists
    Validate {
        /// Config file to validate
        file: PathBuf,
    },

    /// Show config file locations
    Paths,
}

/// Execute config command
pub fn execute(args: ConfigArgs) -> Result<()> {
    match args.action {
        ConfigAction::Generate { output } => generate_config(output),
        ConfigAction::Validate { file } => validate_config(file),
        ConfigAction::Paths => show_paths(),
    }
}

fn example_config() -> FilterConfig {
    let mut config = FilterConfig::default();
    let f = &mut config.filters;
    f.desktops.push(Entry::Name("Default".to_string()));
    f.include_hooks.push(Entry::Name("WH_KEYBOARD_LL".to_string()));
    f.include_hooks.push(Entry::Id(14));
    f.exclude_programs.push(Entry::Name("explorer.exe".to_string()));
    config
}

fn generate_config(output: PathBuf) -> Result<()> {
    let toml_str = example_config()
        .to_toml()
        .context("Failed to serialize config")?;

    let content = format!(
        "# GetHooks filter lists\n\
         # Integers are hook ids or process ids, strings are names.\n\
         # include_* and exclude_* of the same kind cannot both be set.\n\n\
         {}",
        toml_str
    );

    std::fs::write(&output, content)
        .with_context(|| format!("Failed to write config to {:?}", output))?;

    info!("Generated config file: {:?}", output);
    println!("Configuration file generated: {}", output.display());

    Ok(())
}

fn validate_config(file: PathBuf) -> Result<()> {
    let config = FilterConfig::load(&file)
        .with_context(|| format!("Failed to load config from {:?}", file))?;

    let mut lists = FilterLists::from_config(&config, &WindowsHookTable)
        .context("Configuration validation failed")?;

    println!("✓ Configuration is valid");
    for store in lists.stores() {
        println!("  {}: {} item(s)", store.kind(), store.len());
    }
    lists.clear();

    Ok(())
}

fn show_paths() -> Result<()> {
    println!("Configuration file search paths:");
    println!();
    for (n, path) in super::config_candidates().iter().enumerate() {
        println!("  {}. {}", n + 1, path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_config_builds() {
        let config = example_config();
        let lists = FilterLists::from_config(&config, &WindowsHookTable).unwrap();
        assert_eq!(lists.stores().count(), 3);
    }

    #[test]
    fn test_generate_then_validate() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gethooks.toml");
        generate_config(path.clone()).unwrap();
        validate_config(path).unwrap();
    }

    #[test]
    fn test_validate_rejects_unknown_hook() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[filters]\ninclude_hooks = [\"WH_BOGUS\"]\n").unwrap();
        assert!(validate_config(path).is_err());
    }
}
