//! CLI commands

pub mod check;
pub mod completions;
pub mod config;
pub mod show;

use anyhow::{Context, Result};
use clap::Subcommand;
use gethooks_core::{FilterConfig, FilterLists, WindowsHookTable};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::args::ListArgs;

/// CLI commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the filter lists and print them
    Show(show::ShowArgs),

    /// Check whether a hook, program or desktop would be reported
    Check(check::CheckArgs),

    /// Configuration management
    Config(config::ConfigArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Build the filter lists from the config file (if any) plus CLI entries
pub fn load_lists(config: Option<&Path>, lists: &ListArgs) -> Result<FilterLists> {
    let mut filter_config = match config.map(Path::to_path_buf).or_else(find_config_file) {
        Some(path) => {
            info!("Loading filter lists from {}", path.display());
            FilterConfig::load(&path)
                .with_context(|| format!("Failed to load config from {:?}", path))?
        }
        None => {
            debug!("No config file found, using command-line lists only");
            FilterConfig::default()
        }
    };

    filter_config.merge(lists.to_filters());

    FilterLists::from_config(&filter_config, &WindowsHookTable)
        .context("Failed to build filter lists")
}

/// Config file search order: current directory, then the user config directory
pub fn config_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from("gethooks.toml")];
    if let Some(dirs) = directories::ProjectDirs::from("", "", "gethooks") {
        candidates.push(dirs.config_dir().join("config.toml"));
    }
    candidates
}

fn find_config_file() -> Option<PathBuf> {
    config_candidates().into_iter().find(|path| path.exists())
}
