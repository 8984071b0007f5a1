//! Command-line argument parsing

use clap::{Parser, ValueEnum};
use gethooks_core::config::{Entry, FiltersConfig};
use std::path::PathBuf;

use crate::commands::Command;

/// GetHooks - filter lists for the window hook monitor
///
/// Builds the user-specified lists of hooks, programs and desktops to
/// include or exclude, and shows or queries them.
#[derive(Parser, Debug)]
#[command(name = "gethooks")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Subcommand to execute (default: show)
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output format for logs
    #[arg(long, value_enum, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Log file path
    #[arg(long, value_name = "FILE", global = true)]
    pub log_file: Option<String>,

    /// Run in quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Log output format
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormat {
    /// Human-readable text
    Text,
    /// JSON format
    Json,
    /// Compact format
    Compact,
}

/// List entries given on the command line
///
/// Hooks and programs given as integers are ids; anything else is a name.
#[derive(clap::Args, Debug, Default, Clone)]
pub struct ListArgs {
    /// Desktop to include (repeatable, comma separated)
    #[arg(short = 'd', long = "desktop", value_name = "NAME", value_delimiter = ',')]
    pub desktops: Vec<String>,

    /// Hook id or name to include
    #[arg(short = 'i', long = "include-hook", value_name = "HOOK", value_delimiter = ',')]
    pub include_hooks: Vec<String>,

    /// Hook id or name to exclude
    #[arg(
        short = 'x',
        long = "exclude-hook",
        value_name = "HOOK",
        value_delimiter = ',',
        conflicts_with = "include_hooks"
    )]
    pub exclude_hooks: Vec<String>,

    /// Program name or process id to include
    #[arg(short = 'p', long = "include-prog", value_name = "PROG", value_delimiter = ',')]
    pub include_programs: Vec<String>,

    /// Program name or process id to exclude
    #[arg(
        short = 'r',
        long = "exclude-prog",
        value_name = "PROG",
        value_delimiter = ',',
        conflicts_with = "include_programs"
    )]
    pub exclude_programs: Vec<String>,
}

impl ListArgs {
    /// Convert to configuration entries
    pub fn to_filters(&self) -> FiltersConfig {
        let parse =
            |values: &[String]| -> Vec<Entry> { values.iter().map(|v| Entry::parse(v)).collect() };
        FiltersConfig {
            // A desktop is always a name, even when it looks numeric.
            desktops: self
                .desktops
                .iter()
                .map(|d| Entry::Name(d.trim().to_string()))
                .collect(),
            include_hooks: parse(&self.include_hooks),
            exclude_hooks: parse(&self.exclude_hooks),
            include_programs: parse(&self.include_programs),
            exclude_programs: parse(&self.exclude_programs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Command;

    #[test]
    fn test_verbose() {
        let args = Args::parse_from(["gethooks", "-v"]);
        assert_eq!(args.verbose, 1);

        let args = Args::parse_from(["gethooks", "-vvv"]);
        assert_eq!(args.verbose, 3);
    }

    #[test]
    fn test_show_list_flags() {
        let args = Args::parse_from([
            "gethooks",
            "show",
            "-i",
            "WH_KEYBOARD,13",
            "-r",
            "explorer.exe",
            "-r",
            "4120",
            "-d",
            "Default",
        ]);
        let Some(Command::Show(show)) = args.command else {
            panic!("expected show command");
        };

        let filters = show.lists.to_filters();
        assert_eq!(
            filters.include_hooks,
            vec![Entry::Name("WH_KEYBOARD".into()), Entry::Id(13)]
        );
        assert_eq!(
            filters.exclude_programs,
            vec![Entry::Name("explorer.exe".into()), Entry::Id(4120)]
        );
        assert_eq!(filters.desktops, vec![Entry::Name("Default".into())]);
    }

    #[test]
    fn test_include_and_exclude_hooks_conflict() {
        let result = Args::try_parse_from(["gethooks", "show", "-i", "2", "-x", "3"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_numeric_desktop_stays_named() {
        let lists = ListArgs {
            desktops: vec!["1".into()],
            ..ListArgs::default()
        };
        assert_eq!(lists.to_filters().desktops, vec![Entry::Name("1".into())]);
    }
}
