//! Show command - print the filter lists

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use colored::Colorize;
use gethooks_core::print::{print_list_store, KindRenderer};
use gethooks_core::{FilterLists, ListStore};
use serde_json::json;
use std::io::{self, Write};
use std::path::Path;

use crate::args::ListArgs;

/// Show command arguments
#[derive(Args, Debug, Default)]
pub struct ShowArgs {
    #[command(flatten)]
    pub lists: ListArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// How the lists are printed
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Separated human-readable sections
    #[default]
    Text,
    /// One JSON document
    Json,
}

/// Execute show command
pub fn execute(args: ShowArgs, config: Option<&Path>) -> Result<()> {
    let mut lists = super::load_lists(config, &args.lists)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args.format {
        OutputFormat::Text => write_text(&mut out, &lists)?,
        OutputFormat::Json => write_json(&mut out, &lists)?,
    }
    out.flush().context("Failed to write output")?;

    lists.clear();
    Ok(())
}

fn write_text(out: &mut dyn Write, lists: &FilterLists) -> Result<()> {
    writeln!(out, "{}", "═".repeat(60).bright_blue())?;
    writeln!(out, "{}", " Filter Lists".bright_white().bold())?;
    writeln!(out, "{}", "═".repeat(60).bright_blue())?;

    if lists.is_empty() {
        writeln!(out, "{}", "  (no lists given, everything is reported)".dimmed())?;
        return Ok(());
    }

    for store in lists.stores() {
        print_list_store(out, Some(store), &KindRenderer).context("Failed to print list")?;
    }
    Ok(())
}

fn store_json(store: &ListStore) -> serde_json::Value {
    json!({
        "kind": store.kind(),
        "created_at": store.created_at().to_rfc3339(),
        "items": store.iter().collect::<Vec<_>>(),
    })
}

fn write_json(out: &mut dyn Write, lists: &FilterLists) -> Result<()> {
    let stores: Vec<_> = lists.stores().map(store_json).collect();
    serde_json::to_writer_pretty(&mut *out, &json!({ "lists": stores }))
        .context("Failed to serialize lists")?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gethooks_core::ListKind;

    #[test]
    fn test_store_json_shape() {
        let mut store = ListStore::new(ListKind::ExcludeProgram);
        store.insert(None, Some("notepad.exe")).unwrap();
        store.insert(Some(1234), None).unwrap();

        let value = store_json(&store);
        assert_eq!(value["kind"], "exclude_program");
        assert_eq!(value["items"][0]["name"], "notepad.exe");
        assert_eq!(value["items"][1]["id"], 1234);
        assert!(value["items"][1]["name"].is_null());
    }

    #[test]
    fn test_text_output_for_empty_lists() {
        colored::control::set_override(false);
        let mut out = Vec::new();
        write_text(&mut out, &FilterLists::new()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("everything is reported"));
    }
}
