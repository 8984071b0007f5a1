//! Check command - would an entity be reported?

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use colored::Colorize;
use gethooks_core::{Entry, FilterLists, HookDirectory, Verdict, WindowsHookTable};
use std::path::Path;

use crate::args::ListArgs;

/// Check command arguments
#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub lists: ListArgs,

    #[command(subcommand)]
    pub target: CheckTarget,
}

/// What to check
#[derive(Subcommand, Debug)]
pub enum CheckTarget {
    /// A hook, by id or name
    Hook {
        /// Hook id or name (e.g. 13 or WH_KEYBOARD_LL)
        hook: String,
    },

    /// A running program, by name and/or process id
    Program {
        /// Executable name
        name: Option<String>,

        /// Process id
        #[arg(long)]
        pid: Option<i32>,
    },

    /// A desktop, by name
    Desktop {
        /// Desktop name
        name: String,
    },
}

/// Execute check command
pub fn execute(args: CheckArgs, config: Option<&Path>) -> Result<()> {
    let lists = super::load_lists(config, &args.lists)?;
    let (subject, verdict) = evaluate(&lists, &args.target)?;

    println!("{}", "─".repeat(50).bright_black());
    println!("Subject: {}", subject.cyan());
    println!(
        "Result: {}",
        match verdict {
            Verdict::Report => "Report".green(),
            Verdict::Ignore => "Ignore".yellow(),
        }
    );
    println!("{}", "─".repeat(50).bright_black());

    Ok(())
}

fn evaluate(lists: &FilterLists, target: &CheckTarget) -> Result<(String, Verdict)> {
    match target {
        CheckTarget::Hook { hook } => {
            let table = WindowsHookTable;
            let id = match Entry::parse(hook) {
                Entry::Id(id) => id,
                Entry::Name(name) => match table.id_from_name(&name) {
                    Some(id) => id,
                    None => bail!("Unknown id for hook name: {name}"),
                },
            };
            let subject = match table.name_from_id(id) {
                Some(name) => format!("hook {id} ({name})"),
                None => format!("hook {id}"),
            };
            Ok((subject, lists.check_hook(id)))
        }
        CheckTarget::Program { name, pid } => {
            let subject = match (name, pid) {
                (Some(name), Some(pid)) => format!("program {name} (pid {pid})"),
                (Some(name), None) => format!("program {name}"),
                (None, Some(pid)) => format!("program pid {pid}"),
                (None, None) => bail!("Give a program name, --pid, or both"),
            };
            Ok((subject, lists.check_program(*pid, name.as_deref())))
        }
        CheckTarget::Desktop { name } => {
            Ok((format!("desktop {name}"), lists.check_desktop(name)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gethooks_core::config::{FilterConfig, FiltersConfig};

    fn lists(filters: FiltersConfig) -> FilterLists {
        FilterLists::from_config(&FilterConfig { filters }, &WindowsHookTable).unwrap()
    }

    #[test]
    fn test_hook_by_name_and_id() {
        let lists = lists(FiltersConfig {
            exclude_hooks: vec![Entry::Name("WH_MOUSE_LL".into())],
            ..FiltersConfig::default()
        });

        let (subject, verdict) =
            evaluate(&lists, &CheckTarget::Hook { hook: "14".into() }).unwrap();
        assert_eq!(subject, "hook 14 (WH_MOUSE_LL)");
        assert_eq!(verdict, Verdict::Ignore);

        let (_, verdict) =
            evaluate(&lists, &CheckTarget::Hook { hook: "wh_cbt".into() }).unwrap();
        assert_eq!(verdict, Verdict::Report);
    }

    #[test]
    fn test_unknown_hook_name_fails() {
        let lists = FilterLists::new();
        assert!(evaluate(&lists, &CheckTarget::Hook { hook: "WH_NOPE".into() }).is_err());
    }

    #[test]
    fn test_program_needs_identifier() {
        let lists = FilterLists::new();
        let target = CheckTarget::Program { name: None, pid: None };
        assert!(evaluate(&lists, &target).is_err());
    }

    #[test]
    fn test_program_include() {
        let lists = lists(FiltersConfig {
            include_programs: vec![Entry::Name("notepad.exe".into())],
            ..FiltersConfig::default()
        });

        let target = CheckTarget::Program {
            name: Some("NOTEPAD.EXE".into()),
            pid: Some(300),
        };
        assert_eq!(evaluate(&lists, &target).unwrap().1, Verdict::Report);

        let target = CheckTarget::Program { name: None, pid: Some(300) };
        assert_eq!(evaluate(&lists, &target).unwrap().1, Verdict::Ignore);
    }

    #[test]
    fn test_program_without_pid_skips_pid_items() {
        let lists = lists(FiltersConfig {
            exclude_programs: vec![Entry::Id(0)],
            ..FiltersConfig::default()
        });

        let target = CheckTarget::Program {
            name: Some("notepad.exe".into()),
            pid: None,
        };
        assert_eq!(evaluate(&lists, &target).unwrap().1, Verdict::Report);
    }
}
