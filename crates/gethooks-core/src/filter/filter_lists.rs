//! The set of user-specified list stores

use tracing::{debug, error, info};

use crate::config::{Entry, FilterConfig};
use crate::error::{Error, Result};
use crate::hooks::HookDirectory;
use crate::list::{create_store_in, destroy_store_in, ListKind, ListStore};

/// Whether an entity should be reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Report on this entity
    Report,
    /// Ignore this entity
    Ignore,
}

/// One optional store per list kind
///
/// A slot is empty when the user gave no entries for that kind.
#[derive(Debug, Default)]
pub struct FilterLists {
    desktop_include: Option<ListStore>,
    hook_include: Option<ListStore>,
    hook_exclude: Option<ListStore>,
    program_include: Option<ListStore>,
    program_exclude: Option<ListStore>,
}

impl FilterLists {
    /// Create with every slot empty
    pub fn new() -> Self {
        Self::default()
    }

    /// Build every list named in the configuration
    ///
    /// # Errors
    ///
    /// Fails if the configuration does not validate, if a hook name has no
    /// known id, or if an entry breaks its list's preconditions.
    pub fn from_config(config: &FilterConfig, directory: &dyn HookDirectory) -> Result<Self> {
        config.validate()?;

        let f = &config.filters;
        let mut lists = Self::new();
        lists.add_entries(ListKind::IncludeDesktop, &f.desktops, directory)?;
        lists.add_entries(ListKind::IncludeHook, &f.include_hooks, directory)?;
        lists.add_entries(ListKind::ExcludeHook, &f.exclude_hooks, directory)?;
        lists.add_entries(ListKind::IncludeProgram, &f.include_programs, directory)?;
        lists.add_entries(ListKind::ExcludeProgram, &f.exclude_programs, directory)?;

        info!(
            stores = lists.stores().count(),
            items = lists.stores().map(ListStore::len).sum::<usize>(),
            "Filter lists built"
        );
        Ok(lists)
    }

    fn add_entries(
        &mut self,
        kind: ListKind,
        entries: &[Entry],
        directory: &dyn HookDirectory,
    ) -> Result<()> {
        if entries.is_empty() {
            return Ok(());
        }

        let store = create_store_in(self.slot_mut(kind)?, kind)?;
        for entry in entries {
            let (id, name) = entry.as_parts();
            if store.insert_with(directory, id, name)?.is_none() {
                error!(%kind, %entry, "Failed to add list entry");
                return Err(Error::UnresolvedHook {
                    name: entry.to_string(),
                });
            }
        }
        debug!(%kind, items = store.len(), "List store populated");
        Ok(())
    }

    fn slot_mut(&mut self, kind: ListKind) -> Result<&mut Option<ListStore>> {
        match kind {
            ListKind::IncludeDesktop => Ok(&mut self.desktop_include),
            ListKind::IncludeHook => Ok(&mut self.hook_include),
            ListKind::ExcludeHook => Ok(&mut self.hook_exclude),
            ListKind::IncludeProgram => Ok(&mut self.program_include),
            ListKind::ExcludeProgram => Ok(&mut self.program_exclude),
            ListKind::Invalid => Err(Error::InvalidKind { kind }),
        }
    }

    /// The store for a kind, if one was built
    pub fn store(&self, kind: ListKind) -> Option<&ListStore> {
        match kind {
            ListKind::IncludeDesktop => self.desktop_include.as_ref(),
            ListKind::IncludeHook => self.hook_include.as_ref(),
            ListKind::ExcludeHook => self.hook_exclude.as_ref(),
            ListKind::IncludeProgram => self.program_include.as_ref(),
            ListKind::ExcludeProgram => self.program_exclude.as_ref(),
            ListKind::Invalid => None,
        }
    }

    /// Every store that was built, in kind order
    pub fn stores(&self) -> impl Iterator<Item = &ListStore> {
        ListKind::ALL.into_iter().filter_map(|kind| self.store(kind))
    }

    /// Check if no list was given at all
    pub fn is_empty(&self) -> bool {
        self.stores().next().is_none()
    }

    // Matching goes through the store's own policy, so a check agrees
    // with what an insertion would have deduplicated against.
    fn listed(&self, kind: ListKind, id: Option<i32>, name: Option<&str>) -> bool {
        self.store(kind)
            .is_some_and(|s| matches!(s.find(id, name), Ok(Some(_))))
    }

    /// Decide whether a hook id is reported
    pub fn check_hook(&self, id: i32) -> Verdict {
        Self::decide(
            self.hook_include.is_some(),
            self.listed(ListKind::IncludeHook, Some(id), None),
            self.listed(ListKind::ExcludeHook, Some(id), None),
        )
    }

    /// Decide whether a running program is reported
    ///
    /// A program matches a list item by name (case-insensitive) or, for
    /// items given by process id, by pid. A pid of `None` means the caller
    /// does not know it and never matches a pid item.
    pub fn check_program(&self, pid: Option<i32>, name: Option<&str>) -> Verdict {
        let listed = |kind| {
            name.is_some_and(|n| self.listed(kind, None, Some(n)))
                || pid.is_some_and(|p| self.listed(kind, Some(p), None))
        };
        Self::decide(
            self.program_include.is_some(),
            listed(ListKind::IncludeProgram),
            listed(ListKind::ExcludeProgram),
        )
    }

    /// Decide whether a desktop is reported
    pub fn check_desktop(&self, name: &str) -> Verdict {
        Self::decide(
            self.desktop_include.is_some(),
            self.listed(ListKind::IncludeDesktop, None, Some(name)),
            false,
        )
    }

    fn decide(has_include: bool, included: bool, excluded: bool) -> Verdict {
        if (has_include && !included) || excluded {
            Verdict::Ignore
        } else {
            Verdict::Report
        }
    }

    /// Destroy every store and leave all slots empty
    pub fn clear(&mut self) {
        destroy_store_in(&mut self.desktop_include);
        destroy_store_in(&mut self.hook_include);
        destroy_store_in(&mut self.hook_exclude);
        destroy_store_in(&mut self.program_include);
        destroy_store_in(&mut self.program_exclude);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FiltersConfig;
    use crate::hooks::WindowsHookTable;

    fn build(filters: FiltersConfig) -> Result<FilterLists> {
        FilterLists::from_config(&FilterConfig { filters }, &WindowsHookTable)
    }

    #[test]
    fn test_empty_config_reports_everything() {
        let lists = build(FiltersConfig::default()).unwrap();
        assert!(lists.is_empty());
        assert_eq!(lists.check_hook(2), Verdict::Report);
        assert_eq!(lists.check_program(Some(1), Some("a.exe")), Verdict::Report);
        assert_eq!(lists.check_desktop("Default"), Verdict::Report);
    }

    #[test]
    fn test_hook_include_restricts() {
        let lists = build(FiltersConfig {
            include_hooks: vec![Entry::Name("WH_KEYBOARD".into()), Entry::Id(2)],
            ..FiltersConfig::default()
        })
        .unwrap();

        let store = lists.store(ListKind::IncludeHook).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(lists.check_hook(2), Verdict::Report);
        assert_eq!(lists.check_hook(7), Verdict::Ignore);
    }

    #[test]
    fn test_program_exclude() {
        let lists = build(FiltersConfig {
            exclude_programs: vec![Entry::Name("Explorer.EXE".into()), Entry::Id(4120)],
            ..FiltersConfig::default()
        })
        .unwrap();

        assert_eq!(lists.check_program(Some(1), Some("explorer.exe")), Verdict::Ignore);
        assert_eq!(lists.check_program(Some(4120), Some("other.exe")), Verdict::Ignore);
        assert_eq!(lists.check_program(Some(77), Some("other.exe")), Verdict::Report);
        assert_eq!(lists.check_program(None, None), Verdict::Report);
    }

    #[test]
    fn test_unknown_pid_never_matches_pid_item() {
        let lists = build(FiltersConfig {
            exclude_programs: vec![Entry::Id(0)],
            ..FiltersConfig::default()
        })
        .unwrap();

        assert_eq!(lists.check_program(None, Some("notepad.exe")), Verdict::Report);
        assert_eq!(lists.check_program(Some(0), Some("notepad.exe")), Verdict::Ignore);
    }

    #[test]
    fn test_named_program_never_matches_by_pid() {
        let lists = build(FiltersConfig {
            include_programs: vec![Entry::Name("svc.exe".into())],
            ..FiltersConfig::default()
        })
        .unwrap();

        // The named item is stored with id 0; pid 0 alone must not select it.
        assert_eq!(lists.check_program(Some(0), None), Verdict::Ignore);
        assert_eq!(lists.check_program(Some(0), Some("SVC.EXE")), Verdict::Report);
    }

    #[test]
    fn test_desktop_include() {
        let lists = build(FiltersConfig {
            desktops: vec![Entry::Name("Default".into())],
            ..FiltersConfig::default()
        })
        .unwrap();

        assert_eq!(lists.check_desktop("default"), Verdict::Report);
        assert_eq!(lists.check_desktop("Winlogon"), Verdict::Ignore);
    }

    #[test]
    fn test_unknown_hook_name_fails_build() {
        let err = build(FiltersConfig {
            exclude_hooks: vec![Entry::Name("WH_NOT_A_HOOK".into())],
            ..FiltersConfig::default()
        })
        .unwrap_err();
        assert!(matches!(err, Error::UnresolvedHook { name } if name == "WH_NOT_A_HOOK"));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut lists = build(FiltersConfig {
            include_hooks: vec![Entry::Id(13)],
            desktops: vec![Entry::Name("Default".into())],
            ..FiltersConfig::default()
        })
        .unwrap();
        assert_eq!(lists.stores().count(), 2);

        lists.clear();
        assert!(lists.is_empty());
        lists.clear();
        assert!(lists.is_empty());
    }
}
