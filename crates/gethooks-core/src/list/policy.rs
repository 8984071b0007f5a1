//! Per-kind matching policies
//!
//! Each list kind decides what counts as a duplicate and how the id and
//! name of a candidate are normalized before it is appended. The policy is
//! picked once when the store is created.

use tracing::{debug, error, warn};

use super::{ListItem, ListKind};
use crate::error::{Error, Result};
use crate::hooks::HookDirectory;

/// Outcome of running a candidate through a policy
#[derive(Debug)]
pub(crate) enum Resolution {
    /// An item already in the store matches; its position
    Existing(usize),
    /// No match; this item should be appended
    New(ListItem),
    /// The candidate could not be resolved (unknown hook name)
    Unresolved,
}

/// Match-and-insert capability shared by every list kind
pub(crate) trait MatchPolicy {
    /// Short name used in diagnostics
    fn name(&self) -> &'static str;

    /// Position of the item matching the candidate, if any. Never mutates.
    fn position(
        &self,
        items: &[ListItem],
        id: Option<i32>,
        name: Option<&str>,
        directory: &dyn HookDirectory,
    ) -> Result<Option<usize>>;

    /// Locate a duplicate or build the item to append
    fn resolve(
        &self,
        items: &[ListItem],
        id: Option<i32>,
        name: Option<&str>,
        directory: &dyn HookDirectory,
    ) -> Result<Resolution>;
}

/// Case-insensitive name comparison
pub(crate) fn names_match(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b) || a.to_lowercase() == b.to_lowercase()
}

fn position_by_name(items: &[ListItem], name: &str) -> Option<usize> {
    items
        .iter()
        .position(|item| item.name.as_deref().is_some_and(|n| names_match(n, name)))
}

/// Hooks: the numeric id is canonical, the name is an alias of it
#[derive(Debug, Clone, Copy)]
pub(crate) struct HookPolicy {
    kind: ListKind,
}

impl HookPolicy {
    fn position_by_id(items: &[ListItem], id: i32) -> Option<usize> {
        items.iter().position(|item| item.id == id)
    }
}

impl MatchPolicy for HookPolicy {
    fn name(&self) -> &'static str {
        "hook"
    }

    fn position(
        &self,
        items: &[ListItem],
        id: Option<i32>,
        name: Option<&str>,
        directory: &dyn HookDirectory,
    ) -> Result<Option<usize>> {
        let id = match (name, id) {
            (Some(name), _) => match directory.id_from_name(name) {
                Some(id) => id,
                None => return Ok(None),
            },
            (None, Some(id)) => id,
            (None, None) => return Err(Error::MissingIdentifier { kind: self.kind }),
        };
        Ok(Self::position_by_id(items, id))
    }

    fn resolve(
        &self,
        items: &[ListItem],
        id: Option<i32>,
        name: Option<&str>,
        directory: &dyn HookDirectory,
    ) -> Result<Resolution> {
        match (name, id) {
            (Some(name), _) => {
                let Some(id) = directory.id_from_name(name) else {
                    error!(hook = name, "Unknown id for hook name");
                    return Ok(Resolution::Unresolved);
                };
                if let Some(pos) = Self::position_by_id(items, id) {
                    warn!(id, "Hook id already in list");
                    return Ok(Resolution::Existing(pos));
                }
                Ok(Resolution::New(ListItem {
                    id,
                    name: Some(name.trim().to_owned()),
                }))
            }
            (None, Some(id)) => {
                // A hook id always maps to the same name, so a duplicate
                // needs no lookup at all.
                if let Some(pos) = Self::position_by_id(items, id) {
                    warn!(id, "Hook id already in list");
                    return Ok(Resolution::Existing(pos));
                }
                let name = directory.name_from_id(id);
                if name.is_none() {
                    warn!(id, "Unknown name for hook id");
                }
                Ok(Resolution::New(ListItem { id, name }))
            }
            (None, None) => Err(Error::MissingIdentifier { kind: self.kind }),
        }
    }
}

/// Programs: identified by either a name or a process id, never both
#[derive(Debug, Clone, Copy)]
pub(crate) struct ProgramPolicy {
    kind: ListKind,
}

impl ProgramPolicy {
    // An item with a name is identified by that name only.
    fn position_by_pid(items: &[ListItem], pid: i32) -> Option<usize> {
        items
            .iter()
            .position(|item| item.name.is_none() && item.id == pid)
    }
}

impl MatchPolicy for ProgramPolicy {
    fn name(&self) -> &'static str {
        "program"
    }

    fn position(
        &self,
        items: &[ListItem],
        id: Option<i32>,
        name: Option<&str>,
        _directory: &dyn HookDirectory,
    ) -> Result<Option<usize>> {
        match (name, id) {
            (Some(name), _) => Ok(position_by_name(items, name)),
            (None, Some(pid)) => Ok(Self::position_by_pid(items, pid)),
            (None, None) => Err(Error::MissingIdentifier { kind: self.kind }),
        }
    }

    fn resolve(
        &self,
        items: &[ListItem],
        id: Option<i32>,
        name: Option<&str>,
        _directory: &dyn HookDirectory,
    ) -> Result<Resolution> {
        match (name, id) {
            (Some(name), id) => {
                if let Some(pid) = id.filter(|pid| *pid != 0) {
                    debug!(pid, program = name, "Program given by name, ignoring id");
                }
                if let Some(pos) = position_by_name(items, name) {
                    warn!(program = name, "Program name already in list");
                    return Ok(Resolution::Existing(pos));
                }
                Ok(Resolution::New(ListItem {
                    id: 0,
                    name: Some(name.to_owned()),
                }))
            }
            (None, Some(pid)) => {
                if let Some(pos) = Self::position_by_pid(items, pid) {
                    warn!(pid, "Program id already in list");
                    return Ok(Resolution::Existing(pos));
                }
                Ok(Resolution::New(ListItem { id: pid, name: None }))
            }
            (None, None) => Err(Error::MissingIdentifier { kind: self.kind }),
        }
    }
}

/// Desktops: name only, no numeric identity
#[derive(Debug, Clone, Copy)]
pub(crate) struct DesktopPolicy;

impl DesktopPolicy {
    fn check<'a>(id: Option<i32>, name: Option<&'a str>) -> Result<&'a str> {
        let name = name.ok_or(Error::DesktopNameRequired)?;
        match id {
            Some(id) if id != 0 => Err(Error::DesktopIdNotAllowed {
                id,
                name: name.to_owned(),
            }),
            _ => Ok(name),
        }
    }
}

impl MatchPolicy for DesktopPolicy {
    fn name(&self) -> &'static str {
        "desktop"
    }

    fn position(
        &self,
        items: &[ListItem],
        id: Option<i32>,
        name: Option<&str>,
        _directory: &dyn HookDirectory,
    ) -> Result<Option<usize>> {
        let name = Self::check(id, name)?;
        Ok(position_by_name(items, name))
    }

    fn resolve(
        &self,
        items: &[ListItem],
        id: Option<i32>,
        name: Option<&str>,
        _directory: &dyn HookDirectory,
    ) -> Result<Resolution> {
        let name = Self::check(id, name)?;
        if let Some(pos) = position_by_name(items, name) {
            warn!(desktop = name, "Desktop name already in list");
            return Ok(Resolution::Existing(pos));
        }
        Ok(Resolution::New(ListItem {
            id: 0,
            name: Some(name.to_owned()),
        }))
    }
}

/// The policy a store was created with
#[derive(Debug, Clone, Copy)]
pub(crate) enum Policy {
    /// Kind never set; every insertion is refused
    Unset,
    Hook(HookPolicy),
    Program(ProgramPolicy),
    Desktop(DesktopPolicy),
}

impl Policy {
    pub(crate) fn for_kind(kind: ListKind) -> Self {
        match kind {
            ListKind::Invalid => Policy::Unset,
            ListKind::IncludeDesktop => Policy::Desktop(DesktopPolicy),
            ListKind::IncludeHook | ListKind::ExcludeHook => Policy::Hook(HookPolicy { kind }),
            ListKind::IncludeProgram | ListKind::ExcludeProgram => {
                Policy::Program(ProgramPolicy { kind })
            }
        }
    }

    /// The active policy, or the fatal error for an unset kind
    pub(crate) fn active(&self, kind: ListKind) -> Result<&dyn MatchPolicy> {
        match self {
            Policy::Unset => {
                error!(%kind, "Unknown list kind");
                Err(Error::InvalidKind { kind })
            }
            Policy::Hook(p) => Ok(p),
            Policy::Program(p) => Ok(p),
            Policy::Desktop(p) => Ok(p),
        }
    }
}
