//! Typed list stores
//!
//! A [`ListStore`] holds user-specified ids and/or names of hooks, programs
//! or desktops. The store's [`ListKind`] is fixed at creation and selects
//! the matching policy that keeps the store free of duplicates:
//!
//! - **Hooks** - the numeric id is canonical; a name is resolved to its id
//!   and an id picks up its display name when one is known
//! - **Programs** - a program is given either by name (compared
//!   case-insensitively) or by process id, never both
//! - **Desktops** - name only, compared case-insensitively
//!
//! Items are kept in insertion order and are never removed or changed once
//! added.

mod policy;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::hooks::{HookDirectory, WindowsHookTable};
use policy::{Policy, Resolution};

/// Category of a list store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListKind {
    /// Kind not set; the store accepts nothing
    #[default]
    Invalid,
    /// Desktops to include
    IncludeDesktop,
    /// Hooks to include
    IncludeHook,
    /// Hooks to exclude
    ExcludeHook,
    /// Programs to include
    IncludeProgram,
    /// Programs to exclude
    ExcludeProgram,
}

impl ListKind {
    /// Every valid (settable) kind
    pub const ALL: [ListKind; 5] = [
        ListKind::IncludeDesktop,
        ListKind::IncludeHook,
        ListKind::ExcludeHook,
        ListKind::IncludeProgram,
        ListKind::ExcludeProgram,
    ];

    /// Stable upper-case label
    pub fn label(self) -> &'static str {
        match self {
            ListKind::Invalid => "LIST_INVALID_KIND",
            ListKind::IncludeDesktop => "LIST_INCLUDE_DESKTOP",
            ListKind::IncludeHook => "LIST_INCLUDE_HOOK",
            ListKind::ExcludeHook => "LIST_EXCLUDE_HOOK",
            ListKind::IncludeProgram => "LIST_INCLUDE_PROGRAM",
            ListKind::ExcludeProgram => "LIST_EXCLUDE_PROGRAM",
        }
    }

    /// Human-readable description
    pub fn description(self) -> &'static str {
        match self {
            ListKind::Invalid => "the user-specified list kind hasn't been set.",
            ListKind::IncludeDesktop => "user-specified list of desktops to include.",
            ListKind::IncludeHook => "user-specified list of hooks to include.",
            ListKind::ExcludeHook => "user-specified list of hooks to exclude.",
            ListKind::IncludeProgram => "user-specified list of programs to include.",
            ListKind::ExcludeProgram => "user-specified list of programs to exclude.",
        }
    }

    /// Whether listed entities are the only ones reported
    pub fn is_include(self) -> bool {
        matches!(
            self,
            ListKind::IncludeDesktop | ListKind::IncludeHook | ListKind::IncludeProgram
        )
    }
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<i32> for ListKind {
    type Error = Error;

    fn try_from(raw: i32) -> Result<Self> {
        match raw {
            0 => Ok(ListKind::Invalid),
            1 => Ok(ListKind::IncludeDesktop),
            2 => Ok(ListKind::IncludeHook),
            3 => Ok(ListKind::ExcludeHook),
            4 => Ok(ListKind::IncludeProgram),
            5 => Ok(ListKind::ExcludeProgram),
            _ => Err(Error::UnknownKind(raw)),
        }
    }
}

/// One entry of a list store
///
/// `id` is meaningful for hooks and for programs given by process id; it is
/// zero for desktops and for programs given by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListItem {
    pub(crate) id: i32,
    pub(crate) name: Option<String>,
}

impl ListItem {
    /// Numeric id
    pub fn id(&self) -> i32 {
        self.id
    }

    /// Owned name, if any
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl fmt::Display for ListItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => f.write_str(name),
            None => write!(f, "{}", self.id),
        }
    }
}

/// Stable handle to an item within its store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemId(usize);

/// What an insertion did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    /// A new item was appended
    Created(ItemId),
    /// A matching item was already present
    Existing(ItemId),
}

impl Insertion {
    /// The item that was created or found
    pub fn item(self) -> ItemId {
        match self {
            Insertion::Created(id) | Insertion::Existing(id) => id,
        }
    }

    /// Whether the store grew
    pub fn is_new(self) -> bool {
        matches!(self, Insertion::Created(_))
    }
}

/// Insertion-ordered, deduplicated list of ids and/or names
#[derive(Debug)]
pub struct ListStore {
    kind: ListKind,
    policy: Policy,
    created_at: DateTime<Local>,
    items: Vec<ListItem>,
}

impl ListStore {
    /// Create an empty store of the given kind
    ///
    /// A store created with [`ListKind::Invalid`] exists but refuses every
    /// insertion.
    pub fn new(kind: ListKind) -> Self {
        trace!(%kind, "Creating list store");
        Self {
            kind,
            policy: Policy::for_kind(kind),
            created_at: Local::now(),
            items: Vec::new(),
        }
    }

    /// Kind fixed at creation
    pub fn kind(&self) -> ListKind {
        self.kind
    }

    /// Time the store was created
    pub fn created_at(&self) -> DateTime<Local> {
        self.created_at
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if store is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// First item inserted
    pub fn head(&self) -> Option<&ListItem> {
        self.items.first()
    }

    /// Last item inserted
    pub fn tail(&self) -> Option<&ListItem> {
        self.items.last()
    }

    /// Item behind a handle returned by an insertion
    pub fn get(&self, id: ItemId) -> Option<&ListItem> {
        self.items.get(id.0)
    }

    /// Items in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, ListItem> {
        self.items.iter()
    }

    /// Insert using the built-in Windows hook table
    pub fn insert(&mut self, id: Option<i32>, name: Option<&str>) -> Result<Option<Insertion>> {
        self.insert_with(&WindowsHookTable, id, name)
    }

    /// Append an item unless a matching one is already present
    ///
    /// Returns `Ok(None)` when a hook name cannot be resolved to an id. That
    /// is logged and left to the caller; nothing is appended.
    ///
    /// # Errors
    ///
    /// Fails without touching the store when the kind is unset, when a
    /// desktop is given an id or no name, or when neither id nor name is
    /// given.
    pub fn insert_with(
        &mut self,
        directory: &dyn HookDirectory,
        id: Option<i32>,
        name: Option<&str>,
    ) -> Result<Option<Insertion>> {
        let policy = self.policy.active(self.kind)?;

        match policy.resolve(&self.items, id, name, directory)? {
            Resolution::Existing(pos) => Ok(Some(Insertion::Existing(ItemId(pos)))),
            Resolution::New(item) => {
                debug!(kind = %self.kind, policy = policy.name(), %item, "Appending list item");
                self.items.push(item);
                Ok(Some(Insertion::Created(ItemId(self.items.len() - 1))))
            }
            Resolution::Unresolved => Ok(None),
        }
    }

    /// Look up an item using the built-in Windows hook table
    pub fn find(&self, id: Option<i32>, name: Option<&str>) -> Result<Option<&ListItem>> {
        self.find_with(&WindowsHookTable, id, name)
    }

    /// Look up the item an insertion of `id`/`name` would match
    pub fn find_with(
        &self,
        directory: &dyn HookDirectory,
        id: Option<i32>,
        name: Option<&str>,
    ) -> Result<Option<&ListItem>> {
        let policy = self.policy.active(self.kind)?;
        let pos = policy.position(&self.items, id, name, directory)?;
        Ok(pos.and_then(|pos| self.items.get(pos)))
    }

    /// Release every item in insertion order, then the store
    ///
    /// Returns the number of items released.
    pub fn destroy(self) -> usize {
        let kind = self.kind;
        let mut released = 0;
        for item in self.items {
            trace!(%kind, %item, "Releasing list item");
            drop(item);
            released += 1;
        }
        debug!(%kind, released, "List store destroyed");
        released
    }
}

impl<'a> IntoIterator for &'a ListStore {
    type Item = &'a ListItem;
    type IntoIter = std::slice::Iter<'a, ListItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Create a store in an empty slot
///
/// # Errors
///
/// Fails if the slot already holds a store.
pub fn create_store_in(slot: &mut Option<ListStore>, kind: ListKind) -> Result<&mut ListStore> {
    if let Some(existing) = slot {
        return Err(Error::AlreadyCreated {
            kind: existing.kind(),
        });
    }
    Ok(slot.insert(ListStore::new(kind)))
}

/// Destroy the store in a slot and leave the slot empty
///
/// An empty slot is left alone, so this is safe to call more than once.
pub fn destroy_store_in(slot: &mut Option<ListStore>) {
    if let Some(store) = slot.take() {
        store.destroy();
    }
}
