//! # GetHooks Core
//!
//! User-specified inclusion/exclusion lists for the GetHooks monitor.
//!
//! ## Architecture
//!
//! This crate provides:
//! - **List stores** - typed, insertion-ordered, deduplicated lists of ids and names
//! - **Hook directory** - lookup between `WH_*` hook ids and their names
//! - **Filter lists** - the set of stores and the report/ignore decision
//! - **Configuration** - TOML configuration of the lists
//!
//! ## Example
//!
//! ```rust
//! use gethooks_core::{ListKind, ListStore};
//!
//! let mut store = ListStore::new(ListKind::IncludeHook);
//! store.insert(Some(2), None)?;
//! store.insert(None, Some("WH_KEYBOARD"))?;
//!
//! assert_eq!(store.len(), 1);
//! assert_eq!(store.head().and_then(|item| item.name()), Some("WH_KEYBOARD"));
//! # Ok::<(), gethooks_core::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod filter;
pub mod hooks;
pub mod list;
pub mod print;

// Re-exports for convenience
pub use config::{Entry, FilterConfig};
pub use error::{Error, Result};
pub use filter::{FilterLists, Verdict};
pub use hooks::{HookDirectory, WindowsHookTable};
pub use list::{create_store_in, destroy_store_in, Insertion, ItemId, ListItem, ListKind, ListStore};
