//! Configuration for the filter lists
//!
//! Lists can be given in a TOML file:
//!
//! ```toml
//! [filters]
//! desktops = ["Default"]
//! include_hooks = [2, "WH_MOUSE_LL"]
//! exclude_programs = ["explorer.exe", 4120]
//! ```
//!
//! Integers are ids (hook ids or process ids), strings are names.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// A single list entry: numeric id or name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Entry {
    /// Hook id or process id
    Id(i32),
    /// Hook, program or desktop name
    Name(String),
}

impl Entry {
    /// Parse a command-line value; anything that is a valid integer is an id
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        match value.parse::<i32>() {
            Ok(id) => Entry::Id(id),
            Err(_) => Entry::Name(value.to_string()),
        }
    }

    /// The `(id, name)` pair to insert
    pub fn as_parts(&self) -> (Option<i32>, Option<&str>) {
        match self {
            Entry::Id(id) => (Some(*id), None),
            Entry::Name(name) => (None, Some(name.as_str())),
        }
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Id(id) => write!(f, "{id}"),
            Entry::Name(name) => f.write_str(name),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// The user-specified lists
    pub filters: FiltersConfig,
}

/// Entries for each list kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FiltersConfig {
    /// Desktops to include (names only)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub desktops: Vec<Entry>,
    /// Hooks to include
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub include_hooks: Vec<Entry>,
    /// Hooks to exclude
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exclude_hooks: Vec<Entry>,
    /// Programs to include
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub include_programs: Vec<Entry>,
    /// Programs to exclude
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exclude_programs: Vec<Entry>,
}

impl FilterConfig {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|_| Error::ConfigNotFound {
            path: path.display().to_string(),
        })?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(Error::from)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }

    /// Append entries from another source (e.g. the command line)
    pub fn merge(&mut self, other: FiltersConfig) {
        let f = &mut self.filters;
        f.desktops.extend(other.desktops);
        f.include_hooks.extend(other.include_hooks);
        f.exclude_hooks.extend(other.exclude_hooks);
        f.include_programs.extend(other.include_programs);
        f.exclude_programs.extend(other.exclude_programs);
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let f = &self.filters;

        if let Some(Entry::Id(id)) = f.desktops.iter().find(|e| matches!(e, Entry::Id(_))) {
            return Err(Error::config_value(
                "filters.desktops",
                format!("Desktops are named, got id {id}"),
            ));
        }

        if f.desktops.iter().any(|e| matches!(e, Entry::Name(n) if n.trim().is_empty())) {
            return Err(Error::config_value("filters.desktops", "Empty desktop name"));
        }

        // Including and excluding the same kind at once is contradictory.
        if !f.include_hooks.is_empty() && !f.exclude_hooks.is_empty() {
            return Err(Error::config_value(
                "filters",
                "include_hooks and exclude_hooks are mutually exclusive",
            ));
        }
        if !f.include_programs.is_empty() && !f.exclude_programs.is_empty() {
            return Err(Error::config_value(
                "filters",
                "include_programs and exclude_programs are mutually exclusive",
            ));
        }

        Ok(())
    }
}
