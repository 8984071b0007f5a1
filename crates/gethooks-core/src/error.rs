//! Error types for gethooks-core
//!
//! Centralized error handling using `thiserror` for ergonomic error definitions.
//!
//! Every variant except [`Error::UnresolvedHook`] and the configuration
//! errors marks a broken precondition: the caller handed a store something
//! it can never accept. Those are meant to be bubbled to the top level and
//! end the program.

use crate::list::ListKind;
use thiserror::Error;

/// Main error type for gethooks-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Insertion into a store whose kind was never set
    #[error("List kind is not set: {kind}")]
    InvalidKind {
        /// The kind the store was created with
        kind: ListKind,
    },

    /// Raw kind value that does not name any list kind
    #[error("{0} (unknown kind)")]
    UnknownKind(i32),

    /// A desktop list item was given a numeric id
    #[error("Desktop '{name}' was given id {id}; desktops are identified by name only")]
    DesktopIdNotAllowed {
        /// The offending id
        id: i32,
        /// The desktop name it was passed with
        name: String,
    },

    /// A desktop list item was given no name
    #[error("Desktop list items require a name")]
    DesktopNameRequired,

    /// Neither an id nor a name was given
    #[error("No id or name given for {kind} item")]
    MissingIdentifier {
        /// Kind of the store that rejected the insertion
        kind: ListKind,
    },

    /// A store slot already holds a store
    #[error("List store for {kind} already created")]
    AlreadyCreated {
        /// Kind of the existing store
        kind: ListKind,
    },

    /// A hook name has no known id
    #[error("Unknown id for hook name: {name}")]
    UnresolvedHook {
        /// The unrecognized hook name
        name: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// Path to the missing config file
        path: String,
    },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    ConfigValue {
        /// Configuration key
        key: String,
        /// Error message
        message: String,
    },

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a config value error
    pub fn config_value(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValue {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Whether this error is a broken precondition rather than bad input
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::InvalidKind { .. }
                | Self::UnknownKind(_)
                | Self::DesktopIdNotAllowed { .. }
                | Self::DesktopNameRequired
                | Self::MissingIdentifier { .. }
                | Self::AlreadyCreated { .. }
        )
    }
}
