//! Error types for roster.
//!
//! The search index itself is total and never fails; these errors cover the
//! edges of the crate: configuration, reading roster exports, and list
//! reordering.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for roster operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Roster Source Errors ===
    /// Failed to read a roster file.
    #[error("failed to read roster file {path}: {source}")]
    RosterRead {
        /// Path to the roster file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A roster file is not valid JSON.
    #[error("failed to parse roster file {path}: {source}")]
    RosterParse {
        /// Path to the roster file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// A roster file parsed, but its top level is not a member list.
    #[error("unexpected roster layout in {path}: {message}")]
    RosterShape {
        /// Path to the roster file.
        path: PathBuf,
        /// Description of what was found instead.
        message: String,
    },

    /// No member with the requested identifier.
    #[error("no member with id '{id}'")]
    MemberNotFound {
        /// The identifier that was looked up.
        id: String,
    },

    // === Reordering Errors ===
    /// A list position is outside the list.
    #[error("position {index} is out of range for a list of {len} items")]
    PositionOutOfRange {
        /// The requested position.
        index: usize,
        /// Length of the list.
        len: usize,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for roster operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a configuration validation error.
    #[must_use]
    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }

    /// Create a roster layout error.
    #[must_use]
    pub fn roster_shape(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::RosterShape {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a member-not-found error.
    #[must_use]
    pub fn member_not_found(id: impl Into<String>) -> Self {
        Self::MemberNotFound { id: id.into() }
    }
}
