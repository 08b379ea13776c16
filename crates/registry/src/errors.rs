//! Registry errors.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors that can occur when reading or mutating the registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The backing file could not be read or written.
    #[error("io: {}: {source}", path.display())]
    Io {
        /// The file being accessed.
        path: PathBuf,

        /// The underlying error.
        #[source]
        source: io::Error,
    },

    /// The backing file exists but is not a valid registry document.
    #[error("malformed registry file {}: {source}", path.display())]
    Malformed {
        /// The file being parsed.
        path: PathBuf,

        /// The parse error.
        #[source]
        source: serde_json::Error,
    },

    /// A lookup by name found nothing.
    #[error("{kind} {name} not found")]
    NotFound {
        /// The collection that was searched.
        kind: &'static str,

        /// The name that was looked up.
        name: String,
    },

    /// The caller did not say what to act on.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An insert would break a uniqueness invariant.
    #[error("{kind} {name} is already registered")]
    DuplicateEntry {
        /// The collection being inserted into.
        kind: &'static str,

        /// The colliding name.
        name: String,
    },

    /// A witness configuration file could not be used.
    #[error("witness config {}: {reason}", path.display())]
    WitnessConfig {
        /// The witness configuration file.
        path: PathBuf,

        /// What went wrong.
        reason: String,
    },
}

/// Result alias for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;
