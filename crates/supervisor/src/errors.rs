//! Supervisor errors.

use std::{io, path::PathBuf};

use thiserror::Error;
use xbridge_primitives::types::EntityKind;
use xbridge_registry::RegistryError;

use crate::launcher::ProcessExit;

/// Errors that can occur while managing daemon processes.
#[derive(Debug, Error)]
pub enum SupervisorError {
    /// The name or configuration file is already used by a registered daemon.
    #[error("{kind} already running with name {name} or config {}", config_path.display())]
    AlreadyRunning {
        /// Kind of daemon being started.
        kind: EntityKind,

        /// Requested name.
        name: String,

        /// Requested configuration file.
        config_path: PathBuf,
    },

    /// No registered daemon has this name.
    #[error("{kind} {name} is not running")]
    NotRunning {
        /// Kind of daemon being looked up.
        kind: EntityKind,

        /// Requested name.
        name: String,
    },

    /// Neither a name nor "all" was given.
    #[error("must specify a name or `--all`")]
    MissingTarget,

    /// The daemon exited before the grace period was over.
    #[error("{kind} {name} exited during startup ({exit}), output:\n{log}")]
    LaunchFailed {
        /// Kind of daemon being started.
        kind: EntityKind,

        /// Requested name.
        name: String,

        /// How the daemon exited.
        exit: ProcessExit,

        /// Everything the daemon wrote before exiting.
        log: String,
    },

    /// The daemon binary could not be executed.
    #[error("failed to spawn {}: {source}", program.display())]
    Spawn {
        /// The binary.
        program: PathBuf,

        /// The underlying error.
        #[source]
        source: io::Error,
    },

    /// A path could not be resolved or a log file could not be used.
    #[error("io: {}: {source}", path.display())]
    Io {
        /// The path being accessed.
        path: PathBuf,

        /// The underlying error.
        #[source]
        source: io::Error,
    },

    /// The registry could not be read or updated.
    #[error("registry: {0}")]
    Registry(#[from] RegistryError),
}

impl SupervisorError {
    /// Whether the operation was refused before anything was changed.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            SupervisorError::AlreadyRunning { .. }
                | SupervisorError::NotRunning { .. }
                | SupervisorError::MissingTarget
        )
    }
}

/// Result alias for supervisor operations.
pub type SupervisorResult<T> = Result<T, SupervisorError>;
