//! Supervisor configuration.

use std::{path::PathBuf, time::Duration};

use crate::constants::DEFAULT_GRACE_PERIOD;

/// Where daemon output goes and how long a launch is watched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupervisorConfig {
    log_dir: PathBuf,
    grace_period: Duration,
}

impl SupervisorConfig {
    /// Creates a config writing daemon logs into `log_dir`, with the default grace period.
    pub fn new(log_dir: impl Into<PathBuf>) -> Self {
        Self {
            log_dir: log_dir.into(),
            grace_period: DEFAULT_GRACE_PERIOD,
        }
    }

    /// Sets how long a launched daemon must survive before it is recorded.
    pub fn with_grace_period(self, grace_period: Duration) -> Self {
        Self {
            grace_period,
            ..self
        }
    }

    /// Directory holding one output file per daemon.
    pub fn log_dir(&self) -> &PathBuf {
        &self.log_dir
    }

    /// How long a launched daemon must survive before it is recorded.
    pub fn grace_period(&self) -> Duration {
        self.grace_period
    }
}
