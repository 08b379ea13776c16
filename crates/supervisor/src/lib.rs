//! Lifecycle management for the chain and witness daemons.
//!
//! The supervisor starts daemons as detached OS processes, probes them once after a short grace
//! period, records the survivors in the registry and stops them again through the daemon's own
//! `stop` subcommand. It never waits on a daemon beyond that first probe.

pub mod config;
pub mod constants;
pub mod errors;
pub mod launcher;
pub mod supervisor;

#[cfg(test)]
mod testing;

pub use config::SupervisorConfig;
pub use errors::{SupervisorError, SupervisorResult};
pub use launcher::{LaunchedProcess, ProcessExit, ProcessLauncher, SystemLauncher};
pub use supervisor::{target, ProcessState, Supervisor};
