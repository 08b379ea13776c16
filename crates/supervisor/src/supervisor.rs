//! Start, stop and restart of chain and witness daemons.

use std::{
    ffi::OsString,
    fmt,
    fs::{self, File},
    path::{self, Path, PathBuf},
};

use tokio::time::sleep;
use tracing::{debug, info, warn};
use xbridge_primitives::types::EntityKind;
use xbridge_registry::{ConfigStore, ProcessRecord, RemoveTarget, StorageBackend};

use crate::{
    config::SupervisorConfig,
    constants::{start_flags, CONF_FLAG, STOP_SUBCOMMAND},
    errors::{SupervisorError, SupervisorResult},
    launcher::ProcessLauncher,
};

/// Where a daemon is in its launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState {
    /// Not running, or not known to be.
    Stopped,

    /// Spawned, grace period not yet over.
    Starting {
        /// OS process id.
        pid: u32,
    },

    /// Survived the grace period and is recorded in the registry.
    Running {
        /// OS process id.
        pid: u32,
    },
}

impl ProcessState {
    /// The state after the grace-period probe.
    pub const fn after_probe(self, exited: bool) -> Self {
        match (self, exited) {
            (ProcessState::Starting { pid }, false) => ProcessState::Running { pid },
            (ProcessState::Starting { .. }, true) => ProcessState::Stopped,
            (state, _) => state,
        }
    }
}

impl fmt::Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessState::Stopped => f.write_str("stopped"),
            ProcessState::Starting { pid } => write!(f, "starting (pid {pid})"),
            ProcessState::Running { pid } => write!(f, "running (pid {pid})"),
        }
    }
}

/// Manages daemons of every [`EntityKind`] against one registry.
#[derive(Debug)]
pub struct Supervisor<'a, B, L> {
    store: &'a ConfigStore<B>,
    launcher: L,
    config: SupervisorConfig,
}

impl<'a, B, L> Supervisor<'a, B, L>
where
    B: StorageBackend,
    L: ProcessLauncher,
{
    /// Creates a supervisor recording its daemons in `store`.
    pub const fn new(store: &'a ConfigStore<B>, launcher: L, config: SupervisorConfig) -> Self {
        Self {
            store,
            launcher,
            config,
        }
    }

    /// The launcher used to run daemons.
    pub const fn launcher(&self) -> &L {
        &self.launcher
    }

    /// Path of the file `name`'s output is written to.
    pub fn log_path(&self, kind: EntityKind, name: &str) -> PathBuf {
        self.config.log_dir().join(format!("{kind}-{name}.out"))
    }

    /// Starts a daemon and records it once it has survived the grace period.
    ///
    /// Nothing is recorded when the name or configuration file is already taken, or when the
    /// daemon exits during the grace period. In the latter case the error carries whatever the
    /// daemon wrote to its log.
    pub async fn start(
        &self,
        kind: EntityKind,
        name: &str,
        executable: &Path,
        config: &Path,
    ) -> SupervisorResult<ProcessRecord> {
        let executable = absolute(executable)?;
        let config = absolute(config)?;

        if self
            .store
            .load()?
            .process_exists(kind, name, Some(&config))
        {
            return Err(SupervisorError::AlreadyRunning {
                kind,
                name: name.to_string(),
                config_path: config,
            });
        }

        let log_dir = self.config.log_dir();
        fs::create_dir_all(log_dir).map_err(|source| SupervisorError::Io {
            path: log_dir.clone(),
            source,
        })?;
        let log_path = self.log_path(kind, name);
        let log = File::create(&log_path).map_err(|source| SupervisorError::Io {
            path: log_path.clone(),
            source,
        })?;

        let mut args: Vec<OsString> = vec![CONF_FLAG.into(), config.clone().into()];
        args.extend(start_flags(kind).iter().map(OsString::from));

        info!(
            %kind,
            %name,
            executable = %executable.display(),
            config = %config.display(),
            "starting daemon"
        );
        let mut process =
            self.launcher
                .spawn(&executable, &args, log)
                .map_err(|source| SupervisorError::Spawn {
                    program: executable.clone(),
                    source,
                })?;

        let pid = process.id();
        let state = ProcessState::Starting { pid };
        debug!(%kind, %name, %state, log = %log_path.display(), "daemon spawned");

        sleep(self.config.grace_period()).await;

        let exit = process
            .try_exited()
            .map_err(|source| SupervisorError::Io {
                path: executable.clone(),
                source,
            })?;
        let state = state.after_probe(exit.is_some());
        debug!(%kind, %name, %state, "probed daemon after grace period");

        if let Some(exit) = exit {
            let log = fs::read_to_string(&log_path).map_err(|source| SupervisorError::Io {
                path: log_path.clone(),
                source,
            })?;
            warn!(%kind, %name, %exit, "daemon exited during startup");

            return Err(SupervisorError::LaunchFailed {
                kind,
                name: name.to_string(),
                exit,
                log,
            });
        }

        let record = ProcessRecord::new(name, executable, config, pid);
        self.store.append_process(kind, record.clone())?;
        info!(%kind, %name, %pid, "daemon started");

        Ok(record)
    }

    /// Stops the targeted daemons through their own stop command and forgets them.
    ///
    /// A stop command that fails is logged and its record is still removed. Returns the records
    /// that were removed.
    pub async fn stop(
        &self,
        kind: EntityKind,
        target: &RemoveTarget,
    ) -> SupervisorResult<Vec<ProcessRecord>> {
        let records = self.resolve(kind, target)?;

        for record in &records {
            let args: Vec<OsString> = vec![
                CONF_FLAG.into(),
                record.config_path.clone().into(),
                STOP_SUBCOMMAND.into(),
            ];

            info!(%kind, name = %record.name, pid = %record.process_id, "stopping daemon");
            match self
                .launcher
                .run_quiet(&record.executable_path, &args)
                .await
            {
                Ok(exit) if exit.success() => {
                    debug!(%kind, name = %record.name, "stop command succeeded")
                }
                Ok(exit) => warn!(
                    %kind,
                    name = %record.name,
                    %exit,
                    "stop command failed, removing record anyway"
                ),
                Err(err) => warn!(
                    %kind,
                    name = %record.name,
                    %err,
                    "could not run stop command, removing record anyway"
                ),
            }
        }

        let removed = self.store.remove_processes(kind, target)?;
        info!(%kind, count = removed.len(), "daemons stopped");

        Ok(removed)
    }

    /// Stops the targeted daemons and starts them again with the same binary and configuration.
    ///
    /// Daemons are restarted in registry order; the first one that fails to start ends the
    /// restart, leaving earlier ones running.
    pub async fn restart(
        &self,
        kind: EntityKind,
        target: &RemoveTarget,
    ) -> SupervisorResult<Vec<ProcessRecord>> {
        let snapshot = self.resolve(kind, target)?;
        self.stop(kind, target).await?;

        let mut restarted = Vec::with_capacity(snapshot.len());
        for record in snapshot {
            let fresh = self
                .start(
                    kind,
                    &record.name,
                    &record.executable_path,
                    &record.config_path,
                )
                .await?;
            restarted.push(fresh);
        }

        Ok(restarted)
    }

    fn resolve(
        &self,
        kind: EntityKind,
        target: &RemoveTarget,
    ) -> SupervisorResult<Vec<ProcessRecord>> {
        let registry = self.store.load()?;
        let records: Vec<ProcessRecord> = registry
            .processes(kind)
            .iter()
            .filter(|record| target.matches(&record.name))
            .cloned()
            .collect();

        if let RemoveTarget::Name(name) = target {
            if records.is_empty() {
                return Err(SupervisorError::NotRunning {
                    kind,
                    name: name.clone(),
                });
            }
        }

        Ok(records)
    }
}

/// Builds a stop/restart target from a name and an "all" flag.
pub fn target(name: Option<String>, all: bool) -> SupervisorResult<RemoveTarget> {
    RemoveTarget::from_flags(name, all).map_err(|_| SupervisorError::MissingTarget)
}

fn absolute(path: &Path) -> SupervisorResult<PathBuf> {
    path::absolute(path).map_err(|source| SupervisorError::Io {
        path: path.to_path_buf(),
        source,
    })
}
