pub(crate) mod bridge;
pub(crate) mod fund;
pub(crate) mod list;
pub(crate) mod process;

use std::{fmt::Display, path::PathBuf};

use anyhow::{Context as _, Result};
use tracing::debug;
use xbridge_deployer::{DeployError, NodeClientFactory};
use xbridge_registry::{ConfigStore, JsonFileBackend};
use xbridge_supervisor::{SupervisorConfig, SupervisorError};

use crate::{
    config::Config,
    constants::{DEFAULT_DATA_DIR_NAME, REGISTRY_FILE_NAME},
};

/// What every command works against.
#[derive(Debug)]
pub(crate) struct Context {
    pub(crate) data_dir: PathBuf,
    pub(crate) config: Config,
    pub(crate) store: ConfigStore,
}

impl Context {
    /// Resolves the data directory and opens the registry inside it, creating both if needed.
    pub(crate) fn open(data_dir: Option<PathBuf>, config: Config) -> Result<Self> {
        let data_dir = data_dir
            .or_else(|| dirs::config_dir().map(|dir| dir.join(DEFAULT_DATA_DIR_NAME)))
            .context("cannot determine a data directory, pass --data-dir")?;

        let backend = JsonFileBackend::create_if_missing(data_dir.join(REGISTRY_FILE_NAME))
            .context("open registry")?;
        debug!(path = %backend.path().display(), "opened registry");

        Ok(Self {
            data_dir,
            config,
            store: ConfigStore::new(backend),
        })
    }

    pub(crate) fn supervisor_config(&self) -> SupervisorConfig {
        self.config.supervisor_config(&self.data_dir)
    }

    pub(crate) fn client_factory(&self) -> NodeClientFactory {
        NodeClientFactory::new(self.config.rpc_config())
    }
}

/// Errors that distinguish a refused command from one that failed halfway.
pub(crate) trait Refusal {
    fn is_refusal(&self) -> bool;
}

impl Refusal for SupervisorError {
    fn is_refusal(&self) -> bool {
        self.is_precondition()
    }
}

impl Refusal for DeployError {
    fn is_refusal(&self) -> bool {
        self.is_precondition()
    }
}

/// Attaches the action a command was attempting, phrased by whether anything was changed.
pub(crate) trait CommandResultExt<T> {
    fn while_trying<D: Display>(self, action: impl FnOnce() -> D) -> Result<T>;
}

impl<T, E> CommandResultExt<T> for Result<T, E>
where
    E: Refusal + std::error::Error + Send + Sync + 'static,
{
    fn while_trying<D: Display>(self, action: impl FnOnce() -> D) -> Result<T> {
        self.map_err(|err| {
            let context = if err.is_refusal() {
                format!("refused to {}, nothing was changed", action())
            } else {
                format!("failed to {}", action())
            };
            anyhow::Error::new(err).context(context)
        })
    }
}

#[cfg(test)]
mod tests {
    use xbridge_primitives::types::EntityKind;

    use super::*;

    #[test]
    fn refusals_are_phrased_apart_from_failures() {
        let refused: Result<(), _> = Err(SupervisorError::NotRunning {
            kind: EntityKind::Chain,
            name: "A".to_string(),
        });
        let err = refused.while_trying(|| "stop chain A").unwrap_err();
        assert_eq!(
            err.to_string(),
            "refused to stop chain A, nothing was changed"
        );

        let failed: Result<(), _> = Err(DeployError::Funding { failures: vec![] });
        let err = failed.while_trying(|| "build bridge br1").unwrap_err();
        assert_eq!(err.to_string(), "failed to build bridge br1");
        assert!(format!("{err:#}").contains("failed to fund 0 account(s)"));
    }
}
