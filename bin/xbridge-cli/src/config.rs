use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;
use xbridge_deployer::FundingConfig;
use xbridge_ledger::RpcConfig;
use xbridge_supervisor::SupervisorConfig;

/// Operator settings, all optional.
///
/// Read from the TOML file given with `--settings`; anything left out keeps its default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Config {
    /// How daemons are launched.
    pub(crate) supervisor: SupervisorSettings,

    /// How chains are queried.
    pub(crate) rpc: RpcSettings,

    /// How accounts are funded.
    pub(crate) funding: FundingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct SupervisorSettings {
    /// How long a daemon must stay up after launch to count as started.
    pub(crate) grace_period_ms: u64,

    /// Where daemon output goes. Defaults to the data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) log_dir: Option<PathBuf>,
}

impl Default for SupervisorSettings {
    fn default() -> Self {
        Self {
            grace_period_ms: 300,
            log_dir: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct RpcSettings {
    /// Bound on each JSON-RPC request.
    pub(crate) request_timeout_secs: u64,
}

impl Default for RpcSettings {
    fn default() -> Self {
        Self {
            request_timeout_secs: 30,
        }
    }
}

impl Config {
    /// Reads the settings file, or returns the defaults when there is none.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let contents = fs::read_to_string(path)
            .with_context(|| format!("read settings file {}", path.display()))?;
        let config = toml::from_str::<Self>(&contents)
            .with_context(|| format!("parse settings file {}", path.display()))?;
        debug!(?config, "loaded settings");

        Ok(config)
    }

    pub(crate) fn supervisor_config(&self, data_dir: &Path) -> SupervisorConfig {
        let log_dir = self
            .supervisor
            .log_dir
            .clone()
            .unwrap_or_else(|| data_dir.to_path_buf());

        SupervisorConfig::new(log_dir)
            .with_grace_period(Duration::from_millis(self.supervisor.grace_period_ms))
    }

    pub(crate) fn rpc_config(&self) -> RpcConfig {
        RpcConfig {
            request_timeout: Duration::from_secs(self.rpc.request_timeout_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use xbridge_deployer::FundingPolicy;

    use super::*;

    #[test]
    fn test_config_serde_toml() {
        let config = r#"
            [supervisor]
            grace_period_ms = 500
            log_dir = "/var/log/xbridge"

            [rpc]
            request_timeout_secs = 5

            [funding]
            amount = "20000000"
            genesis_account = "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh"
            genesis_secret = "snoPBrXtMeMyMHUVTgbuqAfg1SUTb"
            on_failure = "abort"
        "#;

        let config = toml::from_str::<Config>(config);
        assert!(
            config.is_ok(),
            "must be able to deserialize config from toml but got: {}",
            config.unwrap_err()
        );

        let config = config.unwrap();
        assert_eq!(config.funding.on_failure, FundingPolicy::Abort);
        assert_eq!(config.rpc_config().request_timeout, Duration::from_secs(5));

        let serialized = toml::to_string(&config).unwrap();
        let deserialized = toml::from_str::<Config>(&serialized).unwrap();
        assert_eq!(
            deserialized, config,
            "must be able to serialize and deserialize config to toml"
        );
    }

    #[test]
    fn missing_sections_use_defaults() {
        let config = toml::from_str::<Config>("[rpc]\nrequest_timeout_secs = 10\n").unwrap();

        assert_eq!(config.supervisor, SupervisorSettings::default());
        assert_eq!(config.funding, FundingConfig::default());
        assert_eq!(config.funding.amount, "1000000000");

        let supervisor = config.supervisor_config(Path::new("/data"));
        assert_eq!(supervisor.log_dir(), &PathBuf::from("/data"));
        assert_eq!(supervisor.grace_period(), Duration::from_millis(300));
    }

    #[test]
    fn no_settings_file_means_defaults() {
        assert_eq!(Config::load(None).unwrap(), Config::default());
    }
}
