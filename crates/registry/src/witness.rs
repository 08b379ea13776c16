//! The bridge definition a witness was configured with.

use std::{fs, path::Path};

use serde::Deserialize;
use tracing::debug;
use xbridge_primitives::types::{Issue, XChainBridge};

use crate::{
    errors::{RegistryError, RegistryResult},
    records::WitnessRecord,
};

/// The part of a witness configuration file this workspace cares about.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WitnessConfigFile {
    x_chain_bridge: XChainBridge,
}

/// Door accounts and bridged assets read from a witness's own configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WitnessBridgeConfig {
    bridge: XChainBridge,
}

impl WitnessBridgeConfig {
    /// Reads the bridge definition from the configuration file of a registered witness.
    pub fn load(witness: &WitnessRecord) -> RegistryResult<Self> {
        Self::from_path(&witness.config_path)
    }

    /// Reads the bridge definition from a witness configuration file.
    pub fn from_path(path: &Path) -> RegistryResult<Self> {
        let contents = fs::read_to_string(path).map_err(|e| RegistryError::WitnessConfig {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let parsed: WitnessConfigFile =
            serde_json::from_str(&contents).map_err(|e| RegistryError::WitnessConfig {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        debug!(
            path = %path.display(),
            bridge = ?parsed.x_chain_bridge,
            "read witness bridge config"
        );

        Ok(Self {
            bridge: parsed.x_chain_bridge,
        })
    }

    /// Door accounts as a `(locking, issuing)` pair.
    pub fn door_accounts(&self) -> (String, String) {
        self.bridge.doors()
    }

    /// Bridged assets as a `(locking, issuing)` pair.
    pub fn currencies(&self) -> (Issue, Issue) {
        self.bridge.issues()
    }
}
