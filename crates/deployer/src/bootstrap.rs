//! The bootstrap document: door-account secrets and witness signer entries.

use std::{collections::BTreeSet, fmt, fs, path::Path};

use serde::Deserialize;
use tracing::debug;
use xbridge_ledger::SignerEntry;
use xbridge_primitives::types::ChainSide;

use crate::{
    constants::BOOTSTRAP_FILE_NAME,
    errors::{DeployError, DeployResult},
};

/// A door account and the secret the node signs its transactions with.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DoorAccount {
    /// Account address.
    pub address: String,

    /// Signing secret.
    pub seed: String,
}

impl fmt::Debug for DoorAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DoorAccount")
            .field("address", &self.address)
            .field("seed", &"<redacted>")
            .finish()
    }
}

/// Everything the bootstrap document lists for one chain.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChainBootstrap {
    /// The chain's door account.
    pub door_account: DoorAccount,

    /// Accounts the witnesses collect rewards in.
    #[serde(default)]
    pub witness_reward_accounts: Vec<String>,

    /// Accounts the witnesses submit attestations from.
    #[serde(default)]
    pub witness_submit_accounts: Vec<String>,
}

/// One witness allowed to co-sign for the door accounts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BootstrapSigner {
    /// Signing account.
    pub account: String,

    /// Weight of the signature.
    pub weight: u16,
}

/// The witness section of the bootstrap document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WitnessBootstrap {
    /// All witness signers, in the order they are installed.
    pub signer_list: Vec<BootstrapSigner>,
}

/// Secrets and signer entries needed to activate a freshly defined bridge.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BootstrapDocument {
    /// Locking chain section.
    pub locking_chain: ChainBootstrap,

    /// Issuing chain section.
    pub issuing_chain: ChainBootstrap,

    /// Witness signers.
    pub witnesses: WitnessBootstrap,
}

impl BootstrapDocument {
    /// Reads the document at `path`, or `bridge_bootstrap.json` inside it when `path` is a
    /// directory.
    pub fn load(path: &Path) -> DeployResult<Self> {
        let path = if path.is_dir() {
            path.join(BOOTSTRAP_FILE_NAME)
        } else {
            path.to_path_buf()
        };

        let bootstrap_error = |reason: String| DeployError::Bootstrap {
            path: path.clone(),
            reason,
        };

        let contents = fs::read_to_string(&path).map_err(|e| bootstrap_error(e.to_string()))?;
        let document: Self =
            serde_json::from_str(&contents).map_err(|e| bootstrap_error(e.to_string()))?;
        debug!(
            path = %path.display(),
            signers = document.witnesses.signer_list.len(),
            "loaded bootstrap document"
        );

        Ok(document)
    }

    /// The section for `side`.
    pub const fn chain(&self, side: ChainSide) -> &ChainBootstrap {
        match side {
            ChainSide::Locking => &self.locking_chain,
            ChainSide::Issuing => &self.issuing_chain,
        }
    }

    /// Signer entries for the door accounts' signer lists, in document order.
    pub fn signer_entries(&self) -> Vec<SignerEntry> {
        self.witnesses
            .signer_list
            .iter()
            .map(|signer| SignerEntry::new(&signer.account, signer.weight))
            .collect()
    }

    /// The issuing chain's reward and submit accounts, deduplicated and sorted.
    pub fn accounts_to_fund(&self) -> Vec<String> {
        let issuing = &self.issuing_chain;
        issuing
            .witness_reward_accounts
            .iter()
            .chain(&issuing.witness_submit_accounts)
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
